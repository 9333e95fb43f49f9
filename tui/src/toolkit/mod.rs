//! Panel Toolkit
//!
//! A thin layer over ratatui that manages named rectangular panels. Each
//! panel has its own bounds, frame, title and styled content; the toolkit
//! paints all of them into a frame in creation order.
//!
//! Content is mutated either directly by the event loop (layout, input
//! handlers) or through [`UpdateSender::schedule`] from any other thread.

mod panel;
mod update;

use std::collections::HashMap;

use ratatui::layout::{Rect, Size};
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use thiserror::Error;

pub use panel::Panel;
pub use update::{Update, UpdateReceiver, UpdateSender};

/// Errors reported by panel operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    /// No panel with this name exists
    #[error("unknown panel {0:?}")]
    UnknownPanel(String),

    /// The requested bounds are empty or leave the terminal
    #[error("invalid bounds for panel {name:?}: {bounds} does not fit a {width}x{height} terminal")]
    InvalidBounds {
        /// Panel name
        name: String,
        /// Requested bounds
        bounds: Rect,
        /// Terminal width
        width: u16,
        /// Terminal height
        height: u16,
    },
}

/// Result of [`Toolkit::set_panel`]
pub enum PanelSlot<'a> {
    /// The panel was created, or recreated because its bounds changed
    Created(&'a mut Panel),
    /// The panel already existed with identical bounds
    Existing(&'a mut Panel),
}

impl<'a> PanelSlot<'a> {
    /// Whether the panel needs its initial setup
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The panel, whichever way it was obtained
    pub fn into_panel(self) -> &'a mut Panel {
        match self {
            Self::Created(p) | Self::Existing(p) => p,
        }
    }
}

/// All panels of the screen
pub struct Toolkit {
    /// Panels by name
    panels: HashMap<String, Panel>,
    /// Names in creation order (paint order, back to front)
    order: Vec<String>,
    /// Terminal size
    size: Size,
    /// Sender kept for handing out to other threads
    updates: UpdateSender,
}

impl Toolkit {
    /// Create an empty toolkit for a terminal of the given size
    pub fn new(width: u16, height: u16) -> (Self, UpdateReceiver) {
        let (updates, rx) = update::channel();
        let toolkit = Self {
            panels: HashMap::new(),
            order: Vec::new(),
            size: Size::new(width, height),
            updates,
        };
        (toolkit, rx)
    }

    /// Terminal size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Record a new terminal size; panels are not touched
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = Size::new(width, height);
    }

    /// Handle for scheduling updates from other threads
    pub fn updater(&self) -> UpdateSender {
        self.updates.clone()
    }

    /// Create a panel, or fetch it if it already exists at `bounds`
    ///
    /// A panel that exists with different bounds is recreated empty.
    pub fn set_panel(&mut self, name: &str, bounds: Rect) -> Result<PanelSlot<'_>, ToolkitError> {
        let fits = bounds.width > 0
            && bounds.height > 0
            && bounds.right() <= self.size.width
            && bounds.bottom() <= self.size.height;
        if !fits {
            return Err(ToolkitError::InvalidBounds {
                name: name.to_string(),
                bounds,
                width: self.size.width,
                height: self.size.height,
            });
        }

        match self.panels.entry(name.to_string()) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                let panel = entry.into_mut();
                if panel.bounds == bounds {
                    Ok(PanelSlot::Existing(panel))
                } else {
                    tracing::debug!(name, from = %panel.bounds, to = %bounds, "Panel recreated");
                    *panel = Panel::new(name, bounds);
                    Ok(PanelSlot::Created(panel))
                }
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                tracing::debug!(name, %bounds, "Panel created");
                self.order.push(name.to_string());
                Ok(PanelSlot::Created(entry.insert(Panel::new(name, bounds))))
            }
        }
    }

    /// Look up a panel by name
    pub fn panel(&self, name: &str) -> Result<&Panel, ToolkitError> {
        self.panels
            .get(name)
            .ok_or_else(|| ToolkitError::UnknownPanel(name.to_string()))
    }

    /// Look up a panel by name for mutation
    pub fn panel_mut(&mut self, name: &str) -> Result<&mut Panel, ToolkitError> {
        self.panels
            .get_mut(name)
            .ok_or_else(|| ToolkitError::UnknownPanel(name.to_string()))
    }

    /// Remove a panel
    pub fn delete_panel(&mut self, name: &str) -> Result<(), ToolkitError> {
        self.panels
            .remove(name)
            .ok_or_else(|| ToolkitError::UnknownPanel(name.to_string()))?;
        self.order.retain(|n| n != name);
        tracing::debug!(name, "Panel deleted");
        Ok(())
    }

    /// Panel names in paint order
    pub fn panel_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Topmost panel containing a screen cell (for mouse events)
    pub fn panel_at(&self, x: u16, y: u16) -> Option<&Panel> {
        self.order
            .iter()
            .rev()
            .filter_map(|name| self.panels.get(name))
            .find(|panel| panel.contains(x, y))
    }

    /// Run a scheduled update against this toolkit
    pub fn apply(&mut self, update: Update) -> Result<(), ToolkitError> {
        update(self)
    }

    /// Paint every panel, back to front
    pub fn draw(&self, frame: &mut Frame) {
        let screen = frame.area();
        for panel in self.order.iter().filter_map(|name| self.panels.get(name)) {
            let area = panel.bounds.intersection(screen);
            if area.is_empty() {
                continue;
            }

            let mut block = Block::default().style(panel.style);
            if panel.frame {
                block = block.borders(Borders::ALL);
                if let Some(title) = &panel.title {
                    block = block.title(title.as_str());
                }
            }

            let mut paragraph = Paragraph::new(panel.content().clone()).block(block);
            if panel.wrap {
                paragraph = paragraph.wrap(Wrap { trim: true });
            }

            frame.render_widget(Clear, area);
            frame.render_widget(paragraph, area);
        }
    }
}

/// Flatten styled text to a plain string, lines joined by `\n`
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
