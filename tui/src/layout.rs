//! Layout Manager
//!
//! Screen geometry as a pure function of the terminal size, and the code
//! that makes the toolkit's panels match it.
//!
//! ```text
//! ┌────────────────── header (3 rows) ──────────────────┐
//! ├ Configuration ─┐ ┌ Battle Field ────────────────────┤
//! │                │ │                                  │
//! ├ Status ────────┤ │                                  │
//! │                │ │                                  │
//! └────────────────┘ └──────────────────────────────────┘
//!
//!  KEYBINDINGS: ...                        (last 2 rows)
//! ```

use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use unicode_width::UnicodeWidthStr;

use universe_core::Universe;

use crate::bindings::Binding;
use crate::config::DashboardConfig;
use crate::render::{fit_width, Renderer};
use crate::theme;
use crate::toolkit::{PanelSlot, Toolkit, ToolkitError};

/// Panel names
pub mod panels {
    /// Title bar, or the whole screen when the terminal is too small
    pub const HEADER: &str = "header";
    /// Simulation options
    pub const CONFIGURATION: &str = "configuration";
    /// Run statistics
    pub const STATUS: &str = "status";
    /// The grid
    pub const BATTLEFIELD: &str = "battlefield";
    /// Key binding summary
    pub const HELP: &str = "help";

    /// Every panel the layout can create
    pub const ALL: [&str; 5] = [HEADER, CONFIGURATION, STATUS, BATTLEFIELD, HELP];
}

/// Rows taken by the header in the full layout
const HEADER_HEIGHT: u16 = 3;

/// Rows from the bottom of the middle section to the screen bottom
const BOTTOM_MARGIN: u16 = 5;

/// Rows taken by the help bar
const HELP_HEIGHT: u16 = 2;

/// Panel geometry of the full layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullLayout {
    /// Title bar
    pub header: Rect,
    /// Upper half of the left column
    pub configuration: Rect,
    /// Lower half of the left column
    pub status: Rect,
    /// Right of the left column
    pub battlefield: Rect,
    /// Bottom rows
    pub help: Rect,
}

/// What the screen should look like at a given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPlan {
    /// Terminal too short: a full-screen header with a warning
    TooSmall {
        /// Full-screen header
        header: Rect,
    },
    /// Every panel
    Full(FullLayout),
}

/// Compute the layout for a `width` x `height` terminal
pub fn plan(width: u16, height: u16, config: &DashboardConfig) -> LayoutPlan {
    if height < config.min_height {
        return LayoutPlan::TooSmall {
            header: Rect::new(0, 0, width, height),
        };
    }

    let left = config.left_column_width;
    // Last row of the middle section, inclusive
    let bottom = height.saturating_sub(BOTTOM_MARGIN);
    // Last row of the configuration panel, inclusive
    let split = HEADER_HEIGHT + bottom.saturating_sub(HEADER_HEIGHT) / 2;

    LayoutPlan::Full(FullLayout {
        header: Rect::new(0, 0, width, HEADER_HEIGHT),
        configuration: Rect::new(0, HEADER_HEIGHT, left, split - HEADER_HEIGHT + 1),
        status: Rect::new(0, split + 1, left, bottom.saturating_sub(split)),
        battlefield: Rect::new(
            left + 1,
            HEADER_HEIGHT,
            width.saturating_sub(left + 1),
            (bottom + 1).saturating_sub(HEADER_HEIGHT),
        ),
        help: Rect::new(0, height.saturating_sub(HELP_HEIGHT), width, HELP_HEIGHT),
    })
}

/// Everything needed to fill panels when they are (re)created
pub struct LayoutContext<'a> {
    /// Header messages and geometry settings
    pub config: &'a DashboardConfig,
    /// Content renderer
    pub renderer: &'a Renderer,
    /// Snapshot source
    pub universe: &'a dyn Universe,
    /// Help bar content
    pub bindings: &'a [Binding],
}

/// How a panel ended up after [`place`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Created,
    Existing,
    /// The bounds did not fit; the panel is absent
    Omitted,
}

/// Create or keep a panel at `bounds`, tolerating bounds that do not fit
fn place(toolkit: &mut Toolkit, name: &str, bounds: Rect) -> Result<Placement, ToolkitError> {
    match toolkit.set_panel(name, bounds) {
        Ok(PanelSlot::Created(_)) => Ok(Placement::Created),
        Ok(PanelSlot::Existing(_)) => Ok(Placement::Existing),
        Err(err @ ToolkitError::InvalidBounds { .. }) => {
            tracing::warn!(%err, "Panel omitted");
            ignore_missing(toolkit.delete_panel(name))?;
            Ok(Placement::Omitted)
        }
        Err(err) => Err(err),
    }
}

/// Treat a missing panel as success
pub fn ignore_missing(result: Result<(), ToolkitError>) -> Result<(), ToolkitError> {
    match result {
        Err(ToolkitError::UnknownPanel(_)) => Ok(()),
        other => other,
    }
}

/// Make the toolkit's panels match `plan`
///
/// Newly created panels get their full initial content. Panels kept at the
/// same geometry are left alone, except the battlefield, which is always
/// repainted because its viewport may crop differently.
pub fn apply(
    toolkit: &mut Toolkit,
    plan: &LayoutPlan,
    ctx: &LayoutContext<'_>,
) -> Result<(), ToolkitError> {
    let layout = match plan {
        LayoutPlan::TooSmall { header } => {
            show_header(toolkit, *header, &ctx.config.too_small_message)?;
            for name in [
                panels::CONFIGURATION,
                panels::STATUS,
                panels::BATTLEFIELD,
                panels::HELP,
            ] {
                ignore_missing(toolkit.delete_panel(name))?;
            }
            tracing::debug!("Layout: terminal too small");
            return Ok(());
        }
        LayoutPlan::Full(layout) => layout,
    };

    show_header(toolkit, layout.header, &ctx.config.title)?;

    if place(toolkit, panels::CONFIGURATION, layout.configuration)? == Placement::Created {
        toolkit.panel_mut(panels::CONFIGURATION)?.title = Some("Configuration".to_string());
        ctx.renderer.paint_options(toolkit, &ctx.universe.options())?;
    }

    if place(toolkit, panels::STATUS, layout.status)? == Placement::Created {
        toolkit.panel_mut(panels::STATUS)?.title = Some("Status".to_string());
        ctx.renderer.paint_status(toolkit, &ctx.universe.status())?;
    }

    match place(toolkit, panels::BATTLEFIELD, layout.battlefield)? {
        Placement::Created => {
            toolkit.panel_mut(panels::BATTLEFIELD)?.title = Some("Battle Field".to_string());
            ctx.renderer.paint_field(toolkit, &ctx.universe.area())?;
        }
        Placement::Existing => ctx.renderer.paint_field(toolkit, &ctx.universe.area())?,
        Placement::Omitted => {}
    }

    if place(toolkit, panels::HELP, layout.help)? == Placement::Created {
        let panel = toolkit.panel_mut(panels::HELP)?;
        panel.frame = false;
        panel.wrap = true;
        panel.set_content(ctx.renderer.render_help(ctx.bindings));
    }

    tracing::debug!(?layout, "Layout applied");
    Ok(())
}

/// Create or update the frameless header and center `message` in it
fn show_header(toolkit: &mut Toolkit, bounds: Rect, message: &str) -> Result<(), ToolkitError> {
    let placement = place(toolkit, panels::HEADER, bounds)?;
    if placement == Placement::Omitted {
        return Ok(());
    }

    let panel = toolkit.panel_mut(panels::HEADER)?;
    if placement == Placement::Created {
        panel.frame = false;
        panel.style = theme::HEADER;
    }
    panel.clear();
    panel.set_content(header_text(message, bounds.width, bounds.height));
    Ok(())
}

/// `message` centered horizontally on the middle row, cut to fit `width`
pub fn header_text(message: &str, width: u16, height: u16) -> Text<'static> {
    let message = fit_width(message, usize::from(width));
    let pad = usize::from(width).saturating_sub(message.width()) / 2;

    let mut lines = vec![Line::default(); usize::from(height / 2)];
    lines.push(Line::from(format!("{}{message}", " ".repeat(pad))));
    Text::from(lines)
}
