//! Panel Renderer
//!
//! Turns universe snapshots into styled panel content. Every render is a
//! full repaint: the panel is cleared and refilled from the snapshot.
//!
//! The `render_*` functions are pure and return [`Text`]; the `paint_*`
//! functions look up the target panel in a [`Toolkit`] and store the result.

use std::collections::HashMap;
use std::fmt::Display;
use std::time::Duration;

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthChar;

use universe_core::{Area, Options, RunningState, Status};

use crate::bindings::Binding;
use crate::config::DashboardConfig;
use crate::layout::panels;
use crate::theme;
use crate::toolkit::{Toolkit, ToolkitError};

/// Shown in place of the last visible row when the grid does not fit
pub const CROP_MESSAGE: &str = "The field size is larger than the viewing area";

/// Renders snapshots with a fixed palette and mode-label table
pub struct Renderer {
    live_glyph: String,
    dead_glyph: String,
    live_style: Style,
    dead_style: Style,
    mode_labels: HashMap<RunningState, Span<'static>>,
}

impl Renderer {
    /// Build a renderer from the dashboard configuration
    pub fn new(config: &DashboardConfig) -> Self {
        let mode_labels = HashMap::from([
            (RunningState::Manual, Span::raw("waiting")),
            (RunningState::Step, Span::raw("do the step")),
            (RunningState::Run, Span::styled("running", theme::MODE_RUNNING)),
            (RunningState::Finished, Span::styled("finished", theme::MODE_FINISHED)),
        ]);
        Self {
            live_glyph: config.live_glyph.clone(),
            dead_glyph: config.dead_glyph.clone(),
            live_style: config.live_style,
            dead_style: config.dead_style,
            mode_labels,
        }
    }

    /// Display label for a running mode
    pub fn mode_label(&self, mode: RunningState) -> Span<'static> {
        self.mode_labels
            .get(&mode)
            .cloned()
            .unwrap_or_else(|| Span::raw(format!("{mode:?}")))
    }

    /// Render the grid into a viewport of `(width, height)` cells
    ///
    /// Rows and columns beyond the viewport are dropped. When anything is
    /// dropped, the last visible row is replaced by [`CROP_MESSAGE`].
    pub fn render_field(&self, area: &Area, viewport: (u16, u16)) -> Text<'static> {
        let max_w = usize::from(viewport.0);
        let max_h = usize::from(viewport.1);
        let crop = area.width > max_w || area.height > max_h;

        let mut lines = Vec::with_capacity(area.height.min(max_h));
        for (i, row) in area.rows.iter().enumerate().take(area.height) {
            if i >= max_h {
                break;
            }
            if crop && i == max_h - 1 {
                lines.push(Line::from(Span::styled(
                    fit_width(CROP_MESSAGE, max_w),
                    theme::CROP_WARNING,
                )));
                break;
            }
            lines.push(self.render_row(row, area.width.min(max_w)));
        }
        Text::from(lines)
    }

    /// One grid row, consecutive equal cells merged into a single span
    fn render_row(&self, row: &[bool], width: usize) -> Line<'static> {
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_alive = None;

        for &alive in row.iter().take(width) {
            if run_alive != Some(alive) {
                if let Some(prev) = run_alive {
                    spans.push(Span::styled(std::mem::take(&mut run), self.cell_style(prev)));
                }
                run_alive = Some(alive);
            }
            run.push_str(if alive {
                &self.live_glyph
            } else {
                &self.dead_glyph
            });
        }
        if let Some(prev) = run_alive {
            spans.push(Span::styled(run, self.cell_style(prev)));
        }
        Line::from(spans)
    }

    fn cell_style(&self, alive: bool) -> Style {
        if alive {
            self.live_style
        } else {
            self.dead_style
        }
    }

    /// Step count, live cells, evaluation time and mode
    pub fn render_status(&self, status: &Status) -> Text<'static> {
        Text::from(vec![
            property_line("Step", status.iteration),
            property_line("Live Cells", status.live_cells),
            property_line(
                "Evaluation time",
                format!("{:?}", round_to_micros(status.iteration_time)),
            ),
            property_line_styled("Mode", self.mode_label(status.mode)),
        ])
    }

    /// Fixed configuration lines, then advanced options sorted by key
    pub fn render_options(&self, options: &Options) -> Text<'static> {
        let mut lines = vec![
            property_line("Dimension", format!("{} x {}", options.width, options.height)),
            property_line("Interval", format!("{:?}", options.interval)),
            property_line("Iterations", format!("{} steps", options.max_steps)),
        ];

        let mut keys: Vec<&String> = options.advanced.keys().collect();
        keys.sort();
        for key in keys {
            lines.push(property_line(key, &options.advanced[key]));
        }
        Text::from(lines)
    }

    /// The help bar content
    pub fn render_help(&self, bindings: &[Binding]) -> Text<'static> {
        Text::from(help_line(bindings))
    }

    /// Repaint the battlefield panel from `area`
    pub fn paint_field(&self, toolkit: &mut Toolkit, area: &Area) -> Result<(), ToolkitError> {
        let panel = toolkit.panel_mut(panels::BATTLEFIELD)?;
        let text = self.render_field(area, panel.viewport());
        panel.clear();
        panel.set_content(text);
        Ok(())
    }

    /// Repaint the status panel from `status`
    pub fn paint_status(&self, toolkit: &mut Toolkit, status: &Status) -> Result<(), ToolkitError> {
        let panel = toolkit.panel_mut(panels::STATUS)?;
        panel.clear();
        panel.set_content(self.render_status(status));
        Ok(())
    }

    /// Repaint the configuration panel from `options`
    pub fn paint_options(&self, toolkit: &mut Toolkit, options: &Options) -> Result<(), ToolkitError> {
        let panel = toolkit.panel_mut(panels::CONFIGURATION)?;
        panel.clear();
        panel.set_content(self.render_options(options));
        Ok(())
    }
}

/// A status/configuration line: ` name: value` with the name highlighted
pub fn property_line(name: &str, value: impl Display) -> Line<'static> {
    property_line_styled(name, Span::raw(value.to_string()))
}

fn property_line_styled(name: &str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(name.to_string(), theme::PROPERTY_NAME),
        Span::raw(": "),
        value,
    ])
}

/// `KEYBINDINGS: ` then every binding as `name: description`, comma separated
pub fn help_line(bindings: &[Binding]) -> Line<'static> {
    let mut spans = vec![Span::raw("KEYBINDINGS: ")];
    for (i, binding) in bindings.iter().enumerate() {
        if i != 0 {
            spans.push(Span::raw(", "));
        }
        spans.push(Span::styled(binding.name, theme::KEY_NAME));
        spans.push(Span::raw(": "));
        spans.push(Span::raw(binding.description));
    }
    Line::from(spans)
}

/// Round to the nearest microsecond (halves round up)
pub fn round_to_micros(d: Duration) -> Duration {
    let micros = (d.as_nanos() + 500) / 1000;
    Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX))
}

/// Truncate `text` to at most `width` terminal columns
pub fn fit_width(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
