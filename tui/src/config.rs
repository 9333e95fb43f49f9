//! Dashboard Configuration
//!
//! Everything the dashboard needs to know about presentation and geometry,
//! passed explicitly to [`Dashboard::new`](crate::Dashboard::new).

use ratatui::style::Style;

use crate::theme;

/// Presentation and geometry settings for the dashboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Glyph drawn for a live cell
    pub live_glyph: String,
    /// Glyph drawn for a dead cell
    pub dead_glyph: String,
    /// Style of live cells
    pub live_style: Style,
    /// Style of dead cells
    pub dead_style: Style,
    /// Below this terminal height only the warning header is shown
    pub min_height: u16,
    /// Width of the configuration/status column
    pub left_column_width: u16,
    /// Header text in the full layout
    pub title: String,
    /// Header text when the terminal is too small
    pub too_small_message: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            live_glyph: theme::LIVE_GLYPH.to_string(),
            dead_glyph: theme::DEAD_GLYPH.to_string(),
            live_style: theme::LIVE_CELL,
            dead_style: theme::DEAD_CELL,
            min_height: 20,
            left_column_width: 28,
            title: "This is \"The Life\" game simulation".to_string(),
            too_small_message: "Terminal height too small".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Plain glyphs, no colors (handy for snapshot-style assertions)
    pub fn plain() -> Self {
        Self {
            live_style: Style::default(),
            dead_style: Style::default(),
            ..Self::default()
        }
    }
}
