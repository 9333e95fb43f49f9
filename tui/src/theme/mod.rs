//! Theme and Colors
//!
//! The dashboard's fixed palette. Colors are presentation only; nothing
//! else in the crate depends on them.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Battlefield
// ============================================================================

/// Glyph for a live cell
pub const LIVE_GLYPH: &str = "█";

/// Glyph for a dead cell
pub const DEAD_GLYPH: &str = "░";

/// Live cell - green block on a bright green background
pub const LIVE_CELL: Style = Style::new().fg(Color::Green).bg(Color::LightGreen);

/// Dead cell - terminal default
pub const DEAD_CELL: Style = Style::new();

/// Crop warning shown in place of the last visible row
pub const CROP_WARNING: Style = Style::new().fg(Color::Red).bg(Color::Black);

// ============================================================================
// Panels
// ============================================================================

/// Header bar - black on cyan
pub const HEADER: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Property names in status/configuration panels
pub const PROPERTY_NAME: Style = Style::new().fg(Color::Green);

/// Key names in the help bar
pub const KEY_NAME: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

// ============================================================================
// Running Mode
// ============================================================================

/// Simulation iterating on its own
pub const MODE_RUNNING: Style = Style::new().fg(Color::Cyan);

/// Simulation reached its step limit
pub const MODE_FINISHED: Style = Style::new().fg(Color::Red);
