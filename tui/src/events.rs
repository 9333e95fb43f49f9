//! Input Events
//!
//! The subset of terminal events the dashboard reacts to, as one tagged
//! enum. Key releases, repeats, mouse moves and drags, focus and paste
//! events are dropped at conversion time.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::bindings::Trigger;

/// A terminal event the dashboard understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press
    Key {
        /// Key code
        code: KeyCode,
        /// Modifiers held
        modifiers: KeyModifiers,
    },
    /// A mouse button pressed at a screen cell
    Pointer {
        /// Button
        button: MouseButton,
        /// Screen column
        column: u16,
        /// Screen row
        row: u16,
    },
    /// The terminal changed size
    Resize {
        /// New width
        width: u16,
        /// New height
        height: u16,
    },
}

impl InputEvent {
    /// Convert a crossterm event, dropping anything not handled
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => Some(Self::Key { code, modifiers }),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(button),
                column,
                row,
                ..
            }) => Some(Self::Pointer {
                button,
                column,
                row,
            }),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }

    /// Convenience for a key without modifiers
    pub fn key(c: char) -> Self {
        Self::Key {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Convenience for a left click
    pub fn click(column: u16, row: u16) -> Self {
        Self::Pointer {
            button: MouseButton::Left,
            column,
            row,
        }
    }

    /// The trigger this event would fire, if any
    pub fn trigger(&self) -> Option<Trigger> {
        match *self {
            Self::Key { code, modifiers } => Some(Trigger::Key(code, modifiers)),
            Self::Pointer { button, .. } => Some(Trigger::Pointer(button)),
            Self::Resize { .. } => None,
        }
    }
}
