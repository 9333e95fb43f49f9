//! SimLife TUI - Terminal dashboard for a cellular-automaton simulation
//!
//! Shows a [`Universe`](universe_core::Universe) as a set of panels (the
//! grid, its run statistics and configuration, a help bar) and forwards
//! key presses and mouse clicks back to it as commands.
//!
//! # Architecture
//!
//! - **Toolkit**: Named panels painted through ratatui, plus a thread-safe
//!   queue of deferred panel updates
//! - **Bindings**: Declarative trigger table and the dispatcher that runs it
//! - **Layout**: Panel geometry as a pure function of terminal size
//! - **Render**: Snapshot to styled text (grid cropping, property lines)
//! - **Dashboard**: Composition root and event loop

pub mod bindings;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod layout;
pub mod render;
pub mod theme;
pub mod toolkit;

pub use bindings::{default_bindings, Binding, Dispatcher, HandlerError};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardError, RefreshHandle};
pub use events::InputEvent;
