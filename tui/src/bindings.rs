//! Key and Mouse Bindings
//!
//! A declarative table mapping triggers to handlers, plus the dispatcher
//! that resolves an input event against it. The table is built once and
//! never changes; the same table feeds the help bar.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton};
use thiserror::Error;

use universe_core::Universe;

use crate::events::InputEvent;
use crate::layout::panels;

/// What fires a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A key with exact modifiers
    Key(KeyCode, KeyModifiers),
    /// A mouse button press
    Pointer(MouseButton),
}

/// Where a binding applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Everywhere
    Global,
    /// Only when the event targets this panel
    Panel(&'static str),
}

impl Scope {
    fn admits(self, active_panel: Option<&str>) -> bool {
        match self {
            Self::Global => true,
            Self::Panel(name) => active_panel == Some(name),
        }
    }
}

/// Context of the event being handled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    /// Panel under the pointer (none for key events)
    pub panel: Option<String>,
    /// Pointer position relative to the panel's content area
    pub cursor: Option<(u16, u16)>,
}

/// Errors returned by handlers
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The user asked to leave; ends the event loop cleanly
    #[error("quit requested")]
    Quit,

    /// Anything else; ends the event loop with this error
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Binding action
pub type Handler = fn(&dyn Universe, &Target) -> Result<(), HandlerError>;

/// A trigger, its help text and its action
#[derive(Debug, Clone)]
pub struct Binding {
    /// What fires it
    pub trigger: Trigger,
    /// Short name shown in the help bar
    pub name: &'static str,
    /// Description shown in the help bar
    pub description: &'static str,
    /// Action
    pub handler: Handler,
    /// Where it applies
    pub scope: Scope,
}

impl Binding {
    /// A global key binding
    pub fn key(
        code: KeyCode,
        modifiers: KeyModifiers,
        name: &'static str,
        description: &'static str,
        handler: Handler,
    ) -> Self {
        Self {
            trigger: Trigger::Key(code, modifiers),
            name,
            description,
            handler,
            scope: Scope::Global,
        }
    }

    /// A mouse binding restricted to one panel
    pub fn pointer(
        button: MouseButton,
        panel: &'static str,
        name: &'static str,
        description: &'static str,
        handler: Handler,
    ) -> Self {
        Self {
            trigger: Trigger::Pointer(button),
            name,
            description,
            handler,
            scope: Scope::Panel(panel),
        }
    }
}

/// The dashboard's bindings, in help-bar order
pub fn default_bindings() -> Vec<Binding> {
    vec![
        Binding::key(KeyCode::Char('c'), KeyModifiers::CONTROL, "^C", "Exit", quit),
        Binding::key(KeyCode::Char('n'), KeyModifiers::NONE, "N", "Next step", step),
        Binding::key(KeyCode::Char('r'), KeyModifiers::NONE, "R", "Run", run),
        Binding::key(KeyCode::Char('s'), KeyModifiers::NONE, "S", "Stop", stop),
        Binding::key(KeyCode::Char('c'), KeyModifiers::NONE, "C", "Clear", clear),
        Binding::key(
            KeyCode::Char('w'),
            KeyModifiers::NONE,
            "W",
            "Settle with random",
            settle_with_random,
        ),
        Binding::pointer(
            MouseButton::Left,
            panels::BATTLEFIELD,
            "MOUSE",
            "Settle the cell",
            settle_cell,
        ),
    ]
}

fn quit(_: &dyn Universe, _: &Target) -> Result<(), HandlerError> {
    Err(HandlerError::Quit)
}

fn step(universe: &dyn Universe, _: &Target) -> Result<(), HandlerError> {
    universe.step();
    Ok(())
}

fn run(universe: &dyn Universe, _: &Target) -> Result<(), HandlerError> {
    universe.run();
    Ok(())
}

fn stop(universe: &dyn Universe, _: &Target) -> Result<(), HandlerError> {
    universe.stop();
    Ok(())
}

fn clear(universe: &dyn Universe, _: &Target) -> Result<(), HandlerError> {
    universe.clear();
    Ok(())
}

fn settle_with_random(universe: &dyn Universe, _: &Target) -> Result<(), HandlerError> {
    universe.settle_with_random_data();
    Ok(())
}

/// Toggle the clicked cell; the universe ignores coordinates off its grid
fn settle_cell(universe: &dyn Universe, target: &Target) -> Result<(), HandlerError> {
    if let Some((x, y)) = target.cursor {
        universe.inverse_cell(usize::from(x), usize::from(y));
    }
    Ok(())
}

/// Errors in a binding table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// Two bindings share a trigger and scope
    #[error("{name:?} duplicates the {trigger:?} binding in scope {scope:?}")]
    Duplicate {
        /// Name of the later binding
        name: &'static str,
        /// Shared trigger
        trigger: Trigger,
        /// Shared scope
        scope: Scope,
    },

    /// A binding is scoped to a panel the layout never creates
    #[error("{name:?} is scoped to unknown panel {panel:?}")]
    UnknownPanel {
        /// Binding name
        name: &'static str,
        /// Scope panel
        panel: &'static str,
    },
}

/// Outcome of a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// A binding ran; carries its name
    Handled(&'static str),
    /// Nothing is bound to this event here
    Unbound,
}

/// Resolves input events against a validated binding table
pub struct Dispatcher {
    bindings: Vec<Binding>,
    /// Binding indices per trigger, in table order
    index: HashMap<Trigger, Vec<usize>>,
}

impl Dispatcher {
    /// Validate `bindings` against the panels that can exist
    pub fn new(bindings: Vec<Binding>, known_panels: &[&str]) -> Result<Self, BindingError> {
        let mut index: HashMap<Trigger, Vec<usize>> = HashMap::new();

        for (i, binding) in bindings.iter().enumerate() {
            if let Scope::Panel(panel) = binding.scope {
                if !known_panels.contains(&panel) {
                    return Err(BindingError::UnknownPanel {
                        name: binding.name,
                        panel,
                    });
                }
            }

            let slot = index.entry(binding.trigger).or_default();
            if slot.iter().any(|&j| bindings[j].scope == binding.scope) {
                return Err(BindingError::Duplicate {
                    name: binding.name,
                    trigger: binding.trigger,
                    scope: binding.scope,
                });
            }
            slot.push(i);
        }

        tracing::debug!(count = bindings.len(), "Bindings registered");
        Ok(Self { bindings, index })
    }

    /// The table, in registration order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// First binding for `trigger` whose scope admits `active_panel`
    pub fn find(&self, trigger: &Trigger, active_panel: Option<&str>) -> Option<&Binding> {
        self.index
            .get(trigger)?
            .iter()
            .map(|&i| &self.bindings[i])
            .find(|binding| binding.scope.admits(active_panel))
    }

    /// Run the binding matching `event`, if any
    pub fn dispatch(
        &self,
        event: &InputEvent,
        target: &Target,
        universe: &dyn Universe,
    ) -> Result<Dispatched, HandlerError> {
        let Some(trigger) = event.trigger() else {
            return Ok(Dispatched::Unbound);
        };
        let Some(binding) = self.find(&trigger, target.panel.as_deref()) else {
            tracing::debug!(?trigger, panel = ?target.panel, "Unbound input");
            return Ok(Dispatched::Unbound);
        };

        tracing::debug!(binding = binding.name, panel = ?target.panel, "Dispatching");
        (binding.handler)(universe, target)?;
        Ok(Dispatched::Handled(binding.name))
    }
}
