//! Dashboard
//!
//! Wires the universe, the toolkit, the layout and the bindings together
//! and runs the event loop.
//!
//! # Event Loop
//!
//! Each iteration waits for either an input event or a scheduled update,
//! handles it, applies every other update already queued, then draws.
//! Input handlers run to completion on the loop; the universe's run driver
//! never touches panels directly and goes through [`RefreshHandle`].

use std::io;
use std::sync::{Arc, Weak};

use crossterm::event::{Event, EventStream};
use futures::{Stream, StreamExt};
use ratatui::backend::Backend;
use ratatui::Terminal;
use thiserror::Error;

use universe_core::Universe;

use crate::bindings::{default_bindings, Binding, BindingError, Dispatcher, HandlerError, Target};
use crate::config::DashboardConfig;
use crate::events::InputEvent;
use crate::layout::{self, ignore_missing, panels, LayoutContext};
use crate::render::Renderer;
use crate::toolkit::{Toolkit, ToolkitError, UpdateReceiver, UpdateSender};

/// Errors that end the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The binding table is inconsistent
    #[error("invalid bindings: {0}")]
    Bindings(#[from] BindingError),

    /// A panel operation failed
    #[error("toolkit error: {0}")]
    Toolkit(#[from] ToolkitError),

    /// Reading input or drawing failed
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// A binding handler failed
    #[error(transparent)]
    Handler(anyhow::Error),
}

/// Whether the loop keeps going after an event
enum Flow {
    Continue,
    Quit,
}

/// The terminal dashboard for one universe
pub struct Dashboard {
    universe: Arc<dyn Universe>,
    config: DashboardConfig,
    renderer: Arc<Renderer>,
    dispatcher: Dispatcher,
    toolkit: Toolkit,
    updates: UpdateReceiver,
}

impl Dashboard {
    /// Dashboard with the standard key and mouse bindings
    pub fn new(universe: Arc<dyn Universe>, config: DashboardConfig) -> Result<Self, DashboardError> {
        Self::with_bindings(universe, config, default_bindings())
    }

    /// Dashboard with a custom binding table
    pub fn with_bindings(
        universe: Arc<dyn Universe>,
        config: DashboardConfig,
        bindings: Vec<Binding>,
    ) -> Result<Self, DashboardError> {
        let dispatcher = Dispatcher::new(bindings, &panels::ALL)?;
        let renderer = Arc::new(Renderer::new(&config));
        // Real size is taken from the terminal when the loop starts
        let (toolkit, updates) = Toolkit::new(0, 0);

        Ok(Self {
            universe,
            config,
            renderer,
            dispatcher,
            toolkit,
            updates,
        })
    }

    /// Handle for repainting from other threads
    pub fn refresh_handle(&self) -> RefreshHandle {
        RefreshHandle {
            universe: Arc::downgrade(&self.universe),
            renderer: Arc::clone(&self.renderer),
            updates: self.toolkit.updater(),
        }
    }

    /// Schedule a repaint of the battlefield, status and configuration
    pub fn refresh(&self) {
        self.refresh_handle().refresh();
    }

    /// Current panels
    pub fn toolkit(&self) -> &Toolkit {
        &self.toolkit
    }

    /// Run on the real terminal until quit
    pub async fn start<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), DashboardError> {
        self.run(terminal, EventStream::new()).await
    }

    /// Run against any terminal backend and event source
    ///
    /// Returns `Ok` on quit or when `events` ends.
    pub async fn run<B, S>(&mut self, terminal: &mut Terminal<B>, mut events: S) -> Result<(), DashboardError>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let size = terminal.size()?;
        self.handle_resize(size.width, size.height)?;
        self.draw(terminal)?;
        tracing::info!(width = size.width, height = size.height, "Dashboard started");

        loop {
            tokio::select! {
                biased;

                maybe_event = events.next() => {
                    let event = match maybe_event {
                        Some(event) => event?,
                        None => {
                            tracing::info!("Input stream closed");
                            return Ok(());
                        }
                    };
                    let Some(input) = InputEvent::from_terminal(event) else {
                        continue;
                    };
                    if let Flow::Quit = self.handle_event(input)? {
                        tracing::info!("Quit requested");
                        return Ok(());
                    }
                }

                Some(update) = self.updates.recv() => self.toolkit.apply(update)?,
            }

            self.apply_pending()?;
            self.draw(terminal)?;
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<Flow, DashboardError> {
        if let InputEvent::Resize { width, height } = event {
            self.handle_resize(width, height)?;
            return Ok(Flow::Continue);
        }

        let target = self.target_of(&event);
        match self.dispatcher.dispatch(&event, &target, self.universe.as_ref()) {
            Ok(_) => Ok(Flow::Continue),
            Err(HandlerError::Quit) => Ok(Flow::Quit),
            Err(HandlerError::Failed(err)) => Err(DashboardError::Handler(err)),
        }
    }

    /// Panel and panel-relative position under a pointer event
    fn target_of(&self, event: &InputEvent) -> Target {
        let InputEvent::Pointer { column, row, .. } = *event else {
            return Target::default();
        };
        match self.toolkit.panel_at(column, row) {
            Some(panel) => Target {
                panel: Some(panel.name.clone()),
                cursor: panel.to_local(column, row),
            },
            None => Target::default(),
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Result<(), ToolkitError> {
        self.toolkit.resize(width, height);
        let plan = layout::plan(width, height, &self.config);
        let ctx = LayoutContext {
            config: &self.config,
            renderer: &self.renderer,
            universe: self.universe.as_ref(),
            bindings: self.dispatcher.bindings(),
        };
        layout::apply(&mut self.toolkit, &plan, &ctx)
    }

    /// Apply every update already queued
    fn apply_pending(&mut self) -> Result<(), ToolkitError> {
        while let Some(update) = self.updates.try_recv() {
            self.toolkit.apply(update)?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| self.toolkit.draw(frame))?;
        Ok(())
    }
}

/// Thread-safe handle that repaints the dashboard from universe snapshots
///
/// Holds the universe weakly so it can live inside the universe's own
/// observer without keeping it alive.
#[derive(Clone)]
pub struct RefreshHandle {
    universe: Weak<dyn Universe>,
    renderer: Arc<Renderer>,
    updates: UpdateSender,
}

impl RefreshHandle {
    /// Snapshot the universe and schedule battlefield, status and
    /// configuration repaints, in that order
    ///
    /// Panels that do not currently exist are skipped. Does nothing once
    /// the universe is gone.
    pub fn refresh(&self) {
        let Some(universe) = self.universe.upgrade() else {
            return;
        };
        let area = universe.area();
        let status = universe.status();
        let options = universe.options();
        drop(universe);

        let renderer = Arc::clone(&self.renderer);
        self.updates
            .schedule(move |tk| ignore_missing(renderer.paint_field(tk, &area)));

        let renderer = Arc::clone(&self.renderer);
        self.updates
            .schedule(move |tk| ignore_missing(renderer.paint_status(tk, &status)));

        let renderer = Arc::clone(&self.renderer);
        self.updates
            .schedule(move |tk| ignore_missing(renderer.paint_options(tk, &options)));
    }
}
