//! Scheduled Updates
//!
//! The only way to mutate panels from outside the event loop. Any thread
//! may schedule a closure; the event loop applies queued closures in FIFO
//! order between input events, so a closure never observes a half-painted
//! panel.

use tokio::sync::mpsc;

use super::{Toolkit, ToolkitError};

/// A deferred panel mutation
pub type Update = Box<dyn FnOnce(&mut Toolkit) -> Result<(), ToolkitError> + Send>;

/// Cloneable, thread-safe handle for scheduling updates
#[derive(Clone)]
pub struct UpdateSender {
    tx: mpsc::UnboundedSender<Update>,
}

impl UpdateSender {
    /// Queue `update` for the event loop
    ///
    /// If the event loop is gone the update is dropped.
    pub fn schedule<F>(&self, update: F)
    where
        F: FnOnce(&mut Toolkit) -> Result<(), ToolkitError> + Send + 'static,
    {
        if self.tx.send(Box::new(update)).is_err() {
            tracing::debug!("Update dropped: event loop has stopped");
        }
    }
}

/// Event-loop side of the update queue
pub struct UpdateReceiver {
    rx: mpsc::UnboundedReceiver<Update>,
}

impl UpdateReceiver {
    /// Wait for the next update
    pub async fn recv(&mut self) -> Option<Update> {
        self.rx.recv().await
    }

    /// Take the next update if one is already queued
    pub fn try_recv(&mut self) -> Option<Update> {
        self.rx.try_recv().ok()
    }
}

/// Create a connected sender/receiver pair
pub(super) fn channel() -> (UpdateSender, UpdateReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UpdateSender { tx }, UpdateReceiver { rx })
}
