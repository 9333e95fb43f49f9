//! The Simulation collaborator contract
//!
//! Surfaces never see the grid directly. They read snapshots and issue
//! commands; commands are fire-and-forget and return nothing.

use crate::snapshot::{Area, Options, Status};

/// Callback invoked after every change to the universe
///
/// Called from whichever task made the change (the caller of a command, or
/// the run driver), so it must be cheap and must not block.
pub type Observer = Box<dyn Fn() + Send + Sync>;

/// A cellular-automaton simulation driven by a surface
pub trait Universe: Send + Sync {
    /// Snapshot of the grid
    fn area(&self) -> Area;

    /// Snapshot of run statistics
    fn status(&self) -> Status;

    /// Snapshot of the configuration
    fn options(&self) -> Options;

    /// Compute a single iteration
    fn step(&self);

    /// Start iterating on the simulation's own schedule
    fn run(&self);

    /// Stop a running simulation
    fn stop(&self);

    /// Kill every cell
    fn clear(&self);

    /// Replace the grid with random data
    fn settle_with_random_data(&self);

    /// Flip a single cell; coordinates outside the grid are ignored
    fn inverse_cell(&self, x: usize, y: usize);

    /// Install the change observer, replacing any previous one
    fn set_observer(&self, observer: Observer);
}
