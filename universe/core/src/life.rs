//! Game of Life universe
//!
//! A [`Universe`] over a fixed-size grid with a configurable
//! [`Rule`](crate::Rule) and [`Topology`]. The grid and statistics live
//! behind a single mutex; the observer is always invoked after that lock is
//! released, so observers may freely read snapshots.
//!
//! Running mode is driven by a Tokio task ticking at the configured
//! interval. Only one driver task exists at a time; each one carries a
//! generation number so a task that finishes late never clears the handle
//! of a newer run.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use rand::Rng;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::config::{ConfigError, Topology, UniverseConfig};
use crate::snapshot::{Area, OptionValue, Options, RunningState, Status};
use crate::universe::{Observer, Universe};

/// Row-major cell storage
#[derive(Clone, Debug, PartialEq, Eq)]
struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    fn live_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn neighbours(&self, x: usize, y: usize, topology: Topology) -> usize {
        let mut count = 0;
        for dy in [-1_isize, 0, 1] {
            for dx in [-1_isize, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let alive = match topology {
                    Topology::Torus => {
                        let nx = (x as isize + dx).rem_euclid(self.width as isize) as usize;
                        let ny = (y as isize + dy).rem_euclid(self.height as isize) as usize;
                        self.get(nx, ny)
                    }
                    Topology::Bounded => {
                        match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
                            (Some(nx), Some(ny)) => self.get(nx, ny),
                            _ => false,
                        }
                    }
                };
                if alive {
                    count += 1;
                }
            }
        }
        count
    }

    fn next(&self, rule: &crate::Rule, topology: Topology) -> Self {
        let mut next = Self::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let n = self.neighbours(x, y, topology);
                next.cells[y * self.width + x] = rule.next(self.get(x, y), n);
            }
        }
        next
    }

    fn to_area(&self) -> Area {
        let rows = if self.width == 0 {
            vec![Vec::new(); self.height]
        } else {
            self.cells.chunks(self.width).map(<[bool]>::to_vec).collect()
        };
        Area {
            width: self.width,
            height: self.height,
            rows,
        }
    }
}

/// Grid plus statistics, guarded together
struct World {
    grid: Grid,
    status: Status,
}

/// Handle to the active run driver
struct Runner {
    generation: u64,
    stop: watch::Sender<bool>,
}

struct Shared {
    config: UniverseConfig,
    world: Mutex<World>,
    observer: RwLock<Option<Observer>>,
    runner: Mutex<Option<Runner>>,
    generation: Mutex<u64>,
}

impl Shared {
    fn notify(&self) {
        if let Some(observer) = self.observer.read().as_ref() {
            observer();
        }
    }

    /// Advance one generation if the universe is still in `expected` mode
    ///
    /// Returns `None` when the mode changed underneath the caller, otherwise
    /// whether the step limit is reached.
    fn iterate(&self, expected: RunningState) -> Option<bool> {
        let mut world = self.world.lock();
        if world.status.mode != expected {
            return None;
        }
        let started = Instant::now();
        world.grid = world.grid.next(&self.config.rule, self.config.topology);
        world.status.iteration += 1;
        world.status.live_cells = world.grid.live_cells();
        world.status.iteration_time = started.elapsed();

        let finished = self.config.max_steps > 0 && world.status.iteration >= self.config.max_steps;
        if finished {
            world.status.mode = RunningState::Finished;
        }
        Some(finished)
    }

    fn set_mode(&self, mode: RunningState) {
        self.world.lock().status.mode = mode;
    }

    /// Signal the active driver (if any) to stop; returns whether one existed
    fn halt(&self) -> bool {
        match self.runner.lock().take() {
            Some(runner) => {
                let _ = runner.stop.send(true);
                tracing::debug!(generation = runner.generation, "Run driver stopped");
                true
            }
            None => false,
        }
    }

    fn reset_with(&self, grid: Grid) {
        let mut world = self.world.lock();
        world.status = Status {
            iteration: 0,
            live_cells: grid.live_cells(),
            iteration_time: std::time::Duration::ZERO,
            mode: RunningState::Manual,
        };
        world.grid = grid;
    }
}

/// Conway-style cellular automaton
pub struct LifeUniverse {
    shared: Arc<Shared>,
}

impl LifeUniverse {
    /// Create an empty universe; fails on out-of-range configuration
    pub fn new(config: UniverseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        tracing::info!(
            width = config.width,
            height = config.height,
            rule = %config.rule,
            "Universe created"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                world: Mutex::new(World {
                    grid,
                    status: Status::default(),
                }),
                observer: RwLock::new(None),
                runner: Mutex::new(None),
                generation: Mutex::new(0),
            }),
        })
    }

    /// Overwrite the grid with `area`, clipped to the universe dimensions
    ///
    /// Resets the iteration counter like [`Universe::clear`] does.
    pub fn seed(&self, area: &Area) {
        let mut grid = Grid::new(self.shared.config.width, self.shared.config.height);
        for (y, row) in area.rows.iter().enumerate().take(grid.height) {
            for (x, &alive) in row.iter().enumerate().take(grid.width) {
                grid.cells[y * grid.width + x] = alive;
            }
        }
        self.shared.reset_with(grid);
        self.shared.notify();
    }

    /// Whether a run driver is currently active
    pub fn is_running(&self) -> bool {
        self.shared.runner.lock().is_some()
    }

    fn spawn_driver(&self, handle: &tokio::runtime::Handle) {
        let generation = {
            let mut counter = self.shared.generation.lock();
            *counter += 1;
            *counter
        };
        let (stop, mut stop_rx) = watch::channel(false);
        *self.shared.runner.lock() = Some(Runner { generation, stop });
        self.shared.set_mode(RunningState::Run);
        tracing::debug!(generation, "Run driver started");

        let shared = Arc::clone(&self.shared);
        handle.spawn(async move {
            let mut ticker = tokio::time::interval(shared.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; wait a full interval instead
            ticker.tick().await;

            loop {
                tokio::select! {
                    biased;

                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        let Some(finished) = shared.iterate(RunningState::Run) else {
                            break;
                        };
                        shared.notify();
                        if finished {
                            tracing::info!(generation, "Step limit reached");
                            let mut runner = shared.runner.lock();
                            if runner.as_ref().is_some_and(|r| r.generation == generation) {
                                runner.take();
                            }
                            break;
                        }
                    }
                }
            }
        });
    }
}

impl Universe for LifeUniverse {
    fn area(&self) -> Area {
        self.shared.world.lock().grid.to_area()
    }

    fn status(&self) -> Status {
        self.shared.world.lock().status.clone()
    }

    fn options(&self) -> Options {
        let config = &self.shared.config;
        let mut advanced = std::collections::HashMap::new();
        advanced.insert("rule".to_string(), OptionValue::from(config.rule.to_string()));
        advanced.insert("topology".to_string(), OptionValue::from(config.topology.label()));
        advanced.insert("random fill".to_string(), OptionValue::from(config.random_fill));
        Options {
            width: config.width,
            height: config.height,
            interval: config.interval,
            max_steps: config.max_steps,
            advanced,
        }
    }

    fn step(&self) {
        {
            let mut world = self.shared.world.lock();
            if world.status.mode != RunningState::Manual {
                tracing::debug!(mode = ?world.status.mode, "Step ignored");
                return;
            }
            world.status.mode = RunningState::Step;
        }
        self.shared.notify();

        if self.shared.iterate(RunningState::Step) == Some(false) {
            self.shared.set_mode(RunningState::Manual);
        }
        self.shared.notify();
    }

    fn run(&self) {
        let mode = self.shared.world.lock().status.mode;
        if mode != RunningState::Manual || self.is_running() {
            tracing::debug!(?mode, "Run ignored");
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                self.spawn_driver(&handle);
                self.shared.notify();
            }
            Err(e) => tracing::warn!(error = %e, "Run requested outside a Tokio runtime"),
        }
    }

    fn stop(&self) {
        // Hold the world while halting so no tick lands between the two
        let mut world = self.shared.world.lock();
        if !self.shared.halt() {
            return;
        }
        if world.status.mode == RunningState::Run {
            world.status.mode = RunningState::Manual;
        }
        drop(world);
        self.shared.notify();
    }

    fn clear(&self) {
        self.shared.halt();
        let config = &self.shared.config;
        self.shared.reset_with(Grid::new(config.width, config.height));
        self.shared.notify();
    }

    fn settle_with_random_data(&self) {
        self.shared.halt();
        let config = &self.shared.config;
        let mut grid = Grid::new(config.width, config.height);
        let mut rng = rand::thread_rng();
        for cell in &mut grid.cells {
            *cell = rng.gen_bool(config.random_fill);
        }
        self.shared.reset_with(grid);
        self.shared.notify();
    }

    fn inverse_cell(&self, x: usize, y: usize) {
        {
            let mut world = self.shared.world.lock();
            let Some(i) = world.grid.index(x, y) else {
                tracing::debug!(x, y, "Cell outside the grid");
                return;
            };
            world.grid.cells[i] = !world.grid.cells[i];
            world.status.live_cells = world.grid.live_cells();
        }
        self.shared.notify();
    }

    fn set_observer(&self, observer: Observer) {
        *self.shared.observer.write() = Some(observer);
    }
}

impl Drop for LifeUniverse {
    fn drop(&mut self) {
        self.shared.halt();
    }
}
