//! Read-only snapshots handed to surfaces
//!
//! Every snapshot is an owned copy. Surfaces may hold on to them while the
//! simulation keeps iterating on another task.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Snapshot of the grid: rows of live/dead cells
///
/// Rows are allowed to be ragged. `width` is the length of the longest row
/// and `height` the number of rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Area {
    /// Grid width (longest row)
    pub width: usize,
    /// Grid height (row count)
    pub height: usize,
    /// Cells, row-major, `true` = live
    pub rows: Vec<Vec<bool>>,
}

impl Area {
    /// Build an area from rows, deriving width and height
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            width,
            height: rows.len(),
            rows,
        }
    }

    /// Cell at column `x`, row `y`; out-of-range cells read as dead
    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Number of live cells
    pub fn live_cells(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&c| c).count())
            .sum()
    }
}

/// Execution mode of the simulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunningState {
    /// Idle, waiting for a command
    #[default]
    Manual,
    /// A single step is being computed
    Step,
    /// The run driver is iterating
    Run,
    /// The configured step limit was reached
    Finished,
}

/// Snapshot of run statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// Number of completed iterations
    pub iteration: u64,
    /// Live cells after the last iteration
    pub live_cells: usize,
    /// Wall time spent computing the last iteration
    pub iteration_time: Duration,
    /// Current execution mode
    pub mode: RunningState,
}

/// Value of a named advanced option
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Free-form text
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Snapshot of the simulation configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Grid width
    pub width: usize,
    /// Grid height
    pub height: usize,
    /// Delay between iterations while running
    pub interval: Duration,
    /// Iteration limit (0 = unlimited)
    pub max_steps: u64,
    /// Implementation-specific options; iteration order is unspecified
    pub advanced: HashMap<String, OptionValue>,
}
