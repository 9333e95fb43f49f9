//! Universe Core - Headless cellular-automaton simulation for SimLife
//!
//! This crate owns everything the dashboard treats as an external
//! collaborator: the grid, the transition rule, run/stop scheduling and
//! random settlement. It has no terminal dependencies; surfaces talk to it
//! only through the [`Universe`] trait and the read-only snapshots it hands
//! out.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Surface (simlife-tui)      │
//! └──────┬──────────────▲────────┘
//!        │ commands     │ snapshots + observer callback
//! ┌──────▼──────────────┴────────┐
//! │   Universe (trait)           │
//! │   └─ LifeUniverse            │
//! │        ├─ Grid + Rule        │
//! │        └─ run driver (tokio) │
//! └──────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`snapshot`]: `Area`, `Status`, `Options`, `RunningState`
//! - [`universe`]: the `Universe` collaborator contract
//! - [`rule`]: birth/survival rules in `B3/S23` notation
//! - [`life`]: the Game of Life implementation and its run driver
//! - [`config`]: TOML + environment configuration loading

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod life;
pub mod rule;
pub mod snapshot;
pub mod universe;

pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigSource, Topology,
    UniverseConfig,
};
pub use life::LifeUniverse;
pub use rule::{Rule, RuleError};
pub use snapshot::{Area, OptionValue, Options, RunningState, Status};
pub use universe::{Observer, Universe};
