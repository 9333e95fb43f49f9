//! Universe Configuration
//!
//! Configuration for [`LifeUniverse`](crate::LifeUniverse), loaded from an
//! optional TOML file at `$XDG_CONFIG_HOME/simlife/universe.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. Environment variables (`SIMLIFE_*`)
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! width = 120
//! height = 40
//! interval_ms = 100
//! max_steps = 1000
//! rule = "B36/S23"
//! topology = "bounded"
//! random_fill = 0.35
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rule::Rule;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tracks where the effective configuration came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    #[default]
    Default,
}

/// How the grid treats its edges
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Edges wrap around (toroidal grid)
    #[default]
    Torus,
    /// Cells beyond the edges are always dead
    Bounded,
}

impl Topology {
    /// Label used in option snapshots
    pub fn label(&self) -> &'static str {
        match self {
            Self::Torus => "torus",
            Self::Bounded => "bounded",
        }
    }
}

impl std::str::FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "torus" | "wrap" => Ok(Self::Torus),
            "bounded" | "flat" => Ok(Self::Bounded),
            other => Err(ConfigError::ValidationError(format!(
                "unknown topology {other:?}"
            ))),
        }
    }
}

/// On-disk representation; every field is optional
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseToml {
    /// Grid width in cells
    pub width: Option<usize>,
    /// Grid height in cells
    pub height: Option<usize>,
    /// Delay between iterations in milliseconds
    pub interval_ms: Option<u64>,
    /// Iteration limit, 0 = unlimited
    pub max_steps: Option<u64>,
    /// Rule in `B3/S23` notation
    pub rule: Option<String>,
    /// Edge handling
    pub topology: Option<Topology>,
    /// Share of live cells when settling random data
    pub random_fill: Option<f64>,
}

/// Largest grid accepted, in cells
const MAX_CELLS: usize = 1 << 24;

/// Effective universe configuration
#[derive(Clone, Debug, PartialEq)]
pub struct UniverseConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Delay between iterations while running
    pub interval: Duration,
    /// Iteration limit, 0 = unlimited
    pub max_steps: u64,
    /// Transition rule
    pub rule: Rule,
    /// Edge handling
    pub topology: Topology,
    /// Share of live cells when settling random data (0.0..=1.0)
    pub random_fill: f64,
    /// Where the configuration was loaded from
    source: ConfigSource,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 30,
            interval: Duration::from_millis(200),
            max_steps: 1000,
            rule: Rule::conway(),
            topology: Topology::Torus,
            random_fill: 0.3,
            source: ConfigSource::Default,
        }
    }
}

impl UniverseConfig {
    /// Where the effective configuration came from
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ValidationError(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "grid {}x{} exceeds {MAX_CELLS} cells",
                    self.width, self.height
                )))
            }
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "interval must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.random_fill) {
            return Err(ConfigError::ValidationError(format!(
                "random_fill must be within 0.0-1.0, got {}",
                self.random_fill
            )));
        }
        Ok(())
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("simlife").join("universe.toml"))
}

/// Load configuration from the default path plus environment
pub fn load_config() -> Result<UniverseConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from `path` (if it exists) plus environment
///
/// A missing file is not an error; defaults are used instead.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<UniverseConfig, ConfigError> {
    let mut config = UniverseConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: UniverseToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded universe configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut UniverseConfig, toml: &UniverseToml) -> Result<(), ConfigError> {
    if let Some(width) = toml.width {
        config.width = width;
    }
    if let Some(height) = toml.height {
        config.height = height;
    }
    if let Some(ms) = toml.interval_ms {
        config.interval = Duration::from_millis(ms);
    }
    if let Some(max_steps) = toml.max_steps {
        config.max_steps = max_steps;
    }
    if let Some(ref rule) = toml.rule {
        config.rule = rule
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("{e}")))?;
    }
    if let Some(topology) = toml.topology {
        config.topology = topology;
    }
    if let Some(fill) = toml.random_fill {
        config.random_fill = fill;
    }
    Ok(())
}

/// Apply `SIMLIFE_*` overrides using `lookup` to read variables
///
/// Unparseable numbers are ignored with a warning, like unset variables;
/// an unparseable rule or topology is a validation error.
fn apply_env_config<F>(config: &mut UniverseConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    fn parsed<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
        let raw = raw?;
        match raw.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparseable environment override");
                None
            }
        }
    }

    if let Some(width) = parsed("SIMLIFE_WIDTH", lookup("SIMLIFE_WIDTH")) {
        config.width = width;
        config.source = ConfigSource::Env;
    }
    if let Some(height) = parsed("SIMLIFE_HEIGHT", lookup("SIMLIFE_HEIGHT")) {
        config.height = height;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parsed("SIMLIFE_INTERVAL_MS", lookup("SIMLIFE_INTERVAL_MS")) {
        config.interval = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(max_steps) = parsed("SIMLIFE_MAX_STEPS", lookup("SIMLIFE_MAX_STEPS")) {
        config.max_steps = max_steps;
        config.source = ConfigSource::Env;
    }
    if let Some(fill) = parsed("SIMLIFE_FILL", lookup("SIMLIFE_FILL")) {
        config.random_fill = fill;
        config.source = ConfigSource::Env;
    }
    if let Some(rule) = lookup("SIMLIFE_RULE") {
        config.rule = rule
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("{e}")))?;
        config.source = ConfigSource::Env;
    }
    if let Some(wrap) = lookup("SIMLIFE_WRAP") {
        let wrap = wrap != "0" && wrap.to_lowercase() != "false";
        config.topology = if wrap {
            Topology::Torus
        } else {
            Topology::Bounded
        };
        config.source = ConfigSource::Env;
    }
    // Named topology wins over the SIMLIFE_WRAP switch
    if let Some(topology) = lookup("SIMLIFE_TOPOLOGY") {
        config.topology = topology.parse()?;
        config.source = ConfigSource::Env;
    }
    Ok(())
}
