//! Match configuration.
//!
//! Layered as defaults, then an optional TOML file, then command-line
//! overrides. Nothing is validated until `validate()`, which is where an
//! unusable layout becomes `InvalidConfiguration`.
//!
//! ```toml
//! rows = [1, 3, 5, 7]
//! home = "ai"
//! away = "human"
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::player::{Side, SideMap};
use crate::error::ConfigError;

/// Who picks the moves for a side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Optimal nim-sum strategy.
    #[default]
    Ai,
    /// Moves read from a line-oriented input source.
    Human,
    /// Uniformly random legal moves.
    Random,
}

impl FromStr for Controller {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ai" => Ok(Controller::Ai),
            "human" => Ok(Controller::Human),
            "random" => Ok(Controller::Random),
            other => Err(ConfigError::invalid(format!(
                "unknown controller {other:?}, expected ai, human or random"
            ))),
        }
    }
}

impl std::fmt::Display for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Ai => f.write_str("ai"),
            Controller::Human => f.write_str("human"),
            Controller::Random => f.write_str("random"),
        }
    }
}

/// Default row layout.
pub const DEFAULT_ROWS: [i64; 4] = [1, 3, 5, 7];

/// Match configuration.
///
/// Row sizes are kept signed here so that a bad layout from a file or the
/// command line is reported as a configuration error rather than a parse
/// failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Sticks per row, in order.
    pub rows: Vec<i64>,

    /// Controller for the Home side (moves first).
    pub home: Controller,

    /// Controller for the Away side.
    pub away: Controller,

    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS.to_vec(),
            home: Controller::Ai,
            away: Controller::Ai,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::invalid(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::invalid(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn with_rows(mut self, rows: Vec<i64>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_controller(mut self, side: Side, controller: Controller) -> Self {
        match side {
            Side::Home => self.home = controller,
            Side::Away => self.away = controller,
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Controllers indexed by side.
    #[must_use]
    pub fn controllers(&self) -> SideMap<Controller> {
        SideMap::new(|side| match side {
            Side::Home => self.home,
            Side::Away => self.away,
        })
    }

    /// Check that the configuration describes a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rows(&self.rows).map(|_| ())
    }
}

/// Validate a row layout and convert it to unsigned counts.
pub fn validate_rows(rows: &[i64]) -> Result<Vec<u32>, ConfigError> {
    if rows.is_empty() {
        return Err(ConfigError::invalid("at least one row is required"));
    }
    rows.iter()
        .enumerate()
        .map(|(i, &n)| {
            u32::try_from(n).map_err(|_| {
                ConfigError::invalid(format!("row {i} has {n} sticks, expected 0..={}", u32::MAX))
            })
        })
        .collect()
}

/// Parse a comma-separated row layout such as `1,3,5,7`.
pub fn parse_rows(text: &str) -> Result<Vec<i64>, ConfigError> {
    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::invalid(format!("bad row size {part:?}")))
        })
        .collect()
}
