//! TOML problem configuration.
//!
//! # Format
//!
//! ```toml
//! groups = ["G1", "G2", "G3", "G4"]
//! stations = ["Math", "Science", "Art"]
//! days = 5
//! slots_per_day = 4
//! strict = false
//!
//! # Applied to stations without their own entry. Omit it to make a
//! # missing rule an error.
//! [default_rule]
//! min = 0
//! max = 2
//!
//! [rules.Math]
//! min = 2
//! max = 4
//! required = true
//! ```
//!
//! Fields left out of a rule table take the [`StationRule`] defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::models::{RotationProblem, StationRule};
use crate::validation::validate_problem;

/// Deserialized problem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationConfig {
    pub groups: Vec<String>,
    pub stations: Vec<String>,
    pub days: usize,
    pub slots_per_day: usize,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub default_rule: Option<StationRule>,
    #[serde(default)]
    pub rules: HashMap<String, StationRule>,
}

impl RotationConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builds and validates the problem definition.
    ///
    /// Stations without a rule use `default_rule`, or fail with
    /// [`ConfigError::MissingRule`] if there is none.
    pub fn into_problem(self) -> ConfigResult<RotationProblem> {
        let mut rules = self.rules;
        if let Some(default) = self.default_rule {
            for id in &self.stations {
                rules.entry(id.clone()).or_insert(default);
            }
        }

        for id in rules.keys() {
            if !self.stations.contains(id) {
                log::warn!("rule for undeclared station '{id}' ignored");
            }
        }

        let problem = RotationProblem::from_rules(self.groups, &self.stations, &rules)?
            .with_calendar(self.days, self.slots_per_day)
            .with_strict(self.strict);
        validate_problem(&problem)?;
        Ok(problem)
    }
}

/// Loads a validated problem straight from a TOML file.
pub fn load_problem(path: impl AsRef<Path>) -> ConfigResult<RotationProblem> {
    RotationConfig::from_path(path)?.into_problem()
}

impl std::str::FromStr for RotationConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}
