//! Error types for problem definitions.
//!
//! Configuration errors are rejected at the boundary, before any slot is
//! filled. Infeasibility (too few groups, unreachable minimums) is never an
//! error; it shows up as empty cells in the grid.

/// Result type for building and checking problem definitions.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A problem definition that cannot be scheduled.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Problem has no groups")]
    NoGroups,

    #[error("Problem has no stations")]
    NoStations,

    #[error("Duplicate group ID: {0}")]
    DuplicateGroup(String),

    #[error("Duplicate station ID: {0}")]
    DuplicateStation(String),

    #[error("Station '{0}' has no rule")]
    MissingRule(String),

    #[error("Station '{station}' has max {max}; weekly cap must be at least 1")]
    InvalidMax { station: String, max: u32 },

    #[error("Station '{station}' has fill_priority {fill_priority}; must be at least 1")]
    InvalidFillPriority { station: String, fill_priority: u32 },

    #[error("Station order for day {day} is not a permutation of {stations} stations: {order:?}")]
    InvalidStationOrder {
        day: usize,
        stations: usize,
        order: Vec<usize>,
    },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration read error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// The station the error refers to, if any.
    pub fn station(&self) -> Option<&str> {
        match self {
            ConfigError::DuplicateStation(id) | ConfigError::MissingRule(id) => Some(id),
            ConfigError::InvalidMax { station, .. }
            | ConfigError::InvalidFillPriority { station, .. } => Some(station),
            _ => None,
        }
    }
}
