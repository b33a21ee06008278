//! Problem definition.
//!
//! Bundles everything the scheduler and validator consume: the group roster,
//! the stations with their rules, the calendar shape, and the strictness
//! policy for required stations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Station, StationRule};
use crate::error::{ConfigError, ConfigResult};

/// A rotation scheduling problem.
///
/// Groups and stations keep their declared order. Station order drives grid
/// column order and the deterministic ordering fallback; group order has no
/// effect on selection (ties break by group ID).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationProblem {
    /// Group identifiers (unique).
    pub groups: Vec<String>,
    /// Stations with rules (unique IDs).
    pub stations: Vec<Station>,
    /// Number of days in the horizon.
    pub days: usize,
    /// Slots per day.
    pub slots_per_day: usize,
    /// Strict mode: leave required stations empty rather than exceed caps.
    pub strict: bool,
}

impl RotationProblem {
    /// Creates a problem with an empty calendar (0 days, 0 slots).
    pub fn new(groups: Vec<String>, stations: Vec<Station>) -> Self {
        Self {
            groups,
            stations,
            days: 0,
            slots_per_day: 0,
            strict: false,
        }
    }

    /// Builds stations from IDs and a rule map.
    ///
    /// Fails with [`ConfigError::MissingRule`] on the first station without
    /// an entry in `rules`.
    pub fn from_rules(
        groups: Vec<String>,
        station_ids: &[String],
        rules: &HashMap<String, StationRule>,
    ) -> ConfigResult<Self> {
        let stations = station_ids
            .iter()
            .map(|id| {
                rules
                    .get(id)
                    .map(|rule| Station::new(id.clone()).with_rule(*rule))
                    .ok_or_else(|| ConfigError::MissingRule(id.clone()))
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self::new(groups, stations))
    }

    /// Sets the calendar shape.
    pub fn with_calendar(mut self, days: usize, slots_per_day: usize) -> Self {
        self.days = days;
        self.slots_per_day = slots_per_day;
        self
    }

    /// Sets strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Station by ID.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Rule for a station ID.
    pub fn rule(&self, station_id: &str) -> Option<&StationRule> {
        self.station(station_id).map(|s| &s.rule)
    }

    /// Station IDs in declared order.
    pub fn station_ids(&self) -> Vec<String> {
        self.stations.iter().map(|s| s.id.clone()).collect()
    }

    /// Whether `group` is part of the roster.
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Total number of (day, slot, station) cells.
    pub fn cell_count(&self) -> usize {
        self.days * self.slots_per_day * self.stations.len()
    }
}
