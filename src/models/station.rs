//! Station and capacity rule model.
//!
//! A station is a location groups rotate through. Its rule sets the weekly
//! quota window per group and how urgently the station must be staffed.

use serde::{Deserialize, Serialize};

/// Per-station capacity and staffing rule.
///
/// # Semantics
/// - `min` is a soft weekly target per group. Unmet minimums are not errors.
/// - `max` is a weekly hard cap per group. Only the required-station override
///   (non-strict mode) may exceed it.
/// - Higher `fill_priority` biases the station toward earlier processing
///   among peers of the same `required` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationRule {
    /// Target weekly visits per group.
    pub min: u32,
    /// Weekly cap on visits per group (>= 1).
    pub max: u32,
    /// Whether the station must be staffed in every slot if possible.
    pub required: bool,
    /// Ordering weight (>= 1).
    pub fill_priority: u32,
}

impl Default for StationRule {
    fn default() -> Self {
        Self {
            min: 1,
            max: 6,
            required: false,
            fill_priority: 10,
        }
    }
}

impl StationRule {
    /// Creates a rule with the given quota window.
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    /// Marks the station as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the fill priority.
    pub fn with_fill_priority(mut self, fill_priority: u32) -> Self {
        self.fill_priority = fill_priority;
        self
    }

    /// Remaining visits needed to reach `min`.
    #[inline]
    pub fn deficit(&self, count: u32) -> u32 {
        self.min.saturating_sub(count)
    }

    /// Whether another visit keeps the group within `max`.
    #[inline]
    pub fn under_cap(&self, count: u32) -> bool {
        count < self.max
    }
}

/// A station with its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier.
    pub id: String,
    /// Capacity and staffing rule.
    pub rule: StationRule,
}

impl Station {
    /// Creates a station with the default rule.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rule: StationRule::default(),
        }
    }

    /// Sets the rule.
    pub fn with_rule(mut self, rule: StationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Whether the station is required.
    #[inline]
    pub fn is_required(&self) -> bool {
        self.rule.required
    }
}
