//! Rotation quality metrics (KPIs).
//!
//! The scheduler treats unmet minimums and empty cells as normal output.
//! This module makes them visible.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | Filled cells / total cells |
//! | Required Fill Rate | Filled required cells / required cells |
//! | Quota Shortfalls | (group, station) pairs below `min` |
//! | Assignment Spread | max(total) - min(total) across groups |
//! | Cap Overrides | Assignments made above a weekly `max` |

use serde::{Deserialize, Serialize};

use super::UsageStats;
use crate::models::{RotationProblem, ScheduleGrid};

/// A group that ended the horizon below a station's minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaShortfall {
    pub group: String,
    pub station: String,
    pub min: u32,
    pub actual: u32,
}

impl QuotaShortfall {
    /// Visits still missing.
    #[inline]
    pub fn missing(&self) -> u32 {
        self.min.saturating_sub(self.actual)
    }
}

/// Rotation performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationKpi {
    /// Filled cells / total cells (1.0 for an empty horizon).
    pub fill_rate: f64,
    /// Filled required cells / required cells (1.0 if none).
    pub required_fill_rate: f64,
    /// Required (day, slot, station) cells left empty.
    pub empty_required_cells: usize,
    /// Unmet minimums, in roster then station order.
    pub quota_shortfalls: Vec<QuotaShortfall>,
    /// Busiest minus idlest group total.
    pub assignment_spread: u32,
    /// Number of cap overrides.
    pub cap_overrides: usize,
}

impl RotationKpi {
    /// Computes KPIs from a grid and its usage counters.
    pub fn calculate(grid: &ScheduleGrid, problem: &RotationProblem, stats: &UsageStats) -> Self {
        let mut filled = 0usize;
        let mut required_cells = 0usize;
        let mut required_filled = 0usize;

        for day in 0..grid.days() {
            for slot in 0..grid.slots_per_day() {
                for station in &problem.stations {
                    let occupied = grid.get(day, slot, &station.id).is_some();
                    if occupied {
                        filled += 1;
                    }
                    if station.is_required() {
                        required_cells += 1;
                        if occupied {
                            required_filled += 1;
                        }
                    }
                }
            }
        }

        let total_cells = grid.days() * grid.slots_per_day() * problem.stations.len();

        let quota_shortfalls = problem
            .groups
            .iter()
            .flat_map(|g| {
                problem.stations.iter().filter_map(move |s| {
                    let actual = stats.count(g, &s.id);
                    (actual < s.rule.min).then(|| QuotaShortfall {
                        group: g.clone(),
                        station: s.id.clone(),
                        min: s.rule.min,
                        actual,
                    })
                })
            })
            .collect();

        Self {
            fill_rate: ratio(filled, total_cells),
            required_fill_rate: ratio(required_filled, required_cells),
            empty_required_cells: required_cells - required_filled,
            quota_shortfalls,
            assignment_spread: stats.assignment_spread(),
            cap_overrides: stats.cap_overrides.len(),
        }
    }

    /// Whether every group met every station minimum.
    pub fn quotas_met(&self) -> bool {
        self.quota_shortfalls.is_empty()
    }

    /// Whether the rotation meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_spread: u32, min_fill_rate: f64) -> bool {
        self.assignment_spread <= max_spread && self.fill_rate >= min_fill_rate
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        1.0
    } else {
        part as f64 / whole as f64
    }
}
