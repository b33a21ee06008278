//! Aggregate usage statistics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{RotationProblem, ScheduleGrid};

/// An assignment that exceeded the station's weekly cap.
///
/// Only produced through the required-station override in non-strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapOverride {
    pub day: usize,
    pub slot: usize,
    pub station: String,
    pub group: String,
}

/// Weekly usage counters of a schedule.
///
/// Every roster group and every (group, station) pair is present, zeros
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Weekly assignments per group, across all stations.
    pub total_assignments: HashMap<String, u32>,
    /// Weekly assignments per group per station.
    pub station_counts: HashMap<String, HashMap<String, u32>>,
    /// Assignments made above the weekly cap, in schedule order.
    pub cap_overrides: Vec<CapOverride>,
}

impl UsageStats {
    pub(crate) fn from_counters(
        problem: &RotationProblem,
        totals: &[u32],
        station_counts: &[Vec<u32>],
        cap_overrides: Vec<CapOverride>,
    ) -> Self {
        let total_assignments: HashMap<String, u32> = problem
            .groups
            .iter()
            .cloned()
            .zip(totals.iter().copied())
            .collect();

        let station_counts = problem
            .groups
            .iter()
            .zip(station_counts)
            .map(|(g, row)| {
                let per_station: HashMap<String, u32> = problem
                    .stations
                    .iter()
                    .map(|s| s.id.clone())
                    .zip(row.iter().copied())
                    .collect();
                (g.clone(), per_station)
            })
            .collect();

        Self {
            total_assignments,
            station_counts,
            cap_overrides,
        }
    }

    /// Recounts usage from a grid alone.
    ///
    /// Groups in the grid that are not on the roster are ignored.
    /// `cap_overrides` stays empty: a grid does not record how a cell was filled.
    pub fn from_grid(grid: &ScheduleGrid, problem: &RotationProblem) -> Self {
        let mut totals = vec![0u32; problem.groups.len()];
        let mut counts = vec![vec![0u32; problem.stations.len()]; problem.groups.len()];
        let group_index: HashMap<&str, usize> = problem
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.as_str(), i))
            .collect();

        for day in 0..grid.days() {
            for slot in 0..grid.slots_per_day() {
                for (si, station) in problem.stations.iter().enumerate() {
                    let Some(group) = grid.get(day, slot, &station.id) else {
                        continue;
                    };
                    if let Some(&gi) = group_index.get(group) {
                        totals[gi] += 1;
                        counts[gi][si] += 1;
                    }
                }
            }
        }

        Self::from_counters(problem, &totals, &counts, Vec::new())
    }

    /// Weekly total for a group (0 if unknown).
    pub fn total(&self, group: &str) -> u32 {
        self.total_assignments.get(group).copied().unwrap_or(0)
    }

    /// Weekly count for a group at a station (0 if unknown).
    pub fn count(&self, group: &str, station: &str) -> u32 {
        self.station_counts
            .get(group)
            .and_then(|m| m.get(station))
            .copied()
            .unwrap_or(0)
    }

    /// Difference between the busiest and idlest group's totals.
    pub fn assignment_spread(&self) -> u32 {
        let max = self.total_assignments.values().max().copied().unwrap_or(0);
        let min = self.total_assignments.values().min().copied().unwrap_or(0);
        max - min
    }

    /// Sum of all assignments.
    pub fn assignment_count(&self) -> u32 {
        self.total_assignments.values().sum()
    }
}
