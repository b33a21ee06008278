//! Mutable scheduling state.
//!
//! Owned by a single scheduling run. Counters are indexed by position in the
//! problem's group and station lists, so the inner loop never hashes.

use crate::models::{RotationProblem, ScheduleGrid};

use super::stats::{CapOverride, UsageStats};

/// Grid plus incremental usage counters.
#[derive(Debug, Clone)]
pub(crate) struct RotationState {
    pub(crate) grid: ScheduleGrid,
    /// Weekly total per group.
    pub(crate) totals: Vec<u32>,
    /// Weekly count per `[group][station]`.
    pub(crate) station_counts: Vec<Vec<u32>>,
    /// Today's visits per `[group][station]`. Cleared at each day boundary.
    day_visits: Vec<Vec<bool>>,
    pub(crate) overrides: Vec<CapOverride>,
}

impl RotationState {
    pub(crate) fn new(problem: &RotationProblem) -> Self {
        let groups = problem.groups.len();
        let stations = problem.stations.len();
        Self {
            grid: ScheduleGrid::new(problem.station_ids(), problem.days, problem.slots_per_day),
            totals: vec![0; groups],
            station_counts: vec![vec![0; stations]; groups],
            day_visits: vec![vec![false; stations]; groups],
            overrides: Vec::new(),
        }
    }

    pub(crate) fn start_day(&mut self) {
        for row in &mut self.day_visits {
            row.fill(false);
        }
    }

    #[inline]
    pub(crate) fn visited_today(&self, group: usize, station: usize) -> bool {
        self.day_visits[group][station]
    }

    /// Records an assignment in the grid and every counter.
    pub(crate) fn record(
        &mut self,
        problem: &RotationProblem,
        day: usize,
        slot: usize,
        station: usize,
        group: usize,
    ) {
        let group_id = problem.groups[group].clone();
        let written = self.grid.set_at(day, slot, station, Some(group_id));
        debug_assert!(written, "cell ({day}, {slot}, {station}) outside the grid");
        self.totals[group] += 1;
        self.station_counts[group][station] += 1;
        self.day_visits[group][station] = true;
    }

    pub(crate) fn into_parts(self, problem: &RotationProblem) -> (ScheduleGrid, UsageStats) {
        let stats = UsageStats::from_counters(
            problem,
            &self.totals,
            &self.station_counts,
            self.overrides,
        );
        (self.grid, stats)
    }
}
