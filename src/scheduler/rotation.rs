//! Greedy station rotation scheduler.
//!
//! # Algorithm
//!
//! For each day:
//! 1. Compute the station order (required first, weighted-random by
//!    `fill_priority`).
//! 2. For each slot, walk the stations in that order and pick a group:
//!    - Candidates: unused in this slot, not at this station yet today,
//!      under the station's weekly `max`.
//!    - If none, the station is required, and strict mode is off, drop the
//!      `max` filter (the cap override). Slot and day-station uniqueness
//!      always hold.
//!    - Select by largest `min` deficit, then lowest weekly total, then
//!      lowest count at this station, then group ID.
//!    - No candidate leaves the cell empty.
//!
//! # Complexity
//! O(d * s * t * g) where d=days, s=slots/day, t=stations, g=groups.

use std::cmp::Reverse;

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ordering::{StationOrderer, WeightedRandomOrder};
use super::state::RotationState;
use super::stats::{CapOverride, UsageStats};
use crate::error::{ConfigError, ConfigResult};
use crate::models::{RotationProblem, ScheduleGrid};
use crate::validation::validate_problem;

/// Result of a scheduling run.
#[derive(Debug, Clone)]
pub struct RotationOutcome {
    /// The populated grid.
    pub grid: ScheduleGrid,
    /// Weekly usage counters.
    pub stats: UsageStats,
}

/// Candidate set for one (slot, station).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidates {
    groups: Vec<usize>,
    /// Whether the weekly cap was lifted to produce `groups`.
    over_cap: bool,
}

/// Greedy rotation scheduler.
///
/// # Example
///
/// ```
/// use station_rota::models::{RotationProblem, Station, StationRule};
/// use station_rota::scheduler::RotationScheduler;
/// use station_rota::validation::validate_schedule;
///
/// let problem = RotationProblem::new(
///     vec!["G1".into(), "G2".into(), "G3".into()],
///     vec![
///         Station::new("Math").with_rule(StationRule::new(1, 3).required()),
///         Station::new("Art").with_rule(StationRule::new(0, 2)),
///     ],
/// )
/// .with_calendar(2, 3);
///
/// let outcome = RotationScheduler::new().with_seed(7).schedule(&problem).unwrap();
/// assert!(validate_schedule(&outcome.grid, &problem).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RotationScheduler {
    seed: Option<u64>,
}

impl RotationScheduler {
    /// Creates a scheduler that seeds station ordering from OS entropy.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Pins the station-ordering RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Schedules the problem with weighted-random station ordering.
    ///
    /// # Errors
    /// Returns a [`ConfigError`](crate::error::ConfigError) if the problem
    /// definition is invalid. Infeasibility is not an error.
    pub fn schedule(&self, problem: &RotationProblem) -> ConfigResult<RotationOutcome> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.schedule_with(problem, &mut WeightedRandomOrder::new(rng))
    }

    /// Schedules the problem with the given station-ordering source.
    pub fn schedule_with<O: StationOrderer>(
        &self,
        problem: &RotationProblem,
        orderer: &mut O,
    ) -> ConfigResult<RotationOutcome> {
        validate_problem(problem)?;

        let mut state = RotationState::new(problem);
        let mut used_in_slot = vec![false; problem.groups.len()];

        for day in 0..problem.days {
            state.start_day();
            let order = orderer.order(day, &problem.stations);
            if !is_permutation(&order, problem.stations.len()) {
                return Err(ConfigError::InvalidStationOrder {
                    day,
                    stations: problem.stations.len(),
                    order,
                });
            }
            debug!(
                "day {day}: station order {:?}",
                order
                    .iter()
                    .map(|&i| problem.stations[i].id.as_str())
                    .collect::<Vec<_>>()
            );

            for slot in 0..problem.slots_per_day {
                used_in_slot.fill(false);

                for &station in &order {
                    let candidates =
                        Self::candidate_groups(problem, &state, &used_in_slot, station);
                    let Some(group) =
                        Self::choose_group(problem, &state, &candidates.groups, station)
                    else {
                        if problem.stations[station].is_required() {
                            warn!(
                                "day {day} slot {slot}: required station '{}' left empty",
                                problem.stations[station].id
                            );
                        }
                        continue;
                    };

                    if candidates.over_cap {
                        warn!(
                            "day {day} slot {slot}: '{}' assigned to required station '{}' above weekly max {}",
                            problem.groups[group],
                            problem.stations[station].id,
                            problem.stations[station].rule.max
                        );
                        state.overrides.push(CapOverride {
                            day,
                            slot,
                            station: problem.stations[station].id.clone(),
                            group: problem.groups[group].clone(),
                        });
                    }

                    trace!(
                        "day {day} slot {slot}: {} -> {}",
                        problem.stations[station].id,
                        problem.groups[group]
                    );
                    state.record(problem, day, slot, station, group);
                    used_in_slot[group] = true;
                }
            }
        }

        let (grid, stats) = state.into_parts(problem);
        info!(
            "scheduled {}/{} cells over {} days ({} cap overrides)",
            grid.filled_count(),
            grid.cell_count(),
            problem.days,
            stats.cap_overrides.len()
        );
        Ok(RotationOutcome { grid, stats })
    }

    /// Groups that may take `station` in the current slot.
    fn candidate_groups(
        problem: &RotationProblem,
        state: &RotationState,
        used_in_slot: &[bool],
        station: usize,
    ) -> Candidates {
        let rule = &problem.stations[station].rule;
        let eligible = |g: usize| !used_in_slot[g] && !state.visited_today(g, station);

        let groups: Vec<usize> = (0..problem.groups.len())
            .filter(|&g| eligible(g) && rule.under_cap(state.station_counts[g][station]))
            .collect();
        if !groups.is_empty() {
            return Candidates {
                groups,
                over_cap: false,
            };
        }

        if rule.required && !problem.strict {
            let groups: Vec<usize> = (0..problem.groups.len()).filter(|&g| eligible(g)).collect();
            let over_cap = !groups.is_empty();
            return Candidates { groups, over_cap };
        }

        Candidates {
            groups: Vec::new(),
            over_cap: false,
        }
    }

    /// Picks the candidate by deficit, weekly total, station count, then ID.
    fn choose_group(
        problem: &RotationProblem,
        state: &RotationState,
        candidates: &[usize],
        station: usize,
    ) -> Option<usize> {
        let rule = &problem.stations[station].rule;
        candidates.iter().copied().min_by_key(|&g| {
            let count = state.station_counts[g][station];
            (
                Reverse(rule.deficit(count)),
                state.totals[g],
                count,
                problem.groups[g].as_str(),
            )
        })
    }
}

/// Whether `order` visits every index in `0..len` exactly once.
fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    order
        .iter()
        .all(|&i| i < len && !std::mem::replace(&mut seen[i], true))
}
