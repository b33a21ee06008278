//! Validation for rotation problems and schedules.
//!
//! Two layers:
//! - [`validate_problem`] rejects malformed problem definitions before
//!   scheduling (empty roster, duplicate IDs, zero caps or priorities).
//! - [`validate_schedule`] / [`Validator`] certify a grid against the hard
//!   invariants. Every count is re-derived from the grid alone, so this works
//!   on hand-built grids and never trusts scheduler bookkeeping.
//!
//! # Schedule checks
//! 1. No group appears twice within one (day, slot).
//! 2. No group holds the same station more than once per day.
//! 3. In strict mode, every required station is filled in every slot.
//! 4. Optional: weekly counts stay within `max` wherever the required-station
//!    override cannot apply (non-required stations, or strict mode).
//! 5. The grid matches the problem: every station column is defined, every
//!    defined station has a column, the calendar shape agrees, and every
//!    group is on the roster.
//!
//! All violations are collected; the result lists them grouped by check in
//! the order above, each group in (day, slot, station) order.

use log::warn;
use std::collections::{HashMap, HashSet};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{RotationProblem, ScheduleGrid};

/// Validates a problem definition.
///
/// Fails on the first error. `min > max` is accepted (the minimum is simply
/// unreachable) but logged.
pub fn validate_problem(problem: &RotationProblem) -> ConfigResult<()> {
    if problem.groups.is_empty() {
        return Err(ConfigError::NoGroups);
    }
    if problem.stations.is_empty() {
        return Err(ConfigError::NoStations);
    }

    let mut group_ids = HashSet::new();
    for g in &problem.groups {
        if !group_ids.insert(g.as_str()) {
            return Err(ConfigError::DuplicateGroup(g.clone()));
        }
    }

    let mut station_ids = HashSet::new();
    for s in &problem.stations {
        if !station_ids.insert(s.id.as_str()) {
            return Err(ConfigError::DuplicateStation(s.id.clone()));
        }
        if s.rule.max < 1 {
            return Err(ConfigError::InvalidMax {
                station: s.id.clone(),
                max: s.rule.max,
            });
        }
        if s.rule.fill_priority < 1 {
            return Err(ConfigError::InvalidFillPriority {
                station: s.id.clone(),
                fill_priority: s.rule.fill_priority,
            });
        }
        if s.rule.min > s.rule.max {
            warn!(
                "station '{}': min {} exceeds max {}; minimum is unreachable",
                s.id, s.rule.min, s.rule.max
            );
        }
    }

    Ok(())
}

/// Schedule validation result.
pub type ValidationResult = Result<(), Vec<ScheduleViolation>>;

/// Categories of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A group occupies two stations in the same slot.
    DuplicateInSlot,
    /// A group holds the same station twice in one day.
    RepeatedStationInDay,
    /// A required station is empty in strict mode.
    RequiredStationEmpty,
    /// A weekly cap is exceeded where no override is allowed.
    WeeklyCapExceeded,
    /// The grid names a group not on the roster.
    UnknownGroup,
    /// The grid has a station column the problem does not define.
    UnknownStation,
    /// A station the problem defines has no column in the grid.
    MissingStation,
    /// The grid's days or slots per day differ from the problem's calendar.
    ShapeMismatch,
}

/// A located schedule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleViolation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Day (0-based), if the violation is tied to one.
    pub day: Option<usize>,
    /// Slot (0-based), if the violation is tied to one.
    pub slot: Option<usize>,
    /// Station involved.
    pub station: Option<String>,
    /// Group involved.
    pub group: Option<String>,
    /// Human-readable description (1-based day and slot numbers).
    pub message: String,
}

impl ScheduleViolation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            day: None,
            slot: None,
            station: None,
            group: None,
            message: message.into(),
        }
    }

    fn at(mut self, day: usize, slot: Option<usize>) -> Self {
        self.day = Some(day);
        self.slot = slot;
        self
    }

    fn station(mut self, station: &str) -> Self {
        self.station = Some(station.to_string());
        self
    }

    fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }
}

impl std::fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a schedule against the hard invariants (checks 1, 2, 3 and 5).
pub fn validate_schedule(grid: &ScheduleGrid, problem: &RotationProblem) -> ValidationResult {
    Validator::new().validate(grid, problem)
}

/// Configurable schedule validator.
///
/// Stateless across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    check_weekly_caps: bool,
}

impl Validator {
    /// Creates a validator with the weekly-cap check off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the weekly-cap check.
    ///
    /// Caps of required stations are only enforced in strict mode, since the
    /// non-strict override may legally exceed them.
    pub fn with_weekly_cap_check(mut self, enabled: bool) -> Self {
        self.check_weekly_caps = enabled;
        self
    }

    /// Validates `grid` against `problem`.
    ///
    /// # Returns
    /// `Ok(())` if all checks pass, `Err(violations)` with every detected issue.
    pub fn validate(&self, grid: &ScheduleGrid, problem: &RotationProblem) -> ValidationResult {
        let mut violations = Vec::new();

        check_slot_uniqueness(grid, &mut violations);
        check_day_station_uniqueness(grid, &mut violations);
        if problem.strict {
            check_required_filled(grid, problem, &mut violations);
        }
        if self.check_weekly_caps {
            check_weekly_caps(grid, problem, &mut violations);
        }
        check_known_entities(grid, problem, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_slot_uniqueness(grid: &ScheduleGrid, violations: &mut Vec<ScheduleViolation>) {
    for day in 0..grid.days() {
        for slot in 0..grid.slots_per_day() {
            let mut seen: HashMap<&str, Vec<&str>> = HashMap::new();
            let mut order: Vec<&str> = Vec::new();
            for (station, group) in grid.slot(day, slot) {
                let Some(group) = group else { continue };
                let stations = seen.entry(group).or_default();
                if stations.is_empty() {
                    order.push(group);
                }
                stations.push(station);
            }

            for group in order {
                let stations = &seen[group];
                if stations.len() > 1 {
                    violations.push(
                        ScheduleViolation::new(
                            ViolationKind::DuplicateInSlot,
                            format!(
                                "Duplicate group '{group}' within day {}, slot {}: stations {:?}",
                                day + 1,
                                slot + 1,
                                stations
                            ),
                        )
                        .at(day, Some(slot))
                        .station(stations[1])
                        .group(group),
                    );
                }
            }
        }
    }
}

fn check_day_station_uniqueness(grid: &ScheduleGrid, violations: &mut Vec<ScheduleViolation>) {
    for day in 0..grid.days() {
        let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
        for slot in 0..grid.slots_per_day() {
            for (station, group) in grid.slot(day, slot) {
                let Some(group) = group else { continue };
                let count = counts.entry((group, station)).or_insert(0);
                *count += 1;
                // Report once per (group, station, day), at the first repeat.
                if *count == 2 {
                    violations.push(
                        ScheduleViolation::new(
                            ViolationKind::RepeatedStationInDay,
                            format!(
                                "'{group}' assigned to '{station}' more than once on day {}",
                                day + 1
                            ),
                        )
                        .at(day, Some(slot))
                        .station(station)
                        .group(group),
                    );
                }
            }
        }
    }
}

fn check_required_filled(
    grid: &ScheduleGrid,
    problem: &RotationProblem,
    violations: &mut Vec<ScheduleViolation>,
) {
    for day in 0..grid.days() {
        for slot in 0..grid.slots_per_day() {
            // Absent columns are reported once as `MissingStation`.
            let required = problem
                .stations
                .iter()
                .filter(|s| s.is_required() && grid.station_index(&s.id).is_some());
            for station in required {
                if grid.get(day, slot, &station.id).is_none() {
                    violations.push(
                        ScheduleViolation::new(
                            ViolationKind::RequiredStationEmpty,
                            format!(
                                "Required station '{}' left empty on day {}, slot {} in strict mode",
                                station.id,
                                day + 1,
                                slot + 1
                            ),
                        )
                        .at(day, Some(slot))
                        .station(&station.id),
                    );
                }
            }
        }
    }
}

fn check_weekly_caps(
    grid: &ScheduleGrid,
    problem: &RotationProblem,
    violations: &mut Vec<ScheduleViolation>,
) {
    for station in &problem.stations {
        if station.is_required() && !problem.strict {
            continue;
        }
        for group in &problem.groups {
            let count = grid.count_for(group, &station.id);
            if count > station.rule.max as usize {
                violations.push(
                    ScheduleViolation::new(
                        ViolationKind::WeeklyCapExceeded,
                        format!(
                            "'{group}' visits '{}' {count} times; weekly max is {}",
                            station.id, station.rule.max
                        ),
                    )
                    .station(&station.id)
                    .group(group),
                );
            }
        }
    }
}

fn check_known_entities(
    grid: &ScheduleGrid,
    problem: &RotationProblem,
    violations: &mut Vec<ScheduleViolation>,
) {
    for station in grid.stations() {
        if problem.station(station).is_none() {
            violations.push(
                ScheduleViolation::new(
                    ViolationKind::UnknownStation,
                    format!("Grid has unknown station '{station}'"),
                )
                .station(station),
            );
        }
    }

    for station in &problem.stations {
        if grid.station_index(&station.id).is_none() {
            violations.push(
                ScheduleViolation::new(
                    ViolationKind::MissingStation,
                    format!("Grid has no column for station '{}'", station.id),
                )
                .station(&station.id),
            );
        }
    }

    if grid.days() != problem.days || grid.slots_per_day() != problem.slots_per_day {
        violations.push(ScheduleViolation::new(
            ViolationKind::ShapeMismatch,
            format!(
                "Grid covers {} days x {} slots; problem expects {} x {}",
                grid.days(),
                grid.slots_per_day(),
                problem.days,
                problem.slots_per_day
            ),
        ));
    }

    let mut reported = HashSet::new();
    for day in 0..grid.days() {
        for slot in 0..grid.slots_per_day() {
            for (station, group) in grid.slot(day, slot) {
                let Some(group) = group else { continue };
                if !problem.has_group(group) && reported.insert(group) {
                    violations.push(
                        ScheduleViolation::new(
                            ViolationKind::UnknownGroup,
                            format!(
                                "Unknown group '{group}' at '{station}' on day {}, slot {}",
                                day + 1,
                                slot + 1
                            ),
                        )
                        .at(day, Some(slot))
                        .station(station)
                        .group(group),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Station, StationRule};

    fn problem(strict: bool) -> RotationProblem {
        RotationProblem::new(
            vec!["G1".into(), "G2".into(), "G3".into()],
            vec![
                Station::new("A").with_rule(StationRule::new(1, 2).required()),
                Station::new("B").with_rule(StationRule::new(0, 1)),
            ],
        )
        .with_calendar(2, 2)
        .with_strict(strict)
    }

    fn empty_grid(p: &RotationProblem) -> ScheduleGrid {
        ScheduleGrid::new(p.station_ids(), p.days, p.slots_per_day)
    }

    /// A legal, fully filled grid for `problem`.
    fn legal_grid(p: &RotationProblem) -> ScheduleGrid {
        let mut g = empty_grid(p);
        g.assign(0, 0, "A", "G1");
        g.assign(0, 0, "B", "G2");
        g.assign(0, 1, "A", "G2");
        g.assign(0, 1, "B", "G3");
        g.assign(1, 0, "A", "G3");
        g.assign(1, 0, "B", "G1");
        g.assign(1, 1, "A", "G1");
        g
    }

    // ---- problem validation ----

    #[test]
    fn test_valid_problem() {
        assert!(validate_problem(&problem(false)).is_ok());
    }

    #[test]
    fn test_no_groups() {
        let mut p = problem(false);
        p.groups.clear();
        assert!(matches!(validate_problem(&p), Err(ConfigError::NoGroups)));
    }

    #[test]
    fn test_no_stations() {
        let mut p = problem(false);
        p.stations.clear();
        assert!(matches!(validate_problem(&p), Err(ConfigError::NoStations)));
    }

    #[test]
    fn test_duplicate_ids() {
        let mut p = problem(false);
        p.groups.push("G1".into());
        assert!(matches!(validate_problem(&p), Err(ConfigError::DuplicateGroup(ref g)) if g == "G1"));

        let mut p = problem(false);
        p.stations.push(Station::new("B"));
        assert!(matches!(validate_problem(&p), Err(ConfigError::DuplicateStation(ref s)) if s == "B"));
    }

    #[test]
    fn test_zero_max_and_priority() {
        let mut p = problem(false);
        p.stations[1].rule.max = 0;
        let err = validate_problem(&p).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMax { max: 0, .. }));
        assert_eq!(err.station(), Some("B"));

        let mut p = problem(false);
        p.stations[0].rule.fill_priority = 0;
        assert!(matches!(
            validate_problem(&p),
            Err(ConfigError::InvalidFillPriority { fill_priority: 0, .. })
        ));
    }

    #[test]
    fn test_min_above_max_is_allowed() {
        let mut p = problem(false);
        p.stations[1].rule = StationRule::new(5, 1);
        assert!(validate_problem(&p).is_ok());
    }

    // ---- schedule validation ----

    #[test]
    fn test_legal_grid_passes() {
        let p = problem(false);
        assert!(validate_schedule(&legal_grid(&p), &p).is_ok());
    }

    #[test]
    fn test_duplicate_in_slot() {
        let p = problem(false);
        let mut g = legal_grid(&p);
        g.assign(1, 1, "B", "G1"); // G1 already at A in day 1, slot 1

        let errors = validate_schedule(&g, &p).unwrap_err();
        let v = errors
            .iter()
            .find(|e| e.kind == ViolationKind::DuplicateInSlot)
            .unwrap();
        assert_eq!(v.day, Some(1));
        assert_eq!(v.slot, Some(1));
        assert_eq!(v.station.as_deref(), Some("B"));
        assert_eq!(v.group.as_deref(), Some("G1"));
        assert!(v.message.contains("day 2, slot 2"));
    }

    #[test]
    fn test_repeated_station_in_day() {
        let p = problem(false);
        let mut g = legal_grid(&p);
        g.assign(0, 1, "A", "G1"); // G1 already at A in day 0, slot 0

        let errors = validate_schedule(&g, &p).unwrap_err();
        assert_eq!(errors.len(), 1);
        let v = &errors[0];
        assert_eq!(v.kind, ViolationKind::RepeatedStationInDay);
        assert_eq!(v.day, Some(0));
        assert_eq!(v.slot, Some(1));
        assert_eq!(v.station.as_deref(), Some("A"));
        assert_eq!(v.group.as_deref(), Some("G1"));
    }

    #[test]
    fn test_same_station_across_days_is_fine() {
        let p = problem(false);
        let g = legal_grid(&p);
        // G1 holds A on both days.
        assert_eq!(g.get(0, 0, "A"), Some("G1"));
        assert_eq!(g.get(1, 1, "A"), Some("G1"));
        assert!(validate_schedule(&g, &p).is_ok());
    }

    #[test]
    fn test_required_empty_only_in_strict() {
        let relaxed = problem(false);
        let strict = problem(true);
        let mut g = legal_grid(&relaxed);
        g.set(1, 1, "A", None);

        assert!(validate_schedule(&g, &relaxed).is_ok());

        let errors = validate_schedule(&g, &strict).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::RequiredStationEmpty);
        assert_eq!(errors[0].day, Some(1));
        assert_eq!(errors[0].slot, Some(1));
        assert_eq!(errors[0].station.as_deref(), Some("A"));
    }

    #[test]
    fn test_optional_empty_is_fine_in_strict() {
        let p = problem(true);
        // Day 1, slot 1, B is empty in the legal grid.
        assert_eq!(legal_grid(&p).get(1, 1, "B"), None);
        assert!(validate_schedule(&legal_grid(&p), &p).is_ok());
    }

    #[test]
    fn test_weekly_cap_check_opt_in() {
        let p = problem(false);
        let mut g = legal_grid(&p);
        g.assign(1, 1, "B", "G2"); // G2 now at B twice; B max is 1

        assert!(validate_schedule(&g, &p).is_ok());

        let errors = Validator::new()
            .with_weekly_cap_check(true)
            .validate(&g, &p)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::WeeklyCapExceeded);
        assert_eq!(errors[0].station.as_deref(), Some("B"));
        assert_eq!(errors[0].group.as_deref(), Some("G2"));
    }

    #[test]
    fn test_weekly_cap_required_station_depends_on_strict() {
        let relaxed = problem(false).with_calendar(3, 1);
        let mut g = empty_grid(&relaxed);
        for day in 0..3 {
            g.assign(day, 0, "A", "G1"); // A max is 2
        }
        let checker = Validator::new().with_weekly_cap_check(true);

        // Non-strict: the override may exceed a required cap.
        assert!(checker.validate(&g, &relaxed).is_ok());

        let strict = relaxed.with_strict(true);
        let errors = checker.validate(&g, &strict).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ViolationKind::WeeklyCapExceeded && e.group.as_deref() == Some("G1")));
    }

    #[test]
    fn test_unknown_entities() {
        let p = problem(false);
        let mut g = ScheduleGrid::new(vec!["A".into(), "Z".into()], 1, 1);
        g.assign(0, 0, "A", "Ghost");
        g.assign(0, 0, "Z", "G1");

        let errors = validate_schedule(&g, &p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ViolationKind::UnknownStation && e.station.as_deref() == Some("Z")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ViolationKind::UnknownGroup && e.group.as_deref() == Some("Ghost")));
    }

    #[test]
    fn test_missing_optional_column() {
        let p = problem(false);
        let mut g = ScheduleGrid::new(vec!["A".into()], 2, 2);
        g.assign(0, 0, "A", "G1");

        let errors = validate_schedule(&g, &p).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::MissingStation);
        assert_eq!(errors[0].station.as_deref(), Some("B"));
        assert_eq!(errors[0].day, None);
    }

    #[test]
    fn test_missing_required_column_in_strict() {
        let p = problem(true);
        let mut g = ScheduleGrid::new(vec!["B".into()], 2, 2);
        g.assign(0, 0, "B", "G1");

        // One finding for the absent column, not one per empty cell.
        let errors = validate_schedule(&g, &p).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ViolationKind::MissingStation]);
        assert_eq!(errors[0].station.as_deref(), Some("A"));
    }

    #[test]
    fn test_shape_mismatch() {
        let p = problem(false);
        let g = ScheduleGrid::new(p.station_ids(), 1, 2);

        let errors = validate_schedule(&g, &p).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::ShapeMismatch);
        assert!(errors[0].message.contains("1 days x 2 slots"));

        let g = ScheduleGrid::new(p.station_ids(), 2, 3);
        let errors = validate_schedule(&g, &p).unwrap_err();
        assert_eq!(errors[0].kind, ViolationKind::ShapeMismatch);
    }

    #[test]
    fn test_collects_all_in_category_order() {
        let p = problem(true);
        let mut g = empty_grid(&p);
        g.assign(0, 0, "A", "G1");
        g.assign(0, 0, "B", "G1"); // duplicate in slot
        g.assign(0, 1, "A", "G1"); // repeat of A on day 0
        // A is empty all of day 1: two strict violations.

        let errors = validate_schedule(&g, &p).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::DuplicateInSlot,
                ViolationKind::RepeatedStationInDay,
                ViolationKind::RequiredStationEmpty,
                ViolationKind::RequiredStationEmpty,
            ]
        );
        assert_eq!(errors[2].day, Some(1));
        assert_eq!(errors[2].slot, Some(0));
        assert_eq!(errors[3].slot, Some(1));
    }

    #[test]
    fn test_display_is_message() {
        let p = problem(true);
        let g = empty_grid(&p);
        let errors = validate_schedule(&g, &p).unwrap_err();
        assert_eq!(errors[0].to_string(), errors[0].message);
    }
}
