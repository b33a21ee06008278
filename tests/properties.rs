//! Property tests: every produced schedule passes the independent validator.

use proptest::prelude::*;

use station_rota::models::{RotationProblem, ScheduleGrid, Station, StationRule};
use station_rota::scheduler::{DeterministicOrder, RotationScheduler, UsageStats};
use station_rota::validation::{validate_schedule, Validator, ViolationKind};

fn rule_strategy() -> impl Strategy<Value = StationRule> {
    (0u32..4, 1u32..4, any::<bool>(), 1u32..20).prop_map(|(min, max, required, fill_priority)| {
        StationRule {
            min,
            max,
            required,
            fill_priority,
        }
    })
}

fn problem_strategy() -> impl Strategy<Value = RotationProblem> {
    (
        1usize..=6,
        prop::collection::vec(rule_strategy(), 1..=5),
        0usize..=4,
        0usize..=4,
        any::<bool>(),
    )
        .prop_map(|(group_count, rules, days, slots, strict)| {
            let groups = (1..=group_count).map(|i| format!("G{i}")).collect();
            let stations = rules
                .into_iter()
                .enumerate()
                .map(|(i, rule)| Station::new(format!("S{i}")).with_rule(rule))
                .collect();
            RotationProblem::new(groups, stations)
                .with_calendar(days, slots)
                .with_strict(strict)
        })
}

fn count(grid: &ScheduleGrid, group: &str, station: &str) -> u32 {
    grid.count_for(group, station) as u32
}

proptest! {
    #[test]
    fn prop_schedule_passes_hard_checks(problem in problem_strategy(), seed in any::<u64>()) {
        let outcome = RotationScheduler::new().with_seed(seed).schedule(&problem).unwrap();

        // Empty required cells are the only tolerated finding: strict mode
        // reports infeasibility through them.
        if let Err(violations) = validate_schedule(&outcome.grid, &problem) {
            for v in &violations {
                prop_assert!(problem.strict, "violation outside strict mode: {}", v);
                prop_assert_eq!(v.kind, ViolationKind::RequiredStationEmpty, "{}", v);
            }
        }
    }

    #[test]
    fn prop_caps_hold_without_override(problem in problem_strategy(), seed in any::<u64>()) {
        let outcome = RotationScheduler::new().with_seed(seed).schedule(&problem).unwrap();

        for station in &problem.stations {
            let overridden = outcome.stats.cap_overrides.iter().any(|o| o.station == station.id);
            if overridden {
                prop_assert!(station.is_required());
                prop_assert!(!problem.strict);
                continue;
            }
            for group in &problem.groups {
                prop_assert!(count(&outcome.grid, group, &station.id) <= station.rule.max);
            }
        }
    }

    #[test]
    fn prop_strict_never_exceeds_caps(problem in problem_strategy(), seed in any::<u64>()) {
        let problem = problem.with_strict(true);
        let outcome = RotationScheduler::new().with_seed(seed).schedule(&problem).unwrap();

        prop_assert!(outcome.stats.cap_overrides.is_empty());
        let checked = Validator::new().with_weekly_cap_check(true).validate(&outcome.grid, &problem);
        if let Err(violations) = checked {
            prop_assert!(violations.iter().all(|v| v.kind != ViolationKind::WeeklyCapExceeded));
        }
    }

    #[test]
    fn prop_stats_match_grid(problem in problem_strategy(), seed in any::<u64>()) {
        let outcome = RotationScheduler::new().with_seed(seed).schedule(&problem).unwrap();
        let recount = UsageStats::from_grid(&outcome.grid, &problem);

        prop_assert_eq!(&outcome.stats.total_assignments, &recount.total_assignments);
        prop_assert_eq!(&outcome.stats.station_counts, &recount.station_counts);
        prop_assert_eq!(outcome.stats.assignment_count() as usize, outcome.grid.filled_count());
    }

    #[test]
    fn prop_pinned_order_is_deterministic(problem in problem_strategy(), seed in any::<u64>()) {
        let scheduler = RotationScheduler::new();
        let a = scheduler.schedule_with(&problem, &mut DeterministicOrder).unwrap();
        let b = scheduler.schedule_with(&problem, &mut DeterministicOrder).unwrap();
        prop_assert_eq!(a.grid, b.grid);

        let seeded = RotationScheduler::new().with_seed(seed);
        prop_assert_eq!(
            seeded.schedule(&problem).unwrap().grid,
            seeded.schedule(&problem).unwrap().grid
        );
    }

    #[test]
    fn prop_validator_catches_injected_duplicate(
        problem in problem_strategy(),
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let outcome = RotationScheduler::new().with_seed(seed).schedule(&problem).unwrap();
        let grid = outcome.grid;

        // Cells (day, slot, filled station, other station) where a copy of the
        // filled group creates a same-slot duplicate.
        let mut targets = Vec::new();
        for day in 0..grid.days() {
            for slot in 0..grid.slots_per_day() {
                let row: Vec<_> = grid.slot(day, slot).collect();
                for (station, group) in &row {
                    let Some(group) = group else { continue };
                    for (other, _) in &row {
                        if other != station {
                            targets.push((day, slot, group.to_string(), other.to_string()));
                        }
                    }
                }
            }
        }
        prop_assume!(!targets.is_empty());

        let (day, slot, group, other) = targets[pick.index(targets.len())].clone();
        let mut bad = grid.clone();
        bad.assign(day, slot, &other, group.clone());

        let violations = validate_schedule(&bad, &problem).unwrap_err();
        let found_duplicate = violations.iter().any(|v| {
            v.kind == ViolationKind::DuplicateInSlot
                && v.day == Some(day)
                && v.slot == Some(slot)
                && v.group.as_deref() == Some(group.as_str())
        });
        prop_assert!(found_duplicate);
    }
}
