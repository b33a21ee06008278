//! Station rotation scheduling.
//!
//! Assigns a fixed roster of groups to a fixed set of stations over a
//! multi-day, multi-slot calendar. Stations carry weekly quota windows and a
//! required flag; a greedy, priority-ordered heuristic fills the grid and an
//! independent validator certifies the result.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `StationRule`, `Station`, `RotationProblem`,
//!   `ScheduleGrid`
//! - **`scheduler`**: `RotationScheduler`, station ordering, `UsageStats`,
//!   `RotationKpi`
//! - **`validation`**: Problem checks and the schedule invariant oracle
//! - **`config`**: TOML problem definitions
//! - **`report`**: Plain-text tables
//!
//! # Example
//!
//! ```
//! use station_rota::models::{RotationProblem, Station, StationRule};
//! use station_rota::scheduler::{DeterministicOrder, RotationScheduler};
//! use station_rota::validation::validate_schedule;
//!
//! let problem = RotationProblem::new(
//!     vec!["G1".into(), "G2".into(), "G3".into(), "G4".into()],
//!     vec![
//!         Station::new("A").with_rule(StationRule::new(1, 2).required()),
//!         Station::new("B").with_rule(StationRule::new(1, 2).required()),
//!         Station::new("C").with_rule(StationRule::new(1, 2).required()),
//!     ],
//! )
//! .with_calendar(2, 2)
//! .with_strict(true);
//!
//! let outcome = RotationScheduler::new()
//!     .schedule_with(&problem, &mut DeterministicOrder)
//!     .unwrap();
//! assert_eq!(outcome.grid.filled_count(), 12);
//! assert!(validate_schedule(&outcome.grid, &problem).is_ok());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
