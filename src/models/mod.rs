//! Rotation scheduling domain models.
//!
//! # Domain Mappings
//!
//! | station-rota | Classroom | Clinic | Factory |
//! |--------------|-----------|--------|---------|
//! | Group | Class/Team | Resident | Crew |
//! | Station | Learning Center | Ward | Workcell |
//! | Slot | Period | Shift | Shift Block |
//! | ScheduleGrid | Rotation Chart | Duty Roster | Crew Plan |

mod grid;
mod problem;
mod station;

pub use grid::ScheduleGrid;
pub use problem::RotationProblem;
pub use station::{Station, StationRule};
