//! Greedy rotation scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `RotationScheduler` fills the grid day by day, slot by slot, station by
//! station with a priority-ordered greedy heuristic. It is not optimal: a
//! group chosen early in a slot is unavailable to the stations after it.
//!
//! # Station Ordering
//!
//! The per-day station order comes from a [`StationOrderer`].
//! [`WeightedRandomOrder`] is the production source; [`DeterministicOrder`]
//! pins it for reproducible runs.
//!
//! # KPI
//!
//! `RotationKpi` reports fill rates, unmet minimums, spread and cap overrides.

mod kpi;
mod ordering;
mod rotation;
mod state;
mod stats;

pub use kpi::{QuotaShortfall, RotationKpi};
pub use ordering::{
    order_by_draws, station_order_key, DeterministicOrder, StationOrderer, WeightedRandomOrder,
    DRAW_RANGE,
};
pub use rotation::{RotationOutcome, RotationScheduler};
pub use stats::{CapOverride, UsageStats};
