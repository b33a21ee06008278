//! Plain-text rendering of a rotation.
//!
//! One table per day (slot rows, station columns, `-` for empty cells),
//! followed by per-group weekly totals. Day and slot numbers are 1-based.

use std::fmt::{self, Write};

use crate::models::{RotationProblem, ScheduleGrid};
use crate::scheduler::UsageStats;

const SLOT_COLUMN: usize = 6;
const EMPTY_CELL: &str = "-";

fn column_width(grid: &ScheduleGrid) -> usize {
    let station_width = grid.stations().iter().map(|s| s.len()).max().unwrap_or(0);
    let group_width = (0..grid.days())
        .flat_map(|d| (0..grid.slots_per_day()).map(move |s| (d, s)))
        .flat_map(|(d, s)| grid.slot(d, s).filter_map(|(_, g)| g).map(str::len).collect::<Vec<_>>())
        .max()
        .unwrap_or(0);
    station_width.max(group_width).max(EMPTY_CELL.len()) + 2
}

impl fmt::Display for ScheduleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = column_width(self);
        let mut header = format!("{:<w$}", "Slot", w = SLOT_COLUMN);
        for station in self.stations() {
            write!(header, "{station:<width$}")?;
        }
        let header = header.trim_end();
        let rule = "-".repeat(header.len());

        for day in 0..self.days() {
            if day > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Day {}", day + 1)?;
            writeln!(f, "{header}")?;
            writeln!(f, "{rule}")?;
            for slot in 0..self.slots_per_day() {
                let mut row = format!("{:<w$}", slot + 1, w = SLOT_COLUMN);
                for (_, group) in self.slot(day, slot) {
                    write!(row, "{:<width$}", group.unwrap_or(EMPTY_CELL))?;
                }
                writeln!(f, "{}", row.trim_end())?;
            }
        }
        Ok(())
    }
}

/// Renders weekly totals, one line per roster group.
///
/// `  G1: 6 | Math=2, Art=1`
pub fn render_totals(problem: &RotationProblem, stats: &UsageStats) -> String {
    let mut out = String::from("Totals per group (week):\n");
    for group in &problem.groups {
        let per_station = problem
            .stations
            .iter()
            .map(|s| format!("{}={}", s.id, stats.count(group, &s.id)))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("  {group}: {} | {per_station}\n", stats.total(group)));
    }
    out
}

/// Renders the grid tables followed by the weekly totals.
pub fn render_report(grid: &ScheduleGrid, problem: &RotationProblem, stats: &UsageStats) -> String {
    format!("{grid}\n{}", render_totals(problem, stats))
}
