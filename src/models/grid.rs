//! Schedule grid (solution) model.
//!
//! The grid is day-major and slot-minor. Each cell maps every station, in
//! declared order, to the group occupying it, or `None` when unfilled.

use serde::{Deserialize, Serialize};

/// A produced (or hand-built) rotation schedule.
///
/// `cells[day][slot][station_index]` holds the assigned group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    stations: Vec<String>,
    slots_per_day: usize,
    cells: Vec<Vec<Vec<Option<String>>>>,
}

impl ScheduleGrid {
    /// Creates an empty grid.
    pub fn new(stations: Vec<String>, days: usize, slots_per_day: usize) -> Self {
        let width = stations.len();
        Self {
            stations,
            slots_per_day,
            cells: vec![vec![vec![None; width]; slots_per_day]; days],
        }
    }

    /// Number of days.
    #[inline]
    pub fn days(&self) -> usize {
        self.cells.len()
    }

    /// Slots per day.
    #[inline]
    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    /// Station columns in order.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Column index of a station.
    pub fn station_index(&self, station: &str) -> Option<usize> {
        self.stations.iter().position(|s| s == station)
    }

    /// Group at a cell. `None` if unfilled or out of range.
    pub fn get(&self, day: usize, slot: usize, station: &str) -> Option<&str> {
        let idx = self.station_index(station)?;
        self.get_at(day, slot, idx)
    }

    pub(crate) fn get_at(&self, day: usize, slot: usize, station_idx: usize) -> Option<&str> {
        self.cells
            .get(day)?
            .get(slot)?
            .get(station_idx)?
            .as_deref()
    }

    /// Sets a cell. Returns `false` if the coordinates or station are unknown.
    pub fn set(&mut self, day: usize, slot: usize, station: &str, group: Option<String>) -> bool {
        let Some(idx) = self.station_index(station) else {
            return false;
        };
        self.set_at(day, slot, idx, group)
    }

    /// Assigns a group to a cell. Returns `false` if out of range.
    pub fn assign(
        &mut self,
        day: usize,
        slot: usize,
        station: &str,
        group: impl Into<String>,
    ) -> bool {
        self.set(day, slot, station, Some(group.into()))
    }

    pub(crate) fn set_at(
        &mut self,
        day: usize,
        slot: usize,
        station_idx: usize,
        group: Option<String>,
    ) -> bool {
        match self
            .cells
            .get_mut(day)
            .and_then(|d| d.get_mut(slot))
            .and_then(|s| s.get_mut(station_idx))
        {
            Some(cell) => {
                *cell = group;
                true
            }
            None => false,
        }
    }

    /// Iterates `(station, group)` pairs of one cell in station order.
    pub fn slot(&self, day: usize, slot: usize) -> impl Iterator<Item = (&str, Option<&str>)> {
        let row = self.cells.get(day).and_then(|d| d.get(slot));
        self.stations
            .iter()
            .enumerate()
            .map(move |(i, st)| {
                let group = row.and_then(|r| r.get(i)).and_then(|g| g.as_deref());
                (st.as_str(), group)
            })
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.days() * self.slots_per_day * self.stations.len()
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|c| c.is_some())
            .count()
    }

    /// Weekly visits of `group` at `station`, counted from the grid.
    pub fn count_for(&self, group: &str, station: &str) -> usize {
        let Some(idx) = self.station_index(station) else {
            return 0;
        };
        self.cells
            .iter()
            .flatten()
            .filter(|row| row.get(idx).and_then(|g| g.as_deref()) == Some(group))
            .count()
    }
}
