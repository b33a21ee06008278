//! Per-day station visitation order.
//!
//! Stations are processed required-first. Within each class the order is
//! weighted-random: each station draws `d` uniformly from `1..=100` and is
//! ranked by `d / fill_priority` ascending, so a higher priority usually,
//! but not always, lands earlier. Redrawing every day spreads the advantage
//! of going first across equal-priority peers.
//!
//! The ranking itself is the pure function [`station_order_key`]; the source
//! of draws is injectable through [`StationOrderer`].

use std::cmp::Ordering;

use log::warn;
use rand::Rng;

use crate::models::{Station, StationRule};

/// Inclusive range of the per-station draw.
pub const DRAW_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Sort key for a station given its draw. Lower sorts first.
///
/// `false < true`, so required stations (`!required == false`) come first.
#[inline]
pub fn station_order_key(rule: &StationRule, draw: u32) -> (bool, f64) {
    (!rule.required, f64::from(draw) / f64::from(rule.fill_priority.max(1)))
}

/// Orders station indices by their keys. Stable: equal keys keep declared order.
///
/// Always returns a permutation of `0..stations.len()`. Stations without a
/// draw get the top of [`DRAW_RANGE`]; surplus draws are ignored.
pub fn order_by_draws(stations: &[Station], draws: &[u32]) -> Vec<usize> {
    if stations.len() != draws.len() {
        warn!(
            "{} draws for {} stations; padding with {}",
            draws.len(),
            stations.len(),
            DRAW_RANGE.end()
        );
    }
    let keys: Vec<(bool, f64)> = stations
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let draw = draws.get(i).copied().unwrap_or(*DRAW_RANGE.end());
            station_order_key(&s.rule, draw)
        })
        .collect();

    let mut indices: Vec<usize> = (0..stations.len()).collect();
    indices.sort_by(|&a, &b| compare_keys(keys[a], keys[b]));
    indices
}

fn compare_keys(a: (bool, f64), b: (bool, f64)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.total_cmp(&b.1))
}

/// Source of the per-day station order.
pub trait StationOrderer {
    /// Returns station indices in processing order for `day`.
    fn order(&mut self, day: usize, stations: &[Station]) -> Vec<usize>;
}

/// Production ordering: fresh weighted-random draws each day.
#[derive(Debug, Clone)]
pub struct WeightedRandomOrder<R: Rng> {
    rng: R,
}

impl<R: Rng> WeightedRandomOrder<R> {
    /// Wraps a random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> StationOrderer for WeightedRandomOrder<R> {
    fn order(&mut self, _day: usize, stations: &[Station]) -> Vec<usize> {
        let draws: Vec<u32> = stations
            .iter()
            .map(|_| self.rng.random_range(DRAW_RANGE))
            .collect();
        order_by_draws(stations, &draws)
    }
}

/// Pinned ordering: every station gets the same draw every day.
///
/// Yields required-first, then `fill_priority` descending, then declared order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicOrder;

impl StationOrderer for DeterministicOrder {
    fn order(&mut self, _day: usize, stations: &[Station]) -> Vec<usize> {
        let draws = vec![*DRAW_RANGE.end(); stations.len()];
        order_by_draws(stations, &draws)
    }
}

impl<F> StationOrderer for F
where
    F: FnMut(usize, &[Station]) -> Vec<usize>,
{
    fn order(&mut self, day: usize, stations: &[Station]) -> Vec<usize> {
        self(day, stations)
    }
}
