//! Statistics over a window of past draws.
//!
//! [`HistoryStatistics::compute`] is a pure function of the window;
//! [`StatisticsCache`] memoises it for callers that ask for the same
//! window repeatedly.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use lotoforge_core::{ConstraintType, Draw, MAX_NUMBER};

/// Numbers reported as hot and as cold.
pub const HOT_COLD_COUNT: usize = 5;

/// Aggregate of one constraint type over a window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintSummary {
    pub constraint: ConstraintType,
    /// Draws that contributed; repeat counts need the previous contest.
    pub samples: usize,
    pub mean: f64,
    /// Share of contributing draws inside the ideal band, `0.0..=1.0`.
    pub ideal_share: f64,
}

/// Frequency and constraint statistics of a window of draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HistoryStatistics {
    pub draws: usize,
    /// `frequencies[n - 1]` = draws containing `n`.
    pub frequencies: [u32; MAX_NUMBER as usize],
    /// Most frequent numbers, most frequent first; ties go to the smaller number.
    pub hot: Vec<u8>,
    /// Least frequent numbers, least frequent first; ties go to the smaller number.
    pub cold: Vec<u8>,
    /// One entry per constraint type, in declaration order.
    pub constraints: Vec<ConstraintSummary>,
}

impl HistoryStatistics {
    /// Aggregates `window`. An empty window gives zero frequencies and means.
    ///
    /// # Example
    ///
    /// ```
    /// use lotoforge_core::{ConstraintType, Draw};
    /// use lotoforge_solver::HistoryStatistics;
    ///
    /// let window = vec![Draw::new(2, 1..=15).unwrap(), Draw::new(1, 1..=15).unwrap()];
    /// let stats = HistoryStatistics::compute(&window);
    ///
    /// assert_eq!(stats.frequency(1), 2);
    /// assert_eq!(stats.frequency(25), 0);
    /// assert_eq!(stats.summary(ConstraintType::Sum).map(|s| s.mean), Some(120.0));
    /// ```
    pub fn compute(window: &[Draw]) -> Self {
        let mut frequencies = [0u32; MAX_NUMBER as usize];
        for draw in window {
            for n in draw.ticket().mask() {
                frequencies[n as usize - 1] += 1;
            }
        }

        let mut ranked: Vec<u8> = (1..=MAX_NUMBER).collect();
        ranked.sort_by_key(|&n| (std::cmp::Reverse(frequencies[n as usize - 1]), n));
        let hot = ranked[..HOT_COLD_COUNT].to_vec();
        ranked.sort_by_key(|&n| (frequencies[n as usize - 1], n));
        let cold = ranked[..HOT_COLD_COUNT].to_vec();

        let constraints = ConstraintType::ALL
            .iter()
            .map(|&constraint| summarize(constraint, window))
            .collect();

        Self {
            draws: window.len(),
            frequencies,
            hot,
            cold,
            constraints,
        }
    }

    /// Draws in the window containing `n`.
    pub fn frequency(&self, n: u8) -> u32 {
        match n {
            1..=MAX_NUMBER => self.frequencies[n as usize - 1],
            _ => 0,
        }
    }

    pub fn summary(&self, constraint: ConstraintType) -> Option<&ConstraintSummary> {
        self.constraints.iter().find(|s| s.constraint == constraint)
    }
}

fn summarize(constraint: ConstraintType, window: &[Draw]) -> ConstraintSummary {
    let values: Vec<u32> = window
        .iter()
        .filter(|d| !constraint.requires_history() || d.stats().has_reference())
        .map(|d| d.stats().get(constraint))
        .collect();

    let samples = values.len();
    if samples == 0 {
        return ConstraintSummary {
            constraint,
            samples,
            mean: 0.0,
            ideal_share: 0.0,
        };
    }
    let ideal = constraint.ideal_range();
    let total: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let inside = values.iter().filter(|&&v| ideal.contains(v)).count();
    ConstraintSummary {
        constraint,
        samples,
        mean: total as f64 / samples as f64,
        ideal_share: inside as f64 / samples as f64,
    }
}

/// Identifies a window by its size and endpoint contests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WindowKey {
    len: usize,
    first: u32,
    last: u32,
}

impl WindowKey {
    fn of(window: &[Draw]) -> Self {
        Self {
            len: window.len(),
            first: window.first().map_or(0, Draw::contest),
            last: window.last().map_or(0, Draw::contest),
        }
    }
}

#[derive(Debug, Default)]
struct LruEntries {
    map: HashMap<WindowKey, Arc<HistoryStatistics>>,
    /// Least recently used first.
    order: VecDeque<WindowKey>,
}

impl LruEntries {
    fn touch(&mut self, key: WindowKey) {
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key);
    }
}

/// Fixed-capacity LRU cache of [`HistoryStatistics`].
///
/// Safe to share between threads. Statistics are computed outside the
/// lock, so concurrent misses on one key may compute twice; the first
/// insert wins and both callers get equal values.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lotoforge_core::Draw;
/// use lotoforge_solver::StatisticsCache;
///
/// let cache = StatisticsCache::new(4);
/// let window = vec![Draw::new(1, 1..=15).unwrap()];
///
/// let first = cache.get_or_compute(&window);
/// let second = cache.get_or_compute(&window);
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.hits(), 1);
/// ```
#[derive(Debug)]
pub struct StatisticsCache {
    capacity: usize,
    entries: Mutex<LruEntries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StatisticsCache {
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Creates a cache holding at most `capacity` windows (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(LruEntries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get_or_compute(&self, window: &[Draw]) -> Arc<HistoryStatistics> {
        let key = WindowKey::of(window);
        {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(stats) = entries.map.get(&key).cloned() {
                entries.touch(key);
                self.hits.fetch_add(1, Ordering::Relaxed);
                return stats;
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed = Arc::new(HistoryStatistics::compute(window));

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let stats = Arc::clone(entries.map.entry(key).or_insert(computed));
        entries.touch(key);
        while entries.order.len() > self.capacity {
            if let Some(evicted) = entries.order.pop_front() {
                entries.map.remove(&evicted);
            }
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.map.clear();
        entries.order.clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for StatisticsCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "history_stats_tests.rs"]
mod tests;
