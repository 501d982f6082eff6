//! Historical check engine.
//!
//! Scores a ticket against past draws with the bitmask intersection count.

use std::collections::BTreeMap;

use lotoforge_core::{Draw, Ticket};
use rayon::prelude::*;

/// Smallest hit count that wins a prize.
pub const PRIZE_THRESHOLD: u32 = 11;

/// Number of most recent draws kept in [`CheckResult::recent`].
pub const RECENT_WINDOW: usize = 10;

/// Hits of a ticket in one contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContestHit {
    pub contest: u32,
    pub hits: u32,
}

/// Result of checking one ticket against a history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckResult {
    /// Occurrences per exact hit count, for counts of at least
    /// [`PRIZE_THRESHOLD`].
    pub hits: BTreeMap<u32, u32>,
    /// Most recent prize-winning contest.
    pub last_hit: Option<ContestHit>,
    /// Contest of the most recent draw checked, `0` for an empty history.
    pub last_checked_contest: u32,
    /// Hits in the most recent draws, oldest first.
    pub recent: Vec<ContestHit>,
}

impl CheckResult {
    /// Occurrences of exactly `hits` matches.
    pub fn count(&self, hits: u32) -> u32 {
        self.hits.get(&hits).copied().unwrap_or(0)
    }

    /// Number of prize-winning contests.
    pub fn total_prizes(&self) -> u32 {
        self.hits.values().sum()
    }

    /// Highest hit count reached, if any prize was won.
    pub fn best(&self) -> Option<u32> {
        self.hits.keys().next_back().copied()
    }
}

/// Checks `ticket` against `history`, which must be most-recent-first.
///
/// # Example
///
/// ```
/// use lotoforge_core::{Draw, Ticket};
/// use lotoforge_solver::check;
///
/// let ticket = Ticket::new(1..=15).unwrap();
/// let history = vec![
///     Draw::new(2, 5..=19).unwrap(),
///     Draw::new(1, 1..=15).unwrap(),
/// ];
///
/// let result = check(&ticket, &history);
/// assert_eq!(result.count(11), 1);
/// assert_eq!(result.count(15), 1);
/// assert_eq!(result.last_hit.map(|h| h.contest), Some(2));
/// assert_eq!(result.last_checked_contest, 2);
/// ```
pub fn check(ticket: &Ticket, history: &[Draw]) -> CheckResult {
    let mask = ticket.mask();
    let mut result = CheckResult {
        last_checked_contest: history.first().map_or(0, Draw::contest),
        ..CheckResult::default()
    };

    for (i, draw) in history.iter().enumerate() {
        let hits = draw.ticket().mask().intersect_count(mask);
        let contest_hit = ContestHit {
            contest: draw.contest(),
            hits,
        };
        if hits >= PRIZE_THRESHOLD {
            *result.hits.entry(hits).or_insert(0) += 1;
            result.last_hit.get_or_insert(contest_hit);
        }
        if i < RECENT_WINDOW {
            result.recent.push(contest_hit);
        }
    }
    result.recent.reverse();
    result
}

/// Checks every ticket against the same history in parallel.
///
/// Results are in the order of `tickets`.
pub fn check_many(tickets: &[Ticket], history: &[Draw]) -> Vec<CheckResult> {
    tickets
        .par_iter()
        .map(|ticket| check(ticket, history))
        .collect()
}
