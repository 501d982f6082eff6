//! Historical draw results.

use super::metrics::GeneratedMetrics;
use super::ticket::Ticket;
use crate::error::{LotoError, Result};

/// Precomputed statistics of one draw.
///
/// `Repeats` is measured against the previous contest when it is known.
pub type DrawStats = GeneratedMetrics;

/// A past winning result: a contest number plus its 15 numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    contest: u32,
    ticket: Ticket,
    stats: DrawStats,
}

impl Draw {
    /// Creates a draw with no previous contest to measure repeats against.
    pub fn new(contest: u32, numbers: impl IntoIterator<Item = u8>) -> Result<Self> {
        Ok(Self::from_ticket(contest, Ticket::new(numbers)?, None))
    }

    /// Creates a draw, measuring repeats against `previous` if given.
    pub fn from_ticket(contest: u32, ticket: Ticket, previous: Option<&Draw>) -> Self {
        let stats = GeneratedMetrics::measure(ticket.mask(), previous.map(|d| d.ticket.mask()));
        Self {
            contest,
            ticket,
            stats,
        }
    }

    pub fn contest(&self) -> u32 {
        self.contest
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn stats(&self) -> &DrawStats {
        &self.stats
    }
}

/// Draws ordered most-recent-first, with repeat counts filled in.
///
/// # Example
///
/// ```
/// use lotoforge_core::DrawHistory;
///
/// let history = DrawHistory::from_results(vec![
///     (1, (1..=15).collect::<Vec<u8>>()),
///     (2, (6..=20).collect::<Vec<u8>>()),
/// ])
/// .unwrap();
///
/// assert_eq!(history.last_draw().unwrap().contest(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawHistory {
    draws: Vec<Draw>,
}

impl DrawHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from `(contest, numbers)` pairs in any order.
    ///
    /// Each draw's `Repeats` statistic is measured against the contest
    /// immediately before it.
    pub fn from_results<I, N>(results: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, N)>,
        N: IntoIterator<Item = u8>,
    {
        let mut tickets = results
            .into_iter()
            .map(|(contest, numbers)| Ticket::new(numbers).map(|t| (contest, t)))
            .collect::<Result<Vec<_>>>()?;
        tickets.sort_by_key(|(contest, _)| *contest);

        let mut draws: Vec<Draw> = Vec::with_capacity(tickets.len());
        for (contest, ticket) in tickets {
            if let Some(previous) = draws.last() {
                if previous.contest == contest {
                    return Err(LotoError::DuplicateContest(contest));
                }
            }
            let draw = Draw::from_ticket(contest, ticket, draws.last());
            draws.push(draw);
        }
        draws.reverse();
        Ok(Self { draws })
    }

    /// Wraps already-built draws, re-sorting them most-recent-first.
    pub fn from_draws(mut draws: Vec<Draw>) -> Self {
        draws.sort_by(|a, b| b.contest.cmp(&a.contest));
        Self { draws }
    }

    /// All draws, most recent first.
    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn last_draw(&self) -> Option<&Draw> {
        self.draws.first()
    }

    /// The `n` most recent draws (fewer if the history is shorter).
    pub fn window(&self, n: usize) -> &[Draw] {
        &self.draws[..n.min(self.draws.len())]
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn into_draws(self) -> Vec<Draw> {
        self.draws
    }
}
