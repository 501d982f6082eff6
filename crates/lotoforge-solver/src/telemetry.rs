//! Per-run telemetry.

use std::fmt;
use std::time::Duration;

use lotoforge_core::ConstraintType;

/// Which phase ultimately produced the accepted tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Every ticket came from the random phase.
    Heuristic,
    /// At least one ticket needed the backtracking solver.
    Backtracking,
    /// The run stopped early (timeout or exhausted search) with whatever
    /// it had collected.
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Heuristic => "heuristic",
            Strategy::Backtracking => "backtracking",
            Strategy::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Rejection histogram keyed by the first failing constraint type.
///
/// # Example
///
/// ```
/// use lotoforge_core::ConstraintType;
/// use lotoforge_solver::RejectionCounts;
///
/// let mut counts = RejectionCounts::default();
/// counts.record(ConstraintType::Sum);
/// counts.record(ConstraintType::Sum);
/// counts.record(ConstraintType::Primes);
///
/// assert_eq!(counts.get(ConstraintType::Sum), 2);
/// assert_eq!(counts.total(), 3);
/// assert_eq!(counts.most_frequent(), Some(ConstraintType::Sum));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectionCounts {
    counts: [u64; ConstraintType::COUNT],
}

impl RejectionCounts {
    pub fn record(&mut self, constraint: ConstraintType) {
        self.counts[constraint.index()] += 1;
    }

    pub fn get(&self, constraint: ConstraintType) -> u64 {
        self.counts[constraint.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Non-zero entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstraintType, u64)> + '_ {
        ConstraintType::ALL
            .iter()
            .map(|&c| (c, self.get(c)))
            .filter(|(_, n)| *n > 0)
    }

    /// The constraint type that rejected the most candidates.
    pub fn most_frequent(&self) -> Option<ConstraintType> {
        self.iter()
            .fold(None, |best: Option<(ConstraintType, u64)>, (c, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((c, n)),
            })
            .map(|(c, _)| c)
    }
}

/// Read-only summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationTelemetry {
    /// Seed the run's PRNG was created from.
    pub seed: u64,
    pub strategy: Strategy,
    pub elapsed: Duration,
    /// Candidate tickets evaluated by either phase.
    pub attempts: u64,
    /// Accepted tickets.
    pub successes: u64,
    pub rejections: RejectionCounts,
    /// Candidates that matched every rule but were too close to an
    /// accepted ticket.
    pub diversity_rejections: u64,
    /// Search nodes expanded by the backtracking solver.
    pub solver_nodes: u64,
}
