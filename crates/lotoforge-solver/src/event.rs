//! Progress events emitted by a generation run.

use std::fmt;

use lotoforge_core::Ticket;

use crate::telemetry::GenerationTelemetry;

/// The phase currently searching for the next ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GenerationPhase {
    Random,
    Backtracking,
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationPhase::Random => f.write_str("random"),
            GenerationPhase::Backtracking => f.write_str("backtracking"),
        }
    }
}

/// Why a run produced no ticket at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum FailureReason {
    /// A rule needs the last draw and the history is empty.
    NoHistory,
    /// Rules are active but nothing satisfying them was found in budget.
    FiltersTooStrict,
    /// No rules were active and still nothing was produced.
    GenericError,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::NoHistory => "NO_HISTORY",
            FailureReason::FiltersTooStrict => "FILTERS_TOO_STRICT",
            FailureReason::GenericError => "GENERIC_ERROR",
        };
        f.write_str(name)
    }
}

/// One step of a run's progress stream.
///
/// A run emits `Started` first and then exactly one terminal event
/// (`Finished` or `Failed`), unless it is cancelled, in which case the
/// stream simply ends.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GenerationEvent {
    Started {
        quantity: u32,
        /// Rough probability that a random ticket passes the active rules.
        estimated_success_rate: f64,
    },
    /// `phase` started looking for ticket number `current` (1-based).
    Step {
        phase: GenerationPhase,
        current: u32,
    },
    /// Ticket number `current` of `total` was accepted.
    Attempt { current: u32, total: u32 },
    Finished {
        tickets: Vec<Ticket>,
        telemetry: GenerationTelemetry,
    },
    Failed { reason: FailureReason },
}

impl GenerationEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationEvent::Finished { .. } | GenerationEvent::Failed { .. }
        )
    }
}
