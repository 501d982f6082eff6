//! Ticket generation engine for LotoForge.
//!
//! This crate provides:
//! - [`generate`]: the generation orchestrator (random phase, then backtracking)
//! - [`spawn_generation`]: the orchestrator on a background thread with a
//!   cancellable [`GenerationHandle`]
//! - [`check`] / [`check_many`]: hit counts of tickets against past draws
//! - [`HistoryStatistics`] and [`StatisticsCache`]: aggregates over a
//!   window of draws
//!
//! Progress is streamed as [`GenerationEvent`]s over a tokio unbounded
//! channel.
//!
//! Logging levels:
//! - **INFO**: run start/end, failures
//! - **DEBUG**: accepted tickets and phase switches
//! - **TRACE**: individual rejections

pub mod check;
pub mod error;
pub mod event;
pub mod generator;
pub mod handle;
pub mod history_stats;
pub mod phase;
pub mod provider;
pub mod scope;
pub mod telemetry;
pub mod termination;

pub use check::{check, check_many, CheckResult, ContestHit, PRIZE_THRESHOLD, RECENT_WINDOW};
pub use error::GenerationError;
pub use event::{FailureReason, GenerationEvent, GenerationPhase};
pub use generator::{
    generate, generate_with_termination, GenerationOutcome, GenerationRequest,
};
pub use handle::{spawn_generation, GenerationHandle};
pub use history_stats::{ConstraintSummary, HistoryStatistics, StatisticsCache};
pub use phase::{BacktrackingPhase, RandomPhase, SolveOutcome, TicketPhase};
pub use provider::{HistoryProvider, TicketSink};
pub use scope::GenerationScope;
pub use telemetry::{GenerationTelemetry, RejectionCounts, Strategy};
pub use termination::{ExternalTermination, Termination, TimeSinceAcceptanceTermination};
