//! LotoForge - constrained 15-of-25 ticket generation in Rust
//!
//! Generates tickets that satisfy a set of simultaneous statistical
//! filters (sum, parity, primes, frame, repeats from the last draw, ..)
//! and checks tickets against past draws.
//!
//! # Example
//!
//! ```rust
//! use lotoforge::prelude::*;
//!
//! let ticket = Ticket::new([1, 2, 3, 5, 7, 8, 10, 12, 13, 16, 18, 20, 21, 23, 25]).unwrap();
//! let metrics = calculate(&ticket, None);
//! assert_eq!(metrics.get(ConstraintType::Evens), 7);
//!
//! let analysis = analyze(ticket.numbers(), None);
//! assert!(analysis.score <= 100);
//! ```

// Domain model
pub use lotoforge_core::{
    ConstraintType, Draw, DrawHistory, FilterState, GeneratedMetrics, LotoError, NumberMask,
    NumberRange, Ticket, MAX_NUMBER, TICKET_SIZE,
};

// Configuration
pub use lotoforge_config::{
    ConfigError, FilterConfig, GenerationConfig, GenerationProfile, GenerationSettings,
};

// Metrics, analysis and filter rules
pub use lotoforge_scoring::{
    analyze, calculate, ConstraintEvaluation, FilterRule, FilterSet, Status, TicketAnalysis,
};

// Generation engine and historical checks
pub use lotoforge_solver::{
    check, check_many, generate, spawn_generation, CheckResult, ContestHit, FailureReason,
    GenerationError, GenerationEvent, GenerationHandle, GenerationOutcome, GenerationPhase,
    GenerationRequest, GenerationTelemetry, HistoryProvider, HistoryStatistics, StatisticsCache,
    Strategy, TicketSink,
};

#[cfg(feature = "console")]
pub mod console;

mod service;
pub use service::LotoForge;

pub mod prelude {
    pub use super::{analyze, calculate, check, generate};
    pub use super::{
        CheckResult, ConstraintType, Draw, DrawHistory, FilterState, GenerationConfig,
        GenerationEvent, GenerationOutcome, GenerationRequest, LotoForge, NumberRange, Status,
        Ticket,
    };
    pub use super::{HistoryProvider, TicketSink};
}
