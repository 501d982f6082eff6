//! Termination conditions checked at every orchestrator loop boundary.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::scope::GenerationScope;

/// Decides whether a run should stop.
pub trait Termination: Send + Debug {
    fn is_terminated(&self, scope: &GenerationScope) -> bool;
}

/// Terminates when no ticket was accepted for `limit`.
///
/// The clock restarts at every acceptance, so a slow but steady run keeps
/// going.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use lotoforge_solver::{GenerationScope, Termination, TimeSinceAcceptanceTermination};
///
/// let term = TimeSinceAcceptanceTermination::seconds(10);
/// let mut scope = GenerationScope::new(0);
/// scope.start_generation();
/// assert!(!term.is_terminated(&scope));
/// ```
#[derive(Debug, Clone)]
pub struct TimeSinceAcceptanceTermination {
    limit: Duration,
}

impl TimeSinceAcceptanceTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time left before this termination fires.
    pub fn remaining(&self, scope: &GenerationScope) -> Duration {
        self.limit.saturating_sub(scope.since_last_success())
    }
}

impl Termination for TimeSinceAcceptanceTermination {
    fn is_terminated(&self, scope: &GenerationScope) -> bool {
        scope.since_last_success() >= self.limit
    }
}

/// Terminates when an external flag is set.
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _scope: &GenerationScope) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
