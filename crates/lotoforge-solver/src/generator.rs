//! Generation orchestrator.
//!
//! Drives the random phase, escalates to the backtracking solver when
//! random sampling runs out of attempts, and stops when the requested
//! quantity is reached, the solver proves no further ticket exists, or no
//! ticket was accepted for the configured timeout. A solver call stopped by
//! its node limit is retried with a fresh candidate order.

use std::sync::atomic::AtomicBool;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use lotoforge_config::GenerationConfig;
use lotoforge_core::{DrawHistory, FilterState, Ticket};
use lotoforge_scoring::FilterSet;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::GenerationError;
use crate::event::{FailureReason, GenerationEvent, GenerationPhase};
use crate::phase::{BacktrackingPhase, RandomPhase, SolveOutcome, TicketPhase};
use crate::scope::GenerationScope;
use crate::telemetry::{GenerationTelemetry, Strategy};
use crate::termination::{ExternalTermination, Termination, TimeSinceAcceptanceTermination};

/// Everything one generation run needs besides the draw history.
///
/// # Example
///
/// ```
/// use lotoforge_config::GenerationConfig;
/// use lotoforge_core::{ConstraintType, FilterState};
/// use lotoforge_solver::GenerationRequest;
///
/// let request = GenerationRequest::new(
///     3,
///     vec![FilterState::ideal(ConstraintType::Sum)],
///     GenerationConfig::default(),
/// )
/// .unwrap()
/// .with_seed(42);
/// assert_eq!(request.quantity(), 3);
///
/// assert!(GenerationRequest::new(0, vec![], GenerationConfig::default()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    quantity: u32,
    filters: Vec<FilterState>,
    config: GenerationConfig,
    seed: Option<u64>,
}

impl GenerationRequest {
    pub fn new(
        quantity: u32,
        filters: Vec<FilterState>,
        config: GenerationConfig,
    ) -> Result<Self, GenerationError> {
        if quantity == 0 {
            return Err(GenerationError::InvalidQuantity);
        }
        Ok(Self {
            quantity,
            filters,
            config,
            seed: None,
        })
    }

    /// Fixes the PRNG seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn filters(&self) -> &[FilterState] {
        &self.filters
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// How a run ended. Mirrors the terminal event, plus cancellation.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Finished {
        tickets: Vec<Ticket>,
        telemetry: GenerationTelemetry,
    },
    Failed {
        reason: FailureReason,
        telemetry: GenerationTelemetry,
    },
    /// Stopped by the caller; no terminal event was emitted.
    Cancelled,
}

impl GenerationOutcome {
    /// Accepted tickets; empty unless the run finished.
    pub fn tickets(&self) -> &[Ticket] {
        match self {
            GenerationOutcome::Finished { tickets, .. } => tickets,
            _ => &[],
        }
    }

    pub fn telemetry(&self) -> Option<&GenerationTelemetry> {
        match self {
            GenerationOutcome::Finished { telemetry, .. }
            | GenerationOutcome::Failed { telemetry, .. } => Some(telemetry),
            GenerationOutcome::Cancelled => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, GenerationOutcome::Finished { .. })
    }
}

/// Seed for runs that did not ask for one.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Runs one generation request to completion.
///
/// Progress events go to `sender` in emission order; a dropped receiver
/// does not stop the run. The returned outcome matches the terminal
/// event.
///
/// # Example
///
/// ```
/// use lotoforge_config::GenerationConfig;
/// use lotoforge_core::{ConstraintType, DrawHistory, FilterState};
/// use lotoforge_solver::{generate, GenerationEvent, GenerationRequest};
/// use tokio::sync::mpsc;
///
/// let request = GenerationRequest::new(
///     2,
///     vec![FilterState::ideal(ConstraintType::Primes)],
///     GenerationConfig::default(),
/// )
/// .unwrap()
/// .with_seed(7);
///
/// let (sender, mut receiver) = mpsc::unbounded_channel();
/// let outcome = generate(&request, &DrawHistory::new(), sender);
/// assert_eq!(outcome.tickets().len(), 2);
///
/// let mut last = None;
/// while let Ok(event) = receiver.try_recv() {
///     last = Some(event);
/// }
/// assert!(matches!(last, Some(GenerationEvent::Finished { .. })));
/// ```
pub fn generate(
    request: &GenerationRequest,
    history: &DrawHistory,
    sender: mpsc::UnboundedSender<GenerationEvent>,
) -> GenerationOutcome {
    generate_with_termination(request, history, None, sender)
}

/// Like [`generate`], additionally stopping when `terminate` is set.
///
/// The flag is checked before every emitted event, so once it is set the
/// stream ends without a terminal event.
pub fn generate_with_termination(
    request: &GenerationRequest,
    history: &DrawHistory,
    terminate: Option<&AtomicBool>,
    sender: mpsc::UnboundedSender<GenerationEvent>,
) -> GenerationOutcome {
    let seed = request.seed.unwrap_or_else(clock_seed);
    let mut run = Run {
        request,
        filters: FilterSet::from_states(&request.filters),
        scope: GenerationScope::new(seed),
        cancel: terminate.map(ExternalTermination::new),
        sender,
    };
    run.execute(history)
}

/// Cancellation was observed; unwinds the run without further events.
struct Cancelled;

struct Run<'a> {
    request: &'a GenerationRequest,
    filters: FilterSet,
    scope: GenerationScope,
    cancel: Option<ExternalTermination<'a>>,
    sender: mpsc::UnboundedSender<GenerationEvent>,
}

impl Run<'_> {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|c| c.is_terminated(&self.scope))
    }

    fn emit(&self, event: GenerationEvent) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        let _ = self.sender.send(event);
        Ok(())
    }

    fn execute(&mut self, history: &DrawHistory) -> GenerationOutcome {
        match self.run(history) {
            Ok(outcome) => outcome,
            Err(Cancelled) => {
                info!(
                    event = "generation_cancelled",
                    accepted = self.scope.accepted_count(),
                );
                GenerationOutcome::Cancelled
            }
        }
    }

    fn run(&mut self, history: &DrawHistory) -> Result<GenerationOutcome, Cancelled> {
        let request = self.request;
        let config = request.config();
        let quantity = request.quantity;
        let estimated_success_rate = self.filters.estimated_success_rate();

        info!(
            event = "generation_start",
            quantity,
            rules = self.filters.len(),
            estimated_success_rate,
            seed = self.scope.seed(),
            solver_enabled = config.solver_enabled(),
        );
        self.emit(GenerationEvent::Started {
            quantity,
            estimated_success_rate,
        })?;

        let reference = history.last_draw().map(|d| d.ticket().mask());
        if self.filters.requires_history() && reference.is_none() {
            return self.fail(FailureReason::NoHistory, Strategy::Heuristic);
        }

        let timeout = TimeSinceAcceptanceTermination::new(config.timeout());
        let mut random = RandomPhase::new(
            self.filters.clone(),
            reference,
            config.max_random_attempts(),
            config.diversity_threshold(),
        );
        let mut solver: Option<BacktrackingPhase> = None;
        let mut strategy = Strategy::Heuristic;

        self.scope.start_generation();
        while (self.scope.accepted_count() as u32) < quantity {
            if self.is_cancelled() {
                return Err(Cancelled);
            }
            if timeout.is_terminated(&self.scope) {
                info!(
                    event = "generation_timeout",
                    accepted = self.scope.accepted_count(),
                    timeout_ms = config.timeout().as_millis() as u64,
                );
                strategy = Strategy::Fallback;
                break;
            }

            let current = self.scope.accepted_count() as u32 + 1;
            self.emit(GenerationEvent::Step {
                phase: GenerationPhase::Random,
                current,
            })?;
            let mut found = random.next_ticket(&mut self.scope);
            let mut phase = GenerationPhase::Random;

            if found.is_none() && config.solver_enabled() {
                debug!(
                    event = "phase_switch",
                    from = random.phase_type_name(),
                    to = "Backtracking",
                    current,
                );
                self.emit(GenerationEvent::Step {
                    phase: GenerationPhase::Backtracking,
                    current,
                })?;
                let solver = solver.get_or_insert_with(|| {
                    BacktrackingPhase::new(
                        self.filters.clone(),
                        reference,
                        config.diversity_threshold(),
                        config.solver_node_limit(),
                    )
                });
                let deadline = Instant::now() + timeout.remaining(&self.scope);
                match solver.solve(&mut self.scope, Some(deadline)) {
                    SolveOutcome::Found(ticket) => found = Some(ticket),
                    SolveOutcome::Interrupted => {
                        debug!(event = "search_interrupted", current);
                        continue;
                    }
                    SolveOutcome::Exhausted => {}
                }
                phase = GenerationPhase::Backtracking;
            }

            let Some(ticket) = found else {
                debug!(event = "search_exhausted", current);
                strategy = Strategy::Fallback;
                break;
            };
            if phase == GenerationPhase::Backtracking && strategy == Strategy::Heuristic {
                strategy = Strategy::Backtracking;
            }
            debug!(event = "ticket_accepted", current, phase = %phase, ticket = %ticket);
            self.scope.accept(ticket);
            self.emit(GenerationEvent::Attempt {
                current,
                total: quantity,
            })?;
        }

        if self.scope.accepted_count() == 0 {
            let reason = if self.filters.is_empty() {
                FailureReason::GenericError
            } else {
                FailureReason::FiltersTooStrict
            };
            return self.fail(reason, strategy);
        }

        let telemetry = self.scope.telemetry(strategy);
        let tickets = self.scope.accepted().to_vec();
        info!(
            event = "generation_end",
            strategy = %strategy,
            tickets = tickets.len(),
            attempts = telemetry.attempts,
            solver_nodes = telemetry.solver_nodes,
            elapsed_ms = telemetry.elapsed.as_millis() as u64,
        );
        self.emit(GenerationEvent::Finished {
            tickets: tickets.clone(),
            telemetry: telemetry.clone(),
        })?;
        Ok(GenerationOutcome::Finished { tickets, telemetry })
    }

    fn fail(
        &self,
        reason: FailureReason,
        strategy: Strategy,
    ) -> Result<GenerationOutcome, Cancelled> {
        let telemetry = self.scope.telemetry(strategy);
        info!(
            event = "generation_failed",
            reason = %reason,
            attempts = telemetry.attempts,
            rejections = telemetry.rejections.total(),
            most_rejected = ?telemetry.rejections.most_frequent(),
        );
        self.emit(GenerationEvent::Failed { reason })?;
        Ok(GenerationOutcome::Failed { reason, telemetry })
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
