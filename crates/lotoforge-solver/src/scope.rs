//! Run-level scope.

use std::time::{Duration, Instant};

use lotoforge_core::{ConstraintType, NumberMask, Ticket};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::telemetry::{GenerationTelemetry, RejectionCounts, Strategy};

/// Mutable state of one generation run.
///
/// Owns the PRNG, the accepted tickets and every counter reported in the
/// telemetry. Nothing here is shared across runs or threads.
pub struct GenerationScope {
    rng: ChaCha8Rng,
    seed: u64,
    accepted: Vec<Ticket>,
    rejections: RejectionCounts,
    diversity_rejections: u64,
    attempts: u64,
    solver_nodes: u64,
    start_time: Option<Instant>,
    last_success: Option<Instant>,
}

impl GenerationScope {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            accepted: Vec::new(),
            rejections: RejectionCounts::default(),
            diversity_rejections: 0,
            attempts: 0,
            solver_nodes: 0,
            start_time: None,
            last_success: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn start_generation(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.last_success = Some(now);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Time since the last accepted ticket, or since the run started.
    pub fn since_last_success(&self) -> Duration {
        self.last_success.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn accepted(&self) -> &[Ticket] {
        &self.accepted
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn accept(&mut self, ticket: Ticket) {
        self.accepted.push(ticket);
        self.last_success = Some(Instant::now());
    }

    /// True if no accepted ticket shares `threshold` or more numbers with
    /// `mask`.
    pub fn is_diverse(&self, mask: NumberMask, threshold: u32) -> bool {
        self.accepted
            .iter()
            .all(|t| t.shared_with(mask) < threshold)
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub fn record_rejection(&mut self, constraint: ConstraintType) {
        self.rejections.record(constraint);
    }

    pub fn record_diversity_rejection(&mut self) {
        self.diversity_rejections += 1;
    }

    pub fn record_solver_nodes(&mut self, nodes: u64) {
        self.solver_nodes += nodes;
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn rejections(&self) -> &RejectionCounts {
        &self.rejections
    }

    pub fn diversity_rejections(&self) -> u64 {
        self.diversity_rejections
    }

    pub fn solver_nodes(&self) -> u64 {
        self.solver_nodes
    }

    /// Snapshot of the run counters.
    pub fn telemetry(&self, strategy: Strategy) -> GenerationTelemetry {
        GenerationTelemetry {
            seed: self.seed,
            strategy,
            elapsed: self.elapsed(),
            attempts: self.attempts,
            successes: self.accepted.len() as u64,
            rejections: self.rejections.clone(),
            diversity_rejections: self.diversity_rejections,
            solver_nodes: self.solver_nodes,
        }
    }

    pub fn into_tickets(self) -> Vec<Ticket> {
        self.accepted
    }
}

impl std::fmt::Debug for GenerationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationScope")
            .field("seed", &self.seed)
            .field("accepted", &self.accepted.len())
            .field("attempts", &self.attempts)
            .finish()
    }
}
