//! Random rejection-sampling phase.

use lotoforge_core::{NumberMask, Ticket, MAX_NUMBER, TICKET_SIZE};
use lotoforge_scoring::{calculate_mask, FilterSet};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::TicketPhase;
use crate::scope::GenerationScope;

/// Samples uniformly random tickets until one passes.
///
/// Each attempt shuffles `1..=25` and takes the first fifteen numbers. A
/// candidate failing a rule is charged to the first failing rule in
/// declaration order; a candidate passing every rule but sharing too many
/// numbers with an accepted ticket is counted as a diversity rejection.
#[derive(Debug, Clone)]
pub struct RandomPhase {
    filters: FilterSet,
    reference: Option<NumberMask>,
    max_attempts: u32,
    diversity_threshold: u32,
}

impl RandomPhase {
    pub fn new(
        filters: FilterSet,
        reference: Option<NumberMask>,
        max_attempts: u32,
        diversity_threshold: u32,
    ) -> Self {
        Self {
            filters,
            reference,
            max_attempts,
            diversity_threshold,
        }
    }
}

/// Shuffle-and-take over the full number range.
pub(crate) fn random_mask<R: Rng + ?Sized>(rng: &mut R) -> NumberMask {
    let mut pool: [u8; MAX_NUMBER as usize] = std::array::from_fn(|i| i as u8 + 1);
    pool.shuffle(rng);
    NumberMask::of(&pool[..TICKET_SIZE])
}

impl TicketPhase for RandomPhase {
    fn next_ticket(&mut self, scope: &mut GenerationScope) -> Option<Ticket> {
        for _ in 0..self.max_attempts {
            scope.record_attempt();
            let mask = random_mask(scope.rng());

            let metrics = calculate_mask(mask, self.reference);
            if let Some(constraint) = self.filters.first_failure(&metrics) {
                trace!(event = "rejected", phase = "random", constraint = %constraint);
                scope.record_rejection(constraint);
                continue;
            }
            if !scope.is_diverse(mask, self.diversity_threshold) {
                trace!(event = "rejected", phase = "random", reason = "diversity");
                scope.record_diversity_rejection();
                continue;
            }
            match Ticket::from_mask(mask) {
                Ok(ticket) => return Some(ticket),
                Err(_) => continue,
            }
        }
        None
    }

    fn phase_type_name(&self) -> &'static str {
        "Random"
    }
}
