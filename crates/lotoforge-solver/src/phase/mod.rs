//! Ticket search phases.
//!
//! - [`RandomPhase`]: cheap rejection sampling
//! - [`BacktrackingPhase`]: exhaustive depth-first search with pruning

pub mod backtracking;
pub mod random;

use std::fmt::Debug;

use lotoforge_core::Ticket;

use crate::scope::GenerationScope;

pub use backtracking::{BacktrackingPhase, SolveOutcome};
pub use random::RandomPhase;

/// A strategy that looks for the next acceptable ticket.
///
/// A returned ticket matches every active rule and is diverse with respect
/// to the tickets already accepted in `scope`. The phase does not accept
/// it; the orchestrator does.
pub trait TicketPhase: Send + Debug {
    /// Searches for one ticket; `None` when the phase's budget ran out.
    fn next_ticket(&mut self, scope: &mut GenerationScope) -> Option<Ticket>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}
