//! Backtracking ticket solver.
//!
//! Depth-first search over ascending number choices. Picking only numbers
//! larger than the previous pick gives set semantics without permutation
//! duplicates. Every node is checked against the [`bounds`] before the
//! search descends into it; complete tickets are validated once more by the
//! full rule matcher, which also covers rules with no partial bound.

mod bounds;

use std::time::Instant;

use lotoforge_core::{NumberMask, Ticket, MAX_NUMBER};
use lotoforge_scoring::{calculate_mask, FilterSet};
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use self::bounds::{is_diverse_feasible, Node, SearchBounds};
use super::TicketPhase;
use crate::scope::GenerationScope;

/// Finds one valid ticket per call by exhaustive search.
///
/// Candidate numbers are visited in an order shuffled once per call, so
/// repeated calls explore different branches. The search is deterministic
/// for a fixed scope seed. An optional node limit, and the deadline given
/// to [`solve`](Self::solve), bound the work of a single call.
///
/// # Example
///
/// ```
/// use lotoforge_core::{ConstraintType, FilterState};
/// use lotoforge_scoring::{calculate, FilterSet};
/// use lotoforge_solver::{BacktrackingPhase, GenerationScope, TicketPhase};
///
/// let filters = FilterSet::from_states(&[
///     FilterState::ideal(ConstraintType::Sum),
///     FilterState::ideal(ConstraintType::Primes),
///     FilterState::ideal(ConstraintType::Frame),
/// ]);
/// let mut phase = BacktrackingPhase::new(filters.clone(), None, 11, None);
/// let mut scope = GenerationScope::new(42);
///
/// let ticket = phase.next_ticket(&mut scope).unwrap();
/// assert!(filters.matches(&calculate(&ticket, None)));
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackingPhase {
    filters: FilterSet,
    reference: Option<NumberMask>,
    diversity_threshold: u32,
    node_limit: Option<u64>,
    bounds: SearchBounds,
}

impl BacktrackingPhase {
    pub fn new(
        filters: FilterSet,
        reference: Option<NumberMask>,
        diversity_threshold: u32,
        node_limit: Option<u64>,
    ) -> Self {
        let bounds = SearchBounds::from_filters(&filters, reference);
        debug!(
            event = "solver_init",
            rules = filters.len(),
            suffix_tables = bounds.count_bounds().len(),
            node_limit = ?node_limit,
        );
        Self {
            filters,
            reference,
            diversity_threshold,
            node_limit,
            bounds,
        }
    }
}

/// Nodes expanded between two deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 4_096;

/// Result of one [`BacktrackingPhase::solve`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Found(Ticket),
    /// The whole tree was explored: no further ticket exists.
    Exhausted,
    /// The node limit or the deadline stopped the call early.
    Interrupted,
}

impl SolveOutcome {
    pub fn into_ticket(self) -> Option<Ticket> {
        match self {
            SolveOutcome::Found(ticket) => Some(ticket),
            SolveOutcome::Exhausted | SolveOutcome::Interrupted => None,
        }
    }
}

/// State of one `solve` call.
struct Search<'a> {
    scope: &'a mut GenerationScope,
    order: [u8; MAX_NUMBER as usize],
    accepted: Vec<NumberMask>,
    nodes: u64,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    interrupted: bool,
}

impl Search<'_> {
    /// True once the node limit or the deadline is reached; sticky.
    fn should_stop(&mut self) -> bool {
        if !self.interrupted {
            let over_nodes = self.node_limit.is_some_and(|limit| self.nodes >= limit);
            let over_time = self.nodes % DEADLINE_CHECK_INTERVAL == 0
                && self.deadline.is_some_and(|d| Instant::now() >= d);
            self.interrupted = over_nodes || over_time;
        }
        self.interrupted
    }
}

impl BacktrackingPhase {
    fn is_feasible(&self, node: &Node, search: &Search<'_>) -> bool {
        self.bounds.is_feasible(node)
            && is_diverse_feasible(node, &search.accepted, self.diversity_threshold)
    }

    fn search(&self, node: &Node, search: &mut Search<'_>) -> Option<Ticket> {
        for i in 0..search.order.len() {
            let n = search.order[i];
            if n <= node.last {
                continue;
            }
            if search.should_stop() {
                return None;
            }
            search.nodes += 1;

            let child = node.push(n, &self.bounds);
            if !self.is_feasible(&child, search) {
                continue;
            }
            let found = if child.is_complete() {
                self.validate(child.mask, search.scope)
            } else {
                self.search(&child, search)
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Full rule check of a complete ticket.
    fn validate(&self, mask: NumberMask, scope: &mut GenerationScope) -> Option<Ticket> {
        scope.record_attempt();
        let metrics = calculate_mask(mask, self.reference);
        if let Some(constraint) = self.filters.first_failure(&metrics) {
            trace!(event = "rejected", phase = "backtracking", constraint = %constraint);
            scope.record_rejection(constraint);
            return None;
        }
        Ticket::from_mask(mask).ok()
    }
}

impl BacktrackingPhase {
    /// Searches for one ticket, stopping early at the node limit or at
    /// `deadline`.
    ///
    /// Only [`SolveOutcome::Exhausted`] proves that no acceptable ticket is
    /// left; an interrupted call may succeed when repeated, since every call
    /// visits the numbers in a new order.
    pub fn solve(&self, scope: &mut GenerationScope, deadline: Option<Instant>) -> SolveOutcome {
        let mut order: [u8; MAX_NUMBER as usize] = std::array::from_fn(|i| i as u8 + 1);
        order.shuffle(scope.rng());
        let accepted = scope.accepted().iter().map(Ticket::mask).collect();

        let mut search = Search {
            scope: &mut *scope,
            order,
            accepted,
            nodes: 0,
            node_limit: self.node_limit,
            deadline,
            interrupted: false,
        };
        let found = if self.is_feasible(&Node::ROOT, &search) {
            self.search(&Node::ROOT, &mut search)
        } else {
            None
        };

        let nodes = search.nodes;
        let interrupted = search.interrupted;
        scope.record_solver_nodes(nodes);
        debug!(
            event = "solver_end",
            found = found.is_some(),
            nodes,
            interrupted,
        );
        match found {
            Some(ticket) => SolveOutcome::Found(ticket),
            None if interrupted => SolveOutcome::Interrupted,
            None => SolveOutcome::Exhausted,
        }
    }
}

impl TicketPhase for BacktrackingPhase {
    fn next_ticket(&mut self, scope: &mut GenerationScope) -> Option<Ticket> {
        self.solve(scope, None).into_ticket()
    }

    fn phase_type_name(&self) -> &'static str {
        "Backtracking"
    }
}

#[cfg(test)]
mod tests;
