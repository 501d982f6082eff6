//! Tests for the backtracking solver and its bounds.

use lotoforge_core::domain::{EVEN_NUMBERS, PRIME_NUMBERS};
use lotoforge_core::{ConstraintType, FilterState, NumberRange};
use lotoforge_scoring::{calculate, FilterRule};
use lotoforge_test::{low_ticket, sample_history};

use super::bounds::{CountBound, SumBound, SuffixTable};
use super::*;

fn range(min: u32, max: u32) -> NumberRange {
    NumberRange::new(min, max).unwrap()
}

fn solve(filters: &FilterSet, seed: u64) -> (Option<Ticket>, GenerationScope) {
    let mut scope = GenerationScope::new(seed);
    let mut phase = BacktrackingPhase::new(filters.clone(), None, 11, None);
    let ticket = phase.next_ticket(&mut scope);
    (ticket, scope)
}

#[test]
fn test_suffix_table_counts_members_above() {
    let table = SuffixTable::new(PRIME_NUMBERS);
    assert_eq!(table.after(0), 9);
    assert_eq!(table.after(2), 8);
    assert_eq!(table.after(22), 1);
    assert_eq!(table.after(23), 0);
    assert_eq!(table.after(25), 0);
}

#[test]
fn test_count_bound_projection() {
    // 7 or 8 evens
    let bound = CountBound::new(ConstraintType::Evens, EVEN_NUMBERS, 7, 8);

    // nothing picked: anything from 2 to 12 is reachable
    assert!(bound.is_feasible(0, 0, 15));
    // after 24 only 25 is left: one more pick adds no even
    assert!(!bound.is_feasible(6, 24, 1));
    assert!(bound.is_feasible(7, 24, 1));
    // five picks from 21..=25 force at least 2 evens
    assert!(!bound.is_feasible(7, 20, 5));
}

#[test]
fn test_sum_bound_closed_form() {
    let bound = SumBound::new(120, 120);
    assert!(bound.is_feasible(0, 0, 15));
    assert!(bound.is_feasible(1, 1, 14));
    assert!(!bound.is_feasible(2, 2, 14));

    let bound = SumBound::new(270, 270);
    assert!(bound.is_feasible(0, 0, 15));
    assert!(bound.is_feasible(11, 11, 14));
    assert!(!bound.is_feasible(10, 10, 14));
}

#[test]
fn test_finds_ticket_matching_every_rule() {
    let filters = FilterSet::from_states(&[
        FilterState::ideal(ConstraintType::Sum),
        FilterState::ideal(ConstraintType::Evens),
        FilterState::ideal(ConstraintType::Primes),
        FilterState::ideal(ConstraintType::Fibonacci),
        FilterState::ideal(ConstraintType::Frame),
        FilterState::ideal(ConstraintType::Sequences),
        FilterState::ideal(ConstraintType::MultiplesOfThree),
    ]);

    let (ticket, scope) = solve(&filters, 11);
    let ticket = ticket.expect("ideal bands are satisfiable together");
    assert!(filters.matches(&calculate(&ticket, None)));
    assert!(scope.solver_nodes() > 0);
}

#[test]
fn test_extreme_sum_yields_only_ticket() {
    let filters =
        FilterSet::new().with_rule(FilterRule::new(ConstraintType::Sum, NumberRange::exactly(120)));

    let (ticket, _) = solve(&filters, 1);
    assert_eq!(ticket, Some(low_ticket()));
}

#[test]
fn test_unsatisfiable_sum_prunes_at_root() {
    let filters = FilterSet::from_states(&[FilterState::enabled(
        ConstraintType::Sum,
        range(0, 119),
    )]);

    let (ticket, scope) = solve(&filters, 1);
    assert!(ticket.is_none());
    assert_eq!(scope.solver_nodes(), 0);
}

#[test]
fn test_contradictory_duplicate_rules_prune_at_root() {
    let filters = FilterSet::new()
        .with_rule(FilterRule::new(ConstraintType::Primes, range(2, 3)))
        .with_rule(FilterRule::new(ConstraintType::Primes, range(6, 7)));

    let (ticket, scope) = solve(&filters, 1);
    assert!(ticket.is_none());
    assert_eq!(scope.solver_nodes(), 0);
}

#[test]
fn test_same_seed_same_ticket() {
    let filters = FilterSet::from_states(&[
        FilterState::ideal(ConstraintType::Center),
        FilterState::ideal(ConstraintType::Fibonacci),
    ]);

    let (a, _) = solve(&filters, 2024);
    let (b, _) = solve(&filters, 2024);
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[test]
fn test_repeats_use_reference_draw() {
    let history = sample_history();
    let last = history.last_draw().unwrap().ticket();
    let filters = FilterSet::from_states(&[FilterState::enabled(
        ConstraintType::Repeats,
        range(13, 13),
    )]);

    let mut scope = GenerationScope::new(8);
    let mut phase = BacktrackingPhase::new(filters.clone(), Some(last.mask()), 11, None);
    let ticket = phase.next_ticket(&mut scope).unwrap();

    assert_eq!(ticket.shared_with(last.mask()), 13);
    assert!(filters.matches(&calculate(&ticket, Some(last))));
}

#[test]
fn test_sequences_checked_at_leaves() {
    let filters = FilterSet::from_states(&[FilterState::enabled(
        ConstraintType::Sequences,
        range(3, 4),
    )]);

    let (ticket, _) = solve(&filters, 77);
    let ticket = ticket.unwrap();
    let runs = calculate(&ticket, None).get(ConstraintType::Sequences);
    assert!((3..=4).contains(&runs), "runs = {runs}");
}

#[test]
fn test_output_is_diverse_from_accepted() {
    let mut scope = GenerationScope::new(5);
    let mut phase = BacktrackingPhase::new(FilterSet::new(), None, 9, None);

    for _ in 0..3 {
        let ticket = phase.next_ticket(&mut scope).unwrap();
        assert!(scope.is_diverse(ticket.mask(), 9));
        scope.accept(ticket);
    }
}

#[test]
fn test_impossible_diversity_returns_none() {
    // two 15-of-25 tickets always share at least 5 numbers
    let mut scope = GenerationScope::new(5);
    scope.accept(low_ticket());
    let mut phase = BacktrackingPhase::new(FilterSet::new(), None, 5, None);

    assert!(phase.next_ticket(&mut scope).is_none());
    assert_eq!(scope.solver_nodes(), 0);
}

#[test]
fn test_node_limit_stops_search() {
    // a leaf is fifteen nodes deep
    let mut scope = GenerationScope::new(3);
    let phase = BacktrackingPhase::new(FilterSet::new(), None, 11, Some(10));

    assert_eq!(phase.solve(&mut scope, None), SolveOutcome::Interrupted);
    assert_eq!(scope.solver_nodes(), 10);
}

#[test]
fn test_passed_deadline_interrupts_unbounded_search() {
    let filters = FilterSet::from_states(&[FilterState::enabled(
        ConstraintType::Sum,
        NumberRange::exactly(120),
    )]);
    let mut scope = GenerationScope::new(3);
    let phase = BacktrackingPhase::new(filters, None, 11, None);

    let outcome = phase.solve(&mut scope, Some(Instant::now()));
    assert_eq!(outcome, SolveOutcome::Interrupted);
    assert_eq!(scope.solver_nodes(), 0);
}

#[test]
fn test_exhausted_is_not_interrupted() {
    let filters = FilterSet::from_states(&[FilterState::enabled(
        ConstraintType::Sum,
        range(0, 119),
    )]);
    let mut scope = GenerationScope::new(1);
    let phase = BacktrackingPhase::new(filters.clone(), None, 11, Some(10));
    assert_eq!(phase.solve(&mut scope, None), SolveOutcome::Exhausted);

    // the only sum-120 ticket is already taken
    let mut scope = GenerationScope::new(1);
    scope.accept(Ticket::new(1..=15).unwrap());
    let filters = FilterSet::from_states(&[FilterState::enabled(
        ConstraintType::Sum,
        NumberRange::exactly(120),
    )]);
    let phase = BacktrackingPhase::new(filters, None, 11, None);
    let far = Instant::now() + std::time::Duration::from_secs(60);
    assert_eq!(phase.solve(&mut scope, Some(far)), SolveOutcome::Exhausted);
}
