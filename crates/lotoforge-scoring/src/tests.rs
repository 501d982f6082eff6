//! Tests for metrics, analysis and filter rules.

use lotoforge_core::{ConstraintType, FilterState, NumberRange};
use lotoforge_test::{high_ticket, low_ticket, sample_history, ticket};

use super::*;

fn range(min: u32, max: u32) -> NumberRange {
    NumberRange::new(min, max).unwrap()
}

#[test]
fn test_calculate_without_reference() {
    let metrics = calculate(&high_ticket(), None);

    assert_eq!(metrics.get(ConstraintType::Sum), 270);
    // 12, 14, .., 24
    assert_eq!(metrics.get(ConstraintType::Evens), 7);
    // 11, 13, 17, 19, 23
    assert_eq!(metrics.get(ConstraintType::Primes), 5);
    // 13, 21
    assert_eq!(metrics.get(ConstraintType::Fibonacci), 2);
    assert_eq!(metrics.get(ConstraintType::Repeats), 0);
}

#[test]
fn test_calculate_repeats_against_last_draw() {
    let history = sample_history();
    let last = history.last_draw().unwrap();
    let metrics = calculate(last.ticket(), Some(last.ticket()));

    assert_eq!(metrics.get(ConstraintType::Repeats), 15);
}

#[test]
fn test_rule_bounds_are_inclusive() {
    let metrics = calculate(&low_ticket(), None);

    assert!(FilterRule::new(ConstraintType::Sum, range(120, 150)).matches(&metrics));
    assert!(FilterRule::new(ConstraintType::Sum, range(100, 120)).matches(&metrics));
    assert!(!FilterRule::new(ConstraintType::Sum, range(121, 150)).matches(&metrics));
}

#[test]
fn test_disabled_states_produce_no_rules() {
    let filters = FilterSet::from_states(&[
        FilterState::disabled(ConstraintType::Sum),
        FilterState::disabled(ConstraintType::Primes),
    ]);
    assert!(filters.is_empty());
    assert!(filters.matches(&calculate(&low_ticket(), None)));
    assert_eq!(filters.estimated_success_rate(), 1.0);
}

#[test]
fn test_first_failure_follows_declaration_order() {
    let metrics = calculate(&low_ticket(), None);
    let filters = FilterSet::from_states(&[
        FilterState::enabled(ConstraintType::Center, range(0, 1)),
        FilterState::enabled(ConstraintType::Sum, range(200, 220)),
    ]);

    assert!(!filters.matches(&metrics));
    assert_eq!(filters.first_failure(&metrics), Some(ConstraintType::Center));
}

#[test]
fn test_combined_bound_intersects_duplicates() {
    let filters = FilterSet::new()
        .with_rule(FilterRule::new(ConstraintType::Sum, range(150, 220)))
        .with_rule(FilterRule::new(ConstraintType::Sum, range(180, 260)));

    assert_eq!(filters.combined_bound(ConstraintType::Sum), Some((180, 220)));
    assert_eq!(filters.combined_bound(ConstraintType::Evens), None);
    // counted once in the estimate
    assert_eq!(
        filters.estimated_success_rate(),
        ConstraintType::Sum.historical_success_rate()
    );
}

#[test]
fn test_requires_history() {
    let without = FilterSet::from_states(&[FilterState::ideal(ConstraintType::Sum)]);
    let with = FilterSet::from_states(&[FilterState::ideal(ConstraintType::Repeats)]);
    assert!(!without.requires_history());
    assert!(with.requires_history());
}

#[test]
fn test_status_classification() {
    assert_eq!(Status::classify(ConstraintType::Evens, 7), Status::Excellent);
    assert_eq!(Status::classify(ConstraintType::Evens, 9), Status::Good);
    assert_eq!(Status::classify(ConstraintType::Evens, 10), Status::Warning);
    assert_eq!(Status::classify(ConstraintType::Evens, 12), Status::Bad);
    assert_eq!(Status::classify(ConstraintType::Sum, 155), Status::Warning);
    assert_eq!(Status::classify(ConstraintType::Sum, 120), Status::Bad);
}

#[test]
fn test_analyze_wrong_cardinality_is_bad() {
    let fourteen: Vec<u8> = (1..=14).collect();
    let analysis = analyze(&fourteen, None);

    assert_eq!(analysis.score, 0);
    assert_eq!(analysis.status, Status::Bad);
    assert!(analysis.evaluations.is_empty());
}

#[test]
fn test_analyze_rejects_duplicates_and_out_of_range() {
    let mut numbers: Vec<u8> = (1..=15).collect();
    numbers[14] = 1;
    assert_eq!(analyze(&numbers, None), TicketAnalysis::invalid());

    numbers[14] = 26;
    assert_eq!(analyze(&numbers, None), TicketAnalysis::invalid());
}

#[test]
fn test_analyze_skips_repeats_without_reference() {
    let analysis = analyze(low_ticket().numbers(), None);
    assert_eq!(analysis.evaluations.len(), ConstraintType::COUNT - 1);
    assert!(analysis.evaluation(ConstraintType::Repeats).is_none());

    let reference = high_ticket();
    let analysis = analyze(low_ticket().numbers(), Some(&reference));
    assert_eq!(analysis.evaluations.len(), ConstraintType::COUNT);
    assert_eq!(
        analysis.evaluation(ConstraintType::Repeats).map(|e| e.value),
        Some(5)
    );
}

#[test]
fn test_analyze_balanced_ticket_scores_high() {
    // sum 204, 7 evens, 6 primes, 4 fibonacci, 10 frame, 2 runs,
    // 5 multiples of 3, 5 center
    let balanced = ticket(&[2, 3, 4, 6, 11, 13, 14, 15, 16, 17, 18, 19, 20, 21, 25]);
    let analysis = analyze(balanced.numbers(), None);

    for evaluation in &analysis.evaluations {
        assert_eq!(
            evaluation.status,
            Status::Excellent,
            "{:?} = {}",
            evaluation.constraint,
            evaluation.value
        );
    }
    assert_eq!(analysis.score, 100);
    assert_eq!(analysis.status, Status::Excellent);
}

#[test]
fn test_analyze_low_ticket_loses_sum_points() {
    // only the sum is out of band: 64 of 80 points
    let analysis = analyze(low_ticket().numbers(), None);
    assert_eq!(analysis.score, 80);
    assert_eq!(analysis.status, Status::Good);
    assert_eq!(
        analysis.evaluation(ConstraintType::Sum).map(|e| e.status),
        Some(Status::Bad)
    );
}
