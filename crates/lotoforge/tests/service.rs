//! Facade wiring: provider in, sink out.

use std::sync::Mutex;

use lotoforge::prelude::*;
use lotoforge::{FailureReason, StatisticsCache};
use lotoforge_test::{low_ticket, sample_history};

/// Provider returning draws oldest first, to exercise re-ordering.
struct ReversedHistory(Vec<Draw>);

impl HistoryProvider for ReversedHistory {
    fn draws(&self) -> Vec<Draw> {
        let mut draws = self.0.clone();
        draws.reverse();
        draws
    }
}

#[derive(Default)]
struct CountingSink {
    saved: Mutex<Vec<Ticket>>,
}

impl TicketSink for CountingSink {
    fn save(&self, tickets: &[Ticket]) {
        self.saved.lock().unwrap().extend_from_slice(tickets);
    }
}

fn request(quantity: u32, filters: Vec<FilterState>) -> GenerationRequest {
    GenerationRequest::new(quantity, filters, GenerationConfig::default())
        .unwrap()
        .with_seed(17)
}

#[test]
fn test_finished_tickets_reach_sink() {
    let forge = LotoForge::new(sample_history(), CountingSink::default());
    let repeats = vec![FilterState::ideal(ConstraintType::Repeats)];
    let outcome = forge.generate_silent(&request(3, repeats));

    assert_eq!(outcome.tickets().len(), 3);
    assert_eq!(forge.sink().saved.lock().unwrap().as_slice(), outcome.tickets());
}

#[test]
fn test_failed_run_saves_nothing() {
    let forge = LotoForge::new(DrawHistory::new(), CountingSink::default());
    let repeats = vec![FilterState::ideal(ConstraintType::Repeats)];
    let outcome = forge.generate_silent(&request(1, repeats));

    assert!(matches!(
        outcome,
        GenerationOutcome::Failed {
            reason: FailureReason::NoHistory,
            ..
        }
    ));
    assert!(forge.sink().saved.lock().unwrap().is_empty());
}

#[test]
fn test_provider_order_is_normalised() {
    let draws = sample_history().into_draws();
    let forge = LotoForge::new(ReversedHistory(draws), ());

    let last = forge.provider().history().last_draw().map(Draw::contest);
    assert_eq!(last, Some(3012));

    let result = forge.check(&low_ticket());
    assert_eq!(result.last_checked_contest, 3012);
}

#[test]
fn test_analyze_uses_last_draw() {
    let history = sample_history();
    let forge = LotoForge::new(history.clone(), ());
    let last = history.last_draw().unwrap().ticket();

    let analysis = forge.analyze(last.numbers());
    let repeats = analysis
        .evaluations
        .iter()
        .find(|e| e.constraint == ConstraintType::Repeats)
        .map(|e| e.value);
    assert_eq!(repeats, Some(15));
    assert_eq!(analysis.status, Status::from_score(analysis.score));
}

#[test]
fn test_statistics_are_cached() {
    let forge = LotoForge::new(sample_history(), Mutex::new(Vec::new()));

    let a = forge.statistics(6);
    let b = forge.statistics(6);
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(a.draws, 6);
    assert_eq!(StatisticsCache::DEFAULT_CAPACITY, 16);
}

#[test]
fn test_check_many_over_provider() {
    let forge = LotoForge::new(sample_history(), ());
    let tickets = vec![low_ticket(), *sample_history().draws()[3].ticket()];

    let results = forge.check_many(&tickets);
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].count(15), 1);
}
