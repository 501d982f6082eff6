//! Engine wired to its collaborators.

use lotoforge_core::Ticket;
use lotoforge_scoring::{analyze, TicketAnalysis};
use lotoforge_solver::{
    check, check_many, generate, CheckResult, GenerationEvent, GenerationOutcome,
    GenerationRequest, HistoryProvider, HistoryStatistics, StatisticsCache, TicketSink,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Generation and checks over one history provider, forwarding finished
/// tickets to a sink.
///
/// # Example
///
/// ```
/// use std::sync::Mutex;
/// use lotoforge::prelude::*;
///
/// let history = DrawHistory::from_results(vec![
///     (1, (1..=15).collect::<Vec<u8>>()),
///     (2, (6..=20).collect::<Vec<u8>>()),
/// ])
/// .unwrap();
/// let forge = LotoForge::new(history, Mutex::new(Vec::new()));
///
/// let request = GenerationRequest::new(
///     2,
///     vec![FilterState::ideal(ConstraintType::Repeats)],
///     GenerationConfig::default(),
/// )
/// .unwrap()
/// .with_seed(3);
///
/// let outcome = forge.generate_silent(&request);
/// assert_eq!(outcome.tickets().len(), 2);
/// assert_eq!(forge.sink().lock().unwrap().len(), 2);
/// ```
pub struct LotoForge<P, K> {
    provider: P,
    sink: K,
    cache: StatisticsCache,
}

impl<P: HistoryProvider, K: TicketSink> LotoForge<P, K> {
    pub fn new(provider: P, sink: K) -> Self {
        Self {
            provider,
            sink,
            cache: StatisticsCache::default(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Runs `request` against the provider's history, streaming events to
    /// `sender`. Tickets of a finished run are handed to the sink.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        sender: mpsc::UnboundedSender<GenerationEvent>,
    ) -> GenerationOutcome {
        let history = self.provider.history();
        let outcome = generate(request, &history, sender);
        if let GenerationOutcome::Finished { tickets, .. } = &outcome {
            debug!(event = "tickets_saved", count = tickets.len());
            self.sink.save(tickets);
        }
        outcome
    }

    /// Like [`generate`](Self::generate), discarding progress events.
    pub fn generate_silent(&self, request: &GenerationRequest) -> GenerationOutcome {
        let (sender, _receiver) = mpsc::unbounded_channel();
        self.generate(request, sender)
    }

    /// Checks one ticket against the full history.
    pub fn check(&self, ticket: &Ticket) -> CheckResult {
        check(ticket, &self.provider.draws())
    }

    pub fn check_many(&self, tickets: &[Ticket]) -> Vec<CheckResult> {
        check_many(tickets, &self.provider.draws())
    }

    /// Analyzes a selection, measuring repeats against the last draw.
    pub fn analyze(&self, numbers: &[u8]) -> TicketAnalysis {
        let history = self.provider.history();
        analyze(numbers, history.last_draw().map(|d| d.ticket()))
    }

    /// Statistics of the `window` most recent draws, cached.
    pub fn statistics(&self, window: usize) -> Arc<HistoryStatistics> {
        let history = self.provider.history();
        self.cache.get_or_compute(history.window(window))
    }
}
