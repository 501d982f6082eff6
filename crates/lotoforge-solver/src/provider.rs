//! Collaborator interfaces.
//!
//! Storage and synchronisation live outside the engine. These traits are
//! the only contact points: one supplies past draws, the other receives
//! generated tickets.

use std::sync::Mutex;

use lotoforge_core::{Draw, DrawHistory, Ticket};

/// Supplies the draw history.
pub trait HistoryProvider: Send + Sync {
    /// Past draws, most recent first.
    fn draws(&self) -> Vec<Draw>;

    /// The draws as a [`DrawHistory`].
    fn history(&self) -> DrawHistory {
        DrawHistory::from_draws(self.draws())
    }
}

impl HistoryProvider for DrawHistory {
    fn draws(&self) -> Vec<Draw> {
        DrawHistory::draws(self).to_vec()
    }

    fn history(&self) -> DrawHistory {
        self.clone()
    }
}

impl HistoryProvider for Vec<Draw> {
    fn draws(&self) -> Vec<Draw> {
        self.clone()
    }
}

/// Receives generated tickets. Fire-and-forget: the engine never waits on
/// or inspects the outcome.
pub trait TicketSink: Send + Sync {
    fn save(&self, tickets: &[Ticket]);
}

/// Discards everything.
impl TicketSink for () {
    fn save(&self, _tickets: &[Ticket]) {}
}

/// Keeps saved tickets in memory.
impl TicketSink for Mutex<Vec<Ticket>> {
    fn save(&self, tickets: &[Ticket]) {
        if let Ok(mut saved) = self.lock() {
            saved.extend_from_slice(tickets);
        }
    }
}

#[cfg(test)]
mod tests {
    use lotoforge_test::{low_ticket, sample_history};

    use super::*;

    #[test]
    fn test_provider_orders_most_recent_first() {
        let mut draws = sample_history().into_draws();
        draws.reverse();

        let history = draws.history();
        assert_eq!(history.last_draw().map(Draw::contest), Some(3012));
    }

    #[test]
    fn test_memory_sink() {
        let sink = Mutex::new(Vec::new());
        sink.save(&[low_ticket()]);
        sink.save(&[]);
        assert_eq!(sink.lock().unwrap().len(), 1);
    }
}
