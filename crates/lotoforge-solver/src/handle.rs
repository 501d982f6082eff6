//! Background generation with cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use lotoforge_core::DrawHistory;
use tokio::sync::mpsc;

use crate::error::GenerationError;
use crate::event::GenerationEvent;
use crate::generator::{generate_with_termination, GenerationOutcome, GenerationRequest};

/// Handle to a run started by [`spawn_generation`].
///
/// Dropping the handle detaches the worker; the run continues until it
/// ends on its own.
#[derive(Debug)]
pub struct GenerationHandle {
    terminate: Arc<AtomicBool>,
    worker: JoinHandle<GenerationOutcome>,
}

impl GenerationHandle {
    /// Requests cancellation.
    ///
    /// The worker checks the flag before every event. At most one event
    /// already past that check may still arrive after this returns; no
    /// terminal event follows it.
    pub fn cancel(&self) {
        self.terminate.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.terminate.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the run to end.
    pub fn join(self) -> Result<GenerationOutcome, GenerationError> {
        self.worker
            .join()
            .map_err(|_| GenerationError::WorkerPanicked)
    }
}

/// Runs `request` on a dedicated thread.
///
/// Returns the handle and the receiving end of the run's event stream.
///
/// # Example
///
/// ```
/// use lotoforge_config::GenerationConfig;
/// use lotoforge_core::DrawHistory;
/// use lotoforge_solver::{spawn_generation, GenerationEvent, GenerationRequest};
///
/// let request = GenerationRequest::new(3, vec![], GenerationConfig::default())
///     .unwrap()
///     .with_seed(1);
/// let (handle, mut events) = spawn_generation(request, DrawHistory::new()).unwrap();
///
/// let mut finished = false;
/// while let Some(event) = events.blocking_recv() {
///     finished |= matches!(event, GenerationEvent::Finished { .. });
/// }
/// assert!(finished);
/// assert_eq!(handle.join().unwrap().tickets().len(), 3);
/// ```
pub fn spawn_generation(
    request: GenerationRequest,
    history: DrawHistory,
) -> Result<
    (
        GenerationHandle,
        mpsc::UnboundedReceiver<GenerationEvent>,
    ),
    GenerationError,
> {
    let (sender, receiver) = mpsc::unbounded_channel();
    let terminate = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&terminate);

    let worker = thread::Builder::new()
        .name("lotoforge-generation".to_string())
        .spawn(move || {
            generate_with_termination(&request, &history, Some(flag.as_ref()), sender)
        })?;

    Ok((GenerationHandle { terminate, worker }, receiver))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lotoforge_config::GenerationConfig;
    use lotoforge_core::{ConstraintType, FilterState, NumberRange};

    use super::*;

    #[test]
    fn test_cancel_stops_without_terminal_event() {
        // sum 120 needs a fifteen-node dive; one node per solver call never
        // gets there, so the run only ends by cancellation or a long timeout
        let config = GenerationConfig::new(10, Duration::from_secs(60), 11, true)
            .unwrap()
            .with_solver_node_limit(Some(1))
            .unwrap();
        let filters = vec![FilterState::enabled(
            ConstraintType::Sum,
            NumberRange::exactly(120),
        )];
        let request = GenerationRequest::new(1, filters, config)
            .unwrap()
            .with_seed(11);
        let (handle, mut events) = spawn_generation(request, DrawHistory::new()).unwrap();

        loop {
            match events.blocking_recv() {
                Some(GenerationEvent::Step { .. }) => break,
                Some(event) => assert!(!event.is_terminal(), "{event:?}"),
                None => panic!("run ended before its first step"),
            }
        }
        handle.cancel();
        assert!(handle.is_cancelled());

        assert_eq!(handle.join().unwrap(), GenerationOutcome::Cancelled);
        while let Ok(event) = events.try_recv() {
            assert!(!event.is_terminal(), "{event:?}");
        }
    }

    #[test]
    fn test_join_returns_outcome() {
        let request = GenerationRequest::new(2, vec![], GenerationConfig::default())
            .unwrap()
            .with_seed(4);
        let (handle, _events) = spawn_generation(request, DrawHistory::new()).unwrap();

        let outcome = handle.join().unwrap();
        assert!(outcome.is_finished());
        assert_eq!(outcome.tickets().len(), 2);
    }
}
