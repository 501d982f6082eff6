//! Errors raised before or around a generation run.
//!
//! Running out of time or search budget is not an error: it ends the run
//! with a [`GenerationEvent::Failed`](crate::GenerationEvent::Failed) event.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("failed to spawn generation thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("generation thread panicked")]
    WorkerPanicked,
}
