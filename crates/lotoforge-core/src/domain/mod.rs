//! Domain model: bitmasks, tickets, draws and constraint types.

mod constraint_type;
mod draw;
mod filter;
mod mask;
mod metrics;
mod ticket;

pub use constraint_type::{
    ConstraintType, CENTER_NUMBERS, EVEN_NUMBERS, FIBONACCI_NUMBERS, FRAME_NUMBERS,
    MULTIPLES_OF_THREE, PRIME_NUMBERS, SEQUENCE_MIN_LEN,
};
pub use draw::{Draw, DrawHistory, DrawStats};
pub use filter::{FilterState, NumberRange};
pub use mask::{MaskIter, NumberMask, MAX_NUMBER, TICKET_SIZE};
pub use metrics::GeneratedMetrics;
pub use ticket::Ticket;

#[cfg(test)]
mod tests;
