//! Metric calculation.
//!
//! Every field is a pure function of the ticket mask: membership counts are
//! a population count against a fixed mask, the sum and the run count scan
//! the 25 bits once.

use lotoforge_core::{GeneratedMetrics, NumberMask, Ticket};

/// Computes the statistics of `ticket`.
///
/// `Repeats` is measured against `reference` (normally the last draw) and
/// is 0 without one.
///
/// # Example
///
/// ```
/// use lotoforge_core::{ConstraintType, Ticket};
/// use lotoforge_scoring::calculate;
///
/// let ticket = Ticket::new(1..=15).unwrap();
/// let last = Ticket::new(11..=25).unwrap();
/// let metrics = calculate(&ticket, Some(&last));
///
/// assert_eq!(metrics.get(ConstraintType::Sum), 120);
/// assert_eq!(metrics.get(ConstraintType::Repeats), 5);
/// ```
pub fn calculate(ticket: &Ticket, reference: Option<&Ticket>) -> GeneratedMetrics {
    calculate_mask(ticket.mask(), reference.map(Ticket::mask))
}

/// Computes the statistics of a raw mask.
pub fn calculate_mask(mask: NumberMask, reference: Option<NumberMask>) -> GeneratedMetrics {
    GeneratedMetrics::measure(mask, reference)
}
