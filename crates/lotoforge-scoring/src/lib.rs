//! Ticket scoring for LotoForge
//!
//! This crate turns tickets into numbers the generator can reason about:
//! - [`calculate`]: the fixed vector of per-constraint statistics
//! - [`analyze`]: a qualitative 0-100 grade against ideal/acceptable bands
//! - [`FilterRule`] / [`FilterSet`]: bounds derived from enabled filters

pub mod analysis;
pub mod calculator;
pub mod rule;

pub use analysis::{analyze, ConstraintEvaluation, Status, TicketAnalysis};
pub use calculator::{calculate, calculate_mask};
pub use lotoforge_core::GeneratedMetrics;
pub use rule::{FilterRule, FilterSet};

#[cfg(test)]
mod tests;
