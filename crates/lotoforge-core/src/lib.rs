//! LotoForge Core - core types for constrained ticket generation
//!
//! This crate provides the fundamental abstractions shared by every other
//! LotoForge crate:
//! - `NumberMask`, the 25-bit set representation of tickets and draws
//! - `Ticket` and `Draw`, immutable 15-of-25 selections
//! - `ConstraintType`, the closed table of supported numeric properties
//! - `FilterState`, the caller-facing description of one constraint

pub mod domain;
pub mod error;

pub use domain::{
    ConstraintType, Draw, DrawHistory, DrawStats, FilterState, GeneratedMetrics, NumberMask,
    NumberRange, Ticket, MAX_NUMBER, TICKET_SIZE,
};
pub use error::{LotoError, Result};
