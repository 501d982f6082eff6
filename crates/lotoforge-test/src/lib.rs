//! Shared test fixtures for LotoForge crates.
//!
//! This crate provides tickets, draws and histories for testing.
//! It depends on `lotoforge-core` only, so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`tickets`] - ticket builders with known statistics
//! - [`history`] - a fixed twelve-contest history
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! lotoforge-test = { workspace = true }
//! ```

pub mod history;
pub mod tickets;

pub use history::{sample_history, SAMPLE_RESULTS};
pub use tickets::{high_ticket, low_ticket, ticket, ticket_sharing};
