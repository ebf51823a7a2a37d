//! Core types shared across apidrift crates
//!
//! - **Correlation**: [`JobId`] identifying one summarization job in logs
//! - **Schema constants**: canonical field keys and event names for structured logging

pub mod correlation;
pub mod schema;

pub use correlation::JobId;
