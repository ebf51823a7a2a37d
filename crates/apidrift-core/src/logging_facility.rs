//! Structured logging facility
//!
//! - One initialization point, [`init`], selecting a [`Profile`]
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   that stamp every event with the canonical keys from
//!   `apidrift_core_types::schema`
//! - An in-memory capture layer so tests can assert on emitted events
//!
//! The summarization core never initializes logging itself; binaries call
//! [`init`] once at startup and library hosts install their own subscriber.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
