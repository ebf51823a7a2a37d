//! apidrift core - API compatibility report summarization
//!
//! This crate turns the raw structural diff produced by an OpenAPI comparison
//! engine into:
//! - a canonical, hierarchical [`Report`] with breaking flags at every level
//! - a Markdown narrative attached to every node of that report
//!
//! The comparison engine itself is external; this crate only normalizes,
//! orders and renders its output.
//!
//! ```ignore
//! use apidrift_core::{document::ApiDocument, summarize};
//!
//! let old = ApiDocument::from_slice(&old_bytes)?;
//! let new = ApiDocument::from_slice(&new_bytes)?;
//! let report = summarize(&diff_bytes, &old, &new)?;
//! print!("{}", report.message);
//! ```

pub mod document;
pub mod errors;
pub mod logging_facility;
pub mod raw;
pub mod report;
pub mod summary;

pub use document::ApiDocument;
pub use errors::{DocumentSide, ExError, ExErrorKind, MissingPart, Result, SummaryError};
pub use report::{parse_raw_diff, payload_digest, summarize, summarize_with};
pub use summary::{build, MarkdownRenderer, NarrativeRenderer, Report};

// Re-exported so the logging macros resolve schema constants from any crate
pub use apidrift_core_types as core_types;
