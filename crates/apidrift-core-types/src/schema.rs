//! Canonical schema constants for structured logging
//!
//! Every log event emitted by apidrift uses these keys so downstream log
//! pipelines can filter on them without knowing which crate produced the event.

// Envelope
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_JOB_ID: &str = "job_id";

// Operation identity
pub const FIELD_METHOD: &str = "method";
pub const FIELD_PATH: &str = "path";

// Report shape
pub const FIELD_DIFF_DIGEST: &str = "diff_digest";
pub const FIELD_ENDPOINT_COUNT: &str = "endpoint_count";
pub const FIELD_BREAKING: &str = "breaking";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_field_keys_are_snake_case() {
        for key in [
            FIELD_COMPONENT,
            FIELD_OP,
            FIELD_EVENT,
            FIELD_DURATION_MS,
            FIELD_JOB_ID,
            FIELD_METHOD,
            FIELD_PATH,
            FIELD_DIFF_DIGEST,
            FIELD_ENDPOINT_COUNT,
            FIELD_BREAKING,
            FIELD_ERR_KIND,
            FIELD_ERR_CODE,
        ] {
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
