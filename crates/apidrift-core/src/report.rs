//! Report facade: raw diff bytes in, rendered [`Report`] out.

use crate::core_types::JobId;
use crate::document::ApiDocument;
use crate::errors::{Result, SummaryError};
use crate::raw::RawDiff;
use crate::summary::{self, MarkdownRenderer, NarrativeRenderer, Report};
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use sha2::{Digest, Sha256};

fn malformed(err: serde_json::Error) -> SummaryError {
    SummaryError::MalformedDiff {
        message: err.to_string(),
    }
}

/// Deserialize the comparison engine's payload.
///
/// The payload must be a JSON object; serde would otherwise accept a
/// sequence for a struct whose fields all default.
///
/// # Errors
///
/// `MalformedDiff` carrying the deserializer's message.
pub fn parse_raw_diff(bytes: &[u8]) -> Result<RawDiff> {
    let value: Value = serde_json::from_slice(bytes).map_err(malformed)?;
    if !value.is_object() {
        return Err(SummaryError::MalformedDiff {
            message: format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&value)
            ),
        });
    }
    serde_json::from_value(value).map_err(malformed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// SHA-256 of the raw payload, lowercase hex.
pub fn payload_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Summarize a raw diff payload into a Markdown-rendered report.
///
/// # Errors
///
/// `MalformedDiff` when the payload cannot be deserialized;
/// `OperationNotFound` when a changed operation is missing from either
/// document.
pub fn summarize(diff: &[u8], old_doc: &ApiDocument, new_doc: &ApiDocument) -> Result<Report> {
    summarize_with(&MarkdownRenderer, &JobId::new(), diff, old_doc, new_doc)
}

/// Like [`summarize`], with an explicit renderer and correlation id.
///
/// Every log event emitted for the call carries `job_id`.
///
/// # Errors
///
/// Same as [`summarize`].
pub fn summarize_with<R>(
    renderer: &R,
    job_id: &JobId,
    diff: &[u8],
    old_doc: &ApiDocument,
    new_doc: &ApiDocument,
) -> Result<Report>
where
    R: NarrativeRenderer + ?Sized,
{
    let digest = payload_digest(diff);
    log_op_start!("summarize", job_id = %job_id, diff_digest = %digest);
    let start = std::time::Instant::now();

    let report = parse_raw_diff(diff)
        .and_then(|raw| summary::build(&raw, old_doc, new_doc, renderer))
        .map_err(|e| {
            log_op_error!(
                "summarize",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                job_id = %job_id
            );
            e
        })?;

    log_op_end!(
        "summarize",
        duration_ms = start.elapsed().as_millis() as u64,
        job_id = %job_id,
        endpoint_count = report.endpoint_count() as u64,
        breaking = report.breaking
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object_is_empty_diff() {
        let raw = parse_raw_diff(b"{}").unwrap();
        assert_eq!(raw, RawDiff::default());
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        let err = parse_raw_diff(b"not json").unwrap_err();
        match err {
            SummaryError::MalformedDiff { message } => assert!(!message.is_empty()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_array_is_malformed() {
        let payloads: [&[u8]; 4] = [b"[]", b"[[],[],[],[]]", b"null", b"\"diff\""];
        for payload in payloads {
            let err = parse_raw_diff(payload).unwrap_err();
            assert!(
                matches!(err, SummaryError::MalformedDiff { .. }),
                "payload {:?} gave {:?}",
                String::from_utf8_lossy(payload),
                err
            );
        }
        let err = parse_raw_diff(b"[]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed diff payload: expected a JSON object at the top level, found an array"
        );
    }

    #[test]
    fn test_summarize_rejects_array_payload() {
        let doc = ApiDocument::default();
        let err = summarize(b"[]", &doc, &doc).unwrap_err();
        assert!(matches!(err, SummaryError::MalformedDiff { .. }));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = parse_raw_diff(br#"{"newEndpoints": 42}"#).unwrap_err();
        assert!(matches!(err, SummaryError::MalformedDiff { .. }));
    }

    #[test]
    fn test_payload_digest_is_stable_hex() {
        assert_eq!(
            payload_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(payload_digest(b"{}"), payload_digest(b"{}"));
        assert_ne!(payload_digest(b"{}"), payload_digest(b"[]"));
    }

    #[test]
    fn test_summarize_empty_diff() {
        let doc = ApiDocument::default();
        let report = summarize(b"{}", &doc, &doc).unwrap();
        assert!(!report.has_changes());
        assert!(!report.breaking);
        assert_eq!(
            report.message,
            "No differences. Specifications are equivalent.\n"
        );
    }
}
