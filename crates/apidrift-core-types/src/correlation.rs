//! Correlation identifiers for summarization jobs.
//!
//! A host may run many independent diff jobs concurrently; every log event a
//! job emits carries its [`JobId`] so the events can be grouped afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a single summarization job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Generate a fresh, time-ordered id (UUIDv7)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wrap an id supplied by the caller (e.g. an upstream request id)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_ids_are_unique() {
        let a = JobId::new();
        let b = JobId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_job_id_display_matches_inner() {
        let id = JobId::from_string("job-42");
        assert_eq!(id.to_string(), "job-42");
    }

    #[test]
    fn test_job_id_serializes_as_plain_string() {
        let id = JobId::from_string("job-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"job-7\"");
        let back: JobId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
