//! Parsed API descriptions (OpenAPI 3.x, JSON or YAML).
//!
//! Only the parts the summarizer reads are modelled: paths → path item →
//! per-method operation, carrying the human text (`summary`, `description`).

use crate::errors::{DocumentSide, MissingPart, Result, SummaryError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Accept any YAML/JSON scalar as a string; `version: 1.0` parses as a float
/// in YAML but is meant as text.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Info {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
}

/// An OpenAPI operation object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
}

/// An OpenAPI path item: one optional operation per HTTP method.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Operation for `method`, matched case-insensitively
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method.to_ascii_lowercase().as_str() {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            "patch" => self.patch.as_ref(),
            "trace" => self.trace.as_ref(),
            _ => None,
        }
    }
}

/// A parsed API description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiDocument {
    #[serde(default, deserialize_with = "scalar_string")]
    pub openapi: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

impl ApiDocument {
    /// Parse a document from JSON or YAML bytes.
    ///
    /// JSON is tried first, then YAML.
    ///
    /// # Errors
    ///
    /// `InvalidDocument` when the bytes are neither valid JSON nor valid YAML
    /// for the document shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice(bytes) {
            Ok(doc) => Ok(doc),
            Err(json_err) => serde_yaml::from_slice(bytes).map_err(|yaml_err| {
                SummaryError::InvalidDocument {
                    message: format!("not JSON ({}) nor YAML ({})", json_err, yaml_err),
                }
            }),
        }
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, `InvalidDocument` when it cannot be
    /// parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| SummaryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    pub fn operation(&self, method: &str, path: &str) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    /// Resolve `(method, path)` or report which part of the key is missing.
    ///
    /// # Errors
    ///
    /// `OperationNotFound` naming `side` and the missing part.
    pub fn require_operation(
        &self,
        method: &str,
        path: &str,
        side: DocumentSide,
    ) -> Result<&Operation> {
        let not_found = |missing| SummaryError::OperationNotFound {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
            side,
            missing,
        };
        let item = self.paths.get(path).ok_or_else(|| not_found(MissingPart::Path))?;
        item.operation(method)
            .ok_or_else(|| not_found(MissingPart::Method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE_YAML: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pet/{petId}:
    get:
      operationId: getPetById
      summary: Find pet by ID
      description: Returns a single pet
    delete:
      summary: Deletes a pet
"#;

    #[test]
    fn test_parse_yaml_document() {
        let doc = ApiDocument::from_slice(PETSTORE_YAML.as_bytes()).unwrap();
        assert_eq!(doc.info.title, "Petstore");
        let op = doc.operation("GET", "/pet/{petId}").unwrap();
        assert_eq!(op.summary.as_deref(), Some("Find pet by ID"));
        assert_eq!(op.operation_id.as_deref(), Some("getPetById"));
    }

    #[test]
    fn test_numeric_versions_read_as_text() {
        let doc = ApiDocument::from_slice(b"openapi: 3.1\ninfo:\n  version: 2.0\npaths: {}\n")
            .unwrap();
        assert_eq!(doc.openapi, "3.1");
        assert_eq!(doc.info.version, "2.0");
    }

    #[test]
    fn test_parse_json_document() {
        let json = br#"{"openapi":"3.0.0","paths":{"/pets":{"post":{"summary":"Add"}}}}"#;
        let doc = ApiDocument::from_slice(json).unwrap();
        assert!(doc.operation("post", "/pets").is_some());
        assert!(doc.operation("get", "/pets").is_none());
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        let err = ApiDocument::from_slice(b"paths: [unclosed").unwrap_err();
        assert!(matches!(err, SummaryError::InvalidDocument { .. }));
    }

    #[test]
    fn test_require_operation_reports_missing_part() {
        let doc = ApiDocument::from_slice(PETSTORE_YAML.as_bytes()).unwrap();

        let err = doc
            .require_operation("get", "/missing", DocumentSide::New)
            .unwrap_err();
        assert_eq!(
            err,
            SummaryError::OperationNotFound {
                method: "GET".to_string(),
                path: "/missing".to_string(),
                side: DocumentSide::New,
                missing: MissingPart::Path,
            }
        );

        let err = doc
            .require_operation("patch", "/pet/{petId}", DocumentSide::Old)
            .unwrap_err();
        assert!(matches!(
            err,
            SummaryError::OperationNotFound {
                missing: MissingPart::Method,
                side: DocumentSide::Old,
                ..
            }
        ));
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = ApiDocument::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, SummaryError::Io { .. }));
    }
}
