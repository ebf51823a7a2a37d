//! Raw diff tree as emitted by the external OpenAPI comparison engine.
//!
//! These types mirror the engine's camelCase JSON. They are a versioned
//! external contract, so every collection defaults to empty, every sub-tree is
//! optional and unknown fields are ignored. Map-keyed collections use
//! `BTreeMap` so iteration order is stable regardless of the payload's key
//! order.

pub mod schema;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub use schema::{RawChangedSchema, RawSchema, SchemaType};

/// Treat an explicit `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of the raw diff tree.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawDiff {
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_endpoints: Vec<RawEndpoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_endpoints: Vec<RawEndpoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deprecated_endpoints: Vec<RawEndpoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changed_operations: Vec<RawChangedOperation>,
}

/// An endpoint in one of the new/missing/deprecated lists.
///
/// The engine reports the URL under `pathUrl` and the whole path item under
/// `path`; hand-written payloads often put the URL string under `path`.
/// Both forms are accepted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawEndpoint {
    #[serde(default)]
    pub path_url: Option<String>,
    #[serde(default)]
    pub path: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default)]
    pub summary: Option<String>,
}

impl RawEndpoint {
    /// The endpoint URL template, e.g. `/pet/{petId}`
    pub fn url(&self) -> &str {
        if let Some(url) = self.path_url.as_deref() {
            return url;
        }
        match &self.path {
            Some(Value::String(url)) => url,
            _ => "",
        }
    }
}

/// An operation present in both documents whose definition changed.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawChangedOperation {
    #[serde(default, deserialize_with = "null_as_default", alias = "path")]
    pub path_url: String,
    #[serde(default, deserialize_with = "null_as_default", alias = "method")]
    pub http_method: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub parameters: Option<RawChangedParameters>,
    #[serde(default)]
    pub request_body: Option<RawChangedRequestBody>,
    #[serde(default)]
    pub api_responses: Option<RawChangedApiResponses>,
    #[serde(default)]
    pub security_requirements: Option<RawChangedSecurityRequirements>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

/// A parameter definition as it appears in either document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawParameter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "in")]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawChangedParameter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "in")]
    pub location: String,
    #[serde(default)]
    pub old_parameter: Option<RawParameter>,
    #[serde(default)]
    pub new_parameter: Option<RawParameter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

impl RawChangedParameter {
    /// Description from the new definition, falling back to the old one
    pub fn description(&self) -> Option<&str> {
        self.new_parameter
            .as_ref()
            .and_then(|p| p.description.as_deref())
            .or_else(|| {
                self.old_parameter
                    .as_ref()
                    .and_then(|p| p.description.as_deref())
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedParameters {
    #[serde(default, deserialize_with = "null_as_default")]
    pub increased: Vec<RawParameter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: Vec<RawParameter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changed: Vec<RawChangedParameter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

/// A media type entry (`content.<media-type>`) as it appears in either document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawMediaType {
    #[serde(default)]
    pub schema: Option<RawSchema>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedMediaType {
    #[serde(default)]
    pub schema: Option<RawChangedSchema>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

/// Per-media-type changes of a request or response body.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedContent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub increased: BTreeMap<String, RawMediaType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: BTreeMap<String, RawMediaType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changed: BTreeMap<String, RawChangedMediaType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedRequestBody {
    #[serde(default)]
    pub content: Option<RawChangedContent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

/// A response definition as it appears in either document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawApiResponse {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedHeader {
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedHeaders {
    #[serde(default, deserialize_with = "null_as_default")]
    pub increased: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changed: BTreeMap<String, RawChangedHeader>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawChangedResponse {
    #[serde(default)]
    pub old_api_response: Option<RawApiResponse>,
    #[serde(default)]
    pub new_api_response: Option<RawApiResponse>,
    #[serde(default)]
    pub headers: Option<RawChangedHeaders>,
    #[serde(default)]
    pub content: Option<RawChangedContent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

impl RawChangedResponse {
    pub fn description(&self) -> Option<&str> {
        self.new_api_response
            .as_ref()
            .and_then(|r| r.description.as_deref())
            .or_else(|| {
                self.old_api_response
                    .as_ref()
                    .and_then(|r| r.description.as_deref())
            })
    }
}

/// Per-status-code response changes, keyed by status code (`"200"`, `"default"`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedApiResponses {
    #[serde(default, deserialize_with = "null_as_default")]
    pub increased: BTreeMap<String, RawApiResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: BTreeMap<String, RawApiResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changed: BTreeMap<String, RawChangedResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

/// One security requirement: scheme name to required scopes.
pub type RawSecurityRequirement = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawChangedSecurityRequirement {
    #[serde(default)]
    pub old_security_requirement: Option<RawSecurityRequirement>,
    #[serde(default)]
    pub new_security_requirement: Option<RawSecurityRequirement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

impl RawChangedSecurityRequirement {
    /// Scheme names of the requirement, joined with `, `
    pub fn name(&self) -> String {
        self.new_security_requirement
            .as_ref()
            .or(self.old_security_requirement.as_ref())
            .map(|req| req.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawChangedSecurityRequirements {
    #[serde(default, deserialize_with = "null_as_default")]
    pub increased: Vec<RawSecurityRequirement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: Vec<RawSecurityRequirement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changed: Vec<RawChangedSecurityRequirement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_accepts_path_url_or_path_string() {
        let engine: RawEndpoint = serde_json::from_value(json!({
            "pathUrl": "/pets",
            "method": "GET",
            "path": {"get": {"summary": "List pets"}}
        }))
        .unwrap();
        assert_eq!(engine.url(), "/pets");

        let handwritten: RawEndpoint =
            serde_json::from_value(json!({"path": "/pet/{petId}", "method": "GET"})).unwrap();
        assert_eq!(handwritten.url(), "/pet/{petId}");
    }

    #[test]
    fn test_unknown_fields_and_absent_subtrees_are_tolerated() {
        let diff: RawDiff = serde_json::from_value(json!({
            "changedOperations": [{
                "pathUrl": "/pets",
                "httpMethod": "POST",
                "incompatible": true,
                "coreChanged": "INCOMPATIBLE",
                "oldOperation": {"summary": "x"}
            }],
            "changedExtensions": null,
            "newSpecOpenApi": {}
        }))
        .unwrap();
        let op = &diff.changed_operations[0];
        assert!(op.incompatible);
        assert!(op.parameters.is_none());
        assert!(op.request_body.is_none());
        assert!(diff.new_endpoints.is_empty());
    }

    #[test]
    fn test_security_requirement_name_joins_schemes() {
        let changed: RawChangedSecurityRequirement = serde_json::from_value(json!({
            "oldSecurityRequirement": {"petstore_auth": ["read:pets"]},
            "newSecurityRequirement": {"petstore_auth": ["read:pets"], "api_key": []}
        }))
        .unwrap();
        assert_eq!(changed.name(), "api_key, petstore_auth");
    }
}
