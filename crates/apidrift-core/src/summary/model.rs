//! Canonical compatibility report types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Every node except the report root is built exactly once by the builder,
//! which sets `message` as its final step; after that the node is moved into
//! its parent and never touched again.
//!
//! Sub-summaries of a modified operation are `Option`s: `None` means the raw
//! diff had no sub-tree at that level, `Some` with an empty list means the
//! sub-tree was present but carried no entries.

use serde::{Deserialize, Serialize};

/// What happened to an entity between the two API descriptions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Added,
    Deleted,
    Modified,
    /// Any other value read back from a serialized report; renders as nothing
    #[serde(other)]
    Unknown,
}

/// The top-level compatibility report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Endpoints present only in the new description
    pub added: Vec<EndpointSummary>,
    /// Endpoints present only in the old description
    pub deleted: Vec<EndpointSummary>,
    /// Endpoints newly marked deprecated
    pub deprecated: Vec<EndpointSummary>,
    /// Operations present on both sides whose definition changed
    pub modified: Vec<ModifiedOperation>,
    /// True iff at least one modified operation is breaking
    pub breaking: bool,
    /// Rendered narrative: New, Deleted, Deprecated, Changed
    pub message: String,
}

impl Report {
    /// True when any bucket has an entry
    pub fn has_changes(&self) -> bool {
        self.endpoint_count() > 0
    }

    /// Total number of endpoints across all four buckets
    pub fn endpoint_count(&self) -> usize {
        self.added.len() + self.deleted.len() + self.deprecated.len() + self.modified.len()
    }

    /// Serialize as pretty-printed JSON with stable snake_case field names.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures (not expected for this type).
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// An added, deleted or deprecated endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EndpointSummary {
    pub path: String,
    pub method: String,
    pub description: String,
    pub message: String,
}

/// An operation whose definition changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModifiedOperation {
    pub path: String,
    pub method: String,
    pub summary: String,
    pub description: String,
    /// The comparison engine's verdict for this operation
    pub breaking: bool,
    pub message: String,
    pub parameters: Option<ParametersSummary>,
    pub request_body: Option<RequestBodySummary>,
    pub responses: Option<ResponsesSummary>,
    pub security: Option<SecuritySummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParametersSummary {
    pub breaking: bool,
    /// Added, then deleted, then modified
    pub parameters: Vec<ParameterSummary>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterSummary {
    pub name: String,
    /// Location: query, path, header or cookie
    #[serde(rename = "in")]
    pub location: String,
    pub description: String,
    pub action: ChangeAction,
    pub breaking: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RequestBodySummary {
    pub breaking: bool,
    /// One entry per changed media type
    pub details: Vec<RequestBodySummaryDetail>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestBodySummaryDetail {
    /// Media type, e.g. `application/json`
    pub name: String,
    pub action: ChangeAction,
    pub breaking: bool,
    pub properties: Vec<PropertiesSummary>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponsesSummary {
    pub breaking: bool,
    /// One entry per changed status code
    pub details: Vec<ResponsesSummaryDetail>,
    pub message: String,
}

/// Changes to one status code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsesSummaryDetail {
    /// Status code as written in the description (`"200"`, `"default"`)
    pub code: String,
    pub description: String,
    pub action: ChangeAction,
    pub breaking: bool,
    /// Header and content changes of a modified status code
    pub details: Vec<ResponseSummaryDetail>,
    pub message: String,
}

/// Which part of a response a [`ResponseSummaryDetail`] describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseDetailKind {
    Header,
    Content,
}

/// A header or content-type change inside a modified status code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseSummaryDetail {
    pub kind: ResponseDetailKind,
    /// Header name or media type
    pub name: String,
    pub action: ChangeAction,
    pub breaking: bool,
    pub properties: Vec<PropertiesSummary>,
    pub message: String,
}

/// A property-level change inside a schema, recursively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertiesSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
    pub action: ChangeAction,
    pub breaking: bool,
    /// `Some("items")` on the synthetic node grouping array element changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub nested: Vec<PropertiesSummary>,
    pub message: String,
}

impl PropertiesSummary {
    pub const ITEMS_GROUP: &'static str = "items";

    pub fn is_items_group(&self) -> bool {
        self.group.as_deref() == Some(Self::ITEMS_GROUP)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SecuritySummary {
    pub breaking: bool,
    pub details: Vec<SecuritySummaryDetail>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecuritySummaryDetail {
    /// Security scheme name(s) of the requirement
    pub name: String,
    pub action: ChangeAction,
    pub breaking: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_action_round_trips_lowercase() {
        assert_eq!(
            serde_json::to_value(ChangeAction::Modified).unwrap(),
            json!("modified")
        );
        let unknown: ChangeAction = serde_json::from_value(json!("renamed")).unwrap();
        assert_eq!(unknown, ChangeAction::Unknown);
    }

    #[test]
    fn test_parameter_location_serializes_as_in() {
        let param = ParameterSummary {
            name: "limit".to_string(),
            location: "query".to_string(),
            description: String::new(),
            action: ChangeAction::Added,
            breaking: false,
            message: String::new(),
        };
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["in"], json!("query"));
        assert_eq!(value["action"], json!("added"));
    }

    #[test]
    fn test_report_counts() {
        let mut report = Report::default();
        assert!(!report.has_changes());
        report.added.push(EndpointSummary::default());
        report.modified.push(ModifiedOperation::default());
        assert_eq!(report.endpoint_count(), 2);
        assert!(report.has_changes());
    }

    #[test]
    fn test_absent_sub_summaries_serialize_as_null() {
        let value = serde_json::to_value(ModifiedOperation::default()).unwrap();
        assert_eq!(value["parameters"], json!(null));
        assert_eq!(value["security"], json!(null));
    }
}
