//! Schema fragments of the raw diff tree.

use super::null_as_default;
use serde::Deserialize;
use std::collections::BTreeMap;

/// JSON Schema `type`: a single name, or a list of names (OpenAPI 3.1).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    /// Display label: `string`, or `string | null` for type lists
    pub fn label(&self) -> String {
        match self {
            SchemaType::Single(name) => name.clone(),
            SchemaType::Multiple(names) => names.join(" | "),
        }
    }

    pub fn is_array(&self) -> bool {
        match self {
            SchemaType::Single(name) => name == "array",
            SchemaType::Multiple(names) => names.iter().any(|n| n == "array"),
        }
    }
}

/// A schema definition as it appears in either document.
///
/// Only the fields the summary needs are modelled.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawSchema {
    #[serde(default, rename = "type")]
    pub schema_type: Option<SchemaType>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
}

impl RawSchema {
    /// Type label shown next to a property name: `string`, or
    /// `string(date-time)` when a format is given.
    ///
    /// Falls back to the referenced component name (`#/components/schemas/Pet`
    /// → `Pet`) and then to the empty string.
    pub fn type_label(&self) -> String {
        if let Some(t) = &self.schema_type {
            return match self.format.as_deref() {
                Some(format) if !format.is_empty() => format!("{}({})", t.label(), format),
                _ => t.label(),
            };
        }
        self.reference
            .as_deref()
            .and_then(|r| r.rsplit('/').next())
            .unwrap_or_default()
            .to_string()
    }
}

/// Changes to one schema, recursively.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawChangedSchema {
    #[serde(default, rename = "type")]
    pub schema_type: Option<SchemaType>,
    #[serde(default)]
    pub old_schema: Option<RawSchema>,
    #[serde(default)]
    pub new_schema: Option<RawSchema>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub increased_properties: BTreeMap<String, RawSchema>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_properties: BTreeMap<String, RawSchema>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changed_properties: BTreeMap<String, RawChangedSchema>,
    #[serde(default)]
    pub items: Option<Box<RawChangedSchema>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub different: bool,
}

impl RawChangedSchema {
    /// Schema on the new side, falling back to the old side
    fn current(&self) -> Option<&RawSchema> {
        self.new_schema.as_ref().or(self.old_schema.as_ref())
    }

    pub fn type_label(&self) -> String {
        if let Some(t) = &self.schema_type {
            return t.label();
        }
        self.current().map(RawSchema::type_label).unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        self.current().and_then(|s| s.description.as_deref())
    }

    pub fn is_array(&self) -> bool {
        self.schema_type
            .as_ref()
            .or_else(|| self.current().and_then(|s| s.schema_type.as_ref()))
            .is_some_and(SchemaType::is_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_label_prefers_type_then_ref() {
        let typed: RawSchema = serde_json::from_value(json!({"type": "string"})).unwrap();
        assert_eq!(typed.type_label(), "string");

        let nullable: RawSchema =
            serde_json::from_value(json!({"type": ["string", "null"]})).unwrap();
        assert_eq!(nullable.type_label(), "string | null");

        let referenced: RawSchema =
            serde_json::from_value(json!({"$ref": "#/components/schemas/Pet"})).unwrap();
        assert_eq!(referenced.type_label(), "Pet");

        assert_eq!(RawSchema::default().type_label(), "");
    }

    #[test]
    fn test_type_label_includes_format() {
        let stamped: RawSchema =
            serde_json::from_value(json!({"type": "string", "format": "date-time"})).unwrap();
        assert_eq!(stamped.type_label(), "string(date-time)");

        let referenced: RawSchema = serde_json::from_value(
            json!({"$ref": "#/components/schemas/Pet", "format": "ignored"}),
        )
        .unwrap();
        assert_eq!(referenced.type_label(), "Pet");
    }

    #[test]
    fn test_changed_schema_accepts_type_list() {
        let changed: RawChangedSchema = serde_json::from_value(json!({
            "type": ["array", "null"],
            "items": {"increasedProperties": {"name": {"type": "string"}}}
        }))
        .unwrap();
        assert!(changed.is_array());
        assert_eq!(changed.type_label(), "array | null");

        let object: RawChangedSchema =
            serde_json::from_value(json!({"type": ["object", "null"]})).unwrap();
        assert!(!object.is_array());
    }

    #[test]
    fn test_changed_schema_detects_array_from_new_schema() {
        let changed: RawChangedSchema = serde_json::from_value(json!({
            "newSchema": {"type": "array"},
            "items": {"increasedProperties": {"name": {"type": "string"}}}
        }))
        .unwrap();
        assert!(changed.is_array());
        assert_eq!(changed.type_label(), "array");
        assert!(changed.items.is_some());
    }

    #[test]
    fn test_explicit_nulls_read_as_empty() {
        let changed: RawChangedSchema = serde_json::from_value(json!({
            "type": "object",
            "increasedProperties": null,
            "changedProperties": null,
            "incompatible": null
        }))
        .unwrap();
        assert!(changed.increased_properties.is_empty());
        assert!(changed.changed_properties.is_empty());
        assert!(!changed.incompatible);
        assert!(!changed.is_array());
    }
}
