use serde::ser::{Serialize, SerializeMap, Serializer};

/// Names of the redacted point-of-contact fields. Always emitted as `null`.
pub const REDACTED_FIELDS: [&str; 3] = ["POC Name", "POC Email", "POC Phone"];

/// Output keys owned by the fixed part of the schema.
pub const RESERVED_KEYS: [&str; 8] = [
    "id",
    "summary",
    "created",
    "updated",
    "status",
    "resolved",
    "Election",
    "Operators",
];

/// One `<customfield>` entry of an exported issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomField {
    /// Jira's value-shape classification, e.g.
    /// `com.atlassian.jira.plugin.system.customfieldtypes:multiselect`.
    pub field_type: String,
    pub name: String,
    /// Text of each `<customfieldvalue>` in document order. `None` for empty nodes.
    pub values: Vec<Option<String>>,
}

/// One `<item>` of the export, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawExportRecord {
    /// Zero-based position of the item in the channel.
    pub position: usize,
    /// Jira issue key, for diagnostics only.
    pub key: Option<String>,
    pub summary: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub status: Option<String>,
    pub resolved: Option<String>,
    pub custom_fields: Vec<CustomField>,
}

impl RawExportRecord {
    /// Issue key when present, otherwise a positional label.
    pub fn label(&self) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| format!("item #{}", self.position + 1))
    }
}

/// Value of a custom field after the field resolver ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// First textual value; used by rules that need a single scalar.
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::List(items) => items.first().map(String::as_str),
        }
    }

    pub fn into_first(self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::List(items) => items.into_iter().next(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::List(items) => items.serialize(serializer),
        }
    }
}

/// A passthrough or redacted custom field in the output record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputField {
    Redacted,
    Value(FieldValue),
}

/// The flat output record.
///
/// `id`, `Election` and the POC fields are always serialized (possibly as
/// `null`); `resolved` and passthrough custom fields only when the source had
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedRecord {
    pub id: Option<String>,
    pub summary: String,
    pub created: String,
    pub updated: String,
    pub status: String,
    pub resolved: Option<String>,
    pub election: Option<bool>,
    pub operators: Vec<String>,
    /// Custom fields in first-seen source order.
    pub fields: Vec<(String, OutputField)>,
}

impl NormalizedRecord {
    /// Insert or replace a custom field, keeping the first-seen position.
    pub fn set_field(&mut self, name: &str, value: OutputField) {
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&OutputField> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    fn missing_redacted(&self) -> impl Iterator<Item = &'static str> + '_ {
        REDACTED_FIELDS
            .into_iter()
            .filter(|name| self.field(name).is_none())
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("summary", &self.summary)?;
        map.serialize_entry("created", &self.created)?;
        map.serialize_entry("updated", &self.updated)?;
        map.serialize_entry("status", &self.status)?;
        if let Some(resolved) = &self.resolved {
            map.serialize_entry("resolved", resolved)?;
        }
        for (name, value) in &self.fields {
            match value {
                OutputField::Redacted => map.serialize_entry(name, &None::<String>)?,
                OutputField::Value(value) => map.serialize_entry(name, value)?,
            }
        }
        for name in self.missing_redacted() {
            map.serialize_entry(name, &None::<String>)?;
        }
        map.serialize_entry("Election", &self.election)?;
        map.serialize_entry("Operators", &self.operators)?;
        map.end()
    }
}

/// A record rejected by the transform, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub position: usize,
    pub label: String,
    pub reason: String,
}

/// Output of the transform stage, handed to the publisher.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<NormalizedRecord>,
    pub skipped: Vec<SkippedRecord>,
    /// Serialized JSON array of `records`.
    pub payload: Vec<u8>,
}
