use crate::core::field_resolver::{self, DEFAULT_MULTI_VALUE_TYPES};
use crate::domain::model::{
    CustomField, NormalizedRecord, OutputField, RawExportRecord, REDACTED_FIELDS, RESERVED_KEYS,
};
use crate::utils::error::{ExportError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static OPERATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Operator[0-9]{2}[[:punct:]]?$").expect("operator pattern is valid")
});

/// How a custom field is mapped into the output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    AssessmentId,
    Election,
    Operator,
    Redacted,
    MultiValued,
    Passthrough,
}

impl FieldRule {
    /// Name rules, in priority order. They all win over the type rule.
    const NAME_RULES: [FieldRule; 4] = [
        FieldRule::AssessmentId,
        FieldRule::Election,
        FieldRule::Operator,
        FieldRule::Redacted,
    ];

    fn matches_name(&self, name: &str) -> bool {
        match self {
            FieldRule::AssessmentId => name == "Asmt ID",
            FieldRule::Election => name == "Election",
            FieldRule::Operator => OPERATOR_PATTERN.is_match(name),
            FieldRule::Redacted => REDACTED_FIELDS.contains(&name),
            FieldRule::MultiValued | FieldRule::Passthrough => false,
        }
    }
}

/// Classifies custom fields and maps raw records to normalized ones.
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    multi_value_types: HashSet<String>,
}

impl Default for RecordTransformer {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl RecordTransformer {
    /// `extra_multi_value_types` are added to the built-in multi-valued types.
    pub fn new(extra_multi_value_types: &[String]) -> Self {
        let multi_value_types = DEFAULT_MULTI_VALUE_TYPES
            .iter()
            .map(|t| t.to_string())
            .chain(extra_multi_value_types.iter().cloned())
            .collect();
        Self { multi_value_types }
    }

    pub fn is_multi_valued(&self, field_type: &str) -> bool {
        self.multi_value_types.contains(field_type)
    }

    pub fn classify(&self, field: &CustomField) -> FieldRule {
        FieldRule::NAME_RULES
            .into_iter()
            .find(|rule| rule.matches_name(&field.name))
            .unwrap_or_else(|| {
                if self.is_multi_valued(&field.field_type) {
                    FieldRule::MultiValued
                } else {
                    FieldRule::Passthrough
                }
            })
    }

    /// Map one raw record. Fails only when a required standard field is missing.
    pub fn transform(&self, raw: &RawExportRecord) -> Result<NormalizedRecord> {
        let required = |value: &Option<String>, field: &str| {
            value.clone().ok_or_else(|| ExportError::RecordStructureError {
                position: raw.position,
                key: raw.label(),
                field: field.to_string(),
            })
        };

        let mut record = NormalizedRecord {
            summary: required(&raw.summary, "summary")?,
            created: required(&raw.created, "created")?,
            updated: required(&raw.updated, "updated")?,
            status: required(&raw.status, "status")?,
            resolved: raw.resolved.clone(),
            ..Default::default()
        };

        for field in &raw.custom_fields {
            self.apply(&mut record, raw, field);
        }

        Ok(record)
    }

    fn apply(&self, record: &mut NormalizedRecord, raw: &RawExportRecord, field: &CustomField) {
        let rule = self.classify(field);
        let value = field_resolver::resolve(field, rule == FieldRule::MultiValued);

        match rule {
            FieldRule::AssessmentId => {
                record.id = value.and_then(|v| v.into_first());
            }
            FieldRule::Election => {
                record.election = match value.as_ref().and_then(|v| v.first()) {
                    Some("Yes") => Some(true),
                    Some("No") => Some(false),
                    _ => None,
                };
            }
            FieldRule::Operator => {
                if let Some(operator) = value.and_then(|v| v.into_first()) {
                    record.operators.push(operator);
                }
            }
            FieldRule::Redacted => record.set_field(&field.name, OutputField::Redacted),
            FieldRule::MultiValued | FieldRule::Passthrough => {
                if field.name.is_empty() {
                    tracing::debug!("{}: ignoring custom field without a name", raw.label());
                    return;
                }
                if RESERVED_KEYS.contains(&field.name.as_str()) {
                    tracing::warn!(
                        "{}: custom field '{}' collides with a standard output key, dropped",
                        raw.label(),
                        field.name
                    );
                    return;
                }
                // 沒有值的一般欄位直接省略
                if let Some(value) = value {
                    record.set_field(&field.name, OutputField::Value(value));
                }
            }
        }
    }
}
