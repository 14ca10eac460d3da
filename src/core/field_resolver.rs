use crate::domain::model::{CustomField, FieldValue};

/// Field types Jira exports with several `<customfieldvalue>` nodes.
pub const DEFAULT_MULTI_VALUE_TYPES: [&str; 2] = [
    "com.atlassian.jira.plugin.system.customfieldtypes:multicheckboxes",
    "com.atlassian.jira.plugin.system.customfieldtypes:multiselect",
];

/// Resolve the value of a custom field.
///
/// Only value nodes with text count. One value gives a scalar, several give
/// a list in source order. `multi_valued` fields are always lists, empty when
/// nothing was supplied; other fields without a value resolve to `None`.
pub fn resolve(field: &CustomField, multi_valued: bool) -> Option<FieldValue> {
    let mut values: Vec<String> = field.values.iter().flatten().cloned().collect();

    if multi_valued {
        return Some(FieldValue::List(values));
    }

    match values.len() {
        0 => None,
        1 => values.pop().map(FieldValue::Text),
        _ => Some(FieldValue::List(values)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(values: &[Option<&str>]) -> CustomField {
        CustomField {
            field_type: DEFAULT_MULTI_VALUE_TYPES[1].to_string(),
            name: "Requested Services".to_string(),
            values: values.iter().map(|v| v.map(str::to_string)).collect(),
        }
    }

    #[test]
    fn test_single_value_is_scalar() {
        assert_eq!(
            resolve(&field(&[Some("Phishing")]), false),
            Some(FieldValue::Text("Phishing".to_string()))
        );
    }

    #[test]
    fn test_single_value_multi_field_is_list() {
        assert_eq!(
            resolve(&field(&[Some("Phishing")]), true),
            Some(FieldValue::List(vec!["Phishing".to_string()]))
        );
    }

    #[test]
    fn test_several_values_keep_order() {
        assert_eq!(
            resolve(&field(&[Some("B"), None, Some("A")]), false),
            Some(FieldValue::List(vec!["B".to_string(), "A".to_string()]))
        );
    }

    #[test]
    fn test_no_values() {
        assert_eq!(resolve(&field(&[]), false), None);
        assert_eq!(resolve(&field(&[None]), false), None);
        assert_eq!(resolve(&field(&[]), true), Some(FieldValue::List(vec![])));
    }
}
