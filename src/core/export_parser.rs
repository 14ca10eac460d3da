use crate::core::xml_tree::XmlElement;
use crate::domain::model::{CustomField, RawExportRecord};
use crate::utils::error::{ExportError, Result};

/// Parse a Jira search-request XML export into raw records, in document order.
///
/// The records live under `rss/channel/item`. A document without that
/// container cannot be an export of a filter and fails the run; an empty
/// channel is a valid, empty export.
pub fn parse_export(document: &str) -> Result<Vec<RawExportRecord>> {
    let root = XmlElement::parse(document)?;

    if root.name != "rss" {
        return Err(ExportError::StructureError {
            message: format!("expected <rss> root element, found <{}>", root.name),
        });
    }

    let channel = root.child("channel").ok_or_else(|| ExportError::StructureError {
        message: "export has no <channel> element under <rss>".to_string(),
    })?;

    let records: Vec<RawExportRecord> = channel
        .children_named("item")
        .enumerate()
        .map(|(position, item)| read_item(position, item))
        .collect();

    tracing::debug!("Parsed {} items from export", records.len());
    Ok(records)
}

fn read_item(position: usize, item: &XmlElement) -> RawExportRecord {
    let owned = |name: &str| item.child_text(name).map(str::to_string);

    let custom_fields = item
        .child("customfields")
        .map(|container| {
            container
                .children_named("customfield")
                .map(read_custom_field)
                .collect()
        })
        .unwrap_or_default();

    RawExportRecord {
        position,
        key: owned("key"),
        summary: owned("summary"),
        created: owned("created"),
        updated: owned("updated"),
        status: owned("status"),
        resolved: owned("resolved"),
        custom_fields,
    }
}

fn read_custom_field(node: &XmlElement) -> CustomField {
    let values = node
        .child("customfieldvalues")
        .map(|container| {
            container
                .children_named("customfieldvalue")
                .map(|value| value.text().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    CustomField {
        field_type: node.attribute("key").unwrap_or_default().to_string(),
        name: node.child_text("customfieldname").unwrap_or_default().to_string(),
        values,
    }
}
