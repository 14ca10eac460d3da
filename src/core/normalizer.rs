use crate::core::export_parser::parse_export;
use crate::core::record_transform::RecordTransformer;
use crate::domain::model::{NormalizedRecord, SkippedRecord, TransformResult};
use crate::utils::error::Result;

/// Render the record set as one JSON array. Record and key order are kept.
pub fn serialize_records(records: &[NormalizedRecord], pretty: bool) -> Result<Vec<u8>> {
    let payload = if pretty {
        serde_json::to_vec_pretty(records)?
    } else {
        serde_json::to_vec(records)?
    };
    Ok(payload)
}

/// One synchronous normalization pass: parse, transform, serialize.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    transformer: RecordTransformer,
    pretty: bool,
}

impl Normalizer {
    pub fn new(transformer: RecordTransformer) -> Self {
        Self {
            transformer,
            pretty: false,
        }
    }

    pub fn with_pretty_output(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Records missing a required standard field are skipped and reported;
    /// every other failure aborts the pass.
    pub fn normalize(&self, document: &str) -> Result<TransformResult> {
        let raw_records = parse_export(document)?;
        if raw_records.is_empty() {
            tracing::warn!("Export contains no items");
        }

        let mut records = Vec::with_capacity(raw_records.len());
        let mut skipped = Vec::new();

        for raw in &raw_records {
            match self.transformer.transform(raw) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping {}: {}", raw.label(), e);
                    skipped.push(SkippedRecord {
                        position: raw.position,
                        label: raw.label(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !skipped.is_empty() {
            tracing::warn!(
                "Skipped {} of {} records with missing standard fields",
                skipped.len(),
                raw_records.len()
            );
        }

        let payload = serialize_records(&records, self.pretty)?;
        tracing::debug!(
            "Serialized {} records into {} bytes",
            records.len(),
            payload.len()
        );

        Ok(TransformResult {
            records,
            skipped,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITEMS: &str = r#"<rss version="0.92"><channel>
<item>
  <key>RVA-1</key><summary>Site review</summary><status>Open</status>
  <created>c1</created><updated>u1</updated>
  <customfields>
    <customfield key="t:textfield"><customfieldname>Election</customfieldname>
      <customfieldvalues><customfieldvalue>Yes</customfieldvalue></customfieldvalues></customfield>
    <customfield key="t:textfield"><customfieldname>Operator01</customfieldname>
      <customfieldvalues><customfieldvalue>X</customfieldvalue></customfieldvalues></customfield>
  </customfields>
</item>
<item>
  <key>RVA-2</key><summary>Second</summary><status>Open</status>
  <created>c2</created><updated>u2</updated>
  <customfields>
    <customfield key="t:textfield"><customfieldname>Operator02</customfieldname>
      <customfieldvalues><customfieldvalue>Y</customfieldvalue></customfieldvalues></customfield>
    <customfield key="t:textfield"><customfieldname>Operator05</customfieldname>
      <customfieldvalues><customfieldvalue>Z</customfieldvalue></customfieldvalues></customfield>
  </customfields>
</item>
</channel></rss>"#;

    #[test]
    fn test_end_to_end_two_items() {
        let result = Normalizer::default().normalize(TWO_ITEMS).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&result.payload).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["summary"], "Site review");
        assert_eq!(json[0]["Election"], true);
        assert_eq!(json[0]["Operators"], serde_json::json!(["X"]));
        assert!(json[1]["Election"].is_null());
        assert_eq!(json[1]["Operators"], serde_json::json!(["Y", "Z"]));
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = Normalizer::default();
        let first = normalizer.normalize(TWO_ITEMS).unwrap();
        let second = normalizer.normalize(TWO_ITEMS).unwrap();
        assert_eq!(first.payload, second.payload);
    }

    #[test]
    fn test_pretty_output_is_same_data() {
        let compact = Normalizer::default().normalize(TWO_ITEMS).unwrap();
        let pretty = Normalizer::default()
            .with_pretty_output(true)
            .normalize(TWO_ITEMS)
            .unwrap();

        assert_ne!(compact.payload, pretty.payload);
        let a: serde_json::Value = serde_json::from_slice(&compact.payload).unwrap();
        let b: serde_json::Value = serde_json::from_slice(&pretty.payload).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_export_serializes_empty_array() {
        let result = Normalizer::default()
            .normalize("<rss><channel/></rss>")
            .unwrap();
        assert_eq!(result.payload, b"[]");
    }
}
