use asmt_export::{ExportError, Normalizer};
use serde_json::{json, Value};

const EXPORT: &str = include_str!("fixtures/jira_export.xml");

fn normalize(document: &str) -> (Vec<Value>, usize) {
    let result = Normalizer::default().normalize(document).unwrap();
    let json: Value = serde_json::from_slice(&result.payload).unwrap();
    (json.as_array().unwrap().clone(), result.skipped.len())
}

#[test]
fn test_every_item_becomes_one_record_in_order() {
    let (records, skipped) = normalize(EXPORT);

    assert_eq!(skipped, 0);
    let summaries: Vec<&str> = records
        .iter()
        .map(|r| r["summary"].as_str().unwrap())
        .collect();
    assert_eq!(summaries, vec!["Site review", "Network assessment", "Draft"]);
}

#[test]
fn test_first_record_matches_expected_shape() {
    let (records, _) = normalize(EXPORT);

    assert_eq!(
        records[0],
        json!({
            "id": "RV0101",
            "summary": "Site review",
            "created": "Mon, 6 Jan 2020 10:00:00 -0500",
            "updated": "Fri, 10 Jan 2020 16:30:00 -0500",
            "status": "Testing",
            "POC Email": null,
            "Requested Services": ["Phishing Assessment"],
            "Stakeholder Name": "Dept. of R&D",
            "POC Name": null,
            "POC Phone": null,
            "Election": true,
            "Operators": ["X"]
        })
    );
}

#[test]
fn test_second_record_coalesces_operators_and_lists() {
    let (records, _) = normalize(EXPORT);
    let record = &records[1];

    assert!(record["id"].is_null());
    assert!(record["Election"].is_null());
    assert_eq!(record["Operators"], json!(["Y", "Z"]));
    assert_eq!(record["Testing Sector"], json!(["Energy", "Water"]));
    assert!(record["POC Phone"].is_null());
    assert_eq!(record["resolved"], "Mon, 13 Jan 2020 08:00:00 -0500");
    assert!(record.get("Operator02").is_none());
    assert!(record.get("Operator05:").is_none());
}

#[test]
fn test_missing_optional_fields_are_absent() {
    let (records, _) = normalize(EXPORT);
    let draft = records[2].as_object().unwrap();

    assert_eq!(draft["Election"], false);
    assert!(!draft.contains_key("resolved"));
    assert!(!draft.contains_key("Notes"));
    assert!(draft.contains_key("id"));
    assert_eq!(draft["Operators"], json!([]));
}

#[test]
fn test_redacted_values_never_reach_output() {
    let result = Normalizer::default().normalize(EXPORT).unwrap();
    let text = String::from_utf8(result.payload).unwrap();

    assert!(!text.contains("a@b.com"));
    assert!(!text.contains("555-0100"));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let normalizer = Normalizer::default();
    let first = normalizer.normalize(EXPORT).unwrap().payload;
    let second = normalizer.normalize(EXPORT).unwrap().payload;
    assert_eq!(first, second);
}

#[test]
fn test_values_are_copied_verbatim() {
    let padded = EXPORT
        .replacen("<summary>Site review</summary>", "<summary>  Site review  </summary>", 1)
        .replacen("<![CDATA[Dept. of R&D]]>", "<![CDATA[  indented line\n]]>", 1);
    assert_ne!(padded, EXPORT);

    let (records, _) = normalize(&padded);

    assert_eq!(records[0]["summary"], "  Site review  ");
    assert_eq!(records[0]["Stakeholder Name"], "  indented line\n");
}

#[test]
fn test_record_missing_standard_field_is_skipped() {
    // 刪掉第二筆的 <status>
    let broken = EXPORT.replacen(r#"<status id="6">Closed</status>"#, "", 1);
    assert_ne!(broken, EXPORT);

    let result = Normalizer::default().normalize(&broken).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].label, "RVA-102");
    assert_eq!(result.skipped[0].position, 1);
    assert!(result.skipped[0].reason.contains("status"));
    assert_eq!(result.records[0].summary, "Site review");
    assert_eq!(result.records[1].summary, "Draft");
}

#[test]
fn test_wrong_document_shape_aborts() {
    let err = Normalizer::default()
        .normalize("<feed><entry/></feed>")
        .unwrap_err();
    assert!(matches!(err, ExportError::StructureError { .. }));

    let err = Normalizer::default()
        .normalize("<rss><channel><item></channel></rss>")
        .unwrap_err();
    assert!(matches!(err, ExportError::XmlError(_)));
}
