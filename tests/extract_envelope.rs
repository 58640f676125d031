// tests/extract_envelope.rs
use critical_headlines::extract::unwrap_payload;
use critical_headlines::ScrapeError;
use serde_json::json;

/// Wrapping any JSON document in the envelope and unwrapping it again yields
/// the same document.
#[test]
fn envelope_round_trip_preserves_document() {
    let docs = vec![
        json!([]),
        json!({"News": [{"Title": "x", "Level": "active-critical"}]}),
        json!({"Cal": [{"Date": "2025-05-05"}], "News": []}),
        json!([{"ID": 1}, {"ID": 2}]),
        json!({"nested": {"deep": [1, 2, {"three": null}]}}),
    ];
    for doc in docs {
        let wrapped = format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<string xmlns=\"http://tempuri.org/\">{doc}</string>"
        );
        let out = unwrap_payload(&wrapped).unwrap().unwrap();
        assert_eq!(out, doc);
    }
}

#[test]
fn fixture_response_unwraps() {
    let raw = include_str!("fixtures/startup_response.xml");
    let v = unwrap_payload(raw).unwrap().unwrap();
    assert_eq!(v["News"].as_array().unwrap().len(), 5);
}

/// Text with no string element is "no data", never an escaping error.
#[test]
fn absent_envelope_yields_no_data() {
    for raw in [
        "",
        "plain text",
        "<?xml version=\"1.0\"?><error>rate limited</error>",
        "{\"News\": []}",
    ] {
        assert!(unwrap_payload(raw).unwrap().is_none(), "raw: {raw:?}");
    }
}

#[test]
fn malformed_payload_is_reported_with_context() {
    let raw = "<string>this is not { json</string>";
    match unwrap_payload(raw) {
        Err(ScrapeError::MalformedPayload { snippet, .. }) => {
            assert!(snippet.starts_with("this is not"));
        }
        other => panic!("expected MalformedPayload, got {other:?}"),
    }
}
