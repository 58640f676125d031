// src/extract.rs
//! # Response Unwrapper
//! The upstream answers every call with an XML document whose single
//! `<string>` element wraps the actual JSON payload. This module peels the
//! envelope and parses what is inside.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;

use crate::error::ScrapeError;

/// How much of a malformed payload is quoted in errors/logs.
const SNIPPET_CHARS: usize = 200;

/// Extract the JSON document wrapped in the first `<string ...>` element.
///
/// Returns `Ok(None)` when no such element exists — the upstream's way of
/// saying "nothing for you", which the caller treats as a skipped cycle.
/// A present envelope with non-JSON content is a real failure and comes back
/// as [`ScrapeError::MalformedPayload`] with a bounded snippet for diagnosis.
pub fn unwrap_payload(raw: &str) -> Result<Option<Value>, ScrapeError> {
    let Some(inner) = envelope_text(raw) else {
        return Ok(None);
    };
    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(inner) {
        Ok(value) => Ok(Some(value)),
        Err(source) => Err(ScrapeError::MalformedPayload {
            source,
            snippet: snippet(inner),
        }),
    }
}

/// Text content of the first `<string>` element, entities decoded,
/// attributes ignored. `None` when the element never opens or the document
/// is not XML at all.
fn envelope_text(raw: &str) -> Option<String> {
    let mut reader = Reader::from_str(raw);
    let mut inside = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"string" => inside = true,
            Ok(Event::End(e)) if inside && e.local_name().as_ref() == b"string" => {
                return Some(text);
            }
            Ok(Event::Text(t)) if inside => {
                let decoded = t.unescape().map(|s| s.into_owned());
                match decoded {
                    Ok(s) => text.push_str(&s),
                    // Content with stray ampersands still has to survive.
                    Err(_) => text.push_str(&String::from_utf8_lossy(&t.into_inner())),
                }
            }
            Ok(Event::CData(c)) if inside => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            // Self-closing <string/> carries nothing.
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"string" => return None,
            Ok(Event::Eof) => return None,
            Err(_) => return None,
            Ok(_) => {}
        }
    }
}

fn snippet(s: &str) -> String {
    s.chars().take(SNIPPET_CHARS).collect()
}
