// src/news.rs
//! # News Filter
//! Selects the critical, currently active headlines out of a payload and
//! normalizes them into [`CanonicalHeadline`] records.

use chrono::NaiveDateTime;
use metrics::counter;
use serde_json::Value;

use crate::error::ScrapeError;
use crate::types::{CanonicalHeadline, NewsRecord, Payload, TIMESTAMP_FORMAT};

/// Both markers must be present, case-sensitively. The combined
/// `active-critical` tag is the common case, but the upstream has been seen
/// emitting the tokens separately, so each is checked on its own.
pub fn is_critical_active(level: &str) -> bool {
    level.contains("active") && level.contains("critical")
}

/// Keep the critical-active records of `payload`, stamped with `scraped_at`
/// (the capture time of this run, independent of the upstream timestamp).
///
/// A record without a usable level is dropped with a warning; a record that
/// does not even parse as a news row likewise. Neither aborts the batch.
pub fn filter_news(
    payload: &Payload,
    scraped_at: NaiveDateTime,
) -> Result<Vec<CanonicalHeadline>, ScrapeError> {
    let rows = payload
        .news()
        .ok_or_else(|| ScrapeError::Schema("payload has no News section".into()))?;
    let stamp = scraped_at.format(TIMESTAMP_FORMAT).to_string();

    let mut out = Vec::new();
    for raw in rows {
        let Some(rec) = parse_record(raw) else {
            continue;
        };
        let Some(level) = rec.level.as_deref().filter(|l| !l.trim().is_empty()) else {
            tracing::warn!(
                title = rec.title.as_deref().unwrap_or("<untitled>"),
                "news record without level, dropping"
            );
            counter!("scrape_records_dropped_total", "reason" => "missing_level").increment(1);
            continue;
        };
        if !is_critical_active(level) {
            continue;
        }

        out.push(CanonicalHeadline {
            headline: normalize_headline(rec.title.as_deref().unwrap_or_default()),
            time: rec.resolve_time().unwrap_or_default(),
            level: level.to_string(),
            labels: rec.labels.clone(),
            news_id: rec.resolve_id().unwrap_or_default(),
            scraped_at: stamp.clone(),
        });
    }
    Ok(out)
}

fn parse_record(raw: &Value) -> Option<NewsRecord> {
    match serde_json::from_value(raw.clone()) {
        Ok(rec) => Some(rec),
        Err(e) => {
            tracing::warn!(error = %e, "unparseable news record, dropping");
            counter!("scrape_records_dropped_total", "reason" => "bad_record").increment(1);
            None
        }
    }
}

/// Decode HTML entities and collapse whitespace in a headline.
pub fn normalize_headline(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(decoded.trim(), " ").into_owned()
}
