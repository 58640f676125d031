// src/window.rs
//! # Recency Window
//! The upstream hands back an unbounded historical backlog on every poll.
//! This window keeps only records young enough to matter and is the sole
//! deduplication mechanism: an item is emitted while it sits inside the
//! window and never again once it ages out. With a short poll interval a
//! borderline item can show up in two consecutive cycles, and a slow tick
//! can miss one entirely; both are accepted behavior, not bugs to fix here.

use chrono::{Duration, NaiveDateTime};
use metrics::counter;

use crate::types::CanonicalHeadline;

/// Default maximum record age, in minutes.
pub const DEFAULT_MAX_AGE_MINUTES: i64 = 5;

/// Timestamp shapes seen in `PostedLong` / `Date + Time` fields.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse an upstream timestamp, trying each known shape in order.
/// Offsets, when present, are ignored — comparisons are local-naive.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.naive_local())
}

/// Retain records with `now - time < max_age_minutes`.
///
/// A record whose timestamp does not parse is dropped with a warning —
/// deliberately lossy, malformed times count as not-recent.
pub fn window(
    records: Vec<CanonicalHeadline>,
    now: NaiveDateTime,
    max_age_minutes: i64,
) -> Vec<CanonicalHeadline> {
    let max_age = Duration::minutes(max_age_minutes);
    records
        .into_iter()
        .filter(|rec| match parse_timestamp(&rec.time) {
            Some(t) => now - t < max_age,
            None => {
                tracing::warn!(
                    headline = %rec.headline,
                    time = %rec.time,
                    "unparseable timestamp, dropping record"
                );
                counter!("scrape_records_dropped_total", "reason" => "bad_timestamp").increment(1);
                false
            }
        })
        .collect()
}
