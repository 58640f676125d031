// src/calendar.rs
//! # Event Filter
//! Projects the payload's calendar section down to the rows scheduled for a
//! given day.

use chrono::NaiveDate;
use metrics::counter;
use serde_json::Value;

use crate::error::ScrapeError;
use crate::types::{CalendarRow, CanonicalEvent, Payload};

/// Date shapes seen in calendar rows. Time-of-day and offsets are ignored;
/// only the calendar date matters.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Normalize an upstream date field to a calendar date.
pub fn normalize_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(t) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t.date());
        }
    }
    // RFC 3339 with offset; the offset is dropped, not applied.
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.date_naive())
}

/// Keep the rows of `payload`'s calendar section dated `reference`, projected
/// to the fixed persisted field set.
///
/// Rows with a missing or unparseable date are excluded with a warning;
/// a payload without a `Cal` section is a schema mismatch for the caller to
/// log and shrug off.
pub fn filter_events(
    payload: &Payload,
    reference: NaiveDate,
) -> Result<Vec<CanonicalEvent>, ScrapeError> {
    let rows = payload
        .calendar()
        .ok_or_else(|| ScrapeError::Schema("payload has no Cal section".into()))?;

    let mut out = Vec::new();
    for raw in rows {
        let Some(row) = parse_row(raw) else {
            continue;
        };
        let Some(day) = row.date.as_deref().and_then(normalize_date) else {
            tracing::warn!(
                title = row.title.as_deref().unwrap_or("<untitled>"),
                date = row.date.as_deref().unwrap_or(""),
                "calendar row without a parseable date, dropping"
            );
            counter!("scrape_records_dropped_total", "reason" => "bad_date").increment(1);
            continue;
        };
        if day != reference {
            continue;
        }
        out.push(project(row));
    }
    Ok(out)
}

fn parse_row(raw: &Value) -> Option<CalendarRow> {
    match serde_json::from_value(raw.clone()) {
        Ok(row) => Some(row),
        Err(e) => {
            tracing::warn!(error = %e, "unparseable calendar row, dropping");
            counter!("scrape_records_dropped_total", "reason" => "bad_record").increment(1);
            None
        }
    }
}

fn project(row: CalendarRow) -> CanonicalEvent {
    CanonicalEvent {
        date: row.date.unwrap_or_default(),
        time: row.time.unwrap_or_default(),
        real_date: row.real_date.unwrap_or_default(),
        title: row.title.unwrap_or_default(),
        active: row.active,
        breaking: row.breaking,
        actual: row.actual,
        forecast: row.forecast,
        previous: row.previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dates_ignoring_time_and_offset() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        assert_eq!(normalize_date("2025-05-05"), Some(d));
        assert_eq!(normalize_date("2025-05-05T23:59:00"), Some(d));
        assert_eq!(normalize_date("2025-05-05T01:00:00-11:00"), Some(d));
        assert_eq!(normalize_date("05/05/2025"), Some(d));
        assert_eq!(normalize_date("sometime in May"), None);
    }
}
