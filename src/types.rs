// src/types.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp format used for `scraped_at` stamps and persisted headlines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Payload shapes the upstream emits, depending on endpoint.
///
/// The startup endpoint answers with an object carrying named sections
/// (`News`, and `Cal` on the calendar endpoint); older responses are a bare
/// array of news records. Rows stay as raw `Value`s here so one malformed
/// record can be dropped without losing the batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Sections {
        #[serde(rename = "News", default)]
        news: Option<Vec<Value>>,
        #[serde(rename = "Cal", default)]
        calendar: Option<Vec<Value>>,
    },
    Records(Vec<Value>),
}

impl Payload {
    /// Interpret an already-extracted JSON document as a feed payload.
    pub fn from_value(value: Value) -> Result<Self, crate::error::ScrapeError> {
        serde_json::from_value(value).map_err(|_| {
            crate::error::ScrapeError::Schema(
                "payload is neither a record list nor a section object".into(),
            )
        })
    }

    /// News rows, from either upstream shape.
    pub fn news(&self) -> Option<&[Value]> {
        match self {
            Payload::Sections { news, .. } => news.as_deref(),
            Payload::Records(rows) => Some(rows),
        }
    }

    /// Calendar rows. Only the section shape carries them.
    pub fn calendar(&self) -> Option<&[Value]> {
        match self {
            Payload::Sections { calendar, .. } => calendar.as_deref(),
            Payload::Records(_) => None,
        }
    }
}

/// Identifier field as the upstream sends it — numeric on some endpoints,
/// string on others.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for FlexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlexId::Int(n) => write!(f, "{n}"),
            FlexId::Str(s) => f.write_str(s),
        }
    }
}

/// One raw news record. Every field is optional; the two endpoints disagree
/// on which of them they populate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsRecord {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Level", default)]
    pub level: Option<String>,
    /// Combined timestamp, e.g. `2025-05-05 14:30:00`.
    #[serde(rename = "PostedLong", default)]
    pub posted_long: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    #[serde(rename = "Labels", default)]
    pub labels: Vec<String>,
    #[serde(rename = "NewsID", default)]
    pub news_id: Option<FlexId>,
    #[serde(rename = "ID", default)]
    pub id: Option<FlexId>,
}

impl NewsRecord {
    /// Timestamp resolution order: `PostedLong`, else `Date + " " + Time`,
    /// else `Date` alone. This order is a contract, not a heuristic.
    pub fn resolve_time(&self) -> Option<String> {
        if let Some(posted) = self.posted_long.as_deref().filter(|s| !s.trim().is_empty()) {
            return Some(posted.to_string());
        }
        match (self.date.as_deref(), self.time.as_deref()) {
            (Some(d), Some(t)) if !d.is_empty() && !t.is_empty() => Some(format!("{d} {t}")),
            (Some(d), _) if !d.is_empty() => Some(d.to_string()),
            _ => None,
        }
    }

    /// Identifier resolution order: `NewsID`, else `ID`.
    pub fn resolve_id(&self) -> Option<String> {
        self.news_id
            .as_ref()
            .or(self.id.as_ref())
            .map(|id| id.to_string())
    }
}

/// Headline record as persisted to disk.
///
/// Field names match the on-disk JSON contract consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalHeadline {
    pub headline: String,
    pub time: String,
    pub level: String,
    pub labels: Vec<String>,
    pub news_id: String,
    pub scraped_at: String,
}

/// One raw calendar row. Unknown upstream fields are ignored on parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarRow {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    #[serde(rename = "RealDate", default)]
    pub real_date: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Active", default)]
    pub active: bool,
    #[serde(rename = "Breaking", default)]
    pub breaking: bool,
    // Realized/forecast/previous values arrive as strings or numbers
    // depending on the event; passed through verbatim.
    #[serde(rename = "Actual", default)]
    pub actual: Value,
    #[serde(rename = "Forecast", default)]
    pub forecast: Value,
    #[serde(rename = "Previous", default)]
    pub previous: Value,
}

/// Calendar event as persisted to disk: the fixed projection of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "RealDate")]
    pub real_date: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Active")]
    pub active: bool,
    #[serde(rename = "Breaking")]
    pub breaking: bool,
    #[serde(rename = "Actual")]
    pub actual: Value,
    #[serde(rename = "Forecast")]
    pub forecast: Value,
    #[serde(rename = "Previous")]
    pub previous: Value,
}
