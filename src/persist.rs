// src/persist.rs
//! # Persistence Writer
//! Serializes the filtered record sets to pretty-printed JSON files — one
//! headlines file overwritten each cycle, one events file per calendar day.
//!
//! An empty record set touches nothing: a stale-but-relevant file beats a
//! freshly truncated one.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tokio::fs;

use crate::error::ScrapeError;
use crate::types::{CanonicalEvent, CanonicalHeadline};

/// Default headlines output file.
pub const DEFAULT_HEADLINES_FILE: &str = "critical_headlines.json";
/// Default per-day events file suffix.
pub const DEFAULT_EVENTS_SUFFIX: &str = "events.json";

/// Overwrite `path` with the given headlines. Returns `false` when the set
/// was empty and the file was left untouched.
pub async fn write_headlines(
    records: &[CanonicalHeadline],
    path: &Path,
) -> Result<bool, ScrapeError> {
    if records.is_empty() {
        tracing::debug!(path = %path.display(), "no headlines to persist, leaving file untouched");
        return Ok(false);
    }
    write_json(records, path).await?;
    Ok(true)
}

/// Write `records` to `<dir>/<YYYY-MM-DD>_<suffix>`. Returns the path written,
/// or `None` when the set was empty. Repeated writes on the same day
/// overwrite that day's file.
pub async fn write_events(
    records: &[CanonicalEvent],
    day: NaiveDate,
    dir: &Path,
    suffix: &str,
) -> Result<Option<PathBuf>, ScrapeError> {
    if records.is_empty() {
        tracing::debug!(%day, "no events to persist, skipping write");
        return Ok(None);
    }
    let path = events_path(day, dir, suffix);
    write_json(records, &path).await?;
    Ok(Some(path))
}

/// The per-day events file name embeds the date, so every calendar day gets
/// its own file.
pub fn events_path(day: NaiveDate, dir: &Path, suffix: &str) -> PathBuf {
    dir.join(format!("{}_{}", day.format("%Y-%m-%d"), suffix))
}

async fn write_json<T: Serialize>(records: &[T], path: &Path) -> Result<(), ScrapeError> {
    let body = serde_json::to_vec_pretty(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| ScrapeError::Persist {
                path: path.to_path_buf(),
                source,
            })?;
    }
    fs::write(path, body)
        .await
        .map_err(|source| ScrapeError::Persist {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "persisted records");
    Ok(())
}
