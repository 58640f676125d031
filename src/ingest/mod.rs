// src/ingest/mod.rs
//! The per-cycle pipeline: fetch → unwrap → filter → window → persist.
//! Each stage reports its own [`ScrapeError`] kind; the scheduler logs and
//! moves on. All state is cycle-local — nothing is carried between runs.

pub mod config;
pub mod feed;
pub mod scheduler;

use chrono::{Local, NaiveDate};
use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram,
};
use once_cell::sync::OnceCell;

use crate::error::ScrapeError;
use crate::ingest::config::ScraperConfig;
use crate::ingest::feed::FeedSource;
use crate::types::Payload;
use crate::{calendar, extract, news, persist, window};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("scrape_cycles_total", "Completed news scrape cycles.");
        describe_counter!("scrape_cycle_errors_total", "Cycles abandoned on error.");
        describe_counter!(
            "scrape_headlines_total",
            "Critical headlines matched before windowing."
        );
        describe_counter!(
            "scrape_headlines_kept_total",
            "Headlines inside the recency window."
        );
        describe_counter!(
            "scrape_records_dropped_total",
            "Records dropped for per-record malformation."
        );
        describe_counter!("scrape_events_kept_total", "Same-day calendar events kept.");
        describe_histogram!("scrape_fetch_ms", "Upstream fetch time in milliseconds.");
        describe_gauge!("scrape_last_run_ts", "Unix ts when a cycle last completed.");
    });
}

/// What one news cycle did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Critical headlines matched before windowing.
    pub matched: usize,
    /// Headlines inside the recency window.
    pub kept: usize,
    /// Whether the headlines file was (over)written.
    pub written: bool,
}

/// Run one complete news pass against `feed`.
///
/// The headlines file is only touched when the window kept something;
/// an empty result leaves the previous file as-is.
pub async fn run_news_cycle(
    feed: &dyn FeedSource,
    cfg: &ScraperConfig,
) -> Result<CycleReport, ScrapeError> {
    ensure_metrics_described();

    let payload = fetch_payload(feed).await?;
    let now = Local::now().naive_local();

    let matched = news::filter_news(&payload, now)?;
    let matched_count = matched.len();
    counter!("scrape_headlines_total").increment(matched_count as u64);

    let fresh = window::window(matched, now, cfg.max_age_minutes);
    counter!("scrape_headlines_kept_total").increment(fresh.len() as u64);

    let written = persist::write_headlines(&fresh, &cfg.headlines_file).await?;

    counter!("scrape_cycles_total").increment(1);
    gauge!("scrape_last_run_ts").set(Local::now().timestamp() as f64);

    Ok(CycleReport {
        matched: matched_count,
        kept: fresh.len(),
        written,
    })
}

/// Run one calendar pass for `day`, writing that day's events file.
/// Returns the number of events kept.
pub async fn run_events_cycle(
    feed: &dyn FeedSource,
    cfg: &ScraperConfig,
    day: NaiveDate,
) -> Result<usize, ScrapeError> {
    ensure_metrics_described();

    let payload = fetch_payload(feed).await?;
    let events = calendar::filter_events(&payload, day)?;
    counter!("scrape_events_kept_total").increment(events.len() as u64);

    persist::write_events(&events, day, &cfg.events_dir, &cfg.events_file_suffix).await?;
    Ok(events.len())
}

async fn fetch_payload(feed: &dyn FeedSource) -> Result<Payload, ScrapeError> {
    let t0 = std::time::Instant::now();
    let raw = feed.fetch_raw().await?;
    histogram!("scrape_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    tracing::debug!(feed = feed.name(), bytes = raw.len(), "fetched response");

    let value = extract::unwrap_payload(&raw)?.ok_or(ScrapeError::NoPayload)?;
    Payload::from_value(value)
}
