// src/ingest/scheduler.rs
use chrono::{Local, NaiveDate};
use metrics::counter;

use crate::error::ScrapeError;
use crate::ingest::config::ScraperConfig;
use crate::ingest::feed::FeedSource;
use crate::ingest::{run_events_cycle, run_news_cycle};

/// Fixed-interval driver of the scrape pipeline.
///
/// One tick = one synchronous news pass (plus, on the first gated tick of
/// each day, one calendar pass). Every failure is contained here; the loop
/// only stops with the process.
pub struct Scheduler {
    cfg: ScraperConfig,
    news: Box<dyn FeedSource>,
    calendar: Option<Box<dyn FeedSource>>,
}

impl Scheduler {
    pub fn new(
        cfg: ScraperConfig,
        news: Box<dyn FeedSource>,
        calendar: Option<Box<dyn FeedSource>>,
    ) -> Self {
        Self {
            cfg,
            news,
            calendar,
        }
    }

    /// Run forever. The first tick fires immediately, so the scraper does a
    /// pass right at startup before settling into its cadence.
    pub async fn run(self) {
        // tokio's interval panics on a zero period.
        let period = std::time::Duration::from_secs((self.cfg.poll_interval_minutes * 60).max(1));
        let mut ticker = tokio::time::interval(period);
        let mut last_events_day: Option<NaiveDate> = None;

        loop {
            ticker.tick().await;

            let now = Local::now();
            if !self.cfg.trading_hours.contains(&now) {
                tracing::info!(at = %now.format("%H:%M:%S"), "outside trading hours, skipping tick");
                continue;
            }
            self.tick(now.date_naive(), &mut last_events_day).await;
        }
    }

    async fn tick(&self, today: NaiveDate, last_events_day: &mut Option<NaiveDate>) {
        match run_news_cycle(self.news.as_ref(), &self.cfg).await {
            Ok(report) => {
                tracing::info!(
                    matched = report.matched,
                    kept = report.kept,
                    written = report.written,
                    "news cycle complete"
                );
            }
            Err(e) => log_cycle_error("news", &e),
        }

        // The calendar endpoint is polled at most once per local day.
        if let Some(calendar) = &self.calendar {
            if *last_events_day != Some(today) {
                match run_events_cycle(calendar.as_ref(), &self.cfg, today).await {
                    Ok(kept) => {
                        *last_events_day = Some(today);
                        tracing::info!(%today, kept, "events cycle complete");
                    }
                    // Left unmarked so the next tick retries.
                    Err(e) => log_cycle_error("events", &e),
                }
            }
        }
    }
}

fn log_cycle_error(pass: &'static str, e: &ScrapeError) {
    counter!("scrape_cycle_errors_total", "pass" => pass).increment(1);
    match e {
        // Quiet upstreams are routine, not alarming.
        ScrapeError::NoPayload => {
            tracing::info!(pass, "no payload envelope in response, skipping cycle");
        }
        ScrapeError::Schema(detail) => {
            tracing::warn!(pass, %detail, "payload schema mismatch, skipping cycle");
        }
        other => {
            tracing::warn!(pass, error = %other, "cycle abandoned");
        }
    }
}
