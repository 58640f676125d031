//! Critical-headlines scraper — binary entrypoint.
//! Loads configuration, wires the HTTP feeds, and hands off to the
//! fixed-interval scheduler. Runs until externally interrupted.

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use critical_headlines::ingest::config::ScraperConfig;
use critical_headlines::ingest::feed::{build_client, FeedSource, HttpFeed};
use critical_headlines::ingest::scheduler::Scheduler;
use critical_headlines::telemetry;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the variables come from the
    // real environment.
    let _ = dotenvy::dotenv();

    init_tracing();
    telemetry::init_from_env()?;

    let cfg = ScraperConfig::load().context("loading scraper config")?;
    if cfg.news_url.is_empty() {
        anyhow::bail!("news_url must be configured (config file or SCRAPER_NEWS_URL)");
    }

    let client = build_client(&cfg).context("building http client")?;
    let news: Box<dyn FeedSource> =
        Box::new(HttpFeed::new(client.clone(), cfg.news_url.clone(), "news"));
    let calendar: Option<Box<dyn FeedSource>> = cfg
        .calendar_url
        .clone()
        .map(|url| Box::new(HttpFeed::new(client, url, "calendar")) as Box<dyn FeedSource>);

    tracing::info!(
        interval_min = cfg.poll_interval_minutes,
        window_min = cfg.max_age_minutes,
        headlines_file = %cfg.headlines_file.display(),
        calendar = calendar.is_some(),
        "scraper starting"
    );

    Scheduler::new(cfg, news, calendar).run().await;
    Ok(())
}
