// src/ingest/config.rs
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Timelike};
use serde::Deserialize;

use crate::persist::{DEFAULT_EVENTS_SUFFIX, DEFAULT_HEADLINES_FILE};
use crate::window::DEFAULT_MAX_AGE_MINUTES;

const ENV_PATH: &str = "SCRAPER_CONFIG_PATH";

/// Everything the scraper takes from the outside. Loaded from a TOML or JSON
/// file, then overridden field-by-field from the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    /// Startup (news) endpoint. Must be configured; there is no usable default.
    pub news_url: String,
    /// Calendar endpoint. Absent means the daily events pass is skipped.
    pub calendar_url: Option<String>,
    pub referer: String,
    pub headlines_file: PathBuf,
    pub events_dir: PathBuf,
    pub events_file_suffix: String,
    pub poll_interval_minutes: u64,
    pub max_age_minutes: i64,
    pub request_timeout_secs: u64,
    pub trading_hours: TradingHours,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            news_url: String::new(),
            calendar_url: None,
            referer: "https://www.financialjuice.com/".to_string(),
            headlines_file: PathBuf::from(DEFAULT_HEADLINES_FILE),
            events_dir: PathBuf::from("."),
            events_file_suffix: DEFAULT_EVENTS_SUFFIX.to_string(),
            poll_interval_minutes: 1,
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            request_timeout_secs: 15,
            trading_hours: TradingHours::default(),
        }
    }
}

/// Weekday/hour gate for the scheduler. Weekdays count from Monday = 0;
/// the close hour is exclusive.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TradingHours {
    pub weekday_start: u8,
    pub weekday_end: u8,
    pub open_hour: u8,
    pub open_minute: u8,
    pub close_hour: u8,
}

impl Default for TradingHours {
    fn default() -> Self {
        // Monday-Friday, 9:30 to 16:00.
        Self {
            weekday_start: 0,
            weekday_end: 4,
            open_hour: 9,
            open_minute: 30,
            close_hour: 16,
        }
    }
}

impl TradingHours {
    pub fn contains<T: Datelike + Timelike>(&self, now: &T) -> bool {
        let weekday = now.weekday().num_days_from_monday() as u8;
        if weekday < self.weekday_start || weekday > self.weekday_end {
            return false;
        }
        let (hour, minute) = (now.hour() as u8, now.minute() as u8);
        if hour < self.open_hour || hour >= self.close_hour {
            return false;
        }
        !(hour == self.open_hour && minute < self.open_minute)
    }
}

impl ScraperConfig {
    /// Load configuration using env var + fallbacks:
    /// 1) $SCRAPER_CONFIG_PATH
    /// 2) config/scraper.toml
    /// 3) config/scraper.json
    /// 4) built-in defaults
    /// followed by environment overrides in every case.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_PATH} points to non-existent path"));
            }
            Self::from_file(&pb)?
        } else {
            let toml_p = PathBuf::from("config/scraper.toml");
            let json_p = PathBuf::from("config/scraper.json");
            if toml_p.exists() {
                Self::from_file(&toml_p)?
            } else if json_p.exists() {
                Self::from_file(&json_p)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&content, &ext)
    }

    fn parse(content: &str, hint_ext: &str) -> Result<Self> {
        if hint_ext == "json" {
            return serde_json::from_str(content).context("parsing JSON config");
        }
        // TOML first, JSON as fallback for unhinted content.
        match toml::from_str(content) {
            Ok(cfg) => Ok(cfg),
            Err(toml_err) => serde_json::from_str(content)
                .map_err(|_| toml_err)
                .context("parsing TOML config"),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SCRAPER_NEWS_URL") {
            self.news_url = v;
        }
        if let Ok(v) = std::env::var("SCRAPER_CALENDAR_URL") {
            self.calendar_url = Some(v);
        }
        if let Ok(v) = std::env::var("SCRAPER_HEADLINES_FILE") {
            self.headlines_file = PathBuf::from(v);
        }
        if let Some(v) = env_parse("SCRAPER_POLL_INTERVAL_MINUTES") {
            self.poll_interval_minutes = v;
        }
        if let Some(v) = env_parse("SCRAPER_MAX_AGE_MINUTES") {
            self.max_age_minutes = v;
        }
        if let Some(v) = env_parse("SCRAPER_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
