// tests/scraper_config.rs
use std::io::Write;

use critical_headlines::ScraperConfig;

#[test]
fn loads_toml_file() {
    let mut f = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(
        f,
        r#"
news_url = "https://example.test/Startup"
calendar_url = "https://example.test/Calendar"
poll_interval_minutes = 3
max_age_minutes = 7
"#
    )
    .unwrap();

    let cfg = ScraperConfig::from_file(f.path()).unwrap();
    assert_eq!(cfg.news_url, "https://example.test/Startup");
    assert_eq!(cfg.calendar_url.as_deref(), Some("https://example.test/Calendar"));
    assert_eq!(cfg.poll_interval_minutes, 3);
    assert_eq!(cfg.max_age_minutes, 7);
    // Untouched fields keep their defaults.
    assert_eq!(cfg.trading_hours.open_hour, 9);
    assert_eq!(cfg.events_file_suffix, "events.json");
}

#[test]
fn loads_json_file() {
    let mut f = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        f,
        r#"{{"news_url": "https://example.test/Startup", "request_timeout_secs": 5}}"#
    )
    .unwrap();

    let cfg = ScraperConfig::from_file(f.path()).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[serial_test::serial]
#[test]
fn env_overrides_beat_file_values() {
    let mut f = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(f, r#"news_url = "https://file.test/Startup""#).unwrap();

    std::env::set_var("SCRAPER_CONFIG_PATH", f.path());
    std::env::set_var("SCRAPER_NEWS_URL", "https://env.test/Startup");
    std::env::set_var("SCRAPER_MAX_AGE_MINUTES", "9");

    let cfg = ScraperConfig::load().unwrap();

    std::env::remove_var("SCRAPER_CONFIG_PATH");
    std::env::remove_var("SCRAPER_NEWS_URL");
    std::env::remove_var("SCRAPER_MAX_AGE_MINUTES");

    assert_eq!(cfg.news_url, "https://env.test/Startup");
    assert_eq!(cfg.max_age_minutes, 9);
}

#[serial_test::serial]
#[test]
fn dangling_config_path_is_an_error() {
    std::env::set_var("SCRAPER_CONFIG_PATH", "/definitely/not/there.toml");
    let res = ScraperConfig::load();
    std::env::remove_var("SCRAPER_CONFIG_PATH");
    assert!(res.is_err());
}
