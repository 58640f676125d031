// tests/persistence.rs
use chrono::NaiveDate;
use critical_headlines::persist::{events_path, write_events, write_headlines};
use critical_headlines::types::CanonicalHeadline;
use critical_headlines::CanonicalEvent;
use serde_json::json;

fn headline(id: &str) -> CanonicalHeadline {
    CanonicalHeadline {
        headline: format!("headline {id}"),
        time: "2025-05-05 14:30:00".into(),
        level: "active-critical".into(),
        labels: vec!["FED".into()],
        news_id: id.into(),
        scraped_at: "2025-05-05 14:35:00".into(),
    }
}

fn event(title: &str) -> CanonicalEvent {
    CanonicalEvent {
        date: "2025-05-05T08:30:00".into(),
        time: "08:30".into(),
        real_date: String::new(),
        title: title.into(),
        active: true,
        breaking: false,
        actual: json!("250K"),
        forecast: json!("240K"),
        previous: json!("230K"),
    }
}

/// An empty scrape result leaves the previous file byte-for-byte unchanged.
#[tokio::test]
async fn empty_result_does_not_clobber() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("critical_headlines.json");

    assert!(write_headlines(&[headline("1")], &path).await.unwrap());
    let before = tokio::fs::read(&path).await.unwrap();

    assert!(!write_headlines(&[], &path).await.unwrap());
    let after = tokio::fs::read(&path).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn empty_result_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("critical_headlines.json");
    assert!(!write_headlines(&[], &path).await.unwrap());
    assert!(!path.exists());
}

/// Each cycle's write replaces the file wholesale, no merging.
#[tokio::test]
async fn headline_writes_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("critical_headlines.json");

    write_headlines(&[headline("1"), headline("2")], &path)
        .await
        .unwrap();
    write_headlines(&[headline("3")], &path).await.unwrap();

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    let parsed: Vec<CanonicalHeadline> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].news_id, "3");
}

#[tokio::test]
async fn headlines_file_is_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("critical_headlines.json");
    write_headlines(&[headline("1")], &path).await.unwrap();

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(content.contains('\n'), "expected indented output");
}

/// Events land in a per-day file whose name embeds the date.
#[tokio::test]
async fn events_file_name_embeds_date() {
    let dir = tempfile::tempdir().unwrap();
    let day = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

    let path = write_events(&[event("Nonfarm Payrolls")], day, dir.path(), "events.json")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(path, dir.path().join("2025-05-05_events.json"));
    assert!(path.exists());

    let other_day = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
    assert_ne!(path, events_path(other_day, dir.path(), "events.json"));
}

#[tokio::test]
async fn empty_events_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let day = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let out = write_events(&[], day, dir.path(), "events.json")
        .await
        .unwrap();
    assert!(out.is_none());
    assert!(!events_path(day, dir.path(), "events.json").exists());
}
