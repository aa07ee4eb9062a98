use crate::error::{NewsError, Result};
use crate::extractor::tests::{FakeImages, block, page, png_bytes};
use crate::fetcher::PageFetcher;
use crate::tests::{anchors_at, cell_xml, drawing_xml, row_count, sheet_xml};
use crate::workitems::MemoryWorkItemStore;
use crate::{Settings, run};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use std::sync::Mutex;

/// Serves fixed markup, or fails when given none
struct FakeFetcher {
    markup: Option<String>,
    urls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn serving(markup: String) -> Self {
        Self {
            markup: Some(markup),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            markup: None,
            urls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.urls.lock().unwrap().push(url.to_string());
        self.markup.clone().ok_or(NewsError::FetchTimeout {
            selector: "article.story".to_string(),
            seconds: 10,
        })
    }
}

fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn settings(dir: &Path) -> Settings {
    Settings {
        base_url: "https://news.example.com/".to_string(),
        output_dir: dir.to_path_buf(),
        ..Settings::default()
    }
}

fn store() -> MemoryWorkItemStore {
    MemoryWorkItemStore::new()
        .with_variable("search_phrase", "budget")
        .with_variable("news_category", "politics")
        .with_variable("months_to_fetch", "1")
}

#[tokio::test]
async fn test_end_to_end_report() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::serving(page(&[
        block("Old budget news", "2023-11-02T09:00:00Z", None, "/img/old.jpg"),
        block("Budget talks", "2024-03-01T09:00:00Z", Some("Budget of $500 agreed"), "/img/a.jpg"),
        block("Weather", "2024-03-14T09:00:00Z", Some("Sunny"), "/img/b.jpg"),
    ]));
    let images = FakeImages::default()
        .with("https://news.example.com/img/old.jpg", png_bytes())
        .with("https://news.example.com/img/a.jpg", png_bytes())
        .with("https://news.example.com/img/b.jpg", png_bytes());
    let store = store();

    let summary = run(&store, &fetcher, &images, &settings(dir.path()), clock())
        .await
        .unwrap();

    assert_eq!(
        *fetcher.urls.lock().unwrap(),
        vec!["https://news.example.com/search/news?blob=budget".to_string()]
    );

    assert_eq!(summary.articles.len(), 2);
    assert_eq!(summary.articles.iter().filter(|a| a.contains_money).count(), 1);
    assert!(summary.articles[0].contains_money);
    assert_eq!(summary.articles[0].search_phrase_count, 2);
    assert_eq!(summary.articles[0].image_path, dir.path().join("image_1.jpg"));
    assert_eq!(summary.articles[1].image_path, dir.path().join("image_2.jpg"));

    // Saved sheet: header plus two rows, money flagged on the $500 row only
    let sheet = sheet_xml(&summary.report_path);
    assert_eq!(row_count(&sheet), 3);
    assert!(cell_xml(&sheet, "F2").contains("<v>1</v>"));
    assert!(cell_xml(&sheet, "F3").contains("<v>0</v>"));
    let drawing = drawing_xml(&summary.report_path);
    assert_eq!(anchors_at(&drawing, 1, 6), 1);
    assert_eq!(anchors_at(&drawing, 2, 6), 1);

    // Report saved, images cleaned up
    assert!(summary.report_path.is_absolute());
    assert!(summary.report_path.ends_with("news_data.xlsx"));
    assert!(summary.report_path.exists());
    for article in &summary.articles {
        assert!(!article.image_path.exists());
    }

    // Report handed to the output work item
    let outputs = store.outputs();
    assert_eq!(outputs.len(), 1);
    assert_eq!(
        outputs[0].files.get("news_data.xlsx"),
        Some(&summary.report_path)
    );
}

#[tokio::test]
async fn test_fetch_failure_gives_header_only_report() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::failing();
    let images = FakeImages::default();
    let store = store();

    let summary = run(&store, &fetcher, &images, &settings(dir.path()), clock())
        .await
        .unwrap();

    assert!(summary.articles.is_empty());
    assert!(summary.report_path.exists());
    assert_eq!(row_count(&sheet_xml(&summary.report_path)), 1);
    assert!(images.requested.lock().unwrap().is_empty());
    assert_eq!(store.outputs().len(), 1);
}

#[tokio::test]
async fn test_missing_configuration_aborts_before_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let fetcher = FakeFetcher::serving(page(&[]));
    let images = FakeImages::default();
    let store = MemoryWorkItemStore::new().with_variable("search_phrase", "budget");

    let err = run(&store, &fetcher, &images, &settings(&out), clock())
        .await
        .unwrap_err();

    assert!(matches!(err, NewsError::ConfigurationMissing(_)));
    assert!(fetcher.urls.lock().unwrap().is_empty());
    assert!(!out.exists());
    assert!(store.outputs().is_empty());
}

#[tokio::test]
async fn test_invalid_months_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::serving(page(&[]));
    let images = FakeImages::default();
    let store = store().with_variable("months_to_fetch", "soon");

    let err = run(&store, &fetcher, &images, &settings(dir.path()), clock())
        .await
        .unwrap_err();

    assert!(matches!(err, NewsError::ConfigurationInvalid { .. }));
    assert!(fetcher.urls.lock().unwrap().is_empty());
}
