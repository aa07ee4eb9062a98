pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod report;
pub mod utils;
pub mod workitems;

#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use config::{RunConfig, Settings};
pub use error::{NewsError, Result};
pub use extractor::images::{HttpImageSource, ImageSource};
pub use fetcher::{PageFetcher, WebDriverFetcher};
pub use models::{ArticleRecord, RunSummary};
pub use workitems::{FileWorkItemStore, MemoryWorkItemStore, WorkItemStore};

use chrono::{DateTime, Utc};
use extractor::Extractor;

/// Run the whole job once: resolve the work item, fetch the results page,
/// extract articles, write the report and hand it to the output work item.
///
/// Configuration errors return before any network or file activity. A
/// failed page fetch is logged and produces a header-only report.
pub async fn run(
    store: &dyn WorkItemStore,
    fetcher: &dyn PageFetcher,
    images: &dyn ImageSource,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let config = RunConfig::resolve(store, now)?;
    let extractor = Extractor::new(settings)?;
    let url = utils::search_url(&settings.base_url, &config.search_phrase).map_err(|e| {
        NewsError::ConfigurationInvalid {
            key: "base_url".to_string(),
            value: format!("{} ({})", settings.base_url, e),
        }
    })?;

    std::fs::create_dir_all(&settings.output_dir)?;

    let markup = fetcher::fetch_results(fetcher, url.as_str()).await;
    let articles = extractor.extract(&markup, &config, images).await;

    let report_path = report::build_report(&articles, &settings.report_path(), settings.image_column)?;
    store.create_output(&report_path)?;

    ::log::info!(
        "Run complete: {} articles for {:?} written to {}",
        articles.len(),
        config.search_phrase,
        report_path.display()
    );

    Ok(RunSummary {
        report_path,
        articles,
    })
}
