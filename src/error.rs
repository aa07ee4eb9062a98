use thiserror::Error;

pub type Result<T> = std::result::Result<T, NewsError>;

/// Errors raised by the pipeline stages.
///
/// Configuration, report and hand-off errors abort the run. Fetch errors
/// collapse to an empty results page, and article errors only drop the
/// article they belong to.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("configuration invalid: {key} = {value:?}")]
    ConfigurationInvalid { key: String, value: String },

    #[error("timed out after {seconds}s waiting for `{selector}`")]
    FetchTimeout { selector: String, seconds: u64 },

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("article {index}: {reason}")]
    ArticleParse { index: usize, reason: String },

    #[error("article {index}: image {url} failed: {reason}")]
    ImageDownload {
        index: usize,
        url: String,
        reason: String,
    },

    #[error("report write failed: {0}")]
    ReportWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("work item error: {0}")]
    WorkItem(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NewsError {
    pub(crate) fn parse(index: usize, reason: impl Into<String>) -> Self {
        NewsError::ArticleParse {
            index,
            reason: reason.into(),
        }
    }
}
