use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;

/// Fields lifted from one search result block, before filtering or download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    /// 1-based position of the block on the results page
    pub index: usize,

    pub title: String,

    /// Value of the date element's `datetime` attribute
    pub published: String,

    /// Empty when the block has no description
    pub description: String,

    /// Image `src` as written in the page
    pub image_src: String,
}

/// An accepted article, ready to be written to the report
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub title: String,

    /// Never earlier than the run's date limit. Keeps the offset the page
    /// gave, so the label is the page's own calendar date.
    pub published_date: DateTime<FixedOffset>,

    pub description: String,

    /// Downloaded image. Removed from disk once the report is saved.
    pub image_path: PathBuf,

    /// Case-insensitive occurrences of the search phrase in title and description
    pub search_phrase_count: usize,

    /// Whether title or description mentions an amount of money
    pub contains_money: bool,
}

impl ArticleRecord {
    /// Publication date as `YYYY-MM-DD`, in the page's offset
    pub fn date_label(&self) -> String {
        self.published_date.format("%Y-%m-%d").to_string()
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Absolute path of the saved report
    pub report_path: PathBuf,

    /// Records written to the report, in page order
    pub articles: Vec<ArticleRecord>,
}
