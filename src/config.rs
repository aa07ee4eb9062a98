use crate::error::{NewsError, Result};
use crate::workitems::WorkItemStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Work item variable holding the phrase to search for
pub const SEARCH_PHRASE_KEY: &str = "search_phrase";
/// Work item variable holding the news category
pub const NEWS_CATEGORY_KEY: &str = "news_category";
/// Work item variable holding the number of months to look back
pub const MONTHS_TO_FETCH_KEY: &str = "months_to_fetch";

/// Days counted per month when computing the date limit
pub const DAYS_PER_MONTH: i64 = 30;

/// Parameters of a single run, resolved from the input work item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Phrase typed into the site search
    pub search_phrase: String,

    /// Category requested by the work item. Carried through, never used to filter.
    pub news_category: String,

    /// How many 30-day months back articles are kept
    pub months_to_fetch: u32,

    /// Articles published before this instant are dropped
    pub date_limit: DateTime<Utc>,
}

impl RunConfig {
    /// Build a config from already-parsed values
    pub fn new(
        search_phrase: impl Into<String>,
        news_category: impl Into<String>,
        months_to_fetch: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            search_phrase: search_phrase.into(),
            news_category: news_category.into(),
            months_to_fetch,
            date_limit: date_limit(now, months_to_fetch),
        }
    }

    /// Read the three run variables from the work item store
    pub fn resolve(store: &dyn WorkItemStore, now: DateTime<Utc>) -> Result<Self> {
        let search_phrase = store.variable(SEARCH_PHRASE_KEY)?;
        let news_category = store.variable(NEWS_CATEGORY_KEY)?;
        let months_raw = store.variable(MONTHS_TO_FETCH_KEY)?;
        let months_to_fetch = parse_months(&months_raw)?;

        let config = Self::new(search_phrase, news_category, months_to_fetch, now);
        ::log::info!(
            "Resolved run config: phrase={:?} category={:?} months={} date_limit={}",
            config.search_phrase,
            config.news_category,
            config.months_to_fetch,
            config.date_limit.to_rfc3339()
        );
        Ok(config)
    }
}

/// `now` minus `months` fixed 30-day months, clamped to the earliest
/// representable instant
pub fn date_limit(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(months) * DAYS_PER_MONTH)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn parse_months(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| NewsError::ConfigurationInvalid {
            key: MONTHS_TO_FETCH_KEY.to_string(),
            value: raw.to_string(),
        })
}

/// CSS selectors describing one search result block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSelectors {
    /// One match per article block; also what the fetcher waits for
    #[serde(default = "default_article_selector")]
    pub article: String,

    #[serde(default = "default_title_selector")]
    pub title: String,

    /// Element carrying the `datetime` attribute
    #[serde(default = "default_date_selector")]
    pub date: String,

    #[serde(default = "default_description_selector")]
    pub description: String,

    /// Element carrying the `src` attribute
    #[serde(default = "default_image_selector")]
    pub image: String,
}

impl Default for ArticleSelectors {
    fn default() -> Self {
        Self {
            article: default_article_selector(),
            title: default_title_selector(),
            date: default_date_selector(),
            description: default_description_selector(),
            image: default_image_selector(),
        }
    }
}

/// Operational settings for the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Site the search is run against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Whether the browser runs without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Seconds to wait for the first search result to render
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Directory for temporary images and the final report
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_report_file_name")]
    pub report_file_name: String,

    /// Zero-based worksheet column images are anchored to
    #[serde(default = "default_image_column")]
    pub image_column: u16,

    #[serde(default)]
    pub selectors: ArticleSelectors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            wait_timeout_secs: default_wait_timeout_secs(),
            output_dir: default_output_dir(),
            report_file_name: default_report_file_name(),
            image_column: default_image_column(),
            selectors: ArticleSelectors::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, filling absent fields with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    /// Full path of the report file
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }
}

fn default_article_selector() -> String {
    "article.story".to_string()
}

fn default_title_selector() -> String {
    "h3".to_string()
}

fn default_date_selector() -> String {
    "time[datetime]".to_string()
}

fn default_description_selector() -> String {
    "p".to_string()
}

fn default_image_selector() -> String {
    "img[src]".to_string()
}

fn default_base_url() -> String {
    "https://www.reuters.com".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_wait_timeout_secs() -> u64 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/output")
}

fn default_report_file_name() -> String {
    "news_data.xlsx".to_string()
}

/// Column G, the first one right of the six data columns
fn default_image_column() -> u16 {
    6
}
