//! Turns result markup into accepted article records.
//!
//! Blocks are handled one at a time in page order: parse, date filter,
//! image download, then text signals. Any failure drops only the block
//! it happened in.

pub mod html;
pub mod images;
pub mod signals;

#[cfg(test)]
pub(crate) mod tests;

use crate::config::{RunConfig, Settings};
use crate::error::{NewsError, Result};
use crate::models::{ArticleRecord, RawArticle};
use crate::utils::{image_file_name, parse_timestamp, resolve_url};
use html::BlockSelectors;
use images::ImageSource;
use std::path::{Path, PathBuf};

/// Article extraction for one results page
pub struct Extractor {
    selectors: BlockSelectors,
    base_url: String,
    image_dir: PathBuf,
}

impl Extractor {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            selectors: BlockSelectors::new(&settings.selectors)?,
            base_url: settings.base_url.clone(),
            image_dir: settings.output_dir.clone(),
        })
    }

    /// Extract, filter and download every article in `markup`.
    ///
    /// Returned records keep page order and all satisfy
    /// `published_date >= config.date_limit`. Images are named by position
    /// among accepted records, so dropped blocks leave no gaps.
    pub async fn extract(
        &self,
        markup: &str,
        config: &RunConfig,
        source: &dyn ImageSource,
    ) -> Vec<ArticleRecord> {
        let blocks = html::parse_blocks(markup, &self.selectors);
        let total = blocks.len();
        let mut records: Vec<ArticleRecord> = Vec::new();

        for block in blocks {
            let raw = match block {
                Ok(raw) => raw,
                Err(e) => {
                    ::log::warn!("Skipping article: {}", e);
                    continue;
                }
            };

            let Some(published_date) = parse_timestamp(&raw.published) else {
                ::log::warn!(
                    "Skipping article: {}",
                    NewsError::parse(raw.index, format!("bad date {:?}", raw.published))
                );
                continue;
            };

            if published_date < config.date_limit {
                ::log::debug!(
                    "Article {} published {} is older than {}, dropped",
                    raw.index,
                    published_date.to_rfc3339(),
                    config.date_limit.to_rfc3339()
                );
                continue;
            }

            let image_path = self.image_dir.join(image_file_name(records.len() + 1));
            if let Err(e) = self.download_image(&raw, &image_path, source).await {
                ::log::error!("Skipping article: {}", e);
                continue;
            }

            let record = build_record(raw, published_date, image_path, &config.search_phrase);
            ::log::debug!(
                "Accepted article {:?} (phrase count {}, money {})",
                record.title,
                record.search_phrase_count,
                record.contains_money
            );
            records.push(record);
        }

        ::log::info!(
            "Extracted {} of {} article blocks (date limit {})",
            records.len(),
            total,
            config.date_limit.format("%Y-%m-%d")
        );
        records
    }

    async fn download_image(
        &self,
        raw: &RawArticle,
        path: &Path,
        source: &dyn ImageSource,
    ) -> Result<()> {
        let url = resolve_url(&self.base_url, &raw.image_src).map_err(|e| {
            NewsError::parse(raw.index, format!("bad image src {:?}: {}", raw.image_src, e))
        })?;

        let failed = |reason: String| NewsError::ImageDownload {
            index: raw.index,
            url: url.to_string(),
            reason,
        };

        let bytes = source
            .fetch(url.as_str())
            .await
            .map_err(|e| failed(e.to_string()))?;
        images::save_as_jpeg(&bytes, path).map_err(|e| failed(e.to_string()))?;

        ::log::debug!("Saved image for article {} to {}", raw.index, path.display());
        Ok(())
    }
}

fn build_record(
    raw: RawArticle,
    published_date: chrono::DateTime<chrono::FixedOffset>,
    image_path: PathBuf,
    phrase: &str,
) -> ArticleRecord {
    let search_phrase_count = signals::search_phrase_count(&raw.title, &raw.description, phrase);
    let contains_money = signals::contains_money(&raw.title, &raw.description);

    ArticleRecord {
        title: raw.title,
        published_date,
        description: raw.description,
        image_path,
        search_phrase_count,
        contains_money,
    }
}
