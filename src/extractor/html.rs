use crate::config::ArticleSelectors;
use crate::error::{NewsError, Result};
use crate::models::RawArticle;
use scraper::{ElementRef, Html, Selector};

/// Compiled form of [`ArticleSelectors`]
pub struct BlockSelectors {
    article: Selector,
    title: Selector,
    date: Selector,
    description: Selector,
    image: Selector,
}

impl BlockSelectors {
    pub fn new(selectors: &ArticleSelectors) -> Result<Self> {
        Ok(Self {
            article: compile(&selectors.article)?,
            title: compile(&selectors.title)?,
            date: compile(&selectors.date)?,
            description: compile(&selectors.description)?,
            image: compile(&selectors.image)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| NewsError::ConfigurationInvalid {
        key: "selector".to_string(),
        value: format!("{} ({})", selector, e),
    })
}

/// Split result markup into article blocks and lift their fields.
///
/// Every block yields one entry, in page order. A block missing a required
/// field yields an error for that block only.
pub fn parse_blocks(markup: &str, selectors: &BlockSelectors) -> Vec<Result<RawArticle>> {
    let doc = Html::parse_document(markup);

    let blocks = doc
        .select(&selectors.article)
        .enumerate()
        .map(|(i, block)| parse_block(i + 1, block, selectors))
        .collect::<Vec<_>>();

    ::log::debug!("HTML parser found {} article blocks", blocks.len());
    blocks
}

fn parse_block(index: usize, block: ElementRef<'_>, selectors: &BlockSelectors) -> Result<RawArticle> {
    let title = first_text(block, &selectors.title)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| NewsError::parse(index, "missing title"))?;

    let published = block
        .select(&selectors.date)
        .next()
        .and_then(|e| e.value().attr("datetime"))
        .map(|d| d.trim().to_string())
        .ok_or_else(|| NewsError::parse(index, "missing datetime attribute"))?;

    let description = first_text(block, &selectors.description).unwrap_or_default();

    let image_src = block
        .select(&selectors.image)
        .next()
        .and_then(|e| e.value().attr("src"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NewsError::parse(index, "missing image src"))?;

    Ok(RawArticle {
        index,
        title,
        published,
        description,
        image_src,
    })
}

/// Whitespace-normalised text of the first match
fn first_text(block: ElementRef<'_>, selector: &Selector) -> Option<String> {
    block.select(selector).next().map(|e| {
        e.text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    })
}
