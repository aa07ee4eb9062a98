use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use url::Url;

/// Search page URL for `phrase` on the site at `base_url`
pub fn search_url(base_url: &str, phrase: &str) -> Result<Url, url::ParseError> {
    let base = base_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{}/search/news", base))?;
    url.query_pairs_mut().append_pair("blob", phrase);
    Ok(url)
}

/// Resolve an image `src` that may be relative to the site
pub fn resolve_url(base_url: &str, src: &str) -> Result<Url, url::ParseError> {
    match Url::parse(src) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base_url)?.join(src),
        Err(e) => Err(e),
    }
}

/// File name of the n-th accepted article's image (1-based)
pub fn image_file_name(position: usize) -> String {
    format!("image_{}.jpg", position)
}

/// Parse an ISO-8601 timestamp, keeping the offset it was written with.
/// Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
