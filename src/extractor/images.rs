use crate::error::{NewsError, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// Downloads image bytes
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Image source over plain HTTP GET
#[derive(Debug, Clone, Default)]
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| NewsError::Fetch(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| NewsError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Decode downloaded bytes and write them to `path` as JPEG.
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn save_as_jpeg(bytes: &[u8], path: &Path) -> std::result::Result<(), image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    rgb.save_with_format(path, ImageFormat::Jpeg)
}
