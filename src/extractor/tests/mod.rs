
use crate::error::{NewsError, Result};
use crate::extractor::images::ImageSource;
use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgba};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

/// PNG bytes of a small solid image
pub(crate) fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    ImageBuffer::from_pixel(4, 4, Rgba([10u8, 120, 200, 128]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Image source serving fixed bytes per URL and recording requests
#[derive(Default)]
pub(crate) struct FakeImages {
    responses: HashMap<String, Vec<u8>>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeImages {
    pub fn with(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), bytes);
        self
    }
}

#[async_trait]
impl ImageSource for FakeImages {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| NewsError::Fetch(format!("404 for {}", url)))
    }
}

/// One result block in the default page layout
pub(crate) fn block(title: &str, datetime: &str, description: Option<&str>, img: &str) -> String {
    let description = description
        .map(|d| format!("<p>{}</p>", d))
        .unwrap_or_default();
    format!(
        r#"<article class="story"><h3> {} </h3><time datetime="{}">date</time>{}<img src="{}"></article>"#,
        title, datetime, description, img
    )
}

pub(crate) fn page(blocks: &[String]) -> String {
    format!(
        "<html><body><div class=\"results\">{}</div></body></html>",
        blocks.concat()
    )
}
