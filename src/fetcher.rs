use crate::config::Settings;
use crate::error::{NewsError, Result};
use async_trait::async_trait;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// Loads a rendered page and returns its markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetch the search results page, absorbing any failure.
///
/// A failed or timed-out load yields an empty page, which extracts to zero
/// articles.
pub async fn fetch_results(fetcher: &dyn PageFetcher, url: &str) -> String {
    ::log::info!("Fetching search results from {}", url);
    match fetcher.fetch(url).await {
        Ok(markup) => {
            ::log::info!("Fetched {} bytes of result markup", markup.len());
            markup
        }
        Err(e) => {
            ::log::error!("Error fetching search results from {}: {}", url, e);
            String::new()
        }
    }
}

/// Page fetcher driving a browser through WebDriver
#[derive(Debug, Clone)]
pub struct WebDriverFetcher {
    webdriver_url: String,
    headless: bool,
    wait_selector: String,
    wait_timeout: Duration,
}

impl WebDriverFetcher {
    pub fn new(settings: &Settings) -> Self {
        Self {
            webdriver_url: settings.webdriver_url.clone(),
            headless: settings.headless,
            wait_selector: settings.selectors.article.clone(),
            wait_timeout: Duration::from_secs(settings.wait_timeout_secs),
        }
    }

    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::new();
        if self.headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless", "--no-sandbox", "--disable-gpu"] }),
            );
            caps.insert(
                "moz:firefoxOptions".to_string(),
                json!({ "args": ["-headless"] }),
            );
        }
        caps
    }

    /// Connects to the WebDriver instance
    async fn connect(&self) -> Result<Client> {
        let caps = self.capabilities();
        match ClientBuilder::native()
            .capabilities(caps.clone())
            .connect(&self.webdriver_url)
            .await
        {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Ok(client);
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
            }
        }

        // If we couldn't connect, try with common alternative URLs
        let fallback_urls = [
            "http://localhost:9515", // ChromeDriver default
            "http://localhost:4444", // Selenium / geckodriver default
            "http://127.0.0.1:4444", // Try with IP instead of localhost
        ];

        for url in fallback_urls.iter() {
            if *url == self.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native()
                .capabilities(caps.clone())
                .connect(url)
                .await
            {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
        }

        Err(NewsError::Fetch(format!(
            "no WebDriver server reachable at {} or fallbacks; set WEBDRIVER_URL",
            self.webdriver_url
        )))
    }

    /// Navigate, wait for the first result, read the source.
    ///
    /// A wait timeout is logged and whatever has rendered is still returned.
    async fn load(&self, client: &Client, url: &str) -> Result<String> {
        client
            .goto(url)
            .await
            .map_err(|e| NewsError::Fetch(format!("navigating to {}: {}", url, e)))?;

        let waited = client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(Locator::Css(&self.wait_selector))
            .await;

        if let Err(e) = waited {
            let err = match e {
                fantoccini::error::CmdError::WaitTimeout => NewsError::FetchTimeout {
                    selector: self.wait_selector.clone(),
                    seconds: self.wait_timeout.as_secs(),
                },
                other => NewsError::Fetch(format!("waiting for results: {}", other)),
            };
            ::log::error!("{} on {}", err, url);
        }

        client
            .source()
            .await
            .map_err(|e| NewsError::Fetch(format!("getting source for {}: {}", url, e)))
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let client = self.connect().await?;

        let result = self.load(&client, url).await;

        // The session is closed on both paths
        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        result
    }
}
