use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, info, warn};

use crate::scrapers::extract::extract_email;
use crate::scrapers::traits::EmailScraper;

/// Email scraper backed by headless Chrome.
///
/// Every lookup launches its own browser and tears it down afterwards, so
/// parallel lookups never share a browser process.
#[derive(Debug, Clone, Default)]
pub struct BrowserEmailScraper;

impl BrowserEmailScraper {
    pub fn new() -> Self {
        Self
    }

    /// Launch Chrome, load `url` and return the rendered page HTML
    fn fetch_page_html(url: &str) -> Result<String> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open tab")?;

        tab.navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        tab.wait_until_navigated()
            .with_context(|| format!("Navigation to {} did not complete", url))?;

        let html = tab.get_content().context("Failed to read page content")?;
        debug!("Loaded {} bytes from {}", html.len(), url);

        // Dropping the browser kills the Chrome process
        drop(browser);

        Ok(html)
    }

    fn scrape_blocking(url: &str) -> Result<Option<String>> {
        let html = Self::fetch_page_html(url)?;
        Ok(extract_email(&html))
    }
}

#[async_trait]
impl EmailScraper for BrowserEmailScraper {
    async fn find_email(&self, website: Option<&str>) -> Option<String> {
        let url = match website {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => return None,
        };

        info!("Scraping {} for a contact email", url);

        let task_url = url.clone();
        match tokio::task::spawn_blocking(move || Self::scrape_blocking(&task_url)).await {
            Ok(Ok(email)) => email,
            Ok(Err(e)) => {
                warn!("Error scraping website {}: {:#}", url, e);
                None
            }
            Err(e) => {
                warn!("Scrape task for {} failed: {}", url, e);
                None
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "headless_chrome"
    }
}
