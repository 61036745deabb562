//! Headless Chromium scraper for JavaScript-rendered job postings.
//!
//! `headless_chrome` drives the browser synchronously, so the whole session
//! runs inside `tokio::task::spawn_blocking`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::job_input::PageScraper;

const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HeadlessBrowserScraper {
    chrome_path: Option<PathBuf>,
}

impl HeadlessBrowserScraper {
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self { chrome_path }
    }

    fn launch_options(&self) -> LaunchOptions<'static> {
        LaunchOptions {
            headless: true,
            sandbox: false,
            idle_browser_timeout: IDLE_BROWSER_TIMEOUT,
            path: self.chrome_path.clone(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl PageScraper for HeadlessBrowserScraper {
    async fn page_text(&self, url: &str) -> Result<String, AppError> {
        let options = self.launch_options();
        let url = url.to_string();

        info!("Launching headless browser for {url}");

        tokio::task::spawn_blocking(move || scrape_body_text(options, &url))
            .await
            .map_err(|e| AppError::Scrape(format!("browser task panicked: {e}")))?
    }
}

/// Navigates to `url`, waits for the page to settle and returns the body's rendered text.
fn scrape_body_text(options: LaunchOptions<'static>, url: &str) -> Result<String, AppError> {
    let browser = Browser::new(options)
        .map_err(|e| AppError::Scrape(format!("could not launch browser: {e}")))?;
    let tab = browser
        .new_tab()
        .map_err(|e| AppError::Scrape(format!("could not open tab: {e}")))?;

    tab.navigate_to(url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| AppError::Scrape(format!("navigation to {url} failed: {e}")))?;

    let text = tab
        .wait_for_element("body")
        .and_then(|body| body.get_inner_text())
        .map_err(|e| AppError::Scrape(format!("could not read page body: {e}")))?;

    debug!("Scraped {} chars from {url}", text.len());
    Ok(text)
}
