use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{PageFetcher, WaitFor};
use crate::config::ScraperSettings;
use crate::errors::{fetch_context, ScrapeError};

const COOKIE_BUTTON_ID: &str = "onetrust-accept-btn-handler";
const POLL_INTERVAL_MS: u64 = 500;

/// Headless Chrome session driven through a WebDriver server.
///
/// The browser is started on the first fetch and reused until `close`.
pub struct BrowserSession {
    webdriver_url: String,
    base_url: String,
    wait_timeout: Duration,
    driver: Option<WebDriver>,
}

impl BrowserSession {
    pub fn new(settings: &ScraperSettings) -> Self {
        Self {
            webdriver_url: settings.webdriver_url.clone(),
            base_url: settings.base_url.clone(),
            wait_timeout: Duration::from_secs(settings.wait_timeout_secs),
            driver: None,
        }
    }

    async fn driver(&mut self) -> Result<&WebDriver> {
        if self.driver.is_none() {
            let driver = self.start().await?;
            self.driver = Some(driver);
        }
        self.driver
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("browser session not started"))
    }

    async fn start(&self) -> Result<WebDriver> {
        info!("Starting headless browser via {}", self.webdriver_url);

        let mut caps = DesiredCapabilities::chrome();
        caps.add_chrome_option(
            "args",
            vec![
                "--headless=new",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--window-size=1920,1080",
            ],
        )?;

        let driver = WebDriver::new(&self.webdriver_url, caps)
            .await
            .context("Failed to connect to ChromeDriver")?;

        if let Err(e) = self.accept_cookies(&driver).await {
            let _ = driver.quit().await;
            return Err(e);
        }
        Ok(driver)
    }

    async fn accept_cookies(&self, driver: &WebDriver) -> Result<()> {
        driver
            .goto(&self.base_url)
            .await
            .with_context(|| fetch_context(&self.base_url))?;

        let button = driver
            .query(By::Id(COOKIE_BUTTON_ID))
            .wait(self.wait_timeout, Duration::from_millis(POLL_INTERVAL_MS))
            .first()
            .await
            .map_err(|_| self.not_ready(COOKIE_BUTTON_ID, &self.base_url))?;
        button.click().await.context("Failed to accept cookies")?;
        Ok(())
    }

    fn not_ready(&self, marker: &'static str, url: &str) -> anyhow::Error {
        ScrapeError::PageNotReady {
            marker,
            url: url.to_string(),
            secs: self.wait_timeout.as_secs(),
        }
        .into()
    }
}

impl PageFetcher for BrowserSession {
    async fn fetch(&mut self, url: &str, wait: WaitFor) -> Result<String> {
        let wait_timeout = self.wait_timeout;
        let driver = self.driver().await?;

        driver.goto(url).await.with_context(|| fetch_context(url))?;

        let ready = driver
            .query(By::ClassName(wait.class_name()))
            .wait(wait_timeout, Duration::from_millis(POLL_INTERVAL_MS))
            .first()
            .await;

        let source = match ready {
            Ok(_) => Some(driver.source().await.with_context(|| fetch_context(url))?),
            Err(_) => None,
        };

        source.ok_or_else(|| self.not_ready(wait.class_name(), url))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.quit().await {
                warn!("Failed to quit browser: {}", e);
            }
        }
        Ok(())
    }
}
