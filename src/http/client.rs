use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use super::{PageFetcher, WaitFor};
use crate::config::ScraperSettings;
use crate::errors::fetch_context;

/// Plain HTTP fetcher with a fixed delay between consecutive requests.
///
/// Pages are returned as served; scripts are not run, so the `WaitFor`
/// marker is only checked and warned about.
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
    request_count: usize,
}

impl HttpFetcher {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = Self::build_client(settings.user_agent, settings.timeout_secs)?;

        Ok(Self {
            client,
            delay: Duration::from_millis(settings.rate_limit_ms),
            request_count: 0,
        })
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn wait_turn(&mut self) {
        if self.request_count > 0 {
            sleep(self.delay).await;
        }
        self.request_count += 1;
    }

    async fn send_get_request(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| fetch_context(url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} from {}", response.status(), url);
        }

        response.text().await.with_context(|| fetch_context(url))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&mut self, url: &str, wait: WaitFor) -> Result<String> {
        self.wait_turn().await;
        debug!("GET {}", url);

        let html = self.send_get_request(url).await?;
        if !html.contains(wait.class_name()) {
            warn!(
                "Page {} has no '{}' element; it may need a browser to render",
                url,
                wait.class_name()
            );
        }
        Ok(html)
    }
}
