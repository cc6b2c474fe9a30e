mod browser;
mod client;
mod fetcher;

pub use browser::BrowserSession;
pub use client::HttpFetcher;
pub use fetcher::{OfflineFetcher, PageFetcher, WaitFor};

use anyhow::Result;

use crate::config::ScraperSettings;

/// How pages are fetched on a cache miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FetchMode {
    /// Headless Chrome through a WebDriver server
    Webdriver,
    /// Plain HTTP GET, no script execution
    Http,
    /// Caches only
    Offline,
}

/// Fetcher chosen at runtime from a `FetchMode`
pub enum Fetcher {
    Browser(BrowserSession),
    Http(HttpFetcher),
    Offline(OfflineFetcher),
}

impl Fetcher {
    pub fn new(mode: FetchMode, settings: &ScraperSettings) -> Result<Self> {
        Ok(match mode {
            FetchMode::Webdriver => Self::Browser(BrowserSession::new(settings)),
            FetchMode::Http => Self::Http(HttpFetcher::new(settings)?),
            FetchMode::Offline => Self::Offline(OfflineFetcher),
        })
    }
}

impl PageFetcher for Fetcher {
    async fn fetch(&mut self, url: &str, wait: WaitFor) -> Result<String> {
        match self {
            Self::Browser(session) => session.fetch(url, wait).await,
            Self::Http(client) => client.fetch(url, wait).await,
            Self::Offline(offline) => offline.fetch(url, wait).await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            Self::Browser(session) => session.close().await,
            Self::Http(client) => client.close().await,
            Self::Offline(offline) => offline.close().await,
        }
    }
}
