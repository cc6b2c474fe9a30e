use anyhow::Result;

use crate::errors::ScrapeError;

/// Element a page must contain before its source is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFor {
    ScheduleTable,
    ResultTabs,
}

impl WaitFor {
    /// CSS class of the element
    pub fn class_name(self) -> &'static str {
        match self {
            WaitFor::ScheduleTable => "table-responsive",
            WaitFor::ResultTabs => "nav-link",
        }
    }
}

/// A session that turns URLs into rendered HTML.
///
/// Calls are made one at a time; implementations may keep state (a browser,
/// a request counter) between them.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&mut self, url: &str, wait: WaitFor) -> Result<String>;

    /// Release the session; later fetches may reopen it
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Refuses every fetch, so only cached pages can be used
#[derive(Debug, Default)]
pub struct OfflineFetcher;

impl PageFetcher for OfflineFetcher {
    async fn fetch(&mut self, url: &str, _wait: WaitFor) -> Result<String> {
        Err(ScrapeError::CacheMiss {
            key: url.to_string(),
        }
        .into())
    }
}
