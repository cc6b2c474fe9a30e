use anyhow::{Context, Result};
use log::{debug, info};

use crate::cache::PageStore;
use crate::errors::cache_context;
use crate::http::{PageFetcher, WaitFor};

/// Fetch session plus the two page caches it fills.
///
/// Schedule pages are keyed by `{sport}_{games}`, result pages by their
/// full URL. A cache miss is never an error here: it triggers a fetch.
pub struct PageCache<F, S> {
    fetcher: F,
    schedules: S,
    results: S,
}

impl<F: PageFetcher, S: PageStore> PageCache<F, S> {
    pub fn new(fetcher: F, schedules: S, results: S) -> Self {
        Self {
            fetcher,
            schedules,
            results,
        }
    }

    pub async fn schedule_page(&mut self, key: &str, url: &str) -> Result<String> {
        get_or_fetch(
            &mut self.fetcher,
            &mut self.schedules,
            key,
            url,
            WaitFor::ScheduleTable,
        )
        .await
    }

    pub async fn result_page(&mut self, url: &str) -> Result<String> {
        get_or_fetch(
            &mut self.fetcher,
            &mut self.results,
            url,
            url,
            WaitFor::ResultTabs,
        )
        .await
    }

    /// Close the fetch session
    pub async fn close(&mut self) -> Result<()> {
        self.fetcher.close().await
    }

    pub fn into_parts(self) -> (F, S, S) {
        (self.fetcher, self.schedules, self.results)
    }
}

async fn get_or_fetch<F: PageFetcher, S: PageStore>(
    fetcher: &mut F,
    store: &mut S,
    key: &str,
    url: &str,
    wait: WaitFor,
) -> Result<String> {
    if let Some(html) = store.get(key).with_context(|| cache_context("read", key))? {
        debug!("Cache hit: {}", key);
        return Ok(html);
    }

    let html = fetcher.fetch(url, wait).await?;
    store.put(key, &html)?;
    info!("fetched {}", url);
    Ok(html)
}
