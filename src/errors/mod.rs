use thiserror::Error;

/// Structural failures while reading pages; all of them abort the run
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{what} tables not found at {url}")]
    TablesNotFound { what: &'static str, url: String },

    #[error("column '{column}' missing in row from {url}")]
    MissingColumn { column: &'static str, url: String },

    #[error("timed out after {secs}s waiting for '{marker}' on {url}")]
    PageNotReady {
        marker: &'static str,
        url: String,
        secs: u64,
    },

    #[error("no cached page for key '{key}' and live fetching is disabled")]
    CacheMiss { key: String },
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}
