use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::PageStore;
use crate::errors::cache_context;

/// Page cache persisted as one JSON object per file.
///
/// The whole mapping is read on open and the whole file is rewritten on
/// every `put`. Two processes sharing a file will race; nothing guards it.
pub struct FileStore {
    path: PathBuf,
    pages: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty when the file doesn't exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let pages = Self::read_json_opt(&path)?.unwrap_or_default();

        debug!("Opened page cache {} ({} entries)", path.display(), pages.len());
        Ok(Self { path, pages })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Remove every entry and the backing file
    #[cfg(test)]
    pub fn clear(&mut self) -> Result<()> {
        self.pages.clear();
        if self.path.exists() {
            fs::remove_file(&self.path).context("Failed to clear cache")?;
        }

        log::info!("Cleared page cache {}", self.path.display());
        Ok(())
    }

    // --- Helper Methods ---

    fn write_json(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create cache directory")?;
        }

        let json = serde_json::to_string(&self.pages)?;
        fs::write(&self.path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt(path: &Path) -> Result<Option<BTreeMap<String, String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path).context("Failed to read cache file")?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(data))
    }
}

impl PageStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.pages.get(key).cloned())
    }

    fn put(&mut self, key: &str, html: &str) -> Result<()> {
        self.pages.insert(key.to_string(), html.to_string());
        self.write_json().with_context(|| cache_context("write", key))?;

        debug!("Saved page to cache {}: {}", self.path.display(), key);
        Ok(())
    }
}
