use anyhow::Result;
use std::collections::HashMap;

/// Key-value store for fetched HTML documents
pub trait PageStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, html: &str) -> Result<()>;
}

/// In-memory store, nothing is persisted
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, key: &str, html: &str) -> Self {
        self.pages.insert(key.to_string(), html.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.pages.get(key).cloned())
    }

    fn put(&mut self, key: &str, html: &str) -> Result<()> {
        self.pages.insert(key.to_string(), html.to_string());
        Ok(())
    }
}
