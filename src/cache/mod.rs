mod file_store;
mod store;

pub use file_store::FileStore;
pub use store::{MemoryStore, PageStore};
