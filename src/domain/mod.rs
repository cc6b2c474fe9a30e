pub mod classifier;
pub mod models;
mod progress;

pub use classifier::{Classification, TitleClassifier};
pub use models::*;
pub use progress::EventProgress;
