pub mod settings;
pub mod sports;

pub use settings::{AppConfig, CacheSettings, ReportSettings, ScraperSettings};
pub use sports::{is_timed_sport, timed_sports, DEFAULT_SPORT};
