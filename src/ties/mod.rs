pub mod aggregator;
pub mod report;
pub mod types;

pub use aggregator::{evaluate_event, is_decided, tally_event};
pub use report::TieReport;
pub use types::{Decision, EventOutcome, ReactionTimes, TimeBuckets, TimedEntry};
