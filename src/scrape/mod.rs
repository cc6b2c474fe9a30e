mod pages;
mod results;
mod schedule;
mod tables;
pub mod urls;

pub use pages::PageCache;
pub use results::{collect_results, parse_result_page};
pub use schedule::{parse_schedule_rows, ScheduleCollector};
