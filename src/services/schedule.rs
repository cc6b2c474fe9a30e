use anyhow::Result;

use crate::cache::PageStore;
use crate::config::AppConfig;
use crate::domain::{EventEntry, Schedule};
use crate::http::PageFetcher;
use crate::scrape::{PageCache, ScheduleCollector};

/// Lists how a sport's schedule is split into events and rounds
pub struct ScheduleService {
    collector: ScheduleCollector,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            collector: ScheduleCollector::new(&config.scraper)?,
        })
    }

    pub async fn run<F: PageFetcher, S: PageStore>(
        &self,
        sport: &str,
        pages: &mut PageCache<F, S>,
    ) -> Result<Schedule> {
        self.collector.collect(sport, pages).await
    }

    /// One line per event, indented lines per round
    pub fn describe(schedule: &Schedule) -> String {
        let mut lines = Vec::new();

        for (event, entry) in schedule.iter() {
            lines.push(event.to_string());
            if let EventEntry::Rounds(_) = entry {
                for (round, row) in entry.rounds() {
                    let when = row
                        .scheduled_at
                        .map(|t| t.format(" (%Y-%m-%d %H:%M UTC)").to_string())
                        .unwrap_or_default();
                    lines.push(format!(
                        "    {} [{}]{}",
                        round,
                        row.column("Status").unwrap_or_default(),
                        when
                    ));
                }
            }
        }

        lines.join("\n")
    }
}
