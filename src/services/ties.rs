use anyhow::Result;
use log::info;

use crate::cache::PageStore;
use crate::config::AppConfig;
use crate::domain::EventProgress;
use crate::http::PageFetcher;
use crate::report::{render, ReportWriter};
use crate::scrape::{PageCache, ScheduleCollector};
use crate::ties::{evaluate_event, Decision, TieReport};

/// Schedule → per-event results → markdown report, for one sport
pub struct TieService {
    collector: ScheduleCollector,
    writer: ReportWriter,
}

impl TieService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            collector: ScheduleCollector::new(&config.scraper)?,
            writer: ReportWriter::new(&config.report.output_path),
        })
    }

    pub async fn run<F: PageFetcher, S: PageStore>(
        &self,
        sport: &str,
        pages: &mut PageCache<F, S>,
    ) -> Result<TieReport> {
        info!("=== Looking for ties in {} ===\n", sport);

        let schedule = self.collector.collect(sport, pages).await?;
        let mut report = TieReport::new(sport, schedule.len());
        let mut progress = EventProgress::new(schedule.len());

        for (event, entry) in schedule.iter() {
            let outcome = evaluate_event(event, entry, pages).await?;

            if outcome.decision == Decision::Pending {
                progress.increment_pending();
            } else {
                progress.increment_decided();
            }

            report.record(outcome);
            self.writer.write(&render(&report, false))?;
        }

        self.writer.write(&render(&report, true))?;
        info!(
            "=== Done: {} events, {} with ties, report at {} ===",
            report.total_events,
            report.count(Decision::Ties),
            self.writer.path().display()
        );
        Ok(report)
    }
}
