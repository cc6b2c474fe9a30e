use anyhow::Result;
use log::{debug, error, info};
use scraper::{ElementRef, Html, Selector};

use super::tables::{body_rows, element_text, header_columns, normalize_text, selector};
use super::urls::{
    directory_segments, resolve_relative, schedule_cache_key, schedule_url, with_result_tab,
};
use super::PageCache;
use crate::cache::PageStore;
use crate::config::ScraperSettings;
use crate::domain::{Schedule, ScheduleRow, TitleClassifier};
use crate::errors::ScrapeError;
use crate::http::PageFetcher;

const SCHEDULE_TABLE: &str = "table.table.table-hover.table-schedule";
const TIME_CELL_CLASS: &str = "schedule-time";

/// Loads a sport's schedule page and groups its rows by event and round
pub struct ScheduleCollector {
    classifier: TitleClassifier,
    base_url: String,
    games: String,
}

impl ScheduleCollector {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            classifier: TitleClassifier::new()?,
            base_url: settings.base_url.clone(),
            games: settings.games.clone(),
        })
    }

    pub fn url(&self, sport: &str) -> String {
        schedule_url(&self.base_url, &self.games, sport)
    }

    pub async fn collect<F: PageFetcher, S: PageStore>(
        &self,
        sport: &str,
        pages: &mut PageCache<F, S>,
    ) -> Result<Schedule> {
        let url = self.url(sport);
        let key = schedule_cache_key(sport, &self.games);
        info!("Loading {} schedule", sport);

        let html = pages.schedule_page(&key, &url).await?;
        let rows = parse_schedule_rows(&html, &url).inspect_err(|_| {
            error!("schedule tables not found for {}", sport);
            error!("{}", url);
        })?;

        let schedule = self.classify_rows(rows);
        info!("  → {} events in {} schedule", schedule.len(), sport);
        Ok(schedule)
    }

    pub fn classify_rows(&self, rows: Vec<ScheduleRow>) -> Schedule {
        let mut schedule = Schedule::new();

        for row in rows {
            let classification = self.classifier.classify(row.event());
            debug!(
                "{:?} -> {} | {:?}",
                row.event(),
                classification.event,
                classification.round
            );
            schedule.insert(&classification.event, classification.round, row);
        }
        schedule
    }
}

struct RowSelectors {
    cell: Selector,
    link: Selector,
    time: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            cell: selector("td")?,
            link: selector("a[href]")?,
            time: selector("span.schedule-time-data")?,
        })
    }
}

/// Extract the rows of every schedule table on the page.
///
/// Rows whose cell count differs from the header, or that lack `Event` or
/// `Status`, are dropped.
pub fn parse_schedule_rows(html: &str, page_url: &str) -> Result<Vec<ScheduleRow>> {
    let document = Html::parse_document(html);
    let tables: Vec<ElementRef> = document.select(&selector(SCHEDULE_TABLE)?).collect();

    if tables.is_empty() {
        return Err(ScrapeError::TablesNotFound {
            what: "schedule",
            url: page_url.to_string(),
        }
        .into());
    }

    let selectors = RowSelectors::new()?;
    let segments = directory_segments(page_url);
    let mut rows = Vec::new();

    for table in tables {
        let columns = header_columns(table)?;
        for tr in body_rows(table)? {
            if let Some(row) = parse_row(tr, &columns, &segments, &selectors) {
                rows.push(row);
            }
        }
    }

    Ok(rows)
}

fn parse_row(
    tr: ElementRef,
    columns: &[String],
    segments: &[&str],
    selectors: &RowSelectors,
) -> Option<ScheduleRow> {
    let mut url = None;
    let mut values = Vec::new();
    let mut full_date = None;

    for td in tr.select(&selectors.cell) {
        let href = td
            .select(&selectors.link)
            .next()
            .and_then(|a| a.value().attr("href"));
        if let Some(href) = href {
            url = Some(with_result_tab(&resolve_relative(href, segments)));
        }

        if td.value().classes().any(|c| c == TIME_CELL_CLASS) {
            let date = td
                .select(&selectors.time)
                .next()
                .and_then(|span| span.value().attr("full-date"));
            if let Some(date) = date {
                values.push(date.to_string());
                full_date = Some(date);
            }
        } else {
            values.push(normalize_text(&element_text(td)));
        }
    }

    if values.len() != columns.len() {
        debug!(
            "Dropping schedule row with {} cells for {} columns",
            values.len(),
            columns.len()
        );
        return None;
    }

    let cells = columns.iter().cloned().zip(values).collect();
    ScheduleRow::from_cells(url, cells).map(|row| row.with_scheduled_at(full_date))
}
