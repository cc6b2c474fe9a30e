use anyhow::Result;
use log::{error, info};
use scraper::Html;

use super::tables::{body_rows, element_text, header_columns, selector};
use super::PageCache;
use crate::cache::PageStore;
use crate::domain::{ResultRow, ResultSheet};
use crate::errors::ScrapeError;
use crate::http::PageFetcher;

const RESULT_TABLE: &str = "table.table-result";
const RESULT_CONTAINER: &str = "div.ResultContentContainer";
const DIAGNOSTIC_CHARS: usize = 2000;

/// Load and parse the result page at `url`
pub async fn collect_results<F: PageFetcher, S: PageStore>(
    pages: &mut PageCache<F, S>,
    url: &str,
) -> Result<ResultSheet> {
    let html = pages.result_page(url).await?;
    let sheet = parse_result_page(&html, url)?;
    info!("  → {} result rows from {}", sheet.len(), url);
    Ok(sheet)
}

/// Parse the last result table of a page into rows keyed by name.
///
/// Team tables use `Team` as the name. A row without a name is fatal.
pub fn parse_result_page(html: &str, url: &str) -> Result<ResultSheet> {
    let document = Html::parse_document(html);
    let table = match document.select(&selector(RESULT_TABLE)?).last() {
        Some(table) => table,
        None => {
            log_container(&document, url)?;
            return Err(ScrapeError::TablesNotFound {
                what: "result",
                url: url.to_string(),
            }
            .into());
        }
    };

    let columns = header_columns(table)?;
    let cell = selector("td")?;
    let mut sheet = ResultSheet::new();

    for tr in body_rows(table)? {
        let cells = columns
            .iter()
            .cloned()
            .zip(tr.select(&cell).map(|td| element_text(td).trim().to_string()))
            .collect();

        match ResultRow::from_cells(cells) {
            Some(row) => sheet.insert(row),
            None => {
                error!("result row without a name at {}: {}", url, tr.html());
                return Err(ScrapeError::MissingColumn {
                    column: "Name",
                    url: url.to_string(),
                }
                .into());
            }
        }
    }

    Ok(sheet)
}

fn log_container(document: &Html, url: &str) -> Result<()> {
    error!("0 tables {}", url);
    if let Some(container) = document.select(&selector(RESULT_CONTAINER)?).next() {
        let snippet: String = container.html().chars().take(DIAGNOSTIC_CHARS).collect();
        error!("{}", snippet);
    }
    Ok(())
}
