#![allow(dead_code)]

use anyhow::Result;
use std::collections::HashMap;

use olympic_ties::http::{PageFetcher, WaitFor};

pub const SCHEDULE_URL: &str =
    "https://olympics.com/tokyo-2020/olympic-games/en/results/swimming/olympic-schedule-and-results.htm";
pub const RESULTS_DIR: &str = "https://olympics.com/tokyo-2020/olympic-games/en/results/swimming";

/// Serves fixed pages and remembers what was asked for
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    pub requests: Vec<String>,
    pub closed: bool,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&mut self, url: &str, _wait: WaitFor) -> Result<String> {
        self.requests.push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no fixture for {}", url))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

pub struct ScheduleFixture {
    rows: Vec<String>,
}

impl ScheduleFixture {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Add a race linking to `../swimming/{page}`
    pub fn race(mut self, title: &str, status: &str, page: &str) -> Self {
        self.rows.push(format!(
            r#"<tr>
                <td class="schedule-time"><span class="schedule-time-data" full-date="2021-07-25T10:30:00+09:00">10:30</span></td>
                <td class="schedule-event"><a href="../swimming/{}">{}</a></td>
                <td class="schedule-status">{}</td>
            </tr>"#,
            page, title, status
        ));
        self
    }

    pub fn html(&self) -> String {
        format!(
            r#"<html><body><div class="table-responsive">
            <table class="table table-hover table-schedule">
              <thead><tr><th>Time</th><th>Event</th><th>Status</th></tr></thead>
              <tbody>{}</tbody>
            </table></div></body></html>"#,
            self.rows.concat()
        )
    }
}

/// Absolute URL the schedule link for `page` resolves to
pub fn result_url(page: &str) -> String {
    let tab = if page.contains("freestyle-relay") { 2 } else { 1 };
    format!("{}/{}#result-tab-{}", RESULTS_DIR, page, tab)
}

/// Result page with the given header and rows
pub fn result_html(header: &[&str], rows: &[Vec<String>]) -> String {
    let head: String = header.iter().map(|h| format!("<th>{}</th>", h)).collect();
    let body: String = rows
        .iter()
        .map(|r| {
            let cells: String = r.iter().map(|c| format!("<td>{}</td>", c)).collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!(
        r#"<html><body><ul><li><a class="nav-link">Results</a></li></ul>
        <table class="table table-result"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>
        </body></html>"#,
        head, body
    )
}

/// Individual result rows: (rank, name, reaction time, time)
pub fn individual(rows: &[(&str, &str, &str, &str)]) -> String {
    result_html(
        &["Rank", "Name", "ReactionTime", "Time"],
        &rows
            .iter()
            .map(|(rank, name, rt, time)| {
                vec![rank.to_string(), name.to_string(), rt.to_string(), time.to_string()]
            })
            .collect::<Vec<_>>(),
    )
}
