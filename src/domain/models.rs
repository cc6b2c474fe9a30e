use chrono::{DateTime, NaiveDateTime};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Round label that marks the medal race of an event
pub const FINAL_ROUND: &str = "Final";

/// Time cell values that carry no finishing time
pub const NO_TIME_SENTINELS: [&str; 2] = ["DSQ", "DNS"];

// --- Schedule ---

/// State of a scheduled race as shown in the `Status` column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RaceStatus {
    Finished,
    Cancelled,
    Other(String),
}

impl RaceStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "Finished" => RaceStatus::Finished,
            "Cancelled" => RaceStatus::Cancelled,
            other => RaceStatus::Other(other.to_string()),
        }
    }
}

/// One row of a schedule table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    /// Absolute result-page URL including the result tab fragment
    pub url: Option<String>,
    pub columns: BTreeMap<String, String>,
    pub scheduled_at: Option<NaiveDateTime>,
}

impl ScheduleRow {
    /// Build a row from header/value pairs.
    ///
    /// Returns `None` when `Event` or `Status` is missing. Only the first
    /// line of `Event` is kept.
    pub fn from_cells(url: Option<String>, cells: Vec<(String, String)>) -> Option<Self> {
        let mut columns: BTreeMap<String, String> = cells.into_iter().collect();

        let event = columns.get("Event")?;
        let title = event.split('\n').next().unwrap_or_default().to_string();
        columns.insert("Event".to_string(), title);

        if !columns.contains_key("Status") {
            return None;
        }

        Some(Self {
            url,
            columns,
            scheduled_at: None,
        })
    }

    pub fn with_scheduled_at(mut self, full_date: Option<&str>) -> Self {
        self.scheduled_at = full_date.and_then(parse_full_date);
        self
    }

    pub fn event(&self) -> &str {
        self.column("Event").unwrap_or_default()
    }

    pub fn status(&self) -> RaceStatus {
        RaceStatus::parse(self.column("Status").unwrap_or_default())
    }

    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(String::as_str)
    }
}

fn parse_full_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Rows recorded for one event name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventEntry {
    /// Title had no recognizable round; the row stands for the whole event
    Single(ScheduleRow),
    /// Rows keyed by unique round label, in first-seen order
    Rounds(Vec<(String, ScheduleRow)>),
}

impl EventEntry {
    /// Number of rounds (a single row counts as one)
    pub fn round_count(&self) -> usize {
        match self {
            EventEntry::Single(_) => 1,
            EventEntry::Rounds(rounds) => rounds.len(),
        }
    }

    /// Round label and row pairs; a single row is presented as the final
    pub fn rounds(&self) -> Vec<(&str, &ScheduleRow)> {
        match self {
            EventEntry::Single(row) => vec![(FINAL_ROUND, row)],
            EventEntry::Rounds(rounds) => rounds
                .iter()
                .map(|(label, row)| (label.as_str(), row))
                .collect(),
        }
    }

    pub fn round(&self, label: &str) -> Option<&ScheduleRow> {
        self.rounds()
            .into_iter()
            .find(|(l, _)| *l == label)
            .map(|(_, row)| row)
    }

    fn insert_round(&mut self, label: String, row: ScheduleRow) {
        if let EventEntry::Rounds(rounds) = self {
            match rounds.iter_mut().find(|(l, _)| *l == label) {
                Some(slot) => slot.1 = row,
                None => rounds.push((label, row)),
            }
            return;
        }

        debug!("Round '{}' replaces undivided entry for '{}'", label, row.event());
        *self = EventEntry::Rounds(vec![(label, row)]);
    }
}

/// Classified schedule of one sport, events in first-seen order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schedule {
    events: Vec<(String, EventEntry)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a row under `event`.
    ///
    /// With a round label the row is stored (or replaced) under that label;
    /// without one it overwrites whatever the event held before.
    pub fn insert(&mut self, event: &str, round: Option<String>, row: ScheduleRow) {
        let position = match self.index.get(event) {
            Some(&i) => i,
            None => {
                self.events
                    .push((event.to_string(), EventEntry::Rounds(Vec::new())));
                self.index.insert(event.to_string(), self.events.len() - 1);
                self.events.len() - 1
            }
        };

        let entry = &mut self.events[position].1;
        match round {
            Some(label) => entry.insert_round(label, row),
            None => *entry = EventEntry::Single(row),
        }
    }

    pub fn get(&self, event: &str) -> Option<&EventEntry> {
        self.index.get(event).map(|&i| &self.events[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventEntry)> {
        self.events.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// --- Results ---

/// One athlete or team line of a result table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// Athlete name, or the team name for team events
    pub name: String,
    pub is_team: bool,
    pub columns: BTreeMap<String, String>,
}

impl ResultRow {
    /// Build a row from header/value pairs; `None` when neither `Name` nor
    /// `Team` is present
    pub fn from_cells(cells: Vec<(String, String)>) -> Option<Self> {
        let columns: BTreeMap<String, String> = cells.into_iter().collect();

        let (name, is_team) = match columns.get("Team") {
            Some(team) => (team.clone(), true),
            None => (columns.get("Name")?.clone(), false),
        };

        Some(Self {
            name,
            is_team,
            columns,
        })
    }

    pub fn time(&self) -> Option<&str> {
        self.columns.get("Time").map(String::as_str)
    }

    pub fn rank(&self) -> Option<&str> {
        self.columns.get("Rank").map(String::as_str)
    }

    pub fn reaction_time(&self) -> Option<f64> {
        self.columns.get("ReactionTime")?.trim().parse().ok()
    }

    /// First three characters of the leading name token
    pub fn country_code(&self) -> String {
        self.name
            .split(' ')
            .next()
            .unwrap_or_default()
            .chars()
            .take(3)
            .collect()
    }

    /// Name without the leading country token
    pub fn athlete(&self) -> String {
        self.name.split(' ').skip(1).collect::<Vec<_>>().join(" ")
    }
}

pub fn is_no_time(time: &str) -> bool {
    NO_TIME_SENTINELS.contains(&time)
}

/// Rows of one result page keyed by name, in first-seen order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSheet {
    rows: Vec<ResultRow>,
}

impl ResultSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row; a repeated name replaces the earlier row in place
    pub fn insert(&mut self, row: ResultRow) {
        match self.rows.iter_mut().find(|r| r.name == row.name) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
