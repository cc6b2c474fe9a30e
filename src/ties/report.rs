use std::collections::{BTreeSet, HashMap};

use super::types::{Decision, EventOutcome};

/// Running tally of one sport's events
#[derive(Debug, Clone)]
pub struct TieReport {
    pub sport: String,
    /// Events in the classified schedule, visited or not
    pub total_events: usize,
    pub outcomes: Vec<EventOutcome>,
    pub races: usize,
    /// Tied time groups across all decided events
    pub ties: usize,
    pub gold_silver: Vec<f64>,
    pub bronze_fourth: Vec<f64>,
    buckets: HashMap<Decision, BTreeSet<String>>,
}

impl TieReport {
    pub fn new(sport: &str, total_events: usize) -> Self {
        Self {
            sport: sport.to_string(),
            total_events,
            outcomes: Vec::new(),
            races: 0,
            ties: 0,
            gold_silver: Vec::new(),
            bronze_fourth: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    pub fn record(&mut self, outcome: EventOutcome) {
        self.buckets
            .entry(outcome.decision)
            .or_default()
            .insert(outcome.event.clone());
        self.races += outcome.races;

        if outcome.decision != Decision::Pending {
            self.ties += outcome.tied.len();
            self.gold_silver.extend(outcome.reaction.gold_silver_gap());
            self.bronze_fourth.extend(outcome.reaction.bronze_fourth_gap());
        }

        self.outcomes.push(outcome);
    }

    /// Distinct events recorded under `decision`
    pub fn events_in(&self, decision: Decision) -> Vec<&str> {
        self.buckets
            .get(&decision)
            .map(|events| events.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, decision: Decision) -> usize {
        self.buckets.get(&decision).map_or(0, BTreeSet::len)
    }

    pub fn mean_gold_silver(&self) -> Option<f64> {
        mean(&self.gold_silver)
    }

    pub fn mean_bronze_fourth(&self) -> Option<f64> {
        mean(&self.bronze_fourth)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
