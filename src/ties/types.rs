use std::collections::HashMap;

/// Where an event ends up in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Decision {
    /// Final finished and at least two athletes share a time
    Ties,
    /// Final finished, every time is unique
    NoTies,
    /// Medals not settled yet
    Pending,
}

impl Decision {
    pub fn label(self) -> &'static str {
        match self {
            Decision::Ties => "yes",
            Decision::NoTies => "no",
            Decision::Pending => "tbd",
        }
    }
}

/// An athlete's finish in one round
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEntry {
    pub time: String,
    pub rank: String,
    pub round: String,
    pub athlete: String,
    pub country: String,
}

impl TimedEntry {
    /// Row of the report's tie table
    pub fn line(&self) -> String {
        format!(
            "{} | {} | {} | {} | {}",
            self.time, self.rank, self.round, self.athlete, self.country
        )
    }
}

/// Entries grouped by exact time text, groups in first-seen order
#[derive(Debug, Clone, Default)]
pub struct TimeBuckets {
    buckets: Vec<(String, Vec<TimedEntry>)>,
    index: HashMap<String, usize>,
}

impl TimeBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: TimedEntry) {
        match self.index.get(&entry.time) {
            Some(&i) => self.buckets[i].1.push(entry),
            None => {
                self.index.insert(entry.time.clone(), self.buckets.len());
                self.buckets.push((entry.time.clone(), vec![entry]));
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    #[cfg(test)]
    pub fn get(&self, time: &str) -> Option<&[TimedEntry]> {
        self.index.get(time).map(|&i| self.buckets[i].1.as_slice())
    }

    /// Groups holding two or more entries
    pub fn into_tied(self) -> Vec<Vec<TimedEntry>> {
        self.buckets
            .into_iter()
            .map(|(_, entries)| entries)
            .filter(|entries| entries.len() > 1)
            .collect()
    }
}

/// Final-round reaction times keyed by rank
#[derive(Debug, Clone, PartialEq)]
pub enum ReactionTimes {
    Individual(HashMap<String, f64>),
    /// Team events have no single reaction time
    NotApplicable,
}

impl Default for ReactionTimes {
    fn default() -> Self {
        ReactionTimes::Individual(HashMap::new())
    }
}

impl ReactionTimes {
    pub fn record(&mut self, rank: &str, seconds: f64) {
        if let ReactionTimes::Individual(by_rank) = self {
            by_rank.insert(rank.to_string(), seconds);
        }
    }

    /// |2nd - 1st|, or `None` when either is unknown
    pub fn gold_silver_gap(&self) -> Option<f64> {
        self.gap("1", "2")
    }

    /// |4th - 3rd|, or `None` when either is unknown
    pub fn bronze_fourth_gap(&self) -> Option<f64> {
        self.gap("3", "4")
    }

    fn gap(&self, upper: &str, lower: &str) -> Option<f64> {
        match self {
            ReactionTimes::Individual(by_rank) => {
                Some((by_rank.get(lower)? - by_rank.get(upper)?).abs())
            }
            ReactionTimes::NotApplicable => None,
        }
    }
}

/// Everything the report needs to know about one event
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub event: String,
    pub round_count: usize,
    pub medals_awarded: bool,
    pub decision: Decision,
    /// Finished rounds whose results were read
    pub races: usize,
    pub tied: Vec<Vec<TimedEntry>>,
    pub reaction: ReactionTimes,
}

impl EventOutcome {
    /// Same event, moved to the pending bucket. Rows already read still
    /// count as races; ties and reaction times are dropped.
    pub fn into_pending(self, medals_awarded: bool) -> Self {
        Self {
            medals_awarded,
            decision: Decision::Pending,
            tied: Vec::new(),
            reaction: ReactionTimes::default(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(time: &str, athlete: &str) -> TimedEntry {
        TimedEntry {
            time: time.to_string(),
            rank: "1".to_string(),
            round: "Heat 1".to_string(),
            athlete: athlete.to_string(),
            country: "USA".to_string(),
        }
    }

    #[test]
    fn test_buckets_group_exact_times() {
        let mut buckets = TimeBuckets::new();
        buckets.add(entry("47.02", "A"));
        buckets.add(entry("47.08", "B"));
        buckets.add(entry("47.02", "C"));
        buckets.add(entry("47.020", "D"));

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets.get("47.02").unwrap().len(), 2);

        let tied = buckets.into_tied();
        assert_eq!(tied.len(), 1);
        assert_eq!(tied[0][1].athlete, "C");
    }

    #[test]
    fn test_entry_line() {
        assert_eq!(
            entry("47.02", "DRESSEL Caeleb").line(),
            "47.02 | 1 | Heat 1 | DRESSEL Caeleb | USA"
        );
    }

    #[test]
    fn test_reaction_gaps() {
        let mut reaction = ReactionTimes::default();
        reaction.record("1", 0.59);
        reaction.record("2", 0.64);
        reaction.record("3", 0.70);

        assert!((reaction.gold_silver_gap().unwrap() - 0.05).abs() < 1e-9);
        assert_eq!(reaction.bronze_fourth_gap(), None);
        assert_eq!(ReactionTimes::NotApplicable.gold_silver_gap(), None);
    }

    #[test]
    fn test_not_applicable_ignores_records() {
        let mut reaction = ReactionTimes::NotApplicable;
        reaction.record("1", 0.5);
        assert_eq!(reaction, ReactionTimes::NotApplicable);
    }

    #[test]
    fn test_pending_keeps_races_only() {
        let mut reaction = ReactionTimes::default();
        reaction.record("1", 0.6);
        let outcome = EventOutcome {
            event: "Women's 1500m Freestyle".to_string(),
            round_count: 2,
            medals_awarded: true,
            decision: Decision::Ties,
            races: 11,
            tied: vec![vec![entry("15:40.00", "A"), entry("15:40.00", "B")]],
            reaction,
        }
        .into_pending(false);

        assert_eq!(outcome.decision, Decision::Pending);
        assert_eq!(outcome.races, 11);
        assert!(!outcome.medals_awarded);
        assert!(outcome.tied.is_empty());
        assert_eq!(outcome.reaction, ReactionTimes::default());
    }
}
