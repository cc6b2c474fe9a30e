//! Splits free-text event titles into an event name and a round label.
//!
//! Titles on the results site mix the event and the stage in one string
//! ("Men's 100m Freestyle Heat 3", "Men's Canoe, Final", "Men's 400m
//! Round 1 - Heat 2"). A fixed list of patterns is tried in priority order
//! and the first match wins. The patterns are character-class heuristics,
//! not a grammar: some titles split badly (for example "Women's Single
//! Sculls Final A" yields the round "Scull s"). Reports are grouped by
//! exactly these splits, so the misfires are kept as they are and locked
//! in by the tests below.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::Serialize;

/// Event name and optional round label parsed from a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub event: String,
    pub round: Option<String>,
}

impl Classification {
    fn new(event: &str, round: String) -> Self {
        Self {
            event: event.to_string(),
            round: Some(round),
        }
    }

    fn unrounded(title: &str) -> Self {
        Self {
            event: title.to_string(),
            round: None,
        }
    }
}

/// How a pattern's capture groups become a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// "{event} Heats|Repechage|Semifinal|Quarterfinal {n}"
    StageNumber,
    /// "{event}, {Semifinal|Final|Run n}"
    CommaStage,
    /// "{event} Round {n} {stage}"
    NumberedRound,
    /// "{event} {anything stage-like}"; last resort
    Fallback,
}

const STAGE_NUMBER: &str =
    r"([\s\w',]+) ([Heats|Repechage|Semifinal|Quarterfinal]+s*)\s*-*\s*([1-9stndrdthRuniSwim\-Off]+)";
const COMMA_STAGE: &str = r"([\s\w',]+), ([SemiQuarterFfinalsRun\s0-9]+)";
const NUMBERED_ROUND: &str =
    r"([\s\w',]+)\s(Round [0-9]+)\s,*-*\s*([QualificationPreliminaryRepechageRoundHeatRunQurSmifFnl].*)";
const FALLBACK: &str =
    r"([\s\w',]+) -*\s*([0-9stndQualificationQuarterPreliminaryRoundHeatRepechageRunQuarterfinalSmifFnls].*)";

/// Stage words the fallback pattern can leave stuck to the event name
const STRANDED_STAGES: [&str; 2] = ["Semifinals", "Quarterfinals"];

/// One pattern of the cascade
#[derive(Debug, Clone)]
pub struct RoundPattern {
    kind: PatternKind,
    regex: Regex,
}

impl RoundPattern {
    pub fn new(kind: PatternKind) -> Result<Self> {
        let source = match kind {
            PatternKind::StageNumber => STAGE_NUMBER,
            PatternKind::CommaStage => COMMA_STAGE,
            PatternKind::NumberedRound => NUMBERED_ROUND,
            PatternKind::Fallback => FALLBACK,
        };
        let regex = Regex::new(source)
            .with_context(|| format!("Failed to compile {:?} title pattern", kind))?;

        Ok(Self { kind, regex })
    }

    #[cfg(test)]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Classify `title` if this pattern matches anywhere in it
    pub fn apply(&self, title: &str) -> Option<Classification> {
        let caps = self.regex.captures(title)?;
        let event = group(&caps, 1);

        let classification = match self.kind {
            PatternKind::StageNumber | PatternKind::NumberedRound => {
                Classification::new(event, format!("{} {}", group(&caps, 2), group(&caps, 3)))
            }
            PatternKind::CommaStage => Classification::new(event, group(&caps, 2).to_string()),
            PatternKind::Fallback => unstrand_stage(event, group(&caps, 2)),
        };
        Some(classification)
    }
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Move a ", Semifinals" / ", Quarterfinals" tail from the event name to
/// the front of the round label
fn unstrand_stage(event: &str, round: &str) -> Classification {
    let mut event = event.to_string();
    let mut round = round.to_string();

    for stage in STRANDED_STAGES {
        let suffix = format!(", {}", stage);
        if event.ends_with(&suffix) {
            event = event.replace(&suffix, "");
            round = format!("{} {}", stage, round);
        }
    }

    Classification {
        event,
        round: Some(round),
    }
}

/// The full pattern cascade
#[derive(Debug, Clone)]
pub struct TitleClassifier {
    patterns: Vec<RoundPattern>,
}

impl TitleClassifier {
    /// Patterns in priority order, most specific first
    pub const PRIORITY: [PatternKind; 4] = [
        PatternKind::StageNumber,
        PatternKind::CommaStage,
        PatternKind::NumberedRound,
        PatternKind::Fallback,
    ];

    pub fn new() -> Result<Self> {
        let patterns = Self::PRIORITY
            .iter()
            .map(|&kind| RoundPattern::new(kind))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// First matching pattern wins; no match keeps the whole title as the
    /// event with no round
    pub fn classify(&self, title: &str) -> Classification {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.apply(title))
            .unwrap_or_else(|| Classification::unrounded(title))
    }

    /// Which pattern would classify `title`, if any
    #[cfg(test)]
    pub fn matching_kind(&self, title: &str) -> Option<PatternKind> {
        self.patterns
            .iter()
            .find(|pattern| pattern.regex.is_match(title))
            .map(RoundPattern::kind)
    }
}
