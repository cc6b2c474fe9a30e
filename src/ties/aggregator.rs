use anyhow::Result;
use log::{debug, info, warn};

use super::types::{Decision, EventOutcome, ReactionTimes, TimeBuckets, TimedEntry};
use crate::cache::PageStore;
use crate::domain::{is_no_time, EventEntry, RaceStatus, ResultSheet, FINAL_ROUND};
use crate::errors::ScrapeError;
use crate::http::PageFetcher;
use crate::scrape::{collect_results, PageCache};

/// The event's `Final` round has finished
pub fn is_decided(entry: &EventEntry) -> bool {
    entry
        .round(FINAL_ROUND)
        .is_some_and(|row| row.status() == RaceStatus::Finished)
}

/// Decide one event, fetching the results of its finished rounds.
///
/// Finished rounds are read even when the event ends up pending, so their
/// rows still count towards the races total. An event is pending when its
/// final hasn't finished or any round is still open.
pub async fn evaluate_event<F: PageFetcher, S: PageStore>(
    event: &str,
    entry: &EventEntry,
    pages: &mut PageCache<F, S>,
) -> Result<EventOutcome> {
    let mut decided = is_decided(entry);
    let medals_awarded = decided;
    let mut sheets = Vec::new();

    for (round, row) in entry.rounds() {
        match row.status() {
            RaceStatus::Cancelled => {
                debug!("{} {}: cancelled", event, round);
            }
            RaceStatus::Finished => {
                let url = row.url.as_deref().ok_or_else(|| ScrapeError::MissingColumn {
                    column: "url",
                    url: format!("{} {}", event, round),
                })?;
                sheets.push((round.to_string(), collect_results(pages, url).await?));
            }
            RaceStatus::Other(status) => {
                debug!("{} {}: {}", event, round, status);
                decided = false;
            }
        }
    }

    let outcome = tally_event(event, entry.round_count(), &sheets)?;
    if decided {
        Ok(outcome)
    } else {
        info!("{}: not decided yet", event);
        Ok(outcome.into_pending(medals_awarded))
    }
}

/// Bucket the finished rounds of an event by time.
///
/// Every row counts as a race. `DSQ`/`DNS` rows are then skipped. Rounds
/// whose label contains "Final" feed the reaction times; a team row there
/// makes them not applicable.
pub fn tally_event(
    event: &str,
    round_count: usize,
    sheets: &[(String, ResultSheet)],
) -> Result<EventOutcome> {
    let mut buckets = TimeBuckets::new();
    let mut reaction = ReactionTimes::default();
    let mut races = 0;

    for (round, sheet) in sheets {
        let is_final = round.contains(FINAL_ROUND);

        for row in sheet.rows() {
            races += 1;
            let time = row.time().ok_or_else(|| missing(event, round, "Time"))?;
            if is_no_time(time) {
                continue;
            }
            let rank = row.rank().ok_or_else(|| missing(event, round, "Rank"))?;

            buckets.add(TimedEntry {
                time: time.to_string(),
                rank: rank.to_string(),
                round: round.clone(),
                athlete: row.athlete(),
                country: row.country_code(),
            });

            if is_final {
                if row.is_team {
                    reaction = ReactionTimes::NotApplicable;
                } else if let Some(seconds) = row.reaction_time() {
                    reaction.record(rank, seconds);
                } else {
                    warn!(
                        "{} {}: no usable reaction time for {}, left out of the gaps",
                        event, round, row.name
                    );
                }
            }
        }
    }

    debug!("{}: {} distinct times in {} rows", event, buckets.len(), races);
    let tied = buckets.into_tied();
    let decision = if tied.is_empty() {
        Decision::NoTies
    } else {
        Decision::Ties
    };
    info!("{}: {} tied times", event, tied.len());

    Ok(EventOutcome {
        event: event.to_string(),
        round_count,
        medals_awarded: true,
        decision,
        races,
        tied,
        reaction,
    })
}

fn missing(event: &str, round: &str, column: &'static str) -> anyhow::Error {
    ScrapeError::MissingColumn {
        column,
        url: format!("{} {}", event, round),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::domain::{ResultRow, Schedule, ScheduleRow};
    use crate::http::OfflineFetcher;

    fn schedule_row(status: &str) -> ScheduleRow {
        ScheduleRow::from_cells(
            Some("https://o/r.htm#result-tab-1".to_string()),
            vec![
                ("Event".to_string(), "t".to_string()),
                ("Status".to_string(), status.to_string()),
            ],
        )
        .unwrap()
    }

    fn entry(rounds: &[(&str, &str)]) -> EventEntry {
        let mut schedule = Schedule::new();
        for (label, status) in rounds {
            schedule.insert("e", Some(label.to_string()), schedule_row(status));
        }
        schedule.get("e").unwrap().clone()
    }

    fn linked_entry(rounds: &[(&str, &str, &str)]) -> EventEntry {
        let mut schedule = Schedule::new();
        for (label, status, url) in rounds {
            let row = ScheduleRow::from_cells(
                Some(url.to_string()),
                vec![
                    ("Event".to_string(), "t".to_string()),
                    ("Status".to_string(), status.to_string()),
                ],
            )
            .unwrap();
            schedule.insert("e", Some(label.to_string()), row);
        }
        schedule.get("e").unwrap().clone()
    }

    fn result_page(rows: &[(&str, &str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(rank, name, time)| {
                format!("<tr><td>{}</td><td>{}</td><td>{}</td></tr>", rank, name, time)
            })
            .collect();
        format!(
            "<table class=\"table-result\"><thead><tr><th>Rank</th><th>Name</th><th>Time</th></tr></thead><tbody>{}</tbody></table>",
            body
        )
    }

    /// Cache holding only the given result pages; any fetch fails
    fn cached(pages: &[(&str, String)]) -> PageCache<OfflineFetcher, MemoryStore> {
        let results = pages
            .iter()
            .fold(MemoryStore::new(), |store, (url, html)| store.with_page(url, html));
        PageCache::new(OfflineFetcher, MemoryStore::new(), results)
    }

    fn sheet(rows: &[(&str, &str, &str, Option<&str>)]) -> ResultSheet {
        let mut sheet = ResultSheet::new();
        for (rank, name, time, reaction) in rows {
            let mut cells = vec![
                ("Rank".to_string(), rank.to_string()),
                ("Name".to_string(), name.to_string()),
                ("Time".to_string(), time.to_string()),
            ];
            if let Some(r) = reaction {
                cells.push(("ReactionTime".to_string(), r.to_string()));
            }
            sheet.insert(ResultRow::from_cells(cells).unwrap());
        }
        sheet
    }

    #[test]
    fn test_decided_needs_finished_final() {
        assert!(is_decided(&entry(&[("Heat 1", "Finished"), ("Final", "Finished")])));
        assert!(!is_decided(&entry(&[("Heat 1", "Finished"), ("Final", "Scheduled")])));
        assert!(!is_decided(&entry(&[("Heat 1", "Finished")])));
        assert!(!is_decided(&entry(&[("Final", "Cancelled")])));
    }

    #[test]
    fn test_shared_time_across_rounds_is_a_tie() {
        let sheets = vec![
            (
                "Heat 1".to_string(),
                sheet(&[("1", "USA A One", "47.50", None), ("2", "AUS B Two", "47.90", None)]),
            ),
            (
                "Heat 2".to_string(),
                sheet(&[("1", "ITA C Three", "47.50", None)]),
            ),
        ];
        let outcome = tally_event("Men's 100m Freestyle", 3, &sheets).unwrap();

        assert_eq!(outcome.decision, Decision::Ties);
        assert_eq!(outcome.races, 3);
        assert_eq!(outcome.tied.len(), 1);
        let lines: Vec<String> = outcome.tied[0].iter().map(TimedEntry::line).collect();
        assert_eq!(
            lines,
            vec!["47.50 | 1 | Heat 1 | A One | USA", "47.50 | 1 | Heat 2 | C Three | ITA"]
        );
    }

    #[test]
    fn test_sentinel_times_never_tie() {
        let sheets = vec![(
            "Final".to_string(),
            sheet(&[
                ("1", "USA A One", "47.02", Some("0.59")),
                ("2", "AUS B Two", "47.08", Some("0.62")),
                ("", "ITA C Three", "DSQ", None),
                ("", "FRA D Four", "DSQ", None),
                ("", "GBR E Five", "DNS", None),
                ("", "CAN F Six", "DNS", None),
            ]),
        )];
        let outcome = tally_event("Men's 100m Freestyle", 1, &sheets).unwrap();

        assert_eq!(outcome.decision, Decision::NoTies);
        assert!(outcome.tied.is_empty());
        assert!((outcome.reaction.gold_silver_gap().unwrap() - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_team_final_has_no_reaction_times() {
        let mut team = ResultSheet::new();
        team.insert(
            ResultRow::from_cells(vec![
                ("Rank".to_string(), "1".to_string()),
                ("Team".to_string(), "USA United States".to_string()),
                ("Time".to_string(), "3:08.97".to_string()),
                ("ReactionTime".to_string(), "0.60".to_string()),
            ])
            .unwrap(),
        );
        let outcome = tally_event("Relay", 1, &[("Final".to_string(), team)]).unwrap();

        assert_eq!(outcome.reaction, ReactionTimes::NotApplicable);
    }

    #[test]
    fn test_reaction_times_only_from_final() {
        let sheets = vec![(
            "Heat 1".to_string(),
            sheet(&[("1", "USA A One", "47.02", Some("0.59"))]),
        )];
        let outcome = tally_event("e", 2, &sheets).unwrap();
        assert_eq!(outcome.reaction, ReactionTimes::default());
    }

    #[test]
    fn test_missing_time_column_is_fatal() {
        let mut s = ResultSheet::new();
        s.insert(
            ResultRow::from_cells(vec![("Name".to_string(), "USA A".to_string())]).unwrap(),
        );
        let err = tally_event("e", 1, &[("Final".to_string(), s)]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::MissingColumn { column: "Time", .. })
        ));
    }

    #[test]
    fn test_every_result_row_counts_as_a_race() {
        let sheets = vec![(
            "Final".to_string(),
            sheet(&[
                ("1", "USA A One", "47.0", Some("0.60")),
                ("2", "AUS B Two", "47.1", Some("0.62")),
                ("", "ITA C Three", "DSQ", None),
            ]),
        )];
        let outcome = tally_event("e", 1, &sheets).unwrap();
        assert_eq!(outcome.races, 3);
    }

    #[tokio::test]
    async fn test_open_round_keeps_finished_rounds_counted() {
        let entry = linked_entry(&[
            ("Heat 1", "Finished", "https://o/h1.htm"),
            ("Heat 2", "Live", "https://o/h2.htm"),
            ("Final", "Finished", "https://o/f.htm"),
        ]);
        let mut pages = cached(&[
            (
                "https://o/h1.htm",
                result_page(&[("1", "USA A One", "47.50"), ("2", "AUS B Two", "47.50")]),
            ),
            ("https://o/f.htm", result_page(&[("1", "USA A One", "47.02")])),
        ]);

        let outcome = evaluate_event("e", &entry, &mut pages).await.unwrap();

        assert_eq!(outcome.decision, Decision::Pending);
        assert!(outcome.medals_awarded);
        assert_eq!(outcome.races, 3);
        assert!(outcome.tied.is_empty());
    }

    #[tokio::test]
    async fn test_unfinished_final_still_reads_heats() {
        let entry = linked_entry(&[
            ("Heat 1", "Finished", "https://o/h1.htm"),
            ("Final", "Scheduled", "https://o/f.htm"),
        ]);
        let mut pages = cached(&[(
            "https://o/h1.htm",
            result_page(&[("1", "USA A One", "15:40.00"), ("", "AUS B Two", "DNS")]),
        )]);

        let outcome = evaluate_event("e", &entry, &mut pages).await.unwrap();

        assert_eq!(outcome.decision, Decision::Pending);
        assert!(!outcome.medals_awarded);
        assert_eq!(outcome.races, 2);
        assert_eq!(outcome.round_count, 2);
    }

    #[tokio::test]
    async fn test_decided_event_skips_cancelled_rounds() {
        let entry = linked_entry(&[
            ("Heat 1", "Cancelled", "https://o/h1.htm"),
            ("Final", "Finished", "https://o/f.htm"),
        ]);
        let mut pages = cached(&[(
            "https://o/f.htm",
            result_page(&[("1", "USA A One", "47.02"), ("2", "AUS B Two", "47.08")]),
        )]);

        let outcome = evaluate_event("e", &entry, &mut pages).await.unwrap();

        assert_eq!(outcome.decision, Decision::NoTies);
        assert_eq!(outcome.races, 2);
    }

    #[test]
    fn test_unreadable_reaction_time_drops_only_its_gap() {
        let sheets = vec![(
            "Final".to_string(),
            sheet(&[
                ("1", "USA A One", "47.02", None),
                ("2", "AUS B Two", "47.08", Some("0.62")),
                ("3", "ITA C Three", "47.44", Some("0.63")),
                ("4", "FRA D Four", "47.65", Some("n/a")),
                ("5", "GBR E Five", "47.70", Some("0.66")),
            ]),
        )];
        let outcome = tally_event("e", 1, &sheets).unwrap();

        assert_eq!(outcome.reaction.gold_silver_gap(), None);
        assert_eq!(outcome.reaction.bronze_fourth_gap(), None);
        assert_eq!(outcome.races, 5);
    }
}
