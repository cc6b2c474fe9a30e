use crate::ties::{Decision, EventOutcome, TieReport};

const TIE_TABLE_HEADER: &str = "\ntime | rank | race | athlete | county";
const TIE_TABLE_RULE: &str = "---- | ---- | ---- | ------- | ------";

/// Markdown for the events recorded so far; `complete` adds the overall
/// stats block
pub fn render(report: &TieReport, complete: bool) -> String {
    let mut lines = vec![format!("# {}", report.sport)];

    for outcome in &report.outcomes {
        lines.extend(render_event(outcome));
    }

    if complete {
        lines.extend(render_stats(report));
    }

    lines.join("\n")
}

pub fn render_event(outcome: &EventOutcome) -> Vec<String> {
    let mut lines = vec![
        format!("### {}", outcome.event),
        format!(
            "races: {}, medals awarded: {}",
            outcome.round_count,
            if outcome.medals_awarded { "yes" } else { "no" }
        ),
    ];

    match outcome.decision {
        Decision::Ties => {
            lines.push(TIE_TABLE_HEADER.to_string());
            lines.push(TIE_TABLE_RULE.to_string());
            for bucket in &outcome.tied {
                lines.extend(bucket.iter().map(|entry| entry.line()));
            }
        }
        Decision::NoTies => lines.push("   no ties".to_string()),
        Decision::Pending => {}
    }

    lines
}

fn render_stats(report: &TieReport) -> Vec<String> {
    vec![
        "\n## Overall stats".to_string(),
        format!(
            "total races {} completed, races with ties {}\n",
            report.races, report.ties
        ),
        "total events | events with ties | without ties | not completed yet".to_string(),
        " --- | --- | --- | --- ".to_string(),
        format!(
            "{} | {} |  {} |  {}",
            report.total_events,
            report.count(Decision::Ties),
            report.count(Decision::NoTies),
            report.count(Decision::Pending)
        ),
        format!(
            "reaction time mean variance: gold-silver {} seconds,  bronze-4th {} seconds\n",
            seconds(report.mean_gold_silver()),
            seconds(report.mean_bronze_fourth())
        ),
    ]
}

fn seconds(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}
