//! Terminal output rendering for deviation reports.

use super::schema::{ActivityDeviation, DeviationReport};
use crate::aggregator::human_duration;
use colored::*;

/// Render a human-readable summary of a deviation report for the terminal
pub fn render_terminal_deviations(report: &DeviationReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    for activity in &report.activities {
        out.push_str(&render_activity(activity));
    }
    out.push_str(&render_status(report));

    out
}

fn render_header(report: &DeviationReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Simulation vs Baseline".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!(
        "Threshold: +{:.0}% | Activities compared: {} | Flagged: {}\n",
        report.threshold * 100.0,
        report.activities.len(),
        report.flagged().count()
    ));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_activity(activity: &ActivityDeviation) -> String {
    let symbol = if activity.flagged {
        "▲".red().to_string()
    } else {
        "•".green().to_string()
    };
    let baseline_note = if activity.synthetic_baseline { " (synthetic)" } else { "" };

    format!(
        "{} {}: {} -> {} ({:+.1}%){}\n",
        symbol,
        activity.activity,
        human_duration(activity.effective_baseline_secs.round() as u64),
        human_duration(activity.candidate_avg_secs.round() as u64),
        activity.relative_change * 100.0,
        baseline_note
    )
}

fn render_status(report: &DeviationReport) -> String {
    if report.has_deviations() {
        let ids: Vec<&str> = report.deviated_step_ids.iter().map(String::as_str).collect();
        format!(
            "\n{} Deviated steps: {}\n",
            "DEVIATION".red().bold(),
            ids.join(", ")
        )
    } else {
        format!("\n{} No deviated steps\n", "OK".green().bold())
    }
}
