//! Terminal rendering for metrics, KPIs and raw event listings.

use crate::aggregator::{
    human_duration, on_time_band, OnTimeBand, ProcessKpis, StepMetrics, StepMetricsMap, TrendBucket,
};
use crate::model::EventRecord;
use crate::replay::{is_long_event, Replay};
use chrono::SecondsFormat;
use colored::*;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Per-step table with on-time bands and trend sparklines
pub fn render_metrics(metrics: &StepMetricsMap) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<28} {:>6} {:>10} {:>8}  {}\n",
        "Step", "Count", "Avg", "On-time", "Trend"
    ));
    out.push_str(&format!("{}\n", "-".repeat(72)));

    for m in metrics.iter() {
        out.push_str(&render_step(m));
    }
    out
}

fn render_step(m: &StepMetrics) -> String {
    let pct = format!("{:>7}%", m.on_time_percent);
    let pct = match on_time_band(m.on_time_percent) {
        OnTimeBand::Good => pct.green(),
        OnTimeBand::Warning => pct.yellow(),
        OnTimeBand::Critical => pct.red(),
    };
    let values: Vec<u64> = m.recent_trend.iter().map(|p| p.value).collect();

    format!(
        "{:<28} {:>6} {:>10} {}  {}\n",
        m.label,
        m.count,
        human_duration(m.avg_duration_secs),
        pct,
        sparkline(&values)
    )
}

/// Unicode block sparkline scaled to the series maximum
pub fn sparkline(values: &[u64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return values.iter().map(|_| SPARK_LEVELS[0]).collect();
    }
    values
        .iter()
        .map(|v| {
            let level = (*v as f64 / max as f64 * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

pub fn render_kpis(kpis: &ProcessKpis, trend: &[TrendBucket]) -> String {
    let buckets: Vec<String> = trend
        .iter()
        .map(|b| format!("{} {}m", b.name, b.avg_minutes))
        .collect();

    format!(
        "Active cases: {} | Completed events: {} | Avg time: {}\nPeriod trend: {}\n",
        kpis.active_cases,
        kpis.completed_events,
        human_duration(kpis.avg_duration_secs),
        buckets.join(" | ")
    )
}

/// Raw listing, durations in rounded minutes, long events marked
pub fn render_events(events: &[&EventRecord], alert_secs: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:<24} {:<22} {:<18} {:>8}\n",
        "Case", "Activity", "Time", "Resource", "Duration"
    ));

    for e in events {
        let minutes = (e.duration() as f64 / 60.0).round() as u64;
        let duration = if is_long_event(e, alert_secs) {
            format!("{}m ⚠️", minutes).red().to_string()
        } else {
            format!("{}m", minutes)
        };
        out.push_str(&format!(
            "{:<10} {:<24} {:<22} {:<18} {:>8}\n",
            e.case_id,
            e.activity,
            e.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            e.resource.as_deref().unwrap_or("—"),
            duration
        ));
    }
    out
}

pub fn render_replay(replay: &Replay) -> String {
    let mut out = format!("{}\n", replay.intro);
    for frame in &replay.frames {
        let marker = match frame.step_index {
            Some(i) => format!("[step #{}]", i + 1),
            None => "[unmapped]".dimmed().to_string(),
        };
        out.push_str(&format!(
            "  {} {} {}\n",
            frame.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            frame.narration,
            marker
        ));
    }
    out
}
