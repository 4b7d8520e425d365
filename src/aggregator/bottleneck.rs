//! Bottleneck selection and its one-line explanation.
//!
//! Score = avg duration * sqrt(max(count, 1)). Slow and frequent beats
//! slow once; the square root keeps high-volume fast steps from dominating.

use super::metrics::{compute_metrics_with, StepMetrics, StepMetricsMap};
use crate::model::{EventRecord, StepDefinition};
use crate::utils::config::EngineConfig;
use log::debug;
use serde::{Deserialize, Serialize};

/// Returned when there are no step definitions or no events
pub const NO_DATA_MESSAGE: &str = "No data yet to explain.";

/// Placeholder for a zero duration in display contexts
pub const EMPTY_DURATION: &str = "—";

/// The selected hotspot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub step_id: String,
    pub label: String,
    pub score: f64,
    pub avg_duration_secs: u64,
    pub on_time_percent: u8,
}

impl Bottleneck {
    pub fn explanation(&self) -> String {
        format!(
            "{} is the current hotspot — avg {}; on-time {}%.",
            self.label,
            human_duration(self.avg_duration_secs),
            self.on_time_percent
        )
    }
}

/// Bottleneck score for one step
pub fn score(metrics: &StepMetrics) -> f64 {
    metrics.avg_duration_secs as f64 * (metrics.count.max(1) as f64).sqrt()
}

/// Pick the strictly highest-scoring step; ties go to the earlier step
///
/// Returns `None` only when there are no steps. When every score is zero
/// the first step is still selected.
pub fn find_bottleneck(metrics: &StepMetricsMap) -> Option<Bottleneck> {
    let mut best: Option<(&StepMetrics, f64)> = None;

    for m in metrics.iter() {
        let s = score(m);
        let better = match best {
            Some((_, best_score)) => s > best_score,
            None => true,
        };
        if better {
            best = Some((m, s));
        }
    }

    best.map(|(m, s)| Bottleneck {
        step_id: m.step_id.clone(),
        label: m.label.clone(),
        score: s,
        avg_duration_secs: m.avg_duration_secs,
        on_time_percent: m.on_time_percent,
    })
}

/// One-sentence bottleneck explanation with default engine settings
pub fn explain_bottleneck(steps: &[StepDefinition], events: &[EventRecord]) -> String {
    explain_bottleneck_with(steps, events, &EngineConfig::default())
}

pub fn explain_bottleneck_with(
    steps: &[StepDefinition],
    events: &[EventRecord],
    config: &EngineConfig,
) -> String {
    if steps.is_empty() || events.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let metrics = compute_metrics_with(steps, events, config);
    explain_metrics(&metrics)
}

/// Explanation from precomputed metrics
pub fn explain_metrics(metrics: &StepMetricsMap) -> String {
    match find_bottleneck(metrics) {
        Some(bottleneck) => {
            debug!(
                "Bottleneck: {} (score {:.1})",
                bottleneck.label, bottleneck.score
            );
            bottleneck.explanation()
        }
        None => NO_DATA_MESSAGE.to_string(),
    }
}

/// Render seconds as `"<H>h <M>m"`, `"<M>m"` or `"<S>s"`; zero is `"—"`
pub fn human_duration(secs: u64) -> String {
    if secs == 0 {
        EMPTY_DURATION.to_string()
    } else if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::compute_metrics;
    use chrono::{TimeZone, Utc};

    fn event(activity: &str, secs: u64) -> EventRecord {
        EventRecord::complete("c1", activity, Utc.with_ymd_and_hms(2025, 8, 10, 8, 0, 0).unwrap(), secs)
    }

    #[test]
    fn test_human_duration() {
        assert_eq!(human_duration(0), "—");
        assert_eq!(human_duration(45), "45s");
        assert_eq!(human_duration(60), "1m");
        assert_eq!(human_duration(3599), "59m");
        assert_eq!(human_duration(5400), "1h 30m");
        assert_eq!(human_duration(7200), "2h 0m");
    }

    #[test]
    fn test_frequency_dampened_by_sqrt() {
        // B: 4 x 300s -> 600; A: 1 x 500s -> 500
        let steps = vec![StepDefinition::new("a", "A"), StepDefinition::new("b", "B")];
        let mut events = vec![event("A", 500)];
        events.extend((0..4).map(|_| event("B", 300)));

        let bottleneck = find_bottleneck(&compute_metrics(&steps, &events)).unwrap();
        assert_eq!(bottleneck.step_id, "b");
    }

    #[test]
    fn test_tie_goes_to_first_step() {
        let steps = vec![StepDefinition::new("a", "A"), StepDefinition::new("b", "B")];
        let events = vec![event("B", 600), event("A", 600)];

        let bottleneck = find_bottleneck(&compute_metrics(&steps, &events)).unwrap();
        assert_eq!(bottleneck.step_id, "a");
    }

    #[test]
    fn test_explanation_format() {
        let steps = vec![StepDefinition::new("a", "CNC Milling").with_sla(2.0)];
        let events = vec![event("CNC Milling", 5400), event("CNC Milling", 14400)];

        assert_eq!(
            explain_bottleneck(&steps, &events),
            "CNC Milling is the current hotspot — avg 2h 45m; on-time 50%."
        );
    }

    #[test]
    fn test_no_data_sentinel() {
        let steps = vec![StepDefinition::new("a", "A")];
        assert_eq!(explain_bottleneck(&steps, &[]), NO_DATA_MESSAGE);
        assert_eq!(explain_bottleneck(&[], &[event("A", 10)]), NO_DATA_MESSAGE);
        assert_eq!(explain_metrics(&StepMetricsMap::default()), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_all_zero_scores_pick_first_step() {
        let steps = vec![StepDefinition::new("a", "A"), StepDefinition::new("b", "B")];

        assert_eq!(
            explain_bottleneck(&steps, &[event("A", 0)]),
            "A is the current hotspot — avg —; on-time 100%."
        );
        assert_eq!(
            explain_bottleneck(&steps, &[event("Z", 10)]),
            "A is the current hotspot — avg —; on-time 100%."
        );

        let bottleneck = find_bottleneck(&compute_metrics(&steps, &[event("B", 0)])).unwrap();
        assert_eq!(bottleneck.step_id, "a");
        assert_eq!(bottleneck.score, 0.0);
    }
}
