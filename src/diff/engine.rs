//! Baseline comparison engine.
//!
//! Baseline averages use complete events only; candidate averages use every
//! candidate event, since simulated batches carry no in-progress rows.

use super::schema::{ActivityDeviation, DeviationReport};
use crate::aggregator::metrics::mean_duration;
use crate::model::{EventRecord, StepDefinition};
use crate::utils::config::{EngineConfig, REPORT_SCHEMA_VERSION};
use chrono::Utc;
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

/// Ids of step definitions whose candidate average deviates from baseline
///
/// Uses default engine settings (15% threshold, 0.9 synthetic factor).
pub fn compute_deviations(
    steps: &[StepDefinition],
    baseline: &[EventRecord],
    candidate: &[EventRecord],
) -> BTreeSet<String> {
    deviation_report(steps, baseline, candidate, &EngineConfig::default()).deviated_step_ids
}

/// Full per-activity deviation report
///
/// # Arguments
/// * `steps` - Current step definitions
/// * `baseline` - Historical events
/// * `candidate` - Latest simulated batch
/// * `config` - Threshold and synthetic baseline factor
pub fn deviation_report(
    steps: &[StepDefinition],
    baseline: &[EventRecord],
    candidate: &[EventRecord],
    config: &EngineConfig,
) -> DeviationReport {
    let baseline_avg = baseline_averages(baseline);
    let candidate_avg = candidate_averages(candidate);

    let mut activities = Vec::with_capacity(candidate_avg.len());
    let mut deviated_step_ids = BTreeSet::new();

    for (activity, cand) in candidate_avg {
        let history = baseline_avg.get(activity).copied();
        let (effective, synthetic) = match history {
            Some(avg) if avg > 0.0 => (avg, false),
            _ => (cand * config.synthetic_baseline_factor, true),
        };

        let relative_change = relative_change(cand, effective);
        let flagged = relative_change > config.deviation_threshold;

        let step_ids: Vec<String> = steps
            .iter()
            .filter(|s| s.label == activity)
            .map(|s| s.id.clone())
            .collect();

        if flagged {
            debug!(
                "{} deviates by {:.1}% (baseline {:.0}s, candidate {:.0}s)",
                activity,
                relative_change * 100.0,
                effective,
                cand
            );
            deviated_step_ids.extend(step_ids.iter().cloned());
        }

        activities.push(ActivityDeviation {
            activity: activity.to_string(),
            baseline_avg_secs: history,
            effective_baseline_secs: effective,
            candidate_avg_secs: cand,
            synthetic_baseline: synthetic,
            relative_change,
            flagged,
            step_ids,
        });
    }

    info!(
        "Deviation check: {} activities compared, {} steps flagged",
        activities.len(),
        deviated_step_ids.len()
    );

    DeviationReport {
        report_version: REPORT_SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        threshold: config.deviation_threshold,
        activities,
        deviated_step_ids,
    }
}

/// Relative slowdown; a zero baseline compares against 1
fn relative_change(candidate: f64, baseline: f64) -> f64 {
    let denominator = if baseline == 0.0 { 1.0 } else { baseline };
    (candidate - baseline) / denominator
}

/// Mean complete-event duration per activity
fn baseline_averages(events: &[EventRecord]) -> HashMap<&str, f64> {
    let mut grouped: HashMap<&str, Vec<u64>> = HashMap::new();
    for event in events.iter().filter(|e| e.is_complete()) {
        grouped.entry(event.activity.as_str()).or_default().push(event.duration());
    }

    grouped
        .into_iter()
        .filter_map(|(activity, values)| mean_duration(values.into_iter()).map(|avg| (activity, avg)))
        .collect()
}

/// Mean duration per activity over all events, in first-appearance order
fn candidate_averages(events: &[EventRecord]) -> Vec<(&str, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<u64>> = HashMap::new();

    for event in events {
        let activity = event.activity.as_str();
        grouped
            .entry(activity)
            .or_insert_with(|| {
                order.push(activity);
                Vec::new()
            })
            .push(event.duration());
    }

    order
        .into_iter()
        .filter_map(|activity| {
            grouped
                .remove(activity)
                .and_then(|values| mean_duration(values.into_iter()))
                .map(|avg| (activity, avg))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Lifecycle;
    use chrono::TimeZone;

    fn event(activity: &str, secs: u64) -> EventRecord {
        EventRecord::complete("c1", activity, Utc.with_ymd_and_hms(2025, 8, 10, 8, 0, 0).unwrap(), secs)
    }

    #[test]
    fn test_relative_change_zero_baseline() {
        assert_eq!(relative_change(0.0, 0.0), 0.0);
        assert_eq!(relative_change(5.0, 0.0), 5.0);
        assert_eq!(relative_change(900.0, 600.0), 0.5);
    }

    #[test]
    fn test_baseline_ignores_incomplete() {
        let events = vec![
            event("A", 600),
            event("A", 60_000).with_lifecycle(Lifecycle::Start),
        ];
        let avgs = baseline_averages(&events);
        assert_eq!(avgs.get("A"), Some(&600.0));
    }

    #[test]
    fn test_candidate_uses_all_lifecycles() {
        let events = vec![
            event("A", 600),
            event("A", 1000).with_lifecycle(Lifecycle::Start),
            event("B", 10),
        ];
        let avgs = candidate_averages(&events);
        assert_eq!(avgs, vec![("A", 800.0), ("B", 10.0)]);
    }

    #[test]
    fn test_zero_baseline_replaced_by_synthetic() {
        let steps = vec![StepDefinition::new("s1", "A")];
        let report = deviation_report(
            &steps,
            &[event("A", 0)],
            &[event("A", 1000)],
            &EngineConfig::default(),
        );
        let a = &report.activities[0];
        assert!(a.synthetic_baseline);
        assert_eq!(a.baseline_avg_secs, Some(0.0));
        assert!(!a.flagged);
    }

    #[test]
    fn test_flags_every_step_with_label() {
        let steps = vec![
            StepDefinition::new("s1", "A"),
            StepDefinition::new("s2", "A"),
            StepDefinition::new("s3", "B"),
        ];
        let set = compute_deviations(&steps, &[event("A", 600)], &[event("A", 900)]);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["s1", "s2"]);
    }
}
