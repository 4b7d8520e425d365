//! Per-step metrics computed from an event snapshot.
//!
//! Every step definition gets an entry, even with no history. Events join
//! on `activity == label`; with duplicate labels the first definition in
//! sequence order receives the event.

use crate::model::{EventRecord, StepDefinition};
use crate::utils::config::{CountPolicy, EngineConfig};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One point in a step's recent-duration trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub value: u64,
    pub at: DateTime<Utc>,
}

/// Derived metrics for a single step definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetrics {
    pub step_id: String,
    pub label: String,

    /// Matching events, subject to the configured `CountPolicy`
    pub count: usize,

    /// Matching events with lifecycle `complete`
    pub complete_count: usize,

    /// Rounded mean over complete events (0 when none)
    pub avg_duration_secs: u64,

    /// 0..=100; 100 without SLA or without complete events
    pub on_time_percent: u8,

    /// Up to `trend_window` most recent complete durations, oldest first
    pub recent_trend: Vec<TrendPoint>,
}

/// Metrics for every step definition, in definition order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepMetricsMap {
    entries: Vec<StepMetrics>,
}

impl StepMetricsMap {
    /// Look up metrics by step id
    pub fn get(&self, step_id: &str) -> Option<&StepMetrics> {
        self.entries.iter().find(|m| m.step_id == step_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepMetrics> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<StepMetrics> {
        self.entries
    }
}

#[derive(Default)]
struct Accumulator<'a> {
    matched: usize,
    complete: Vec<&'a EventRecord>,
}

/// Compute per-step metrics with default engine settings
pub fn compute_metrics(steps: &[StepDefinition], events: &[EventRecord]) -> StepMetricsMap {
    compute_metrics_with(steps, events, &EngineConfig::default())
}

/// Compute per-step metrics
///
/// # Arguments
/// * `steps` - Step definitions, in sequence order
/// * `events` - Event snapshot, any order
/// * `config` - Trend window and count policy
///
/// # Returns
/// One `StepMetrics` per step definition, in definition order
pub fn compute_metrics_with(
    steps: &[StepDefinition],
    events: &[EventRecord],
    config: &EngineConfig,
) -> StepMetricsMap {
    let index = first_index_by_label(steps);
    let mut accumulators: Vec<Accumulator> = steps.iter().map(|_| Accumulator::default()).collect();
    let mut unmatched = 0usize;

    for event in events {
        match index.get(event.activity.as_str()) {
            Some(&i) => {
                let acc = &mut accumulators[i];
                acc.matched += 1;
                if event.is_complete() {
                    acc.complete.push(event);
                }
            }
            None => unmatched += 1,
        }
    }

    debug!(
        "Aggregated {} events over {} steps ({} unmatched)",
        events.len(),
        steps.len(),
        unmatched
    );

    let entries = steps
        .iter()
        .zip(accumulators)
        .map(|(step, acc)| finish_step(step, acc, config))
        .collect();

    StepMetricsMap { entries }
}

/// Map each label to the first step definition carrying it
pub(crate) fn first_index_by_label(steps: &[StepDefinition]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        index.entry(step.label.as_str()).or_insert(i);
    }
    index
}

fn finish_step(step: &StepDefinition, acc: Accumulator<'_>, config: &EngineConfig) -> StepMetrics {
    let complete_count = acc.complete.len();

    let avg_duration_secs = mean_duration(acc.complete.iter().map(|e| e.duration()))
        .map(round_secs)
        .unwrap_or(0);

    let on_time = acc
        .complete
        .iter()
        .filter(|e| step.is_on_time(e.duration()))
        .count();
    let on_time_percent = percent(on_time, complete_count);

    let count = match config.count_policy {
        CountPolicy::AllEvents => acc.matched,
        CountPolicy::CompleteOnly => complete_count,
    };

    StepMetrics {
        step_id: step.id.clone(),
        label: step.label.clone(),
        count,
        complete_count,
        avg_duration_secs,
        on_time_percent,
        recent_trend: recent_trend(acc.complete, config.trend_window),
    }
}

/// Most recent `window` events, oldest first
///
/// Sorted explicitly by timestamp (newest first, stable so ties keep
/// document order), truncated, then reversed for charting.
fn recent_trend(mut complete: Vec<&EventRecord>, window: usize) -> Vec<TrendPoint> {
    complete.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let mut trend: Vec<TrendPoint> = complete
        .into_iter()
        .take(window)
        .map(|e| TrendPoint {
            value: e.duration(),
            at: e.timestamp,
        })
        .collect();
    trend.reverse();
    trend
}

/// Arithmetic mean over the full set, `None` when empty
pub(crate) fn mean_duration(values: impl Iterator<Item = u64>) -> Option<f64> {
    let (sum, n) = values.fold((0u128, 0u64), |(s, n), v| (s + v as u128, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum as f64 / n as f64)
    }
}

/// Round half away from zero
pub(crate) fn round_secs(value: f64) -> u64 {
    value.round() as u64
}

/// `round(part / whole * 100)`, 100 for an empty whole
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 100;
    }
    ((part as f64 / whole as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}
