//! Trace replay for the live mirror view.
//!
//! A replay walks one case's events in chronological order and maps each
//! one to the step definition it highlights.

pub mod alerts;

pub use alerts::{is_long_event, long_events};

use crate::aggregator::metrics::first_index_by_label;
use crate::model::{EventRecord, StepDefinition};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// One step of a replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// 1-based position in the trace
    pub position: usize,
    pub activity: String,
    pub timestamp: DateTime<Utc>,
    /// Index of the first step definition with this label
    pub step_index: Option<usize>,
    pub narration: String,
}

/// A full case replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub case_id: String,
    pub intro: String,
    pub frames: Vec<ReplayFrame>,
}

/// Case id of the most recent event by timestamp
///
/// Ties go to the earlier event in document order.
pub fn latest_case(events: &[EventRecord]) -> Option<&str> {
    events
        .iter()
        .fold(None::<&EventRecord>, |best, e| match best {
            Some(b) if b.timestamp >= e.timestamp => Some(b),
            _ => Some(e),
        })
        .map(|e| e.case_id.as_str())
}

/// Build the replay of one case
///
/// Returns `None` when the case has no events.
pub fn build_replay(steps: &[StepDefinition], events: &[EventRecord], case_id: &str) -> Option<Replay> {
    let mut trace: Vec<&EventRecord> = events.iter().filter(|e| e.case_id == case_id).collect();
    if trace.is_empty() {
        return None;
    }
    trace.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let index = first_index_by_label(steps);
    let frames: Vec<ReplayFrame> = trace
        .iter()
        .enumerate()
        .map(|(i, e)| ReplayFrame {
            position: i + 1,
            activity: e.activity.clone(),
            timestamp: e.timestamp,
            step_index: index.get(e.activity.as_str()).copied(),
            narration: format!("Step {}: {}", i + 1, e.activity),
        })
        .collect();

    debug!("Replay for {}: {} frames", case_id, frames.len());

    Some(Replay {
        case_id: case_id.to_string(),
        intro: format!(
            "Playing trace for case {}. This trace contains {} steps.",
            case_id,
            frames.len()
        ),
        frames,
    })
}
