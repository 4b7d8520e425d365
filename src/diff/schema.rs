//! Schema definitions for deviation reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Candidate-vs-baseline comparison for every candidate activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationReport {
    /// Schema version for the report format
    pub report_version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Relative slowdown above which an activity is flagged
    pub threshold: f64,

    /// Per-activity comparison, in candidate first-appearance order
    pub activities: Vec<ActivityDeviation>,

    /// Ids of every step whose label matches a flagged activity
    pub deviated_step_ids: BTreeSet<String>,
}

impl DeviationReport {
    pub fn flagged(&self) -> impl Iterator<Item = &ActivityDeviation> {
        self.activities.iter().filter(|a| a.flagged)
    }

    pub fn has_deviations(&self) -> bool {
        !self.deviated_step_ids.is_empty()
    }
}

/// Comparison for one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDeviation {
    pub activity: String,

    /// Mean over complete baseline events, if there were any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_avg_secs: Option<f64>,

    /// Baseline actually compared against (synthetic when history is missing)
    pub effective_baseline_secs: f64,

    /// Mean over all candidate events
    pub candidate_avg_secs: f64,

    pub synthetic_baseline: bool,

    /// (candidate - baseline) / baseline
    pub relative_change: f64,

    pub flagged: bool,

    /// Step definitions carrying this label
    pub step_ids: Vec<String>,
}
