//! Step definitions and event records as delivered by the document store.
//!
//! Field names follow the stored documents (`caseId`, `durationSecs`, `slaHrs`).

use crate::utils::config::SECS_PER_HOUR;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named stage in a process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    /// Unique, stable identifier
    pub id: String,

    /// Display name, joined against `EventRecord::activity`
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Expected maximum duration in hours (absent or zero = no SLA)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_hrs: Option<f64>,

    /// Display hint only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            owner: None,
            sla_hrs: None,
            color: None,
        }
    }

    pub fn with_sla(mut self, hours: f64) -> Self {
        self.sla_hrs = Some(hours);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// SLA in seconds, only when a positive SLA is set
    pub fn sla_secs(&self) -> Option<f64> {
        self.sla_hrs
            .filter(|h| *h > 0.0)
            .map(|h| h * SECS_PER_HOUR)
    }

    /// Whether a completed event of `duration_secs` meets this step's SLA
    pub fn is_on_time(&self, duration_secs: u64) -> bool {
        match self.sla_secs() {
            Some(limit) => duration_secs as f64 <= limit,
            None => true,
        }
    }
}

/// Lifecycle tag of an event; only `Complete` feeds numeric aggregates
///
/// Unrecognised tags are kept verbatim in `Other` so they survive a rewrite
/// of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Lifecycle {
    Schedule,
    Start,
    Complete,
    Suspend,
    Resume,
    Abort,
    Other(String),
}

impl Lifecycle {
    pub fn as_str(&self) -> &str {
        match self {
            Lifecycle::Schedule => "schedule",
            Lifecycle::Start => "start",
            Lifecycle::Complete => "complete",
            Lifecycle::Suspend => "suspend",
            Lifecycle::Resume => "resume",
            Lifecycle::Abort => "abort",
            Lifecycle::Other(tag) => tag,
        }
    }
}

impl From<String> for Lifecycle {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "schedule" => Lifecycle::Schedule,
            "start" => Lifecycle::Start,
            "complete" => Lifecycle::Complete,
            "suspend" => Lifecycle::Suspend,
            "resume" => Lifecycle::Resume,
            "abort" => Lifecycle::Abort,
            _ => Lifecycle::Other(tag),
        }
    }
}

impl From<Lifecycle> for String {
    fn from(lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// One observed occurrence of a step for a process instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Row id assigned by the store (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Process instance (trace) this event belongs to
    pub case_id: String,

    /// Joined against `StepDefinition::label` (case-sensitive)
    pub activity: String,

    pub timestamp: DateTime<Utc>,

    /// Elapsed seconds; absent or null means 0
    #[serde(default)]
    pub duration_secs: Option<u64>,

    pub lifecycle: Lifecycle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl EventRecord {
    /// A complete event, the common case
    pub fn complete(
        case_id: impl Into<String>,
        activity: impl Into<String>,
        timestamp: DateTime<Utc>,
        duration_secs: u64,
    ) -> Self {
        Self {
            id: None,
            case_id: case_id.into(),
            activity: activity.into(),
            timestamp,
            duration_secs: Some(duration_secs),
            lifecycle: Lifecycle::Complete,
            resource: None,
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Duration with the absent-means-zero default applied
    pub fn duration(&self) -> u64 {
        self.duration_secs.unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.lifecycle == Lifecycle::Complete
    }
}
