//! Document store holding the workflow, the event log and simulation history.
//!
//! Every read returns a full snapshot and every write replaces a whole
//! document; there are no partial updates.

pub mod feed;
pub mod json_file;
pub mod seed;

pub use feed::SnapshotFeed;
pub use json_file::{DocumentStamp, JsonFileStore};
pub use seed::{demo_events, demo_steps, seed_demo};

use crate::model::{EventRecord, Snapshot, StepDefinition};
use crate::utils::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `workflow.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    #[serde(default)]
    pub nodes: Vec<StepDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `eventlog.json`; rows are newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogDocument {
    #[serde(default)]
    pub rows: Vec<EventRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One stored candidate batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRun {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub rows: Vec<EventRecord>,
}

/// `simulations.json`; history is newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationsDocument {
    #[serde(default)]
    pub history: Vec<SimulationRun>,
}

/// Full-snapshot access to the three collections
pub trait DocumentStore {
    fn load_steps(&self) -> Result<Vec<StepDefinition>, StoreError>;

    fn load_events(&self) -> Result<Vec<EventRecord>, StoreError>;

    /// Rows of the newest simulation run, empty when there is none
    fn load_latest_candidate(&self) -> Result<Vec<EventRecord>, StoreError>;

    fn save_steps(&self, steps: &[StepDefinition]) -> Result<(), StoreError>;

    fn save_events(&self, events: &[EventRecord]) -> Result<(), StoreError>;

    /// Prepend a new run to the simulation history
    fn push_simulation(&self, rows: Vec<EventRecord>) -> Result<SimulationRun, StoreError>;

    fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot {
            steps: self.load_steps()?,
            events: self.load_events()?,
            candidate: self.load_latest_candidate()?,
        })
    }
}
