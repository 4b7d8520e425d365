//! Directory-of-JSON-files implementation of `DocumentStore`.

use super::{
    DocumentStore, EventLogDocument, SimulationRun, SimulationsDocument, WorkflowDocument,
};
use crate::model::{validate_events, validate_steps, EventRecord, StepDefinition};
use crate::utils::config::{EVENTLOG_DOC, SIMULATIONS_DOC, WORKFLOW_DOC};
use crate::utils::error::{ModelError, StoreError};
use chrono::Utc;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Change marker for one stored document
///
/// Length and content digest catch rewrites that land within one mtime tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStamp {
    pub modified: Option<SystemTime>,
    pub len: u64,
    pub digest: u64,
}

/// Documents stored as `workflow.json`, `eventlog.json`, `simulations.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, document: &str) -> PathBuf {
        self.dir.join(document)
    }

    pub fn exists(&self, document: &str) -> bool {
        self.path_of(document).exists()
    }

    /// Prepend one event (newest-first convention)
    pub fn append_event(&self, event: EventRecord) -> Result<(), StoreError> {
        validate_events(std::slice::from_ref(&event)).map_err(|e| self.invalid(EVENTLOG_DOC, e))?;
        let mut events = self.load_events()?;
        events.insert(0, event);
        self.save_events(&events)
    }

    /// Stamp of each document, `None` for missing or unreadable ones
    pub fn document_stamps(&self) -> Vec<Option<DocumentStamp>> {
        [WORKFLOW_DOC, EVENTLOG_DOC, SIMULATIONS_DOC]
            .iter()
            .map(|doc| self.stamp_of(doc))
            .collect()
    }

    fn stamp_of(&self, document: &str) -> Option<DocumentStamp> {
        let path = self.path_of(document);
        let meta = fs::metadata(&path).ok()?;
        let contents = fs::read(&path).ok()?;

        let mut hasher = DefaultHasher::new();
        contents.hash(&mut hasher);

        Some(DocumentStamp {
            modified: meta.modified().ok(),
            len: meta.len(),
            digest: hasher.finish(),
        })
    }

    fn read_doc<T: DeserializeOwned + Default>(&self, document: &str) -> Result<T, StoreError> {
        let path = self.path_of(document);
        if !path.exists() {
            debug!("{} not found, using empty document", path.display());
            return Ok(T::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::IoError {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|e| self.invalid(document, ModelError::JsonError(e)))
    }

    fn write_doc<T: Serialize>(&self, document: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_of(document);
        let io_err = |source| StoreError::IoError {
            path: path.display().to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let file = File::create(&path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(io_err)?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn invalid(&self, document: &str, source: ModelError) -> StoreError {
        StoreError::InvalidDocument {
            path: self.path_of(document).display().to_string(),
            source,
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load_steps(&self) -> Result<Vec<StepDefinition>, StoreError> {
        let doc: WorkflowDocument = self.read_doc(WORKFLOW_DOC)?;
        validate_steps(&doc.nodes).map_err(|e| self.invalid(WORKFLOW_DOC, e))?;
        Ok(doc.nodes)
    }

    fn load_events(&self) -> Result<Vec<EventRecord>, StoreError> {
        let doc: EventLogDocument = self.read_doc(EVENTLOG_DOC)?;
        validate_events(&doc.rows).map_err(|e| self.invalid(EVENTLOG_DOC, e))?;
        Ok(doc.rows)
    }

    fn load_latest_candidate(&self) -> Result<Vec<EventRecord>, StoreError> {
        let doc: SimulationsDocument = self.read_doc(SIMULATIONS_DOC)?;
        let rows = doc.history.into_iter().next().map(|run| run.rows).unwrap_or_default();
        validate_events(&rows).map_err(|e| self.invalid(SIMULATIONS_DOC, e))?;
        Ok(rows)
    }

    fn save_steps(&self, steps: &[StepDefinition]) -> Result<(), StoreError> {
        validate_steps(steps).map_err(|e| self.invalid(WORKFLOW_DOC, e))?;
        self.write_doc(
            WORKFLOW_DOC,
            &WorkflowDocument {
                nodes: steps.to_vec(),
                updated_at: Some(Utc::now()),
            },
        )
    }

    fn save_events(&self, events: &[EventRecord]) -> Result<(), StoreError> {
        validate_events(events).map_err(|e| self.invalid(EVENTLOG_DOC, e))?;
        self.write_doc(
            EVENTLOG_DOC,
            &EventLogDocument {
                rows: events.to_vec(),
                updated_at: Some(Utc::now()),
            },
        )
    }

    fn push_simulation(&self, rows: Vec<EventRecord>) -> Result<SimulationRun, StoreError> {
        validate_events(&rows).map_err(|e| self.invalid(SIMULATIONS_DOC, e))?;
        let mut doc: SimulationsDocument = self.read_doc(SIMULATIONS_DOC)?;

        let run = SimulationRun {
            id: format!("run-{}", doc.history.len() + 1),
            created_at: Utc::now(),
            rows,
        };
        doc.history.insert(0, run.clone());
        self.write_doc(SIMULATIONS_DOC, &doc)?;

        info!("Stored simulation {} ({} events)", run.id, run.rows.len());
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(case: &str) -> EventRecord {
        EventRecord::complete(case, "A", Utc.with_ymd_and_hms(2025, 8, 10, 8, 0, 0).unwrap(), 60)
    }

    #[test]
    fn test_missing_documents_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let snapshot = store.load_snapshot().unwrap();
        assert!(snapshot.steps.is_empty());
        assert!(snapshot.events.is_empty());
        assert!(snapshot.candidate.is_empty());
    }

    #[test]
    fn test_append_event_prepends() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.append_event(event("M-1")).unwrap();
        store.append_event(event("M-2")).unwrap();

        let events = store.load_events().unwrap();
        assert_eq!(events[0].case_id, "M-2");
        assert_eq!(events[1].case_id, "M-1");
    }

    #[test]
    fn test_latest_simulation_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.push_simulation(vec![event("SIM-A")]).unwrap();
        let run = store.push_simulation(vec![event("SIM-B")]).unwrap();

        assert_eq!(run.id, "run-2");
        let candidate = store.load_latest_candidate().unwrap();
        assert_eq!(candidate[0].case_id, "SIM-B");
    }

    #[test]
    fn test_duplicate_ids_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(WORKFLOW_DOC),
            r#"{"nodes":[{"id":"s1","label":"A"},{"id":"s1","label":"B"}]}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.load_steps(),
            Err(StoreError::InvalidDocument { source: ModelError::DuplicateStepId(_), .. })
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_reports_flush_failure() {
        let store = JsonFileStore::new("/dev");
        assert!(matches!(
            store.write_doc("full", &EventLogDocument::default()),
            Err(StoreError::IoError { .. })
        ));
    }

    #[test]
    fn test_append_keeps_unknown_lifecycles() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(EVENTLOG_DOC),
            r#"{"rows":[{"caseId":"M-1","activity":"A","timestamp":"2025-08-10T08:05:00Z","lifecycle":"paused","durationSecs":5}]}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(dir.path());
        store.append_event(event("M-2")).unwrap();

        let raw = fs::read_to_string(dir.path().join(EVENTLOG_DOC)).unwrap();
        assert!(raw.contains(r#""lifecycle": "paused""#));
        let events = store.load_events().unwrap();
        assert_eq!(events[1].lifecycle.as_str(), "paused");
    }

    #[test]
    fn test_malformed_json_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EVENTLOG_DOC), r#"{"rows":[{"caseId":1}]}"#).unwrap();

        let store = JsonFileStore::new(dir.path());
        assert!(store.load_events().is_err());
    }
}
