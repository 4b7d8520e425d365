//! Polling snapshot feed.
//!
//! Yields the current snapshot once, then a fresh full snapshot whenever any
//! document's stamp (mtime, length or content digest) changes. Callers
//! recompute on each item.

use super::{DocumentStamp, DocumentStore, JsonFileStore};
use crate::model::Snapshot;
use crate::utils::error::StoreError;
use log::debug;
use std::thread;
use std::time::Duration;

pub struct SnapshotFeed<'a> {
    store: &'a JsonFileStore,
    interval: Duration,
    last_seen: Option<Vec<Option<DocumentStamp>>>,
    remaining: Option<usize>,
}

impl<'a> SnapshotFeed<'a> {
    pub fn new(store: &'a JsonFileStore, interval: Duration) -> Self {
        Self {
            store,
            interval,
            last_seen: None,
            remaining: None,
        }
    }

    /// Stop after `count` snapshots
    pub fn take_updates(mut self, count: usize) -> Self {
        self.remaining = Some(count);
        self
    }
}

impl Iterator for SnapshotFeed<'_> {
    type Item = Result<Snapshot, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }

        loop {
            let stamps = self.store.document_stamps();
            if self.last_seen.as_ref() != Some(&stamps) {
                debug!("Documents changed, loading snapshot");
                self.last_seen = Some(stamps);
                if let Some(n) = self.remaining.as_mut() {
                    *n -= 1;
                }
                return Some(self.store.load_snapshot());
            }
            thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_demo;
    use crate::utils::config::EVENTLOG_DOC;
    use std::fs::{self, File};

    fn log_with_case(case_id: &str) -> String {
        format!(
            r#"{{"rows":[{{"caseId":"{}","activity":"A","timestamp":"2025-08-10T08:05:00Z","lifecycle":"complete","durationSecs":60}}]}}"#,
            case_id
        )
    }

    #[test]
    fn test_first_snapshot_is_immediate() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        seed_demo(&store).unwrap();

        let snapshots: Vec<_> = SnapshotFeed::new(&store, Duration::from_millis(10))
            .take_updates(1)
            .collect();

        assert_eq!(snapshots.len(), 1);
        let snapshot = snapshots[0].as_ref().unwrap();
        assert!(!snapshot.steps.is_empty());
        assert!(!snapshot.events.is_empty());
    }

    #[test]
    fn test_same_size_rewrite_with_same_mtime_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let path = store.path_of(EVENTLOG_DOC);

        fs::write(&path, log_with_case("M-1001")).unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        let mut feed = SnapshotFeed::new(&store, Duration::from_millis(5));
        assert_eq!(feed.next().unwrap().unwrap().events[0].case_id, "M-1001");

        fs::write(&path, log_with_case("M-1002")).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(modified)
            .unwrap();

        assert_eq!(feed.next().unwrap().unwrap().events[0].case_id, "M-1002");
    }
}
