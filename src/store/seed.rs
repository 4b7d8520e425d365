//! Demo documents: a small manufacturing workflow and its event log.

use super::{DocumentStore, JsonFileStore};
use crate::model::{EventRecord, StepDefinition};
use crate::utils::config::{EVENTLOG_DOC, WORKFLOW_DOC};
use crate::utils::error::StoreError;
use chrono::{DateTime, TimeZone, Utc};
use log::info;

pub fn demo_steps() -> Vec<StepDefinition> {
    let step = |id: &str, label: &str, owner: &str, sla: f64, color: &str| StepDefinition {
        color: Some(color.to_string()),
        ..StepDefinition::new(id, label).with_owner(owner).with_sla(sla)
    };

    vec![
        step("receive", "Receive Raw Materials", "Inbound Team", 0.5, "#10b981"),
        step("laser", "Laser Cutting", "Operator Arun", 2.0, "#3b82f6"),
        step("cnc", "CNC Milling", "Operator Raj", 2.0, "#f59e0b"),
        step("assembly", "Assembly Line", "Team A", 2.0, "#8b5cf6"),
        step("qc", "Quality Check", "Inspector Meena", 0.5, "#ef4444"),
        step("final", "Final Inspection", "Inspector Ravi", 0.5, "#14b8a6"),
    ]
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Reference event log, in stored (insertion) order
pub fn demo_events() -> Vec<EventRecord> {
    let rows = [
        ("M-1001", "Receive Raw Materials", at(10, 8, 5), "Inbound Team", 600),
        ("M-1001", "CNC Milling", at(10, 8, 30), "Operator Raj", 5400),
        ("M-1001", "Quality Check", at(10, 10, 30), "Inspector Meena", 900),
        ("M-1002", "Receive Raw Materials", at(11, 9, 10), "Inbound Team", 480),
        ("M-1002", "Laser Cutting", at(11, 9, 40), "Operator Arun", 3600),
        ("M-1002", "CNC Milling", at(11, 10, 50), "Operator Raj", 7200),
        ("M-1002", "Quality Check", at(11, 12, 40), "Inspector Meena", 1200),
        ("M-1003", "Assembly Line", at(12, 7, 50), "Team A", 3600),
        ("M-1003", "Final Inspection", at(12, 9, 0), "Inspector Ravi", 900),
        ("M-1004", "CNC Milling", at(12, 11, 10), "Operator Raj", 14400),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (case, activity, ts, resource, secs))| {
            let mut event = EventRecord::complete(*case, *activity, *ts, *secs).with_resource(*resource);
            event.id = Some(format!("evt-{:04}", i + 1));
            event
        })
        .collect()
}

/// Write demo documents that do not exist yet
///
/// Returns how many documents were created.
pub fn seed_demo(store: &JsonFileStore) -> Result<usize, StoreError> {
    let mut created = 0;

    if !store.exists(WORKFLOW_DOC) {
        store.save_steps(&demo_steps())?;
        created += 1;
    }
    if !store.exists(EVENTLOG_DOC) {
        store.save_events(&demo_events())?;
        created += 1;
    }

    info!("Seeded {} demo documents in {}", created, store.dir().display());
    Ok(created)
}
