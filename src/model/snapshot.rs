//! Snapshot parsing and validation.
//!
//! The engine operations are total over well-formed input; everything that
//! can be malformed is rejected here, before aggregation runs.

use super::schema::{EventRecord, StepDefinition};
use crate::utils::error::ModelError;
use log::debug;
use std::collections::HashSet;

/// A consistent pair of step definitions and events, plus the latest
/// candidate (simulated) batch if one exists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub steps: Vec<StepDefinition>,
    pub events: Vec<EventRecord>,
    pub candidate: Vec<EventRecord>,
}

/// Parse a JSON array of step definitions and validate it
pub fn parse_steps(json: &str) -> Result<Vec<StepDefinition>, ModelError> {
    let steps: Vec<StepDefinition> = serde_json::from_str(json)?;
    validate_steps(&steps)?;
    debug!("Parsed {} step definitions", steps.len());
    Ok(steps)
}

/// Parse a JSON array of event records and validate it
pub fn parse_events(json: &str) -> Result<Vec<EventRecord>, ModelError> {
    let events: Vec<EventRecord> = serde_json::from_str(json)?;
    validate_events(&events)?;
    debug!("Parsed {} event records", events.len());
    Ok(events)
}

/// Check step-definition invariants: non-empty unique ids, non-empty labels,
/// finite non-negative SLAs
pub fn validate_steps(steps: &[StepDefinition]) -> Result<(), ModelError> {
    let mut seen = HashSet::new();

    for step in steps {
        if step.id.trim().is_empty() {
            return Err(ModelError::MissingField("step.id".to_string()));
        }
        if step.label.is_empty() {
            return Err(ModelError::MissingField(format!("step.label (id {})", step.id)));
        }
        if let Some(sla) = step.sla_hrs {
            if !sla.is_finite() || sla < 0.0 {
                return Err(ModelError::InvalidSla {
                    id: step.id.clone(),
                    value: sla,
                });
            }
        }
        if !seen.insert(step.id.as_str()) {
            return Err(ModelError::DuplicateStepId(step.id.clone()));
        }
    }

    Ok(())
}

/// Check event invariants: non-empty case id and activity
pub fn validate_events(events: &[EventRecord]) -> Result<(), ModelError> {
    for (index, event) in events.iter().enumerate() {
        if event.case_id.is_empty() {
            return Err(ModelError::MissingField(format!("events[{}].caseId", index)));
        }
        if event.activity.is_empty() {
            return Err(ModelError::MissingField(format!("events[{}].activity", index)));
        }
    }
    Ok(())
}
