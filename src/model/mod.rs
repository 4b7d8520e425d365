//! Process data model.
//!
//! This module handles:
//! - Step definitions and event records
//! - Snapshot parsing and validation

pub mod schema;
pub mod snapshot;

// Re-export main types
pub use schema::{EventRecord, Lifecycle, StepDefinition};
pub use snapshot::{parse_events, parse_steps, validate_events, validate_steps, Snapshot};
