//! Output writers for reports and event logs.
//!
//! This module handles:
//! - JSON reports (pretty)
//! - CSV event log export
//! - Terminal rendering

pub mod csv;
pub mod json;
pub mod terminal;

// Re-export main functions
pub use csv::export_csv;
pub use json::{read_report, write_report};
pub use terminal::{render_events, render_kpis, render_metrics, render_replay, sparkline};
