//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod deviations;
pub mod events;
pub mod models;
pub mod replay;
pub mod simulate;
pub mod utils;
pub mod watch;

// Re-export main command functions
pub use analyze::{build_analysis, execute_explain, execute_metrics, AnalysisReport};
pub use deviations::execute_deviations;
pub use events::{execute_add_event, execute_events, execute_export_csv, AddEventArgs};
pub use models::CommandContext;
pub use replay::execute_replay;
pub use simulate::execute_simulate;
pub use utils::{display_version, execute_init, validate_documents};
pub use watch::execute_watch;
