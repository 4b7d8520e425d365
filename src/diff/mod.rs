//! Deviation detection: candidate (simulated) runs against historical baseline.
//!
//! # Example
//! ```ignore
//! use flowlens::diff::{compute_deviations, deviation_report};
//!
//! let deviated = compute_deviations(&steps, &history, &latest_batch);
//! let report = deviation_report(&steps, &history, &latest_batch, &config);
//! println!("{}", render_terminal_deviations(&report));
//! ```

mod engine;
mod output;
mod schema;

// Public API exports
pub use engine::{compute_deviations, deviation_report};
pub use output::render_terminal_deviations;
pub use schema::{ActivityDeviation, DeviationReport};
