//! Flowlens
//!
//! Event-log aggregation for workflow dashboards: per-step metrics, a
//! one-line bottleneck explanation, and deviation detection of simulated
//! runs against historical baselines.
//!
//! The three core queries are pure functions over a snapshot:
//!
//! ```ignore
//! use flowlens::{compute_metrics, explain_bottleneck, compute_deviations};
//!
//! let metrics = compute_metrics(&steps, &events);
//! let sentence = explain_bottleneck(&steps, &events);
//! let deviated = compute_deviations(&steps, &events, &latest_batch);
//! ```

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod model;
pub mod output;
pub mod replay;
pub mod simulate;
pub mod store;
pub mod utils;

pub use aggregator::{compute_metrics, explain_bottleneck, StepMetrics, StepMetricsMap};
pub use diff::compute_deviations;
pub use model::{EventRecord, Lifecycle, StepDefinition};
