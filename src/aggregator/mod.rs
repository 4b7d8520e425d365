//! Aggregation of event snapshots into step metrics.
//!
//! This module transforms step definitions and event records into:
//! - Per-step metrics (count, average, on-time percentage, trend)
//! - A one-line bottleneck explanation
//! - Process-wide KPIs

pub mod bottleneck;
pub mod kpis;
pub mod metrics;

// Re-export main types and functions
pub use bottleneck::{
    explain_bottleneck, explain_bottleneck_with, explain_metrics, find_bottleneck, human_duration,
    Bottleneck, NO_DATA_MESSAGE,
};
pub use kpis::{compute_kpis, on_time_band, period_trend, OnTimeBand, ProcessKpis, TrendBucket};
pub use metrics::{compute_metrics, compute_metrics_with, StepMetrics, StepMetricsMap, TrendPoint};
