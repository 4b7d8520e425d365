//! Metrics and bottleneck commands.

use super::models::CommandContext;
use crate::aggregator::{
    compute_kpis, compute_metrics_with, explain_bottleneck_with, explain_metrics, find_bottleneck,
    period_trend, Bottleneck, ProcessKpis, StepMetricsMap, TrendBucket, NO_DATA_MESSAGE,
};
use crate::model::Snapshot;
use crate::output::{render_kpis, render_metrics, write_report};
use crate::store::DocumentStore;
use crate::utils::config::{EngineConfig, REPORT_SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the analytics panel shows, as one serializable report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub report_version: String,
    pub generated_at: String,
    pub kpis: ProcessKpis,
    pub period_trend: Vec<TrendBucket>,
    pub steps: StepMetricsMap,
    pub bottleneck: Option<Bottleneck>,
    pub explanation: String,
}

/// Build the analysis report for one snapshot
pub fn build_analysis(snapshot: &Snapshot, config: &EngineConfig) -> AnalysisReport {
    let steps = compute_metrics_with(&snapshot.steps, &snapshot.events, config);

    let (bottleneck, explanation) = if snapshot.steps.is_empty() || snapshot.events.is_empty() {
        (None, NO_DATA_MESSAGE.to_string())
    } else {
        (find_bottleneck(&steps), explain_metrics(&steps))
    };

    AnalysisReport {
        report_version: REPORT_SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        kpis: compute_kpis(&snapshot.events),
        period_trend: period_trend(&snapshot.events),
        steps,
        bottleneck,
        explanation,
    }
}

/// Print the per-step table and KPIs, optionally writing the JSON report
pub fn execute_metrics(ctx: &CommandContext, json_out: Option<PathBuf>) -> Result<()> {
    let snapshot = ctx.store.load_snapshot().context("Failed to load documents")?;
    info!(
        "Computing metrics for {} steps over {} events",
        snapshot.steps.len(),
        snapshot.events.len()
    );

    let report = build_analysis(&snapshot, &ctx.config);

    println!("{}", render_kpis(&report.kpis, &report.period_trend));
    println!("{}", render_metrics(&report.steps));
    println!("Explain: {}", report.explanation);

    if let Some(path) = json_out {
        write_report(&report, &path).context("Failed to write analysis report")?;
        info!("✓ Report written to: {}", path.display());
    }

    Ok(())
}

/// Print the one-line bottleneck explanation
pub fn execute_explain(ctx: &CommandContext) -> Result<()> {
    let steps = ctx.store.load_steps().context("Failed to load workflow")?;
    let events = ctx.store.load_events().context("Failed to load event log")?;

    println!("{}", explain_bottleneck_with(&steps, &events, &ctx.config));
    Ok(())
}
