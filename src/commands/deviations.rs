//! Deviation command: latest simulation batch against the event log.

use super::models::CommandContext;
use crate::diff::{deviation_report, render_terminal_deviations};
use crate::output::write_report;
use crate::store::DocumentStore;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

pub fn execute_deviations(ctx: &CommandContext, json_out: Option<PathBuf>) -> Result<()> {
    let snapshot = ctx.store.load_snapshot().context("Failed to load documents")?;

    if snapshot.candidate.is_empty() {
        warn!("No simulation batch found; run `flowlens simulate` first");
    }

    let report = deviation_report(
        &snapshot.steps,
        &snapshot.events,
        &snapshot.candidate,
        &ctx.config,
    );

    println!("{}", render_terminal_deviations(&report));

    if let Some(path) = json_out {
        write_report(&report, &path).context("Failed to write deviation report")?;
        info!("✓ Report written to: {}", path.display());
    }

    Ok(())
}
