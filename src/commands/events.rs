//! Event log commands: listing, manual entry, CSV export.

use super::models::CommandContext;
use crate::model::EventRecord;
use crate::output::{export_csv, render_events};
use crate::store::DocumentStore;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::fs;
use std::path::Path;

/// Duration recorded for manual entries when none is given
pub const DEFAULT_MANUAL_DURATION_SECS: u64 = 600;

/// Arguments for adding an event by hand
#[derive(Debug, Clone)]
pub struct AddEventArgs {
    pub case_id: String,
    pub activity: String,
    pub duration_secs: Option<u64>,
    pub resource: Option<String>,
}

/// Validate manual event arguments
pub fn validate_add_event(args: &AddEventArgs) -> Result<()> {
    if args.case_id.trim().is_empty() {
        anyhow::bail!("Case id cannot be empty");
    }
    if args.activity.trim().is_empty() {
        anyhow::bail!("Activity cannot be empty");
    }
    Ok(())
}

pub fn execute_events(ctx: &CommandContext, case_filter: Option<&str>) -> Result<()> {
    let events = ctx.store.load_events().context("Failed to load event log")?;
    let shown: Vec<&EventRecord> = events
        .iter()
        .filter(|e| case_filter.map_or(true, |case| e.case_id == case))
        .collect();

    print!("{}", render_events(&shown, ctx.config.event_alert_secs));
    println!("{} of {} events", shown.len(), events.len());
    Ok(())
}

pub fn execute_add_event(ctx: &CommandContext, args: AddEventArgs) -> Result<()> {
    validate_add_event(&args)?;

    let event = EventRecord::complete(
        args.case_id.trim(),
        args.activity.trim(),
        Utc::now(),
        args.duration_secs.unwrap_or(DEFAULT_MANUAL_DURATION_SECS),
    )
    .with_resource(args.resource.unwrap_or_else(|| "Manual".to_string()));

    ctx.store.append_event(event).context("Failed to append event")?;
    info!("✓ Added {} for case {}", args.activity.trim(), args.case_id.trim());
    Ok(())
}

pub fn execute_export_csv(ctx: &CommandContext, output: &Path) -> Result<()> {
    let events = ctx.store.load_events().context("Failed to load event log")?;
    fs::write(output, export_csv(&events))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("✓ Exported {} events to: {}", events.len(), output.display());
    Ok(())
}
