use super::models::CommandContext;
use crate::store::{seed_demo, DocumentStore};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use anyhow::{Context, Result};

/// Seed the demo workflow and event log
pub fn execute_init(ctx: &CommandContext) -> Result<()> {
    let created = seed_demo(&ctx.store).context("Failed to seed demo documents")?;
    println!(
        "Initialized {} ({} documents created)",
        ctx.store.dir().display(),
        created
    );
    Ok(())
}

/// Validate all documents in the store
pub fn validate_documents(ctx: &CommandContext) -> Result<()> {
    println!("Validating documents in: {}", ctx.store.dir().display());

    let snapshot = ctx.store.load_snapshot()?;

    println!("✓ Valid documents");
    println!("  Steps: {}", snapshot.steps.len());
    println!("  Events: {}", snapshot.events.len());
    println!("  Latest simulation events: {}", snapshot.candidate.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Flowlens v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Event-log aggregation, bottleneck explanation and deviation detection.");
}
