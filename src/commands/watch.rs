use super::analyze::build_analysis;
use super::models::CommandContext;
use crate::diff::deviation_report;
use crate::store::SnapshotFeed;
use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

/// Recompute the explanation and deviated steps on every new snapshot
pub fn execute_watch(ctx: &CommandContext, interval: Duration, max_updates: Option<usize>) -> Result<()> {
    info!("Watching {} (every {:?})", ctx.store.dir().display(), interval);

    let mut feed = SnapshotFeed::new(&ctx.store, interval);
    if let Some(n) = max_updates {
        feed = feed.take_updates(n);
    }

    for snapshot in feed {
        let snapshot = snapshot.context("Failed to load snapshot")?;
        let analysis = build_analysis(&snapshot, &ctx.config);
        let deviations = deviation_report(
            &snapshot.steps,
            &snapshot.events,
            &snapshot.candidate,
            &ctx.config,
        );

        let ids: Vec<&str> = deviations.deviated_step_ids.iter().map(String::as_str).collect();
        println!(
            "[{}] {} | deviated: {}",
            analysis.generated_at,
            analysis.explanation,
            if ids.is_empty() { "none".to_string() } else { ids.join(", ") }
        );
    }

    Ok(())
}
