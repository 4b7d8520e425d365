//! Simulation command: generate a candidate batch and store it.

use super::models::CommandContext;
use crate::simulate::{generate_batch, RandomEventGenerator};
use crate::store::DocumentStore;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

/// Upper bound on simulated cases per run
pub const MAX_SIMULATED_CASES: usize = 1000;

pub fn validate_cases(cases: usize) -> Result<()> {
    if cases == 0 {
        anyhow::bail!("cases must be greater than 0");
    }
    if cases > MAX_SIMULATED_CASES {
        anyhow::bail!("cases is too large (max {})", MAX_SIMULATED_CASES);
    }
    Ok(())
}

pub fn execute_simulate(ctx: &CommandContext, cases: usize, seed: Option<u64>) -> Result<()> {
    validate_cases(cases)?;

    let steps = ctx.store.load_steps().context("Failed to load workflow")?;
    if steps.is_empty() {
        anyhow::bail!("Workflow has no steps to simulate; run `flowlens init` first");
    }

    let batch = match seed {
        Some(seed) => generate_batch(&mut RandomEventGenerator::seeded(seed), &steps, cases, Utc::now()),
        None => generate_batch(&mut RandomEventGenerator::from_entropy(), &steps, cases, Utc::now()),
    }
    .context("Failed to generate simulated events")?;

    let run = ctx.store.push_simulation(batch).context("Failed to store simulation")?;
    info!("✓ Simulation {} stored with {} events", run.id, run.rows.len());
    println!("Simulation {}: {} cases, {} events", run.id, cases, run.rows.len());
    Ok(())
}
