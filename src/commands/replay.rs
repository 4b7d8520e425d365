use super::models::CommandContext;
use crate::output::render_replay;
use crate::replay::{build_replay, latest_case};
use crate::store::DocumentStore;
use anyhow::{Context, Result};

/// Print the narrated replay of one case (the latest one by default)
pub fn execute_replay(ctx: &CommandContext, case_id: Option<String>) -> Result<()> {
    let steps = ctx.store.load_steps().context("Failed to load workflow")?;
    let events = ctx.store.load_events().context("Failed to load event log")?;

    let case_id = match case_id {
        Some(id) => id,
        None => match latest_case(&events) {
            Some(id) => id.to_string(),
            None => {
                println!("No events to replay");
                return Ok(());
            }
        },
    };

    let replay = build_replay(&steps, &events, &case_id)
        .with_context(|| format!("No events found for case {}", case_id))?;

    print!("{}", render_replay(&replay));
    Ok(())
}
