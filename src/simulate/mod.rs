//! Synthetic event generation for candidate runs.
//!
//! Kept apart from the aggregation engine: generators only produce
//! `EventRecord`s, which then go through the same deviation check as any
//! other candidate batch.

use crate::model::{EventRecord, StepDefinition};
use crate::utils::error::SimulationError;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Expected duration for steps without an SLA
pub const DEFAULT_EXPECTED_SECS: u64 = 600;

/// Simulated steps aim for this fraction of their SLA
const SLA_TARGET_FRACTION: f64 = 0.5;

/// Ceiling on the expected duration of one simulated step (one year)
pub const MAX_EXPECTED_SECS: u64 = 365 * 24 * 3600;

const RESOURCES: &[&str] = &["Rajesh", "Priya", "Anil", "Deepa"];

/// Produces the events of one simulated case
pub trait EventGenerator {
    fn generate_case(
        &mut self,
        steps: &[StepDefinition],
        case_id: &str,
        start: DateTime<Utc>,
    ) -> Result<Vec<EventRecord>, SimulationError>;
}

/// Expected duration plus uniform jitter up to half of it
pub struct RandomEventGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomEventGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomEventGenerator<StdRng> {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

/// Expected seconds for one step, capped at `MAX_EXPECTED_SECS`
pub fn expected_secs(step: &StepDefinition) -> u64 {
    step.sla_secs()
        .map(|secs| (secs * SLA_TARGET_FRACTION).round().min(MAX_EXPECTED_SECS as f64) as u64)
        .unwrap_or(DEFAULT_EXPECTED_SECS)
}

impl<R: Rng> EventGenerator for RandomEventGenerator<R> {
    fn generate_case(
        &mut self,
        steps: &[StepDefinition],
        case_id: &str,
        start: DateTime<Utc>,
    ) -> Result<Vec<EventRecord>, SimulationError> {
        let mut at = start;
        let mut events = Vec::with_capacity(steps.len());

        for (i, step) in steps.iter().enumerate() {
            let expected = expected_secs(step);
            let jitter = self.rng.gen_range(0..=expected / 2);
            let duration = expected + jitter;

            at = at
                .checked_add_signed(Duration::seconds(duration as i64))
                .ok_or_else(|| SimulationError::TimestampOverflow {
                    case_id: case_id.to_string(),
                })?;

            let mut event = EventRecord::complete(case_id, step.label.clone(), at, duration)
                .with_resource(RESOURCES[i % RESOURCES.len()]);
            event.id = Some(format!("{}-{}", case_id, i + 1));
            events.push(event);
        }

        Ok(events)
    }
}

/// Generate `cases` consecutive simulated cases, newest event first
pub fn generate_batch<G: EventGenerator>(
    generator: &mut G,
    steps: &[StepDefinition],
    cases: usize,
    start: DateTime<Utc>,
) -> Result<Vec<EventRecord>, SimulationError> {
    let mut batch = Vec::with_capacity(cases * steps.len());
    let mut case_start = start;

    for n in 0..cases {
        let case_id = format!("SIM-{:03}", n + 1);
        let events = generator.generate_case(steps, &case_id, case_start)?;
        if let Some(last) = events.last() {
            case_start = last.timestamp;
        }
        batch.extend(events);
    }

    batch.reverse();
    debug!("Generated {} simulated events over {} cases", batch.len(), cases);
    Ok(batch)
}
