//! Configuration and constants for the engine and CLI.
//!
//! The two alert thresholds (relative deviation vs. raw event duration) are
//! unrelated and stay as separate settings.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Number of most recent complete events kept in a step's trend
pub const DEFAULT_TREND_WINDOW: usize = 12;

/// Candidate average must exceed baseline by more than this fraction
pub const DEFAULT_DEVIATION_THRESHOLD: f64 = 0.15;

/// Synthetic baseline for activities with no history: candidate avg * factor
pub const DEFAULT_SYNTHETIC_BASELINE_FACTOR: f64 = 0.9;

/// Raw event listing marks events longer than this (3 hours)
pub const DEFAULT_EVENT_ALERT_SECS: u64 = 3 * 3600;

// Period trend: most recent complete events spread round-robin over buckets
pub const KPI_TREND_SAMPLE: usize = 40;
pub const KPI_TREND_BUCKETS: usize = 4;

/// Seconds per SLA hour
pub const SECS_PER_HOUR: f64 = 3600.0;

// Document file names inside the store directory
pub const WORKFLOW_DOC: &str = "workflow.json";
pub const EVENTLOG_DOC: &str = "eventlog.json";
pub const SIMULATIONS_DOC: &str = "simulations.json";

/// Whether a step's `count` includes non-complete events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// Count every matching event; only complete ones feed avg/on-time
    #[default]
    AllEvents,
    /// Count only complete events
    CompleteOnly,
}

/// Tunable engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub trend_window: usize,
    pub deviation_threshold: f64,
    pub synthetic_baseline_factor: f64,
    pub event_alert_secs: u64,
    pub count_policy: CountPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trend_window: DEFAULT_TREND_WINDOW,
            deviation_threshold: DEFAULT_DEVIATION_THRESHOLD,
            synthetic_baseline_factor: DEFAULT_SYNTHETIC_BASELINE_FACTOR,
            event_alert_secs: DEFAULT_EVENT_ALERT_SECS,
            count_policy: CountPolicy::AllEvents,
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trend_window == 0 {
            return Err(ConfigError::InvalidValue(
                "trend_window must be at least 1".to_string(),
            ));
        }
        if !self.deviation_threshold.is_finite() || self.deviation_threshold < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "deviation_threshold must be a non-negative number, got {}",
                self.deviation_threshold
            )));
        }
        if !self.synthetic_baseline_factor.is_finite() || self.synthetic_baseline_factor <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "synthetic_baseline_factor must be positive, got {}",
                self.synthetic_baseline_factor
            )));
        }
        Ok(())
    }
}

/// Load engine configuration from a TOML file
///
/// Missing keys fall back to the defaults above.
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidValue` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse engine configuration from TOML text
pub fn parse_config(contents: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}
