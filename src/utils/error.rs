//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised while parsing or validating a snapshot
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Duplicate step id: {0}")]
    DuplicateStepId(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid SLA for step {id}: {value} (must be a finite, non-negative number of hours)")]
    InvalidSla { id: String, value: f64 },
}

/// Errors that can occur while reading or writing documents
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document {path}: {source}")]
    InvalidDocument {
        path: String,
        #[source]
        source: ModelError,
    },

    #[error("Failed to serialize document: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Errors that can occur while loading engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while generating simulated events
#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("Simulated case {case_id} runs past the representable time range")]
    TimestampOverflow { case_id: String },
}
