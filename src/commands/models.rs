use crate::store::JsonFileStore;
use crate::utils::config::{load_config, EngineConfig};
use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Shared state for every command: where the documents live and how the
/// engine is tuned
///
/// **Public** - built once by main.rs from global CLI args
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub store: JsonFileStore,
    pub config: EngineConfig,
}

impl CommandContext {
    pub fn new(dir: impl Into<PathBuf>, config: EngineConfig) -> Self {
        Self {
            store: JsonFileStore::new(dir),
            config,
        }
    }

    /// Load the optional TOML config and open the document directory
    pub fn from_args(dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        debug!("Engine config: {:?}", config);
        Ok(Self::new(dir, config))
    }
}
