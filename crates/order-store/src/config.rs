//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Initial capacity {0} exceeds the maximum of {max}", max = MAX_INITIAL_CAPACITY)]
    InvalidCapacity(usize),
}

/// Largest accepted pre-sizing hint
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// What `add_order` does with an id that is already live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the live order and return `StoreError::DuplicateOrderId`
    #[default]
    Reject,
    /// Cancel the live order, then insert the new one at the back of its bucket
    Replace,
}

/// Order store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Pre-sizing hint for the record table and identifier index
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            initial_capacity: 1024,
        }
    }
}

impl StoreConfig {
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::InvalidCapacity(self.initial_capacity));
        }
        Ok(())
    }
}

/// Load store configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<StoreConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load store configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<StoreConfig, ConfigError> {
    let config: StoreConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}
