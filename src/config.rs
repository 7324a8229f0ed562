// SPDX-License-Identifier: PMPL-1.0-or-later
//! Engine configuration.
//!
//! Controls which categories a full scan runs, which rules are skipped, the
//! input size limit and whether batch scans run in parallel.

use crate::error::{EngineError, Result};
use crate::rules::catalog;
use crate::violation::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default upper bound on a single HTML input (5 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Categories run by a full scan
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// Rule identifiers a full scan skips
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Inputs larger than this are rejected before parsing
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Scan batches of documents on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            disabled_rules: Vec::new(),
            max_input_bytes: default_max_input_bytes(),
            parallel: true,
        }
    }
}

fn default_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Parse and validate a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would silently do nothing
    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            return Err(EngineError::Config("max_input_bytes must be greater than zero".into()));
        }
        if let Some(unknown) = self.disabled_rules.iter().find(|r| catalog::find(r).is_none()) {
            return Err(EngineError::UnknownRule(unknown.clone()));
        }
        Ok(())
    }

    /// Whether scans skip the given rule
    pub fn is_disabled(&self, rule: &str) -> bool {
        self.disabled_rules.iter().any(|r| r == rule)
    }
}

/// Load configuration from a TOML file, falling back to defaults when absent
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&content)?;

    debug!(?config, "Loaded configuration");
    Ok(config)
}
