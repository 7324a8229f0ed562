// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the accessibility engine.
//!
//! Markup defects are never engine errors; they are reported as violations.
//! [`EngineError`] covers programmer and environment mistakes, [`RuleFailure`]
//! is what the assertion-style API returns when a rule does not hold.

use crate::violation::{Category, Violation};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Invalid input: {size} bytes exceeds the {max} byte limit")]
    InvalidInput { size: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rule that did not hold for the given HTML.
///
/// `Display` renders the detail message for a single offender and the
/// summary message for two or more.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct RuleFailure {
    /// Identifier of the failed rule
    pub rule: &'static str,
    /// Category of the failed rule
    pub category: Category,
    /// Every offending element, in document order
    pub violations: Vec<Violation>,
    /// Rendered failure message
    pub message: String,
}

impl RuleFailure {
    /// Number of offending elements
    pub fn count(&self) -> usize {
        self.violations.len()
    }

    /// The first offender in document order
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }
}
