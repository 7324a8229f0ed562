// SPDX-License-Identifier: PMPL-1.0-or-later
//! Violation types produced by rule evaluation.
//!
//! A [`Violation`] names the rule, the category it belongs to, the offending
//! element (by arena id plus a printable label) and a rendered detail message.

use crate::dom::{Element, NodeId};
use serde::{Deserialize, Serialize};

/// Severity derived from a rule's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Breaks assistive technology
    Error,
    /// Structurally wrong or deprecated
    Warning,
    /// Best-practice suggestion
    Suggestion,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Suggestion => write!(f, "SUGGESTION"),
        }
    }
}

/// Rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Advice,
    Errors,
    Obsoletes,
    Warnings,
}

impl Category {
    /// Every category, in reporting order.
    pub const ALL: [Category; 4] = [
        Category::Advice,
        Category::Errors,
        Category::Obsoletes,
        Category::Warnings,
    ];

    /// Severity of violations in this category
    pub fn severity(&self) -> Severity {
        match self {
            Category::Errors => Severity::Error,
            Category::Warnings | Category::Obsoletes => Severity::Warning,
            Category::Advice => Severity::Suggestion,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Advice => write!(f, "advice"),
            Category::Errors => write!(f, "errors"),
            Category::Obsoletes => write!(f, "obsoletes"),
            Category::Warnings => write!(f, "warnings"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advice" => Ok(Category::Advice),
            "errors" | "error" => Ok(Category::Errors),
            "obsoletes" | "obsolete" => Ok(Category::Obsoletes),
            "warnings" | "warning" => Ok(Category::Warnings),
            other => Err(format!("Unknown rule category: {}", other)),
        }
    }
}

/// Printable identification of an element: uppercased tag plus `id` or `name`.
///
/// `<input id="email">` becomes `INPUT element with id="email"`,
/// `<map name="nav">` becomes `MAP element with name="nav"`, a bare `<img>`
/// becomes `IMG element`.
pub fn describe(el: &Element<'_>) -> String {
    let tag = el.name().to_uppercase();
    if let Some(id) = el.attr("id").filter(|v| !v.trim().is_empty()) {
        format!("{} element with id=\"{}\"", tag, id)
    } else if let Some(name) = el.attr("name").filter(|v| !v.trim().is_empty()) {
        format!("{} element with name=\"{}\"", tag, name)
    } else {
        format!("{} element", tag)
    }
}

/// One element failing one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule identifier (e.g. `images-have-alt`)
    pub rule: &'static str,
    /// Category of the rule
    pub category: Category,
    /// Offending element inside the evaluated document
    pub node: NodeId,
    /// Uppercased tag plus id/name, as produced by [`describe`]
    pub element: String,
    /// Detail message naming the element
    pub message: String,
}

impl Violation {
    /// Severity of this violation
    pub fn severity(&self) -> Severity {
        self.category.severity()
    }
}

/// A collection of violations with aggregation helpers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViolationSet {
    pub violations: Vec<Violation>,
}

impl ViolationSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation
    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Extend with violations from an iterator
    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    /// Violations of one rule, in document order
    pub fn by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == rule).collect()
    }

    /// Violations in one category
    pub fn by_category(&self, category: Category) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.category == category).collect()
    }

    /// Violations of one severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.severity() == severity).collect()
    }

    /// Check if any violation is an error
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity() == Severity::Error)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.violations.iter().any(|v| v.severity().blocks_release())
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}
