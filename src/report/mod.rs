// SPDX-License-Identifier: PMPL-1.0-or-later
//! Violation reporting.
//!
//! A rule with exactly one offender reports that offender's detail message.
//! Two or more offenders collapse into a summary naming the count, the rule's
//! summary phrase and the first offender.
//!
//! Batch results render in three formats:
//! - Text: grouped by severity for terminals and logs
//! - JSON: the full [`BatchReport`] for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::rules::Rule;
use crate::violation::{Category, Severity, Violation};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Render the failure message for `violations` of `rule`.
///
/// Returns `None` when nothing failed.
pub fn render(rule: &Rule, violations: &[Violation]) -> Option<String> {
    match violations {
        [] => None,
        [only] => Some(only.message.clone()),
        [first, ..] => Some(format!(
            "{} elements {}. First: {}",
            violations.len(),
            rule.summary,
            first.message
        )),
    }
}

/// Every violation of one rule in one document.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub category: Category,
    pub severity: Severity,
    /// Detail or summary message, see [`render`]
    pub message: String,
    pub violations: Vec<Violation>,
}

impl RuleOutcome {
    /// Build an outcome; `None` when the rule held.
    pub fn new(rule: &Rule, violations: Vec<Violation>) -> Option<Self> {
        let message = render(rule, &violations)?;
        Some(Self {
            rule: rule.name,
            category: rule.category,
            severity: rule.category.severity(),
            message,
            violations,
        })
    }

    pub fn count(&self) -> usize {
        self.violations.len()
    }
}

/// Result of checking one document, grouped by rule.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Name of the checked document, when it has one
    pub document: Option<String>,
    /// Failed rules in catalog order
    pub outcomes: Vec<RuleOutcome>,
    /// Number of rules evaluated
    pub rules_run: usize,
    /// Parser recovery messages
    pub notices: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a document name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.document = Some(name.into());
        self
    }

    pub fn push(&mut self, outcome: RuleOutcome) {
        self.outcomes.push(outcome);
    }

    /// No rule failed.
    pub fn is_clean(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Total offending elements across all rules
    pub fn violation_count(&self) -> usize {
        self.outcomes.iter().map(RuleOutcome::count).sum()
    }

    /// Whether any Errors-category rule failed
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|o| o.severity.blocks_release())
    }

    /// Outcome for a rule identifier
    pub fn outcome(&self, rule: &str) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule == rule)
    }

    /// Outcomes of a single category
    pub fn by_category(&self, category: Category) -> Vec<&RuleOutcome> {
        self.outcomes.iter().filter(|o| o.category == category).collect()
    }

    /// Outcomes of a single severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&RuleOutcome> {
        self.outcomes.iter().filter(|o| o.severity == severity).collect()
    }

    /// Every violation in rule order
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.outcomes.iter().flat_map(|o| o.violations.iter())
    }
}

/// Reports for a set of documents.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub documents: Vec<Report>,
}

impl BatchReport {
    pub fn new(documents: Vec<Report>) -> Self {
        Self {
            generated_at: Utc::now(),
            documents,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.documents.iter().map(Report::violation_count).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.documents.iter().any(Report::has_errors)
    }

    pub fn is_clean(&self) -> bool {
        self.documents.iter().all(Report::is_clean)
    }
}

impl From<Report> for BatchReport {
    fn from(report: Report) -> Self {
        Self::new(vec![report])
    }
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report in the requested format
pub fn generate_report(batch: &BatchReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(batch),
        OutputFormat::Json => generate_json_report(batch),
        OutputFormat::Sarif => generate_sarif_report(batch),
    }
}

fn document_label(report: &Report) -> &str {
    report.document.as_deref().unwrap_or("<inline>")
}

fn generate_text_report(batch: &BatchReport) -> String {
    let mut output = String::new();

    output.push_str("=== Accessibility Check Report ===\n");
    output.push_str(&format!(
        "Checked {} document(s) at {}\n\n",
        batch.documents.len(),
        batch.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if batch.is_clean() {
        output.push_str("No accessibility issues found. All checks passed.\n");
        return output;
    }

    let outcomes: Vec<(&Report, &RuleOutcome)> = batch
        .documents
        .iter()
        .flat_map(|r| r.outcomes.iter().map(move |o| (r, o)))
        .collect();

    output.push_str(&format!(
        "Found {} violation(s) in {} failed rule check(s)\n\n",
        batch.violation_count(),
        outcomes.len()
    ));

    for severity in [Severity::Error, Severity::Warning, Severity::Suggestion] {
        let group: Vec<_> = outcomes.iter().filter(|(_, o)| o.severity == severity).collect();
        if group.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, group.len()));
        for (report, outcome) in group {
            output.push_str(&format!("[{}] {}\n", outcome.rule, outcome.message));
            output.push_str(&format!("  Document: {}\n", document_label(report)));
            if outcome.count() > 1 {
                for violation in &outcome.violations {
                    output.push_str(&format!("  - {}\n", violation.element));
                }
            }
            output.push('\n');
        }
    }

    if batch.has_errors() {
        output.push_str("RESULT: FAIL (errors found)\n");
    } else {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    }

    output
}

fn generate_json_report(batch: &BatchReport) -> String {
    serde_json::to_string_pretty(batch).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
    #[serde(rename = "logicalLocations")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    name: String,
    kind: String,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Suggestion => "note",
    }
}

fn generate_sarif_report(batch: &BatchReport) -> String {
    let mut results = Vec::new();
    for report in &batch.documents {
        for violation in report.violations() {
            results.push(SarifResult {
                rule_id: violation.rule.to_string(),
                level: sarif_level(violation.severity()).to_string(),
                message: SarifMessage { text: violation.message.clone() },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: document_label(report).to_string(),
                        },
                    },
                    logical_locations: vec![SarifLogicalLocation {
                        name: violation.element.clone(),
                        kind: "element".to_string(),
                    }],
                }],
            });
        }
    }

    let rules = crate::rules::catalog::all()
        .map(|rule| SarifRule {
            id: rule.name.to_string(),
            short_description: SarifMessage { text: rule.description.to_string() },
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
