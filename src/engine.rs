// SPDX-License-Identifier: PMPL-1.0-or-later
//! Full-scan entry point.
//!
//! An [`Engine`] owns a configuration and a parser. Each call parses the
//! input once, runs the selected rules against the resulting [`Document`] and
//! groups the violations by rule into a [`Report`].

use crate::config::EngineConfig;
use crate::dom::{Document, Html5Parser, HtmlParser};
use crate::error::{EngineError, Result, RuleFailure};
use crate::report::{self, Report, RuleOutcome};
use crate::rules::{catalog, Rule};
use crate::violation::Category;
use tracing::{debug, info};

pub struct Engine {
    config: EngineConfig,
    parser: Box<dyn HtmlParser>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            parser: Box::new(Html5Parser),
        }
    }
}

impl Engine {
    /// Engine with the default parser. The configuration is validated first.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_parser(config, Html5Parser)
    }

    /// Engine with a custom parser.
    pub fn with_parser(config: EngineConfig, parser: impl HtmlParser + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            parser: Box::new(parser),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse `html`, rejecting inputs above the configured size limit.
    pub fn parse(&self, html: &str) -> Result<Document> {
        if html.len() > self.config.max_input_bytes {
            return Err(EngineError::InvalidInput {
                size: html.len(),
                max: self.config.max_input_bytes,
            });
        }
        Ok(self.parser.parse(html))
    }

    /// Run every enabled rule of the given categories.
    pub fn check(&self, html: &str, categories: &[Category]) -> Result<Report> {
        let doc = self.parse(html)?;
        let rules: Vec<&Rule> = Category::ALL
            .into_iter()
            .filter(|c| categories.contains(c))
            .flat_map(catalog::by_category)
            .filter(|rule| !self.config.is_disabled(rule.name))
            .collect();
        Ok(self.evaluate(&doc, &rules))
    }

    /// Run every rule the configuration enables.
    pub fn check_all(&self, html: &str) -> Result<Report> {
        self.check(html, &self.config.categories)
    }

    /// Run a single rule by identifier, ignoring the enabled set.
    ///
    /// The outer error is an engine failure (unknown rule, oversized input);
    /// the inner one is the rule's own verdict.
    pub fn run_rule(&self, name: &str, html: &str) -> Result<std::result::Result<(), RuleFailure>> {
        let rule = catalog::find(name).ok_or_else(|| EngineError::UnknownRule(name.to_string()))?;
        let doc = self.parse(html)?;
        let violations = rule.evaluate(&doc);
        Ok(match report::render(rule, &violations) {
            None => Ok(()),
            Some(message) => Err(RuleFailure {
                rule: rule.name,
                category: rule.category,
                message,
                violations,
            }),
        })
    }

    fn evaluate(&self, doc: &Document, rules: &[&Rule]) -> Report {
        let mut report = Report::new();
        report.rules_run = rules.len();
        report.notices = doc.recovery_notices().iter().map(|n| n.to_string()).collect();

        for rule in rules {
            let violations = rule.evaluate(doc);
            if let Some(outcome) = RuleOutcome::new(rule, violations) {
                debug!("Rule {} failed: {}", rule.name, outcome.message);
                report.push(outcome);
            }
        }

        info!(
            "Ran {} rules, {} failed with {} violation(s)",
            report.rules_run,
            report.outcomes.len(),
            report.violation_count()
        );
        report
    }
}
