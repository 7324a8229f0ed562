// SPDX-License-Identifier: PMPL-1.0-or-later
//! accessibility-checks - static HTML accessibility rule engine
//!
//! Parses HTML fragments or full documents with a tolerant HTML5 parser and
//! evaluates a catalog of independent accessibility rules against the
//! resulting tree. Every failure names the offending element by tag and, when
//! present, its `id` or `name`.
//!
//! ## Categories
//!
//! - **Advice**: best practices (insecure URLs, placeholder labels, landmarks, link schemes)
//! - **Errors**: breaks assistive technology (alt text, labels, names, ARIA state, metadata)
//! - **Obsoletes**: elements and attributes removed from HTML
//! - **Warnings**: structural nesting, ordering and language direction
//!
//! ## Entry points
//!
//! - [`assertions`]: one `assert_*` function per rule, returning a [`RuleFailure`]
//! - [`Engine`]: run selected categories or every enabled rule, grouped into a [`Report`]
//! - [`scanner`]: check batches of documents in parallel
//! - [`report`]: render batch results as text, JSON or SARIF
//!
//! ```
//! use accessibility_checks::{Category, Engine};
//!
//! let engine = Engine::default();
//! let report = engine
//!     .check(r#"<a href="http://www.example.com/">Link</a>"#, &[Category::Advice])
//!     .unwrap();
//! assert!(report.outcome("no-insecure-urls").is_some());
//! ```

pub mod assertions;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod validators;
pub mod violation;

pub use config::{load_config, EngineConfig};
pub use dom::{Document, Element, HtmlParser, ParseMode};
pub use engine::Engine;
pub use error::{EngineError, Result, RuleFailure};
pub use report::{generate_report, BatchReport, OutputFormat, Report, RuleOutcome};
pub use rules::{catalog, Rule};
pub use scanner::{scan_documents, scan_files, SourceDocument};
pub use violation::{Category, Severity, Violation, ViolationSet};
