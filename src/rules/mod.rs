// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility rule catalog.
//!
//! Each rule is a pure function over a parsed [`Document`] returning the
//! elements that fail it. Rules share no state and can run in any order.
//! They are grouped into four categories, one module each:
//!
//! - **Advice**: best practices (insecure URLs, placeholder labels, landmarks)
//! - **Errors**: breaks assistive technology (missing alt, labels, ARIA state)
//! - **Obsoletes**: deprecated elements and attributes
//! - **Warnings**: structural nesting and ordering problems

/// Declare a `pub const` [`Rule`] in one line per rule.
macro_rules! rule {
    ($category:ident, $const_name:ident, $name:literal, $description:literal, $summary:literal, $check:ident) => {
        pub const $const_name: $crate::rules::Rule = $crate::rules::Rule {
            name: $name,
            category: $crate::violation::Category::$category,
            description: $description,
            summary: $summary,
            check: $check,
        };
    };
}

pub mod advice;
pub mod errors;
pub mod obsoletes;
pub mod warnings;

use crate::dom::{Document, Element, NodeId};
use crate::violation::{describe, Category, Violation, ViolationSet};
use std::collections::HashSet;
use tracing::debug;

/// Signature of a rule predicate.
pub type CheckFn = fn(&Document) -> Vec<Offender>;

/// A named, categorised check.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Kebab-case identifier (e.g. `images-have-alt`)
    pub name: &'static str,
    /// Category the rule belongs to
    pub category: Category,
    /// What the rule enforces
    pub description: &'static str,
    /// Predicate phrase used when two or more elements fail
    /// (completes "N elements ...")
    pub summary: &'static str,
    /// The predicate itself
    pub check: CheckFn,
}

impl Rule {
    /// Run this rule against `doc`.
    pub fn evaluate(&self, doc: &Document) -> Vec<Violation> {
        (self.check)(doc)
            .into_iter()
            .filter_map(|offender| {
                let element = doc.element(offender.node)?;
                Some(Violation {
                    rule: self.name,
                    category: self.category,
                    node: offender.node,
                    element: describe(&element),
                    message: offender.message,
                })
            })
            .collect()
    }
}

/// An element failing a rule, with its detail message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offender {
    pub node: NodeId,
    pub message: String,
}

impl Offender {
    /// Build an offender whose message starts with the element's description,
    /// e.g. `IMG element with id="logo" is missing the alt attribute.`
    pub fn at(el: Element<'_>, detail: impl std::fmt::Display) -> Self {
        Self {
            node: el.id(),
            message: format!("{} {}", describe(&el), detail),
        }
    }
}

/// Run `rules` against `doc`, collecting every violation.
pub fn evaluate<'r>(doc: &Document, rules: impl IntoIterator<Item = &'r Rule>) -> ViolationSet {
    let mut set = ViolationSet::new();
    for rule in rules {
        let violations = rule.evaluate(doc);
        if !violations.is_empty() {
            debug!("Rule {} found {} violation(s)", rule.name, violations.len());
        }
        set.extend(violations);
    }
    set
}

/// Lookup over the four category catalogs.
pub mod catalog {
    use super::{advice, errors, obsoletes, warnings, Rule};
    use crate::violation::Category;

    /// Every rule, grouped by category in reporting order.
    pub fn all() -> impl Iterator<Item = &'static Rule> {
        advice::RULES
            .iter()
            .chain(errors::RULES.iter())
            .chain(obsoletes::RULES.iter())
            .chain(warnings::RULES.iter())
    }

    /// Rules of a single category.
    pub fn by_category(category: Category) -> &'static [Rule] {
        match category {
            Category::Advice => advice::RULES,
            Category::Errors => errors::RULES,
            Category::Obsoletes => obsoletes::RULES,
            Category::Warnings => warnings::RULES,
        }
    }

    /// Find a rule by identifier.
    pub fn find(name: &str) -> Option<&'static Rule> {
        all().find(|rule| rule.name == name)
    }
}

/// Elements a `<label>` can be associated with.
pub const LABELABLE: &[&str] = &["input", "select", "textarea", "button", "meter", "output", "progress"];

/// `<input>` types that do not take a label.
pub const UNLABELED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// Labelable control that participates in labelling (hidden inputs do not).
pub fn is_labelable(el: &Element<'_>) -> bool {
    el.is(LABELABLE) && !el.is_input_type("hidden")
}

/// Trimmed, non-empty `for` values of every `<label>` in the document.
pub fn label_targets(doc: &Document) -> HashSet<&str> {
    doc.elements_by_tag(&["label"])
        .filter_map(|label| label.attr("for"))
        .map(str::trim)
        .filter(|target| !target.is_empty())
        .collect()
}

/// Whether a form control has an accessible label: `label[for]`, a wrapping
/// `<label>`, or a non-empty `aria-label`, `aria-labelledby` or `title`.
pub fn is_labelled(el: &Element<'_>, targets: &HashSet<&str>) -> bool {
    let by_for = el
        .attr("id")
        .map(str::trim)
        .is_some_and(|id| !id.is_empty() && targets.contains(id));
    by_for
        || el.has_ancestor(&["label"])
        || has_aria_name(el)
        || el.has_non_empty_attr("title")
}

/// Non-empty `aria-label` or `aria-labelledby`.
pub fn has_aria_name(el: &Element<'_>) -> bool {
    el.has_non_empty_attr("aria-label") || el.has_non_empty_attr("aria-labelledby")
}

/// Interactive content for nesting checks.
pub fn is_interactive(el: &Element<'_>) -> bool {
    match el.name() {
        "a" => el.has_attr("href"),
        "input" => !el.is_input_type("hidden"),
        "audio" | "video" => el.has_attr("controls"),
        "button" | "select" | "textarea" | "label" | "iframe" | "embed" | "details" => true,
        _ => false,
    }
}

/// Inside `<svg>` or `<math>`, where HTML content rules do not apply.
pub fn is_foreign(el: &Element<'_>) -> bool {
    el.has_ancestor(&["svg", "math"])
}
