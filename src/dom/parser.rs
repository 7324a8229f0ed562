// SPDX-License-Identifier: PMPL-1.0-or-later
//! Tolerant HTML parsing into the arena [`Document`].
//!
//! Parsing never fails. Malformed markup is recovered the way browsers do it
//! (html5ever tree construction via `scraper`), and the recovery messages are
//! kept on the document as notices.

use super::{Document, ElementData, NodeData, NodeId, NodeKind, ParseMode, ParseRecoveryNotice};
use regex::Regex;
use scraper::{Html, Node};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Markers that make an input a complete page rather than a snippet.
static DOCUMENT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:!doctype|html|head|body)[\s>/]").expect("valid regex")
});

/// Table and row-group tags, opening or closing.
static TABLE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)(table|tbody)[\s>/]").expect("valid regex")
});

/// Comments and raw-text elements, whose content is never markup.
static OPAQUE_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>|<textarea\b.*?</textarea\s*>|<title\b.*?</title\s*>",
    )
    .expect("valid regex")
});

/// Anything that can turn an HTML string into a [`Document`].
pub trait HtmlParser: Send + Sync {
    /// Parse `html`, recovering from any markup error.
    fn parse(&self, html: &str) -> Document;
}

/// Default parser backed by html5ever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5Parser;

impl HtmlParser for Html5Parser {
    fn parse(&self, html: &str) -> Document {
        let mode = detect_mode(html);
        let parsed = match mode {
            ParseMode::Document => Html::parse_document(html),
            ParseMode::Fragment => Html::parse_fragment(html),
        };

        let notices: Vec<ParseRecoveryNotice> = parsed
            .errors
            .iter()
            .map(|e| ParseRecoveryNotice(e.to_string()))
            .collect();
        for notice in &notices {
            trace!("Parse recovery: {}", notice);
        }

        let nodes = convert(&parsed, &explicit_tbody_by_table(html));
        debug!(
            "Parsed {} bytes as {:?} into {} nodes ({} recovery notices)",
            html.len(),
            mode,
            nodes.len(),
            notices.len()
        );

        Document::from_parts(nodes, mode, notices)
    }
}

/// Parse with the default [`Html5Parser`].
pub fn parse(html: &str) -> Document {
    Html5Parser.parse(html)
}

fn detect_mode(html: &str) -> ParseMode {
    if DOCUMENT_MARKER.is_match(html) {
        ParseMode::Document
    } else {
        ParseMode::Fragment
    }
}

/// For each `<table>` start tag in source order, whether a `<tbody>` tag
/// was written directly inside it.
fn explicit_tbody_by_table(html: &str) -> Vec<bool> {
    let source = OPAQUE_CONTENT.replace_all(html, "");
    let mut tables = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    for cap in TABLE_TAG.captures_iter(&source) {
        let closing = !cap[1].is_empty();
        let tag = cap[2].to_ascii_lowercase();
        match (closing, tag.as_str()) {
            (false, "table") => {
                open.push(tables.len());
                tables.push(false);
            }
            (true, "table") => {
                open.pop();
            }
            (false, "tbody") => {
                if let Some(&table) = open.last() {
                    tables[table] = true;
                }
            }
            _ => {}
        }
    }
    tables
}

/// Flatten the scraper tree below the root `<html>` element into arena nodes.
///
/// Allocation is depth-first pre-order, so arena order equals document order.
/// Tables are met in the same order as their start tags, which is how a
/// `<tbody>` is matched against `explicit_tbody` to tell whether it was implied.
fn convert(parsed: &Html, explicit_tbody: &[bool]) -> Vec<NodeData> {
    let mut nodes: Vec<NodeData> = Vec::new();
    let mut table_has_tbody_tag: HashMap<NodeId, bool> = HashMap::new();
    let mut stack = vec![(*parsed.root_element(), None::<NodeId>)];

    while let Some((node, parent)) = stack.pop() {
        let id = NodeId(nodes.len());
        let kind = match node.value() {
            Node::Element(el) => {
                let name = el.name().to_ascii_lowercase();
                let implicit = match name.as_str() {
                    "table" => {
                        // Unmatched tables keep every row group explicit.
                        let written = explicit_tbody
                            .get(table_has_tbody_tag.len())
                            .copied()
                            .unwrap_or(true);
                        table_has_tbody_tag.insert(id, written);
                        false
                    }
                    "tbody" => parent
                        .and_then(|p| table_has_tbody_tag.get(&p))
                        .is_some_and(|written| !written),
                    _ => false,
                };
                NodeKind::Element(ElementData {
                    name,
                    attrs: el
                        .attrs()
                        .map(|(key, value)| (key.to_ascii_lowercase(), value.to_string()))
                        .collect(),
                    implicit,
                })
            }
            Node::Text(text) => NodeKind::Text((**text).to_owned()),
            _ => continue,
        };

        nodes.push(NodeData { kind, parent, children: Vec::new() });
        if let Some(parent) = parent {
            nodes[parent.0].children.push(id);
        }

        for child in node.children().rev() {
            stack.push((child, Some(id)));
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mode() {
        assert_eq!(detect_mode("<p>hi</p>"), ParseMode::Fragment);
        assert_eq!(detect_mode("<!DOCTYPE html><p>hi</p>"), ParseMode::Document);
        assert_eq!(detect_mode("<HTML lang=\"en\">"), ParseMode::Document);
        assert_eq!(detect_mode("<body>x</body>"), ParseMode::Document);
        assert_eq!(detect_mode("<header>x</header>"), ParseMode::Fragment);
    }

    #[test]
    fn test_attribute_names_lowercased_values_preserved() {
        let doc = parse(r#"<div ID="MixedCase" Data-Value="KeepMe"></div>"#);
        let div = doc.elements_by_tag(&["div"]).next().expect("div");
        assert_eq!(div.attr("id"), Some("MixedCase"));
        assert_eq!(div.attr("DATA-VALUE"), Some("KeepMe"));
    }

    #[test]
    fn test_empty_attribute_distinct_from_missing() {
        let doc = parse(r#"<table><tr><th scope="">A</th><th>B</th></tr></table>"#);
        let ths: Vec<_> = doc.elements_by_tag(&["th"]).collect();
        assert_eq!(ths[0].attr("scope"), Some(""));
        assert_eq!(ths[1].attr("scope"), None);
    }

    #[test]
    fn test_malformed_markup_recovers() {
        let doc = parse("<div><p>unclosed <b>bold</div><span>after");
        assert!(doc.elements_by_tag(&["span"]).next().is_some());
    }

    #[test]
    fn test_implied_tbody_is_marked() {
        let doc = parse("<table><tr><td>a</td></tr></table><table><tbody><tr><td>b</td></tr></tbody></table>");
        let tbodies: Vec<_> = doc.elements_by_tag(&["tbody"]).collect();
        assert_eq!(tbodies.len(), 2);
        assert!(tbodies[0].is_implicit());
        assert!(!tbodies[1].is_implicit());
    }

    #[test]
    fn test_nested_tables_match_their_own_tags() {
        let doc = parse(
            "<table><tbody><tr><td><table><tr><td>inner</td></tr></table></td></tr></tbody></table>\
             <!-- <table><tbody> --><table><tr><td>last</td></tr></table>",
        );
        let implied: Vec<bool> = doc.elements_by_tag(&["tbody"]).map(|t| t.is_implicit()).collect();
        assert_eq!(implied, vec![false, true, true]);
    }

    #[test]
    fn test_unknown_elements_keep_their_content() {
        let doc = parse("<p><spacer>hello <b>world</b></spacer></p>");
        let p = doc.elements_by_tag(&["p"]).next().expect("p");
        assert_eq!(p.text_content(), "hello world");
        assert_eq!(doc.elements_by_tag(&["b"]).count(), 1);
    }

    #[test]
    fn test_parent_links() {
        let doc = parse("<ul><li>One</li></ul>");
        let li = doc.elements_by_tag(&["li"]).next().expect("li");
        assert_eq!(li.parent().map(|p| p.name().to_string()), Some("ul".to_string()));
    }
}
