// SPDX-License-Identifier: PMPL-1.0-or-later
//! Arena-backed DOM that every rule queries.
//!
//! The parser converts whatever tree the underlying HTML5 parser produced
//! into this representation. All nodes live in one `Vec`; parents are stored
//! as indices so there is no ownership cycle and the whole document is
//! `Send + Sync`.
//!
//! The root is always an `<html>` element: either the real one from a full
//! document, or the implicit wrapper created for a fragment.

mod parser;
mod query;

pub use parser::{parse, Html5Parser, HtmlParser};
pub use query::{Child, Descendants, Element};

use serde::Serialize;

/// Elements that can never have children.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr", "keygen", "basefont", "bgsound", "frame",
];

/// Check whether a tag name is a void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in document (pre-)order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether the input was treated as a complete page or as a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Input contained a doctype, `<html>`, `<head>` or `<body>` tag.
    Document,
    /// Anything else; wrapped in an implicit `<html>` root.
    Fragment,
}

/// A non-fatal note from the tolerant parser about malformed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecoveryNotice(pub String);

impl std::fmt::Display for ParseRecoveryNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag name and attributes of an element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub name: String,
    /// Lowercase attribute names with their raw values, in source order.
    pub attrs: Vec<(String, String)>,
    /// Inserted by the tree builder without a matching source tag
    /// (the `<tbody>` implied around bare table rows).
    pub implicit: bool,
}

impl ElementData {
    /// Look up an attribute by name, ignoring case on the name only.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

/// One slot in the arena.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// An immutable parsed HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    mode: ParseMode,
    notices: Vec<ParseRecoveryNotice>,
}

impl Document {
    pub(crate) fn from_parts(
        nodes: Vec<NodeData>,
        mode: ParseMode,
        notices: Vec<ParseRecoveryNotice>,
    ) -> Self {
        Self { nodes, root: NodeId(0), mode, notices }
    }

    /// Parse `html` with the default HTML5 parser.
    pub fn parse(html: &str) -> Self {
        parse(html)
    }

    /// The root `<html>` element.
    pub fn root(&self) -> Element<'_> {
        Element::new(self, self.root)
    }

    /// How the input was interpreted.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// True when the input was a complete page.
    pub fn is_full_document(&self) -> bool {
        self.mode == ParseMode::Document
    }

    /// Recovery notes emitted while parsing.
    pub fn recovery_notices(&self) -> &[ParseRecoveryNotice] {
        &self.notices
    }

    /// Total number of nodes (elements and text).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A document always has at least its root, so this is never true in practice.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    /// Element handle for `id`, or `None` for text nodes.
    pub fn element(&self, id: NodeId) -> Option<Element<'_>> {
        match self.nodes.get(id.0)?.kind {
            NodeKind::Element(_) => Some(Element::new(self, id)),
            NodeKind::Text(_) => None,
        }
    }

    /// Every element in document order, root included.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        // Arena order is pre-order because the parser allocates depth-first.
        (0..self.nodes.len())
            .map(NodeId)
            .filter_map(move |id| self.element(id))
    }

    /// Every element with one of the given tag names, in document order.
    pub fn elements_by_tag<'a>(&'a self, tags: &'a [&'a str]) -> impl Iterator<Item = Element<'a>> + 'a {
        self.elements().filter(move |el| tags.contains(&el.name()))
    }

    /// Every element carrying `attr`, in document order.
    pub fn elements_with_attr<'a>(&'a self, attr: &'a str) -> impl Iterator<Item = Element<'a>> + 'a {
        self.elements().filter(move |el| el.has_attr(attr))
    }

    /// Every element whose `role` attribute equals `role` (case-insensitive, trimmed).
    pub fn elements_with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = Element<'a>> + 'a {
        self.elements().filter(move |el| el.has_role(role))
    }

    /// The `<head>` element, if present.
    pub fn head(&self) -> Option<Element<'_>> {
        self.root().element_children().find(|el| el.name() == "head")
    }

    /// The `<body>` element, if present.
    pub fn body(&self) -> Option<Element<'_>> {
        self.root().element_children().find(|el| el.name() == "body")
    }
}

/// True when `value` is empty or contains only whitespace.
pub fn is_whitespace_only(value: &str) -> bool {
    value.trim().is_empty()
}
