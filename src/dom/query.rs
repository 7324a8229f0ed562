// SPDX-License-Identifier: PMPL-1.0-or-later
//! Traversal helpers shared by every rule.
//!
//! [`Element`] is a cheap `Copy` handle (document reference plus index).
//! All lookups are O(1) or O(subtree); nothing is cached.

use super::{is_whitespace_only, Document, ElementData, NodeId, NodeKind};

/// Borrowed handle to an element node.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Element<'_> {}

impl<'a> Element<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    /// Arena index of this element.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Owning document.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    fn data(&self) -> &'a ElementData {
        match &self.doc.node(self.id).kind {
            NodeKind::Element(data) => data,
            NodeKind::Text(_) => unreachable!("Element handle always points at an element node"),
        }
    }

    /// Lowercase tag name.
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// True if the tag name is one of `tags`.
    pub fn is(&self, tags: &[&str]) -> bool {
        tags.contains(&self.name())
    }

    /// Raw attribute value; the name is matched case-insensitively.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data().attr(name)
    }

    /// Attribute presence, regardless of value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// All attributes in source order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.data().attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attribute present with something other than whitespace.
    pub fn has_non_empty_attr(&self, name: &str) -> bool {
        self.attr(name).is_some_and(|v| !is_whitespace_only(v))
    }

    /// Attribute present but empty or whitespace-only.
    pub fn has_blank_attr(&self, name: &str) -> bool {
        self.attr(name).is_some_and(is_whitespace_only)
    }

    /// Trimmed attribute value compared case-insensitively.
    pub fn attr_eq_ignore_case(&self, name: &str, expected: &str) -> bool {
        self.attr(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
    }

    /// Trimmed, lowercased attribute value.
    pub fn attr_lower(&self, name: &str) -> Option<String> {
        self.attr(name).map(|v| v.trim().to_ascii_lowercase())
    }

    /// Whether the `role` attribute is exactly `role` (trimmed, case-insensitive).
    pub fn has_role(&self, role: &str) -> bool {
        self.attr_eq_ignore_case("role", role)
    }

    /// Whether this is an `<input>` of the given type (missing type counts as `text`).
    pub fn is_input_type(&self, input_type: &str) -> bool {
        self.name() == "input" && self.input_type() == input_type
    }

    /// Effective `type` of an `<input>`: trimmed, lowercased, `text` when absent.
    pub fn input_type(&self) -> String {
        match self.attr_lower("type") {
            Some(t) if !t.is_empty() => t,
            _ => "text".to_string(),
        }
    }

    /// Created by the parser rather than written in the source.
    pub fn is_implicit(&self) -> bool {
        self.data().implicit
    }

    /// Carries the boolean `hidden` attribute or `aria-hidden="true"`.
    pub fn is_hidden(&self) -> bool {
        self.has_attr("hidden") || self.attr_eq_ignore_case("aria-hidden", "true")
    }

    /// Parent element; `None` for the root.
    pub fn parent(&self) -> Option<Element<'a>> {
        let parent = self.doc.node(self.id).parent?;
        self.doc.element(parent)
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        std::iter::successors(self.parent(), |el| el.parent())
    }

    /// Nearest ancestor whose tag is one of `tags`.
    pub fn ancestor_of(&self, tags: &[&str]) -> Option<Element<'a>> {
        self.ancestors().find(|el| el.is(tags))
    }

    /// Whether any ancestor has one of the given tags.
    pub fn has_ancestor(&self, tags: &[&str]) -> bool {
        self.ancestor_of(tags).is_some()
    }

    /// Direct child node ids, text included.
    pub fn child_nodes(&self) -> &'a [NodeId] {
        &self.doc.node(self.id).children
    }

    /// Direct element children in order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let doc = self.doc;
        self.child_nodes().iter().filter_map(move |&id| doc.element(id))
    }

    /// Alias for [`Element::children`], reads better at call sites that
    /// contrast element and text children.
    pub fn element_children(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        self.children()
    }

    /// First element child.
    pub fn first_element_child(&self) -> Option<Element<'a>> {
        self.children().next()
    }

    /// Last element child.
    pub fn last_element_child(&self) -> Option<Element<'a>> {
        self.children().last()
    }

    /// First child that is an element or non-whitespace text.
    pub fn first_significant_child(&self) -> Option<Child<'a>> {
        self.significant_children().next()
    }

    /// Children that are elements or non-whitespace text, in order.
    pub fn significant_children(&self) -> impl Iterator<Item = Child<'a>> + 'a {
        let doc = self.doc;
        self.child_nodes().iter().filter_map(move |&id| match &doc.node(id).kind {
            NodeKind::Element(_) => Some(Child::Element(Element::new(doc, id))),
            NodeKind::Text(text) if !is_whitespace_only(text) => Some(Child::Text),
            NodeKind::Text(_) => None,
        })
    }

    /// Whether this element is the first significant child of its parent.
    pub fn is_first_significant_child(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.first_significant_child() == Some(Child::Element(*self)),
            None => true,
        }
    }

    /// Whether this element is the last significant child of its parent.
    pub fn is_last_significant_child(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.significant_children().last() == Some(Child::Element(*self)),
            None => true,
        }
    }

    /// Next element sibling.
    pub fn next_element_sibling(&self) -> Option<Element<'a>> {
        let parent = self.parent()?;
        let mut children = parent.children();
        children.find(|el| el == self)?;
        children.next()
    }

    /// Previous element sibling.
    pub fn prev_element_sibling(&self) -> Option<Element<'a>> {
        let parent = self.parent()?;
        let mut previous = None;
        for el in parent.children() {
            if el == *self {
                return previous;
            }
            previous = Some(el);
        }
        None
    }

    /// Descendant elements in depth-first pre-order, self excluded.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.child_nodes().to_vec();
        stack.reverse();
        Descendants { doc: self.doc, stack }
    }

    /// Descendants with one of the given tags.
    pub fn descendants_by_tag<'t>(&self, tags: &'t [&'t str]) -> impl Iterator<Item = Element<'a>> + 't
    where
        'a: 't,
    {
        self.descendants().filter(move |el| el.is(tags))
    }

    /// Concatenated text of all descendant text nodes, untrimmed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeId> = self.child_nodes().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.doc.node(id);
            match &node.kind {
                NodeKind::Text(text) => out.push_str(text),
                NodeKind::Element(_) => stack.extend(node.children.iter().rev().copied()),
            }
        }
        out
    }

    /// Whether the element has no element children and no non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.first_significant_child().is_none()
    }

    /// Nearest value of `attr` on this element or an ancestor.
    pub fn inherited_attr(&self, attr: &str) -> Option<(Element<'a>, &'a str)> {
        std::iter::once(*self)
            .chain(self.ancestors())
            .find_map(|el| el.attr(attr).map(|v| (el, v)))
    }
}

/// A child that matters for position checks: whitespace-only text is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child<'a> {
    Element(Element<'a>),
    Text,
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = self.doc.node(id);
            if let NodeKind::Element(_) = node.kind {
                self.stack.extend(node.children.iter().rev().copied());
                return Some(Element::new(self.doc, id));
            }
        }
        None
    }
}
