//! Presentation element tree consumed by the embedding layer.
//!
//! This is the renderer's output format: a plain, serializable tree the
//! presentation layer instantiates however it likes. The pipeline performs
//! no I/O with it.

use serde::Serialize;
use std::collections::BTreeMap;

/// A node of the presentation tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PresentationElement {
    /// A text run.
    Text {
        /// The text content.
        content: String,
    },
    /// A named element with string attributes and ordered children.
    Element {
        /// Element name.
        name: String,
        /// Attributes, stringified.
        attrs: BTreeMap<String, String>,
        /// Child elements in order.
        children: Vec<PresentationElement>,
    },
}

impl PresentationElement {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        PresentationElement::Text {
            content: content.into(),
        }
    }

    /// Create an element with no attributes or children.
    pub fn element(name: impl Into<String>) -> Self {
        PresentationElement::Element {
            name: name.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. No-op on text nodes.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let PresentationElement::Element { attrs, .. } = &mut self {
            attrs.insert(name.into(), value.into());
        }
        self
    }

    /// Append a child. No-op on text nodes.
    pub fn with_child(mut self, child: PresentationElement) -> Self {
        if let PresentationElement::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Append several children. No-op on text nodes.
    pub fn with_children(
        mut self,
        new_children: impl IntoIterator<Item = PresentationElement>,
    ) -> Self {
        if let PresentationElement::Element { children, .. } = &mut self {
            children.extend(new_children);
        }
        self
    }

    /// Append a text child.
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(PresentationElement::text(content))
    }

    /// Element name; `None` for text nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            PresentationElement::Element { name, .. } => Some(name),
            PresentationElement::Text { .. } => None,
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            PresentationElement::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            PresentationElement::Text { .. } => None,
        }
    }

    /// Children of this node; empty for text nodes.
    pub fn children(&self) -> &[PresentationElement] {
        match self {
            PresentationElement::Element { children, .. } => children,
            PresentationElement::Text { .. } => &[],
        }
    }

    /// Depth-first search for the first element with the given name,
    /// this node included.
    pub fn find(&self, name: &str) -> Option<&PresentationElement> {
        if self.name() == Some(name) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    /// True when an element with the given name exists in this subtree.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        match self {
            PresentationElement::Text { content } => content.clone(),
            PresentationElement::Element { children, .. } => {
                children.iter().map(|c| c.text_content()).collect()
            }
        }
    }
}
