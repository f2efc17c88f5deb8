//! Untyped syntax tree produced by the parser.

use crate::error::Span;
use std::collections::BTreeMap;

/// Classification of a syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxKind {
    /// The synthetic root; its children are the block-level nodes in
    /// document order.
    Document,
    /// A named markup construct (`<note ...>`).
    Tag(String),
    /// A literal text run.
    Text,
}

impl SyntaxKind {
    /// Tag name for `Tag` nodes, the built-in name for the root, `None` for text.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            SyntaxKind::Document => Some(crate::registry::DOCUMENT_TAG),
            SyntaxKind::Tag(name) => Some(name),
            SyntaxKind::Text => None,
        }
    }

    /// True for literal text runs.
    pub fn is_text(&self) -> bool {
        matches!(self, SyntaxKind::Text)
    }
}

/// A node of the untyped syntax tree.
///
/// Owned exclusively by the tree it is part of; the parser is the only
/// producer and no mutating API is exposed, so a tree is immutable once
/// parsing completes.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    /// What this node is.
    pub kind: SyntaxKind,
    /// Raw attribute values as written, keyed by lowercased name. Untyped;
    /// coercion happens in the transformer.
    pub raw_attributes: BTreeMap<String, String>,
    /// Literal content for `Text` nodes; empty otherwise.
    pub text: String,
    /// Child nodes in document order.
    pub children: Vec<SyntaxNode>,
    /// Byte range of the node in the raw input.
    pub span: Span,
}

impl SyntaxNode {
    pub(crate) fn document(span: Span) -> Self {
        Self {
            kind: SyntaxKind::Document,
            raw_attributes: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            span,
        }
    }

    pub(crate) fn tag(name: String, span: Span) -> Self {
        Self {
            kind: SyntaxKind::Tag(name),
            raw_attributes: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            span,
        }
    }

    pub(crate) fn text(content: String, span: Span) -> Self {
        Self {
            kind: SyntaxKind::Text,
            raw_attributes: BTreeMap::new(),
            text: content,
            children: Vec::new(),
            span,
        }
    }

    /// True when every text run in this subtree is whitespace.
    pub fn is_blank_text(&self) -> bool {
        self.kind.is_text() && self.text.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_resolution() {
        assert_eq!(SyntaxKind::Document.tag_name(), Some("document"));
        assert_eq!(
            SyntaxKind::Tag("note".to_string()).tag_name(),
            Some("note")
        );
        assert_eq!(SyntaxKind::Text.tag_name(), None);
    }

    #[test]
    fn blank_text_detection() {
        let blank = SyntaxNode::text("  \n\t".to_string(), Span::new(0, 4));
        assert!(blank.is_blank_text());

        let words = SyntaxNode::text("  hi ".to_string(), Span::new(0, 5));
        assert!(!words.is_blank_text());

        let tag = SyntaxNode::tag("note".to_string(), Span::new(0, 6));
        assert!(!tag.is_blank_text());
    }
}
