use crate::registry::AttrType;
use thiserror::Error;

/// Byte range into the raw article source.
///
/// Spans are contiguous, `start <= end`, and index the original input string,
/// so diagnostics can point back at the exact markup that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Length of the spanned range in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers no input.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Non-fatal problems found while parsing.
///
/// Parsing never fails outright; anything unrecoverable degrades to literal
/// text or an auto-closed element and is recorded here for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A tag header (`<name ...`) never reached its closing `>`.
    /// The remainder of the input was kept as literal text.
    UnterminatedTagHeader {
        /// Location of the orphaned header and trailing text.
        span: Span,
        /// Tag name as far as it could be read.
        name: String,
    },
    /// An element was still open when its scope ended; it was auto-closed
    /// with its children kept.
    UnclosedTag {
        /// Location from the opening tag to the point of auto-closure.
        span: Span,
        /// Name of the element that was left open.
        name: String,
    },
    /// A closing tag matched no open element and was dropped.
    StrayCloseTag {
        /// Location of the dropped closing tag.
        span: Span,
        /// Name the closing tag carried.
        name: String,
    },
    /// An attribute appeared more than once on one tag; the first value wins.
    DuplicateAttribute {
        /// Location of the tag header.
        span: Span,
        /// Tag the attribute appeared on.
        tag: String,
        /// The repeated attribute name.
        attribute: String,
    },
}

impl ParseWarning {
    /// Get the source location of this warning.
    pub fn span(&self) -> Span {
        match self {
            ParseWarning::UnterminatedTagHeader { span, .. }
            | ParseWarning::UnclosedTag { span, .. }
            | ParseWarning::StrayCloseTag { span, .. }
            | ParseWarning::DuplicateAttribute { span, .. } => *span,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnterminatedTagHeader { span, name } => {
                write!(f, "unterminated tag header <{}> at {}", name, span)
            }
            ParseWarning::UnclosedTag { span, name } => {
                write!(f, "unclosed tag <{}> at {} (auto-closed)", name, span)
            }
            ParseWarning::StrayCloseTag { span, name } => {
                write!(f, "stray closing tag </{}> at {}", name, span)
            }
            ParseWarning::DuplicateAttribute { span, tag, attribute } => {
                write!(
                    f,
                    "duplicate attribute `{}` on <{}> at {} (first value kept)",
                    attribute, tag, span
                )
            }
        }
    }
}

/// Non-fatal degradations recorded while transforming a syntax tree.
///
/// These carry the detail behind a fallback or a dropped construct; the
/// render tree itself only records the coarse [`crate::FallbackReason`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransformWarning {
    /// A required attribute was absent.
    MissingAttribute {
        /// Tag the attribute belongs to.
        tag: String,
        /// The missing attribute name.
        attribute: String,
    },
    /// An attribute value could not be coerced to its declared type.
    AttributeTypeMismatch {
        /// Tag the attribute belongs to.
        tag: String,
        /// The ill-typed attribute name.
        attribute: String,
        /// The type the descriptor declares.
        expected: AttrType,
        /// The raw value that failed to coerce.
        value: String,
    },
    /// An attribute not declared by the descriptor was dropped.
    UnknownAttribute {
        /// Tag the attribute appeared on.
        tag: String,
        /// The undeclared attribute name.
        attribute: String,
    },
    /// Children of a childless tag were dropped.
    ChildrenDropped {
        /// The tag whose descriptor disallows children.
        tag: String,
    },
}

impl std::fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformWarning::MissingAttribute { tag, attribute } => {
                write!(f, "<{}> is missing required attribute `{}`", tag, attribute)
            }
            TransformWarning::AttributeTypeMismatch {
                tag,
                attribute,
                expected,
                value,
            } => {
                write!(
                    f,
                    "<{}> attribute `{}` expects {} but got `{}`",
                    tag, attribute, expected, value
                )
            }
            TransformWarning::UnknownAttribute { tag, attribute } => {
                write!(f, "<{}> has undeclared attribute `{}` (dropped)", tag, attribute)
            }
            TransformWarning::ChildrenDropped { tag } => {
                write!(f, "<{}> does not allow children (dropped)", tag)
            }
        }
    }
}

/// Errors raised by tag registry mutation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry froze after its first lookup; late registration is rejected.
    #[error("cannot register tag `{name}`: registry is frozen after first lookup")]
    Frozen {
        /// The tag that could not be registered.
        name: String,
    },
}

/// Errors raised while loading a declarative registry configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML source failed to deserialize.
    #[error("invalid YAML registry configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON source failed to deserialize.
    #[error("invalid JSON registry configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_display_and_len() {
        let span = Span::new(3, 9);
        assert_eq!(span.to_string(), "3..9");
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(4, 4).is_empty());
    }

    #[test]
    fn parse_warning_exposes_span() {
        let warning = ParseWarning::StrayCloseTag {
            span: Span::new(10, 17),
            name: "note".to_string(),
        };
        assert_eq!(warning.span(), Span::new(10, 17));
        assert_eq!(warning.to_string(), "stray closing tag </note> at 10..17");
    }

    #[test]
    fn transform_warning_messages() {
        let warning = TransformWarning::AttributeTypeMismatch {
            tag: "youtube".to_string(),
            attribute: "start".to_string(),
            expected: AttrType::Number,
            value: "soon".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "<youtube> attribute `start` expects number but got `soon`"
        );
    }
}
