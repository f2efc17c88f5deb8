//! Semantic transformation: resolving a syntax tree into a typed render tree.
//!
//! The transformer is the sanitation point of the pipeline: every node is
//! resolved against the tag registry and either becomes a typed element or
//! degrades to a fallback placeholder. Malformed author input never aborts a
//! render; it narrows to the smallest node that misbehaved.

use crate::error::TransformWarning;
use crate::registry::{AttrType, TagDescriptor, TagRegistry};
use crate::syntax::{SyntaxKind, SyntaxNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// A validated, typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AttrValue {
    /// A string value.
    Str {
        /// The value.
        value: String,
    },
    /// A finite number.
    Number {
        /// The value.
        value: f64,
    },
    /// A boolean.
    Boolean {
        /// The value.
        value: bool,
    },
}

impl AttrValue {
    /// Create a string value.
    pub fn str(value: impl Into<String>) -> Self {
        AttrValue::Str {
            value: value.into(),
        }
    }

    /// Create a number value.
    pub fn number(value: f64) -> Self {
        AttrValue::Number { value }
    }

    /// Create a boolean value.
    pub fn boolean(value: bool) -> Self {
        AttrValue::Boolean { value }
    }

    /// String content when this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str { value } => Some(value),
            _ => None,
        }
    }

    /// Numeric content when this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number { value } => Some(*value),
            _ => None,
        }
    }

    /// Boolean content when this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Boolean { value } => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Str { value } => f.write_str(value),
            AttrValue::Number { value } => write!(f, "{}", value),
            AttrValue::Boolean { value } => write!(f, "{}", value),
        }
    }
}

/// Why a node degraded to a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackReason {
    /// The tag kind is not in the registry.
    UnregisteredTag,
    /// A required attribute is missing or a value failed type coercion.
    InvalidAttributes,
}

impl FallbackReason {
    /// Stable string form of the reason.
    pub const fn as_str(self) -> &'static str {
        match self {
            FallbackReason::UnregisteredTag => "unregistered-tag",
            FallbackReason::InvalidAttributes => "invalid-attributes",
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the typed render tree handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderNode {
    /// A literal text run, verbatim from the source.
    Text {
        /// The text content.
        content: String,
    },
    /// A resolved element. Only exists for kinds present in the registry at
    /// transform time.
    Element {
        /// The resolved tag kind.
        kind: String,
        /// Validated, coerced attributes.
        attributes: BTreeMap<String, AttrValue>,
        /// Child nodes, in source order.
        children: Vec<RenderNode>,
    },
    /// A safe placeholder for a node that failed resolution or validation.
    Fallback {
        /// The tag kind as written.
        original: String,
        /// Why the node degraded.
        reason: FallbackReason,
    },
}

impl RenderNode {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        RenderNode::Text {
            content: content.into(),
        }
    }

    /// True for fallback placeholders.
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderNode::Fallback { .. })
    }

    /// Children of this node; empty for text and fallback nodes.
    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Element { children, .. } => children,
            _ => &[],
        }
    }
}

/// Result of a transform: the render tree plus degradation detail.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// The typed render tree.
    pub tree: RenderNode,
    /// Degradations recorded along the way.
    pub warnings: Vec<TransformWarning>,
}

/// Transform a syntax tree into a render tree.
///
/// Depth-first pre-order walk; child ordering is preserved at every level.
/// Resolution failures degrade the single offending node, never the walk.
pub fn transform(root: &SyntaxNode, registry: &TagRegistry) -> Transformed {
    let mut warnings = Vec::new();
    let tree = transform_node(root, registry, &mut warnings);
    Transformed { tree, warnings }
}

fn transform_node(
    node: &SyntaxNode,
    registry: &TagRegistry,
    warnings: &mut Vec<TransformWarning>,
) -> RenderNode {
    if let SyntaxKind::Text = node.kind {
        // Literal content is never re-parsed.
        return RenderNode::Text {
            content: node.text.clone(),
        };
    }

    let kind = node
        .kind
        .tag_name()
        .expect("non-text nodes always have a tag name");

    let Some(descriptor) = registry.lookup(kind) else {
        log::warn!("unregistered tag <{}> degraded to fallback", kind);
        return RenderNode::Fallback {
            original: kind.to_string(),
            reason: FallbackReason::UnregisteredTag,
        };
    };

    let attributes = match validate_attributes(node, descriptor, kind, warnings) {
        Ok(attributes) => attributes,
        Err(reason) => {
            log::warn!("tag <{}> degraded to fallback: {}", kind, reason);
            return RenderNode::Fallback {
                original: kind.to_string(),
                reason,
            };
        }
    };

    let children = if !descriptor.allows_children && !node.children.is_empty() {
        warnings.push(TransformWarning::ChildrenDropped {
            tag: kind.to_string(),
        });
        Vec::new()
    } else {
        node.children
            .iter()
            .map(|child| transform_node(child, registry, warnings))
            .collect()
    };

    RenderNode::Element {
        kind: kind.to_string(),
        attributes,
        children,
    }
}

/// Validate and coerce raw attributes against a descriptor.
///
/// Check order is fixed: presence of every required attribute, then
/// required-value coercion, then optional-value coercion. The first failure
/// decides the (single) fallback reason; undeclared attributes are dropped
/// with a warning rather than degrading the node.
fn validate_attributes(
    node: &SyntaxNode,
    descriptor: &TagDescriptor,
    tag: &str,
    warnings: &mut Vec<TransformWarning>,
) -> Result<BTreeMap<String, AttrValue>, FallbackReason> {
    let mut attributes = BTreeMap::new();

    for name in descriptor.required_attributes.keys() {
        if !node.raw_attributes.contains_key(name) {
            warnings.push(TransformWarning::MissingAttribute {
                tag: tag.to_string(),
                attribute: name.clone(),
            });
            return Err(FallbackReason::InvalidAttributes);
        }
    }

    for (name, ty) in &descriptor.required_attributes {
        let raw = &node.raw_attributes[name];
        match coerce(raw, *ty) {
            Some(value) => {
                attributes.insert(name.clone(), value);
            }
            None => {
                warnings.push(TransformWarning::AttributeTypeMismatch {
                    tag: tag.to_string(),
                    attribute: name.clone(),
                    expected: *ty,
                    value: raw.clone(),
                });
                return Err(FallbackReason::InvalidAttributes);
            }
        }
    }

    for (name, ty) in &descriptor.optional_attributes {
        let Some(raw) = node.raw_attributes.get(name) else {
            continue;
        };
        match coerce(raw, *ty) {
            Some(value) => {
                attributes.insert(name.clone(), value);
            }
            None => {
                warnings.push(TransformWarning::AttributeTypeMismatch {
                    tag: tag.to_string(),
                    attribute: name.clone(),
                    expected: *ty,
                    value: raw.clone(),
                });
                return Err(FallbackReason::InvalidAttributes);
            }
        }
    }

    for name in node.raw_attributes.keys() {
        if !descriptor.required_attributes.contains_key(name)
            && !descriptor.optional_attributes.contains_key(name)
        {
            warnings.push(TransformWarning::UnknownAttribute {
                tag: tag.to_string(),
                attribute: name.clone(),
            });
        }
    }

    Ok(attributes)
}

fn coerce(raw: &str, ty: AttrType) -> Option<AttrValue> {
    match ty {
        AttrType::String => Some(AttrValue::str(raw)),
        AttrType::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(AttrValue::number),
        AttrType::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Some(AttrValue::boolean(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Some(AttrValue::boolean(false))
            } else {
                None
            }
        }
    }
}
