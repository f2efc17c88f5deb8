#![deny(missing_docs)]
//! artdoc core: article markup parsing, tag registry, and render-tree
//! transformation.

/// Core error and diagnostic types.
pub mod error;
/// Markup parsing into an untyped syntax tree.
pub mod parser;
/// Tag registry, declarative configuration, and the default vocabulary.
pub mod registry;
/// Untyped syntax tree types.
pub mod syntax;
/// Syntax-tree to render-tree transformation.
pub mod transform;

pub use error::{ConfigError, ParseWarning, RegistryError, Span, TransformWarning};
pub use parser::{Parsed, parse};
pub use registry::{
    AttrType, DOCUMENT_TAG, TagDescriptor, TagRegistry, config::RegistryConfig,
};
pub use syntax::{SyntaxKind, SyntaxNode};
pub use transform::{AttrValue, FallbackReason, RenderNode, Transformed, transform};
