//! Tag registry: the descriptor vocabulary the transformer resolves against.
//!
//! The registry is built once at process start (in code or from a
//! declarative config, see [`config`]) and freezes on its first lookup;
//! after that it is read-only and safe for unsynchronized concurrent reads.

pub mod config;
pub mod defaults;

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

/// Name of the built-in descriptor the synthetic document root resolves to.
pub const DOCUMENT_TAG: &str = "document";

/// Expected type of a tag attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    /// Any string value.
    String,
    /// A finite number (`f64`-parseable).
    Number,
    /// `true` or `false`, case-insensitive; bare attributes read as `true`.
    Boolean,
}

impl std::fmt::Display for AttrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AttrType::String => "string",
            AttrType::Number => "number",
            AttrType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Descriptor for one tag kind: its attribute schema and content rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDescriptor {
    /// Tag name (lowercase).
    pub name: String,
    /// Attributes that must be present, with their expected types.
    #[serde(default)]
    pub required_attributes: BTreeMap<String, AttrType>,
    /// Attributes that may be present, with their expected types.
    #[serde(default)]
    pub optional_attributes: BTreeMap<String, AttrType>,
    /// Whether the tag may contain child content.
    #[serde(default = "default_true")]
    pub allows_children: bool,
    /// Whether the tag is written self-closing (`<divider />`).
    #[serde(default)]
    pub self_closing: bool,
}

fn default_true() -> bool {
    true
}

impl TagDescriptor {
    /// Create a descriptor with no attributes that allows children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_attributes: BTreeMap::new(),
            optional_attributes: BTreeMap::new(),
            allows_children: true,
            self_closing: false,
        }
    }

    /// Add a required attribute.
    pub fn with_required(mut self, attribute: impl Into<String>, ty: AttrType) -> Self {
        self.required_attributes.insert(attribute.into(), ty);
        self
    }

    /// Add an optional attribute.
    pub fn with_optional(mut self, attribute: impl Into<String>, ty: AttrType) -> Self {
        self.optional_attributes.insert(attribute.into(), ty);
        self
    }

    /// Mark the tag as childless.
    pub fn childless(mut self) -> Self {
        self.allows_children = false;
        self
    }

    /// Mark the tag as self-closing (implies childless).
    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self.allows_children = false;
        self
    }
}

/// Mapping from tag name to descriptor.
///
/// `register` takes `&mut self` and `lookup` takes `&self`, so the borrow
/// checker already rules out reader/writer races; the freeze flag adds the
/// startup-time contract that registration stops once resolution begins.
#[derive(Debug)]
pub struct TagRegistry {
    entries: HashMap<String, TagDescriptor>,
    frozen: AtomicBool,
}

impl TagRegistry {
    /// Create a registry seeded with the built-in `document` descriptor.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            DOCUMENT_TAG.to_string(),
            TagDescriptor::new(DOCUMENT_TAG),
        );
        Self {
            entries,
            frozen: AtomicBool::new(false),
        }
    }

    /// Register a descriptor, replacing any previous one of the same name.
    ///
    /// Rejected once the registry froze (after the first [`lookup`](Self::lookup)).
    pub fn register(&mut self, descriptor: TagDescriptor) -> Result<(), RegistryError> {
        if self.frozen.load(Ordering::Acquire) {
            return Err(RegistryError::Frozen {
                name: descriptor.name,
            });
        }
        self.entries.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Resolve a tag name. Unknown names return `None`, never an error.
    ///
    /// The first call freezes the registry for further registration.
    pub fn lookup(&self, name: &str) -> Option<&TagDescriptor> {
        self.frozen.store(true, Ordering::Release);
        self.entries.get(name)
    }

    /// Whether the registry has frozen (a lookup has happened).
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Number of registered descriptors, the built-in root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing at all is registered (never the case for registries
    /// built through [`new`](Self::new)).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}
