//! Default tag vocabulary for the article platform.
//!
//! This is the built-in equivalent of a deployment's registry config file:
//! the tags article authors get without any configuration.

use super::{AttrType, TagDescriptor, TagRegistry};
use once_cell::sync::Lazy;

/// Build the default article registry.
///
/// - `note` — callout block; `type` selects the variant, optional `title`.
/// - `quote` — attributed block quote with an optional `cite`.
/// - `youtube` — video embed; requires the video `id`, optional `start`
///   offset in seconds.
/// - `codepen` — pen embed; requires the pen `id`, optional `height` and
///   default `tab`.
/// - `divider` — thematic break, self-closing.
pub fn article_registry() -> TagRegistry {
    let mut registry = TagRegistry::new();
    let tags = [
        TagDescriptor::new("note")
            .with_required("type", AttrType::String)
            .with_optional("title", AttrType::String),
        TagDescriptor::new("quote").with_optional("cite", AttrType::String),
        TagDescriptor::new("youtube")
            .with_required("id", AttrType::String)
            .with_optional("start", AttrType::Number)
            .self_closing(),
        TagDescriptor::new("codepen")
            .with_required("id", AttrType::String)
            .with_optional("height", AttrType::Number)
            .with_optional("tab", AttrType::String)
            .self_closing(),
        TagDescriptor::new("divider").self_closing(),
    ];
    for tag in tags {
        registry
            .register(tag)
            .expect("fresh registry is never frozen");
    }
    registry
}

/// Shared, lazily built default registry for callers that don't configure
/// their own. Frozen by whichever caller looks up first.
pub fn shared() -> &'static TagRegistry {
    static REGISTRY: Lazy<TagRegistry> = Lazy::new(article_registry);
    &REGISTRY
}
