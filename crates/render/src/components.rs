//! Component map: presentation constructors for resolved tag kinds.
//!
//! The map is the renderer's extension point: embedders register a
//! constructor per tag kind and the renderer substitutes it wherever that
//! kind appears in the render tree. Kinds absent from the map degrade to a
//! generic element, never to raw markup.

use crate::element::PresentationElement;
use artdoc_core::AttrValue;
use std::collections::{BTreeMap, HashMap};

/// A presentation constructor for one tag kind.
pub trait Component: Send + Sync {
    /// Build the presentation element for a node of this kind.
    ///
    /// `attributes` are the validated values from the render tree and
    /// `children` are the already-rendered child elements.
    fn instantiate(
        &self,
        attributes: &BTreeMap<String, AttrValue>,
        children: Vec<PresentationElement>,
    ) -> PresentationElement;
}

impl<F> Component for F
where
    F: Fn(&BTreeMap<String, AttrValue>, Vec<PresentationElement>) -> PresentationElement
        + Send
        + Sync,
{
    fn instantiate(
        &self,
        attributes: &BTreeMap<String, AttrValue>,
        children: Vec<PresentationElement>,
    ) -> PresentationElement {
        (self)(attributes, children)
    }
}

/// String-keyed collection of components.
///
/// Built once by the embedder and read-only afterwards; concurrent readers
/// need no synchronization.
#[derive(Default)]
pub struct ComponentMap {
    components: HashMap<String, Box<dyn Component>>,
}

impl ComponentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component for a tag kind, replacing any previous one.
    pub fn register<C: Component + 'static>(&mut self, kind: impl Into<String>, component: C) {
        self.components.insert(kind.into(), Box::new(component));
    }

    /// Look up the component for a kind.
    pub fn get(&self, kind: &str) -> Option<&dyn Component> {
        self.components.get(kind).map(Box::as_ref)
    }

    /// True when a component is registered for the kind.
    pub fn contains(&self, kind: &str) -> bool {
        self.components.contains_key(kind)
    }
}

impl std::fmt::Debug for ComponentMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.components.keys().collect();
        kinds.sort();
        f.debug_struct("ComponentMap").field("kinds", &kinds).finish()
    }
}

/// Components for the default article tag vocabulary.
///
/// Mirrors [`artdoc_core::registry::defaults::article_registry`]: every
/// default tag gets a concrete presentation shape.
pub fn defaults() -> ComponentMap {
    let mut map = ComponentMap::new();

    map.register("note", |attrs: &BTreeMap<String, AttrValue>, children: Vec<PresentationElement>| {
        let variant = attrs
            .get("type")
            .and_then(AttrValue::as_str)
            .unwrap_or("note");
        let mut aside = PresentationElement::element("aside")
            .with_attr("class", format!("note note--{}", variant));
        if let Some(title) = attrs.get("title").and_then(AttrValue::as_str) {
            aside = aside.with_child(
                PresentationElement::element("p")
                    .with_attr("class", "note__title")
                    .with_text(title),
            );
        }
        aside.with_children(children)
    });

    map.register("quote", |attrs: &BTreeMap<String, AttrValue>, children: Vec<PresentationElement>| {
        let mut quote = PresentationElement::element("blockquote").with_children(children);
        if let Some(cite) = attrs.get("cite").and_then(AttrValue::as_str) {
            quote = quote.with_child(
                PresentationElement::element("cite").with_text(cite),
            );
        }
        quote
    });

    map.register("youtube", |attrs: &BTreeMap<String, AttrValue>, _children: Vec<PresentationElement>| {
        let id = attrs.get("id").and_then(AttrValue::as_str).unwrap_or("");
        let mut src = format!("https://www.youtube-nocookie.com/embed/{}", id);
        if let Some(start) = attrs.get("start").and_then(AttrValue::as_number) {
            src.push_str(&format!("?start={}", start));
        }
        PresentationElement::element("iframe")
            .with_attr("class", "embed embed--youtube")
            .with_attr("src", src)
            .with_attr("allowfullscreen", "true")
    });

    map.register("codepen", |attrs: &BTreeMap<String, AttrValue>, _children: Vec<PresentationElement>| {
        let id = attrs.get("id").and_then(AttrValue::as_str).unwrap_or("");
        let mut pen = PresentationElement::element("iframe")
            .with_attr("class", "embed embed--codepen")
            .with_attr("src", format!("https://codepen.io/embed/{}", id));
        if let Some(height) = attrs.get("height").and_then(AttrValue::as_number) {
            pen = pen.with_attr("height", height.to_string());
        }
        if let Some(tab) = attrs.get("tab").and_then(AttrValue::as_str) {
            pen = pen.with_attr("data-default-tab", tab);
        }
        pen
    });

    map.register(
        "divider",
        |_attrs: &BTreeMap<String, AttrValue>, _children: Vec<PresentationElement>| {
            PresentationElement::element("hr")
        },
    );

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, AttrValue)]) -> BTreeMap<String, AttrValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn closures_are_components() {
        let mut map = ComponentMap::new();
        map.register(
            "shout",
            |_attrs: &BTreeMap<String, AttrValue>, children: Vec<PresentationElement>| {
                PresentationElement::element("strong").with_children(children)
            },
        );

        let built = map
            .get("shout")
            .unwrap()
            .instantiate(&BTreeMap::new(), vec![PresentationElement::text("hi")]);
        assert_eq!(built.name(), Some("strong"));
        assert_eq!(built.text_content(), "hi");
    }

    #[test]
    fn missing_kind_returns_none() {
        let map = ComponentMap::new();
        assert!(map.get("note").is_none());
        assert!(!map.contains("note"));
    }

    #[test]
    fn default_note_carries_variant_and_title() {
        let map = defaults();
        let note = map.get("note").unwrap().instantiate(
            &attrs(&[
                ("type", AttrValue::str("warn")),
                ("title", AttrValue::str("Careful")),
            ]),
            vec![PresentationElement::text("hi")],
        );
        assert_eq!(note.name(), Some("aside"));
        assert_eq!(note.attr("class"), Some("note note--warn"));
        assert!(note.text_content().contains("Careful"));
        assert!(note.text_content().contains("hi"));
    }

    #[test]
    fn default_youtube_builds_embed_src() {
        let map = defaults();
        let embed = map.get("youtube").unwrap().instantiate(
            &attrs(&[
                ("id", AttrValue::str("abc123")),
                ("start", AttrValue::number(42.0)),
            ]),
            Vec::new(),
        );
        assert_eq!(
            embed.attr("src"),
            Some("https://www.youtube-nocookie.com/embed/abc123?start=42")
        );
    }

    #[test]
    fn default_divider_is_hr() {
        let map = defaults();
        let hr = map
            .get("divider")
            .unwrap()
            .instantiate(&BTreeMap::new(), Vec::new());
        assert_eq!(hr.name(), Some("hr"));
        assert!(hr.children().is_empty());
    }

    #[test]
    fn defaults_cover_the_default_registry() {
        let map = defaults();
        for kind in ["note", "quote", "youtube", "codepen", "divider"] {
            assert!(map.contains(kind), "missing component for `{}`", kind);
        }
    }
}
