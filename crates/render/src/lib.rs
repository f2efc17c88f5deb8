#![deny(missing_docs)]
//! artdoc render: presentation elements, component substitution, moderation
//! gating, and HTML output.

/// Component map and the default article components.
pub mod components;
/// Presentation element tree.
pub mod element;
/// HTML serialization of presentation trees.
pub mod html;
/// Article listing view.
pub mod listing;
/// Moderation facts and the admin action state machine.
pub mod moderation;
/// Render-tree walking and article view assembly.
pub mod render;

pub use components::{Component, ComponentMap, defaults as default_components};
pub use element::PresentationElement;
pub use html::to_html;
pub use listing::{ArticleSummary, render_listing};
pub use moderation::{
    ActionOutcome, AdminActions, ModerationBackend, ModerationError, ModerationFacts, ViewerRole,
};
pub use render::render;
