//! Render-tree walking and moderation-gated article view assembly.

use crate::components::ComponentMap;
use crate::element::PresentationElement;
use crate::moderation::{ModerationFacts, ViewerRole};
use artdoc_core::{DOCUMENT_TAG, RenderNode};

/// Render an article view from a render tree, a component map, and the
/// moderation facts for this request.
///
/// The output is assembled in a fixed order: body (or a locked notice),
/// comment section (skipped entirely while locked), then the admin panel for
/// admin viewers only. Rendering is a pure function of its inputs, so
/// repeated calls yield structurally identical trees.
pub fn render(
    tree: &RenderNode,
    components: &ComponentMap,
    facts: &ModerationFacts,
) -> PresentationElement {
    let mut view = PresentationElement::element("article-view");

    if facts.account_locked {
        // A locked account shows neither body nor comments, whatever the
        // tree contains.
        view = view.with_child(locked_notice());
    } else {
        view = view.with_child(render_body(tree, components));
        view = view.with_child(comment_section(facts));
    }

    if facts.viewer_role == ViewerRole::Admin {
        view = view.with_child(admin_panel(facts));
    }

    view
}

fn locked_notice() -> PresentationElement {
    PresentationElement::element("locked-notice").with_text("Account locked \u{1f512}")
}

/// Wrap the walked tree in the body container. A `document` root unwraps
/// into the container directly; anything else renders as a single child.
fn render_body(tree: &RenderNode, components: &ComponentMap) -> PresentationElement {
    let body = PresentationElement::element("article-body");
    match tree {
        RenderNode::Element { kind, children, .. } if kind == DOCUMENT_TAG => {
            body.with_children(children.iter().map(|child| render_node(child, components)))
        }
        other => body.with_child(render_node(other, components)),
    }
}

/// Render one node. This is the sanitation boundary: fallback nodes become
/// an empty placeholder and the original markup never re-enters the output.
fn render_node(node: &RenderNode, components: &ComponentMap) -> PresentationElement {
    match node {
        RenderNode::Text { content } => PresentationElement::text(content),
        RenderNode::Element {
            kind,
            attributes,
            children,
        } => {
            let rendered: Vec<_> = children
                .iter()
                .map(|child| render_node(child, components))
                .collect();
            match components.get(kind) {
                Some(component) => component.instantiate(attributes, rendered),
                None => generic_element(kind, rendered),
            }
        }
        RenderNode::Fallback { original, reason } => {
            log::debug!("sanitized fallback node <{}>: {}", original, reason);
            PresentationElement::element("span").with_attr("data-fallback", reason.as_str())
        }
    }
}

/// Generic rendering for kinds with no registered component: a paragraph
/// around content, a bare span otherwise.
fn generic_element(kind: &str, children: Vec<PresentationElement>) -> PresentationElement {
    let name = if children.is_empty() { "span" } else { "p" };
    PresentationElement::element(name)
        .with_attr("data-kind", kind)
        .with_children(children)
}

fn comment_section(facts: &ModerationFacts) -> PresentationElement {
    if facts.comments_enabled {
        // Placeholder for the external comment collaborator to hydrate.
        PresentationElement::element("comment-section")
            .with_attr("data-post-id", &facts.post_id)
            .with_attr("data-owner-id", &facts.owner_id)
    } else {
        PresentationElement::element("comments-disabled")
            .with_text("Comments are disabled for this post")
    }
}

/// The admin control surface: exactly two actions, mutually exclusive on the
/// lock state. Only ever instantiated for admin viewers.
fn admin_panel(facts: &ModerationFacts) -> PresentationElement {
    let panel = PresentationElement::element("admin-controls")
        .with_attr("data-subject-id", &facts.owner_id)
        .with_child(PresentationElement::element("h4").with_text("Admin Control"));

    if facts.account_locked {
        panel.with_child(
            PresentationElement::element("button")
                .with_attr("data-action", "unban")
                .with_text("Unban this user"),
        )
    } else {
        panel.with_child(
            PresentationElement::element("form")
                .with_attr("data-action", "ban")
                .with_child(
                    PresentationElement::element("label")
                        .with_attr("for", "note")
                        .with_text("Add your reason to ban the user"),
                )
                .with_child(
                    PresentationElement::element("textarea")
                        .with_attr("name", "note")
                        .with_attr("rows", "4"),
                )
                .with_child(
                    PresentationElement::element("button")
                        .with_attr("type", "submit")
                        .with_text("Ban user"),
                ),
        )
    }
}
