//! Article listing view for an author's profile.
//!
//! Unpublished drafts never reach the element tree: the filter lives here so
//! every listing context gets the product behavior without pre-filtering.

use crate::element::PresentationElement;
use crate::moderation::ModerationFacts;
use serde::{Deserialize, Serialize};

/// Listing-level view of one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    /// Stable article identifier.
    pub id: String,
    /// URL slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Short excerpt shown in the preview.
    pub excerpt: String,
    /// Estimated read time in minutes.
    pub read_time_mins: u32,
    /// Publication timestamp; `None` for drafts.
    pub published: Option<String>,
}

/// Render an author's article listing.
///
/// A locked account shows the locked header and no previews. Otherwise the
/// published articles render in order, with an edit affordance for the owner
/// only; an all-drafts (or empty) listing gets the empty state.
pub fn render_listing(
    articles: &[ArticleSummary],
    facts: &ModerationFacts,
) -> PresentationElement {
    let listing = PresentationElement::element("article-listing");

    if facts.account_locked {
        return listing.with_child(
            PresentationElement::element("locked-notice").with_text("Account locked \u{1f512}"),
        );
    }

    let published: Vec<&ArticleSummary> = articles
        .iter()
        .filter(|article| article.published.is_some())
        .collect();

    let header = PresentationElement::element("listing-header")
        .with_attr("data-count", published.len().to_string())
        .with_text("Published articles");
    let mut listing = listing.with_child(header);

    if published.is_empty() {
        return listing.with_child(
            PresentationElement::element("empty-state").with_text("Nothing published yet"),
        );
    }

    for article in published {
        listing = listing.with_child(preview(article, facts.is_owner));
    }
    listing
}

fn preview(article: &ArticleSummary, is_owner: bool) -> PresentationElement {
    let date = article.published.as_deref().unwrap_or_default();
    let mut preview = PresentationElement::element("article-preview")
        .with_attr("data-id", &article.id)
        .with_attr("data-slug", &article.slug)
        .with_attr("data-read-time-mins", article.read_time_mins.to_string())
        .with_attr("data-published", date)
        .with_child(PresentationElement::element("h2").with_text(&article.title))
        .with_child(PresentationElement::element("p").with_text(&article.excerpt));

    if is_owner {
        preview = preview.with_child(
            PresentationElement::element("a")
                .with_attr("href", format!("/create/{}", article.id))
                .with_text("Edit"),
        );
    }
    preview
}
