//! Moderation gate: viewer facts and the admin ban/unban state machine.
//!
//! The pipeline never owns moderation state. It reflects whatever the
//! collaborator-supplied [`ModerationFacts`] say, and after a mutation it
//! re-fetches those facts instead of assuming the requested end-state, so the
//! rendered view cannot drift from persisted truth.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of the viewing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    /// Not signed in.
    Guest,
    /// Signed in without elevated rights.
    Member,
    /// Moderator with access to the admin controls.
    Admin,
}

/// Facts the renderer gates on, supplied per render call.
///
/// Sourced externally from the session and the account record; nothing here
/// is persisted by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationFacts {
    /// Role of the viewer.
    pub viewer_role: ViewerRole,
    /// Whether the subject account is locked.
    pub account_locked: bool,
    /// Whether the article has comments enabled.
    pub comments_enabled: bool,
    /// Whether the viewer owns the content being rendered.
    pub is_owner: bool,
    /// Identifier of the rendered article, carried into the comment
    /// placeholder for the external comment collaborator.
    pub post_id: String,
    /// Identifier of the content owner (the moderation subject).
    pub owner_id: String,
}

impl ModerationFacts {
    /// Facts for an anonymous reader of an unlocked article with comments on.
    pub fn reader(post_id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            viewer_role: ViewerRole::Guest,
            account_locked: false,
            comments_enabled: true,
            is_owner: false,
            post_id: post_id.into(),
            owner_id: owner_id.into(),
        }
    }

    /// Same facts with a different role.
    pub fn with_role(mut self, role: ViewerRole) -> Self {
        self.viewer_role = role;
        self
    }

    /// Same facts with the lock flag set.
    pub fn locked(mut self) -> Self {
        self.account_locked = true;
        self
    }

    /// Same facts with comments disabled.
    pub fn without_comments(mut self) -> Self {
        self.comments_enabled = false;
        self
    }

    /// Same facts viewed by the content owner.
    pub fn owned(mut self) -> Self {
        self.is_owner = true;
        self
    }
}

/// Failures of an admin moderation action.
///
/// Fatal to the requested action only; rendering is never affected and the
/// action stays retryable.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// A ban needs a non-empty justification note.
    #[error("a justification note is required to ban an account")]
    EmptyJustification,
    /// A previous request for this action has not settled yet.
    #[error("another moderation request is still in flight")]
    RequestInFlight,
    /// The external moderation collaborator failed the request.
    #[error("moderation backend error: {message}")]
    Backend {
        /// Backend-supplied failure detail.
        message: String,
    },
}

/// The external moderation mutation interface (consumed, not implemented
/// here). Both mutations are idempotent from the pipeline's viewpoint and
/// safely retryable.
pub trait ModerationBackend {
    /// Request that the subject account be locked, with a justification.
    fn request_ban(&self, subject_id: &str, note: &str) -> Result<(), ModerationError>;
    /// Request that the subject account be unlocked.
    fn request_unban(&self, subject_id: &str) -> Result<(), ModerationError>;
    /// Fetch the current facts for the subject.
    fn fetch_facts(&self, subject_id: &str) -> Result<ModerationFacts, ModerationError>;
}

/// What an admin action ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The mutation ran; these are the re-fetched facts afterwards.
    Applied(ModerationFacts),
    /// The subject was already in the requested state; nothing was sent.
    Noop,
}

/// Driver for the admin ban/unban state machine.
///
/// States are `Active` and `Locked`, read from [`ModerationFacts`]. One
/// request may be in flight at a time; the flag clears when the request
/// settles, success or failure, so the triggering control can re-enable.
#[derive(Debug)]
pub struct AdminActions<B> {
    backend: B,
    in_flight: bool,
}

impl<B: ModerationBackend> AdminActions<B> {
    /// Wrap a moderation backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: false,
        }
    }

    /// Whether a request is currently unsettled.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// `Active --ban(note)--> Locked`.
    ///
    /// Rejected with [`ModerationError::EmptyJustification`] when the trimmed
    /// note is empty. A subject that is already locked is a no-op (idempotent
    /// guard against double-ban) and sends nothing. On success the facts are
    /// re-fetched; a failed mutation leaves them untouched.
    pub fn ban(
        &mut self,
        subject_id: &str,
        note: &str,
        current: &ModerationFacts,
    ) -> Result<ActionOutcome, ModerationError> {
        if note.trim().is_empty() {
            return Err(ModerationError::EmptyJustification);
        }
        if current.account_locked {
            return Ok(ActionOutcome::Noop);
        }
        self.settle(|backend| backend.request_ban(subject_id, note), subject_id)
    }

    /// `Locked --unban--> Active`. A subject that is already active is a
    /// no-op; otherwise mirrors [`ban`](Self::ban).
    pub fn unban(
        &mut self,
        subject_id: &str,
        current: &ModerationFacts,
    ) -> Result<ActionOutcome, ModerationError> {
        if !current.account_locked {
            return Ok(ActionOutcome::Noop);
        }
        self.settle(|backend| backend.request_unban(subject_id), subject_id)
    }

    /// Run one mutation with the single-in-flight guard, re-fetching facts
    /// after it settles successfully.
    fn settle(
        &mut self,
        request: impl FnOnce(&B) -> Result<(), ModerationError>,
        subject_id: &str,
    ) -> Result<ActionOutcome, ModerationError> {
        if self.in_flight {
            return Err(ModerationError::RequestInFlight);
        }
        self.in_flight = true;
        let settled = request(&self.backend)
            .and_then(|()| self.backend.fetch_facts(subject_id));
        self.in_flight = false;
        Ok(ActionOutcome::Applied(settled?))
    }
}
