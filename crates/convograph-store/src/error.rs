//! Store error taxonomy
//!
//! Business errors (NotFound, Conflict, Validation) are distinct from
//! transport failures, and a multi-step write that dies halfway is reported
//! as [`StoreError::PartialWrite`] so callers can detect and resume it
//! rather than discover a half-committed graph later.

use convograph_model::{Uid, ValidationErrors};
use std::time::Duration;

/// The entity kinds a store operation can miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Scenario,
    Conversation,
    Scene,
    Turn,
    Intent,
    MessageTemplate,
    /// The Turn↔Intent association itself
    TurnIntentRelation,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scenario => "scenario",
            Self::Conversation => "conversation",
            Self::Scene => "scene",
            Self::Turn => "turn",
            Self::Intent => "intent",
            Self::MessageTemplate => "message template",
            Self::TurnIntentRelation => "turn-intent relation",
        };
        f.write_str(name)
    }
}

/// Failures at the transport boundary, independent of business logic
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The store did not answer within the imposed deadline
    #[error("store call exceeded {timeout:?}")]
    Timeout { timeout: Duration },

    /// The caller cancelled the in-flight operation
    #[error("store call cancelled")]
    Cancelled,

    /// The store could not be reached
    #[error("store unreachable: {0}")]
    Unreachable(String),

    /// The store rejected the write outright
    #[error("write rejected by store: {0}")]
    Rejected(String),
}

/// Errors surfaced by every data client operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entity of the given kind under that id
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Uniqueness violated, or an operation ordering constraint broken
    #[error("conflict: {0}")]
    Conflict(String),

    /// Field-level violations, all of them collected
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Store unreachable, call timed out, or write rejected
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A multi-step sequence failed after some steps committed
    #[error("partial write: {completed} committed, then {failed_step} failed: {source}")]
    PartialWrite {
        /// What did commit, for the caller's resume logic
        completed: String,
        /// Root uid of the committed portion
        committed_root: Uid,
        /// The step that failed
        failed_step: String,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// NotFound shorthand
    #[must_use]
    pub fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// True for [`StoreError::NotFound`]
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for [`StoreError::PartialWrite`]
    #[inline]
    #[must_use]
    pub fn is_partial_write(&self) -> bool {
        matches!(self, Self::PartialWrite { .. })
    }
}
