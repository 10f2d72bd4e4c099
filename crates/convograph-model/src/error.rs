//! Error types for the entity model

/// Errors raised while constructing model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Speaker tag outside USER/APP
    #[error("invalid speaker tag: '{0}' (expected USER or APP)")]
    InvalidSpeaker(String),

    /// Direction tag outside REQUEST/RESPONSE
    #[error("invalid direction tag: '{0}' (expected REQUEST or RESPONSE)")]
    InvalidDirection(String),

    /// Behavior tag outside the known set
    #[error("invalid behavior tag: '{0}'")]
    InvalidBehavior(String),

    /// Condition operator outside the known set
    #[error("invalid condition operator: '{0}'")]
    InvalidOperator(String),

    /// odId slug was empty
    #[error("odId must not be empty")]
    EmptyOdId,

    /// Uid string did not parse
    #[error("malformed uid: '{0}'")]
    MalformedUid(String),

    /// Condition is structurally incomplete
    #[error("condition is missing {0}")]
    IncompleteCondition(&'static str),
}
