//! Intents and their two classifications
//!
//! An intent carries a [`Speaker`] (who utters it) and sits on one side of a
//! turn under a [`Direction`] (where in the turn it was stored). The two are
//! set independently by the API layer; the relation manager in the engine
//! crate is the single place reconciling them.

use crate::behavior::Behavior;
use crate::condition::Condition;
use crate::error::ModelError;
use crate::ids::{OdId, Uid};
use crate::template::MessageTemplate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Who utters an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Speaker {
    User,
    App,
}

impl Speaker {
    /// Wire form of the tag
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::App => "APP",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Speaker {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "APP" => Ok(Self::App),
            other => Err(ModelError::InvalidSpeaker(other.to_string())),
        }
    }
}

/// Which side of a turn an intent is stored on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Request,
    Response,
}

impl Direction {
    /// Wire form of the tag
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "REQUEST",
            Self::Response => "RESPONSE",
        }
    }

    /// The speaker this direction is coherent with: USER utters requests,
    /// APP utters responses.
    #[inline]
    #[must_use]
    pub fn coherent_speaker(&self) -> Speaker {
        match self {
            Self::Request => Speaker::User,
            Self::Response => Speaker::App,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUEST" => Ok(Self::Request),
            "RESPONSE" => Ok(Self::Response),
            other => Err(ModelError::InvalidDirection(other.to_string())),
        }
    }
}

/// A recognized or emitted utterance purpose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub uid: Option<Uid>,
    pub od_id: OdId,
    pub name: String,
    pub speaker: Speaker,
    pub is_request_intent: bool,
    pub sample_utterance: String,
    pub interpreter: String,
    pub confidence: f64,
    pub behaviors: Vec<Behavior>,
    pub conditions: Vec<Condition>,
    pub message_templates: Vec<MessageTemplate>,
    /// Lookup-only back-reference to the owning turn. Carries no ownership.
    pub parent_turn: Option<Uid>,
}

impl Intent {
    /// Create an intent from an already-validated speaker
    #[must_use]
    pub fn new(od_id: OdId, name: impl Into<String>, speaker: Speaker) -> Self {
        Self {
            uid: None,
            od_id,
            name: name.into(),
            speaker,
            is_request_intent: speaker == Speaker::User,
            sample_utterance: String::new(),
            interpreter: String::new(),
            confidence: 1.0,
            behaviors: Vec::new(),
            conditions: Vec::new(),
            message_templates: Vec::new(),
            parent_turn: None,
        }
    }

    /// Create an intent from a raw speaker tag, refusing anything outside
    /// USER/APP.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidSpeaker`] for an unknown tag.
    pub fn with_speaker_tag(
        od_id: OdId,
        name: impl Into<String>,
        speaker: &str,
    ) -> Result<Self, ModelError> {
        Ok(Self::new(od_id, name, speaker.parse()?))
    }

    #[must_use]
    pub fn sample_utterance(mut self, utterance: impl Into<String>) -> Self {
        self.sample_utterance = utterance.into();
        self
    }

    #[must_use]
    pub fn interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    #[must_use]
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    #[must_use]
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn template(mut self, template: MessageTemplate) -> Self {
        self.message_templates.push(template);
        self
    }

    #[must_use]
    pub fn request_intent(mut self, is_request: bool) -> Self {
        self.is_request_intent = is_request;
        self
    }
}
