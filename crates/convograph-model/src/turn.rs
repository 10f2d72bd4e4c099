//! Turn: a single exchange, holding request and response intents

use crate::behavior::Behavior;
use crate::ids::{OdId, Uid};
use crate::intent::Intent;
use serde::{Deserialize, Serialize};

/// A single exchange within a scene
///
/// The request and response sequences are ordered and disjoint: an intent is
/// stored on exactly one side, and which side is its direction
/// classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub uid: Option<Uid>,
    pub od_id: OdId,
    pub name: String,
    pub description: String,
    pub interpreter: String,
    pub behaviors: Vec<Behavior>,
    pub request_intents: Vec<Intent>,
    pub response_intents: Vec<Intent>,
    /// Lookup-only back-reference to the owning scene.
    pub parent_scene: Option<Uid>,
}

impl Turn {
    #[must_use]
    pub fn new(od_id: OdId, name: impl Into<String>) -> Self {
        Self {
            uid: None,
            od_id,
            name: name.into(),
            description: String::new(),
            interpreter: String::new(),
            behaviors: Vec::new(),
            request_intents: Vec::new(),
            response_intents: Vec::new(),
            parent_scene: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    #[must_use]
    pub fn request_intent(mut self, intent: Intent) -> Self {
        self.request_intents.push(intent);
        self
    }

    #[must_use]
    pub fn response_intent(mut self, intent: Intent) -> Self {
        self.response_intents.push(intent);
        self
    }

    /// Which side of this turn holds the intent with the given uid, if any
    #[must_use]
    pub fn side_of(&self, intent_uid: &Uid) -> Option<crate::intent::Direction> {
        if self
            .request_intents
            .iter()
            .any(|i| i.uid.as_ref() == Some(intent_uid))
        {
            Some(crate::intent::Direction::Request)
        } else if self
            .response_intents
            .iter()
            .any(|i| i.uid.as_ref() == Some(intent_uid))
        {
            Some(crate::intent::Direction::Response)
        } else {
            None
        }
    }
}
