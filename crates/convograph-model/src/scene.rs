//! Scene: third level of the graph

use crate::behavior::Behavior;
use crate::ids::{OdId, Uid};
use crate::turn::Turn;
use serde::{Deserialize, Serialize};

/// A stage of a conversation, owning a set of turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub uid: Option<Uid>,
    pub od_id: OdId,
    pub name: String,
    pub description: String,
    pub interpreter: String,
    pub behaviors: Vec<Behavior>,
    pub turns: Vec<Turn>,
    /// Lookup-only back-reference to the owning conversation.
    pub parent_conversation: Option<Uid>,
}

impl Scene {
    #[must_use]
    pub fn new(od_id: OdId, name: impl Into<String>) -> Self {
        Self {
            uid: None,
            od_id,
            name: name.into(),
            description: String::new(),
            interpreter: String::new(),
            behaviors: Vec::new(),
            turns: Vec::new(),
            parent_conversation: None,
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
    pub fn turn(mut self, turn: Turn) -> Self {
        self.turns.push(turn);
        self
    }
}
