//! Conversation: second level of the graph

use crate::behavior::Behavior;
use crate::ids::{OdId, Uid};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};

/// A dialogue within a scenario, owning a set of scenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub uid: Option<Uid>,
    pub od_id: OdId,
    pub name: String,
    pub description: String,
    pub interpreter: String,
    pub behaviors: Vec<Behavior>,
    pub scenes: Vec<Scene>,
    /// Lookup-only back-reference to the owning scenario.
    pub parent_scenario: Option<Uid>,
}

impl Conversation {
    #[must_use]
    pub fn new(od_id: OdId, name: impl Into<String>) -> Self {
        Self {
            uid: None,
            od_id,
            name: name.into(),
            description: String::new(),
            interpreter: String::new(),
            behaviors: Vec::new(),
            scenes: Vec::new(),
            parent_scenario: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    #[must_use]
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    #[must_use]
    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }
}
