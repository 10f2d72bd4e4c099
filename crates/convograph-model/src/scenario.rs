//! Scenario: the top-level conversational context

use crate::behavior::Behavior;
use crate::condition::Condition;
use crate::conversation::Conversation;
use crate::ids::{OdId, Uid};
use crate::PLATFORM_DEFAULT_INTERPRETER;
use serde::{Deserialize, Serialize};

/// Top-level named conversational context owning a set of conversations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub uid: Option<Uid>,
    pub od_id: OdId,
    pub name: String,
    pub interpreter: String,
    pub conditions: Vec<Condition>,
    pub behaviors: Vec<Behavior>,
    pub conversations: Vec<Conversation>,
}

impl Scenario {
    /// Create a scenario. An unset interpreter falls back to the platform
    /// default at creation time.
    #[must_use]
    pub fn new(od_id: OdId, name: impl Into<String>, interpreter: Option<String>) -> Self {
        Self {
            uid: None,
            od_id,
            name: name.into(),
            interpreter: interpreter
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| PLATFORM_DEFAULT_INTERPRETER.to_string()),
            conditions: Vec::new(),
            behaviors: Vec::new(),
            conversations: Vec::new(),
        }
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    #[must_use]
    pub fn conversation(mut self, conversation: Conversation) -> Self {
        self.conversations.push(conversation);
        self
    }

    /// True if a condition with the same operator and attribute is already
    /// attached.
    #[must_use]
    pub fn has_condition_on(&self, attribute: &str) -> bool {
        self.conditions.iter().any(|c| c.attribute == attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_interpreter_falls_back_to_platform_default() {
        let scenario = Scenario::new(OdId::new("support").unwrap(), "Support", None);
        assert_eq!(scenario.interpreter, PLATFORM_DEFAULT_INTERPRETER);
    }

    #[test]
    fn explicit_interpreter_is_kept() {
        let scenario = Scenario::new(
            OdId::new("support").unwrap(),
            "Support",
            Some("interpreter.nlu.remote".to_string()),
        );
        assert_eq!(scenario.interpreter, "interpreter.nlu.remote");
    }
}
