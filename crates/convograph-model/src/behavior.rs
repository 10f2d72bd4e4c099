//! Behavior tags
//!
//! A [`Behavior`] marks a node's structural role in the graph. STARTING marks
//! a valid entry point for a conversation or turn; COMPLETING marks an Intent
//! as terminating the exchange.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Known structural role tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorTag {
    Starting,
    Completing,
}

impl BehaviorTag {
    /// Wire form of the tag
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "STARTING",
            Self::Completing => "COMPLETING",
        }
    }
}

impl std::fmt::Display for BehaviorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BehaviorTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STARTING" => Ok(Self::Starting),
            "COMPLETING" => Ok(Self::Completing),
            other => Err(ModelError::InvalidBehavior(other.to_string())),
        }
    }
}

/// A behavior attached to a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    pub tag: BehaviorTag,
}

impl Behavior {
    #[inline]
    #[must_use]
    pub fn new(tag: BehaviorTag) -> Self {
        Self { tag }
    }

    /// Shorthand for the STARTING tag
    #[inline]
    #[must_use]
    pub fn starting() -> Self {
        Self::new(BehaviorTag::Starting)
    }

    /// Shorthand for the COMPLETING tag
    #[inline]
    #[must_use]
    pub fn completing() -> Self {
        Self::new(BehaviorTag::Completing)
    }
}
