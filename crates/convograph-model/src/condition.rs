//! Structural predicates
//!
//! A [`Condition`] is operator + attribute reference + value. This layer only
//! checks structural validity (all three parts present); evaluation happens
//! in the runtime dialogue engine.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Condition operators understood by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperator {
    #[serde(rename = "eq")]
    Equals,
    #[serde(rename = "neq")]
    NotEquals,
    #[serde(rename = "contains")]
    Contains,
}

impl ConditionOperator {
    /// Wire form of the operator
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::NotEquals => "neq",
            Self::Contains => "contains",
        }
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionOperator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Equals),
            "neq" => Ok(Self::NotEquals),
            "contains" => Ok(Self::Contains),
            other => Err(ModelError::InvalidOperator(other.to_string())),
        }
    }
}

/// A structural predicate attached to a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: ConditionOperator,
    /// Attribute path the left operand refers to, e.g. `user.selected_scenario`
    pub attribute: String,
    /// Right operand
    pub value: String,
}

impl Condition {
    #[inline]
    #[must_use]
    pub fn new(
        operator: ConditionOperator,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            operator,
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Equality predicate shorthand
    #[inline]
    #[must_use]
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ConditionOperator::Equals, attribute, value)
    }

    /// Structural validity: operator plus both operands present
    ///
    /// # Errors
    /// Returns [`ModelError::IncompleteCondition`] naming the missing part.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.attribute.is_empty() {
            return Err(ModelError::IncompleteCondition("attribute"));
        }
        if self.value.is_empty() {
            return Err(ModelError::IncompleteCondition("value"));
        }
        Ok(())
    }
}
