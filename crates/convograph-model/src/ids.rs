//! Identifier newtypes
//!
//! Every persisted entity carries two identifiers: a store-assigned [`Uid`]
//! (globally unique, assigned at persistence time) and a human-authored
//! [`OdId`] slug (unique within the entity's scope).

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned globally unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(Uuid);

impl Uid {
    /// Generate a fresh uid. Only the store assigns uids; callers outside a
    /// store implementation should never need this.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Uid {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ModelError::MalformedUid(s.to_string()))
    }
}

/// Human-authored slug, unique within its scope
///
/// Construction rejects empty strings; anything else is the author's choice
/// and validated upstream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OdId(String);

impl OdId {
    /// Create a new odId
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyOdId`] if the slug is empty.
    pub fn new(slug: impl Into<String>) -> Result<Self, ModelError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(ModelError::EmptyOdId);
        }
        Ok(Self(slug))
    }

    /// Slug as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OdId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OdId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_round_trips_through_display() {
        let uid = Uid::generate();
        let parsed: Uid = uid.to_string().parse().unwrap();
        assert_eq!(uid, parsed);
    }

    #[test]
    fn malformed_uid_is_rejected() {
        assert!(matches!(
            "not-a-uuid".parse::<Uid>(),
            Err(ModelError::MalformedUid(_))
        ));
    }

    #[test]
    fn empty_od_id_is_rejected() {
        assert_eq!(OdId::new(""), Err(ModelError::EmptyOdId));
    }
}
