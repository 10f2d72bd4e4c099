//! Field-keyed multi-error collection
//!
//! Shared by the component configuration validator and by speaker/direction
//! coherence checks in the store: every violation is recorded, keyed by the
//! offending field, before the result is reported.

use indexmap::IndexMap;
use serde::Serialize;

/// Accumulated field-level violations, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    violations: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a field
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Violations recorded for a field, if any
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.violations.get(field).map(Vec::as_slice)
    }

    /// Iterate over (field, messages) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.violations
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Total number of recorded violations
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.values().map(Vec::len).sum()
    }

    /// `Ok(())` when empty, `Err(self)` otherwise
    ///
    /// # Errors
    /// Returns the collection itself when any violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in self.violations.iter() {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_multiple_violations_per_field() {
        let mut errors = ValidationErrors::new();
        errors.push("speaker", "expected USER");
        errors.push("speaker", "must not be empty");
        errors.push("confidence", "out of range");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("speaker").unwrap().len(), 2);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn empty_collection_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
