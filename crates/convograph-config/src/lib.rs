//! Convograph Component Configuration Validator
//!
//! A registry maps component identifiers (interpreter type tags) to a
//! configuration schema: the required field names and their expected
//! primitive types. Validation resolves the schema by component id and
//! collects every violation, keyed by field name, rather than stopping at
//! the first. The registry is an explicit table populated at startup; there
//! is no runtime class lookup.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use convograph_model::ValidationErrors;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

/// Field name an unknown component id is reported against
pub const COMPONENT_ID_FIELD: &str = "component_id";

/// Primitive types a configuration field can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    /// Human-readable type name used in violation messages
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Does the JSON value carry this primitive type?
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// One required field of a component configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

/// The configuration schema of one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSchema {
    component_id: &'static str,
    fields: Vec<FieldSpec>,
}

impl ComponentSchema {
    #[must_use]
    pub fn new(component_id: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self {
            component_id,
            fields,
        }
    }

    #[inline]
    #[must_use]
    pub fn component_id(&self) -> &'static str {
        self.component_id
    }

    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Check a configuration against this schema, collecting all violations
    fn check(&self, config: &Value, errors: &mut ValidationErrors) {
        for field in &self.fields {
            match config.get(field.name) {
                None => errors.push(field.name, "required field is missing"),
                Some(value) if !field.ty.matches(value) => errors.push(
                    field.name,
                    format!("expected {}, got {}", field.ty.name(), json_type_name(value)),
                ),
                Some(_) => {}
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Component id → schema table, populated at startup
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    schemas: HashMap<&'static str, ComponentSchema>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in interpreter component schemas
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ComponentSchema::new(
            "interpreter.platform.default",
            vec![
                FieldSpec {
                    name: "locale",
                    ty: FieldType::String,
                },
                FieldSpec {
                    name: "confidence_threshold",
                    ty: FieldType::Number,
                },
            ],
        ));
        registry.register(ComponentSchema::new(
            "interpreter.nlu.remote",
            vec![
                FieldSpec {
                    name: "endpoint",
                    ty: FieldType::String,
                },
                FieldSpec {
                    name: "project_id",
                    ty: FieldType::String,
                },
                FieldSpec {
                    name: "timeout_ms",
                    ty: FieldType::Number,
                },
            ],
        ));
        registry.register(ComponentSchema::new(
            "interpreter.regex",
            vec![
                FieldSpec {
                    name: "pattern",
                    ty: FieldType::String,
                },
                FieldSpec {
                    name: "case_sensitive",
                    ty: FieldType::Boolean,
                },
            ],
        ));
        registry
    }

    /// Register (or replace) a schema
    pub fn register(&mut self, schema: ComponentSchema) {
        self.schemas.insert(schema.component_id, schema);
    }

    /// Resolve a schema by component id
    #[must_use]
    pub fn get(&self, component_id: &str) -> Option<&ComponentSchema> {
        self.schemas.get(component_id)
    }

    #[must_use]
    pub fn contains(&self, component_id: &str) -> bool {
        self.schemas.contains_key(component_id)
    }

    /// Validate a configuration for a component
    ///
    /// An unknown component id is itself a validation outcome, reported
    /// against [`COMPONENT_ID_FIELD`] — never a transport failure. All
    /// field violations are collected, not just the first.
    ///
    /// # Errors
    /// The full [`ValidationErrors`] collection when anything is wrong.
    pub fn validate(&self, component_id: &str, config: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match self.get(component_id) {
            None => {
                errors.push(
                    COMPONENT_ID_FIELD,
                    format!("unknown component id '{component_id}'"),
                );
            }
            Some(schema) => schema.check(config, &mut errors),
        }
        errors.into_result()
    }
}

/// The process-wide default registry
#[must_use]
pub fn default_registry() -> &'static ComponentRegistry {
    static REGISTRY: Lazy<ComponentRegistry> = Lazy::new(ComponentRegistry::with_defaults);
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unknown_component_id_is_a_validation_error_on_the_id_field() {
        let registry = ComponentRegistry::with_defaults();
        let errors = registry.validate("unknown", &json!({})).unwrap_err();
        assert!(errors.get(COMPONENT_ID_FIELD).is_some());
    }

    #[test]
    fn valid_config_passes() {
        let registry = ComponentRegistry::with_defaults();
        let config = json!({"pattern": "^hi$", "case_sensitive": false});
        assert_eq!(registry.validate("interpreter.regex", &config), Ok(()));
    }

    #[test]
    fn all_violations_are_collected_keyed_by_field() {
        let registry = ComponentRegistry::with_defaults();
        let config = json!({"endpoint": 7});
        let errors = registry
            .validate("interpreter.nlu.remote", &config)
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.get("endpoint").unwrap(),
            &["expected string, got number".to_string()]
        );
        assert!(errors.get("project_id").is_some());
        assert!(errors.get("timeout_ms").is_some());
    }

    #[test]
    fn default_registry_knows_the_platform_interpreter() {
        assert!(default_registry().contains(convograph_model::PLATFORM_DEFAULT_INTERPRETER));
    }
}
