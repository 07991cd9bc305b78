//! Entity type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - long / integer: 64-bit / 32-bit signed integer
//! - double / float: 64-bit / 32-bit floating point
//! - boolean
//! - date / datetime: calendar date, naive local date-time
//!
//! An entity may name one parent. Field lookup consults the entity's own
//! fields and then the parent's own fields, never further up.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Declared type of an entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Long,
    Integer,
    Double,
    Float,
    Boolean,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Long => "long",
            FieldType::Integer => "integer",
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
        }
    }
}

/// A single declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared field name (case preserved)
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn long(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Long)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Double)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    pub fn date_time(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::DateTime)
    }
}

/// Queryable description of one entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDef {
    /// Entity name, also the default path alias
    pub name: String,
    /// Fields declared directly on this entity, in declaration order
    pub fields: Vec<FieldDef>,
    /// Immediate parent, if any
    pub parent: Option<Arc<EntityDef>>,
}

impl EntityDef {
    /// Create an entity with no parent
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
            parent: None,
        }
    }

    /// Attach an immediate parent
    pub fn with_parent(mut self, parent: Arc<EntityDef>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Case-insensitive lookup among this entity's own declared fields
    pub fn declared_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Validates the definition itself
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Entity name must not be blank".into());
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(format!("Field #{} has a blank name", i));
            }
            let clash = self.fields[..i]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&field.name));
            if clash {
                return Err(format!("Field '{}' is declared twice", field.name));
            }
        }

        Ok(())
    }
}

/// On-disk form of an entity definition; the parent is linked by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub fields: Vec<FieldDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamped() -> Arc<EntityDef> {
        Arc::new(EntityDef::new(
            "timestamped",
            vec![FieldDef::date_time("createdAt")],
        ))
    }

    #[test]
    fn test_declared_field_ignores_case() {
        let entity = EntityDef::new("pot", vec![FieldDef::string("title")]);
        assert_eq!(entity.declared_field("TITLE").unwrap().name, "title");
        assert!(entity.declared_field("address").is_none());
    }

    #[test]
    fn test_declared_field_excludes_parent() {
        let entity = EntityDef::new("pot", vec![FieldDef::string("title")])
            .with_parent(timestamped());
        assert!(entity.declared_field("createdAt").is_none());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let entity = EntityDef::new(
            "pot",
            vec![FieldDef::string("title"), FieldDef::string("Title")],
        );
        let err = entity.validate_structure().unwrap_err();
        assert!(err.contains("declared twice"));
    }

    #[test]
    fn test_field_type_serde_names() {
        let field: FieldDef =
            serde_json::from_str(r#"{"name": "dueDate", "type": "datetime"}"#).unwrap();
        assert_eq!(field.field_type, FieldType::DateTime);

        let json = serde_json::to_string(&FieldDef::long("id")).unwrap();
        assert!(json.contains("\"long\""));
    }
}
