//! Field path resolution and value coercion
//!
//! `PathResolver` maps a field name onto an entity's declared fields (own
//! fields first, then the immediate parent's) and converts raw request strings
//! into the field's native type.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::dates;
use super::errors::{SearchError, SearchResult};
use crate::schema::{EntityDef, FieldType};

/// The entity a search targets, with the alias its paths are rooted at
#[derive(Debug, Clone)]
pub struct EntityPath {
    entity: Arc<EntityDef>,
    alias: String,
}

impl EntityPath {
    /// Root the entity at its own name
    pub fn new(entity: Arc<EntityDef>) -> Self {
        let alias = entity.name.clone();
        Self { entity, alias }
    }

    /// Root the entity at an explicit alias
    pub fn with_alias(entity: Arc<EntityDef>, alias: impl Into<String>) -> Self {
        Self {
            entity,
            alias: alias.into(),
        }
    }

    pub fn entity(&self) -> &EntityDef {
        &self.entity
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// True when a routing target names this entity or its alias
    pub fn matches_target(&self, target: &str) -> bool {
        target.eq_ignore_ascii_case(&self.entity.name) || target.eq_ignore_ascii_case(&self.alias)
    }

    /// `alias.field`
    pub fn qualify(&self, field: &str) -> String {
        format!("{}.{}", self.alias, field)
    }
}

/// A resolved field: declared name, declared type and optional path prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    prefix: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            prefix: None,
        }
    }

    /// Root the field at an entity alias or a joined path
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// `prefix.name`, or just `name` when there is no (non-blank) prefix
    pub fn path_name(&self) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.trim().is_empty() => format!("{}.{}", prefix, self.name),
            _ => self.name.clone(),
        }
    }
}

/// A raw string converted to a field's native type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    String(String),
    Long(i64),
    Integer(i32),
    Double(f64),
    Float(f32),
    Boolean(bool),
    Date(NaiveDate),
    #[serde(rename = "datetime")]
    DateTime(NaiveDateTime),
}

impl TypedValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            TypedValue::String(_) => FieldType::String,
            TypedValue::Long(_) => FieldType::Long,
            TypedValue::Integer(_) => FieldType::Integer,
            TypedValue::Double(_) => FieldType::Double,
            TypedValue::Float(_) => FieldType::Float,
            TypedValue::Boolean(_) => FieldType::Boolean,
            TypedValue::Date(_) => FieldType::Date,
            TypedValue::DateTime(_) => FieldType::DateTime,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => write!(f, "{}", s),
            TypedValue::Long(n) => write!(f, "{}", n),
            TypedValue::Integer(n) => write!(f, "{}", n),
            TypedValue::Double(n) => write!(f, "{}", n),
            TypedValue::Float(n) => write!(f, "{}", n),
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            TypedValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// Resolves field names and coerces raw values
pub struct PathResolver;

impl PathResolver {
    /// Finds `field_name` (case-insensitive) among the entity's own fields,
    /// then among its immediate parent's own fields. Grandparents are not
    /// consulted.
    pub fn resolve(path: &EntityPath, field_name: &str) -> SearchResult<FieldDescriptor> {
        let entity = path.entity();

        let found = entity.declared_field(field_name).or_else(|| {
            entity
                .parent
                .as_deref()
                .and_then(|parent| parent.declared_field(field_name))
        });

        found
            .map(|field| FieldDescriptor::new(&field.name, field.field_type))
            .ok_or_else(|| SearchError::field_not_found(path.name(), field_name))
    }

    /// Converts `raw` into the descriptor's declared type.
    ///
    /// Dates go through the pattern cascade; everything else is a strict
    /// parse (no trimming). Strings pass through unchanged.
    pub fn coerce(descriptor: &FieldDescriptor, raw: &str) -> SearchResult<TypedValue> {
        let target = descriptor.field_type();
        let mismatch = || SearchError::type_coercion(raw, target.type_name());

        let value = match target {
            FieldType::String => TypedValue::String(raw.to_string()),
            FieldType::Long => TypedValue::Long(raw.parse().map_err(|_| mismatch())?),
            FieldType::Integer => TypedValue::Integer(raw.parse().map_err(|_| mismatch())?),
            FieldType::Double => TypedValue::Double(raw.parse().map_err(|_| mismatch())?),
            FieldType::Float => TypedValue::Float(raw.parse().map_err(|_| mismatch())?),
            FieldType::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    TypedValue::Boolean(true)
                } else if raw.eq_ignore_ascii_case("false") {
                    TypedValue::Boolean(false)
                } else {
                    return Err(mismatch());
                }
            }
            FieldType::Date => TypedValue::Date(dates::coerce_date(raw)?),
            FieldType::DateTime => TypedValue::DateTime(dates::coerce_date_time(raw)?),
        };

        Ok(value)
    }
}

/// Resolve then coerce in one step.
///
/// Unlike the compiler, this surfaces `FieldNotFound`: the caller named the
/// field explicitly.
pub fn coerce(path: &EntityPath, field_name: &str, raw: &str) -> SearchResult<TypedValue> {
    let descriptor = PathResolver::resolve(path, field_name)?;
    PathResolver::coerce(&descriptor, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;

    fn pot_path() -> EntityPath {
        let base = Arc::new(EntityDef::new(
            "base",
            vec![FieldDef::string("deletedBy")],
        ));
        let timestamped = Arc::new(
            EntityDef::new("timestamped", vec![FieldDef::date_time("createdAt")])
                .with_parent(base),
        );
        let pot = EntityDef::new(
            "pot",
            vec![
                FieldDef::long("id"),
                FieldDef::string("title"),
                FieldDef::double("latitude"),
                FieldDef::integer("maxParticipants"),
                FieldDef::boolean("closed"),
                FieldDef::date("openedOn"),
                FieldDef::date_time("dueDate"),
            ],
        )
        .with_parent(timestamped);
        EntityPath::new(Arc::new(pot))
    }

    #[test]
    fn test_resolve_own_field_case_insensitive() {
        let descriptor = PathResolver::resolve(&pot_path(), "TITLE").unwrap();
        assert_eq!(descriptor.name(), "title");
        assert_eq!(descriptor.field_type(), FieldType::String);
    }

    #[test]
    fn test_resolve_parent_field() {
        let descriptor = PathResolver::resolve(&pot_path(), "createdat").unwrap();
        assert_eq!(descriptor.name(), "createdAt");
        assert_eq!(descriptor.field_type(), FieldType::DateTime);
    }

    #[test]
    fn test_resolve_stops_at_parent() {
        let err = PathResolver::resolve(&pot_path(), "deletedBy").unwrap_err();
        assert_eq!(err, SearchError::field_not_found("pot", "deletedBy"));
    }

    #[test]
    fn test_path_name() {
        let descriptor = FieldDescriptor::new("title", FieldType::String);
        assert_eq!(descriptor.path_name(), "title");
        assert_eq!(descriptor.clone().with_prefix("pot").path_name(), "pot.title");
        assert_eq!(descriptor.with_prefix("").path_name(), "title");
    }

    #[test]
    fn test_alias_and_target() {
        let pot = pot_path();
        assert_eq!(pot.qualify("title"), "pot.title");
        assert!(pot.matches_target("POT"));

        let aliased = EntityPath::with_alias(Arc::new(pot.entity().clone()), "p");
        assert_eq!(aliased.qualify("title"), "p.title");
        assert!(aliased.matches_target("p"));
        assert!(aliased.matches_target("pot"));
        assert!(!aliased.matches_target("user"));
    }

    #[test]
    fn test_coerce_numbers() {
        let pot = pot_path();
        assert_eq!(coerce(&pot, "id", "42").unwrap(), TypedValue::Long(42));
        assert_eq!(
            coerce(&pot, "maxParticipants", "4").unwrap(),
            TypedValue::Integer(4)
        );
        assert_eq!(
            coerce(&pot, "latitude", "37.5").unwrap(),
            TypedValue::Double(37.5)
        );
    }

    #[test]
    fn test_coerce_rejects_bad_number() {
        let err = coerce(&pot_path(), "id", "forty-two").unwrap_err();
        assert_eq!(err, SearchError::type_coercion("forty-two", "long"));
        assert!(coerce(&pot_path(), "id", " 42").is_err());
    }

    #[test]
    fn test_coerce_boolean() {
        let pot = pot_path();
        assert_eq!(coerce(&pot, "closed", "TRUE").unwrap(), TypedValue::Boolean(true));
        assert_eq!(coerce(&pot, "closed", "false").unwrap(), TypedValue::Boolean(false));
        assert!(coerce(&pot, "closed", "yes").unwrap_err().is_coercion());
    }

    #[test]
    fn test_coerce_dates() {
        let pot = pot_path();
        assert_eq!(
            coerce(&pot, "openedOn", "20240115").unwrap(),
            TypedValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );

        let due = coerce(&pot, "dueDate", "2024-01-15 14:30:45").unwrap();
        assert_eq!(due.to_string(), "2024-01-15T14:30:45");

        assert_eq!(
            coerce(&pot, "dueDate", "2024-13-40").unwrap_err(),
            SearchError::date_format("2024-13-40")
        );
    }

    #[test]
    fn test_coerce_unknown_field_surfaces() {
        let err = coerce(&pot_path(), "nickname", "x").unwrap_err();
        assert!(matches!(err, SearchError::FieldNotFound { .. }));
    }

    #[test]
    fn test_typed_value_serialization() {
        let json = serde_json::to_value(TypedValue::Long(7)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "long", "value": 7}));
    }
}
