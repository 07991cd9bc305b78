//! Built-in entity catalog
//!
//! The entities the service ships with. `timestamped` carries the audit
//! columns every persisted entity inherits; `pot` and `user` extend it.
//! Entity files loaded from configuration are registered on top of these.

mod pot;

use std::sync::Arc;

use crate::schema::{EntityDef, EntityRegistry, FieldDef, SchemaResult};

pub use pot::PotSearch;

/// Name of the shared audit-column parent
pub const TIMESTAMPED: &str = "timestamped";
pub const POT: &str = "pot";
pub const USER: &str = "user";

/// Audit columns shared by every persisted entity
pub fn timestamped() -> EntityDef {
    EntityDef::new(
        TIMESTAMPED,
        vec![
            FieldDef::date_time("createdAt"),
            FieldDef::date_time("updatedAt"),
        ],
    )
}

/// A group-purchase pot
pub fn pot(parent: Arc<EntityDef>) -> EntityDef {
    EntityDef::new(
        POT,
        vec![
            FieldDef::long("id"),
            FieldDef::string("title"),
            FieldDef::string("description"),
            FieldDef::string("address"),
            FieldDef::double("latitude"),
            FieldDef::double("longitude"),
            FieldDef::integer("maxParticipants"),
            FieldDef::integer("currentParticipants"),
            FieldDef::date_time("dueDate"),
            FieldDef::string("imagePath"),
            FieldDef::string("originalFileName"),
            FieldDef::long("createdBy"),
        ],
    )
    .with_parent(parent)
}

/// An account
pub fn user(parent: Arc<EntityDef>) -> EntityDef {
    EntityDef::new(
        USER,
        vec![
            FieldDef::long("id"),
            FieldDef::string("userId"),
            FieldDef::string("username"),
            FieldDef::string("email"),
            FieldDef::string("uid"),
            FieldDef::string("provider"),
            FieldDef::date_time("lastLoginAt"),
            FieldDef::date_time("deletedAt"),
        ],
    )
    .with_parent(parent)
}

/// A registry holding the built-in entities
pub fn registry() -> SchemaResult<EntityRegistry> {
    let mut registry = EntityRegistry::new();
    let base = registry.register(timestamped())?;
    registry.register(pot(Arc::clone(&base)))?;
    registry.register(user(base))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    #[test]
    fn test_registry_contents() {
        let registry = registry().unwrap();
        assert_eq!(registry.names(), vec!["pot", "timestamped", "user"]);
    }

    #[test]
    fn test_pot_inherits_audit_columns() {
        let registry = registry().unwrap();
        let pot = registry.require("POT").unwrap();

        assert!(pot.declared_field("createdAt").is_none());
        let parent = pot.parent.as_deref().unwrap();
        assert_eq!(
            parent.declared_field("createdAt").map(|f| f.field_type),
            Some(FieldType::DateTime)
        );
    }

    #[test]
    fn test_user_fields() {
        let registry = registry().unwrap();
        let user = registry.require("user").unwrap();
        assert_eq!(
            user.declared_field("email").map(|f| f.field_type),
            Some(FieldType::String)
        );
        assert!(user.declared_field("title").is_none());
    }
}
