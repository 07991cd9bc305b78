//! Entity schema subsystem
//!
//! Static description of the entities a search can target: each entity's
//! declared fields with their types, plus at most one parent whose own
//! fields are also searchable. This replaces runtime reflection over
//! entity classes.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use loader::EntityRegistry;
pub use types::{EntityDef, EntityFile, FieldDef, FieldType};
