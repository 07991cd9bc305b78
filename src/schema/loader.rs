//! Entity registry
//!
//! Holds every entity the compiler can be pointed at. Entities are registered
//! programmatically (the built-in catalog) or loaded from a directory of JSON
//! files, one entity per file:
//!
//! ```json
//! { "name": "bakery", "parent": "timestamped",
//!   "fields": [{ "name": "title", "type": "string" }] }
//! ```
//!
//! Parents are linked by name after every file in the directory is read, so
//! file order does not matter. Names are matched case-insensitively.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::errors::{SchemaError, SchemaResult};
use super::types::{EntityDef, EntityFile};

/// Registry of queryable entities
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    /// Entities indexed by lowercased name
    entities: HashMap<String, Arc<EntityDef>>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity definition.
    pub fn register(&mut self, entity: EntityDef) -> SchemaResult<Arc<EntityDef>> {
        entity
            .validate_structure()
            .map_err(|e| SchemaError::malformed_entity("<in-memory>", e))?;

        let key = entity.name.to_lowercase();
        if self.entities.contains_key(&key) {
            return Err(SchemaError::duplicate_entity(&entity.name));
        }

        let entity = Arc::new(entity);
        self.entities.insert(key, Arc::clone(&entity));
        Ok(entity)
    }

    /// Loads every `*.json` entity file in `dir`.
    ///
    /// Returns the number of entities added. A missing directory is an error:
    /// the caller asked for it explicitly.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_entity(
                dir.display().to_string(),
                format!("Failed to read entity directory: {}", e),
            )
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_entity(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut pending = Vec::with_capacity(paths.len());
        for path in &paths {
            pending.push(Self::read_entity_file(path)?);
        }

        self.link_pending(pending)
    }

    fn read_entity_file(path: &Path) -> SchemaResult<EntityFile> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_entity(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_entity(path.display().to_string(), format!("Invalid JSON: {}", e))
        })
    }

    /// Registers files whose parent is already known, repeating until no
    /// progress is made.
    fn link_pending(&mut self, mut pending: Vec<EntityFile>) -> SchemaResult<usize> {
        let mut added = 0;

        while !pending.is_empty() {
            let before = pending.len();
            let mut waiting = Vec::new();

            for file in pending {
                let parent = match file.parent.as_deref().map(|name| self.get(name)) {
                    None => None,
                    Some(Some(parent)) => Some(parent),
                    Some(None) => {
                        waiting.push(file);
                        continue;
                    }
                };

                let mut entity = EntityDef::new(file.name, file.fields);
                entity.parent = parent;
                self.register(entity)?;
                added += 1;
            }

            if waiting.len() == before {
                let file = &waiting[0];
                return Err(SchemaError::unknown_parent(
                    &file.name,
                    file.parent.as_deref().unwrap_or_default(),
                ));
            }
            pending = waiting;
        }

        Ok(added)
    }

    /// Gets an entity by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Arc<EntityDef>> {
        self.entities.get(&name.to_lowercase()).cloned()
    }

    /// Gets an entity by name or fails with `BBD_UNKNOWN_ENTITY`.
    pub fn require(&self, name: &str) -> SchemaResult<Arc<EntityDef>> {
        self.get(name).ok_or_else(|| SchemaError::unknown_entity(name))
    }

    /// Returns registered entity names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.values().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
