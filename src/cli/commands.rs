//! CLI command implementations
//!
//! Every command follows the same sequence: load and validate the config,
//! apply the log threshold, build the entity registry, then do one unit of
//! work and exit. Request errors (bad criteria, unknown entity, values that
//! do not coerce) are written to stdout as error responses; configuration
//! and registry errors abort the process.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::{EntityDef, EntityRegistry};
use crate::search::{self, compile_predicate, parse_sort_spec, DynamicCriteria, EntityPath};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of additional entity definitions (optional)
    #[serde(default)]
    pub entity_dir: Option<String>,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Sort used when a request carries none (optional, default "-dueDate")
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_sort() -> String {
    "-dueDate".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entity_dir: None,
            log_level: default_log_level(),
            default_sort: default_sort(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        self.min_severity()?;

        if let Some(dir) = &self.entity_dir {
            if dir.trim().is_empty() {
                return Err(CliError::config_error("entity_dir must not be blank"));
            }
        }

        Ok(())
    }

    /// The configured log threshold
    pub fn min_severity(&self) -> CliResult<Severity> {
        match Severity::parse(&self.log_level) {
            Some(Severity::Fatal) | None => Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected one of trace, info, warn, error.",
                self.log_level
            ))),
            Some(severity) => Ok(severity),
        }
    }

    /// Get entity directory as Path
    pub fn entity_path(&self) -> Option<&Path> {
        self.entity_dir.as_deref().map(Path::new)
    }
}

/// Built-in catalog plus the configured entity directory
pub fn build_registry(config: &Config) -> CliResult<EntityRegistry> {
    let mut registry = catalog::registry()?;

    if let Some(dir) = config.entity_path() {
        let added = registry.load_dir(dir)?;
        let added = added.to_string();
        let dir = dir.display().to_string();
        log_event_with_fields(
            Event::EntitiesLoaded,
            &[("count", added.as_str()), ("dir", dir.as_str())],
        );
    }

    Ok(registry)
}

/// Load config, apply the log threshold and build the registry
fn boot(config_path: &Path) -> CliResult<(Config, EntityRegistry)> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.min_severity()?);

    let path = config_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("log_level", config.log_level.as_str()), ("path", path.as_str())],
    );

    let registry = build_registry(&config)?;
    Ok((config, registry))
}

/// One `compile` request
#[derive(Debug, Clone, Deserialize)]
pub struct CompileRequest {
    pub entity: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub criteria: Value,
    #[serde(default)]
    pub routing: Option<Value>,
    #[serde(default)]
    pub sort: Option<String>,
}

fn entity_path(
    registry: &EntityRegistry,
    entity: &str,
    alias: Option<&str>,
) -> CliResult<EntityPath> {
    let def = registry
        .require(entity)
        .map_err(|e| CliError::bad_request(e.message()))?;

    Ok(match alias {
        Some(alias) if !alias.trim().is_empty() => EntityPath::with_alias(def, alias),
        _ => EntityPath::new(def),
    })
}

/// Compile one request into its predicate and sort directives
pub fn compile_request(
    registry: &EntityRegistry,
    config: &Config,
    request: Value,
) -> CliResult<Value> {
    let request: CompileRequest = serde_json::from_value(request)
        .map_err(|e| CliError::bad_request(format!("Invalid compile request: {}", e)))?;

    let path = entity_path(registry, &request.entity, request.alias.as_deref())?;
    let criteria = DynamicCriteria::from_json(&request.criteria, request.routing.as_ref())?;
    let predicate = compile_predicate(&path, &criteria)?;

    let descriptor = request.sort.as_deref().unwrap_or(&config.default_sort);
    let sort: Vec<Value> = parse_sort_spec(descriptor, &path)
        .iter()
        .map(|directive| {
            json!({
                "path": directive.qualified(&path),
                "field": directive.field,
                "direction": directive.direction(),
            })
        })
        .collect();

    Ok(json!({
        "entity": path.name(),
        "alias": path.alias(),
        "predicate": serde_json::to_value(&predicate)?,
        "explain": predicate.to_string(),
        "sort": sort,
    }))
}

/// Coerce one raw value to the type of `entity.field`
pub fn coerce_value(
    registry: &EntityRegistry,
    entity: &str,
    field: &str,
    value: &str,
) -> CliResult<Value> {
    let path = entity_path(registry, entity, None)?;
    let typed = search::coerce(&path, field, value)?;

    Ok(json!({
        "path": path.qualify(field),
        "value": serde_json::to_value(&typed)?,
    }))
}

fn describe(entity: &EntityDef) -> Value {
    json!({
        "name": entity.name,
        "parent": entity.parent.as_ref().map(|p| p.name.as_str()),
        "fields": entity.fields,
    })
}

/// Describe every registered entity, sorted by name
pub fn list_entities(registry: &EntityRegistry) -> Value {
    let entities: Vec<Value> = registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|entity| describe(&entity))
        .collect();
    Value::Array(entities)
}

/// Write the outcome of a request; only non-request failures propagate
fn respond(result: CliResult<Value>) -> CliResult<()> {
    match result {
        Ok(data) => write_response(data),
        Err(e) if e.is_request_error() => {
            log_event_with_fields(
                Event::RequestRejected,
                &[("code", e.code_str()), ("message", e.message())],
            );
            write_error(e.code_str(), e.message())
        }
        Err(e) => Err(e),
    }
}

/// Parse CLI args and run
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Compile { config } => compile(&config),
        Command::Coerce {
            config,
            entity,
            field,
            value,
        } => coerce(&config, &entity, &field, &value),
        Command::Entities { config } => entities(&config),
    }
}

/// Read one request from stdin, compile it and print the result
pub fn compile(config_path: &Path) -> CliResult<()> {
    let (config, registry) = boot(config_path)?;
    let result = read_request().and_then(|request| compile_request(&registry, &config, request));
    respond(result)
}

/// Coerce a single value and print it
pub fn coerce(config_path: &Path, entity: &str, field: &str, value: &str) -> CliResult<()> {
    let (_, registry) = boot(config_path)?;
    respond(coerce_value(&registry, entity, field, value))
}

/// Print the registered entities
pub fn entities(config_path: &Path) -> CliResult<()> {
    let (_, registry) = boot(config_path)?;
    write_response(list_entities(&registry))
}
