//! Search criteria
//!
//! A criteria object is a flat record of named filter values. Each field may
//! carry a `RoutingRule` restricting which entity it applies to and which
//! entity field it maps onto. Typed criteria structs implement `Criteria` by
//! listing their fields; `DynamicCriteria` covers query-string and JSON input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SearchError, SearchResult};

/// Per-field routing metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    /// Entity this field is meant for (case-insensitive)
    pub target: String,
    /// Entity field to use instead of the criteria field's own name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Drop the field entirely
    #[serde(default)]
    pub exclude: bool,
}

impl RoutingRule {
    pub fn target(entity: impl Into<String>) -> Self {
        Self {
            target: entity.into(),
            field: None,
            exclude: false,
        }
    }

    pub fn remap(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }
}

/// The current value of one criteria field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaValue {
    Null,
    Text(String),
    List(Vec<String>),
}

impl CriteriaValue {
    /// Textual form handed to the compiler.
    ///
    /// `Null` becomes `"null"` and an empty list `"[]"`, both of which the
    /// compiler treats as "no filter". Other lists are joined with commas.
    pub fn to_raw(&self) -> String {
        match self {
            CriteriaValue::Null => "null".to_string(),
            CriteriaValue::Text(text) => text.clone(),
            CriteriaValue::List(items) if items.is_empty() => "[]".to_string(),
            CriteriaValue::List(items) => items.join(","),
        }
    }

    /// Converts a JSON value. Objects (and nested arrays) are rejected.
    pub fn from_json(value: &Value) -> SearchResult<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(scalar_text)
                .collect::<SearchResult<Vec<_>>>()
                .map(CriteriaValue::List),
            Value::Null => Ok(CriteriaValue::Null),
            scalar => scalar_text(scalar).map(CriteriaValue::Text),
        }
    }
}

fn scalar_text(value: &Value) -> SearchResult<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SearchError::InvalidCriteria(format!(
            "unsupported criteria value: {}",
            other
        ))),
    }
}

impl From<&str> for CriteriaValue {
    fn from(value: &str) -> Self {
        CriteriaValue::Text(value.to_string())
    }
}

impl From<String> for CriteriaValue {
    fn from(value: String) -> Self {
        CriteriaValue::Text(value)
    }
}

impl<T: Into<CriteriaValue>> From<Option<T>> for CriteriaValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CriteriaValue::Null)
    }
}

impl From<Vec<String>> for CriteriaValue {
    fn from(items: Vec<String>) -> Self {
        CriteriaValue::List(items)
    }
}

/// One field of a criteria object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaEntry {
    pub name: String,
    pub value: CriteriaValue,
    pub routing: Option<RoutingRule>,
}

impl CriteriaEntry {
    pub fn new(name: impl Into<String>, value: impl Into<CriteriaValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            routing: None,
        }
    }

    pub fn routed(mut self, rule: RoutingRule) -> Self {
        self.routing = Some(rule);
        self
    }
}

/// Anything that can enumerate its filter fields
pub trait Criteria {
    /// Every declared field with its current value, nulls included
    fn entries(&self) -> Vec<CriteriaEntry>;
}

/// Criteria assembled at runtime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicCriteria {
    entries: Vec<CriteriaEntry>,
}

impl DynamicCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unrouted field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<CriteriaValue>) -> Self {
        self.entries.push(CriteriaEntry::new(name, value));
        self
    }

    /// Adds a field with a routing rule
    pub fn routed(
        mut self,
        name: impl Into<String>,
        value: impl Into<CriteriaValue>,
        rule: RoutingRule,
    ) -> Self {
        self.entries.push(CriteriaEntry::new(name, value).routed(rule));
        self
    }

    pub fn push(&mut self, entry: CriteriaEntry) {
        self.entries.push(entry);
    }

    /// Builds criteria from query parameters, ordered by key
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();

        let entries = keys
            .into_iter()
            .map(|key| CriteriaEntry::new(key.as_str(), params[key].as_str()))
            .collect();
        Self { entries }
    }

    /// Builds criteria from a JSON object, with optional routing rules keyed
    /// by criteria field name.
    pub fn from_json(criteria: &Value, routing: Option<&Value>) -> SearchResult<Self> {
        let fields = criteria
            .as_object()
            .ok_or_else(|| SearchError::InvalidCriteria("criteria must be a JSON object".into()))?;

        let rules: HashMap<String, RoutingRule> = match routing {
            None | Some(Value::Null) => HashMap::new(),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| SearchError::InvalidCriteria(format!("invalid routing: {}", e)))?,
        };

        let mut result = Self::new();
        for (name, value) in fields {
            let mut entry = CriteriaEntry::new(name.as_str(), CriteriaValue::from_json(value)?);
            entry.routing = rules.get(name).cloned();
            result.push(entry);
        }
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Criteria for DynamicCriteria {
    fn entries(&self) -> Vec<CriteriaEntry> {
        self.entries.clone()
    }
}
