//! Entity registry error types
//!
//! Error codes:
//! - BBD_UNKNOWN_ENTITY (REJECT)
//! - BBD_MALFORMED_ENTITY (FATAL)
//! - BBD_DUPLICATE_ENTITY (FATAL)
//! - BBD_UNKNOWN_PARENT (FATAL)

use std::fmt;

/// Severity levels for registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, registry is healthy
    Reject,
    /// Registry could not be built; startup must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Registry error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Entity name not registered
    BbdUnknownEntity,
    /// Entity file unreadable or structurally invalid
    BbdMalformedEntity,
    /// Entity name registered twice
    BbdDuplicateEntity,
    /// Entity names a parent that is not registered
    BbdUnknownParent,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::BbdUnknownEntity => "BBD_UNKNOWN_ENTITY",
            SchemaErrorCode::BbdMalformedEntity => "BBD_MALFORMED_ENTITY",
            SchemaErrorCode::BbdDuplicateEntity => "BBD_DUPLICATE_ENTITY",
            SchemaErrorCode::BbdUnknownParent => "BBD_UNKNOWN_PARENT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::BbdUnknownEntity => Severity::Reject,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Registry error with context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    entity: Option<String>,
}

impl SchemaError {
    /// Create an unknown entity error
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        let name = entity.into();
        Self {
            code: SchemaErrorCode::BbdUnknownEntity,
            message: format!("Entity '{}' is not registered", name),
            entity: Some(name),
        }
    }

    /// Create a malformed entity error
    pub fn malformed_entity(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::BbdMalformedEntity,
            message: format!("Malformed entity definition {}: {}", source.into(), reason.into()),
            entity: None,
        }
    }

    /// Create a duplicate entity error
    pub fn duplicate_entity(entity: impl Into<String>) -> Self {
        let name = entity.into();
        Self {
            code: SchemaErrorCode::BbdDuplicateEntity,
            message: format!("Entity '{}' is already registered", name),
            entity: Some(name),
        }
    }

    /// Create an unknown parent error
    pub fn unknown_parent(entity: impl Into<String>, parent: impl Into<String>) -> Self {
        let name = entity.into();
        Self {
            code: SchemaErrorCode::BbdUnknownParent,
            message: format!("Entity '{}' names unknown parent '{}'", name, parent.into()),
            entity: Some(name),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the entity name if applicable
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for registry operations
pub type SchemaResult<T> = Result<T, SchemaError>;
