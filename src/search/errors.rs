//! # Search Errors
//!
//! Error types for predicate compilation and value coercion.

use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Search compiler errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Criteria field does not resolve against the entity.
    ///
    /// Recovered inside the compiler; only `PathResolver::resolve` callers see it.
    #[error("Field '{field}' not found on entity '{entity}'")]
    FieldNotFound { entity: String, field: String },

    /// Raw string cannot be converted to the field's declared type
    #[error("Cannot convert '{value}' to {target}")]
    TypeCoercion { value: String, target: String },

    /// No supported date pattern matched
    #[error("Unsupported date format: '{value}'")]
    DateFormat { value: String },

    /// A date pattern contains a letter run with no known meaning
    #[error("Invalid date pattern: '{pattern}'")]
    InvalidDatePattern { pattern: String },

    /// Criteria document has an unusable shape
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),
}

impl SearchError {
    pub fn field_not_found(entity: impl Into<String>, field: impl Into<String>) -> Self {
        SearchError::FieldNotFound {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub fn type_coercion(value: impl Into<String>, target: impl Into<String>) -> Self {
        SearchError::TypeCoercion {
            value: value.into(),
            target: target.into(),
        }
    }

    pub fn date_format(value: impl Into<String>) -> Self {
        SearchError::DateFormat {
            value: value.into(),
        }
    }

    /// True for `TypeCoercion` and its date specialization
    pub fn is_coercion(&self) -> bool {
        matches!(
            self,
            SearchError::TypeCoercion { .. } | SearchError::DateFormat { .. }
        )
    }

    /// The raw value that failed to convert, if any
    pub fn rejected_value(&self) -> Option<&str> {
        match self {
            SearchError::TypeCoercion { value, .. } | SearchError::DateFormat { value } => {
                Some(value)
            }
            _ => None,
        }
    }

    /// HTTP-equivalent status for a caller-facing API
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            SearchError::TypeCoercion { .. } => 400,
            SearchError::DateFormat { .. } => 400,
            SearchError::InvalidCriteria(_) => 400,

            // 500: never meant to leave the compiler
            SearchError::FieldNotFound { .. } => 500,
            SearchError::InvalidDatePattern { .. } => 500,
        }
    }

    /// Stable error code for JSON responses
    pub fn code(&self) -> &'static str {
        match self.status_code() {
            400 => "BBD_BAD_REQUEST",
            _ => "BBD_INTERNAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SearchError::type_coercion("abc", "long").status_code(), 400);
        assert_eq!(SearchError::date_format("2024-13-40").status_code(), 400);
        assert_eq!(SearchError::field_not_found("pot", "x").status_code(), 500);
    }

    #[test]
    fn test_date_format_is_coercion() {
        let err = SearchError::date_format("nope");
        assert!(err.is_coercion());
        assert_eq!(err.rejected_value(), Some("nope"));
        assert!(!SearchError::field_not_found("pot", "x").is_coercion());
    }

    #[test]
    fn test_display_carries_value_and_target() {
        let msg = SearchError::type_coercion("abc", "integer").to_string();
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("integer"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(SearchError::date_format("x").code(), "BBD_BAD_REQUEST");
        assert_eq!(SearchError::field_not_found("pot", "x").code(), "BBD_INTERNAL");
    }
}
