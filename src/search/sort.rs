//! Sort specification parser
//!
//! Parses `-dueDate,+title` style descriptors: comma-separated tokens, each
//! prefixed with `-` (descending) or `+` (ascending). Punctuation is stripped
//! from the token to obtain the field name. Tokens without a sign, or with
//! nothing left after stripping, are dropped. Input order is tie-break
//! priority.

use serde::Serialize;

use super::path::EntityPath;
use super::text::{is_blank, remove_special_characters};
use crate::observability::{log_event_with_fields, Event};

/// Token separator
pub const SORT_SEPARATOR: char = ',';
/// Descending prefix
pub const SORT_DESC_PREFIX: char = '-';
/// Ascending prefix
pub const SORT_ASC_PREFIX: char = '+';

/// One ordering key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortDirective {
    pub field: String,
    pub ascending: bool,
}

impl SortDirective {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }

    /// `alias.field` for the given entity path
    pub fn qualified(&self, path: &EntityPath) -> String {
        path.qualify(&self.field)
    }

    pub fn direction(&self) -> &'static str {
        if self.ascending {
            "asc"
        } else {
            "desc"
        }
    }
}

/// Parses a sort descriptor. Malformed tokens are dropped, never reported.
pub fn parse_sort(descriptor: &str) -> Vec<SortDirective> {
    if is_blank(descriptor) {
        return Vec::new();
    }

    descriptor
        .split(SORT_SEPARATOR)
        .filter_map(|token| {
            let directive = parse_token(token);
            if directive.is_none() {
                log_event_with_fields(Event::SortTokenDropped, &[("token", token)]);
            }
            directive
        })
        .collect()
}

fn parse_token(token: &str) -> Option<SortDirective> {
    let field = remove_special_characters(token);
    if field.is_empty() {
        return None;
    }

    if token.starts_with(SORT_DESC_PREFIX) {
        Some(SortDirective::desc(field))
    } else if token.starts_with(SORT_ASC_PREFIX) {
        Some(SortDirective::asc(field))
    } else {
        None
    }
}

/// Parses a sort descriptor for an entity.
///
/// Field names are not checked against the entity; the executor decides what
/// an unknown ordering key means.
pub fn parse_sort_spec(descriptor: &str, path: &EntityPath) -> Vec<SortDirective> {
    let directives = parse_sort(descriptor);

    let count = directives.len().to_string();
    log_event_with_fields(
        Event::SortParsed,
        &[("directives", count.as_str()), ("entity", path.name())],
    );

    directives
}
