//! Sort specification tests

use bbd_search::catalog;
use bbd_search::search::{parse_sort_spec, EntityPath, SortDirective};

fn pot() -> EntityPath {
    EntityPath::new(catalog::registry().unwrap().require("pot").unwrap())
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn test_default_repository_sort() {
    assert_eq!(
        parse_sort_spec("-dueDate", &pot()),
        vec![SortDirective::desc("dueDate")]
    );
}

#[test]
fn test_multiple_keys_keep_priority() {
    assert_eq!(
        parse_sort_spec("-dueDate,+title", &pot()),
        vec![SortDirective::desc("dueDate"), SortDirective::asc("title")]
    );
}

#[test]
fn test_unsigned_and_empty_tokens_dropped() {
    assert!(parse_sort_spec("dueDate", &pot()).is_empty());
    assert!(parse_sort_spec("", &pot()).is_empty());
    assert_eq!(
        parse_sort_spec("title,,-,+createdAt", &pot()),
        vec![SortDirective::asc("createdAt")]
    );
}

#[test]
fn test_unknown_fields_are_not_validated() {
    assert_eq!(
        parse_sort_spec("+popularity", &pot()),
        vec![SortDirective::asc("popularity")]
    );
}

// =============================================================================
// QUALIFIED PATHS
// =============================================================================

#[test]
fn test_qualified_paths_follow_alias() {
    let registry = catalog::registry().unwrap();
    let aliased = EntityPath::with_alias(registry.require("pot").unwrap(), "p");

    let qualified: Vec<String> = parse_sort_spec("-dueDate,+title", &aliased)
        .iter()
        .map(|d| d.qualified(&aliased))
        .collect();
    assert_eq!(qualified, vec!["p.dueDate", "p.title"]);
}

#[test]
fn test_directive_serializes() {
    let json = serde_json::to_value(SortDirective::desc("dueDate")).unwrap();
    assert_eq!(json, serde_json::json!({"field": "dueDate", "ascending": false}));
}
