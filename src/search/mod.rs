//! Dynamic search compiler
//!
//! Compiles a loosely-typed criteria object into a predicate over an entity,
//! and a compact sort string into ordered sort directives. Nothing here runs
//! a query: the output is handed to whatever executor the caller uses.
//!
//! # Flow
//!
//! 1. `ConditionCompiler` enumerates criteria fields and applies routing
//! 2. `OperatorKind` is inferred from `%` wildcards in each raw value
//! 3. `PathResolver` resolves the field and coerces the cleaned value
//! 4. Per-field predicates are OR-combined
//! 5. `parse_sort_spec` turns `-dueDate,+title` into `SortDirective`s
//!
//! Every call is pure and synchronous; compiled regexes and date patterns
//! are the only shared state and are read-only.

mod compiler;
mod criteria;
mod errors;
mod operator;
mod path;
mod predicate;
mod sort;

pub mod dates;
pub mod text;

pub use compiler::{compile_predicate, is_unfiltered, ConditionCompiler, ConditionSet};
pub use criteria::{Criteria, CriteriaEntry, CriteriaValue, DynamicCriteria, RoutingRule};
pub use errors::{SearchError, SearchResult};
pub use operator::{strip_wildcards, OperatorKind, WILDCARD};
pub use path::{coerce, EntityPath, FieldDescriptor, PathResolver, TypedValue};
pub use predicate::Predicate;
pub use sort::{parse_sort, parse_sort_spec, SortDirective};
