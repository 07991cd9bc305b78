//! bbd-search - dynamic search predicate and sort compiler
//!
//! Turns a loosely-typed search criteria object into a typed, OR-combined
//! predicate over an entity, and a compact sort string into ordered sort
//! directives.

pub mod catalog;
pub mod cli;
pub mod observability;
pub mod schema;
pub mod search;
