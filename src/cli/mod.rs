//! CLI module for bbd-search
//!
//! Provides command-line interface for:
//! - compile: Compile one search request from stdin
//! - coerce: Coerce a raw value to a field's type
//! - entities: List registered entities

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    build_registry, coerce, coerce_value, compile, compile_request, entities, list_entities, run,
    run_command, CompileRequest, Config,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_error, write_response};
