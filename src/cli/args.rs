//! CLI argument definitions using clap
//!
//! Commands:
//! - bbd-search compile --config <path>
//! - bbd-search coerce --config <path> --entity <e> --field <f> --value <v>
//! - bbd-search entities --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bbd-search - compiles search criteria into predicates and sort directives
#[derive(Parser, Debug)]
#[command(name = "bbd-search")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one search request read from stdin
    Compile {
        /// Path to configuration file
        #[arg(long, default_value = "./bbd-search.json")]
        config: PathBuf,
    },

    /// Coerce a raw value to an entity field's type
    Coerce {
        /// Path to configuration file
        #[arg(long, default_value = "./bbd-search.json")]
        config: PathBuf,

        /// Entity name
        #[arg(long)]
        entity: String,

        /// Field name on the entity
        #[arg(long)]
        field: String,

        /// Raw value
        #[arg(long)]
        value: String,
    },

    /// List registered entities
    Entities {
        /// Path to configuration file
        #[arg(long, default_value = "./bbd-search.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
