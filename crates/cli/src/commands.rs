use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile filters and print the resulting tree as JSON
    Check {
        #[arg(
            long,
            help = "Filters as JSON, @path to read them from a file, or - for stdin"
        )]
        filters: String,

        #[arg(long, help = "Search schema file (JSON); overrides --entity")]
        schema: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Entity::Dataset)]
        entity: Entity,

        #[arg(long, help = "Parser limits file (JSON)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Maximum nesting of $and/$or lists")]
        max_depth: Option<usize>,

        #[arg(long, help = "Maximum number of filter operations")]
        max_operations: Option<usize>,

        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
    /// Print a built-in search schema
    Schema {
        #[arg(long, value_enum, default_value_t = Entity::Dataset)]
        entity: Entity,

        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
}

/// Entity types with a built-in search schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Dataset,
    Organization,
}
