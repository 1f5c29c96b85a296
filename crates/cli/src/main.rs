use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use filter_syntax::parse_filters_str;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod input;
mod output;

#[derive(Parser)]
#[command(name = "qfc", version = "0.1.0", about = "Query filter compiler")]
struct Cli {
    #[arg(short, long, global = true, help = "Log at debug level")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            filters,
            schema,
            entity,
            config,
            max_depth,
            max_operations,
            pretty,
        } => {
            let source = input::read_filters(&filters)?;
            let schema = input::load_schema(schema.as_deref(), entity)?;
            let limits = input::load_limits(config.as_deref(), max_depth, max_operations)?;

            info!(
                "Checking filters against {} schema fields, limits: {:?}",
                schema.fields.len(),
                limits
            );

            match parse_filters_str(&source, &schema, limits) {
                Ok(filter) => output::print_filter(filter.as_ref(), pretty)?,
                Err(err) => {
                    output::print_errors(&err, pretty)?;
                    return Err(CliError::Filter(err));
                }
            }
        }
        Commands::Schema { entity, pretty } => {
            output::print_json(&input::builtin_schema(entity), pretty)?;
        }
    }

    Ok(())
}
