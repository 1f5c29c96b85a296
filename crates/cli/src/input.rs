use crate::{commands::Entity, error::CliError};
use filter_syntax::{ParserLimits, SearchSchema};
use std::{fs, io, path::Path};
use tracing::info;

/// Resolve the `--filters` argument: inline JSON, `@path` or `-` for stdin.
pub fn read_filters(arg: &str) -> Result<String, CliError> {
    if arg == "-" {
        return Ok(io::read_to_string(io::stdin())?);
    }

    match arg.strip_prefix('@') {
        Some(path) => {
            info!("Reading filters from {path}");
            Ok(fs::read_to_string(path)?)
        }
        None => Ok(arg.to_string()),
    }
}

pub fn builtin_schema(entity: Entity) -> SearchSchema {
    match entity {
        Entity::Dataset => SearchSchema::dataset(),
        Entity::Organization => SearchSchema::organization(),
    }
}

pub fn load_schema(path: Option<&Path>, entity: Entity) -> Result<SearchSchema, CliError> {
    let Some(path) = path else {
        return Ok(builtin_schema(entity));
    };

    info!("Loading search schema from {}", path.display());
    let source = fs::read_to_string(path)?;
    SearchSchema::from_json_str(&source).map_err(CliError::SchemaParse)
}

/// Limits from the optional config file, then command line overrides.
pub fn load_limits(
    config: Option<&Path>,
    max_depth: Option<usize>,
    max_operations: Option<usize>,
) -> Result<ParserLimits, CliError> {
    let mut limits = match config {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            serde_json::from_str(&source).map_err(CliError::ConfigParse)?
        }
        None => ParserLimits::default(),
    };

    if let Some(max_depth) = max_depth {
        limits = limits.with_max_depth(max_depth);
    }
    if let Some(max_operations) = max_operations {
        limits = limits.with_max_operations(max_operations);
    }

    Ok(limits)
}
