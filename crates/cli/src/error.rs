use filter_syntax::FilterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input: {0}")]
    InputRead(#[from] std::io::Error),

    #[error("Failed to parse the schema file: {0}")]
    SchemaParse(serde_json::Error),

    #[error("Failed to parse the limits configuration file: {0}")]
    ConfigParse(serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid filters: {0}")]
    Filter(#[from] FilterError),
}
