use crate::error::CliError;
use filter_syntax::{FilterError, FilterOp};
use serde::Serialize;

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(CliError::JsonSerialize)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), CliError> {
    let json = to_json(value, pretty)?;
    println!("{json}");
    Ok(())
}

/// Print the compiled tree, or `null` when the input held no filter.
pub fn print_filter(filter: Option<&FilterOp>, pretty: bool) -> Result<(), CliError> {
    print_json(&filter, pretty)
}

/// Print the `{"filters": [...]}` error report.
pub fn print_errors(err: &FilterError, pretty: bool) -> Result<(), CliError> {
    print_json(&err.error_dict(), pretty)
}
