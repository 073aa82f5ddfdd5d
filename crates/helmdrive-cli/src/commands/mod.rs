//! CLI subcommand implementations

pub mod apply;
pub mod delete;
pub mod normalize;
pub mod status;

use std::io::Read;
use std::path::Path;

use crate::error::{CliError, Result};

/// Read an override payload from a file, standard input (`-`), or default
/// to the empty JSON object when no file is given
pub(crate) fn read_payload(file: Option<&Path>) -> Result<String> {
    match file {
        None => Ok("{}".to_string()),
        Some(path) if path == Path::new("-") => {
            let mut payload = String::new();
            std::io::stdin()
                .read_to_string(&mut payload)
                .map_err(|e| CliError::io(&e))?;
            Ok(payload)
        }
        Some(path) => std::fs::read_to_string(path).map_err(|e| CliError::io(&e)),
    }
}
