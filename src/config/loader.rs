use std::path::Path;

use crate::error::{Result, TreeLintError};

use super::Config;

/// Parses a configuration overlay from a TOML string.
///
/// # Errors
/// Returns an error if the string is not valid TOML.
pub fn from_toml_str(input: &str) -> Result<Config> {
    let table = input.parse::<toml::Table>()?;
    Ok(Config::from_table(table))
}

/// Loads a configuration overlay from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| TreeLintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    from_toml_str(&content)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
