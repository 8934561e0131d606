use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::err::{CResult, ReError};

/// Reads and parses a TOML configuration file into `T`.
///
/// Generic over the target type so both the CLI's top-level config and any
/// nested sub-config can share the same loading path.
pub fn read_toml_config<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> CResult<T> {
    let contents = fs::read_to_string(path.as_ref())
        .map_err(|e| ReError::ConfigFileReadErr(format!("{}: {e}", path.as_ref().display())))?;

    toml::from_str(&contents).map_err(|e| ReError::ConfigFileParseErr(e.to_string()))
}
