use std::fs;
use std::path::Path;

use binlog::error::{Error, Result};
use binlog::event::DecodedEvent;

/// Reads a JSON-lines fixture of decoded events, standing in for the
/// external binlog decoder — byte-level decoding is out of scope for this
/// workspace's core crate, so the CLI front-end reads pre-decoded events
/// from disk instead of opening a raw binlog file.
pub fn read_fixture_events(path: &Path) -> Result<Vec<Result<DecodedEvent>>> {
    let contents = fs::read_to_string(path).map_err(|e| Error::InputNotFound(format!("{}: {e}", path.display())))?;

    Ok(contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<DecodedEvent>(line).map_err(|e| Error::Decoder(e.to_string())))
        .collect())
}
