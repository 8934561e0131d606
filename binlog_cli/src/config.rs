use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// CLI-facing configuration, TOML-loadable. Generalizes the bare binlog-path
/// config this workspace started from into the fuller surface the original
/// `-tables`/`-schemas`/`-pretty` flags exposed; the database DSN used to
/// open a real metadata connection is deliberately absent — wiring a live
/// connection is out of scope here, so `metadata_path` stands in for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinlogCdcConfig {
    /// Fixture file of JSON-lines decoded events, standing in for a real
    /// binlog file plus decoder.
    pub binlog_events_path: PathBuf,

    /// TOML file describing the tables/columns a real metadata store would
    /// answer `list_tables`/`list_columns` with.
    pub metadata_path: PathBuf,

    #[serde(default)]
    pub include_tables: Vec<String>,

    #[serde(default)]
    pub include_schemas: Vec<String>,

    #[serde(default)]
    pub pretty: bool,
}

impl Default for BinlogCdcConfig {
    fn default() -> Self {
        BinlogCdcConfig {
            binlog_events_path: PathBuf::from("events.jsonl"),
            metadata_path: PathBuf::from("metadata.toml"),
            include_tables: Vec::new(),
            include_schemas: Vec::new(),
            pretty: false,
        }
    }
}
