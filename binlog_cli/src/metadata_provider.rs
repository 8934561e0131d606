use serde::Deserialize;

use binlog::error::Result;
use binlog::metadata::MetadataProvider;
use common::config::read_toml_config;

#[derive(Debug, Clone, Deserialize)]
struct TableEntry {
    id: u64,
    schema: String,
    table: String,
    columns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct MetadataFile {
    #[serde(default)]
    tables: Vec<TableEntry>,
}

/// [`MetadataProvider`] backed by a TOML file rather than a live database
/// connection — a stand-in for the real metadata store, which is out of
/// scope for this crate.
pub struct TomlMetadataProvider {
    tables: Vec<TableEntry>,
}

impl TomlMetadataProvider {
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let file: MetadataFile = read_toml_config(path).map_err(|e| binlog::error::Error::MetadataStore(e.to_string()))?;
        Ok(TomlMetadataProvider { tables: file.tables })
    }
}

impl MetadataProvider for TomlMetadataProvider {
    fn list_tables(&self) -> Result<Vec<(u64, String)>> {
        Ok(self.tables.iter().map(|t| (t.id, format!("{}/{}", t.schema, t.table))).collect())
    }

    fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<String>> {
        Ok(self
            .tables
            .iter()
            .find(|t| t.schema == schema && t.table == table)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }
}
