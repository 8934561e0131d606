//! In-memory test doubles for the external collaborators this crate treats
//! as out of scope (the metadata store). Not behind `#[cfg(test)]` so the
//! `tests/` integration suite can depend on it as an ordinary module.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::metadata::MetadataProvider;

/// In-memory [`MetadataProvider`] backed by maps the test sets up directly.
#[derive(Default)]
pub struct FakeMetadataProvider {
    tables: Vec<(u64, String)>,
    columns: Mutex<HashMap<(String, String), Vec<String>>>,
}

impl FakeMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table as known to `populate()` and seeds its columns.
    pub fn with_table(mut self, id: u64, schema: &str, table: &str, columns: &[&str]) -> Self {
        self.tables.push((id, format!("{schema}/{table}")));
        self.set_columns(schema, table, columns);
        self
    }

    /// Overwrites the column list a later `Catalog::add` will read back.
    /// Used to simulate schema drift mid-stream.
    pub fn set_columns(&self, schema: &str, table: &str, columns: &[&str]) {
        self.columns
            .lock()
            .unwrap()
            .insert((schema.to_string(), table.to_string()), columns.iter().map(|c| c.to_string()).collect());
    }
}

impl MetadataProvider for FakeMetadataProvider {
    fn list_tables(&self) -> Result<Vec<(u64, String)>> {
        Ok(self.tables.clone())
    }

    fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<String>> {
        Ok(self
            .columns
            .lock()
            .unwrap()
            .get(&(schema.to_string(), table.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
