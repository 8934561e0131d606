use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::metadata::provider::MetadataProvider;
use crate::metadata::table_metadata::TableMetadata;

/// Maps binlog table-ids to the schema/column metadata the converter needs.
///
/// Table ids are ephemeral and rebound per binlog; the qualified name
/// `schema/table` is the stable identity. See `add` for rebinding rules.
pub struct Catalog {
    provider: Box<dyn MetadataProvider>,
    id_to_name: HashMap<u64, String>,
    name_to_metadata: HashMap<String, TableMetadata>,
}

impl Catalog {
    pub fn new(provider: Box<dyn MetadataProvider>) -> Self {
        Catalog { provider, id_to_name: HashMap::new(), name_to_metadata: HashMap::new() }
    }

    /// Scans the metadata store for every table currently known to the
    /// storage engine and reads each one's ordered column list.
    pub fn populate(&mut self) -> Result<()> {
        let tables = self.provider.list_tables()?;
        debug!(count = tables.len(), "populating catalog from metadata store");
        for (id, qualified_name) in tables {
            let (schema, table) = split_qualified_name(&qualified_name);
            self.add(id, &schema, &table)?;
        }
        Ok(())
    }

    /// Ensures an entry exists for `(schema, table)`, re-reading columns
    /// from the metadata source, and binds `id` to it. Overwrites any prior
    /// binding of `id`. Idempotent: re-adding an existing name just
    /// refreshes its column list and id binding.
    pub fn add(&mut self, id: u64, schema: &str, table: &str) -> Result<()> {
        let columns = self.provider.list_columns(schema, table)?;
        let qualified_name = format!("{schema}/{table}");

        self.name_to_metadata
            .insert(qualified_name.clone(), TableMetadata { id, schema: schema.to_string(), table: table.to_string(), columns });
        self.id_to_name.insert(id, qualified_name);
        Ok(())
    }

    /// Pure read. A miss is not an error — the binlog may reference a table
    /// the metadata store no longer carries.
    pub fn lookup(&self, id: u64) -> (TableMetadata, bool) {
        match self.id_to_name.get(&id).and_then(|name| self.name_to_metadata.get(name)) {
            Some(metadata) => (metadata.clone(), true),
            None => {
                warn!(table_id = id, "catalog lookup miss");
                (TableMetadata::default(), false)
            }
        }
    }
}

fn split_qualified_name(qualified_name: &str) -> (String, String) {
    match qualified_name.split_once('/') {
        Some((schema, table)) => (schema.to_string(), table.to_string()),
        None => (qualified_name.to_string(), String::new()),
    }
}
