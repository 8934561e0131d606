use crate::error::Result;

/// The only contract the core holds with the external metadata store.
///
/// A production binary backs this with a real database connection; unit
/// tests substitute an in-memory fake rather than a live MySQL instance.
pub trait MetadataProvider: Send + Sync {
    /// `SELECT table_id, name FROM INFORMATION_SCHEMA.INNODB_TABLES`,
    /// returning `(table_id, "schema/table")` pairs.
    fn list_tables(&self) -> Result<Vec<(u64, String)>>;

    /// `SELECT COLUMN_NAME FROM INFORMATION_SCHEMA.COLUMNS WHERE
    /// TABLE_SCHEMA = ? AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION`.
    fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<String>>;
}
