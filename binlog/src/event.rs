//! The decoded binlog event shapes this crate consumes. Byte-level decoding
//! is out of scope here — these values are produced by an external decoder
//! and handed to [`crate::dispatcher::Dispatcher`]. All types derive
//! `Deserialize` so a CLI front-end can read a fixture event stream in lieu
//! of a real decoder.

use serde::Deserialize;

use crate::value::ColumnValue;

/// A single row image, one cell per column in table-definition order.
pub type RawRow = Vec<Option<ColumnValue>>;

/// Common framing every decoded event carries, mirroring the binlog's own
/// event header.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EventHeader {
    pub timestamp: u32,
    pub log_pos: u32,
}

/// `CREATE TABLE`/`ALTER TABLE`/transaction boundary statements, carried
/// verbatim from the binlog.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryEvent {
    pub header: EventHeader,
    pub schema: String,
    pub sql: String,
}

/// Binds a table-id to a `(schema, table)` pair for the rows that follow,
/// until superseded by another TABLE_MAP event for the same id.
#[derive(Debug, Clone, Deserialize)]
pub struct TableMapEvent {
    pub header: EventHeader,
    pub table_id: u64,
    pub schema: String,
    pub table: String,
}

/// Marks the end of a transaction: buffered row events are drained and
/// converted.
#[derive(Debug, Clone, Deserialize)]
pub struct XidEvent {
    pub header: EventHeader,
    pub xid: u64,
}

/// A `WRITE_ROWS`/`UPDATE_ROWS`/`DELETE_ROWS` event (v1 or v2 — the version
/// distinction only affects wire framing the decoder has already stripped).
#[derive(Debug, Clone, Deserialize)]
pub struct RowsEvent {
    pub header: EventHeader,
    pub table_id: u64,
    pub kind: RowsEventKind,
}

#[derive(Debug, Clone, Deserialize)]
pub enum RowsEventKind {
    Write { rows: Vec<RawRow> },
    /// Flat interleaving of (before, after) pairs: row `2i` is the before
    /// image and `2i+1` the after image of the `i`th updated row. An odd
    /// length is a violated invariant, checked at conversion time.
    Update { rows: Vec<RawRow> },
    Delete { rows: Vec<RawRow> },
}

/// The union of event kinds the dispatcher's state machine switches on.
#[derive(Debug, Clone, Deserialize)]
pub enum DecodedEvent {
    Query(QueryEvent),
    TableMap(TableMapEvent),
    Rows(RowsEvent),
    Xid(XidEvent),
}
