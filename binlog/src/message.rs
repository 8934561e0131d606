//! The tagged-variant message model emitted by the [`crate::converter`] and
//! consumed by the [`crate::filter`] chain.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::value::ColumnValue;

/// Table placeholder used by messages that have no associated table —
/// currently only [`Message::Query`]. Non-empty, so a configured table
/// filter excludes these unless it explicitly names it.
pub const UNKNOWN_TABLE: &str = "(unknown)";

#[derive(Debug, Clone, Serialize)]
pub struct MessageHeader {
    pub schema: String,
    pub table: String,
    /// RFC3339, via `DateTime<Utc>`'s own `Serialize` impl.
    pub timestamp: DateTime<Utc>,
    pub binlog_position: u32,
    pub xid: u64,
}

/// Column name → value, insertion order preserved on emit for stable output.
pub type MessageRow = IndexMap<String, Option<ColumnValue>>;

#[derive(Debug, Clone, Serialize)]
pub struct MessageRowData {
    pub row: MessageRow,
    /// Empty on a clean mapping; otherwise a human-readable reason for the
    /// row/column width mismatch.
    pub mapping_notice: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum Message {
    Query { header: MessageHeader, sql: String },
    Insert { header: MessageHeader, data: MessageRowData },
    Delete { header: MessageHeader, data: MessageRowData },
    Update { header: MessageHeader, old: MessageRowData, new: MessageRowData },
}

impl Message {
    pub fn header(&self) -> &MessageHeader {
        match self {
            Message::Query { header, .. }
            | Message::Insert { header, .. }
            | Message::Delete { header, .. }
            | Message::Update { header, .. } => header,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Message::Query { .. } => "query",
            Message::Insert { .. } => "insert",
            Message::Delete { .. } => "delete",
            Message::Update { .. } => "update",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn header() -> MessageHeader {
        MessageHeader { schema: "school".into(), table: "buildings".into(), timestamp: Utc::now(), binlog_position: 4, xid: 7 }
    }

    #[test]
    fn header_accessor_matches_every_variant() {
        let query = Message::Query { header: header(), sql: "SELECT 1".into() };
        assert_eq!(query.header().schema, "school");
        assert_eq!(query.kind(), "query");

        let insert = Message::Insert { header: header(), data: MessageRowData { row: MessageRow::new(), mapping_notice: String::new() } };
        assert_eq!(insert.kind(), "insert");
    }

    #[test]
    fn row_serializes_in_insertion_order() {
        let mut row = MessageRow::new();
        row.insert("b".to_string(), Some(ColumnValue::Integer(2)));
        row.insert("a".to_string(), Some(ColumnValue::Integer(1)));

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }
}
