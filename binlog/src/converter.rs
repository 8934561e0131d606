//! Turns raw row tuples plus catalog metadata into named-field change
//! messages, and query events into `Query` messages.

use common::time_util::unix_seconds_to_utc;
use tracing::warn;

use crate::buffer::BufferedRowEvent;
use crate::error::{Error, Result};
use crate::event::{QueryEvent, RawRow, RowsEventKind};
use crate::message::{Message, MessageHeader, MessageRow, MessageRowData, UNKNOWN_TABLE};

const COLUMNS_MISSING_NOTICE: &str = "column names array is missing field(s), will map them as unknown_*";
const ROW_MISSING_NOTICE: &str = "row is missing field(s), ignoring missing";

/// Zips one raw row with a column-name list, tolerating width mismatches.
///
/// A longer row keeps real column names for the indices columns actually
/// cover and synthesizes `(unknown_k)` only for the overflow; a shorter row
/// uses real names throughout and simply omits the surplus column names.
/// See the asymmetric wording of the two mismatch notices: preserved
/// verbatim, not "corrected", to match downstream fixture expectations.
fn map_row(row: RawRow, columns: &[String]) -> MessageRowData {
    let notice = match row.len().cmp(&columns.len()) {
        std::cmp::Ordering::Equal => "",
        std::cmp::Ordering::Greater => COLUMNS_MISSING_NOTICE,
        std::cmp::Ordering::Less => ROW_MISSING_NOTICE,
    };
    if !notice.is_empty() {
        warn!(row_len = row.len(), columns_len = columns.len(), notice, "row/column width mismatch");
    }

    let mut mapped = MessageRow::new();
    let mut unknown_count = 0usize;
    for (i, value) in row.into_iter().enumerate() {
        let key = match columns.get(i) {
            Some(name) => name.clone(),
            None => {
                let key = format!("(unknown_{unknown_count})");
                unknown_count += 1;
                key
            }
        };
        mapped.insert(key, value);
    }

    MessageRowData { row: mapped, mapping_notice: notice.to_string() }
}

fn message_header(schema: &str, table: &str, timestamp: u32, binlog_position: u32, xid: u64) -> MessageHeader {
    MessageHeader {
        schema: schema.to_string(),
        table: table.to_string(),
        timestamp: unix_seconds_to_utc(timestamp),
        binlog_position,
        xid,
    }
}

/// Converts one `QueryEvent` into a `Query` message. `BEGIN`/`SAVEPOINT`
/// filtering happens upstream in the dispatcher, not here.
pub fn query_to_message(event: &QueryEvent) -> Message {
    Message::Query {
        header: message_header(&event.schema, UNKNOWN_TABLE, event.header.timestamp, event.header.log_pos, 0),
        sql: event.sql.clone(),
    }
}

/// Converts every row buffered for one transaction into messages, in
/// buffering order, using the XID that closed the transaction.
pub fn rows_to_messages(event: BufferedRowEvent, xid: u64) -> Result<Vec<Message>> {
    let BufferedRowEvent { header, metadata, kind } = event;
    let columns = &metadata.columns;

    let messages = match kind {
        RowsEventKind::Write { rows } => rows
            .into_iter()
            .map(|row| {
                Message::Insert {
                    header: message_header(&metadata.schema, &metadata.table, header.timestamp, header.log_pos, xid),
                    data: map_row(row, columns),
                }
            })
            .collect(),
        RowsEventKind::Delete { rows } => rows
            .into_iter()
            .map(|row| {
                Message::Delete {
                    header: message_header(&metadata.schema, &metadata.table, header.timestamp, header.log_pos, xid),
                    data: map_row(row, columns),
                }
            })
            .collect(),
        RowsEventKind::Update { rows } => {
            if rows.len() % 2 != 0 {
                return Err(Error::InvariantViolation(format!(
                    "update row count is odd ({}) for table {}/{}",
                    rows.len(),
                    metadata.schema,
                    metadata.table
                )));
            }
            rows.chunks(2)
                .map(|pair| {
                    let [before, after]: [RawRow; 2] = [pair[0].clone(), pair[1].clone()];
                    Message::Update {
                        header: message_header(&metadata.schema, &metadata.table, header.timestamp, header.log_pos, xid),
                        old: map_row(before, columns),
                        new: map_row(after, columns),
                    }
                })
                .collect()
        }
    };

    Ok(messages)
}
