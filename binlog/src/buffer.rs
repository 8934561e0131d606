//! Per-transaction FIFO of row events awaiting the commit marker.

use crate::event::{EventHeader, RowsEventKind};
use crate::metadata::TableMetadata;

/// A raw rows event plus the [`TableMetadata`] resolved at the moment it was
/// buffered, so a mid-transaction TABLE_MAP rebind cannot retroactively
/// change column names for rows already sitting in the buffer.
#[derive(Debug, Clone)]
pub struct BufferedRowEvent {
    pub header: EventHeader,
    pub metadata: TableMetadata,
    pub kind: RowsEventKind,
}

/// Owned exclusively by the [`crate::dispatcher::Dispatcher`]; no concurrent
/// access.
#[derive(Default)]
pub struct EventBuffer {
    buffered: Vec<BufferedRowEvent>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// O(1) amortized; preserves arrival order.
    pub fn append(&mut self, event: BufferedRowEvent) {
        self.buffered.push(event);
    }

    /// Returns the current contents and resets the buffer to empty.
    pub fn drain(&mut self) -> Vec<BufferedRowEvent> {
        std::mem::take(&mut self.buffered)
    }

    pub fn is_empty(&self) -> bool {
        self.buffered.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::ColumnValue;

    fn row_event(table_id: u64) -> BufferedRowEvent {
        BufferedRowEvent {
            header: EventHeader::default(),
            metadata: TableMetadata { id: table_id, schema: "s".into(), table: "t".into(), columns: vec!["id".into()] },
            kind: RowsEventKind::Write { rows: vec![vec![Some(ColumnValue::Integer(1))]] },
        }
    }

    #[test]
    fn append_preserves_arrival_order() {
        let mut buffer = EventBuffer::new();
        buffer.append(row_event(1));
        buffer.append(row_event(2));

        let drained = buffer.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].metadata.id, 1);
        assert_eq!(drained[1].metadata.id, 2);
    }

    #[test]
    fn drain_resets_to_empty() {
        let mut buffer = EventBuffer::new();
        buffer.append(row_event(1));
        buffer.drain();
        assert!(buffer.is_empty());
    }

    #[test]
    fn draining_an_empty_buffer_yields_empty() {
        let mut buffer = EventBuffer::new();
        assert!(buffer.drain().is_empty());
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn append_after_drain_starts_a_new_batch() {
        let mut buffer = EventBuffer::new();
        buffer.append(row_event(1));
        buffer.drain();
        buffer.append(row_event(2));

        let drained = buffer.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].metadata.id, 2);
    }
}
