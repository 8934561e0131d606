//! Consumes a decoded event stream and drives every side effect: catalog
//! updates, transaction buffering, conversion, and filtering.

use tracing::{debug, error};

use crate::buffer::{BufferedRowEvent, EventBuffer};
use crate::converter::{query_to_message, rows_to_messages};
use crate::error::Result;
use crate::event::DecodedEvent;
use crate::filter::FilterChain;
use crate::metadata::Catalog;

/// Owns the [`Catalog`] and [`EventBuffer`] for the duration of one parse.
/// Strictly sequential: the first consumer or metadata-store error aborts
/// the run immediately.
pub struct Dispatcher {
    catalog: Catalog,
    buffer: EventBuffer,
}

impl Dispatcher {
    pub fn new(catalog: Catalog) -> Self {
        Dispatcher { catalog, buffer: EventBuffer::new() }
    }

    /// Drives `events` to completion against `filters`, returning the first
    /// error encountered. Messages already delivered to sinks before that
    /// error stay delivered; there is no rollback.
    pub fn run<I>(&mut self, events: I, filters: &mut FilterChain) -> Result<()>
    where
        I: IntoIterator<Item = Result<DecodedEvent>>,
    {
        for event in events {
            let event = event?;
            self.dispatch_one(event, filters)?;
        }
        Ok(())
    }

    fn dispatch_one(&mut self, event: DecodedEvent, filters: &mut FilterChain) -> Result<()> {
        match event {
            DecodedEvent::Query(query) => {
                let trimmed = query.sql.trim().to_ascii_uppercase();
                if trimmed == "BEGIN" || trimmed.starts_with("SAVEPOINT") {
                    return Ok(());
                }
                let message = query_to_message(&query);
                filters.consume(&message).map_err(|e| {
                    error!(error = %e, "consumer rejected query message");
                    e
                })
            }
            DecodedEvent::TableMap(table_map) => {
                debug!(table_id = table_map.table_id, schema = %table_map.schema, table = %table_map.table, "table map");
                self.catalog.add(table_map.table_id, &table_map.schema, &table_map.table).map_err(|e| {
                    error!(error = %e, "metadata store error handling TABLE_MAP_EVENT");
                    e
                })
            }
            DecodedEvent::Rows(rows) => {
                let (metadata, found) = self.catalog.lookup(rows.table_id);
                if !found {
                    return Ok(());
                }
                self.buffer.append(BufferedRowEvent { header: rows.header, metadata, kind: rows.kind });
                Ok(())
            }
            DecodedEvent::Xid(xid) => {
                let drained = self.buffer.drain();
                debug!(xid = xid.xid, count = drained.len(), "draining transaction buffer");
                for buffered in drained {
                    let messages = rows_to_messages(buffered, xid.xid).map_err(|e| {
                        error!(error = %e, "invariant violation converting buffered rows");
                        e
                    })?;
                    for message in &messages {
                        filters.consume(message).map_err(|e| {
                            error!(error = %e, "consumer rejected row message");
                            e
                        })?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::event::{EventHeader, QueryEvent, RowsEvent, RowsEventKind, TableMapEvent, XidEvent};
    use crate::message::Message;
    use crate::testing::FakeMetadataProvider;
    use crate::value::ColumnValue;
    use std::sync::{Arc, Mutex};

    fn dispatcher_with(provider: FakeMetadataProvider) -> Dispatcher {
        let mut catalog = Catalog::new(Box::new(provider));
        catalog.populate().unwrap();
        Dispatcher::new(catalog)
    }

    fn sink() -> (FilterChain, Arc<Mutex<Vec<Message>>>) {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let collected_clone = collected.clone();
        let chain = FilterChain::new().add_sink(move |message| {
            collected_clone.lock().unwrap().push(message.clone());
            Ok(())
        });
        (chain, collected)
    }

    fn cell(v: i64) -> Option<ColumnValue> {
        Some(ColumnValue::Integer(v))
    }

    #[test]
    fn table_map_then_write_then_xid_emits_inserts_in_order() {
        let provider = FakeMetadataProvider::new();
        let mut dispatcher = dispatcher_with(provider);
        let (mut chain, collected) = sink();

        let events: Vec<Result<DecodedEvent>> = vec![
            Ok(DecodedEvent::TableMap(TableMapEvent { header: EventHeader::default(), table_id: 1, schema: "school".into(), table: "buildings".into() })),
            Ok(DecodedEvent::Rows(RowsEvent {
                header: EventHeader { timestamp: 1_600_000_000, log_pos: 10 },
                table_id: 1,
                kind: RowsEventKind::Write { rows: vec![vec![cell(1)], vec![cell(2)]] },
            })),
            Ok(DecodedEvent::Xid(XidEvent { header: EventHeader::default(), xid: 99 })),
        ];

        dispatcher.run(events, &mut chain).unwrap();

        let collected = collected.lock().unwrap();
        assert_eq!(collected.len(), 2);
        assert!(collected.iter().all(|m| m.header().xid == 99));
    }

    #[test]
    fn rows_event_for_unknown_table_id_is_silently_skipped() {
        let mut dispatcher = dispatcher_with(FakeMetadataProvider::new());
        let (mut chain, collected) = sink();

        let events: Vec<Result<DecodedEvent>> = vec![
            Ok(DecodedEvent::Rows(RowsEvent {
                header: EventHeader::default(),
                table_id: 404,
                kind: RowsEventKind::Write { rows: vec![vec![cell(1)]] },
            })),
            Ok(DecodedEvent::Xid(XidEvent { header: EventHeader::default(), xid: 1 })),
        ];

        dispatcher.run(events, &mut chain).unwrap();
        assert!(collected.lock().unwrap().is_empty());
    }

    #[test]
    fn begin_and_savepoint_queries_are_dropped() {
        let mut dispatcher = dispatcher_with(FakeMetadataProvider::new());
        let (mut chain, collected) = sink();

        let events: Vec<Result<DecodedEvent>> = vec![
            Ok(DecodedEvent::Query(QueryEvent { header: EventHeader::default(), schema: "school".into(), sql: "  begin  ".into() })),
            Ok(DecodedEvent::Query(QueryEvent { header: EventHeader::default(), schema: "school".into(), sql: "SAVEPOINT sp1".into() })),
            Ok(DecodedEvent::Query(QueryEvent { header: EventHeader::default(), schema: "school".into(), sql: "DROP TABLE x".into() })),
        ];

        dispatcher.run(events, &mut chain).unwrap();
        let collected = collected.lock().unwrap();
        assert_eq!(collected.len(), 1);
        assert!(matches!(collected[0], Message::Query { .. }));
    }

    /// A TABLE_MAP rebind of the same id arriving *after* a row event was
    /// buffered for it, but before the closing XID, must not retroactively
    /// change that row's resolved schema/columns — see the buffer-time
    /// snapshot in `BufferedRowEvent`.
    #[test]
    fn mid_transaction_rebind_does_not_affect_already_buffered_rows() {
        let provider = FakeMetadataProvider::new().with_table(1, "school", "buildings", &["id", "name"]);
        provider.set_columns("school", "rooms", &["id", "building_id"]);
        let mut dispatcher = dispatcher_with(provider);
        let (mut chain, collected) = sink();

        let events: Vec<Result<DecodedEvent>> = vec![
            Ok(DecodedEvent::TableMap(TableMapEvent { header: EventHeader::default(), table_id: 1, schema: "school".into(), table: "buildings".into() })),
            Ok(DecodedEvent::Rows(RowsEvent {
                header: EventHeader::default(),
                table_id: 1,
                kind: RowsEventKind::Write { rows: vec![vec![cell(1), cell(2)]] },
            })),
            Ok(DecodedEvent::TableMap(TableMapEvent { header: EventHeader::default(), table_id: 1, schema: "school".into(), table: "rooms".into() })),
            Ok(DecodedEvent::Xid(XidEvent { header: EventHeader::default(), xid: 1 })),
        ];

        dispatcher.run(events, &mut chain).unwrap();

        let collected = collected.lock().unwrap();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].header().table, "buildings");
        match &collected[0] {
            Message::Insert { data, .. } => {
                assert_eq!(data.mapping_notice, "");
                assert!(data.row.contains_key("name"));
                assert!(!data.row.contains_key("building_id"));
            }
            other => panic!("expected Insert, got {other:?}"),
        }
    }

    #[test]
    fn consumer_error_aborts_the_run() {
        let mut dispatcher = dispatcher_with(FakeMetadataProvider::new());
        let mut chain = FilterChain::new().add_sink(|_| Err(Error::Consumer("nope".into())));

        let events: Vec<Result<DecodedEvent>> = vec![Ok(DecodedEvent::Query(QueryEvent {
            header: EventHeader::default(),
            schema: "school".into(),
            sql: "DROP TABLE x".into(),
        }))];

        let err = dispatcher.run(events, &mut chain).unwrap_err();
        assert!(matches!(err, Error::Consumer(_)));
    }
}
