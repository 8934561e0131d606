//! Ordered predicates followed by ordered sinks, mirroring the reference
//! implementation's consumer chain.

use std::collections::HashSet;
use std::io::Write;

use crate::error::{Error, Result};
use crate::message::Message;

type Predicate = Box<dyn Fn(&Message) -> bool>;
type Sink = Box<dyn FnMut(&Message) -> Result<()>>;

/// Trims whitespace and drops empty entries. Idempotent: `clean(clean(x)) ==
/// clean(x)`.
fn clean(values: impl IntoIterator<Item = String>) -> HashSet<String> {
    values.into_iter().map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).collect()
}

/// A message is delivered to the sinks only if every predicate returns true.
#[derive(Default)]
pub struct FilterChain {
    predicates: Vec<Predicate>,
    sinks: Vec<Sink>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a message whose header schema is empty (wildcard) or present
    /// in `schemas`. A cleaned-empty set adds no predicate at all.
    pub fn include_schemas(mut self, schemas: impl IntoIterator<Item = String>) -> Self {
        let set = clean(schemas);
        if set.is_empty() {
            return self;
        }
        self.predicates.push(Box::new(move |message| {
            let schema = &message.header().schema;
            schema.is_empty() || set.contains(schema)
        }));
        self
    }

    /// Symmetric to [`Self::include_schemas`] on `header.table`. The
    /// `"(unknown)"` sentinel used by Query messages is non-empty, so it is
    /// excluded unless explicitly named.
    pub fn include_tables(mut self, tables: impl IntoIterator<Item = String>) -> Self {
        let set = clean(tables);
        if set.is_empty() {
            return self;
        }
        self.predicates.push(Box::new(move |message| {
            let table = &message.header().table;
            table.is_empty() || set.contains(table)
        }));
        self
    }

    pub fn add_sink(mut self, sink: impl FnMut(&Message) -> Result<()> + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Runs a message through every predicate, then every sink in order. The
    /// first sink error aborts and is returned to the caller, which the
    /// dispatcher treats as fatal.
    pub fn consume(&mut self, message: &Message) -> Result<()> {
        if !self.predicates.iter().all(|predicate| predicate(message)) {
            return Ok(());
        }
        for sink in &mut self.sinks {
            sink(message)?;
        }
        Ok(())
    }
}

/// Writes one compact JSON object per message, newline-terminated, to any
/// `Write`. The one concrete sink the ambient CLI front-end wires up by
/// default.
pub fn json_lines_sink<W: Write + 'static>(mut writer: W, pretty: bool) -> impl FnMut(&Message) -> Result<()> {
    move |message| {
        let encoded = if pretty {
            serde_json::to_string_pretty(message)
        } else {
            serde_json::to_string(message)
        }
        .map_err(|e| Error::Consumer(e.to_string()))?;
        writeln!(writer, "{encoded}").map_err(|e| Error::Consumer(e.to_string()))
    }
}
