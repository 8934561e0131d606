use serde::{Deserialize, Serialize};

/// A single row cell as handed over by the external decoder.
///
/// The core never interprets these beyond moving them from a raw row tuple
/// to a named slot in the emitted message — see "Opaque column values" in
/// the design notes. `Deserialize` lets a CLI front-end read fixture event
/// streams standing in for a real decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Null,
    Integer(i64),
    UInteger(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}
