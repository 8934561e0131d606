//! Reconstructs a logical change-data-capture stream from an already
//! decoded MySQL/MariaDB row-based binlog event sequence.
//!
//! This crate does not decode binlog bytes itself — it consumes a stream of
//! [`event::DecodedEvent`] values produced by an external decoder and turns
//! them into a filtered stream of [`message::Message`] values. See
//! [`dispatcher::Dispatcher`] for the entry point.

pub mod buffer;
pub mod converter;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod filter;
pub mod message;
pub mod metadata;
pub mod testing;
pub mod value;

pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use message::Message;
