use thiserror::Error;

/// Errors the binlog-to-messages pipeline can fail with.
///
/// Mirrors the error kinds from the design: everything but a catalog lookup
/// miss (which is not an error — see [`crate::metadata::Catalog::lookup`])
/// aborts the parse immediately.
#[derive(Debug, Error)]
pub enum Error {
    #[error("binlog file not found: {0}")]
    InputNotFound(String),

    /// A CLI-facing concern, not one of the five core error kinds: the
    /// configuration file itself is missing or malformed. Kept distinct from
    /// [`Error::InputNotFound`], which is reserved for the binlog file.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("metadata store error: {0}")]
    MetadataStore(String),

    #[error("binlog decoder error: {0}")]
    Decoder(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("consumer rejected message: {0}")]
    Consumer(String),
}

pub type Result<T> = std::result::Result<T, Error>;
