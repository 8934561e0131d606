use thiserror::Error;

/// Errors shared by the config/logging plumbing in this crate.
///
/// Domain errors for the binlog pipeline itself live in `binlog::error`;
/// this enum only covers the ambient concerns `common` owns.
#[derive(Debug, Error)]
pub enum ReError {
    #[error("failed to read config file: {0}")]
    ConfigFileReadErr(String),

    #[error("failed to parse config file: {0}")]
    ConfigFileParseErr(String),
}

pub type CResult<T> = Result<T, ReError>;
