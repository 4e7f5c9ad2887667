//! Error taxonomy for the repository engine and its storage adapters.

use thiserror::Error;

/// Failure of a storage adapter or of the collection codec.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// Escape hatch for adapters over backends not known to this crate.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Error surfaced by the repository operations.
///
/// `InvalidArgument` and `Validation` are detected before any write and
/// leave the store untouched. A `Store` error raised by a cascade step can
/// arrive after the primary record was persisted; see the crate docs.
#[derive(Error, Debug)]
pub enum CoaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoaError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        CoaError::Validation(msg.into())
    }
}
