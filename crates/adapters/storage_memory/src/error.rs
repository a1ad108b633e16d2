//! Storage-specific error type.

use std::cell::{BorrowError, BorrowMutError};

use dwellhub_domain::error::DwellHubError;

/// Errors originating from the in-memory storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store is being written elsewhere.
    #[error("store is busy")]
    Busy(#[from] BorrowError),

    /// The store is being read or written elsewhere.
    #[error("store is locked")]
    Locked(#[from] BorrowMutError),
}

impl From<StorageError> for DwellHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
