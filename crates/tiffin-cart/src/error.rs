//! # Cart Store Error Types

use thiserror::Error;
use tiffin_core::CoreError;

/// Errors raised by cart store operations.
///
/// Load-time problems never appear here: a missing or corrupt document is
/// recovered to an empty cart. These variants cover mutations that violate
/// a cart rule or a persistence write that fails afterwards.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage write or delete failed.
    #[error("cart storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// The cart could not be serialized for persistence.
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A cart or pricing rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for cart store operations.
pub type StoreResult<T> = Result<T, StoreError>;
