//! # Store Errors

use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be serialized or parsed.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
