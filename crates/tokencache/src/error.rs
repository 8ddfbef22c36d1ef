//! Errors from cache persistence.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("cache decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("cache file has an unrecognized header")]
    BadMagic,
    #[error("cache file version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}
