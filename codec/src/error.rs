//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("memory quota exceeded")]
    QuotaExceeded,
    #[error("length overflow")]
    LengthOverflow,
    #[error("bad length: expected {expected}, found {found}")]
    BadLength { expected: usize, found: usize },
    #[error("invalid bool")]
    InvalidBool,
    #[error("invalid utf-8 in string")]
    InvalidUtf8,
    #[error("invalid variant: {0}")]
    InvalidVariant(u8),
}
