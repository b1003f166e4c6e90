//! Error types for zero-postgres-cast.

use thiserror::Error;

use crate::context::ClientEncoding;
use crate::oid::Oid;

/// Result type for typecasting operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for zero-postgres-cast.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed numeric literal, out-of-range fixed-width value, or a temporal
    /// value the configured backend cannot represent
    #[error("Parse error: {0}")]
    Parse(String),

    /// Date or time literal that does not scan into the expected components
    #[error("Date parse error: {0}")]
    DateParse(String),

    /// Bytes are not valid under the connection's client encoding
    #[error("Decoding error ({encoding}): {message}")]
    Decoding {
        /// Encoding the bytes were decoded with
        encoding: ClientEncoding,
        /// What went wrong
        message: String,
    },

    /// No cast is registered for the type identifier
    #[error("Unknown type OID: {0}")]
    UnknownType(Oid),

    /// Scratch buffer could not be allocated
    #[error("Allocation failed: {0}")]
    Allocation(String),

    /// Invalid usage (bad option value, field length past the buffer, etc.)
    #[error("Invalid usage: {0}")]
    InvalidUsage(String),

    /// Unsupported feature
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl Error {
    /// Returns true if the caller may carry on with the next value.
    ///
    /// Only a failed allocation is treated as unrecoverable for the row.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Allocation(_))
    }

    /// Get the OID if this is a dispatch miss.
    pub fn unknown_oid(&self) -> Option<Oid> {
        match self {
            Error::UnknownType(oid) => Some(*oid),
            _ => None,
        }
    }

    pub(crate) fn parse(kind: &str, bytes: &[u8], reason: impl core::fmt::Display) -> Self {
        Error::Parse(format!(
            "invalid {kind} {:?}: {reason}",
            String::from_utf8_lossy(bytes)
        ))
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(err: std::collections::TryReserveError) -> Self {
        Error::Allocation(err.to_string())
    }
}
