//! Error types for rbuf.

use std::fmt;
use std::io;

/// Errors that can occur while reading through a buffered reader.
///
/// End-of-stream is not an error. It is reported in-band as `Ok(0)`,
/// `Ok(None)` or an incomplete [`Line`](crate::Line).
#[derive(Debug)]
pub enum ReadError {
    /// The underlying source reported a failure.
    Io(io::Error),

    /// A delimiter scan consumed `limit` bytes without finding the delimiter.
    LineTooLong {
        /// The configured maximum line length.
        limit: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl ReadError {
    /// Wraps a failed source read.
    pub(crate) fn from_source(e: io::Error) -> Self {
        log::debug!("source read failed: {}", e);
        ReadError::Io(e)
    }

    /// Returns the source failure, if this is one.
    pub fn as_io(&self) -> Option<&io::Error> {
        match self {
            ReadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "io error: {}", e),
            ReadError::LineTooLong { limit } => {
                write!(f, "line too long: no delimiter within {} bytes", limit)
            }
            ReadError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        ReadError::Io(e)
    }
}

impl From<ReadError> for io::Error {
    fn from(e: ReadError) -> Self {
        match e {
            ReadError::Io(e) => e,
            ReadError::LineTooLong { .. } => io::Error::new(io::ErrorKind::InvalidData, e),
            ReadError::InvalidConfig { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}
