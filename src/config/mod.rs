//! Configuration for buffered reading.
//!
//! - [`ReaderConfig`] - Buffer capacity and delimiter scan limit
//!
//! # Example
//!
//! ```
//! use rbuf::ReaderConfig;
//!
//! // 16 KiB window, refuse lines longer than 1 MiB
//! let config = ReaderConfig::default()
//!     .with_capacity(16 * 1024)
//!     .with_max_line_len(1024 * 1024);
//!
//! config.validate()?;
//! # Ok::<(), rbuf::ReadError>(())
//! ```

use crate::error::ReadError;

/// Default buffer capacity (4 KiB).
///
/// Substituted whenever a capacity of zero is requested.
pub const DEFAULT_CAPACITY: usize = 4 * 1024;

/// Configuration for a buffered reader.
///
/// `ReaderConfig` controls the size of the fixed internal window and an
/// optional cap on how many bytes a delimiter scan may accumulate.
///
/// # Capacity
///
/// The capacity is fixed for the lifetime of the reader. A requested capacity
/// of `0` is replaced by [`DEFAULT_CAPACITY`]; [`capacity()`](Self::capacity)
/// never returns zero.
///
/// # Line limit
///
/// Without a limit, a delimiter scan accumulates until the delimiter or the
/// end of the stream, however much input that is. Callers reading from
/// untrusted peers should set [`with_max_line_len`](Self::with_max_line_len).
///
/// # Example
///
/// ```
/// use rbuf::{ReaderConfig, DEFAULT_CAPACITY};
///
/// let config = ReaderConfig::default();
/// assert_eq!(config.capacity(), DEFAULT_CAPACITY);
/// assert_eq!(config.max_line_len(), None);
///
/// // Zero falls back to the default
/// let config = ReaderConfig::default().with_capacity(0);
/// assert_eq!(config.capacity(), DEFAULT_CAPACITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReaderConfig {
    /// Requested window size in bytes; `0` means default.
    capacity: usize,

    /// Maximum bytes a delimiter scan may accumulate.
    max_line_len: Option<usize>,
}

impl ReaderConfig {
    /// Creates a configuration with the given capacity and no line limit.
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_line_len: None,
        }
    }

    /// Sets the buffer capacity. `0` selects [`DEFAULT_CAPACITY`].
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Caps the number of bytes a delimiter scan may accumulate.
    pub fn with_max_line_len(mut self, limit: usize) -> Self {
        self.max_line_len = Some(limit);
        self
    }

    /// Removes any line limit.
    pub fn without_max_line_len(mut self) -> Self {
        self.max_line_len = None;
        self
    }

    /// Returns the effective buffer capacity (never zero).
    pub fn capacity(&self) -> usize {
        if self.capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            self.capacity
        }
    }

    /// Returns the line limit, if any.
    pub fn max_line_len(&self) -> Option<usize> {
        self.max_line_len
    }

    /// Validates the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::InvalidConfig`] if the line limit is zero.
    pub fn validate(&self) -> Result<(), ReadError> {
        if self.max_line_len == Some(0) {
            return Err(ReadError::InvalidConfig {
                message: "max_line_len must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl From<Option<usize>> for ReaderConfig {
    fn from(capacity: Option<usize>) -> Self {
        Self::new(capacity.unwrap_or(DEFAULT_CAPACITY))
    }
}
