//! Error types for the vslot library.
//!
//! One error hierarchy covers record ingestion, configuration, and
//! allocation, using `thiserror`. Ordering mistakes around finalize are
//! not represented here: the consuming [`finalize`] signature makes them
//! compile errors instead (see the `device` module).
//!
//! [`finalize`]: crate::DeviceRegistry::finalize

use thiserror::Error;

use crate::engine::PoolKind;

/// Result type alias for operations that may fail with a vslot error.
///
/// # Examples
///
/// ```
/// use vslot::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(100)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the vslot library.
#[derive(Debug, Error)]
pub enum Error {
    /// An out-of-range VLAN identifier was provided.
    #[error("invalid VLAN id {value}: {reason}")]
    InvalidVlan {
        /// The invalid VLAN value.
        value: u16,
        /// The reason the VLAN id is invalid.
        reason: String,
    },

    /// A row parsed as CSV but could not be typed.
    #[error("malformed {record} record: {message}")]
    MalformedRecord {
        /// Which record shape was being read.
        record: &'static str,
        /// What was wrong with the row.
        message: String,
    },

    /// Delimited input could not be parsed at all.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration or input value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// No device has any remaining assignment of the requested kind.
    ///
    /// Fatal for the named request; there is no retry and no partial
    /// reservation.
    #[error("no {kind} assignment available anywhere for request {request_id}")]
    PoolExhausted {
        /// The request that could not be satisfied.
        request_id: u32,
        /// The pool kind the request drew from.
        kind: PoolKind,
    },
}

impl From<crate::assignment::InvalidVlanError> for Error {
    fn from(err: crate::assignment::InvalidVlanError) -> Self {
        Self::InvalidVlan {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl Error {
    /// Check if the error is a pool exhaustion.
    ///
    /// # Examples
    ///
    /// ```
    /// use vslot::{Error, PoolKind};
    ///
    /// let err = Error::PoolExhausted { request_id: 7, kind: PoolKind::Singular };
    /// assert!(err.is_exhausted());
    /// ```
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::PoolExhausted { .. })
    }
}
