//! Error types for the CSemVer core library
//!
//! This module defines the error handling surface for the library,
//! using thiserror for ergonomic error definitions. Range-syntax parsing
//! does not go through these errors: the bridges report malformed input
//! through [`ParseResult`](crate::bound::ParseResult) instead, so that
//! untrusted range expressions never raise.

use thiserror::Error;

/// Main error type for CSemVer operations
#[derive(Error, Debug)]
pub enum Error {
    /// A version string that does not parse as SemVer
    #[error("Invalid version: {message}")]
    InvalidVersion { message: String },

    /// A valid SemVer version that falls outside the CSemVer grammar
    #[error("Not a CSemVer version: {message}")]
    NotCSemVer { message: String },

    /// Ordinal 0 denotes "not a version" rather than a decodable value
    #[error("Ordinal 0 does not denote a version")]
    ZeroOrdinal,

    /// Ordinal above the last representable version
    #[error("Ordinal {ordinal} is out of range (maximum is {max})")]
    OrdinalOutOfRange { ordinal: u64, max: u64 },

    /// Build metadata with characters outside [0-9A-Za-z.-]
    #[error("Invalid build metadata: {metadata:?}")]
    InvalidBuildMetadata { metadata: String },

    /// A bound expression rejected by one of the range-syntax bridges
    #[error("Invalid version bound: {message}")]
    InvalidBound { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_version(message: impl Into<String>) -> Self {
        Error::InvalidVersion {
            message: message.into(),
        }
    }

    pub(crate) fn not_csemver(message: impl Into<String>) -> Self {
        Error::NotCSemVer {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_version("expected digit");
        assert_eq!(err.to_string(), "Invalid version: expected digit");
    }

    #[test]
    fn test_ordinal_errors_are_distinct() {
        let zero = Error::ZeroOrdinal;
        let range = Error::OrdinalOutOfRange {
            ordinal: u64::MAX,
            max: crate::csver::VERY_LAST_ORDINAL,
        };
        assert_ne!(zero.to_string(), range.to_string());
    }
}
