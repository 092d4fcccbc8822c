//! Fidelity-tracking parse envelope
//!
//! Every range-syntax entry point returns a [`ParseResult`] instead of
//! raising: malformed input becomes an error message, and translations the
//! bound triple cannot express exactly are performed anyway and flagged
//! through `is_approximated` / `fourth_part_lost`, so callers decide
//! whether the loss of fidelity is acceptable.

use crate::error::{Error, Result};

/// Outcome of parsing a range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<T> {
    result: Option<T>,
    error: Option<String>,
    /// The parsed expression denoted a set the bound triple cannot express
    /// exactly; the result is the documented approximation.
    pub is_approximated: bool,
    /// A legacy 4-component version appeared in the expression and its
    /// trailing component was discarded.
    pub fourth_part_lost: bool,
}

impl<T> ParseResult<T> {
    pub fn ok(result: T) -> ParseResult<T> {
        ParseResult {
            result: Some(result),
            error: None,
            is_approximated: false,
            fourth_part_lost: false,
        }
    }

    pub fn err(message: impl Into<String>) -> ParseResult<T> {
        ParseResult {
            result: None,
            error: Some(message.into()),
            is_approximated: false,
            fourth_part_lost: false,
        }
    }

    pub fn approximated(mut self) -> ParseResult<T> {
        self.is_approximated = true;
        self
    }

    pub fn with_fourth_part_lost(mut self, lost: bool) -> ParseResult<T> {
        self.fourth_part_lost |= lost;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The asserting tier: unwraps the result or converts the recorded
    /// message into [`Error::InvalidBound`]. For callers that have already
    /// guaranteed validity.
    pub fn into_value(self) -> Result<T> {
        match self.result {
            Some(result) => Ok(result),
            None => Err(Error::InvalidBound {
                message: self
                    .error
                    .unwrap_or_else(|| "invalid range expression".to_string()),
            }),
        }
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        ParseResult {
            result: self.result.map(f),
            error: self.error,
            is_approximated: self.is_approximated,
            fourth_part_lost: self.fourth_part_lost,
        }
    }
}
