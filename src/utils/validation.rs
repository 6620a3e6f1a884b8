//! Input validation primitives.
//!
//! Argument values are checked as given: regex sources are whitespace
//! sensitive, so nothing here trims.

use crate::error::{Error, Result};

/// Require a command-line argument to be non-empty.
pub fn require_arg<'a>(value: &'a str, arg: &str) -> Result<&'a str> {
    if value.is_empty() {
        Err(Error::validation_missing_argument(vec![arg.to_string()]))
    } else {
        Ok(value)
    }
}

/// Require a command-line argument to be non-empty, with a hint for resolution.
pub fn require_arg_with_hint<'a>(value: &'a str, arg: &str, hint: &str) -> Result<&'a str> {
    require_arg(value, arg).map_err(|e| e.with_hint(hint))
}
