//! Request validation at the boundary.
//!
//! The tree core assumes a valid integer; anything else is turned away
//! here before a plan is ever compiled.

use crate::error::SaplingError;
use crate::plan::Value;

/// Parse a user-entered value. Rejects empty input, fractional numbers
/// (anything containing `.`) and non-integers.
pub fn parse_value(input: &str) -> Result<Value, SaplingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains('.') {
        return Err(SaplingError::InvalidInput(input.to_owned()));
    }
    trimmed
        .parse()
        .map_err(|_| SaplingError::InvalidInput(input.to_owned()))
}
