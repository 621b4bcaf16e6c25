//! Crate-level error types.
//!
//! A value missing from the tree is never an error: plans describe failed
//! searches. Errors only arise at the request boundary and around options
//! files.

use std::fmt;

/// Errors produced by the sapling crate.
#[derive(Debug)]
pub enum SaplingError {
    /// A plan is still playing; the request was dropped, not queued.
    Busy,
    /// Request text was empty, fractional or not an integer.
    InvalidInput(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for SaplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "an animation is already playing"),
            Self::InvalidInput(input) => {
                write!(f, "invalid input {input:?}: expected an integer")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SaplingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaplingError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
