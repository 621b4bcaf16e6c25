//! The visualizer's complete request vocabulary.
//!
//! Every user-facing operation, whether typed into a text field, passed on
//! a command line or issued programmatically, is a [`TreeCommand`].
//! Consumers construct commands and pass them to
//! [`Visualizer::execute`](super::Visualizer::execute).

use std::fmt;
use std::str::FromStr;

use super::input::parse_value;
use crate::error::SaplingError;
use crate::plan::Value;

/// A discrete operation on the visualized tree.
///
/// ```ignore
/// visualizer.execute(TreeCommand::Insert(8), now)?;
/// visualizer.execute("delete:10".parse()?, now)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeCommand {
    /// Insert a value.
    Insert(Value),
    /// Delete the first node holding a value.
    Delete(Value),
    /// Search for a value without mutating the tree.
    Find(Value),
}

impl TreeCommand {
    /// The value the command operates on.
    #[must_use]
    pub fn value(self) -> Value {
        match self {
            Self::Insert(v) | Self::Delete(v) | Self::Find(v) => v,
        }
    }
}

impl fmt::Display for TreeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(v) => write!(f, "insert:{v}"),
            Self::Delete(v) => write!(f, "delete:{v}"),
            Self::Find(v) => write!(f, "find:{v}"),
        }
    }
}

/// Accepts `verb:value` or `verb value`, verb case-insensitive.
impl FromStr for TreeCommand {
    type Err = SaplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (verb, value) = trimmed
            .split_once(':')
            .or_else(|| trimmed.split_once(char::is_whitespace))
            .ok_or_else(|| SaplingError::InvalidInput(s.to_owned()))?;
        let value = parse_value(value)?;
        match verb.trim().to_ascii_lowercase().as_str() {
            "insert" | "add" => Ok(Self::Insert(value)),
            "delete" | "remove" => Ok(Self::Delete(value)),
            "find" | "search" => Ok(Self::Find(value)),
            _ => Err(SaplingError::InvalidInput(s.to_owned())),
        }
    }
}
