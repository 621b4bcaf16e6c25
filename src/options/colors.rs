use serde::{Deserialize, Serialize};

use crate::plan::{Color, DELETION_COLOR};

/// Color palette for highlights and fades.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB fill for nodes involved in a deletion.
    pub deletion: Color,
    /// RGB fill used when a highlight step names no color.
    pub highlight: Color,
    /// RGB canvas background. Faded nodes are camouflaged with it.
    pub background: Color,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            deletion: DELETION_COLOR,
            highlight: [1.0, 0.647, 0.0],
            background: [1.0, 1.0, 1.0],
        }
    }
}
