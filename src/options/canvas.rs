use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Canvas", inline)]
#[serde(default)]
/// Drawing area handed to the layout collaborator.
pub struct CanvasOptions {
    /// Canvas width in pixels.
    #[schemars(
        title = "Width",
        range(min = 100.0, max = 4000.0),
        extend("step" = 10.0)
    )]
    pub width: f32,
    /// Canvas height in pixels.
    #[schemars(
        title = "Height",
        range(min = 100.0, max = 4000.0),
        extend("step" = 10.0)
    )]
    pub height: f32,
    /// Blank border on every side.
    #[schemars(
        title = "Margin",
        range(min = 0.0, max = 200.0),
        extend("step" = 5.0)
    )]
    pub margin: f32,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin: 50.0,
        }
    }
}
