use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Playback timing. Fixed for the lifetime of a running plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
pub struct TimingOptions {
    /// Base delay between steps, in milliseconds. Fades and moves wait two
    /// of these.
    #[schemars(
        title = "Step Delay (ms)",
        range(min = 50, max = 5000),
        extend("step" = 50)
    )]
    pub step_ms: u64,
    /// Gap between a newly inserted node appearing and the start of its
    /// edge reveal, in milliseconds.
    #[schemars(
        title = "Pop-in Delay (ms)",
        range(min = 0, max = 1000),
        extend("step" = 10)
    )]
    pub pop_in_ms: u64,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            step_ms: 500,
            pop_in_ms: 100,
        }
    }
}

impl TimingOptions {
    /// Base step delay.
    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Pop-in sub-delay.
    #[must_use]
    pub fn pop_in(&self) -> Duration {
        Duration::from_millis(self.pop_in_ms)
    }
}
