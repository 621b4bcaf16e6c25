//! Timed playback of animation plans.
//!
//! The [`Sequencer`] interprets a [`Plan`](crate::plan::Plan) step by step
//! against a [`VisualizationState`] that a renderer observes. At most one
//! plan plays at a time.

mod sequencer;
mod staged;
mod state;

pub use sequencer::{plan_duration, Sequencer};
pub use staged::InsertStage;
pub use state::{Cursor, VisualizationState};
