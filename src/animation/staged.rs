//! Staged reveal of a newly inserted node.
//!
//! `FINALIZE_INSERT` is the only step with its own internal timing. On
//! entry the existing nodes glide to their new layout; then, relative to
//! entry:
//!
//! | offset            | transition                                   |
//! |-------------------|----------------------------------------------|
//! | `step`            | settle onto the new layout, new node + edge hidden |
//! | `step + pop_in`   | new node visible                             |
//! | `2 * step`        | new edge visible, plan may finish            |

use std::collections::VecDeque;

use web_time::{Duration, Instant};

use super::state::VisualizationState;
use crate::options::TimingOptions;
use crate::plan::{AnimationStep, LinkId, NodeId, Snapshot};

/// Sub-state of a running `FINALIZE_INSERT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStage {
    /// Waiting to swap in the final layout with the new elements hidden.
    Hide,
    /// Waiting to show the new node.
    RevealNode,
    /// Waiting to show the new edge.
    RevealEdge,
}

impl InsertStage {
    /// Offset of this stage's transition from the step's entry.
    #[must_use]
    pub fn offset(self, timing: &TimingOptions) -> Duration {
        let step = timing.step();
        match self {
            Self::Hide => step,
            // Never let the node reveal overtake the edge reveal.
            Self::RevealNode => (step + timing.pop_in()).min(step * 2),
            Self::RevealEdge => step * 2,
        }
    }
}

/// A `FINALIZE_INSERT` in flight, plus whatever followed it in the plan.
#[derive(Debug, Clone)]
pub(crate) struct StagedInsert {
    entered: Instant,
    stage: InsertStage,
    laid_out: Snapshot,
    new_node: NodeId,
    new_link: Option<LinkId>,
    rest: VecDeque<AnimationStep>,
}

impl StagedInsert {
    /// Run the entry transition and arm the first stage.
    pub(crate) fn enter(
        state: &mut VisualizationState,
        laid_out: Snapshot,
        new_node: NodeId,
        new_link: Option<LinkId>,
        rest: VecDeque<AnimationStep>,
        now: Instant,
    ) -> Self {
        state.cursor.visible = false;
        state.merge_positions(&laid_out);
        Self {
            entered: now,
            stage: InsertStage::Hide,
            laid_out,
            new_node,
            new_link,
            rest,
        }
    }

    pub(crate) fn stage(&self) -> InsertStage {
        self.stage
    }

    pub(crate) fn due(&self, timing: &TimingOptions) -> Instant {
        self.entered + self.stage.offset(timing)
    }

    /// Apply the armed stage's transition. Returns the remaining plan steps
    /// once the last stage has run.
    pub(crate) fn advance(
        &mut self,
        state: &mut VisualizationState,
    ) -> Option<VecDeque<AnimationStep>> {
        match self.stage {
            InsertStage::Hide => {
                state.replace(self.laid_out.clone());
                if let Some(node) = state.node_mut(self.new_node) {
                    node.opacity = Some(0.0);
                }
                let new_link = self.new_link;
                if let Some(link) = new_link.and_then(|id| state.link_mut(id)) {
                    link.opacity = Some(0.0);
                }
                self.stage = InsertStage::RevealNode;
                None
            }
            InsertStage::RevealNode => {
                if let Some(node) = state.node_mut(self.new_node) {
                    node.opacity = Some(1.0);
                }
                self.stage = InsertStage::RevealEdge;
                None
            }
            InsertStage::RevealEdge => {
                let new_link = self.new_link;
                if let Some(link) = new_link.and_then(|id| state.link_mut(id)) {
                    link.opacity = Some(1.0);
                }
                Some(std::mem::take(&mut self.rest))
            }
        }
    }
}
