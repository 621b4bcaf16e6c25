//! Declarative animation plans.
//!
//! A [`Plan`] is the ordered narrative of one tree operation: every node a
//! viewer should see visited, every highlight, fade and move, and finally a
//! self-contained snapshot of the settled tree. Plans carry no timing; the
//! [`Sequencer`](crate::animation::Sequencer) decides how long each step
//! lasts.

mod adapter;
mod compiler;
mod snapshot;

use serde::{Deserialize, Serialize};

pub use adapter::StructureAdapter;
pub use compiler::{BstAdapter, DELETION_COLOR};
pub use snapshot::{
    Color, ElementId, LinkId, NodeId, Snapshot, VisualizerLink, VisualizerNode,
};

/// Scalar key type stored in visualized trees.
pub type Value = i64;

/// One declarative unit of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimationStep {
    /// Move the traversal cursor onto a node.
    Visit {
        /// Node being visited.
        node: NodeId,
    },
    /// Fill the listed nodes, clearing the fill on every other node.
    Highlight {
        /// Nodes to fill.
        nodes: Vec<NodeId>,
        /// Fill color; the sequencer's default highlight when `None`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
    /// Fade nodes and/or edges to invisible.
    FadeOut {
        /// Targets of the fade.
        elements: Vec<ElementId>,
    },
    /// Change the displayed value of a node.
    UpdateValue {
        /// Node to relabel.
        node: NodeId,
        /// New displayed value.
        value: Value,
    },
    /// Move a node onto another node's current position.
    MoveNode {
        /// Node that moves.
        node: NodeId,
        /// Node whose position is the destination.
        to: NodeId,
    },
    /// Retract the traversal cursor.
    HideVisitor,
    /// Replace the whole visual state with a settled snapshot.
    Finalize {
        /// Unpositioned snapshot of the mutated tree.
        snapshot: Snapshot,
    },
    /// Settle after an insertion, staging the new node and edge in.
    FinalizeInsert {
        /// Unpositioned snapshot of the mutated tree.
        snapshot: Snapshot,
        /// The inserted node.
        new_node: NodeId,
        /// Edge from the parent to the inserted node; `None` when the
        /// inserted node became the root.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_link: Option<LinkId>,
    },
}

impl AnimationStep {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Visit { .. } => "visit",
            Self::Highlight { .. } => "highlight",
            Self::FadeOut { .. } => "fade-out",
            Self::UpdateValue { .. } => "update-value",
            Self::MoveNode { .. } => "move-node",
            Self::HideVisitor => "hide-visitor",
            Self::Finalize { .. } => "finalize",
            Self::FinalizeInsert { .. } => "finalize-insert",
        }
    }

    /// Whether this step settles the visual state onto a snapshot.
    #[must_use]
    pub fn is_settle(&self) -> bool {
        matches!(self, Self::Finalize { .. } | Self::FinalizeInsert { .. })
    }
}

/// Ordered sequence of steps describing one completed operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    steps: Vec<AnimationStep>,
}

impl Plan {
    /// Empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn push(&mut self, step: AnimationStep) {
        self.steps.push(step);
    }

    /// Steps in playback order.
    #[must_use]
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the plan ends by settling onto a new snapshot, i.e. the
    /// operation mutated the tree.
    #[must_use]
    pub fn settles(&self) -> bool {
        self.steps.last().is_some_and(AnimationStep::is_settle)
    }

    /// Ids of visited nodes, in order.
    #[must_use]
    pub fn visited(&self) -> Vec<NodeId> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                AnimationStep::Visit { node } => Some(*node),
                _ => None,
            })
            .collect()
    }
}

impl From<Vec<AnimationStep>> for Plan {
    fn from(steps: Vec<AnimationStep>) -> Self {
        Self { steps }
    }
}

impl IntoIterator for Plan {
    type Item = AnimationStep;
    type IntoIter = std::vec::IntoIter<AnimationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a AnimationStep;
    type IntoIter = std::slice::Iter<'a, AnimationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_serialize_with_screaming_tags() {
        let step = AnimationStep::MoveNode {
            node: NodeId(4),
            to: NodeId(0),
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["type"], "MOVE_NODE");
        assert_eq!(json["node"], 4);

        let hide = serde_json::to_value(AnimationStep::HideVisitor).unwrap();
        assert_eq!(hide["type"], "HIDE_VISITOR");
    }

    #[test]
    fn plan_round_trips_as_array() {
        let plan = Plan::from(vec![
            AnimationStep::Visit { node: NodeId(0) },
            AnimationStep::FadeOut {
                elements: vec![ElementId::Link(LinkId::new(
                    NodeId(0),
                    NodeId(1),
                ))],
            },
            AnimationStep::Finalize {
                snapshot: Snapshot::default(),
            },
        ]);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.starts_with('['));
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn settles_only_when_last_step_is_finalize() {
        let mut plan = Plan::new();
        plan.push(AnimationStep::Visit { node: NodeId(0) });
        assert!(!plan.settles());
        plan.push(AnimationStep::Finalize {
            snapshot: Snapshot::default(),
        });
        assert!(plan.settles());
        assert_eq!(plan.visited(), vec![NodeId(0)]);
    }
}
