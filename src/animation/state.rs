//! Observable visualization state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::plan::{
    Color, LinkId, NodeId, Snapshot, VisualizerLink, VisualizerNode,
};

/// The traversal cursor ("visitor") that hops between nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Position of the node last visited.
    pub position: Vec2,
    /// Whether the cursor is drawn.
    pub visible: bool,
}

/// Everything a renderer needs to draw one frame: positioned nodes, edges
/// and the cursor. Only the [`Sequencer`](super::Sequencer) mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationState {
    pub(crate) nodes: Vec<VisualizerNode>,
    pub(crate) links: Vec<VisualizerLink>,
    pub(crate) cursor: Cursor,
}

impl VisualizationState {
    /// Positioned nodes.
    #[must_use]
    pub fn nodes(&self) -> &[VisualizerNode] {
        &self.nodes
    }

    /// Edges.
    #[must_use]
    pub fn links(&self) -> &[VisualizerLink] {
        &self.links
    }

    /// Traversal cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&VisualizerNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up an edge.
    #[must_use]
    pub fn link(&self, id: LinkId) -> Option<&VisualizerLink> {
        self.links.iter().find(|l| l.id() == id)
    }

    pub(crate) fn node_mut(
        &mut self,
        id: NodeId,
    ) -> Option<&mut VisualizerNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub(crate) fn link_mut(
        &mut self,
        id: LinkId,
    ) -> Option<&mut VisualizerLink> {
        self.links.iter_mut().find(|l| l.id() == id)
    }

    /// Current position of a node.
    #[must_use]
    pub fn position_of(&self, id: NodeId) -> Option<Vec2> {
        self.node(id).map(|n| n.position)
    }

    /// Take a laid-out snapshot wholesale.
    pub(crate) fn replace(&mut self, snapshot: Snapshot) {
        self.nodes = snapshot.nodes;
        self.links = snapshot.links;
    }

    /// Fill `ids` with `color` and clear the fill everywhere else.
    pub(crate) fn highlight(&mut self, ids: &[NodeId], color: Color) {
        for node in &mut self.nodes {
            node.fill = ids.contains(&node.id).then_some(color);
        }
    }

    /// Drop highlight fills and stroke overrides from every node.
    pub(crate) fn clear_styles(&mut self) {
        for node in &mut self.nodes {
            node.fill = None;
            node.stroke = None;
        }
    }

    /// Move existing nodes to the positions (and values) of a laid-out
    /// snapshot. Nodes the snapshot does not know keep their state, and
    /// nodes only the snapshot knows are not added.
    pub(crate) fn merge_positions(&mut self, laid_out: &Snapshot) {
        for node in &mut self.nodes {
            if let Some(target) = laid_out.node(node.id) {
                node.position = target.position;
                node.value = target.value;
            }
        }
    }
}
