//! Visualization snapshot types shared by the compiler, the sequencer and
//! the layout collaborator.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Value;

/// RGB color in `[0, 1]`.
pub type Color = [f32; 3];

/// Opaque visualization id of a tree node, rendered as `node-N`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Identity of a directed parent→child edge, rendered as
/// `"{source}->{target}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId {
    /// Parent end.
    pub source: NodeId,
    /// Child end.
    pub target: NodeId,
}

impl LinkId {
    /// Edge from `source` to `target`.
    #[must_use]
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Anything a `FADE_OUT` step can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementId {
    /// A node.
    Node(NodeId),
    /// An edge.
    Link(LinkId),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => id.fmt(f),
            Self::Link(id) => id.fmt(f),
        }
    }
}

/// A node as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerNode {
    /// Stable visualization id.
    pub id: NodeId,
    /// Displayed value.
    pub value: Value,
    /// Position assigned by the layout collaborator. The compiler always
    /// emits `(0, 0)`.
    pub position: Vec2,
    /// `None` means fully visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Highlight fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    /// Outline color override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
}

impl VisualizerNode {
    /// Unpositioned node with default styling.
    #[must_use]
    pub fn new(id: NodeId, value: Value) -> Self {
        Self {
            id,
            value,
            position: Vec2::ZERO,
            opacity: None,
            fill: None,
            stroke: None,
        }
    }

    /// Whether the node has been faded to nothing.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.opacity == Some(0.0)
    }
}

/// An edge as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerLink {
    /// Parent end.
    pub source: NodeId,
    /// Child end.
    pub target: NodeId,
    /// `None` means fully visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl VisualizerLink {
    /// Visible edge from `source` to `target`.
    #[must_use]
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            opacity: None,
        }
    }

    /// Edge identity.
    #[must_use]
    pub fn id(&self) -> LinkId {
        LinkId::new(self.source, self.target)
    }
}

/// Self-contained `{nodes, links}` description of the tree at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Nodes in breadth-first order.
    pub nodes: Vec<VisualizerNode>,
    /// Parent→child edges.
    pub links: Vec<VisualizerLink>,
}

impl Snapshot {
    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&VisualizerNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether an edge with this identity exists.
    #[must_use]
    pub fn has_link(&self, id: LinkId) -> bool {
        self.links.iter().any(|l| l.id() == id)
    }

    /// Parent of `id`, derived from the link list.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.links.iter().find(|l| l.target == id).map(|l| l.source)
    }
}
