//! Boundary to the geometric layout collaborator.
//!
//! The core never decides where a node is drawn. Whenever a snapshot
//! arrives (initial state, `FINALIZE`, `FINALIZE_INSERT`) the sequencer asks
//! a [`Layout`] to position it, deriving parent/child structure from the
//! link list alone.

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::options::CanvasOptions;
use crate::plan::{NodeId, Snapshot, Value};

/// Assigns positions to an unpositioned snapshot.
pub trait Layout {
    /// Position every node reachable from the root. Styling fields
    /// (opacity, fill, stroke) pass through untouched; nodes and links not
    /// reachable from the root are dropped.
    fn layout(&self, snapshot: &Snapshot) -> Snapshot;
}

/// Tidy layered layout: depth maps to `y`, in-order rank maps to `x`.
///
/// Left/right is recovered from values, matching the tree's routing rule
/// (a child strictly less than its parent is the left child).
#[derive(Debug, Clone, Default)]
pub struct LayeredLayout {
    canvas: CanvasOptions,
}

impl LayeredLayout {
    /// Layout filling `canvas` minus its margins.
    #[must_use]
    pub fn new(canvas: CanvasOptions) -> Self {
        Self { canvas }
    }
}

#[derive(Default)]
struct Children {
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Layout for LayeredLayout {
    fn layout(&self, snapshot: &Snapshot) -> Snapshot {
        let values: FxHashMap<NodeId, Value> =
            snapshot.nodes.iter().map(|n| (n.id, n.value)).collect();
        let mut children: FxHashMap<NodeId, Children> = FxHashMap::default();
        for link in &snapshot.links {
            let (Some(parent), Some(child)) =
                (values.get(&link.source), values.get(&link.target))
            else {
                continue;
            };
            let slot = children.entry(link.source).or_default();
            if child < parent {
                slot.left = Some(link.target);
            } else {
                slot.right = Some(link.target);
            }
        }

        let Some(root) = snapshot
            .nodes
            .iter()
            .map(|n| n.id)
            .find(|id| snapshot.parent_of(*id).is_none())
        else {
            return Snapshot::default();
        };

        // In-order walk recording (rank, depth) per reachable node.
        let mut placed: FxHashMap<NodeId, (usize, usize)> =
            FxHashMap::default();
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        let mut current = Some((root, 0));
        let mut max_depth = 0;
        loop {
            while let Some((id, depth)) = current {
                stack.push((id, depth));
                current = children
                    .get(&id)
                    .and_then(|c| c.left)
                    .map(|l| (l, depth + 1));
            }
            let Some((id, depth)) = stack.pop() else { break };
            if placed.contains_key(&id) {
                break;
            }
            let rank = placed.len();
            let _ = placed.insert(id, (rank, depth));
            max_depth = max_depth.max(depth);
            current = children
                .get(&id)
                .and_then(|c| c.right)
                .map(|r| (r, depth + 1));
        }

        let inner = Vec2::new(
            (self.canvas.width - 2.0 * self.canvas.margin).max(0.0),
            (self.canvas.height - 2.0 * self.canvas.margin).max(0.0),
        );
        let count = placed.len() as f32;
        let position = |rank: usize, depth: usize| {
            let x = (rank as f32 + 0.5) / count * inner.x;
            let y = if max_depth == 0 {
                0.0
            } else {
                depth as f32 / max_depth as f32 * inner.y
            };
            Vec2::new(x, y) + Vec2::splat(self.canvas.margin)
        };

        let nodes = snapshot
            .nodes
            .iter()
            .filter_map(|n| {
                let &(rank, depth) = placed.get(&n.id)?;
                let mut node = n.clone();
                node.position = position(rank, depth);
                Some(node)
            })
            .collect();
        let links = snapshot
            .links
            .iter()
            .filter(|l| {
                placed.contains_key(&l.source) && placed.contains_key(&l.target)
            })
            .cloned()
            .collect();
        Snapshot { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{BstAdapter, StructureAdapter};

    fn laid_out(values: &[i64]) -> Snapshot {
        let mut adapter = BstAdapter::with_values(values);
        LayeredLayout::default().layout(&adapter.initial_state())
    }

    fn position_of(snapshot: &Snapshot, value: i64) -> Vec2 {
        snapshot
            .nodes
            .iter()
            .find(|n| n.value == value)
            .map(|n| n.position)
            .unwrap()
    }

    #[test]
    fn empty_snapshot_stays_empty() {
        let out = LayeredLayout::default().layout(&Snapshot::default());
        assert!(out.nodes.is_empty());
        assert!(out.links.is_empty());
    }

    #[test]
    fn single_node_sits_at_top_center() {
        let out = laid_out(&[1]);
        let canvas = CanvasOptions::default();
        assert_eq!(
            out.nodes[0].position,
            Vec2::new(canvas.width / 2.0, canvas.margin)
        );
    }

    #[test]
    fn x_follows_value_order_and_y_follows_depth() {
        let out = laid_out(&[10, 5, 15, 3, 7, 12, 18]);
        let xs: Vec<f32> = [3, 5, 7, 10, 12, 15, 18]
            .iter()
            .map(|v| position_of(&out, *v).x)
            .collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!(position_of(&out, 10).y < position_of(&out, 5).y);
        assert_eq!(position_of(&out, 5).y, position_of(&out, 15).y);
        let canvas = CanvasOptions::default();
        assert_eq!(position_of(&out, 3).y, canvas.height - canvas.margin);
        assert_eq!(out.links.len(), 6);
    }

    #[test]
    fn styling_passes_through() {
        let mut adapter = BstAdapter::with_values(&[2, 1]);
        let mut snapshot = adapter.initial_state();
        snapshot.nodes[1].opacity = Some(0.0);
        let out = LayeredLayout::default().layout(&snapshot);
        assert_eq!(out.nodes[1].opacity, Some(0.0));
    }

    #[test]
    fn unreachable_nodes_are_dropped() {
        let mut adapter = BstAdapter::with_values(&[2, 1]);
        let mut snapshot = adapter.initial_state();
        snapshot.links.clear();
        let out = LayeredLayout::default().layout(&snapshot);
        assert_eq!(out.nodes.len(), 1);
        assert_eq!(out.nodes[0].value, 2);
    }
}
