//! Plan compiler for binary search trees.
//!
//! [`BstAdapter`] owns one tree and narrates every operation on it. It walks
//! the tree before mutating it so that the plan shows the descent a person
//! would trace by hand, then performs the real mutation and closes the plan
//! with a snapshot of the result.

use rustc_hash::FxHashMap;

use super::{
    AnimationStep, Color, ElementId, LinkId, NodeId, Plan, Snapshot,
    StructureAdapter, Value, VisualizerLink, VisualizerNode,
};
use crate::tree::{BinarySearchTree, NodeHandle, TreeNode};

/// Fill used to mark nodes involved in a deletion (`#e74c3c`).
pub const DELETION_COLOR: Color = [0.906, 0.298, 0.235];

/// Plan compiler bound to a single tree.
///
/// Visualization ids are keyed by node identity (arena handle), not value:
/// they are handed out the first time a node is seen and never reused, so
/// re-inserting a deleted value yields a fresh id.
#[derive(Debug, Clone)]
pub struct BstAdapter {
    tree: BinarySearchTree<Value>,
    ids: FxHashMap<NodeHandle, NodeId>,
    next_id: u32,
    deletion_color: Color,
}

impl Default for BstAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl BstAdapter {
    /// Adapter over an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: BinarySearchTree::new(),
            ids: FxHashMap::default(),
            next_id: 0,
            deletion_color: DELETION_COLOR,
        }
    }

    /// Adapter over a tree seeded with `values` in order. Seeding is not
    /// narrated.
    #[must_use]
    pub fn with_values(values: &[Value]) -> Self {
        let mut adapter = Self::new();
        for &value in values {
            let _ = adapter.tree.insert(value);
        }
        adapter
    }

    /// Override the fill used for deletion highlights.
    #[must_use]
    pub fn with_deletion_color(mut self, color: Color) -> Self {
        self.deletion_color = color;
        self
    }

    /// The underlying tree.
    #[must_use]
    pub fn tree(&self) -> &BinarySearchTree<Value> {
        &self.tree
    }

    /// Id already assigned to `handle`, without assigning one.
    #[must_use]
    pub fn id_of(&self, handle: NodeHandle) -> Option<NodeId> {
        self.ids.get(&handle).copied()
    }

    fn node_id(&mut self, handle: NodeHandle) -> NodeId {
        let next_id = &mut self.next_id;
        *self.ids.entry(handle).or_insert_with(|| {
            let id = NodeId(*next_id);
            *next_id += 1;
            id
        })
    }

    fn push_visits(&mut self, plan: &mut Plan, path: &[NodeHandle]) {
        for &handle in path {
            let node = self.node_id(handle);
            plan.push(AnimationStep::Visit { node });
        }
    }

    /// Breadth-first snapshot of the tree, assigning ids to any node that
    /// does not have one yet (parent before children, left before right).
    fn snapshot(&mut self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for handle in self.tree.level_order() {
            let Some((value, left, right)) =
                self.tree.get(handle).map(|n| (n.value, n.left(), n.right()))
            else {
                continue;
            };
            let id = self.node_id(handle);
            snapshot.nodes.push(VisualizerNode::new(id, value));
            for child in [left, right].into_iter().flatten() {
                let child_id = self.node_id(child);
                snapshot.links.push(VisualizerLink::new(id, child_id));
            }
        }
        snapshot
    }

    /// Narrate the two-children case up to (not including) the mutation:
    /// walk to the successor, mark both nodes, then fade the successor's
    /// old edge, hide the cursor, fade the deleted node and move the
    /// successor into its place.
    fn push_promotion(
        &mut self,
        plan: &mut Plan,
        target: NodeHandle,
        target_id: NodeId,
    ) {
        let successor_path = self.tree.successor_path(target);
        self.push_visits(plan, &successor_path);

        let Some(&successor) = successor_path.last() else {
            return;
        };
        let successor_parent = successor_path
            .len()
            .checked_sub(2)
            .and_then(|i| successor_path.get(i).copied())
            .unwrap_or(target);

        let successor_id = self.node_id(successor);
        let parent_id = self.node_id(successor_parent);
        plan.push(AnimationStep::Highlight {
            nodes: vec![target_id, successor_id],
            color: Some(self.deletion_color),
        });
        plan.push(AnimationStep::FadeOut {
            elements: vec![ElementId::Link(LinkId::new(
                parent_id,
                successor_id,
            ))],
        });
        plan.push(AnimationStep::HideVisitor);
        plan.push(AnimationStep::FadeOut {
            elements: vec![ElementId::Node(target_id)],
        });
        plan.push(AnimationStep::MoveNode {
            node: successor_id,
            to: target_id,
        });
    }
}

impl StructureAdapter for BstAdapter {
    fn initial_state(&mut self) -> Snapshot {
        self.snapshot()
    }

    fn insert(&mut self, value: Value) -> Plan {
        let mut plan = Plan::new();
        let path = self.tree.insertion_path(&value);
        self.push_visits(&mut plan, &path);

        let parent = path.last().copied();
        let handle = self.tree.insert(value);
        let new_node = self.node_id(handle);
        let new_link = parent.map(|p| LinkId::new(self.node_id(p), new_node));

        let snapshot = self.snapshot();
        log::debug!(
            "insert {value}: {} visits, new node {new_node}",
            path.len()
        );
        plan.push(AnimationStep::FinalizeInsert {
            snapshot,
            new_node,
            new_link,
        });
        plan
    }

    fn delete(&mut self, value: Value) -> Plan {
        let mut plan = Plan::new();
        let (path, found) = self.tree.search_path(&value);
        self.push_visits(&mut plan, &path);

        let Some(target) = found else {
            log::debug!(
                "delete {value}: not found after {} visits",
                path.len()
            );
            return plan;
        };

        let target_id = self.node_id(target);
        plan.push(AnimationStep::Highlight {
            nodes: vec![target_id],
            color: Some(self.deletion_color),
        });

        if self.tree.get(target).is_some_and(TreeNode::has_two_children) {
            self.push_promotion(&mut plan, target, target_id);
        }

        if let Some(result) = self.tree.delete(&value) {
            log::debug!(
                "delete {value}: removed {target_id}, successor {:?}",
                result
                    .promotion
                    .and_then(|p| self.id_of(p.successor))
            );
        }

        let snapshot = self.snapshot();
        plan.push(AnimationStep::Finalize { snapshot });
        plan
    }

    fn find(&mut self, value: Value) -> Plan {
        let mut plan = Plan::new();
        let (path, found) = self.tree.search_path(&value);
        self.push_visits(&mut plan, &path);
        log::debug!("find {value}: found={}", found.is_some());
        plan
    }
}
