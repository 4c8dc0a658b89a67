//! Arena-backed storage for the scene tree.
//!
//! Nodes are addressed by [`NodeId`] handles into a slot vector. Children
//! are owned lists of handles; the parent back-reference is a plain handle
//! used only for traversal context, never ownership, so the tree stays a
//! strict forest with no cycles.

use std::any::Any;

use smallvec::SmallVec;

use crate::math::vec3d::Point;
use crate::scene::area2d::Area2D;
use crate::scene::node::{Node, NodeKind, Script};

/// A stable handle to a mounted node.
///
/// Slots are reused after removal, but every removal bumps the slot's
/// generation, so a handle into a removed subtree stays dead instead of
/// aliasing whatever node lands in the slot next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

type ChildList = SmallVec<[NodeId; 4]>;

/// A node as stored in the tree: the prototype fields plus id-based links.
pub struct TreeNode {
    pub tag: String,
    pub groups: Vec<String>,
    pub kind: NodeKind,
    children: ChildList,
    parent: Option<NodeId>,
}

impl TreeNode {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    pub fn position(&self) -> Option<Point> {
        self.kind.position()
    }

    /// Move a positioned node. No-op for nodes without a transform.
    pub fn set_position(&mut self, position: Point) {
        if let Some(transform) = self.kind.transform_mut() {
            transform.position = position;
        }
    }

    /// Rotate the node around its pivot by `degrees`. Polygons rotate their
    /// vertices; every other positioned kind rotates its position.
    pub fn rotate(&mut self, degrees: f64) {
        match &mut self.kind {
            NodeKind::Polygon(polygon) => polygon.rotate(degrees),
            kind => {
                if let Some(transform) = kind.transform_mut() {
                    transform.rotate(degrees);
                }
            }
        }
    }

    /// Rotate the node until its accumulated angle is `degrees`.
    pub fn set_rotation(&mut self, degrees: f64) {
        match &mut self.kind {
            NodeKind::Polygon(polygon) => polygon.set_rotation(degrees),
            kind => {
                if let Some(transform) = kind.transform_mut() {
                    transform.set_rotation(degrees);
                }
            }
        }
    }

    /// Downcast the node's script to a concrete type.
    pub fn script_mut<T: Script>(&mut self) -> Option<&mut T> {
        match &mut self.kind {
            NodeKind::Script(script) => {
                let any: &mut dyn Any = script.as_mut();
                any.downcast_mut::<T>()
            }
            _ => None,
        }
    }

    pub fn script_ref<T: Script>(&self) -> Option<&T> {
        match &self.kind {
            NodeKind::Script(script) => {
                let any: &dyn Any = script.as_ref();
                any.downcast_ref::<T>()
            }
            _ => None,
        }
    }

    /// The node's area trigger, when it is one.
    pub fn area_ref(&self) -> Option<&Area2D> {
        match &self.kind {
            NodeKind::Area(area) => Some(area),
            _ => None,
        }
    }

    pub fn area_mut(&mut self) -> Option<&mut Area2D> {
        match &mut self.kind {
            NodeKind::Area(area) => Some(area),
            _ => None,
        }
    }
}

struct Slot {
    generation: u32,
    node: Option<TreeNode>,
}

/// The scene tree: an arena of nodes plus the root handle.
#[derive(Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: Option<NodeId>,
    live: usize,
}

impl Tree {
    pub fn new() -> Self {
        Tree::default()
    }

    /// Number of mounted nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Shortcut for a node's position.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.get(id)?.position()
    }

    /// Mount a prototype as the root of an empty tree.
    ///
    /// Runs the whole subtree's `build` phase: every child declared on the
    /// prototype or produced by a script's `build` is mounted before this
    /// returns, so the tree is fully built before anyone's `ready`.
    pub fn mount_root(&mut self, node: Node) -> NodeId {
        debug_assert!(self.root.is_none(), "tree already has a root");
        let id = self.mount_at(node, None);
        self.root = Some(id);
        id
    }

    /// Mount a prototype under an existing parent. Returns `None` when the
    /// parent is not mounted.
    pub fn mount(&mut self, node: Node, parent: NodeId) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.mount_at(node, Some(parent));
        Some(id)
    }

    fn mount_at(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        if node.tag.is_empty() {
            node.tag = node.kind.type_name().to_string();
        }
        let mut kind = node.kind;
        let built = kind.build();

        let id = self.alloc(TreeNode {
            tag: node.tag,
            groups: node.groups,
            kind,
            children: ChildList::new(),
            parent,
        });
        if let Some(parent) = parent {
            if let Some(parent_node) = self.get_mut(parent) {
                parent_node.children.push(id);
            }
        }
        for child in node.children.into_iter().chain(built) {
            self.mount_at(child, Some(id));
        }
        id
    }

    fn alloc(&mut self, node: TreeNode) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        }
    }

    /// Detach a node from its parent and free its whole subtree.
    ///
    /// Returns false when the node was not mounted. Handles into the removed
    /// subtree become invalid.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.get(id).map(|node| node.parent) else {
            return false;
        };
        if let Some(parent) = parent {
            if let Some(parent_node) = self.get_mut(parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
        // Free depth-first with an explicit stack. Bumping the generation
        // here is what invalidates every outstanding handle into the subtree.
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                slot.generation += 1;
                stack.extend(node.children.iter().copied());
                self.free.push(current.index);
                self.live -= 1;
            }
        }
        true
    }

    /// Every descendant of `id`, the node itself excluded. Pre-order:
    /// each node appears before its own descendants.
    pub fn world(&self, id: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        self.collect_world(id, &mut nodes);
        nodes
    }

    fn collect_world(&self, id: NodeId, nodes: &mut Vec<NodeId>) {
        let Some(node) = self.get(id) else {
            return;
        };
        for child in node.children() {
            nodes.push(*child);
            self.collect_world(*child, nodes);
        }
    }

    /// Resolve a dotted path of tags through descendants of `id`.
    ///
    /// `"Parent.Child"` descends into the first child tagged `Parent`, then
    /// looks for `Child` under it. Only descendants are searched, never
    /// siblings or ancestors. Returns `None` when any segment has no match.
    pub fn get_node(&self, id: NodeId, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return None;
        }
        let mut current = id;
        for segment in path.split('.') {
            let node = self.get(current)?;
            current = node
                .children()
                .iter()
                .copied()
                .find(|child| self.get(*child).is_some_and(|n| n.tag == segment))?;
        }
        Some(current)
    }

    /// Every descendant of `id` whose group set contains `group`.
    pub fn get_nodes_in_group(&self, id: NodeId, group: &str) -> Vec<NodeId> {
        self.world(id)
            .into_iter()
            .filter(|node| self.get(*node).is_some_and(|n| n.is_in_group(group)))
            .collect()
    }

    /// Downcast a node's script to a concrete type.
    pub fn script_mut<T: Script>(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id)?.script_mut::<T>()
    }

    pub fn script_ref<T: Script>(&self, id: NodeId) -> Option<&T> {
        self.get(id)?.script_ref::<T>()
    }
}
