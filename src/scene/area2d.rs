//! Rectangular trigger that detects positioned nodes inside it.

use smallvec::SmallVec;

use crate::engine::Context;
use crate::math::vec3d::{Point, Size};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::NodeId;
use crate::signal::Signal;

/// An axis-aligned rectangular area emitting signals about the bodies
/// inside it.
///
/// Every tick the area scans the whole world tree, so the cost is O(total
/// node count) per trigger per frame. That is fine for the tens-to-hundreds
/// of nodes this engine targets and no further.
///
/// Excluded from detection: the area itself, its children, its parent, and
/// its parent's other children. Cousins and grandparents are deliberately
/// not excluded; the narrow exclusion set is part of the contract.
pub struct Area2D {
    pub transform: Transform2D,
    pub size: Size,
    bodies: Vec<NodeId>,
}

impl Area2D {
    pub fn new(position: Point, size: Size) -> Self {
        Area2D {
            transform: Transform2D::new(position),
            size,
            bodies: Vec::new(),
        }
    }

    /// The bodies currently inside the area.
    pub fn bodies(&self) -> &[NodeId] {
        &self.bodies
    }

    /// Whether a position falls within the area's rectangle.
    pub fn contains(&self, position: Point) -> bool {
        let origin = self.transform.position;
        position.constrain(origin, origin + self.size) == position
    }

    pub(crate) fn tick(&mut self, id: NodeId, ctx: &mut Context) {
        // Bodies removed from the tree while inside never hit the scan's
        // exit branch; drop them here so they still get their exit signal.
        let mut index = 0;
        while index < self.bodies.len() {
            let body = self.bodies[index];
            if ctx.tree.contains(body) {
                index += 1;
            } else {
                self.bodies.remove(index);
                ctx.emit(Signal::BodyExited { area: id, body });
            }
        }

        let Some(root) = ctx.tree.root() else {
            return;
        };

        let mut excluded: SmallVec<[NodeId; 8]> = SmallVec::new();
        excluded.push(id);
        if let Some(node) = ctx.tree.get(id) {
            excluded.extend(node.children().iter().copied());
            if let Some(parent) = node.parent() {
                excluded.push(parent);
                if let Some(parent_node) = ctx.tree.get(parent) {
                    excluded.extend(parent_node.children().iter().copied());
                }
            }
        }

        for body in ctx.tree.world(root) {
            if excluded.contains(&body) {
                continue;
            }
            // Unpositioned nodes cannot be inside anything.
            let Some(position) = ctx.tree.position(body) else {
                continue;
            };
            if self.contains(position) {
                ctx.emit(Signal::BodyInArea { area: id, body });
                if !self.bodies.contains(&body) {
                    self.bodies.push(body);
                    ctx.emit(Signal::BodyEntered { area: id, body });
                }
            } else if let Some(index) = self.bodies.iter().position(|b| *b == body) {
                self.bodies.remove(index);
                ctx.emit(Signal::BodyExited { area: id, body });
            }
        }
    }
}
