//! The scene-graph node: a tag, groups, a kind, and children.
//!
//! [`Node`] is the buildable prototype that simulations construct and hand to
//! the engine; once mounted into a [`Tree`](crate::scene::tree::Tree) the
//! children become id handles and the node gains a parent back-reference.
//!
//! Node behavior is a closed set of variants ([`NodeKind`]); client
//! simulations plug in through the [`Script`] variant.

use std::any::Any;

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::math::vec3d::Point;
use crate::scene::area2d::Area2D;
use crate::scene::node2d::Transform2D;
use crate::scene::shapes::{Circle2D, Line2D, Point2D, Polygon2D, Rect2D};
use crate::scene::tree::NodeId;

/// Per-frame behavior for client-defined nodes.
///
/// Lifecycle: `build` runs once at mount time to produce child nodes,
/// `ready` runs once before the first clock-driven frame, then every frame
/// `draw` and `tick` run in that order.
pub trait Script: Any {
    /// The name this node's tag defaults to when none is set.
    fn type_name(&self) -> &'static str {
        "Script"
    }

    /// The node's spatial transform, if it has one. Nodes without a
    /// transform are invisible to area triggers.
    fn transform(&self) -> Option<&Transform2D> {
        None
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        None
    }

    /// Produce children to attach at mount time, before `ready` runs
    /// anywhere in the subtree.
    fn build(&mut self) -> Vec<Node> {
        Vec::new()
    }

    /// Runs exactly once, before the first frame. `id` is this node's
    /// handle in the tree.
    fn ready(&mut self, _id: NodeId, _ctx: &mut Context) {}

    /// Runs once per frame with the elapsed seconds since the last frame.
    fn tick(&mut self, _id: NodeId, _delta: f64, _ctx: &mut Context) {}

    /// Paint the node. Runs once per frame, before `tick`.
    fn draw(&self, _canvas: &mut dyn Canvas) {}
}

/// The closed set of node behaviors.
pub enum NodeKind {
    /// A pure grouping/logic node with no position and no drawing.
    Blank,
    Circle(Circle2D),
    Point(Point2D),
    Line(Line2D),
    Rect(Rect2D),
    Polygon(Polygon2D),
    Area(Area2D),
    /// Client-defined behavior.
    Script(Box<dyn Script>),
}

impl NodeKind {
    /// The default tag for a node of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Blank => "Node",
            NodeKind::Circle(_) => "Circle2D",
            NodeKind::Point(_) => "Point2D",
            NodeKind::Line(_) => "Line2D",
            NodeKind::Rect(_) => "Rect2D",
            NodeKind::Polygon(_) => "Polygon2D",
            NodeKind::Area(_) => "Area2D",
            NodeKind::Script(script) => script.type_name(),
        }
    }

    /// The node's transform, when the kind is positioned.
    pub fn transform(&self) -> Option<&Transform2D> {
        match self {
            NodeKind::Blank => None,
            NodeKind::Circle(c) => Some(&c.transform),
            NodeKind::Point(p) => Some(&p.transform),
            NodeKind::Line(l) => Some(&l.transform),
            NodeKind::Rect(r) => Some(&r.transform),
            NodeKind::Polygon(p) => Some(&p.transform),
            NodeKind::Area(a) => Some(&a.transform),
            NodeKind::Script(script) => script.transform(),
        }
    }

    /// Mutable transform access.
    ///
    /// For polygons this moves the pivot/position bookkeeping only, not the
    /// vertices; use [`Polygon2D::rotate`] and friends for vertex motion.
    pub fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        match self {
            NodeKind::Blank => None,
            NodeKind::Circle(c) => Some(&mut c.transform),
            NodeKind::Point(p) => Some(&mut p.transform),
            NodeKind::Line(l) => Some(&mut l.transform),
            NodeKind::Rect(r) => Some(&mut r.transform),
            NodeKind::Polygon(p) => Some(&mut p.transform),
            NodeKind::Area(a) => Some(&mut a.transform),
            NodeKind::Script(script) => script.transform_mut(),
        }
    }

    /// The node's position, when it has one.
    pub fn position(&self) -> Option<Point> {
        self.transform().map(|t| t.position)
    }

    pub(crate) fn build(&mut self) -> Vec<Node> {
        match self {
            NodeKind::Script(script) => script.build(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn ready(&mut self, id: NodeId, ctx: &mut Context) {
        if let NodeKind::Script(script) = self {
            script.ready(id, ctx);
        }
    }

    pub(crate) fn tick(&mut self, id: NodeId, delta: f64, ctx: &mut Context) {
        match self {
            NodeKind::Area(area) => area.tick(id, ctx),
            NodeKind::Script(script) => script.tick(id, delta, ctx),
            _ => {}
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            NodeKind::Blank => {}
            NodeKind::Circle(c) => c.draw(canvas),
            NodeKind::Point(p) => p.draw(canvas),
            NodeKind::Line(l) => l.draw(canvas),
            NodeKind::Rect(r) => r.draw(canvas),
            NodeKind::Polygon(p) => p.draw(canvas),
            NodeKind::Area(_) => {}
            NodeKind::Script(script) => script.draw(canvas),
        }
    }
}

/// A node prototype: what simulations construct and `build` returns.
///
/// The tag is expected to be unique among siblings but this is not enforced;
/// lookups return the first match. An empty tag defaults to the kind's type
/// name at mount time.
pub struct Node {
    pub tag: String,
    pub groups: Vec<String>,
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            tag: String::new(),
            groups: Vec::new(),
            kind,
            children: Vec::new(),
        }
    }

    /// A grouping node with no behavior of its own.
    pub fn blank(tag: impl Into<String>) -> Self {
        Node::new(NodeKind::Blank).with_tag(tag)
    }

    /// A node driven by client-defined behavior.
    pub fn script(script: impl Script) -> Self {
        Node::new(NodeKind::Script(Box::new(script)))
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }
}

impl From<Circle2D> for Node {
    fn from(shape: Circle2D) -> Node {
        Node::new(NodeKind::Circle(shape))
    }
}

impl From<Point2D> for Node {
    fn from(shape: Point2D) -> Node {
        Node::new(NodeKind::Point(shape))
    }
}

impl From<Line2D> for Node {
    fn from(shape: Line2D) -> Node {
        Node::new(NodeKind::Line(shape))
    }
}

impl From<Rect2D> for Node {
    fn from(shape: Rect2D) -> Node {
        Node::new(NodeKind::Rect(shape))
    }
}

impl From<Polygon2D> for Node {
    fn from(shape: Polygon2D) -> Node {
        Node::new(NodeKind::Polygon(shape))
    }
}

impl From<Area2D> for Node {
    fn from(area: Area2D) -> Node {
        Node::new(NodeKind::Area(area))
    }
}
