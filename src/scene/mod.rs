//! The scene graph: nodes, their tree, and the built-in node kinds.
//!
//! - [`node`] - the [`Node`](node::Node) prototype, [`NodeKind`](node::NodeKind),
//!   and the [`Script`](node::Script) trait for client behavior
//! - [`tree`] - arena-backed [`Tree`](tree::Tree) storage and queries
//! - [`node2d`] - the 2D transform shared by positioned nodes
//! - [`shapes`] - drawable circle/point/line/rect/polygon nodes
//! - [`area2d`] - the rectangular body-detection trigger

pub mod area2d;
pub mod node;
pub mod node2d;
pub mod shapes;
pub mod tree;

pub use area2d::Area2D;
pub use node::{Node, NodeKind, Script};
pub use node2d::Transform2D;
pub use shapes::{Circle2D, Line2D, Point2D, Polygon2D, Rect2D};
pub use tree::{NodeId, Tree, TreeNode};
