//! Integration tests for the per-frame traversal: draw/tick ordering, the
//! ready pass, and structural changes made while a frame is in flight.
//!
//! Frames run headless against a [`NullCanvas`]; no window is opened.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test engine_tick_integration
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use simscene::engine::canvas::{Canvas, NullCanvas};
use simscene::engine::input::Input;
use simscene::engine::{Context, advance};
use simscene::math::vec3d::Size;
use simscene::scene::node::{Node, Script};
use simscene::scene::tree::{NodeId, Tree};
use simscene::signal::SignalHub;

type Log = Rc<RefCell<Vec<String>>>;

const SCREEN: Size = Size::xy(640.0, 360.0);

/// Run one frame over the whole tree. Returns whether quit was requested.
fn run_frame(tree: &mut Tree, hub: &mut SignalHub, delta: f64) -> bool {
    let root = tree.root().expect("tree has a root");
    let input = Input::default();
    let mut ctx = Context::new(tree, hub, &input, SCREEN, 1);
    advance(root, delta, &mut ctx, &mut NullCanvas);
    ctx.quit_requested()
}

/// A script that records its lifecycle calls.
struct Tracer {
    name: &'static str,
    log: Log,
}

impl Tracer {
    fn node(name: &'static str, log: &Log) -> Node {
        Node::script(Tracer {
            name,
            log: Rc::clone(log),
        })
        .with_tag(name)
    }
}

impl Script for Tracer {
    fn type_name(&self) -> &'static str {
        "Tracer"
    }

    fn ready(&mut self, _id: NodeId, _ctx: &mut Context) {
        self.log.borrow_mut().push(format!("{}:ready", self.name));
    }

    fn tick(&mut self, _id: NodeId, _delta: f64, _ctx: &mut Context) {
        self.log.borrow_mut().push(format!("{}:tick", self.name));
    }

    fn draw(&self, _canvas: &mut dyn Canvas) {
        self.log.borrow_mut().push(format!("{}:draw", self.name));
    }
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn each_node_draws_before_it_ticks() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut tree = Tree::new();
    tree.mount_root(Tracer::node("a", &log));
    let mut hub = SignalHub::new();

    run_frame(&mut tree, &mut hub, 1.0 / 60.0);
    assert_eq!(*log.borrow(), vec!["a:draw", "a:tick"]);
}

#[test]
fn parents_run_before_children_depth_first() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut tree = Tree::new();
    tree.mount_root(
        Tracer::node("root", &log)
            .with_child(Tracer::node("left", &log).with_child(Tracer::node("leaf", &log)))
            .with_child(Tracer::node("right", &log)),
    );
    let mut hub = SignalHub::new();

    run_frame(&mut tree, &mut hub, 1.0 / 60.0);
    assert_eq!(
        *log.borrow(),
        vec![
            "root:draw",
            "root:tick",
            "left:draw",
            "left:tick",
            "leaf:draw",
            "leaf:tick",
            "right:draw",
            "right:tick",
        ]
    );
}

#[test]
fn zero_delta_runs_ready_instead_of_draw_and_tick() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut tree = Tree::new();
    tree.mount_root(Tracer::node("root", &log).with_child(Tracer::node("child", &log)));
    let mut hub = SignalHub::new();

    run_frame(&mut tree, &mut hub, 0.0);
    assert_eq!(*log.borrow(), vec!["root:ready", "child:ready"]);

    log.borrow_mut().clear();
    run_frame(&mut tree, &mut hub, 1.0 / 60.0);
    assert_eq!(
        *log.borrow(),
        vec!["root:draw", "root:tick", "child:draw", "child:tick"]
    );
}

// =============================================================================
// Structural changes mid-frame
// =============================================================================

/// Mounts a logging child on its first tick.
struct Inserter {
    log: Log,
    spawned: bool,
}

impl Script for Inserter {
    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        if !self.spawned {
            self.spawned = true;
            ctx.tree.mount(Tracer::node("newborn", &self.log), id);
        }
    }
}

#[test]
fn children_inserted_during_a_tick_run_the_same_frame() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut tree = Tree::new();
    tree.mount_root(Node::script(Inserter {
        log: Rc::clone(&log),
        spawned: false,
    }));
    let mut hub = SignalHub::new();

    run_frame(&mut tree, &mut hub, 1.0 / 60.0);
    assert_eq!(*log.borrow(), vec!["newborn:draw", "newborn:tick"]);

    // Next frame it is an ordinary child; no duplicate mounts.
    log.borrow_mut().clear();
    run_frame(&mut tree, &mut hub, 1.0 / 60.0);
    assert_eq!(*log.borrow(), vec!["newborn:draw", "newborn:tick"]);
}

/// Removes the sibling tagged `victim` on its first tick.
struct Assassin;

impl Script for Assassin {
    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        let Some(parent) = ctx.tree.get(id).and_then(|node| node.parent()) else {
            return;
        };
        if let Some(victim) = ctx.tree.get_node(parent, "victim") {
            ctx.tree.remove(victim);
        }
    }
}

#[test]
fn nodes_removed_mid_frame_are_skipped() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut tree = Tree::new();
    tree.mount_root(
        Node::blank("root")
            .with_child(Node::script(Assassin).with_tag("assassin"))
            .with_child(Tracer::node("victim", &log)),
    );
    let mut hub = SignalHub::new();

    run_frame(&mut tree, &mut hub, 1.0 / 60.0);
    assert!(
        log.borrow().is_empty(),
        "victim should never run: {:?}",
        log.borrow()
    );
    let root = tree.root().unwrap();
    assert!(tree.get_node(root, "victim").is_none());
}

/// Removes itself on its first tick.
struct Ephemeral;

impl Script for Ephemeral {
    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        ctx.tree.remove(id);
    }
}

#[test]
fn a_node_may_remove_itself_during_its_own_tick() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut tree = Tree::new();
    tree.mount_root(
        Node::blank("root")
            .with_child(Node::script(Ephemeral).with_tag("ephemeral"))
            .with_child(Tracer::node("after", &log)),
    );
    let mut hub = SignalHub::new();

    run_frame(&mut tree, &mut hub, 1.0 / 60.0);
    // The rest of the frame still runs.
    assert_eq!(*log.borrow(), vec!["after:draw", "after:tick"]);

    let root = tree.root().unwrap();
    assert!(tree.get_node(root, "ephemeral").is_none());
    assert_eq!(tree.len(), 2);
}

/// Removes itself and mounts a replacement in the same tick, so the
/// replacement lands in the freed slot.
struct Replacer;

impl Script for Replacer {
    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        let root = ctx.tree.root().expect("root is mounted");
        ctx.tree.remove(id);
        ctx.tree.mount(Node::blank("tenant"), root);
    }
}

#[test]
fn a_self_removing_node_does_not_leak_its_script_into_a_reused_slot() {
    let mut tree = Tree::new();
    let root = tree.mount_root(
        Node::blank("root").with_child(Node::script(Replacer).with_tag("old")),
    );
    let mut hub = SignalHub::new();

    run_frame(&mut tree, &mut hub, 1.0 / 60.0);

    // The newcomer occupies the freed slot but must stay a plain blank
    // node; the removed script may not be written back over it.
    assert!(tree.get_node(root, "old").is_none());
    let tenant = tree.get_node(root, "tenant").expect("tenant is mounted");
    assert!(tree.script_ref::<Replacer>(tenant).is_none());
    assert_eq!(tree.len(), 2);
}

// =============================================================================
// Quit requests
// =============================================================================

struct Quitter;

impl Script for Quitter {
    fn tick(&mut self, _id: NodeId, _delta: f64, ctx: &mut Context) {
        ctx.request_quit();
    }
}

#[test]
fn quit_requests_surface_after_the_frame() {
    let mut tree = Tree::new();
    tree.mount_root(Node::script(Quitter));
    let mut hub = SignalHub::new();

    assert!(!run_frame(&mut tree, &mut hub, 0.0));
    assert!(run_frame(&mut tree, &mut hub, 1.0 / 60.0));
}
