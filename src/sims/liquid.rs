//! A viscous liquid that applies a drag force on objects falling into it.
//!
//! Demonstrates area triggers: the liquid mounts an [`Area2D`] detector at
//! build time and subscribes to its `BodyInArea` signal during ready.

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size};
use crate::scene::area2d::Area2D;
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::NodeId;
use crate::signal::{Signal, SignalKind};
use crate::sims::Sim;
use crate::sims::mover::Mover;

pub struct Liquid {
    transform: Transform2D,
    size: Size,
    drag: f64,
    color: Color,
}

impl Liquid {
    pub fn new(position: Point, size: Size) -> Self {
        Liquid {
            transform: Transform2D::new(position),
            size,
            drag: 0.15,
            color: Color::rgba(60, 120, 200, 140),
        }
    }
}

impl Script for Liquid {
    fn type_name(&self) -> &'static str {
        "Liquid"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.transform)
    }

    fn build(&mut self) -> Vec<Node> {
        let detector = Area2D::new(self.transform.position, self.size);
        vec![Node::from(detector).with_tag("Detector")]
    }

    fn ready(&mut self, id: NodeId, ctx: &mut Context) {
        let Some(detector) = ctx.tree.get_node(id, "Detector") else {
            return;
        };
        let drag = self.drag;
        ctx.connect(detector, SignalKind::BodyInArea, move |signal, tree| {
            let Signal::BodyInArea { body, .. } = signal else {
                return;
            };
            if let Some(mover) = tree.script_mut::<Mover>(*body) {
                let velocity = mover.velocity;
                let force = velocity.normalize() * (-1.0 * velocity.size().powi(2) * drag);
                mover.add_force(force);
            }
        });
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.rect(self.transform.position, self.size, self.color);
    }
}

/// The demo scene: a pool covering the lower half of the screen and a row
/// of randomized movers dropped into it.
pub struct Splash;

impl Script for Splash {
    fn type_name(&self) -> &'static str {
        "Splash"
    }

    fn ready(&mut self, id: NodeId, ctx: &mut Context) {
        let screen = ctx.screen;
        let pool = Liquid::new(
            Point::xy(0.0, screen.height() / 2.0),
            Size::xy(screen.width(), screen.height() / 2.0),
        );
        ctx.tree.mount(Node::script(pool), id);
        for seed in 0..8 {
            let mover = Mover::random(seed);
            ctx.tree.mount(mover.node().in_group("movers"), id);
        }
    }

    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        let screen = ctx.screen;
        for mover_id in ctx.tree.get_nodes_in_group(id, "movers") {
            if let Some(mover) = ctx.tree.script_mut::<Mover>(mover_id) {
                mover.obey_gravity();
                mover.bounce(screen);
            }
        }
    }
}

pub fn scene(_screen: Size) -> Sim {
    Sim {
        root: Node::script(Splash).with_tag("Liquid"),
        clear: true,
    }
}
