//! The Earth and the Moon orbiting each other.
//!
//! Real masses, distances, and gravitational constant; only the on-screen
//! scale is shrunk so the system fits in a window.

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::engine::input::Key;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size, Vec3D};
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::{NodeId, Tree};
use crate::sims::Sim;
use crate::sims::mover::Mover;

const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;

/// The amount the planets are scaled by when displayed. The physics stays
/// in real units; the scaling is only so that it fits on screen.
const DISPLAY_SCALE: f64 = 0.0000012;

/// A planet that can attract or repel bodies with mass.
pub struct Planet {
    pub body: Mover,
}

impl Planet {
    pub fn new(position: Point, mass: f64, radius: f64, color: Color) -> Self {
        let mut body = Mover::new(position);
        body.set_mass(mass);
        // The visual radius is independent of the mass out here.
        body.radius = radius;
        body.color = color;
        Planet { body }
    }

    /// The force between this planet and a body at `position` with `mass`,
    /// pointing towards the planet.
    pub fn gravitational_force(&self, position: Point, mass: f64, display_scale: f64) -> Vec3D {
        let distance = (self.body.position() - position).size() / display_scale;
        let direction = (self.body.position() - position).normalize();
        direction * ((GRAVITATIONAL_CONSTANT * self.body.mass() * mass) / (distance * distance))
    }
}

impl Script for Planet {
    fn type_name(&self) -> &'static str {
        "Planet"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.body.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.body.transform)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.circle(self.body.position(), self.body.radius, self.body.color);
    }

    fn tick(&mut self, _id: NodeId, _delta: f64, _ctx: &mut Context) {
        self.body.integrate();
    }
}

/// Pull `body` towards `attractor` for this timestep.
fn attract(tree: &mut Tree, attractor: NodeId, body: NodeId, display_scale: f64) {
    let force = {
        let Some(target) = tree.script_ref::<Planet>(body) else {
            return;
        };
        let Some(source) = tree.script_ref::<Planet>(attractor) else {
            return;
        };
        source.gravitational_force(target.body.position(), target.body.mass(), display_scale)
    };
    if let Some(target) = tree.script_mut::<Planet>(body) {
        target.body.add_force(force);
    }
}

/// The driver: builds the two planets and applies their mutual pull.
pub struct Orbit {
    earth: Option<NodeId>,
    moon: Option<NodeId>,
}

impl Orbit {
    pub fn new() -> Self {
        Orbit {
            earth: None,
            moon: None,
        }
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Orbit::new()
    }
}

impl Script for Orbit {
    fn type_name(&self) -> &'static str {
        "Orbit"
    }

    fn ready(&mut self, id: NodeId, ctx: &mut Context) {
        let middle = Point::xy(ctx.screen.width() / 2.0, ctx.screen.height() / 2.0);

        let earth = Planet::new(middle, 6.0e24, 6.38e6 * DISPLAY_SCALE, Color::BLUE);
        let mut moon = Planet::new(
            middle + Point::xy(0.0, 3.84e8 * DISPLAY_SCALE),
            7.35e22,
            1.74e6 * DISPLAY_SCALE,
            Color::WHITE,
        );
        moon.body.velocity.x = 1022.0;

        let earth_id = ctx.tree.mount(Node::script(earth).with_tag("Earth"), id);
        let moon_id = ctx.tree.mount(Node::script(moon).with_tag("Moon"), id);
        self.earth = earth_id;
        self.moon = moon_id;

        // One initial pull each so the first integration step already
        // curves the motion.
        if let (Some(earth), Some(moon)) = (earth_id, moon_id) {
            attract(ctx.tree, earth, moon, DISPLAY_SCALE);
            attract(ctx.tree, moon, earth, DISPLAY_SCALE);
        }
    }

    fn tick(&mut self, _id: NodeId, _delta: f64, ctx: &mut Context) {
        if ctx.input.is_pressed(Key::Q) {
            ctx.request_quit();
            return;
        }
        if let (Some(earth), Some(moon)) = (self.earth, self.moon) {
            attract(ctx.tree, earth, moon, DISPLAY_SCALE);
            attract(ctx.tree, moon, earth, DISPLAY_SCALE);
        }
    }
}

pub fn scene(_screen: Size) -> Sim {
    Sim {
        root: Node::script(Orbit::new()).with_tag("Orbits"),
        clear: true,
    }
}
