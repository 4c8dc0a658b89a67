//! A circle that moves under accumulated forces.
//!
//! Forces apply for a single timestep: `tick` integrates the velocity and
//! position, then resets the acceleration. Used as the body in most of the
//! bundled simulations.

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size, Vec3D};
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::NodeId;

pub struct Mover {
    pub transform: Transform2D,
    pub velocity: Vec3D,
    pub acceleration: Vec3D,
    mass: f64,
    /// Derived from the mass so heavier movers look bigger.
    pub radius: f64,
    pub friction: f64,
    pub normal: Vec3D,
    pub g: f64,
    /// Energy kept after bouncing off a screen edge.
    pub restitution: f64,
    pub angular_velocity: f64,
    pub angular_acceleration: f64,
    pub color: Color,
    pub visible: bool,
}

impl Default for Mover {
    fn default() -> Self {
        Mover::new(Point::origin())
    }
}

impl Mover {
    pub fn new(position: Point) -> Self {
        Mover {
            transform: Transform2D::new(position),
            velocity: Vec3D::origin(),
            acceleration: Vec3D::origin(),
            mass: 1.0,
            radius: 10.0,
            friction: 0.02,
            normal: Vec3D::xy(0.0, 1.0),
            g: 0.2,
            restitution: 0.98,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            color: Color::WHITE,
            visible: true,
        }
    }

    /// A mover with randomized mass, color, and a one-timestep gust of wind,
    /// spaced out horizontally by `seed`.
    pub fn random(seed: u32) -> Self {
        let mut mover = Mover::default();
        mover.set_mass(1.0 + fastrand::f64() * 7.0);
        mover.transform.position = Point::xy(seed as f64 * mover.radius + 200.0, 0.0);
        mover.add_force(Vec3D::xy(fastrand::f64() * 4.0 - 2.0, 0.0));
        mover.color = Color::random(255);
        mover
    }

    pub fn position(&self) -> Point {
        self.transform.position
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Changing the mass changes the radius to reflect it visually.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.radius = mass.sqrt() * 10.0;
    }

    /// Add a force for this timestep, using `F = ma`.
    pub fn add_force(&mut self, force: Vec3D) {
        self.acceleration += force / self.mass;
    }

    /// Apply a crude gravity according to the mass.
    pub fn obey_gravity(&mut self) {
        let weight = Vec3D::xy(0.0, self.g * self.mass);
        self.add_force(weight);
    }

    /// Apply a crude frictional force opposing the velocity.
    pub fn obey_friction(&mut self) {
        let friction = self.velocity.normalize() * (-1.0 * self.friction * self.normal.size());
        self.add_force(friction);
    }

    /// Bounce off the screen edges, losing a little energy each hit.
    pub fn bounce(&mut self, screen: Size) {
        let position = self.transform.position.constrain(
            Vec3D::xy(self.radius, self.radius),
            Vec3D::xy(screen.width() - self.radius, screen.height() - self.radius),
        );
        self.transform.position = position;

        // Post-constrain the coordinate sits exactly on the edge when it
        // collided, so an equality test is reliable here.
        if position.x == screen.width() - self.radius || position.x == self.radius {
            self.velocity.x *= -self.restitution;
        }
        if position.y == screen.height() - self.radius || position.y == self.radius {
            self.velocity.y *= -self.restitution;
        }
    }

    /// Wrap around to the opposite edge when leaving the screen.
    pub fn wraparound(&mut self, screen: Size) {
        let position = &mut self.transform.position;
        if position.x > screen.width() {
            position.x = 0.0;
        }
        if position.x < 0.0 {
            position.x = screen.width();
        }
        if position.y > screen.height() {
            position.y = 0.0;
        }
        if position.y < 0.0 {
            position.y = screen.height();
        }
    }

    /// One Euler step. Forces only last for the step that added them.
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.transform.position += self.velocity;
        self.acceleration = Vec3D::origin();

        self.angular_velocity += self.angular_acceleration;
        self.transform.rotate(self.angular_velocity);
        self.angular_velocity *= 1.0 - self.friction;
    }

    pub fn node(self) -> Node {
        Node::script(self)
    }
}

impl Script for Mover {
    fn type_name(&self) -> &'static str {
        "Mover"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.transform)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.visible {
            canvas.circle(self.transform.position, self.radius, self.color);
        }
    }

    fn tick(&mut self, _id: NodeId, _delta: f64, _ctx: &mut Context) {
        self.integrate();
    }
}
