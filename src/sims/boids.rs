//! A flocking simulation.
//!
//! Classic boids: every member steers by three weighted forces computed
//! against the rest of the flock each frame (separation away from crowding
//! neighbours, alignment with their average heading, cohesion towards their
//! average position). O(n squared) per frame, which is fine at this size.

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size, Vec3D, deg2rad, map_range, rad2deg};
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::shapes::Polygon2D;
use crate::scene::tree::NodeId;
use crate::sims::Sim;
use crate::sims::mover::Mover;

/// A triangle with steering behaviors, moved by an invisible child mover.
pub struct Boid {
    shape: Polygon2D,
    last_position: Point,
    max_speed: f64,
    max_force: f64,
    arrival_dist: f64,
}

impl Boid {
    pub fn new(position: Point, color: Color) -> Self {
        // The triangle starts pointing up, which is 270 degrees in screen
        // coordinates; the stored angle has to agree so the first heading
        // change rotates by the right delta.
        let points = vec![
            position + Point::xy(0.0, -12.0),
            position + Point::xy(-6.0, 12.0),
            position + Point::xy(6.0, 12.0),
        ];
        let mut shape = Polygon2D::new(points, color).with_pivot(position);
        shape.transform.position = position;
        shape.transform.store_rotation(deg2rad(270.0));
        Boid {
            shape,
            last_position: position,
            max_speed: 8.0,
            max_force: 1.0,
            arrival_dist: 100.0,
        }
    }

    pub fn position(&self) -> Point {
        self.shape.transform.position
    }

    /// Shift the triangle to follow the vehicle, keeping the pivot on it.
    fn moved(&mut self, position: Point) {
        let last = self.last_position;
        for point in &mut self.shape.points {
            *point = *point - last + position;
        }
        self.shape.transform.position = position;
        self.shape.transform.pivot = position;
        self.last_position = position;
    }

    /// A steering force towards `target`, easing off inside the arrival
    /// distance so the boid slows down instead of overshooting.
    pub fn seek_force(&self, target: Point, position: Point, velocity: Vec3D) -> Vec3D {
        let mut distance = (target - position).size_sq();
        if distance < self.arrival_dist * self.arrival_dist {
            distance = map_range(distance, 0.0, self.arrival_dist, 0.0, self.max_speed);
        }
        let desired = (target - position).normalize() * distance;
        (desired - velocity).constrain_size(0.0, self.max_force)
    }
}

impl Script for Boid {
    fn type_name(&self) -> &'static str {
        "Boid"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.shape.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.shape.transform)
    }

    fn build(&mut self) -> Vec<Node> {
        let mut vehicle = Mover::new(self.shape.transform.position);
        vehicle.visible = false;
        vec![vehicle.node().with_tag("Vehicle")]
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.shape.draw(canvas);
    }

    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        let Some(vehicle_id) = ctx.tree.get_node(id, "Vehicle") else {
            return;
        };
        let max_speed = self.max_speed;
        let Some((position, velocity)) = ctx.tree.script_mut::<Mover>(vehicle_id).map(|mover| {
            mover.velocity = mover.velocity.constrain_size(0.0, max_speed);
            (mover.position(), mover.velocity)
        }) else {
            return;
        };
        self.moved(position);
        // Turn towards the direction of motion rather than snapping at a
        // target, so heading changes stay gradual.
        if velocity.size_sq() > 0.0 {
            self.shape.set_rotation(rad2deg(velocity.angle_2d()));
        }
    }
}

/// The driver: spawns the flock and applies the steering forces.
pub struct Flock {
    size: usize,
    separation: f64,
    neighbour_dist: f64,
    weights: [f64; 3],
}

impl Flock {
    pub fn new(size: usize) -> Self {
        Flock {
            size,
            separation: 60.0,
            neighbour_dist: 90.0,
            weights: [1.25, 1.5, 1.75],
        }
    }

    /// The separation, alignment, and cohesion forces on member `me`, from
    /// a position/velocity snapshot of the whole flock.
    fn flock_forces(
        &self,
        flock: &[(Point, Vec3D)],
        me: usize,
        boid: &Boid,
    ) -> (Vec3D, Vec3D, Vec3D) {
        let (position, velocity) = flock[me];
        let mut separate = (Vec3D::origin(), 0u32);
        let mut align = (Vec3D::origin(), 0u32);
        let mut cohere = (Vec3D::origin(), 0u32);

        for (index, (other_position, other_velocity)) in flock.iter().enumerate() {
            if index == me {
                continue;
            }
            let offset = position - *other_position;
            let distance = offset.size_sq();
            if distance < self.separation * self.separation {
                separate = (separate.0 + offset.normalize(), separate.1 + 1);
            }
            if distance < self.neighbour_dist * self.neighbour_dist {
                align = (align.0 + *other_velocity, align.1 + 1);
                cohere = (cohere.0 + *other_position, cohere.1 + 1);
            }
        }

        let mut separation_force = Vec3D::origin();
        let mut alignment_force = Vec3D::origin();
        let mut cohesion_force = Vec3D::origin();
        if separate.1 > 0 {
            let desired = (separate.0 / separate.1 as f64).normalize() * boid.max_speed;
            separation_force = (desired - velocity).constrain_size(0.0, boid.max_force);
        }
        if align.1 > 0 {
            let desired = (align.0 / align.1 as f64).normalize() * boid.max_speed;
            alignment_force = (desired - velocity).constrain_size(0.0, boid.max_force);
        }
        if cohere.1 > 0 {
            cohesion_force = boid.seek_force(cohere.0 / cohere.1 as f64, position, velocity);
        }
        (separation_force, alignment_force, cohesion_force)
    }
}

impl Script for Flock {
    fn type_name(&self) -> &'static str {
        "Flock"
    }

    fn ready(&mut self, id: NodeId, ctx: &mut Context) {
        let middle = Point::xy(ctx.screen.width() / 2.0, ctx.screen.height() / 2.0);
        for index in 0..self.size {
            let position = middle + Point::xy(fastrand::f64() * 20.0, fastrand::f64() * 30.0);
            let boid = Boid::new(position, Color::random(255));
            ctx.tree.mount(
                Node::script(boid)
                    .with_tag(format!("Boid {index}"))
                    .in_group("boids"),
                id,
            );
        }
    }

    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        let mut members: Vec<(NodeId, NodeId)> = Vec::new();
        let mut flock: Vec<(Point, Vec3D)> = Vec::new();
        for member in ctx.tree.get_nodes_in_group(id, "boids") {
            let Some(vehicle) = ctx.tree.get_node(member, "Vehicle") else {
                continue;
            };
            let Some(mover) = ctx.tree.script_ref::<Mover>(vehicle) else {
                continue;
            };
            members.push((member, vehicle));
            flock.push((mover.position(), mover.velocity));
        }

        for (me, (member, vehicle)) in members.into_iter().enumerate() {
            let forces = {
                let Some(boid) = ctx.tree.script_ref::<Boid>(member) else {
                    continue;
                };
                self.flock_forces(&flock, me, boid)
            };
            if let Some(mover) = ctx.tree.script_mut::<Mover>(vehicle) {
                mover.add_force(forces.0 * self.weights[0]);
                mover.add_force(forces.1 * self.weights[1]);
                mover.add_force(forces.2 * self.weights[2]);
            }
        }
    }
}

pub fn scene(_screen: Size) -> Sim {
    Sim {
        root: Node::script(Flock::new(45)).with_tag("Boids"),
        clear: true,
    }
}
