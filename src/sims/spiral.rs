//! A mesmerising spiral.
//!
//! A single point orbiting a pivot with a slowly growing radius. Runs with
//! frame clearing disabled so the trail persists.

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size};
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::NodeId;
use crate::sims::Sim;

pub struct Spiral {
    transform: Transform2D,
    radius: f64,
    color: Color,
}

impl Spiral {
    pub fn new(pivot: Point) -> Self {
        let radius = 1.0;
        Spiral {
            transform: Transform2D::new(Point::xy(pivot.x + radius, pivot.y))
                .with_pivot(pivot),
            radius,
            color: Color::random(255),
        }
    }
}

impl Script for Spiral {
    fn type_name(&self) -> &'static str {
        "Spiral"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.transform)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.point(self.transform.position, self.color);
    }

    fn tick(&mut self, _id: NodeId, _delta: f64, _ctx: &mut Context) {
        // Push the point outward along its current direction, then advance
        // it one degree around the pivot.
        let direction = (self.transform.position - self.transform.pivot).normalize();
        let old_radius = direction * self.radius;
        self.radius += 0.1;
        self.transform.position += direction * self.radius - old_radius;
        self.transform.rotate(1.0);
    }
}

pub fn scene(screen: Size) -> Sim {
    let middle = Point::xy(screen.width() / 2.0, screen.height() / 2.0);
    Sim {
        root: Node::script(Spiral::new(middle)).with_tag("Spiral"),
        clear: false,
    }
}
