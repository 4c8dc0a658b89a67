//! A line that spins around the mouse cursor.

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size};
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::NodeId;
use crate::sims::Sim;

pub struct SpinningLine {
    transform: Transform2D,
    length: f64,
    start: Point,
    end: Point,
    color: Color,
}

impl SpinningLine {
    pub fn new(offset: Point, length: f64) -> Self {
        SpinningLine {
            transform: Transform2D::new(offset),
            length,
            start: Point::xy(offset.x - length / 2.0, offset.y),
            end: Point::xy(offset.x + length / 2.0, offset.y),
            color: Color::WHITE,
        }
    }
}

impl Script for SpinningLine {
    fn type_name(&self) -> &'static str {
        "SpinningLine"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.transform)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.line(self.start, self.end, 1.0, self.color);
    }

    fn tick(&mut self, _id: NodeId, _delta: f64, ctx: &mut Context) {
        let offset = ctx.input.mouse;
        self.transform.position = offset;
        // Keep the distance from the offset to the end constant while the
        // line follows the mouse.
        self.end = offset + (self.end - offset).normalize() * (self.length / 2.0);
        self.end = self.end.rotate(1.0, offset);
        self.start = self.end.rotate(180.0, offset);
    }
}

pub fn scene(screen: Size) -> Sim {
    let middle = Point::xy(screen.width() / 2.0, screen.height() / 2.0);
    Sim {
        root: Node::script(SpinningLine::new(middle, 200.0)).with_tag("Spinners"),
        clear: true,
    }
}
