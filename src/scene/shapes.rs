//! Drawable geometric nodes.
//!
//! Each shape owns a [`Transform2D`] plus its shape-specific data and knows
//! how to paint itself on a [`Canvas`]. None of them have per-frame logic;
//! behavior comes from [`Script`](crate::scene::node::Script) nodes driving
//! them from elsewhere in the tree.

use crate::engine::canvas::Canvas;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size, deg2rad, rad2deg};
use crate::scene::node2d::Transform2D;

/// A filled circle.
#[derive(Clone, Debug)]
pub struct Circle2D {
    pub transform: Transform2D,
    pub radius: f64,
    pub color: Color,
}

impl Circle2D {
    pub fn new(position: Point, radius: f64, color: Color) -> Self {
        Circle2D {
            transform: Transform2D::new(position),
            radius,
            color,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.circle(self.transform.position, self.radius, self.color);
    }
}

impl Default for Circle2D {
    fn default() -> Self {
        Circle2D::new(Point::origin(), 10.0, Color::WHITE)
    }
}

/// A single pixel.
#[derive(Clone, Debug)]
pub struct Point2D {
    pub transform: Transform2D,
    pub color: Color,
}

impl Point2D {
    pub fn new(position: Point, color: Color) -> Self {
        Point2D {
            transform: Transform2D::new(position),
            color,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.point(self.transform.position, self.color);
    }
}

/// A line segment with a thickness.
#[derive(Clone, Debug)]
pub struct Line2D {
    pub transform: Transform2D,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: f64,
}

impl Line2D {
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Line2D {
            transform: Transform2D::new(end),
            start,
            end,
            color,
            width: 1.0,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.line(self.start, self.end, self.width, self.color);
    }
}

/// An axis-aligned filled rectangle.
#[derive(Clone, Debug)]
pub struct Rect2D {
    pub transform: Transform2D,
    pub size: Size,
    pub color: Color,
}

impl Rect2D {
    pub fn new(position: Point, size: Size, color: Color) -> Self {
        Rect2D {
            transform: Transform2D::new(position),
            size,
            color,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.rect(self.transform.position, self.size, self.color);
    }
}

/// A filled polygon described by its vertices.
///
/// Unlike the other shapes, rotating a polygon rotates every vertex around
/// the pivot instead of moving the single position.
#[derive(Clone, Debug)]
pub struct Polygon2D {
    pub transform: Transform2D,
    pub points: Vec<Point>,
    pub color: Color,
}

impl Polygon2D {
    pub fn new(points: Vec<Point>, color: Color) -> Self {
        Polygon2D {
            transform: Transform2D::default(),
            points,
            color,
        }
    }

    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.transform.pivot = pivot;
        self
    }

    /// Rotate every vertex around the pivot by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        let pivot = self.transform.pivot;
        for point in &mut self.points {
            *point = point.rotate(degrees, pivot);
        }
        self.transform.accumulate_rotation(deg2rad(degrees));
    }

    /// Rotate every vertex until the accumulated angle is `degrees`.
    pub fn set_rotation(&mut self, degrees: f64) {
        let delta = degrees - rad2deg(self.transform.rotation());
        let pivot = self.transform.pivot;
        for point in &mut self.points {
            *point = point.rotate(delta, pivot);
        }
        self.transform.store_rotation(deg2rad(degrees));
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.polygon(&self.points, self.color);
    }
}
