//! The drawing surface nodes paint on.
//!
//! [`Canvas`] is the narrow interface between the scene graph and the host
//! rendering library: a handful of primitives addressed in the same
//! coordinate space as node positions. The engine hands nodes a
//! raylib-backed canvas; tests use [`NullCanvas`] to run frames headless.

use raylib::prelude::{RaylibDraw, Vector2};

use crate::math::color::Color;
use crate::math::vec3d::{Point, Size};

/// A 2D canvas in which to paint.
pub trait Canvas {
    /// A single pixel at `point`.
    fn point(&mut self, point: Point, color: Color);

    /// A line from `start` to `end` with a thickness.
    fn line(&mut self, start: Point, end: Point, width: f64, color: Color);

    /// A chain of segments through `points`, optionally closed back to the
    /// first point.
    fn lines(&mut self, points: &[Point], is_closed: bool, width: f64, color: Color) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], width, color);
        }
        if is_closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], width, color);
        }
    }

    /// A filled circle centered at `center`.
    fn circle(&mut self, center: Point, radius: f64, color: Color);

    /// A filled polygon from a fan of vertices.
    fn polygon(&mut self, points: &[Point], color: Color);

    /// A filled axis-aligned rectangle with its top-left corner at `origin`.
    fn rect(&mut self, origin: Point, size: Size, color: Color);

    /// Paint every pixel of the surface.
    fn fill(&mut self, color: Color);
}

fn to_vector2(point: Point) -> Vector2 {
    Vector2 {
        x: point.x as f32,
        y: point.y as f32,
    }
}

pub(crate) fn raylib_color(color: Color) -> raylib::prelude::Color {
    raylib::prelude::Color {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

/// Canvas backed by a raylib draw scope.
///
/// Generic over the scope so it works both inside a texture mode and on a
/// plain draw handle.
pub struct RaylibCanvas<'a, D: RaylibDraw> {
    surface: &'a mut D,
    size: Size,
}

impl<'a, D: RaylibDraw> RaylibCanvas<'a, D> {
    pub fn new(surface: &'a mut D, size: Size) -> Self {
        RaylibCanvas { surface, size }
    }
}

impl<D: RaylibDraw> Canvas for RaylibCanvas<'_, D> {
    fn point(&mut self, point: Point, color: Color) {
        self.surface.draw_pixel_v(to_vector2(point), raylib_color(color));
    }

    fn line(&mut self, start: Point, end: Point, width: f64, color: Color) {
        self.surface.draw_line_ex(
            to_vector2(start),
            to_vector2(end),
            width as f32,
            raylib_color(color),
        );
    }

    fn circle(&mut self, center: Point, radius: f64, color: Color) {
        self.surface
            .draw_circle_v(to_vector2(center), radius as f32, raylib_color(color));
    }

    fn polygon(&mut self, points: &[Point], color: Color) {
        // Triangle fan; convex polygons only, which covers the shapes the
        // simulations draw.
        let vertices: Vec<Vector2> = points.iter().copied().map(to_vector2).collect();
        self.surface.draw_triangle_fan(&vertices, raylib_color(color));
    }

    fn rect(&mut self, origin: Point, size: Size, color: Color) {
        self.surface.draw_rectangle_v(
            to_vector2(origin),
            to_vector2(Point::xy(size.width(), size.height())),
            raylib_color(color),
        );
    }

    fn fill(&mut self, color: Color) {
        self.surface.draw_rectangle(
            0,
            0,
            self.size.width() as i32,
            self.size.height() as i32,
            raylib_color(color),
        );
    }
}

/// A canvas that discards everything. Used for the ready pass and for
/// running frames in tests without a window.
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn point(&mut self, _point: Point, _color: Color) {}
    fn line(&mut self, _start: Point, _end: Point, _width: f64, _color: Color) {}
    fn circle(&mut self, _center: Point, _radius: f64, _color: Color) {}
    fn polygon(&mut self, _points: &[Point], _color: Color) {}
    fn rect(&mut self, _origin: Point, _size: Size, _color: Color) {}
    fn fill(&mut self, _color: Color) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SegmentLog {
        segments: Vec<(Point, Point)>,
    }

    impl Canvas for SegmentLog {
        fn point(&mut self, _point: Point, _color: Color) {}
        fn line(&mut self, start: Point, end: Point, _width: f64, _color: Color) {
            self.segments.push((start, end));
        }
        fn circle(&mut self, _center: Point, _radius: f64, _color: Color) {}
        fn polygon(&mut self, _points: &[Point], _color: Color) {}
        fn rect(&mut self, _origin: Point, _size: Size, _color: Color) {}
        fn fill(&mut self, _color: Color) {}
    }

    #[test]
    fn lines_draws_one_segment_per_consecutive_pair() {
        let points = [
            Point::xy(0.0, 0.0),
            Point::xy(10.0, 0.0),
            Point::xy(10.0, 10.0),
        ];
        let mut canvas = SegmentLog::default();
        canvas.lines(&points, false, 1.0, Color::WHITE);
        assert_eq!(
            canvas.segments,
            vec![(points[0], points[1]), (points[1], points[2])]
        );
    }

    #[test]
    fn closed_lines_join_the_last_point_back_to_the_first() {
        let points = [
            Point::xy(0.0, 0.0),
            Point::xy(10.0, 0.0),
            Point::xy(10.0, 10.0),
        ];
        let mut canvas = SegmentLog::default();
        canvas.lines(&points, true, 1.0, Color::WHITE);
        assert_eq!(canvas.segments.len(), 3);
        assert_eq!(canvas.segments[2], (points[2], points[0]));
    }
}
