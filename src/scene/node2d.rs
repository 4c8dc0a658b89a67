//! Position and rotation for nodes that live somewhere on screen.

use crate::math::vec3d::{Point, deg2rad, rad2deg};

/// A 2D transform: a position, a pivot point, and an accumulated rotation.
///
/// Rotation is applied by rotating the position around the pivot, not by
/// storing an orientation matrix. Repeated small rotations therefore
/// accumulate floating-point drift; that is a known characteristic of the
/// model, accepted for this engine's scope.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform2D {
    pub position: Point,
    pub pivot: Point,
    rotation: f64,
}

impl Transform2D {
    pub fn new(position: Point) -> Self {
        Transform2D {
            position,
            pivot: Point::origin(),
            rotation: 0.0,
        }
    }

    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = pivot;
        self
    }

    /// The accumulated rotation angle in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotate the position around the pivot by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        self.position = self.position.rotate(degrees, self.pivot);
        self.rotation += deg2rad(degrees);
    }

    /// Rotate around the pivot until the accumulated angle is `degrees`.
    ///
    /// Computes the delta from the currently stored angle and applies that
    /// delta as a relative rotation.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.position = self
            .position
            .rotate(degrees - rad2deg(self.rotation), self.pivot);
        self.rotation = deg2rad(degrees);
    }

    /// The 2D angle from this transform's position towards `point`.
    pub fn angle_to(&self, point: Point) -> f64 {
        (point - self.position).normalize().angle_2d()
    }

    /// Rotate the transform towards a point.
    pub fn look_at(&mut self, point: Point) {
        self.set_rotation(rad2deg(self.angle_to(point)));
    }

    // Bookkeeping for shapes that rotate their own vertices (polygons) but
    // still need the accumulated angle tracked here.
    pub(crate) fn accumulate_rotation(&mut self, radians: f64) {
        self.rotation += radians;
    }

    pub(crate) fn store_rotation(&mut self, radians: f64) {
        self.rotation = radians;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3d::deg2rad;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn point_approx_eq(a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn rotate_accumulates_the_angle() {
        let mut transform = Transform2D::new(Point::xy(10.0, 0.0));
        transform.rotate(90.0);
        transform.rotate(45.0);
        assert!(approx_eq(transform.rotation(), deg2rad(135.0)));
    }

    #[test]
    fn rotate_moves_the_position_around_the_pivot() {
        let mut transform =
            Transform2D::new(Point::xy(110.0, 100.0)).with_pivot(Point::xy(100.0, 100.0));
        transform.rotate(90.0);
        assert!(point_approx_eq(transform.position, Point::xy(100.0, 110.0)));
    }

    #[test]
    fn set_rotation_applies_the_delta_from_the_stored_angle() {
        let mut transform =
            Transform2D::new(Point::xy(110.0, 100.0)).with_pivot(Point::xy(100.0, 100.0));
        transform.rotate(90.0);
        // Already at 90 degrees, so this should be a net quarter turn back.
        transform.set_rotation(0.0);
        assert!(point_approx_eq(transform.position, Point::xy(110.0, 100.0)));
        assert!(approx_eq(transform.rotation(), 0.0));
    }

    #[test]
    fn rotating_around_own_position_keeps_the_position() {
        let position = Point::xy(42.0, 17.0);
        let mut transform = Transform2D::new(position).with_pivot(position);
        transform.rotate(73.0);
        assert!(point_approx_eq(transform.position, position));
        assert!(approx_eq(transform.rotation(), deg2rad(73.0)));
    }

    #[test]
    fn look_at_points_towards_the_target() {
        let mut transform =
            Transform2D::new(Point::xy(1.0, 0.0)).with_pivot(Point::origin());
        transform.look_at(Point::xy(1.0, 5.0));
        assert!(approx_eq(transform.rotation(), deg2rad(90.0)));
    }
}
