//! Three-component vector math.
//!
//! [`Vec3D`] is the one value type every simulation leans on: positions,
//! velocities, forces, and sizes are all vectors. Operations never mutate;
//! each one returns a new vector.

use std::f64::consts::TAU;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Convert an angle from degrees to radians.
#[inline]
pub fn deg2rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convert an angle from radians to degrees.
#[inline]
pub fn rad2deg(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Remap `n` from the range `[old_min, old_max]` into `[new_min, new_max]`.
#[inline]
pub fn map_range(n: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> f64 {
    (n / (old_max - old_min)) * (new_max - new_min)
}

/// A 3-dimensional vector with x, y, and z components.
///
/// Most of the engine runs in 2D; the z component rides along at zero unless
/// a simulation puts it to use.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A point in 2D/3D space is just a vector from the origin.
pub type Point = Vec3D;

/// A width/height pair. Use [`Vec3D::width`] and [`Vec3D::height`] to read it.
pub type Size = Vec3D;

impl Vec3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3D { x, y, z }
    }

    /// A 2D vector; z is set to zero.
    pub const fn xy(x: f64, y: f64) -> Self {
        Vec3D { x, y, z: 0.0 }
    }

    /// The vector pointing at the origin, `(0, 0, 0)`.
    pub const fn origin() -> Self {
        Vec3D::new(0.0, 0.0, 0.0)
    }

    /// A vector with all components set to `n`.
    ///
    /// Convenient when adding or subtracting a scalar from every component.
    pub const fn scalar(n: f64) -> Self {
        Vec3D::new(n, n, n)
    }

    /// Width accessor for vectors used as a [`Size`]. Maps onto x.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x
    }

    /// Height accessor for vectors used as a [`Size`]. Maps onto y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y
    }

    /// The magnitude of the vector.
    pub fn size(&self) -> f64 {
        self.size_sq().sqrt()
    }

    /// The squared magnitude. Cheaper than [`Vec3D::size`] for distance
    /// comparisons in hot loops.
    pub fn size_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// The unit vector pointing in the same direction.
    ///
    /// Normalizing the zero vector returns the zero vector unchanged; this is
    /// a defined special case, not an error.
    pub fn normalize(&self) -> Vec3D {
        let size = self.size();
        if size != 0.0 { *self / size } else { *self }
    }

    /// Dot product of two vectors.
    pub fn dot(&self, other: Vec3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product of two vectors.
    pub fn cross(&self, other: Vec3D) -> Vec3D {
        Vec3D::new(
            self.y * other.z - other.y * self.z,
            self.x * other.z - other.x * self.z,
            self.x * other.y - other.x * self.y,
        )
    }

    /// The angle between two vectors in radians.
    pub fn angle_between(&self, other: Vec3D) -> f64 {
        (self.dot(other) / (self.size() * other.size())).acos()
    }

    /// The angle of the vector in a 2D context, normalized into `[0, 2π)`.
    pub fn angle_2d(&self) -> f64 {
        let angle = self.y.atan2(self.x);
        if angle >= 0.0 { angle } else { TAU + angle }
    }

    /// Rotate the vector by `degrees` around the pivot point `around`.
    ///
    /// Works in the x/y plane: the offset from the pivot is decomposed into a
    /// radius and a direction, the direction is run through a 2D rotation
    /// matrix, and the two are recomposed.
    pub fn rotate(&self, degrees: f64, around: Point) -> Vec3D {
        let theta = deg2rad(degrees).rem_euclid(TAU);
        let radius = (*self - around).size();
        let direction = (*self - around).normalize();
        let x = direction.dot(Vec3D::xy(theta.cos(), -theta.sin()));
        let y = direction.dot(Vec3D::xy(theta.sin(), theta.cos()));
        around + Point::xy(x, y) * radius
    }

    /// Apply `func` to each component.
    pub fn map(&self, func: impl Fn(f64) -> f64) -> Vec3D {
        Vec3D::new(func(self.x), func(self.y), func(self.z))
    }

    /// The absolute value of the difference between two vectors.
    pub fn abs_diff(&self, other: Vec3D) -> Vec3D {
        (*self - other).map(f64::abs)
    }

    /// Clamp the magnitude into `[min, max]`, preserving direction.
    pub fn constrain_size(&self, min: f64, max: f64) -> Vec3D {
        self.normalize() * self.size().clamp(min, max)
    }

    /// Clamp each component independently into the box spanned by
    /// `min_bound` and `max_bound`. Used for screen-bounds clamping.
    pub fn constrain(&self, min_bound: Vec3D, max_bound: Vec3D) -> Vec3D {
        Vec3D::new(
            self.x.clamp(min_bound.x, max_bound.x),
            self.y.clamp(min_bound.y, max_bound.y),
            self.z.clamp(min_bound.z, max_bound.z),
        )
    }
}

impl Add for Vec3D {
    type Output = Vec3D;
    fn add(self, other: Vec3D) -> Vec3D {
        Vec3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3D {
    type Output = Vec3D;
    fn sub(self, other: Vec3D) -> Vec3D {
        Vec3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl AddAssign for Vec3D {
    fn add_assign(&mut self, other: Vec3D) {
        *self = *self + other;
    }
}

impl SubAssign for Vec3D {
    fn sub_assign(&mut self, other: Vec3D) {
        *self = *self - other;
    }
}

impl Mul<f64> for Vec3D {
    type Output = Vec3D;
    fn mul(self, n: f64) -> Vec3D {
        Vec3D::new(self.x * n, self.y * n, self.z * n)
    }
}

impl Mul<Vec3D> for f64 {
    type Output = Vec3D;
    fn mul(self, v: Vec3D) -> Vec3D {
        v * self
    }
}

/// Scalar division. Dividing by zero is a caller-side precondition violation,
/// not something the vector guards against.
impl Div<f64> for Vec3D {
    type Output = Vec3D;
    fn div(self, n: f64) -> Vec3D {
        Vec3D::new(self.x / n, self.y / n, self.z / n)
    }
}

impl Neg for Vec3D {
    type Output = Vec3D;
    fn neg(self) -> Vec3D {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3D, b: Vec3D) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn deg2rad_converts() {
        assert_eq!(deg2rad(180.0), PI);
        assert_eq!(deg2rad(-90.0), -PI / 2.0);
    }

    #[test]
    fn rad2deg_converts() {
        assert_eq!(rad2deg(PI), 180.0);
        assert_eq!(rad2deg(-PI / 2.0), -90.0);
    }

    #[test]
    fn deg2rad_and_rad2deg_cancel_each_other() {
        assert_eq!(rad2deg(deg2rad(45.0)), 45.0);
        assert_eq!(rad2deg(deg2rad(-45.0)), -45.0);
    }

    #[test]
    fn map_range_rescales() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(map_range(1.0, 0.0, 4.0, 0.0, 2.0), 0.5);
    }

    #[test]
    fn origin_is_all_zero() {
        assert_eq!(Vec3D::origin(), Vec3D::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn scalar_fills_every_component() {
        assert_eq!(Vec3D::scalar(10.0), Vec3D::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn angle_2d_is_normalized_to_a_full_turn() {
        assert!(approx_eq(rad2deg(Vec3D::new(1.0, 1.0, 0.0).angle_2d()), 45.0));
        // Third-quadrant angles come back positive.
        assert!(approx_eq(
            rad2deg(Vec3D::new(-1.0, -1.0, 0.0).angle_2d()),
            225.0
        ));
    }

    #[test]
    fn size_is_the_magnitude() {
        assert_eq!(Vec3D::new(3.0, 4.0, 0.0).size(), 5.0);
        assert_eq!(Vec3D::new(3.0, -4.0, 0.0).size(), 5.0);
    }

    #[test]
    fn size_of_unit_vector_is_one() {
        assert!(approx_eq(Vec3D::new(4.0, 5.0, 6.0).normalize().size(), 1.0));
    }

    #[test]
    fn normalizing_vector_with_size_zero_stays_at_origin() {
        assert_eq!(Vec3D::origin().normalize(), Vec3D::origin());
    }

    #[test]
    fn normalize_keeps_angle() {
        let vec = Vec3D::new(4.0, 5.0, 0.0);
        assert!(approx_eq(vec.angle_2d(), vec.normalize().angle_2d()));
    }

    #[test]
    fn dot_product() {
        let v1 = Vec3D::new(4.0, 5.0, 0.0);
        let v2 = Vec3D::new(4.0, 5.0, 6.0);
        assert_eq!(v1.dot(v2), 41.0);
    }

    #[test]
    fn dot_product_is_commutative() {
        let v1 = Vec3D::new(4.0, 5.0, 0.0);
        let v2 = Vec3D::new(4.0, 5.0, 6.0);
        assert_eq!(v1.dot(v2), v2.dot(v1));
    }

    #[test]
    fn cross_product_is_anti_commutative() {
        let v1 = Vec3D::new(4.0, 5.0, 0.0);
        let v2 = Vec3D::new(4.0, 5.0, 6.0);
        assert_eq!(v1.cross(v2), -1.0 * v2.cross(v1));
    }

    #[test]
    fn constrain_size_clamps_the_magnitude() {
        assert!(approx_eq(
            Vec3D::new(4.0, 3.0, 0.0).constrain_size(6.0, 10.0).size(),
            6.0
        ));
        assert!(approx_eq(
            Vec3D::new(12.0, 5.0, 0.0).constrain_size(6.0, 10.0).size(),
            10.0
        ));
    }

    #[test]
    fn constrain_leaves_in_bounds_vectors_alone() {
        let min = Vec3D::origin();
        let max = Vec3D::new(640.0, 360.0, 0.0);
        assert_eq!(
            Vec3D::new(4.0, 5.0, 0.0).constrain(min, max),
            Vec3D::new(4.0, 5.0, 0.0)
        );
    }

    #[test]
    fn constrain_clamps_each_component() {
        let min = Vec3D::origin();
        let max = Vec3D::new(640.0, 360.0, 0.0);
        assert_eq!(
            Vec3D::new(700.0, -5.0, 0.0).constrain(min, max),
            Vec3D::new(640.0, 0.0, 0.0)
        );
    }

    #[test]
    fn arithmetic_operators() {
        let v1 = Vec3D::new(4.0, 5.0, 0.0);
        let v2 = Vec3D::new(3.0, 6.0, 1.0);
        assert_eq!(v1 + v2, Vec3D::new(7.0, 11.0, 1.0));
        assert_eq!(v1 - v2, Vec3D::new(1.0, -1.0, -1.0));
        assert_eq!(v1 * 2.0, Vec3D::new(8.0, 10.0, 0.0));
        assert_eq!(2.0 * v1, Vec3D::new(8.0, 10.0, 0.0));
        assert_eq!(v1 / 2.0, Vec3D::new(2.0, 2.5, 0.0));
        assert_eq!(-v1, Vec3D::new(-4.0, -5.0, 0.0));
    }

    #[test]
    fn size_width_and_height_accessors() {
        let window: Size = Size::xy(640.0, 360.0);
        assert_eq!(window.width(), 640.0);
        assert_eq!(window.height(), 360.0);
    }

    #[test]
    fn rotate_a_quarter_turn() {
        let rotated = Vec3D::xy(1.0, 0.0).rotate(90.0, Point::origin());
        assert!(vec_approx_eq(rotated, Vec3D::xy(0.0, 1.0)));
    }

    #[test]
    fn rotate_around_a_pivot_keeps_the_radius() {
        let pivot = Point::xy(100.0, 100.0);
        let vec = Vec3D::xy(130.0, 100.0);
        let rotated = vec.rotate(33.0, pivot);
        assert!(approx_eq((rotated - pivot).size(), 30.0));
    }

    #[test]
    fn two_half_turns_round_trip() {
        let pivot = Point::xy(7.0, -2.0);
        let vec = Vec3D::xy(20.0, 5.0);
        let round_trip = vec.rotate(180.0, pivot).rotate(180.0, pivot);
        assert!(vec_approx_eq(round_trip, vec));
    }

    #[test]
    fn negative_rotation_wraps() {
        let a = Vec3D::xy(3.0, 4.0).rotate(-90.0, Point::origin());
        let b = Vec3D::xy(3.0, 4.0).rotate(270.0, Point::origin());
        assert!(vec_approx_eq(a, b));
    }

    #[test]
    fn map_applies_to_each_component() {
        assert_eq!(
            Vec3D::new(-1.0, 2.0, -3.0).map(f64::abs),
            Vec3D::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn abs_diff_is_componentwise() {
        let a = Vec3D::new(1.0, 5.0, 2.0);
        let b = Vec3D::new(4.0, 2.0, 2.0);
        assert_eq!(a.abs_diff(b), Vec3D::new(3.0, 3.0, 0.0));
    }
}
