//! Value types shared by the whole engine: vectors and colors.

pub mod color;
pub mod vec3d;

pub use color::Color;
pub use vec3d::{Point, Size, Vec3D, deg2rad, map_range, rad2deg};
