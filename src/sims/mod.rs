//! The bundled simulations.
//!
//! Each simulation module exposes a `scene` constructor returning a [`Sim`]:
//! the root node to mount plus the engine settings it needs. The launcher
//! looks them up by name through [`build`].

pub mod boids;
pub mod emitter;
pub mod liquid;
pub mod mover;
pub mod orbits;
pub mod pendulum;
pub mod spinners;
pub mod spiral;

use crate::math::vec3d::Size;
use crate::scene::node::Node;

/// A ready-to-run simulation: the scene to mount and how to run it.
pub struct Sim {
    pub root: Node,
    /// Whether the engine should clear the frame every tick. The spiral
    /// draws its trail by leaving old frames in place.
    pub clear: bool,
}

/// Every bundled simulation, with a one-line summary for `list --verbose`.
pub fn catalog() -> &'static [(&'static str, &'static str)] {
    &[
        ("boids", "A flock of boids steering together"),
        ("emitter", "A point source of decaying particles"),
        ("liquid", "A viscous pool that drags falling bodies"),
        ("orbits", "The Earth and the Moon orbiting each other"),
        ("pendulum", "A bob swinging on a springy string"),
        ("spinners", "A line spinning around the mouse cursor"),
        ("spiral", "A mesmerising spiral (runs without clearing)"),
    ]
}

/// Build the named simulation for a screen of the given size.
pub fn build(name: &str, screen: Size) -> Option<Sim> {
    match name {
        "boids" => Some(boids::scene(screen)),
        "emitter" => Some(emitter::scene(screen)),
        "liquid" => Some(liquid::scene(screen)),
        "orbits" => Some(orbits::scene(screen)),
        "pendulum" => Some(pendulum::scene(screen)),
        "spinners" => Some(spinners::scene(screen)),
        "spiral" => Some(spiral::scene(screen)),
        _ => None,
    }
}
