//! A particle system that can be affected by physics.

use crate::engine::Context;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size, Vec3D};
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::NodeId;
use crate::sims::Sim;
use crate::sims::mover::Mover;

/// A mover that decays over time.
///
/// The lifespan runs from 255 down to below zero, doubling as the alpha
/// channel of the mover it wraps.
pub struct Particle {
    transform: Transform2D,
    lifespan: i32,
    decay_rate: i32,
    color: Color,
}

impl Particle {
    pub fn new(position: Point, decay_rate: i32, color: Color) -> Self {
        Particle {
            transform: Transform2D::new(position),
            lifespan: 255,
            decay_rate,
            color,
        }
    }

    pub fn dead(&self) -> bool {
        self.lifespan < 0
    }
}

impl Script for Particle {
    fn type_name(&self) -> &'static str {
        "Particle"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.transform)
    }

    fn build(&mut self) -> Vec<Node> {
        let mut mover = Mover::new(self.transform.position);
        mover.acceleration = Vec3D::xy(0.0, 0.1);
        mover.velocity = Vec3D::xy(
            fastrand::i32(-2..=2) as f64,
            fastrand::i32(0..=4) as f64,
        );
        mover.color = self.color;
        vec![mover.node().with_tag("Mover")]
    }

    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        self.lifespan -= self.decay_rate;

        let Some(mover_id) = ctx.tree.get_node(id, "Mover") else {
            return;
        };
        if let Some(mover) = ctx.tree.script_mut::<Mover>(mover_id) {
            self.transform.position = mover.position();
            mover.color.a = self.lifespan.clamp(0, 255) as u8;
        }
    }
}

/// A point source of decaying particles.
pub struct ParticleEmitter {
    transform: Transform2D,
    max_particles: usize,
    color: Color,
}

impl ParticleEmitter {
    pub fn new(position: Point, color: Color) -> Self {
        ParticleEmitter {
            transform: Transform2D::new(position),
            max_particles: 1000,
            color,
        }
    }
}

impl Script for ParticleEmitter {
    fn type_name(&self) -> &'static str {
        "ParticleEmitter"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.transform)
    }

    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        let particles: Vec<NodeId> = ctx
            .tree
            .get(id)
            .map(|node| node.children().to_vec())
            .unwrap_or_default();

        for particle_id in particles {
            // A flat pull rather than obey_gravity; every particle falls
            // the same regardless of mass.
            if let Some(mover_id) = ctx.tree.get_node(particle_id, "Mover") {
                if let Some(mover) = ctx.tree.script_mut::<Mover>(mover_id) {
                    mover.add_force(Vec3D::xy(0.0, 0.4));
                }
            }
            let dead = ctx
                .tree
                .script_ref::<Particle>(particle_id)
                .map(|particle| particle.dead())
                .unwrap_or(true);
            if dead {
                ctx.tree.remove(particle_id);
            }
        }

        let count = ctx
            .tree
            .get(id)
            .map(|node| node.children().len())
            .unwrap_or(0);
        if count < self.max_particles {
            let particle = Particle::new(self.transform.position, 1, self.color);
            ctx.tree.mount(Node::script(particle), id);
        }
    }
}

pub fn scene(screen: Size) -> Sim {
    let source = Point::xy(screen.width() / 2.0, screen.height() / 4.0);
    Sim {
        root: Node::script(ParticleEmitter::new(source, Color::BLUE)).with_tag("Emitter"),
        clear: true,
    }
}
