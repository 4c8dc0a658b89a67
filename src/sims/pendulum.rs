//! A swinging pendulum, with a springy string.

use crate::engine::Context;
use crate::engine::canvas::Canvas;
use crate::math::color::Color;
use crate::math::vec3d::{Point, Size, Vec3D};
use crate::scene::node::{Node, Script};
use crate::scene::node2d::Transform2D;
use crate::scene::tree::NodeId;
use crate::sims::Sim;
use crate::sims::mover::Mover;

/// A spring that obeys Hooke's law.
pub struct Spring {
    transform: Transform2D,
    end: Point,
    length: f64,
    k: f64,
    color: Color,
}

impl Spring {
    pub fn new(anchor: Point, end: Point, length: f64) -> Self {
        Spring {
            transform: Transform2D::new(anchor),
            end,
            length,
            k: 0.1,
            color: Color::WHITE,
        }
    }

    /// Attach the spring to a bob at `bob_position` and work out the
    /// tension on it.
    ///
    /// Returns the bob's position (pulled back in range when the spring
    /// would stretch or compress too far) and the tension force to apply.
    pub fn connect(&mut self, bob_position: Point) -> (Point, Vec3D) {
        let anchor = self.transform.position;
        let new_length = (bob_position - anchor).size();
        // Extended springs have x > 0, compressed ones x < 0.
        let mut x = new_length - self.length;
        let mut position = bob_position;

        if !(-(0.50 * self.length) < x && x < 1.25 * self.length) {
            x = x.clamp(-(0.5 * self.length), 1.25 * self.length);
            let constrained_length = self.length + x;
            position = anchor + (bob_position - anchor).normalize() * constrained_length;
        }

        self.end = position;
        let tension = (position - anchor).normalize() * (-1.0 * self.k * x);
        (position, tension)
    }
}

impl Script for Spring {
    fn type_name(&self) -> &'static str {
        "Spring"
    }

    fn transform(&self) -> Option<&Transform2D> {
        Some(&self.transform)
    }

    fn transform_mut(&mut self) -> Option<&mut Transform2D> {
        Some(&mut self.transform)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.line(self.transform.position, self.end, 1.0, self.color);
    }
}

/// A bob attached to a spring.
pub struct Pendulum {
    pivot: Point,
    length: f64,
}

impl Pendulum {
    pub fn new(pivot: Point, length: f64) -> Self {
        Pendulum { pivot, length }
    }
}

impl Script for Pendulum {
    fn type_name(&self) -> &'static str {
        "Pendulum"
    }

    fn build(&mut self) -> Vec<Node> {
        // The spring starts at its rest length, hanging straight down, then
        // the bob is swung a quarter turn to the side to set it in motion.
        let rest = Point::xy(self.pivot.x, self.pivot.y + self.length);
        let mut bob = Mover::new(rest);
        bob.transform.pivot = self.pivot;
        bob.transform.set_rotation(90.0);
        bob.color = Color::rgb(18, 18, 18);
        let start = bob.position();

        vec![
            Node::script(Spring::new(self.pivot, start, self.length)).with_tag("Spring"),
            bob.node().with_tag("Bob"),
        ]
    }

    fn tick(&mut self, id: NodeId, _delta: f64, ctx: &mut Context) {
        let Some(bob_id) = ctx.tree.get_node(id, "Bob") else {
            return;
        };
        let Some(spring_id) = ctx.tree.get_node(id, "Spring") else {
            return;
        };

        let Some(bob_position) = ctx.tree.script_mut::<Mover>(bob_id).map(|bob| {
            bob.obey_gravity();
            bob.position()
        }) else {
            return;
        };

        let Some((position, tension)) = ctx
            .tree
            .script_mut::<Spring>(spring_id)
            .map(|spring| spring.connect(bob_position))
        else {
            return;
        };

        if let Some(bob) = ctx.tree.script_mut::<Mover>(bob_id) {
            bob.transform.position = position;
            bob.add_force(tension);
        }
    }
}

pub fn scene(screen: Size) -> Sim {
    let pivot = Point::xy(screen.width() / 2.0, screen.height() / 2.0);
    Sim {
        root: Node::script(Pendulum::new(pivot, 100.0)).with_tag("Pendulum"),
        clear: true,
    }
}
