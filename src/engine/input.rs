//! Per-frame input snapshot.
//!
//! Input is polled once per frame from the host window into a plain-data
//! [`Input`] value, so node logic reads a stable snapshot and stays testable
//! without a window.

use raylib::prelude::{KeyboardKey, MouseButton, RaylibHandle};
use rustc_hash::FxHashSet;

use crate::math::vec3d::Point;

/// A physical key on the keyboard. Subset the simulations care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    P,
    Q,
    R,
    S,
    W,
    Space,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    LShift,
    LCtrl,
}

impl Key {
    pub const ALL: [Key; 16] = [
        Key::A,
        Key::D,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::W,
        Key::Space,
        Key::Enter,
        Key::Escape,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::LShift,
        Key::LCtrl,
    ];

    fn binding(self) -> KeyboardKey {
        match self {
            Key::A => KeyboardKey::KEY_A,
            Key::D => KeyboardKey::KEY_D,
            Key::P => KeyboardKey::KEY_P,
            Key::Q => KeyboardKey::KEY_Q,
            Key::R => KeyboardKey::KEY_R,
            Key::S => KeyboardKey::KEY_S,
            Key::W => KeyboardKey::KEY_W,
            Key::Space => KeyboardKey::KEY_SPACE,
            Key::Enter => KeyboardKey::KEY_ENTER,
            Key::Escape => KeyboardKey::KEY_ESCAPE,
            Key::Up => KeyboardKey::KEY_UP,
            Key::Down => KeyboardKey::KEY_DOWN,
            Key::Left => KeyboardKey::KEY_LEFT,
            Key::Right => KeyboardKey::KEY_RIGHT,
            Key::LShift => KeyboardKey::KEY_LEFT_SHIFT,
            Key::LCtrl => KeyboardKey::KEY_LEFT_CONTROL,
        }
    }
}

/// One of the buttons on a mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseBtn {
    Left,
    Middle,
    Right,
}

/// The input state for one frame.
#[derive(Clone, Debug, Default)]
pub struct Input {
    /// Pointer position in the same coordinate space as node positions.
    pub mouse: Point,
    left_down: bool,
    middle_down: bool,
    right_down: bool,
    keys_down: FxHashSet<Key>,
}

impl Input {
    /// Poll the host window for the current frame's state.
    pub fn poll(rl: &RaylibHandle) -> Input {
        let mouse = rl.get_mouse_position();
        let mut keys_down = FxHashSet::default();
        for key in Key::ALL {
            if rl.is_key_down(key.binding()) {
                keys_down.insert(key);
            }
        }
        Input {
            mouse: Point::xy(mouse.x as f64, mouse.y as f64),
            left_down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
            middle_down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_MIDDLE),
            right_down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_RIGHT),
            keys_down,
        }
    }

    /// Whether the given keyboard key is pressed this frame.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether the given mouse button is pressed this frame.
    pub fn mouse_pressed(&self, button: MouseBtn) -> bool {
        match button {
            MouseBtn::Left => self.left_down,
            MouseBtn::Middle => self.middle_down,
            MouseBtn::Right => self.right_down,
        }
    }
}
