//! RGBA color values and a few common constants.

/// Color of a pixel, stored as 8-bit RGBA.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// An opaque color from individual channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// A color from normalized RGB, with channels in `[0, 1]` instead of
    /// `[0, 255]`.
    pub fn norm(r: f64, g: f64, b: f64) -> Color {
        Color::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// A color from HSV components, each in `[0, 1]`.
    pub fn hsv(h: f64, s: f64, v: f64) -> Color {
        if s == 0.0 {
            return Color::norm(v, v, v);
        }
        let i = (h * 6.0).floor();
        let f = h * 6.0 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match (i as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Color::norm(r, g, b)
    }

    /// A random color with the given opacity.
    pub fn random(a: u8) -> Color {
        Color {
            r: fastrand::u8(..),
            g: fastrand::u8(..),
            b: fastrand::u8(..),
            a,
        }
    }

    /// The same color with a different alpha channel.
    pub const fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }
}
