//! 2D vector and colour value types
//!
//! Plain `Copy` types with the arithmetic the rasterizer leans on:
//! component-wise addition, uniform scaling, dot/cross products and
//! linear interpolation. No clamping happens here; colours outside
//! [0, 1] are carried as-is and only clamped when quantised to bytes.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 2D vector / point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of two vectors in the XY plane
    #[inline]
    pub fn cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn swap_coords(&self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Mirror across the X axis
    #[inline]
    pub fn reflect_x(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
        }
    }

    /// Mirror across the Y axis
    #[inline]
    pub fn reflect_y(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
        }
    }

    /// Pixel cell containing this point (truncation toward zero)
    #[inline]
    pub fn to_pixel(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

/// Component-wise product
impl Mul for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Colour
// ============================================================================

/// RGBA colour with floating-point channels, nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colour4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Colour4 {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour (alpha = 1.0)
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation of all four channels, `t` unclamped
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }

    /// Quantise to 8-bit RGBA, clamping each channel to [0, 1]
    #[inline]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            quantise(self.r),
            quantise(self.g),
            quantise(self.b),
            quantise(self.a),
        ]
    }
}

#[inline]
fn quantise(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Colour4 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Add for Colour4 {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(self.r + o.r, self.g + o.g, self.b + o.b, self.a + o.a)
    }
}

impl AddAssign for Colour4 {
    #[inline]
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl Sub for Colour4 {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(self.r - o.r, self.g - o.g, self.b - o.b, self.a - o.a)
    }
}

impl Mul<f32> for Colour4 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}

// ============================================================================
// Vertex
// ============================================================================

/// A position carrying its own colour, the unit for lines and polygons
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec2,
    pub colour: Colour4,
}

impl Vertex {
    #[inline]
    pub const fn new(position: Vec2, colour: Colour4) -> Self {
        Self { position, colour }
    }

    #[inline]
    pub const fn at(x: f32, y: f32, colour: Colour4) -> Self {
        Self {
            position: Vec2::new(x, y),
            colour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_sign_follows_winding() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        assert_eq!(a.cross(&b), 1.0);
        assert_eq!(b.cross(&a), -1.0);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        assert_eq!(Vec2::zero().normalize(), Vec2::zero());
        let n = Vec2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_to_pixel_truncates_toward_zero() {
        assert_eq!(Vec2::new(2.9, 3.1).to_pixel(), (2, 3));
        assert_eq!(Vec2::new(-0.5, 0.5).to_pixel(), (0, 0));
    }

    #[test]
    fn test_colour_lerp_midpoint() {
        let mid = Colour4::RED.lerp(Colour4::BLUE, 0.5);
        assert!(mid.approx_eq(&Colour4::new(0.5, 0.0, 0.5, 1.0), 1e-6));
    }

    #[test]
    fn test_colour_arithmetic_is_unclamped() {
        let c = Colour4::WHITE + Colour4::WHITE;
        assert_eq!(c, Colour4::new(2.0, 2.0, 2.0, 2.0));
        assert_eq!(c.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!((Colour4::BLACK - Colour4::WHITE).to_rgba8(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_colour_alpha_defaults_to_opaque_in_json() {
        let c: Colour4 = serde_json::from_str(r#"{"r":0.5,"g":0.25,"b":0.0}"#).unwrap();
        assert_eq!(c, Colour4::rgb(0.5, 0.25, 0.0));
    }
}
