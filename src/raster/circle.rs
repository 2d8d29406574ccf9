use super::Rasterizer;
use crate::math::{Colour4, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub centre: Vec2,
    pub radius: f32,
    pub colour: Colour4,
}

impl Circle {
    pub const fn new(centre: Vec2, radius: f32, colour: Colour4) -> Self {
        Self {
            centre,
            radius,
            colour,
        }
    }
}

/// Membership test for an offset with squared magnitude `m_sq`
///
/// Filled: inside the disc. Outline: inside the band
/// `(ring_factor * r², r²]`.
#[inline]
pub fn circle_covers(m_sq: f32, r_sq: f32, ring_factor: f32, filled: bool) -> bool {
    if filled {
        m_sq <= r_sq
    } else {
        m_sq > ring_factor * r_sq && m_sq <= r_sq
    }
}

impl Rasterizer {
    /// Draw a circle by testing every offset in its bounding square
    ///
    /// O(radius²) membership tests rather than a midpoint walk, limited to
    /// the part of the square that overlaps the buffer. The circle's colour
    /// becomes the foreground colour and is written without blending.
    pub fn draw_circle(&mut self, circle: &Circle, filled: bool) {
        self.fg = circle.colour;

        let r_sq = circle.radius * circle.radius;
        let ring_factor = self.config.circle_ring_factor;
        // Negative and NaN radii leave the ranges empty or a single
        // offset that fails the membership test
        let extent = circle.radius as i64;
        let xs = offsets_over(circle.centre.x, self.width(), extent);
        let ys = offsets_over(circle.centre.y, self.height(), extent);

        for y in ys {
            for x in xs.clone() {
                let (fx, fy) = (x as f32, y as f32);
                if circle_covers(fx * fx + fy * fy, r_sq, ring_factor, filled) {
                    let (px, py) = Vec2::new(circle.centre.x + fx, circle.centre.y + fy).to_pixel();
                    self.plot(px, py);
                }
            }
        }
    }
}

/// Offsets in `-extent..=extent` that can land on `0..size` from `centre`
///
/// Kept one wider on each side since pixels come from truncation.
fn offsets_over(centre: f32, size: u32, extent: i64) -> std::ops::RangeInclusive<i64> {
    let lo = ((-centre).floor() as i64).saturating_sub(1).max(extent.saturating_neg());
    let hi = ((size as f32 - centre).ceil() as i64)
        .saturating_add(1)
        .min(extent);
    lo..=hi
}
