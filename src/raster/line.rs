use super::clip::{clip_line, ClipRect, LineClip};
use super::shading::{blend_over, Shading};
use super::{BlendMode, Rasterizer};
use crate::math::{Colour4, Vertex};

/// Unit step for a signed delta
#[inline]
fn step_of(delta: i32) -> i32 {
    delta.signum()
}

impl Rasterizer {
    /// Draw a line from `v1` to `v2`
    ///
    /// The segment is clipped to the active clip rectangle first. Colour is
    /// `v1`'s unless the fill mode is interpolated; with alpha blending on,
    /// each pixel is composited over what is already in the buffer. Every
    /// pixel written becomes the current foreground colour.
    pub fn draw_line(&mut self, v1: &Vertex, v2: &Vertex, thickness: u32) {
        let shading = Shading::from(self.fill_mode);
        self.draw_clipped_line(v1, v2, thickness, shading);
    }

    pub(super) fn draw_clipped_line(
        &mut self,
        v1: &Vertex,
        v2: &Vertex,
        thickness: u32,
        shading: Shading,
    ) {
        // Nothing outside the buffer can be written, so the walk never has
        // to cover more than the buffer extent
        let rect = self
            .clip
            .intersect(&ClipRect::full(self.width(), self.height()));
        match clip_line(v1, v2, &rect) {
            LineClip::Inside => self.trace_line(v1, v2, thickness, shading),
            LineClip::Clipped(a, b) => self.trace_line(&a, &b, thickness, shading),
            LineClip::Rejected => {},
        }
    }

    /// Integer incremental traversal generalised to all octants
    ///
    /// The long axis advances one pixel per step; an error accumulator
    /// seeded at half the long delta decides when the short axis follows.
    /// `long + 1` pixels are visited, so a zero-length line is one point.
    fn trace_line(&mut self, v1: &Vertex, v2: &Vertex, thickness: u32, shading: Shading) {
        let mut pos = v1.position;
        let dx = (v2.position.x - v1.position.x) as i32;
        let dy = (v2.position.y - v1.position.y) as i32;

        // Steep lines walk along y
        let steep = dx.abs() <= dy.abs();

        let dx1 = step_of(dx);
        let dy1 = step_of(dy);
        let (dx2, dy2) = if steep { (0, dy1) } else { (dx1, 0) };

        let (delta_long, delta_short) = if steep {
            (dy.abs(), dx.abs())
        } else {
            (dx.abs(), dy.abs())
        };

        // Wider than the buffer adds nothing
        let half = (thickness / 2).min(self.width().max(self.height())) as i32;
        let lerp_alpha = self.config.interpolate_alpha;
        let mut epsilon = delta_long >> 1;

        for i in 0..=delta_long {
            let (x, y) = pos.to_pixel();

            let colour = shading.resolve(v1.colour, v2.colour, i, delta_long, lerp_alpha);
            self.fg = match self.blend_mode {
                BlendMode::AlphaBlend => self.alpha_blend(colour, x, y),
                BlendMode::None => colour,
            };

            if thickness > 1 {
                // Spread across the minor axis
                for offset in -half..=half {
                    if steep {
                        self.plot(x + offset, y);
                    } else {
                        self.plot(x, y + offset);
                    }
                }
            } else {
                self.plot(x, y);
            }

            epsilon += delta_short;
            if epsilon >= delta_long {
                pos.x += dx1 as f32;
                pos.y += dy1 as f32;
                epsilon -= delta_long;
            } else {
                pos.x += dx2 as f32;
                pos.y += dy2 as f32;
            }
        }
    }

    /// Composite `colour` over the buffer pixel at (x, y)
    ///
    /// Outside the writable area the source colour comes back untouched.
    pub fn alpha_blend(&self, colour: Colour4, x: i32, y: i32) -> Colour4 {
        if self.writable(x, y) {
            match self.buffer.get(x, y) {
                Some(dst) => blend_over(colour, dst),
                None => colour,
            }
        } else {
            colour
        }
    }
}
