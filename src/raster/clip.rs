//! Outcodes and line clipping against an axis-aligned clip rectangle
//!
//! The rectangle is half-open: `[left, right) x [bottom, top)`. A point
//! exactly on the right or top edge is outside.

use crate::math::{Vec2, Vertex};
use serde::{Deserialize, Serialize};

pub const INSIDE: u8 = 0;
pub const LEFT: u8 = 1;
pub const RIGHT: u8 = 1 << 1;
pub const BOTTOM: u8 = 1 << 2;
pub const TOP: u8 = 1 << 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl ClipRect {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// The whole of a `width` x `height` buffer
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, width as f32, 0.0, height as f32)
    }

    /// Overlap of two rectangles; empty overlaps come out inverted and
    /// reject everything
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            self.left.max(other.left),
            self.right.min(other.right),
            self.bottom.max(other.bottom),
            self.top.min(other.top),
        )
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        compute_outcode(p, self) == INSIDE
    }
}

/// Classify `p` against each side of `rect`
///
/// Left and bottom are inclusive, right and top exclusive.
#[inline]
pub fn compute_outcode(p: Vec2, rect: &ClipRect) -> u8 {
    let mut code = INSIDE;
    if p.x < rect.left {
        code |= LEFT;
    } else if p.x >= rect.right {
        code |= RIGHT;
    }
    if p.y < rect.bottom {
        code |= BOTTOM;
    } else if p.y >= rect.top {
        code |= TOP;
    }
    code
}

/// Result of clipping a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineClip {
    /// Both endpoints inside; draw as given
    Inside,
    /// Part of the segment is visible between these endpoints
    Clipped(Vertex, Vertex),
    /// Nothing of the segment is visible
    Rejected,
}

/// Clip `v1 -> v2` against `rect`
///
/// Outcodes decide the trivial cases: both zero accepts, a shared outside
/// bit rejects. Everything else goes through Liang-Barsky against the
/// closed rectangle; endpoint colours are re-interpolated at the clip
/// parameters so shading along the visible part is unchanged. Pixels that
/// land exactly on the right/top edge are dropped later by the point write.
pub fn clip_line(v1: &Vertex, v2: &Vertex, rect: &ClipRect) -> LineClip {
    let code1 = compute_outcode(v1.position, rect);
    let code2 = compute_outcode(v2.position, rect);

    if code1 == INSIDE && code2 == INSIDE {
        return LineClip::Inside;
    }
    if code1 & code2 != 0 {
        return LineClip::Rejected;
    }

    let Some((t0, t1)) = liang_barsky(v1.position, v2.position, rect) else {
        return LineClip::Rejected;
    };

    // Positions are rebuilt in f64 and pinned to the rectangle; in f32 the
    // cancellation on far-off endpoints can land them well inside it
    let (x1, y1) = (f64::from(v1.position.x), f64::from(v1.position.y));
    let (dx, dy) = (f64::from(v2.position.x) - x1, f64::from(v2.position.y) - y1);
    let at = |t: f64| {
        let x = ((x1 + dx * t) as f32).max(rect.left).min(rect.right);
        let y = ((y1 + dy * t) as f32).max(rect.bottom).min(rect.top);
        Vertex::new(Vec2::new(x, y), v1.colour.lerp(v2.colour, t as f32))
    };
    let start = if t0 > 0.0 { at(t0) } else { *v1 };
    let end = if t1 < 1.0 { at(t1) } else { *v2 };
    LineClip::Clipped(start, end)
}

/// Parametric range `[t0, t1]` of the segment inside `rect`, if any
fn liang_barsky(p1: Vec2, p2: Vec2, rect: &ClipRect) -> Option<(f64, f64)> {
    let (x1, y1) = (f64::from(p1.x), f64::from(p1.y));
    let dx = f64::from(p2.x) - x1;
    let dy = f64::from(p2.y) - y1;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let edges = [
        (-dx, x1 - f64::from(rect.left)),
        (dx, f64::from(rect.right) - x1),
        (-dy, y1 - f64::from(rect.bottom)),
        (dy, f64::from(rect.top) - y1),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: either fully outside it or irrelevant
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((t0, t1))
}
