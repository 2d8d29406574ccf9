//! Colour resolution along a primitive and alpha compositing

use super::FillMode;
use crate::math::Colour4;

/// How a colour is picked between two endpoint colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Always the start colour
    Flat,
    /// Linear blend from start to end
    Interpolated,
}

impl Shading {
    /// Colour at `step` of `last` (inclusive) between `start` and `end`
    ///
    /// A zero-length run (`last == 0`) yields `start`. With
    /// `interpolate_alpha` off, the result keeps `start`'s alpha.
    #[inline]
    pub fn resolve(
        self,
        start: Colour4,
        end: Colour4,
        step: i32,
        last: i32,
        interpolate_alpha: bool,
    ) -> Colour4 {
        if last == 0 {
            return start;
        }
        self.resolve_at(start, end, step as f32 / last as f32, interpolate_alpha)
    }

    /// Colour at parameter `t` between `start` (t = 0) and `end` (t = 1)
    #[inline]
    pub fn resolve_at(
        self,
        start: Colour4,
        end: Colour4,
        t: f32,
        interpolate_alpha: bool,
    ) -> Colour4 {
        match self {
            Self::Flat => start,
            Self::Interpolated => lerp_colour(start, end, t, interpolate_alpha),
        }
    }
}

impl From<FillMode> for Shading {
    fn from(mode: FillMode) -> Self {
        match mode {
            FillMode::InterpolatedFilled => Self::Interpolated,
            FillMode::Unfilled | FillMode::FlatFilled => Self::Flat,
        }
    }
}

/// Lerp RGB, and alpha only when asked; otherwise `start.a` is kept
/// as-is, never reset to a default
#[inline]
pub fn lerp_colour(start: Colour4, end: Colour4, t: f32, interpolate_alpha: bool) -> Colour4 {
    let c = start.lerp(end, t);
    if interpolate_alpha {
        c
    } else {
        c.with_alpha(start.a)
    }
}

/// Source-over blend of `src` onto `dst` using `src.a` as the weight
///
/// RGB is `src * a + dst * (1 - a)`; the result's alpha stays `src.a`.
#[inline]
pub fn blend_over(src: Colour4, dst: Colour4) -> Colour4 {
    let a = src.a;
    (src * a + dst * (1.0 - a)).with_alpha(a)
}
