//! Rasterizer configuration
//!
//! Loaded from JSON the same way scenes are; every field has a default so a
//! partial file (or `{}`) is valid.

use crate::error::RasterResult;
use crate::math::Colour4;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default outline ring factor for circles: pixels with
/// `factor * r² < m² <= r²` form the circumference band.
pub const DEFAULT_RING_FACTOR: f32 = 0.8;

/// Which pixels along the buffer border accept writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// `0 < x < width` and `0 < y < height`: row 0 and column 0 are never written
    #[default]
    Interior,
    /// `0 <= x < width` and `0 <= y < height`
    Inclusive,
}

impl EdgePolicy {
    /// Whether `(x, y)` may be written in a `width` x `height` buffer
    #[inline]
    pub fn accepts(self, x: i32, y: i32, width: u32, height: u32) -> bool {
        let (w, h) = (width as i64, height as i64);
        let (x, y) = (x as i64, y as i64);
        match self {
            Self::Interior => x > 0 && x < w && y > 0 && y < h,
            Self::Inclusive => x >= 0 && x < w && y >= 0 && y < h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub edge_policy: EdgePolicy,
    pub circle_ring_factor: f32,
    /// Lerp alpha along with RGB in interpolated shading. When false the
    /// start colour's alpha is carried through unchanged rather than being
    /// replaced by a default alpha, so translucent vertices stay
    /// translucent along lines and fills.
    pub interpolate_alpha: bool,
    pub foreground: Colour4,
    pub background: Colour4,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            edge_policy: EdgePolicy::Interior,
            circle_ring_factor: DEFAULT_RING_FACTOR,
            interpolate_alpha: false,
            foreground: Colour4::WHITE,
            background: Colour4::BLACK,
        }
    }
}

impl RasterConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> RasterResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> RasterResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
