//! The rasterizer: drawing state plus the point, line, polygon and circle
//! primitives that write into its colour buffer.
//!
//! One `Rasterizer` owns its buffer and scanline table outright. Nothing is
//! shared or locked; callers wanting concurrency keep one instance per
//! thread or serialise access themselves.

mod circle;
mod clip;
mod line;
mod scanline;
mod shading;

pub use circle::{circle_covers, Circle};
pub use clip::{clip_line, compute_outcode, ClipRect, LineClip, BOTTOM, INSIDE, LEFT, RIGHT, TOP};
pub use scanline::{build_scanlines, ScanRange, ScanlineEntry, ScanlineTable};
pub use shading::{blend_over, lerp_colour, Shading};

use crate::config::RasterConfig;
use crate::display::ColourBuffer;
use crate::error::RasterResult;
use crate::math::{Colour4, Vec2, Vertex};
use log::debug;
use serde::{Deserialize, Serialize};

/// Primitive the caller intends to draw; recorded, never enforced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryMode {
    Point,
    #[default]
    Line,
    Polygon,
    Circle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    #[default]
    Unfilled,
    FlatFilled,
    InterpolatedFilled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    None,
    AlphaBlend,
}

pub struct Rasterizer {
    buffer: ColourBuffer,
    scanlines: ScanlineTable,
    config: RasterConfig,
    fg: Colour4,
    bg: Colour4,
    geometry_mode: GeometryMode,
    fill_mode: FillMode,
    blend_mode: BlendMode,
    clip: ClipRect,
}

impl Rasterizer {
    /// Create a rasterizer with the default configuration
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        Self::with_config(width, height, RasterConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: RasterConfig) -> RasterResult<Self> {
        let buffer = ColourBuffer::new(width, height)?;
        let scanlines = ScanlineTable::new(height)?;
        debug!("rasterizer created at {}x{}", width, height);

        Ok(Self {
            buffer,
            scanlines,
            config,
            fg: config.foreground,
            bg: config.background,
            geometry_mode: GeometryMode::default(),
            fill_mode: FillMode::default(),
            blend_mode: BlendMode::default(),
            clip: ClipRect::full(width, height),
        })
    }

    /// Reallocate buffer and scanline table at a new size
    ///
    /// Prior pixel content is discarded and the clip rectangle reset to the
    /// full extent. Colours and modes carry over. On failure the current
    /// buffer is left as it was.
    pub fn initialize(&mut self, width: u32, height: u32) -> RasterResult<()> {
        let buffer = ColourBuffer::new(width, height)?;
        let scanlines = ScanlineTable::new(height)?;

        self.buffer = buffer;
        self.scanlines = scanlines;
        self.clip = ClipRect::full(width, height);
        debug!("rasterizer reinitialised at {}x{}", width, height);
        Ok(())
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Fill the whole buffer with `colour`, which also becomes the background
    pub fn clear(&mut self, colour: Colour4) {
        self.bg = colour;
        self.buffer.clear(colour);
    }

    pub fn set_foreground_colour(&mut self, colour: Colour4) {
        self.fg = colour;
    }

    pub fn set_background_colour(&mut self, colour: Colour4) {
        self.bg = colour;
    }

    pub fn set_geometry_mode(&mut self, mode: GeometryMode) {
        self.geometry_mode = mode;
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    pub fn set_clip_rectangle(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.clip = ClipRect::new(left, right, bottom, top);
        debug!("clip rectangle set to {:?}", self.clip);
    }

    /// Restore the clip rectangle to the whole buffer
    pub fn reset_clip_rectangle(&mut self) {
        self.clip = ClipRect::full(self.buffer.width(), self.buffer.height());
    }

    #[inline]
    pub fn foreground(&self) -> Colour4 {
        self.fg
    }

    #[inline]
    pub fn background(&self) -> Colour4 {
        self.bg
    }

    #[inline]
    pub fn geometry_mode(&self) -> GeometryMode {
        self.geometry_mode
    }

    #[inline]
    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    #[inline]
    pub fn clip_rectangle(&self) -> ClipRect {
        self.clip
    }

    #[inline]
    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    // ========================================================================
    // Buffer access
    // ========================================================================

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Read access for whatever presents or encodes the image
    #[inline]
    pub fn buffer(&self) -> &ColourBuffer {
        &self.buffer
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Colour4> {
        self.buffer.get(x, y)
    }

    // ========================================================================
    // Point writes
    // ========================================================================

    /// Whether the edge policy lets (x, y) be written
    #[inline]
    fn writable(&self, x: i32, y: i32) -> bool {
        self.config
            .edge_policy
            .accepts(x, y, self.buffer.width(), self.buffer.height())
    }

    /// Write the foreground colour at (x, y) if the pixel is writable and
    /// inside the clip rectangle; otherwise do nothing
    #[inline]
    fn plot(&mut self, x: i32, y: i32) {
        if self.writable(x, y) && self.clip.contains(Vec2::new(x as f32, y as f32)) {
            *self.buffer.pixel_at(x as u32, y as u32) = self.fg;
        }
    }

    /// Draw a point in the foreground colour
    ///
    /// `size <= 1` is a single pixel; larger sizes fill a `size` x `size`
    /// block centred on the point.
    pub fn draw_point(&mut self, point: Vec2, size: u32) {
        let (x, y) = point.to_pixel();
        if size <= 1 {
            self.plot(x, y);
            return;
        }

        // Block corners in i64, cut down to the buffer so far-off points
        // and huge sizes cost nothing
        let size = i64::from(size);
        let lo = -(size / 2);
        let (x, y) = (i64::from(x), i64::from(y));
        let x0 = (x + lo).max(0);
        let x1 = (x + lo + size).min(i64::from(self.width()));
        let y0 = (y + lo).max(0);
        let y1 = (y + lo + size).min(i64::from(self.height()));

        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px as i32, py as i32);
            }
        }
    }

    // ========================================================================
    // Polygons
    // ========================================================================

    /// Outline a polygon: consecutive vertex pairs plus last-to-first
    pub fn draw_unfilled_polygon(&mut self, vertices: &[Vertex]) {
        let n = vertices.len();
        for i in 0..n {
            self.draw_line(&vertices[i], &vertices[(i + 1) % n], 1);
        }
    }

    /// Outline or fill according to the current fill mode
    pub fn draw_polygon(&mut self, vertices: &[Vertex]) {
        match self.fill_mode {
            FillMode::Unfilled => self.draw_unfilled_polygon(vertices),
            FillMode::FlatFilled | FillMode::InterpolatedFilled => {
                self.draw_filled_polygon(vertices);
            },
        }
    }
}
