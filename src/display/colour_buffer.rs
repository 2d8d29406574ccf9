use crate::error::{RasterError, RasterResult};
use crate::math::Colour4;

// ============================================================================
// Utility Functions
// ============================================================================

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_abgr(dest: &mut [u8], rgba: [u8; 4]) {
    dest[0] = rgba[3]; // A
    dest[1] = rgba[2]; // B
    dest[2] = rgba[1]; // G
    dest[3] = rgba[0]; // R
}

// ============================================================================
// ColourBuffer
// ============================================================================

/// Row-major RGBA float buffer, indexed by `y * width + x`
///
/// Fixed size for its whole lifetime; resizing means building a new one.
#[derive(Debug, Clone)]
pub struct ColourBuffer {
    pixels: Vec<Colour4>,
    width: u32,
    height: u32,
}

impl ColourBuffer {
    /// Allocate a `width` x `height` buffer, initially black
    ///
    /// Reservation failure is reported rather than aborting the process.
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n > 0)
            .ok_or(RasterError::InvalidDimensions { width, height })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(count)
            .map_err(|_| RasterError::Allocation { width, height })?;
        pixels.resize(count, Colour4::BLACK);

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < self.width as i64 && y >= 0 && (y as i64) < self.height as i64
    }

    /// Calculate flat index for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Mutable access to the pixel at (x, y)
    ///
    /// No bounds policy is applied here; callers check first.
    #[inline]
    pub fn pixel_at(&mut self, x: u32, y: u32) -> &mut Colour4 {
        debug_assert!(x < self.width && y < self.height, "pixel_at({x}, {y}) out of range");
        let idx = self.pixel_index(x, y);
        &mut self.pixels[idx]
    }

    /// Checked read
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Colour4> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Fill every pixel with one colour
    pub fn clear(&mut self, colour: Colour4) {
        self.pixels.fill(colour);
    }

    #[inline]
    pub fn pixels(&self) -> &[Colour4] {
        &self.pixels
    }

    /// Iterate one row of pixels
    pub fn row(&self, y: u32) -> &[Colour4] {
        let start = self.pixel_index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Quantised RGBA bytes, 4 per pixel
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(Colour4::to_rgba8).collect()
    }

    /// Quantised bytes in the ABGR order an RGBA8888 streaming texture expects
    pub fn to_abgr8888(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.pixels.len() * 4];
        for (dest, colour) in bytes.chunks_exact_mut(4).zip(&self.pixels) {
            write_abgr(dest, colour.to_rgba8());
        }
        bytes
    }
}
