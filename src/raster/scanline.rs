//! Scanline polygon fill
//!
//! Every edge is walked row by row and its x-intercept (with a colour) is
//! recorded in that row's list. Once all edges are in, each row with an
//! even number of crossings is sorted by x and filled pair by pair with
//! horizontal spans. Rows with an odd count, which show up where a vertex
//! is shared by two contributing edges, are skipped.

use super::shading::Shading;
use super::Rasterizer;
use crate::error::{RasterError, RasterResult};
use crate::math::{Colour4, Vertex};
use log::{trace, warn};

/// Entries kept allocated per row between fills; rows that grew past this
/// are shrunk back so one huge polygon doesn't pin memory forever.
const RETAINED_ROW_CAPACITY: usize = 8;

/// One crossing of a polygon edge with a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanlineEntry {
    pub x: i32,
    pub colour: Colour4,
}

/// Per-row crossing lists, one slot per buffer row
#[derive(Debug, Clone, Default)]
pub struct ScanlineTable {
    rows: Vec<Vec<ScanlineEntry>>,
}

impl ScanlineTable {
    pub fn new(height: u32) -> RasterResult<Self> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(height as usize)
            .map_err(|_| RasterError::ScanlineAllocation { height })?;
        rows.resize_with(height as usize, Vec::new);
        Ok(Self { rows })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Empty every row, keeping a small allocation for reuse
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
            if row.capacity() > RETAINED_ROW_CAPACITY {
                row.shrink_to(RETAINED_ROW_CAPACITY);
            }
        }
    }

    #[inline]
    pub fn push(&mut self, y: usize, entry: ScanlineEntry) {
        self.rows[y].push(entry);
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[ScanlineEntry] {
        &self.rows[y]
    }

    /// Total number of entries across all rows
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    fn take_row(&mut self, y: usize) -> Vec<ScanlineEntry> {
        std::mem::take(&mut self.rows[y])
    }

    fn restore_row(&mut self, y: usize, row: Vec<ScanlineEntry>) {
        self.rows[y] = row;
    }
}

/// Rows `[lowest, highest)` a fill has to visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    pub lowest: i32,
    pub highest: i32,
}

/// Rebuild `table` from the edges of `vertices`
///
/// Only rows strictly between 0 and `height - 1` receive entries. Each edge
/// contributes rows `[y_low, y_high)` with its endpoints ordered by y, so
/// the endpoint colours travel with their positions. Horizontal edges add
/// nothing. Returns the vertex y-range clamped to the buffer.
pub fn build_scanlines(
    table: &mut ScanlineTable,
    vertices: &[Vertex],
    shading: Shading,
    interpolate_alpha: bool,
) -> ScanRange {
    table.clear();

    let height = table.height() as i32;
    let mut range = ScanRange {
        lowest: height,
        highest: 0,
    };

    let n = vertices.len();
    for i in 0..n {
        let mut low = vertices[i];
        let mut high = vertices[(i + 1) % n];

        let vy = low.position.y;
        if vy < range.lowest as f32 {
            range.lowest = if vy < 0.0 { 0 } else { vy as i32 };
        }
        if vy > range.highest as f32 {
            range.highest = if vy > (height - 1) as f32 {
                height - 1
            } else {
                vy as i32
            };
        }

        if high.position.y < low.position.y {
            std::mem::swap(&mut low, &mut high);
        }

        let (p1, p2) = (low.position, high.position);
        let span = p2.y - p1.y;
        if !(span > 0.0) {
            continue;
        }
        let inv_slope = (p1.x - p2.x) / (p1.y - p2.y);

        let mut y = (p1.y as i32).max(1);
        while y < height - 1 && (y as f32) < p2.y {
            let dy = y as f32 - p1.y;
            let x = (p1.x + dy * inv_slope) as i32;
            let colour = shading.resolve_at(low.colour, high.colour, dy / span, interpolate_alpha);
            table.push(y as usize, ScanlineEntry { x, colour });
            y += 1;
        }
    }

    range
}

impl Rasterizer {
    /// Scanline-fill a simple polygon with the current fill mode's shading
    ///
    /// Flat fill paints each span with its left crossing's colour (the
    /// starting colour of that edge); interpolated fill blends along the
    /// edges and again across each span.
    pub fn draw_filled_polygon(&mut self, vertices: &[Vertex]) {
        let shading = Shading::from(self.fill_mode);
        self.fill_polygon(vertices, shading);
    }

    pub(super) fn fill_polygon(&mut self, vertices: &[Vertex], shading: Shading) {
        if vertices.len() < 3 {
            warn!("skipping fill of degenerate polygon with {} vertices", vertices.len());
            return;
        }

        let range = build_scanlines(
            &mut self.scanlines,
            vertices,
            shading,
            self.config.interpolate_alpha,
        );

        let mut skipped = 0usize;
        for y in range.lowest..range.highest {
            let row_index = y as usize;
            let mut row = self.scanlines.take_row(row_index);

            if row.len() % 2 == 0 {
                if row.len() > 1 {
                    row.sort_by_key(|entry| entry.x);
                }
                let yf = y as f32;
                for pair in row.chunks_exact(2) {
                    let start = Vertex::at(pair[0].x as f32, yf, pair[0].colour);
                    let end = Vertex::at(pair[1].x as f32, yf, pair[1].colour);
                    self.draw_clipped_line(&start, &end, 1, shading);
                }
            } else {
                skipped += 1;
            }

            self.scanlines.restore_row(row_index, row);
        }

        trace!(
            "filled rows {}..{} ({} crossings, {} odd rows skipped)",
            range.lowest,
            range.highest,
            self.scanlines.len(),
            skipped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vertex> {
        vec![
            Vertex::at(2.0, 2.0, Colour4::RED),
            Vertex::at(6.0, 2.0, Colour4::GREEN),
            Vertex::at(4.0, 6.0, Colour4::BLUE),
        ]
    }

    fn xs(table: &ScanlineTable, y: usize) -> Vec<i32> {
        let mut v: Vec<i32> = table.row(y).iter().map(|e| e.x).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_triangle_crossings() {
        let mut table = ScanlineTable::new(10).unwrap();
        let range = build_scanlines(&mut table, &triangle(), Shading::Flat, false);

        assert_eq!(range, ScanRange { lowest: 2, highest: 6 });
        assert_eq!(xs(&table, 2), vec![2, 6]);
        assert_eq!(xs(&table, 3), vec![2, 5]);
        assert_eq!(xs(&table, 4), vec![3, 5]);
        assert_eq!(xs(&table, 5), vec![3, 4]);
        assert!(table.row(6).is_empty());
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_flat_entries_take_edge_start_colour() {
        let mut table = ScanlineTable::new(10).unwrap();
        build_scanlines(&mut table, &triangle(), Shading::Flat, false);

        // Edge (6,2)->(4,6) starts at the green vertex, (4,6)->(2,2) is
        // reordered to start at the red one
        for entry in table.row(4) {
            let expected = if entry.x == 5 { Colour4::GREEN } else { Colour4::RED };
            assert_eq!(entry.colour, expected);
        }
    }

    #[test]
    fn test_interpolated_entries_blend_along_edge() {
        let mut table = ScanlineTable::new(10).unwrap();
        build_scanlines(&mut table, &triangle(), Shading::Interpolated, false);

        let right = table.row(4).iter().find(|e| e.x == 5).unwrap();
        assert!(right
            .colour
            .approx_eq(&Colour4::new(0.0, 0.5, 0.5, 1.0), 1e-6));
    }

    #[test]
    fn test_border_rows_never_recorded() {
        let mut table = ScanlineTable::new(6).unwrap();
        let quad = [
            Vertex::at(1.0, -3.0, Colour4::WHITE),
            Vertex::at(4.0, -3.0, Colour4::WHITE),
            Vertex::at(4.0, 9.0, Colour4::WHITE),
            Vertex::at(1.0, 9.0, Colour4::WHITE),
        ];
        let range = build_scanlines(&mut table, &quad, Shading::Flat, false);
        assert_eq!(range, ScanRange { lowest: 0, highest: 5 });
        assert!(table.row(0).is_empty());
        assert!(table.row(5).is_empty());
        for y in 1..5 {
            assert_eq!(xs(&table, y), vec![1, 4]);
        }
    }

    #[test]
    fn test_clear_releases_rows() {
        let mut table = ScanlineTable::new(4).unwrap();
        for x in 0..100 {
            table.push(1, ScanlineEntry { x, colour: Colour4::WHITE });
        }
        table.clear();
        assert!(table.is_empty());
        assert!(table.rows[1].capacity() <= RETAINED_ROW_CAPACITY);
    }

    fn nan_triangle() -> Vec<Vertex> {
        // Both edges touching the NaN vertex are dropped, leaving one
        // crossing per row
        vec![
            Vertex::at(2.0, 2.0, Colour4::RED),
            Vertex::at(6.0, f32::NAN, Colour4::RED),
            Vertex::at(4.0, 6.0, Colour4::RED),
        ]
    }

    #[test]
    fn test_single_edge_gives_odd_rows() {
        let mut table = ScanlineTable::new(10).unwrap();
        let range = build_scanlines(&mut table, &nan_triangle(), Shading::Flat, false);
        assert_eq!(range, ScanRange { lowest: 2, highest: 6 });
        for y in 2..6 {
            assert_eq!(table.row(y).len(), 1);
        }
    }

    #[test]
    fn test_odd_rows_are_not_filled() {
        let mut r = Rasterizer::new(10, 10).unwrap();
        r.set_fill_mode(crate::raster::FillMode::FlatFilled);
        r.draw_polygon(&nan_triangle());
        assert!(r.buffer().pixels().iter().all(|&p| p == Colour4::BLACK));
    }
}
