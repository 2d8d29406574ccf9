//! tinyraster: a small software rasterizer
//!
//! Points, clipped lines, scanline-filled polygons and circles are drawn into
//! a float RGBA [`ColourBuffer`] owned by a [`Rasterizer`]. Shading is flat or
//! linearly interpolated between vertex colours, with optional alpha
//! blending against what is already in the buffer.
//!
//! ```
//! use tinyraster::{Colour4, FillMode, Rasterizer, Vertex};
//!
//! let mut r = Rasterizer::new(16, 16).unwrap();
//! r.set_fill_mode(FillMode::InterpolatedFilled);
//! r.draw_polygon(&[
//!     Vertex::at(2.0, 2.0, Colour4::RED),
//!     Vertex::at(12.0, 2.0, Colour4::GREEN),
//!     Vertex::at(7.0, 12.0, Colour4::BLUE),
//! ]);
//! assert_ne!(r.pixel(7, 5), Some(Colour4::BLACK));
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod math;
pub mod ppm;
pub mod raster;
pub mod scene;

pub use config::{EdgePolicy, RasterConfig};
pub use display::ColourBuffer;
pub use error::{RasterError, RasterResult};
pub use math::{Colour4, Vec2, Vertex};
pub use raster::{BlendMode, Circle, ClipRect, FillMode, GeometryMode, Rasterizer, Shading};
pub use scene::{Command, Scene};
