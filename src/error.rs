//! Error types
//!
//! Drawing never fails: out-of-range writes and degenerate geometry are
//! skipped silently. Errors only come from allocating the buffer and from
//! the file, scene and window collaborators around the core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    /// The colour buffer or scanline table could not be reserved
    #[error("failed to allocate a {width}x{height} colour buffer")]
    Allocation { width: u32, height: u32 },

    /// The per-row crossing lists for polygon fill could not be reserved
    #[error("failed to allocate a scanline table for {height} rows")]
    ScanlineAllocation { height: u32 },

    #[error("invalid buffer dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Window / texture failures from the optional viewer
    #[error("display error: {0}")]
    Display(String),
}

pub type RasterResult<T> = Result<T, RasterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_messages_name_what_failed() {
        let buffer = RasterError::Allocation {
            width: 640,
            height: 480,
        };
        assert_eq!(buffer.to_string(), "failed to allocate a 640x480 colour buffer");

        let table = RasterError::ScanlineAllocation { height: 480 };
        assert_eq!(table.to_string(), "failed to allocate a scanline table for 480 rows");
    }
}
