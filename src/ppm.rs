//! Writing of PPM (Portable Pixmap Format) files
//!
//! See <https://en.wikipedia.org/wiki/Netpbm_format#PPM_example>
//!
//! Binary P6, 8 bits per channel. Alpha is dropped and channels are clamped
//! to [0, 1] before quantising. Row 0 of the buffer is written first.

use crate::display::ColourBuffer;
use crate::error::RasterResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_ppm<W: Write>(buffer: &ColourBuffer, mut out: W) -> std::io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", buffer.width(), buffer.height())?;

    let mut bytes = Vec::with_capacity(buffer.pixels().len() * 3);
    for colour in buffer.pixels() {
        let [r, g, b, _] = colour.to_rgba8();
        bytes.extend_from_slice(&[r, g, b]);
    }
    out.write_all(&bytes)?;
    out.flush()
}

pub fn save_ppm(buffer: &ColourBuffer, path: impl AsRef<Path>) -> RasterResult<()> {
    let file = File::create(path)?;
    write_ppm(buffer, BufWriter::new(file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Colour4;

    #[test]
    fn test_header_and_payload() {
        let mut buf = ColourBuffer::new(2, 1).unwrap();
        buf.clear(Colour4::new(1.0, 0.5, 0.0, 0.25));

        let mut out = Vec::new();
        write_ppm(&buf, &mut out).unwrap();

        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[255, 128, 0, 255, 128, 0]);
    }
}
