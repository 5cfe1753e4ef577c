//! Deterministic PNG writer.
//!
//! Uses fixed compression settings and no filtering so identical pixel data
//! always produces byte-identical files. No timestamps or text chunks are
//! written.

use std::io::Write;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::canvas::Canvas;
use crate::error::RenderError;

/// PNG export configuration.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write an RGB canvas to any writer.
pub fn write_rgb_to_writer<W: Write>(
    canvas: &Canvas,
    writer: W,
    config: &PngConfig,
) -> Result<(), RenderError> {
    let mut encoder = Encoder::new(writer, canvas.width(), canvas.height());
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(canvas.as_bytes())?;
    png_writer.finish()?;

    Ok(())
}

/// Encode an RGB canvas to PNG bytes.
pub fn encode_rgb(canvas: &Canvas, config: &PngConfig) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Vec::new();
    write_rgb_to_writer(canvas, &mut buffer, config)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_png_signature_and_header() {
        let canvas = Canvas::new(4, 2, Color::white());
        let bytes = encode_rgb(&canvas, &PngConfig::default()).unwrap();
        assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(&bytes[12..16], b"IHDR");
        assert_eq!(u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), 4);
        assert_eq!(u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]), 2);
    }

    #[test]
    fn test_png_is_deterministic() {
        let mut canvas = Canvas::new(16, 16, Color::black());
        canvas.set_pixel(3, 5, [255, 0, 0]);
        let a = encode_rgb(&canvas, &PngConfig::default()).unwrap();
        let b = encode_rgb(&canvas, &PngConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
