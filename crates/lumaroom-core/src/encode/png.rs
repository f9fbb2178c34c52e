//! PNG encoding for lossless save.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::info;

use super::EncodeError;
use crate::pixel::PixelBuffer;

/// Encode a buffer to PNG bytes (RGB8).
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let rgb = buffer.to_rgb();

    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out)
        .write_image(&rgb, buffer.width(), buffer.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = out.into_inner();
    info!(width = buffer.width(), height = buffer.height(), size = bytes.len(), "encoded PNG");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&PixelBuffer::new(3, 5)).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
