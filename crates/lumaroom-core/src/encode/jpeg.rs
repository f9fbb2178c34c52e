//! JPEG encoding for save.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::info;

use super::EncodeError;
use crate::pixel::PixelBuffer;

/// Encode a buffer to JPEG bytes.
///
/// The buffer is converted to RGB8 first. `quality` is clamped to 1-100.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for further editing
/// * 60-90: Good quality for sharing
/// * Below 60: Visible artifacts
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let quality = quality.clamp(1, 100);
    let rgb = buffer.to_rgb();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(&rgb, buffer.width(), buffer.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = out.into_inner();
    info!(width = buffer.width(), height = buffer.height(), size = bytes.len(), "encoded JPEG");
    Ok(bytes)
}
