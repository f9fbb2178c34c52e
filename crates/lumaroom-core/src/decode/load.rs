//! Decoding of encoded image files into YCbCr pixel buffers.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::info;

use super::{DecodeError, Orientation};
use crate::pixel::PixelBuffer;

/// Decode an image file (any format the `image` crate recognizes) into a
/// YCbCr buffer, applying EXIF orientation when present.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be determined,
/// `DecodeError::CorruptedFile` if decoding fails and
/// `DecodeError::EmptyImage` for zero-sized images.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = apply_orientation(img, orientation).into_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    let buffer = PixelBuffer::from_rgb(width, height, rgb.as_raw())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    info!(width, height, ?orientation, "decoded image");
    Ok(buffer)
}

/// EXIF orientation from file bytes, `Orientation::Normal` when absent.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};
    use crate::pixel::YccPixel;

    fn two_by_one_rgb() -> DynamicImage {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let pixels = (0..12u32)
            .map(|i| YccPixel::new((i * 20) as u8, 128, 128))
            .collect();
        let original = PixelBuffer::from_pixels(4, 3, pixels).unwrap();
        let png = encode_png(&original).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let original = PixelBuffer::filled(16, 8, YccPixel::new(128, 128, 128));
        let jpeg = encode_jpeg(&original, 90).unwrap();

        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        let center = decoded.get(8, 4).unwrap();
        assert!((center.luma as i32 - 128).abs() <= 2);
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&PixelBuffer::new(8, 8)).unwrap();
        let result = decode_image(&png[..30]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let png = encode_png(&PixelBuffer::new(2, 2)).unwrap();
        assert_eq!(extract_orientation(&png), Orientation::Normal);
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let rgb = apply_orientation(two_by_one_rgb(), Orientation::Rotate180).into_rgb8();
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let rgb = apply_orientation(two_by_one_rgb(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rgb.dimensions(), (1, 2));
    }
}
