//! Nearest-neighbour scaling by backward projection.
//!
//! For every destination pixel we compute where it came from in the source
//! and copy that pixel, so the output has no gaps whatever the factor:
//!
//! ```text
//! src_x = trunc(dst_x / factor)
//! src_y = trunc(dst_y / factor)
//! ```
//!
//! The canvas keeps the source's size and is anchored at the origin. Any
//! destination pixel whose source falls outside the image gets a fill pixel
//! (neutral black by default). There is no interpolation: this runs on every
//! pointer move during a drag, and nearest-neighbour keeps it cheap.

use tracing::debug;

use crate::error::TransformError;
use crate::pixel::{PixelBuffer, YccPixel};

/// Scale `src` into `dst` by `factor`, filling with [`YccPixel::NEUTRAL_BLACK`].
///
/// `factor > 1` magnifies, `factor < 1` shrinks the image toward the origin.
///
/// # Errors
/// `InvalidParameter` unless `factor` is finite and positive,
/// `DimensionMismatch` if the buffers differ in size. `dst` is untouched on
/// error.
pub fn apply_scale(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    factor: f64,
) -> Result<(), TransformError> {
    apply_scale_with_fill(src, dst, factor, YccPixel::NEUTRAL_BLACK)
}

/// Like [`apply_scale`] with a caller-chosen fill pixel.
pub fn apply_scale_with_fill(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    factor: f64,
    fill: YccPixel,
) -> Result<(), TransformError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::invalid("factor", factor));
    }
    src.ensure_same_dimensions(dst)?;

    debug!(factor, "scale image");

    let (width, height) = src.dimensions();

    for y in 0..height {
        let src_y = (y as f64 / factor) as u64;
        for x in 0..width {
            let src_x = (x as f64 / factor) as u64;
            let pixel = if src_x < width as u64 && src_y < height as u64 {
                src.get(src_x as u32, src_y as u32).unwrap_or(fill)
            } else {
                fill
            };
            dst.set(x, y, pixel);
        }
    }

    Ok(())
}

/// Scale factor for a drag that started at `origin` and is now at `current`,
/// measured as the ratio of their distances from `center`.
///
/// A drag that starts exactly on the centre uses 1 as its initial distance.
pub fn scale_factor_from_drag(origin: (f64, f64), current: (f64, f64), center: (f64, f64)) -> f64 {
    let distance = |(px, py): (f64, f64)| (px - center.0).hypot(py - center.1);

    let mut init_dist = distance(origin);
    if init_dist == 0.0 {
        init_dist = 1.0;
    }
    distance(current) / init_dist
}
