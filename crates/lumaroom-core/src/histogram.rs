//! Luma histograms and local (windowed) histogram equalization.
//!
//! Local equalization remaps each pixel by its rank among the pixels in a
//! square window around it:
//!
//! ```text
//! luma' = clamp(round(256 * rank / window_size) - 1, 0, 255)
//! ```
//!
//! where `rank` counts window pixels whose luma is <= the centre pixel's.
//!
//! # Window
//!
//! For radius `r` the window of `(x, y)` is `[x - r, x + r) x [y - r, y + r)`,
//! clipped to the buffer. It is half-open on the upper edge, so it spans
//! `2r` pixels per axis and sits one pixel off-centre. Near the borders the
//! window simply shrinks; there is no mirroring or padding. The centre pixel
//! is always inside its own window, so `rank >= 1` and the window is never
//! empty.
//!
//! # Performance
//! Cost is O(W * H * r^2). That is fine for interactive radii (1-20) on
//! screen-sized images and is not meant for large-radius batch work.

use tracing::info;

use crate::error::TransformError;
use crate::pixel::PixelBuffer;

/// Count pixels per luma value.
///
/// # Example
/// ```
/// use lumaroom_core::{histogram::luma_histogram, PixelBuffer};
///
/// let buf = PixelBuffer::new(4, 4);
/// let hist = luma_histogram(&buf);
/// assert_eq!(hist[16], 16);
/// ```
pub fn luma_histogram(buffer: &PixelBuffer) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for px in buffer.pixels() {
        hist[px.luma as usize] += 1;
    }
    hist
}

/// Equalize `buffer`'s luma in place using windows of the given radius.
///
/// All ranks are computed against a snapshot of the luma plane taken before
/// any pixel is rewritten. Chroma is untouched.
///
/// # Errors
/// `InvalidParameter` if `radius` is 0; the buffer is left unchanged.
pub fn equalize_local_histogram(
    buffer: &mut PixelBuffer,
    radius: u32,
) -> Result<(), TransformError> {
    if radius < 1 {
        return Err(TransformError::invalid("radius", radius));
    }

    info!(radius, "local histogram equalization");

    let (width, height) = (buffer.width() as usize, buffer.height() as usize);
    let r = radius as usize;
    let luma = buffer.luma_plane();

    for y in 0..height {
        let y0 = y.saturating_sub(r);
        let y1 = y.saturating_add(r).min(height);

        for x in 0..width {
            let x0 = x.saturating_sub(r);
            let x1 = x.saturating_add(r).min(width);

            let center = luma[y * width + x];
            let mut rank = 0usize;
            for wy in y0..y1 {
                let window_row = &luma[wy * width + x0..wy * width + x1];
                rank += window_row.iter().filter(|&&v| v <= center).count();
            }
            let window_size = (x1 - x0) * (y1 - y0);

            let idx = y * width + x;
            let px = &mut buffer.pixels_mut()[idx];
            *px = px.with_luma(equalized_luma(rank, window_size));
        }
    }

    Ok(())
}

#[inline]
fn equalized_luma(rank: usize, window_size: usize) -> u8 {
    let value = (256.0 * rank as f64 / window_size as f64).round() - 1.0;
    value.clamp(0.0, 255.0) as u8
}
