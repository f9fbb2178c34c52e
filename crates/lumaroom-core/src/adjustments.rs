//! Brightness and contrast adjustment of the luma channel.
//!
//! ## Formula
//! `luma' = clamp(round(contrast * luma + brightness), 0, 255)`
//!
//! `contrast` is a multiplicative gain (1.0 = unchanged) and `brightness` an
//! additive offset in luma units. Output saturates, it never wraps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TransformError;
use crate::pixel::PixelBuffer;

/// Brightness/contrast parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessContrast {
    /// Additive offset in luma units (0-255 scale).
    pub brightness: f32,
    /// Multiplicative gain, 1.0 = unchanged.
    pub contrast: f32,
}

impl Default for BrightnessContrast {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

impl BrightnessContrast {
    pub fn new(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness,
            contrast,
        }
    }

    /// Derive parameters from a drag displacement.
    ///
    /// A drag across the whole view width adds 255 to brightness; a drag
    /// down the whole view height doubles contrast.
    pub fn from_drag(dx: f64, dy: f64, view_width: u32, view_height: u32) -> Self {
        Self {
            brightness: (255.0 * dx / view_width.max(1) as f64) as f32,
            contrast: (1.0 + dy / view_height.max(1) as f64) as f32,
        }
    }

    /// Check if these parameters leave luma unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    fn validate(&self) -> Result<(), TransformError> {
        if !self.brightness.is_finite() {
            return Err(TransformError::invalid("brightness", self.brightness));
        }
        if !self.contrast.is_finite() {
            return Err(TransformError::invalid("contrast", self.contrast));
        }
        Ok(())
    }

    /// Apply to a single luma value.
    #[inline]
    pub fn apply_to_luma(&self, luma: u8) -> u8 {
        (self.contrast * luma as f32 + self.brightness)
            .round()
            .clamp(0.0, 255.0) as u8
    }
}

/// Write `src`'s luma, adjusted, into `dst`.
///
/// Only luma is written; `dst` keeps its own chroma. During a drag `dst` is
/// the display buffer and `src` the snapshot taken when the drag began, so
/// both hold the same chroma and repeated calls never compound.
///
/// # Errors
/// `DimensionMismatch` if the buffers differ in size, `InvalidParameter` for
/// non-finite parameters. `dst` is untouched on error.
pub fn apply_brightness_contrast(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    params: BrightnessContrast,
) -> Result<(), TransformError> {
    src.ensure_same_dimensions(dst)?;
    params.validate()?;

    debug!(
        brightness = params.brightness,
        contrast = params.contrast,
        "adjust brightness/contrast"
    );

    for (out, inp) in dst.pixels_mut().iter_mut().zip(src.pixels()) {
        *out = out.with_luma(params.apply_to_luma(inp.luma));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::YccPixel;

    /// Helper to create a buffer from a row of (luma, cb, cr) triples
    fn row(pixels: &[(u8, u8, u8)]) -> PixelBuffer {
        let pixels = pixels
            .iter()
            .map(|&(y, cb, cr)| YccPixel::new(y, cb, cr))
            .collect::<Vec<_>>();
        PixelBuffer::from_pixels(pixels.len() as u32, 1, pixels).unwrap()
    }

    /// Helper to apply parameters and return the resulting buffer
    fn apply(src: &PixelBuffer, brightness: f32, contrast: f32) -> PixelBuffer {
        let mut dst = src.clone();
        apply_brightness_contrast(src, &mut dst, BrightnessContrast::new(brightness, contrast))
            .unwrap();
        dst
    }

    // ===== Identity Tests =====

    #[test]
    fn test_identity_parameters() {
        let src = row(&[(0, 128, 128), (17, 90, 200), (128, 1, 2), (255, 255, 0)]);
        let result = apply(&src, 0.0, 1.0);
        assert_eq!(result, src);
        assert!(BrightnessContrast::default().is_identity());
    }

    // ===== Brightness Tests =====

    #[test]
    fn test_brightness_offset() {
        let src = row(&[(100, 128, 128)]);
        let result = apply(&src, 20.0, 1.0);
        assert_eq!(result.pixels()[0].luma, 120);
    }

    #[test]
    fn test_brightness_saturates_high() {
        let src = row(&[(0, 128, 128), (77, 10, 20), (255, 128, 128)]);
        let result = apply(&src, 300.0, 1.0);
        assert!(result.pixels().iter().all(|p| p.luma == 255));
    }

    #[test]
    fn test_brightness_saturates_low() {
        let src = row(&[(0, 128, 128), (200, 10, 20)]);
        let result = apply(&src, -300.0, 1.0);
        assert!(result.pixels().iter().all(|p| p.luma == 0));
    }

    // ===== Contrast Tests =====

    #[test]
    fn test_contrast_gain() {
        let src = row(&[(50, 128, 128), (200, 128, 128)]);
        let result = apply(&src, 0.0, 1.5);
        assert_eq!(result.pixels()[0].luma, 75);
        // 300 clamps to 255
        assert_eq!(result.pixels()[1].luma, 255);
    }

    #[test]
    fn test_rounding_to_nearest() {
        let src = row(&[(3, 128, 128)]);
        // 3 * 0.5 = 1.5 rounds away from zero
        assert_eq!(apply(&src, 0.0, 0.5).pixels()[0].luma, 2);
        // 3 * 0.4 = 1.2 rounds down
        assert_eq!(apply(&src, 0.0, 0.4).pixels()[0].luma, 1);
    }

    #[test]
    fn test_negative_contrast_clamps_to_zero() {
        let src = row(&[(100, 128, 128)]);
        assert_eq!(apply(&src, 0.0, -1.0).pixels()[0].luma, 0);
    }

    // ===== Chroma Tests =====

    #[test]
    fn test_chroma_comes_from_destination() {
        let src = row(&[(100, 10, 20)]);
        let mut dst = row(&[(0, 200, 210)]);
        apply_brightness_contrast(&src, &mut dst, BrightnessContrast::new(5.0, 1.0)).unwrap();
        assert_eq!(dst.pixels()[0], YccPixel::new(105, 200, 210));
    }

    // ===== Error Tests =====

    #[test]
    fn test_dimension_mismatch_leaves_dst_untouched() {
        let src = PixelBuffer::new(2, 2);
        let mut dst = PixelBuffer::filled(3, 2, YccPixel::new(42, 1, 2));
        let before = dst.clone();
        let result = apply_brightness_contrast(&src, &mut dst, BrightnessContrast::new(10.0, 1.0));
        assert!(matches!(
            result,
            Err(TransformError::DimensionMismatch { .. })
        ));
        assert_eq!(dst, before);
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let src = PixelBuffer::new(2, 2);
        let mut dst = src.clone();
        for params in [
            BrightnessContrast::new(f32::NAN, 1.0),
            BrightnessContrast::new(0.0, f32::INFINITY),
        ] {
            let result = apply_brightness_contrast(&src, &mut dst, params);
            assert!(matches!(
                result,
                Err(TransformError::InvalidParameter { .. })
            ));
        }
        assert_eq!(dst, src);
    }

    // ===== Drag Mapping Tests =====

    #[test]
    fn test_from_drag_full_width() {
        let params = BrightnessContrast::from_drag(600.0, 0.0, 600, 800);
        assert!((params.brightness - 255.0).abs() < 1e-4);
        assert!((params.contrast - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_drag_half_height() {
        let params = BrightnessContrast::from_drag(0.0, -400.0, 600, 800);
        assert!(params.brightness.abs() < 1e-6);
        assert!((params.contrast - 0.5).abs() < 1e-6);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::pixel::YccPixel;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<(u8, u8, u8)>(), (w * h) as usize).prop_map(
                move |px| {
                    let pixels = px
                        .into_iter()
                        .map(|(y, cb, cr)| YccPixel::new(y, cb, cr))
                        .collect();
                    PixelBuffer::from_pixels(w, h, pixels).unwrap()
                },
            )
        })
    }

    proptest! {
        /// Property: identity parameters reproduce luma exactly.
        #[test]
        fn prop_identity_preserves_luma(src in buffer_strategy()) {
            let mut dst = src.clone();
            apply_brightness_contrast(&src, &mut dst, BrightnessContrast::default()).unwrap();
            prop_assert_eq!(dst.luma_plane(), src.luma_plane());
        }

        /// Property: chroma is bit-identical for any parameters.
        #[test]
        fn prop_chroma_preserved(
            src in buffer_strategy(),
            brightness in -400.0f32..400.0,
            contrast in -3.0f32..3.0,
        ) {
            let mut dst = src.clone();
            let params = BrightnessContrast::new(brightness, contrast);
            apply_brightness_contrast(&src, &mut dst, params).unwrap();
            for (a, b) in src.pixels().iter().zip(dst.pixels()) {
                prop_assert_eq!((a.cb, a.cr), (b.cb, b.cr));
            }
        }

        /// Property: brightness 300 saturates every pixel at contrast >= 0.
        #[test]
        fn prop_large_brightness_saturates(src in buffer_strategy(), contrast in 0.0f32..2.0) {
            let mut dst = src.clone();
            let params = BrightnessContrast::new(300.0, contrast);
            apply_brightness_contrast(&src, &mut dst, params).unwrap();
            prop_assert!(dst.pixels().iter().all(|p| p.luma == 255));
        }
    }
}
