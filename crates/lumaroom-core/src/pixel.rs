//! Pixel and pixel-buffer types in the luma/chroma color model.

use serde::{Deserialize, Serialize};

use crate::color::{rgb_to_ycc, ycc_to_rgb};
use crate::error::TransformError;

/// A single YCbCr pixel.
///
/// Editing operations only ever rewrite `luma`; `cb` and `cr` are carried
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YccPixel {
    /// Intensity (Y), 0-255.
    pub luma: u8,
    /// Blue-difference chroma (Cb), 0-255, 128 is neutral.
    pub cb: u8,
    /// Red-difference chroma (Cr), 0-255, 128 is neutral.
    pub cr: u8,
}

impl YccPixel {
    /// Video-range black with neutral chroma. Used to fill regions a
    /// resample maps outside of its source.
    pub const NEUTRAL_BLACK: YccPixel = YccPixel::new(16, 128, 128);

    pub const fn new(luma: u8, cb: u8, cr: u8) -> Self {
        Self { luma, cb, cr }
    }

    /// Same chroma, different luma.
    #[inline]
    pub const fn with_luma(self, luma: u8) -> Self {
        Self { luma, ..self }
    }
}

impl Default for YccPixel {
    fn default() -> Self {
        Self::NEUTRAL_BLACK
    }
}

/// A width x height grid of [`YccPixel`]s stored row-major, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<YccPixel>,
}

impl PixelBuffer {
    /// Create a buffer filled with [`YccPixel::NEUTRAL_BLACK`].
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, YccPixel::NEUTRAL_BLACK)
    }

    /// Create a buffer with every pixel set to `pixel`.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn filled(width: u32, height: u32, pixel: YccPixel) -> Self {
        assert!(
            width > 0 && height > 0,
            "PixelBuffer dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    /// Wrap existing pixel data, validating it against the dimensions.
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<YccPixel>,
    ) -> Result<Self, TransformError> {
        check_positive(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TransformError::DimensionMismatch {
                expected: (width, height),
                actual: (pixels.len() as u32, 1),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer from packed RGB8 data (3 bytes per pixel, row-major).
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self, TransformError> {
        check_positive(width, height)?;
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(TransformError::DimensionMismatch {
                expected: (width, height),
                actual: ((rgb.len() / 3) as u32, 1),
            });
        }
        let pixels = rgb
            .chunks_exact(3)
            .map(|c| rgb_to_ycc(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<YccPixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: YccPixel) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = pixel;
        }
    }

    pub fn pixels(&self) -> &[YccPixel] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [YccPixel] {
        &mut self.pixels
    }

    /// Copy of the luma channel, row-major.
    pub fn luma_plane(&self) -> Vec<u8> {
        self.pixels.iter().map(|p| p.luma).collect()
    }

    /// Packed RGB8 data for display or encoding.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for &px in &self.pixels {
            rgb.extend_from_slice(&ycc_to_rgb(px));
        }
        rgb
    }

    /// Fails with `DimensionMismatch` unless `other` has the same size.
    pub fn ensure_same_dimensions(&self, other: &PixelBuffer) -> Result<(), TransformError> {
        if self.dimensions() != other.dimensions() {
            return Err(TransformError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}

fn check_positive(width: u32, height: u32) -> Result<(), TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::invalid(
            "dimensions",
            format!("{}x{}", width, height),
        ));
    }
    Ok(())
}
