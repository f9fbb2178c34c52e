//! RGB <-> YCbCr conversion.
//!
//! Uses the full-range JFIF variant of ITU-R BT.601, which is what JPEG
//! codecs and most imaging libraries mean by "YCbCr". Only the load, save and
//! render paths convert; every editing operation works on the luma channel
//! directly.

use crate::pixel::YccPixel;

/// BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f32 = 0.299;

/// BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f32 = 0.587;

/// BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f32 = 0.114;

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB triple (0-255) to a YCbCr pixel.
#[inline]
pub fn rgb_to_ycc(r: u8, g: u8, b: u8) -> YccPixel {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    YccPixel {
        luma: to_u8(LUMA_R * r + LUMA_G * g + LUMA_B * b),
        cb: to_u8(128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b),
        cr: to_u8(128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b),
    }
}

/// Convert a YCbCr pixel back to an RGB triple (0-255).
#[inline]
pub fn ycc_to_rgb(pixel: YccPixel) -> [u8; 3] {
    let y = pixel.luma as f32;
    let cb = pixel.cb as f32 - 128.0;
    let cr = pixel.cr as f32 - 128.0;
    [
        to_u8(y + 1.402 * cr),
        to_u8(y - 0.344_136 * cb - 0.714_136 * cr),
        to_u8(y + 1.772 * cb),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_gray_has_neutral_chroma() {
        for v in [0u8, 64, 128, 200, 255] {
            let px = rgb_to_ycc(v, v, v);
            assert_eq!(px.luma, v);
            assert_eq!(px.cb, 128);
            assert_eq!(px.cr, 128);
        }
    }

    #[test]
    fn test_pure_red() {
        let px = rgb_to_ycc(255, 0, 0);
        // 0.299 * 255 = 76.2
        assert_eq!(px.luma, 76);
        assert!(px.cr > 200, "Red should have high Cr");
        assert!(px.cb < 128, "Red should have low Cb");
    }

    #[test]
    fn test_neutral_black_is_near_black() {
        let rgb = ycc_to_rgb(YccPixel::NEUTRAL_BLACK);
        assert_eq!(rgb, [16, 16, 16]);
    }

    #[test]
    fn test_rgb_roundtrip_within_one() {
        let samples = [
            [255u8, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [12, 200, 99],
            [250, 250, 3],
        ];
        for rgb in samples {
            let back = ycc_to_rgb(rgb_to_ycc(rgb[0], rgb[1], rgb[2]));
            for c in 0..3 {
                assert!(
                    (back[c] as i32 - rgb[c] as i32).abs() <= 2,
                    "Channel {} drifted: {:?} -> {:?}",
                    c,
                    rgb,
                    back
                );
            }
        }
    }
}
