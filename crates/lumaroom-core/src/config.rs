//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::pixel::YccPixel;

/// Default view width in pixels.
pub const DEFAULT_VIEW_WIDTH: u32 = 600;

/// Default view height in pixels.
pub const DEFAULT_VIEW_HEIGHT: u32 = 800;

/// Default local histogram equalization radius.
pub const DEFAULT_HISTOGRAM_RADIUS: u32 = 5;

/// Default JPEG quality used when saving.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Settings for an [`EditorSession`](crate::session::EditorSession).
///
/// Missing fields take their defaults when deserializing, so hosts only need
/// to send what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of the view the pointer coordinates refer to.
    pub view_width: u32,
    /// Height of the view the pointer coordinates refer to.
    pub view_height: u32,
    /// Initial local histogram equalization radius (>= 1).
    pub histogram_radius: u32,
    /// Pixel written where a scale maps outside the image.
    pub fill_pixel: YccPixel,
    /// JPEG quality (1-100) used by save.
    pub jpeg_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            histogram_radius: DEFAULT_HISTOGRAM_RADIUS,
            fill_pixel: YccPixel::NEUTRAL_BLACK,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject zero view dimensions and a zero radius.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.view_width == 0 || self.view_height == 0 {
            return Err(TransformError::invalid(
                "view",
                format!("{}x{}", self.view_width, self.view_height),
            ));
        }
        if self.histogram_radius < 1 {
            return Err(TransformError::invalid(
                "histogram_radius",
                self.histogram_radius,
            ));
        }
        Ok(())
    }
}
