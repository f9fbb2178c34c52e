//! Lumaroom Core - interactive image editing library
//!
//! This crate provides the editing core for Lumaroom: a YCbCr pixel buffer,
//! luma-only intensity transforms (brightness/contrast, local histogram
//! equalization), nearest-neighbour scaling, and the drag-driven session that
//! applies them as live previews. Decoding, encoding and filter composition
//! round it out.
//!
//! Windowing, the event loop and blitting to screen belong to the host; it
//! feeds [`InputEvent`]s to an [`EditorSession`] and renders
//! [`EditorSession::display_rgb`] whenever it gets [`EventOutcome::Redraw`].

pub mod adjustments;
pub mod color;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod pixel;
pub mod session;
pub mod transform;

pub use adjustments::{apply_brightness_contrast, BrightnessContrast};
pub use config::EditorConfig;
pub use error::TransformError;
pub use filter::{Filter, FilterError};
pub use histogram::{equalize_local_histogram, luma_histogram};
pub use pixel::{PixelBuffer, YccPixel};
pub use session::{DragState, EditorSession, EventOutcome, InputEvent, MouseButton};
pub use transform::{apply_scale, apply_scale_with_fill, scale_factor_from_drag};
