//! Geometric transforms.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner; scaling is anchored there
//! - Destination buffers always have the source's dimensions
//! - Pixels that map outside the source receive a fill pixel

mod scale;

pub use scale::{apply_scale, apply_scale_with_fill, scale_factor_from_drag};
