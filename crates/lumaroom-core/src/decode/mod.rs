//! Image loading for the editor.
//!
//! Files are decoded with the `image` crate, rotated upright according to
//! their EXIF orientation and converted to YCbCr. The resulting
//! [`PixelBuffer`](crate::PixelBuffer) is what
//! [`EditorSession::on_image_loaded`](crate::session::EditorSession::on_image_loaded)
//! expects.
//!
//! # Examples
//!
//! ```ignore
//! use lumaroom_core::decode::decode_image;
//!
//! let bytes = std::fs::read("mandrill.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod load;
mod types;

pub use load::decode_image;
pub use types::DecodeError;
pub(crate) use types::Orientation;
