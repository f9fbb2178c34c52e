//! Image encoding for save.
//!
//! The display buffer is converted from YCbCr to RGB8 and handed to the
//! `image` crate's encoders. Saving never modifies the buffer.
//!
//! # Examples
//!
//! ```ignore
//! use lumaroom_core::encode::encode_jpeg;
//!
//! let jpeg_bytes = encode_jpeg(session.display(), 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod png;

use thiserror::Error;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The underlying encoder failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
