//! Lumaroom WASM - WebAssembly bindings for Lumaroom
//!
//! This crate exposes the lumaroom-core editor session to JavaScript. The
//! page owns the canvas and the event loop; the editor owns the pixels.
//!
//! # Module Structure
//!
//! - `editor` - The interactive editor session (`JsEditor`)
//! - `filter` - Filter kernel composition
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@lumaroom/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditor(600, 800);
//! editor.loadImage(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Loaded ${editor.width}x${editor.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod filter;

// Re-export public types
pub use editor::{JsEditor, JsEventOutcome};
pub use filter::{compose_filters, plot_filter_composition};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
