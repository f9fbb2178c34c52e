//! Editor session bindings.
//!
//! JavaScript owns the event loop and the canvas. It forwards pointer and
//! key events to a [`JsEditor`] and blits `rgbPixels()` whenever a call
//! reports that the display changed.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsEditor(canvas.width, canvas.height);
//! editor.loadImage(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onpointerdown = (e) => editor.buttonPress(e.button, e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => { if (editor.motion(e.offsetX, e.offsetY)) redraw(); };
//! canvas.onpointerup = (e) => { editor.buttonRelease(e.button, e.offsetX, e.offsetY); redraw(); };
//! ```

use lumaroom_core::decode::decode_image;
use lumaroom_core::encode::{encode_jpeg, encode_png};
use lumaroom_core::session::KEY_ESCAPE;
use lumaroom_core::{
    luma_histogram, EditorConfig, EditorSession, EventOutcome, MouseButton, PixelBuffer,
};
use wasm_bindgen::prelude::*;

/// What the page should do after a key press.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsEventOutcome {
    Redraw = 0,
    LoadRequested = 1,
    SaveRequested = 2,
    Exit = 3,
}

impl From<EventOutcome> for JsEventOutcome {
    fn from(outcome: EventOutcome) -> Self {
        match outcome {
            EventOutcome::Redraw => JsEventOutcome::Redraw,
            EventOutcome::LoadRequested => JsEventOutcome::LoadRequested,
            EventOutcome::SaveRequested => JsEventOutcome::SaveRequested,
            EventOutcome::Exit => JsEventOutcome::Exit,
        }
    }
}

/// Interactive editor handle for JavaScript.
#[wasm_bindgen]
pub struct JsEditor {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor with a blank canvas of the given view size.
    #[wasm_bindgen(constructor)]
    pub fn new(view_width: u32, view_height: u32) -> Result<JsEditor, JsValue> {
        let config = EditorConfig {
            view_width,
            view_height,
            ..Default::default()
        };
        EditorSession::new(config)
            .map(|inner| JsEditor { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create an editor from a config object. Missing fields use defaults.
    ///
    /// ```typescript
    /// const editor = JsEditor.fromConfig({
    ///   view_width: 1024,
    ///   view_height: 768,
    ///   histogram_radius: 8,
    /// });
    /// ```
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue) -> Result<JsEditor, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
        EditorSession::new(config)
            .map(|inner| JsEditor { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current config as a plain object.
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Decode an image file and make it the display buffer.
    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let image = decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.on_image_loaded(image);
        Ok(())
    }

    /// Replace the display buffer with packed RGB8 pixels.
    #[wasm_bindgen(js_name = setImage)]
    pub fn set_image(&mut self, width: u32, height: u32, rgb: &[u8]) -> Result<(), JsValue> {
        let image = PixelBuffer::from_rgb(width, height, rgb)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.on_image_loaded(image);
        Ok(())
    }

    /// Pointer button down. `button` uses DOM numbering (0 left, 1 middle, 2 right).
    #[wasm_bindgen(js_name = buttonPress)]
    pub fn button_press(&mut self, button: i16, x: f64, y: f64) {
        self.inner.on_button_press(button_from_dom(button), x, y);
    }

    /// Pointer button up.
    #[wasm_bindgen(js_name = buttonRelease)]
    pub fn button_release(&mut self, button: i16, x: f64, y: f64) {
        self.inner.on_button_release(button_from_dom(button), x, y);
    }

    /// Pointer moved. Returns true if the display changed.
    ///
    /// A preview that cannot be computed (for example a scale drag that
    /// passes through the view centre) is reported on the console and leaves
    /// the display as it was.
    pub fn motion(&mut self, x: f64, y: f64) -> bool {
        match self.inner.on_motion(x, y) {
            Ok(changed) => changed,
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
                false
            }
        }
    }

    /// Key pressed. Accepts `KeyboardEvent.key` values.
    pub fn key(&mut self, key: &str) -> Result<JsEventOutcome, JsValue> {
        let Some(key) = key_from_dom(key) else {
            return Ok(JsEventOutcome::Redraw);
        };
        self.inner
            .on_key(key)
            .map(JsEventOutcome::from)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// View resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.inner.on_resize(width, height);
    }

    /// Display buffer as packed RGB8 (3 bytes per pixel, row-major).
    #[wasm_bindgen(js_name = rgbPixels)]
    pub fn rgb_pixels(&self) -> Vec<u8> {
        self.inner.display_rgb()
    }

    /// Luma histogram of the display buffer (256 bins).
    #[wasm_bindgen(js_name = lumaHistogram)]
    pub fn luma_histogram(&self) -> Vec<u32> {
        luma_histogram(self.inner.display()).to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.display().width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.display().height()
    }

    /// Local histogram equalization radius.
    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> u32 {
        self.inner.radius()
    }

    #[wasm_bindgen(setter)]
    pub fn set_radius(&mut self, radius: u32) {
        self.inner.set_radius(radius);
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Encode the display buffer as JPEG. Uses the configured quality when
    /// `quality` is omitted.
    #[wasm_bindgen(js_name = saveJpeg)]
    pub fn save_jpeg(&self, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
        let quality = quality.unwrap_or(self.inner.config().jpeg_quality);
        encode_jpeg(self.inner.display(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Encode the display buffer as PNG.
    #[wasm_bindgen(js_name = savePng)]
    pub fn save_png(&self) -> Result<Vec<u8>, JsValue> {
        encode_png(self.inner.display()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn button_from_dom(button: i16) -> MouseButton {
    match button {
        0 => MouseButton::Primary,
        2 => MouseButton::Secondary,
        _ => MouseButton::Middle,
    }
}

/// Map a `KeyboardEvent.key` value to the session's key character.
/// Named keys other than Escape are not editor commands.
fn key_from_dom(key: &str) -> Option<char> {
    if key == "Escape" {
        return Some(KEY_ESCAPE);
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}


/// WASM-specific tests that require JsValue.
///
/// These tests use constructors that take a `JsValue` and can only run on
/// wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn config_object(entries: &[(&str, f64)]) -> JsValue {
        let obj = js_sys::Object::new();
        for (key, value) in entries {
            js_sys::Reflect::set(&obj, &JsValue::from_str(key), &JsValue::from_f64(*value))
                .unwrap();
        }
        obj.into()
    }

    #[wasm_bindgen_test]
    fn test_from_config_partial_object() {
        let config = config_object(&[("view_width", 40.0), ("histogram_radius", 9.0)]);
        let editor = JsEditor::from_config(config).unwrap();
        assert_eq!(editor.width(), 40);
        assert_eq!(editor.height(), 800);
        assert_eq!(editor.radius(), 9);
    }

    #[wasm_bindgen_test]
    fn test_from_config_rejects_zero_radius() {
        let config = config_object(&[("histogram_radius", 0.0)]);
        assert!(JsEditor::from_config(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_from_config_rejects_wrong_type() {
        let config = serde_wasm_bindgen::to_value(&"not an object").unwrap();
        assert!(JsEditor::from_config(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_config_json_roundtrip() {
        let editor = JsEditor::new(64, 48).unwrap();
        let json = editor.config_json().unwrap();
        let again = JsEditor::from_config(json).unwrap();
        assert_eq!(again.width(), 64);
        assert_eq!(again.height(), 48);
    }

    #[wasm_bindgen_test]
    fn test_scale_drag_through_centre_keeps_display() {
        let mut editor = JsEditor::new(100, 100).unwrap();
        editor.set_image(4, 4, &vec![80u8; 48]).unwrap();
        editor.button_press(2, 60.0, 50.0);
        assert!(editor.motion(55.0, 50.0));
        let before = editor.rgb_pixels();
        assert!(!editor.motion(50.0, 50.0));
        assert_eq!(editor.rgb_pixels(), before);
    }

    #[wasm_bindgen_test]
    fn test_load_invalid_bytes_errors() {
        let mut editor = JsEditor::new(10, 10).unwrap();
        assert!(editor.load_image(b"nope").is_err());
    }
}
