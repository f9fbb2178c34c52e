//! Interactive editing session: the display buffer plus the drag state
//! machine that drives live previews.
//!
//! ## Drag protocol
//!
//! ```text
//! Idle --press--> Dragging { snapshot } --release--> Idle
//!                    |   ^
//!                    +---+ motion: snapshot -> transform -> display
//! ```
//!
//! Pressing a button copies the display buffer into a snapshot. Every motion
//! event re-derives the preview from that snapshot, never from the previous
//! frame, so a drag cannot compound or drift. Releasing drops the snapshot
//! and the last preview stays as the new baseline; there is no rollback.
//!
//! - Primary button: brightness/contrast from the pointer displacement
//! - Secondary button: scale by the ratio of distances from the view centre
//! - Middle button: starts a drag that applies nothing

use tracing::{debug, info, warn};

use crate::adjustments::{apply_brightness_contrast, BrightnessContrast};
use crate::config::EditorConfig;
use crate::error::TransformError;
use crate::histogram::equalize_local_histogram;
use crate::pixel::PixelBuffer;
use crate::transform::{apply_scale_with_fill, scale_factor_from_drag};

/// Escape key as delivered in [`InputEvent::Key`].
pub const KEY_ESCAPE: char = '\u{1b}';

/// Pointer buttons the session distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button: brightness/contrast.
    Primary,
    /// Right button: scale.
    Secondary,
    /// Any other button: drag without effect.
    Middle,
}

/// Drag lifecycle state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        button: MouseButton,
        origin_x: f64,
        origin_y: f64,
        /// Display buffer as it was when the button went down.
        snapshot: PixelBuffer,
    },
}

/// Discrete input delivered by the host event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ButtonPress { button: MouseButton, x: f64, y: f64 },
    ButtonRelease { button: MouseButton, x: f64, y: f64 },
    Motion { x: f64, y: f64 },
    Key(char),
    Resize { width: u32, height: u32 },
}

/// What the host should do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Re-render the display buffer.
    Redraw,
    /// User asked to open an image; the host picks the file and calls
    /// [`EditorSession::on_image_loaded`].
    LoadRequested,
    /// User asked to save; the host encodes [`EditorSession::display`].
    SaveRequested,
    /// User asked to quit.
    Exit,
}

/// Owns the display buffer, the drag state and the view geometry.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    display: PixelBuffer,
    drag: DragState,
    view_width: u32,
    view_height: u32,
    radius: u32,
}

impl EditorSession {
    /// Start a session on a blank canvas the size of the view.
    pub fn new(config: EditorConfig) -> Result<Self, TransformError> {
        config.validate()?;
        let canvas = PixelBuffer::filled(config.view_width, config.view_height, config.fill_pixel);
        Self::with_image(config, canvas)
    }

    /// Start a session on an already-loaded image.
    pub fn with_image(config: EditorConfig, image: PixelBuffer) -> Result<Self, TransformError> {
        config.validate()?;
        Ok(Self {
            view_width: config.view_width,
            view_height: config.view_height,
            radius: config.histogram_radius,
            display: image,
            drag: DragState::Idle,
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The buffer to render or save.
    pub fn display(&self) -> &PixelBuffer {
        &self.display
    }

    /// The display buffer as packed RGB8 for blitting.
    pub fn display_rgb(&self) -> Vec<u8> {
        self.display.to_rgb()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    /// Current local histogram equalization radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Set the equalization radius, floored at 1.
    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius.max(1);
        info!(radius = self.radius, "radius changed");
    }

    pub fn increment_radius(&mut self) {
        self.set_radius(self.radius.saturating_add(1));
    }

    pub fn decrement_radius(&mut self) {
        self.set_radius(self.radius.saturating_sub(1));
    }

    /// Replace the display buffer wholesale and abandon any drag.
    pub fn on_image_loaded(&mut self, image: PixelBuffer) {
        info!(width = image.width(), height = image.height(), "image loaded");
        self.display = image;
        self.drag = DragState::Idle;
    }

    /// Update the view geometry used to map pointer motion to parameters.
    /// Zero dimensions are ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring degenerate resize");
            return;
        }
        self.view_width = width;
        self.view_height = height;
    }

    /// Begin a drag. A press while a drag is already active is ignored so
    /// the original snapshot stays the source.
    pub fn on_button_press(&mut self, button: MouseButton, x: f64, y: f64) {
        if self.is_dragging() {
            debug!(?button, "press ignored, drag already active");
            return;
        }
        debug!(?button, x, y, "drag started");
        self.drag = DragState::Dragging {
            button,
            origin_x: x,
            origin_y: y,
            snapshot: self.display.clone(),
        };
    }

    /// End the current drag, keeping the last preview.
    pub fn on_button_release(&mut self, button: MouseButton, x: f64, y: f64) {
        if self.is_dragging() {
            debug!(?button, x, y, "drag ended");
        }
        self.drag = DragState::Idle;
    }

    /// Re-render the preview for a pointer at `(x, y)`.
    ///
    /// Returns `Ok(true)` if the display buffer was rewritten. On error the
    /// display keeps its last valid state.
    pub fn on_motion(&mut self, x: f64, y: f64) -> Result<bool, TransformError> {
        let DragState::Dragging {
            button,
            origin_x,
            origin_y,
            snapshot,
        } = &self.drag
        else {
            return Ok(false);
        };

        let result = match button {
            MouseButton::Primary => {
                let params = BrightnessContrast::from_drag(
                    x - origin_x,
                    y - origin_y,
                    self.view_width,
                    self.view_height,
                );
                apply_brightness_contrast(snapshot, &mut self.display, params)
            }
            MouseButton::Secondary => {
                let center = (
                    self.view_width as f64 / 2.0,
                    self.view_height as f64 / 2.0,
                );
                let factor = scale_factor_from_drag((*origin_x, *origin_y), (x, y), center);
                apply_scale_with_fill(snapshot, &mut self.display, factor, self.config.fill_pixel)
            }
            MouseButton::Middle => return Ok(false),
        };

        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(error = %e, "preview transform failed, display unchanged");
                Err(e)
            }
        }
    }

    /// Run local histogram equalization on the display with the current radius.
    pub fn equalize(&mut self) -> Result<(), TransformError> {
        equalize_local_histogram(&mut self.display, self.radius)
    }

    /// Handle a key press.
    ///
    /// | key       | action                           |
    /// |-----------|----------------------------------|
    /// | `h`       | local histogram equalization     |
    /// | `+` / `=` | radius + 1                       |
    /// | `-` / `_` | radius - 1 (minimum 1)           |
    /// | `l`       | request load                     |
    /// | `s`       | request save                     |
    /// | Escape    | request exit                     |
    pub fn on_key(&mut self, key: char) -> Result<EventOutcome, TransformError> {
        match key {
            KEY_ESCAPE => return Ok(EventOutcome::Exit),
            'l' => return Ok(EventOutcome::LoadRequested),
            's' => return Ok(EventOutcome::SaveRequested),
            'h' => self.equalize()?,
            '+' | '=' => self.increment_radius(),
            '-' | '_' => self.decrement_radius(),
            other => debug!(key = ?other, "unhandled key"),
        }
        Ok(EventOutcome::Redraw)
    }

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<EventOutcome, TransformError> {
        match event {
            InputEvent::ButtonPress { button, x, y } => self.on_button_press(button, x, y),
            InputEvent::ButtonRelease { button, x, y } => self.on_button_release(button, x, y),
            InputEvent::Motion { x, y } => {
                self.on_motion(x, y)?;
            }
            InputEvent::Key(key) => return self.on_key(key),
            InputEvent::Resize { width, height } => self.on_resize(width, height),
        }
        Ok(EventOutcome::Redraw)
    }
}
