//=========================================================================
// Platform Subsystem
//
// Bridges Winit window events to the simulation's input queue.
//
// Architecture:
// ```text
//  Host / Winit Event Loop              Frame Thread
//  ┌──────────────────────────┐        ┌──────────────────┐
//  │  WindowEvent             │        │  Simulation      │
//  │   ↓                      │        │   ↓              │
//  │  WinitInputBridge        │        │  InputCollector  │
//  │   ├─ key/touch mapping   │        │   ↓              │
//  │   └─ mouse-as-touch      │        │  InputSystem     │
//  │   ↓                      │        │   ↓              │
//  │  InputBuffer             │        │  InputGame-      │
//  │   ├─ discrete            │        │  Interface       │
//  │   └─ continuous          │        └──────────────────┘
//  │   ↓ (flush)              │                 ↑
//  │  InputSender ────────────┼─────────────────┘
//  └──────────────────────────┘     RawInputEvent
//
//  Frame Boundary: RedrawRequested (or an explicit flush)
// ```
//
// Notes:
// - The bridge owns no window; the host keeps its event loop and hands
//   every `WindowEvent` over.
// - Pointer coordinates are scaled into game viewport pixels before they
//   leave the bridge. The input system flips the y axis.
// - A disconnected simulation only costs a warning; the window keeps
//   running so it can close.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event_mapper;
pub mod input_buffer;

//=== External Crates =====================================================

use log::*;
use winit::event::{ElementState, MouseButton, Touch, WindowEvent};

//=== Internal Imports ====================================================

use crate::core::input::{InputSender, KeyCode, RawInputEvent};
use crate::core::math::Vec2;
use event_mapper::{is_touch_button, key_event, key_from_physical, touch_event};
pub use input_buffer::InputBuffer;

//=== WinitInputBridge ====================================================

/// Turns Winit window events into raw simulation input.
///
/// The left mouse button behaves as a single finger: pressing it touches
/// down at the cursor, moving the cursor while pressed drags the touch.
#[derive(Debug)]
pub struct WinitInputBridge {
    sender: InputSender,
    buffer: InputBuffer,
    /// Last cursor position, already scaled.
    cursor: Vec2,
    pointer_down: bool,
    /// Window pixels to game viewport pixels.
    scale: Vec2,
}

impl WinitInputBridge {
    //--- Construction -----------------------------------------------------

    pub fn new(sender: InputSender) -> Self {
        info!(target: "platform", "Input bridge initialized");
        Self {
            sender,
            buffer: InputBuffer::new(),
            cursor: Vec2::ZERO,
            pointer_down: false,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Sets the window-to-viewport factor from both sizes.
    ///
    /// # Panics
    ///
    /// Panics if a window dimension is not positive.
    pub fn set_viewport(&mut self, window: (f32, f32), viewport: (f32, f32)) {
        assert!(
            window.0 > 0.0 && window.1 > 0.0,
            "Window size must be positive"
        );
        self.scale = Vec2::new(viewport.0 / window.0, viewport.1 / window.1);
        debug!(target: "platform", "Pointer scale set to {:?}", self.scale);
    }

    //--- Window Events ----------------------------------------------------

    /// Feeds one window event. `RedrawRequested` is the frame boundary and
    /// flushes the buffer; other events only buffer.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.repeat {
                    return;
                }
                self.on_key(key_from_physical(key_event.physical_key), key_event.state);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(*button, *state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::Touch(Touch { phase, location, .. }) => {
                let point = self.scaled(location.x as f32, location.y as f32);
                self.buffer.push(touch_event(*phase, point.x, point.y));
            }

            WindowEvent::Focused(false) => self.on_focus_lost(),

            WindowEvent::RedrawRequested => {
                self.flush();
            }

            _ => {
                // Resize, scale factor, IME: not input for the simulation
            }
        }
    }

    //--- Direct Intake ----------------------------------------------------

    pub fn on_key(&mut self, key: KeyCode, state: ElementState) {
        if key == KeyCode::Unidentified {
            warn!(target: "platform::input", "Unmapped key ignored");
            return;
        }
        self.buffer.push(key_event(key, state));
    }

    /// Only the touch button is forwarded.
    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if !is_touch_button(button) {
            trace!(target: "platform::input", "Mouse button {:?} ignored", button);
            return;
        }

        let Vec2 { x, y } = self.cursor;
        match state {
            ElementState::Pressed => {
                self.pointer_down = true;
                self.buffer.push(RawInputEvent::TouchDown { x, y });
            }
            ElementState::Released => {
                self.pointer_down = false;
                self.buffer.push(RawInputEvent::TouchUp { x, y });
            }
        }
    }

    /// Window pixel coordinates, top-left origin.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = self.scaled(x, y);
        if self.pointer_down {
            let Vec2 { x, y } = self.cursor;
            self.buffer.push(RawInputEvent::TouchMove { x, y });
        }
    }

    /// Releases every held signal, including the mouse-as-touch pointer.
    pub fn on_focus_lost(&mut self) {
        debug!(target: "platform", "Focus lost, releasing input");
        self.pointer_down = false;
        self.buffer.push(RawInputEvent::ReleaseAll);
    }

    //--- Flush ------------------------------------------------------------

    /// Sends everything buffered since the last flush. Returns how many
    /// events the queue accepted; empty buffers send nothing.
    pub fn flush(&mut self) -> usize {
        if self.buffer.is_empty() {
            return 0;
        }

        let events = self.buffer.drain();
        let total = events.len();
        trace!(target: "platform::input", "Flushing {} events", total);

        let sent = self.sender.send_all(events);
        if sent < total {
            warn!(
                target: "platform::input",
                "Input queue rejected {} of {} events",
                total - sent,
                total
            );
        }
        sent
    }

    //--- Accessors --------------------------------------------------------

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    fn scaled(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x * self.scale.x, y * self.scale.y)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
