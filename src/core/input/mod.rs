//=========================================================================
// Input System
//
// Converts raw device events into debounced per-frame signals.
//
// Responsibilities:
// - Hold one signal per raw source (touch, trackball, orientation, keys)
// - Apply raw events as press/release on those signals
// - Age every signal once per frame (held counters, timeouts)
//
// Frame lifecycle:
// ```text
// update(game_time) → apply(event)* → InputGameInterface::refresh → queries
// ```
//
// Raw signals carry device units; gameplay reads the shaped signals of
// `InputGameInterface` instead.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod button;
pub mod collector;
pub mod config;
pub mod event;
pub mod game_input;
pub mod keyboard;
pub mod roll;
pub mod xy;

//=== Public API ==========================================================

pub use button::{InputButton, SignalState};
pub use collector::{input_channel, InputCollector, InputSender, MAX_EVENTS_PER_FRAME};
pub use config::{DeadZone, InputConfig, KeyBindings, MovementSource, TouchRegion};
pub use event::{KeyCode, RawInputEvent};
pub use game_input::InputGameInterface;
pub use keyboard::InputKeyboard;
pub use roll::RollAccumulator;
pub use xy::InputXY;

//=== External Dependencies ===============================================

use log::trace;

//=== InputSystem =========================================================

/// Raw input signals, written by event application and read by the
/// game-facing interface.
#[derive(Debug, Clone)]
pub struct InputSystem {
    touch: InputXY,
    trackball: InputXY,
    orientation: InputXY,
    keyboard: InputKeyboard,
    viewport_height: f32,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// `viewport_height` flips touch coordinates to a bottom-left origin.
    pub fn new(viewport_height: f32) -> Self {
        Self {
            touch: InputXY::new(),
            trackball: InputXY::new(),
            orientation: InputXY::new(),
            keyboard: InputKeyboard::new(),
            viewport_height,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Ages every signal. Call once per frame before applying new events.
    pub fn update(&mut self, time: f32) {
        self.touch.update(time);
        self.trackball.update(time);
        self.orientation.update(time);
        self.keyboard.update(time);
    }

    /// Applies one raw event stamped with the frame's game time.
    pub fn apply(&mut self, event: RawInputEvent, time: f32) {
        trace!("Input event {:?} at {:.3}", event, time);
        match event {
            RawInputEvent::TouchDown { x, y } | RawInputEvent::TouchMove { x, y } => {
                self.touch_down(time, x, y)
            }
            RawInputEvent::TouchUp { .. } => self.touch_up(),
            RawInputEvent::Roll { dx, dy } => self.roll(time, dx, dy),
            RawInputEvent::Orientation {
                azimuth,
                pitch,
                roll,
            } => self.set_orientation(time, azimuth, pitch, roll),
            RawInputEvent::KeyDown(key) => self.key_down(time, key),
            RawInputEvent::KeyUp(key) => self.key_up(key),
            RawInputEvent::ReleaseAll => self.release_all(),
        }
    }

    //--- Raw Ingestion ----------------------------------------------------

    pub fn touch_down(&mut self, time: f32, x: f32, y: f32) {
        self.touch.press(time, x, self.viewport_height - y);
    }

    pub fn touch_up(&mut self) {
        self.touch.release();
    }

    /// Rolls arriving within one frame add up.
    pub fn roll(&mut self, time: f32, dx: f32, dy: f32) {
        let x = self.trackball.x() + dx;
        let y = self.trackball.y() + dy;
        self.trackball.press(time, x, y);
    }

    /// Normalises pitch and roll (degrees) into [-1, 1].
    pub fn set_orientation(&mut self, time: f32, _azimuth: f32, pitch: f32, roll: f32) {
        let x = -pitch / 180.0;
        let y = -roll / 90.0;
        self.orientation.press(time, x, y);
    }

    pub fn key_down(&mut self, time: f32, key: KeyCode) {
        self.keyboard.press(time, key);
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keyboard.release(key);
    }

    pub fn release_all(&mut self) {
        self.trackball.release();
        self.touch.release();
        self.keyboard.release_all();
        self.orientation.release();
    }

    pub fn reset(&mut self) {
        self.touch.reset();
        self.trackball.reset();
        self.orientation.reset();
        self.keyboard.reset_all();
    }

    //--- Query Methods ----------------------------------------------------

    pub fn touch(&self) -> &InputXY {
        &self.touch
    }

    pub fn trackball(&self) -> &InputXY {
        &self.trackball
    }

    /// The interface releases the trackball after consuming a frame's rolls.
    pub fn trackball_mut(&mut self) -> &mut InputXY {
        &mut self.trackball
    }

    pub fn orientation(&self) -> &InputXY {
        &self.orientation
    }

    pub fn keyboard(&self) -> &InputKeyboard {
        &self.keyboard
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
