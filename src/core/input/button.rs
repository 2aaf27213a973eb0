//=========================================================================
// Input Button
//=========================================================================
//
// Debounced one-dimensional signal.
//
// Architecture:
//   producer side: press(time, magnitude) / release()
//   consumer side: update(time) once per frame, then pure queries
//
//   RELEASED ──press()──> PRESSED ──update()──> HELD
//       ↑                    │                    │
//       └────── release() or timeout ─────────────┘
//
// A configured timeout releases the signal once `time - last_pressed`
// exceeds it, but never on the first update after the press.
//
//=========================================================================

//=== SignalState =========================================================

/// Observable phase of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Released,
    /// First frame down (rising edge).
    Pressed,
    Held,
}

//=== InputButton =========================================================

/// Press/release signal with edge detection, magnitude and optional timeout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputButton {
    down: bool,
    released: bool,
    pressed_since_update: bool,
    frames_held: u32,
    last_pressed_time: f32,
    press_start_time: f32,
    magnitude: f32,
    active: bool,
    timeout: Option<f32>,
}

impl Default for InputButton {
    fn default() -> Self {
        Self::new()
    }
}

impl InputButton {
    pub const fn new() -> Self {
        Self {
            down: false,
            released: false,
            pressed_since_update: false,
            frames_held: 0,
            last_pressed_time: 0.0,
            press_start_time: 0.0,
            magnitude: 0.0,
            active: true,
            timeout: None,
        }
    }

    /// Signal that auto-releases `timeout` seconds after its last press.
    pub fn with_timeout(timeout: f32) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::new()
        }
    }

    //--- Producer Side ----------------------------------------------------

    /// Marks the signal down at `time`, latching `magnitude`.
    ///
    /// Repeated presses while down refresh the timestamp and magnitude but
    /// keep the original press start and held-frame count.
    pub fn press(&mut self, time: f32, magnitude: f32) {
        if !self.down {
            self.down = true;
            self.press_start_time = time;
            self.frames_held = 0;
        }
        self.released = false;
        self.pressed_since_update = true;
        self.last_pressed_time = time;
        self.magnitude = magnitude;
    }

    pub fn release(&mut self) {
        if self.down {
            self.down = false;
            self.released = true;
        }
    }

    /// Updates the latched magnitude of a held signal without counting it
    /// as a new press.
    pub fn set_magnitude(&mut self, magnitude: f32) {
        if self.down {
            self.magnitude = magnitude;
        }
    }

    //--- Consumer Side ----------------------------------------------------

    /// Advances the held-frame counter and applies the timeout.
    ///
    /// Call exactly once per frame, before that frame's queries.
    pub fn update(&mut self, time: f32) {
        self.released = false;
        self.pressed_since_update = false;

        if !self.down {
            return;
        }

        if let Some(timeout) = self.timeout {
            if self.frames_held > 0 && time - self.last_pressed_time > timeout {
                self.down = false;
                self.released = true;
                return;
            }
        }
        self.frames_held = self.frames_held.saturating_add(1);
    }

    /// Clears the rising edge so later readers see the press as held.
    pub fn consume_trigger(&mut self) {
        if self.down && self.frames_held == 0 {
            self.frames_held = 1;
        }
    }

    //--- Configuration ----------------------------------------------------

    /// Masks every query while keeping the timing bookkeeping.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_timeout(&mut self, timeout: Option<f32>) {
        self.timeout = timeout;
    }

    /// Returns to the released state; keeps the active flag and timeout.
    pub fn reset(&mut self) {
        *self = Self {
            active: self.active,
            timeout: self.timeout,
            ..Self::new()
        };
    }

    //--- Queries ----------------------------------------------------------

    pub fn pressed(&self) -> bool {
        self.active && self.down
    }

    /// Down and not yet seen by an update.
    pub fn triggered(&self) -> bool {
        self.active && self.down && self.frames_held == 0
    }

    /// Released since the last update.
    pub fn just_released(&self) -> bool {
        self.active && self.released
    }

    /// Down now, or pressed and released again since the last update.
    pub fn down_this_frame(&self) -> bool {
        self.active && (self.down || self.pressed_since_update)
    }

    pub fn state(&self) -> SignalState {
        if !self.pressed() {
            SignalState::Released
        } else if self.frames_held == 0 {
            SignalState::Pressed
        } else {
            SignalState::Held
        }
    }

    /// Latched magnitude while down, zero otherwise.
    pub fn magnitude(&self) -> f32 {
        if self.pressed() {
            self.magnitude
        } else {
            0.0
        }
    }

    /// Magnitude of the most recent press, whether or not still down.
    pub fn last_magnitude(&self) -> f32 {
        if self.active {
            self.magnitude
        } else {
            0.0
        }
    }

    /// Seconds since the press started, zero while released.
    pub fn pressed_duration(&self, now: f32) -> f32 {
        if self.pressed() {
            now - self.press_start_time
        } else {
            0.0
        }
    }

    pub fn last_pressed_time(&self) -> f32 {
        if self.active {
            self.last_pressed_time
        } else {
            0.0
        }
    }

    pub fn frames_held(&self) -> u32 {
        self.frames_held
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
