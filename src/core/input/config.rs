//=========================================================================
// Input Configuration
//=========================================================================
//
// Bindings and shaping parameters for the game-facing input interface.
// Defaults reproduce the shipped tuning.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== KeyBindings =========================================================

/// Keys feeding the directional pad and the two action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub jump: KeyCode,
    pub attack: KeyCode,
    /// Secondary attack key (trackball click on devices that have one).
    pub click: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            jump: KeyCode::Space,
            attack: KeyCode::KeyX,
            click: KeyCode::Enter,
        }
    }
}

impl KeyBindings {
    pub fn horizontal(&self) -> [KeyCode; 2] {
        [self.left, self.right]
    }

    pub fn vertical(&self) -> [KeyCode; 2] {
        [self.down, self.up]
    }
}

//=== MovementSource ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementSource {
    /// Keys or trackball, whichever was used most recently.
    #[default]
    Automatic,

    /// Device tilt.
    Orientation,
}

//=== DeadZone ============================================================

/// Orientation jitter filter, applied per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadZone {
    /// Below this magnitude the axis reads zero.
    pub zero_below: f32,
    /// Below this magnitude the axis is scaled by `reduced_gain`.
    pub reduce_below: f32,
    pub reduced_gain: f32,
}

impl Default for DeadZone {
    fn default() -> Self {
        Self {
            zero_below: 0.03,
            reduce_below: 0.1,
            reduced_gain: 0.75,
        }
    }
}

impl DeadZone {
    pub fn apply(&self, value: f32) -> f32 {
        let magnitude = value.abs();
        if magnitude < self.zero_below {
            0.0
        } else if magnitude < self.reduce_below {
            value * self.reduced_gain
        } else {
            value
        }
    }
}

//=== TouchRegion =========================================================

/// Axis-aligned on-screen button, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TouchRegion {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

//=== InputConfig =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub bindings: KeyBindings,
    pub movement_source: MovementSource,

    //--- Trackball --------------------------------------------------------
    /// Frames averaged by the roll accumulator.
    pub roll_window: usize,
    pub roll_gain: f32,
    /// Seconds without a roll before the directional pad lets go.
    pub roll_timeout: f32,

    //--- Orientation ------------------------------------------------------
    pub dead_zone: DeadZone,
    pub orientation_sensitivity: f32,

    //--- Keys -------------------------------------------------------------
    /// Directional magnitude of a held direction key.
    pub key_speed: f32,

    //--- Touch ------------------------------------------------------------
    pub fly_region: TouchRegion,
    pub stomp_region: TouchRegion,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            movement_source: MovementSource::Automatic,
            roll_window: 4,
            roll_gain: 1.0,
            roll_timeout: 0.1,
            dead_zone: DeadZone::default(),
            orientation_sensitivity: 1.0,
            key_speed: 0.25,
            fly_region: TouchRegion::new(0.0, 0.0, 128.0, 128.0),
            stomp_region: TouchRegion::new(480.0 - 128.0, 0.0, 128.0, 128.0),
            viewport_width: 480.0,
            viewport_height: 320.0,
        }
    }
}

impl InputConfig {
    /// Resizes the viewport, keeping the stomp button anchored bottom-right.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        assert!(width > 0.0 && height > 0.0, "Viewport must be positive");
        self.stomp_region.x = width - self.stomp_region.width;
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_zone_bands() {
        let zone = DeadZone::default();
        assert_eq!(zone.apply(0.02), 0.0);
        assert_eq!(zone.apply(-0.02), 0.0);
        assert!((zone.apply(0.08) - 0.06).abs() < 1e-6);
        assert_eq!(zone.apply(-0.5), -0.5);
    }

    #[test]
    fn viewport_reanchors_stomp_region() {
        let config = InputConfig::default().with_viewport(800.0, 480.0);
        assert_eq!(config.stomp_region.x, 672.0);
        assert_eq!(config.viewport_height, 480.0);
        assert_eq!(config.fly_region, TouchRegion::new(0.0, 0.0, 128.0, 128.0));
    }
}
