//=========================================================================
// Raw Input Events
//
// Portable representation of device input before debouncing.
//
// Responsibilities:
// - Name keys independently of the windowing backend
// - Carry pointer, trackball and orientation samples to the frame thread
// - Provide equality and hashing semantics for per-frame coalescing
//
// Event Flow:
// ```text
// Device callbacks / winit bridge
//         ↓
//    RawInputEvent (this module)
//         ↓
//    InputSender → channel → InputCollector
//         ↓
//    InputSystem (press/release on signals)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// The discriminants are dense so the keyboard can be a plain array of
/// signals indexed by [`KeyCode::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    ShiftLeft,
    ShiftRight,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys the platform reports but the enum does not name.
    Unidentified,
}

impl KeyCode {
    /// Number of distinct key codes.
    pub const COUNT: usize = KeyCode::Unidentified as usize + 1;

    /// Dense index in `0..COUNT`.
    pub const fn index(self) -> usize {
        self as usize
    }
}

//=== RawInputEvent =======================================================

/// Device-level input sample, not yet debounced.
///
/// Pointer coordinates are in screen space (pixels, top-left origin);
/// the input system flips them to a bottom-left origin.
///
/// # Equality & Hashing Semantics
///
/// ```text
/// KeyDown(A)          == KeyDown(A)              ✓
/// KeyDown(A)          == KeyUp(A)                ✗ (different type)
/// TouchDown{1,2}      == TouchDown{1,2}          ✓
/// TouchMove{..}       == TouchMove{..}           ✓ (always equal)
/// Orientation{..}     == Orientation{..}         ✓ (always equal)
/// ```
///
/// Continuous samples compare equal regardless of payload so that a
/// per-frame buffer keeps only the latest one.
#[derive(Debug, Clone, Copy)]
pub enum RawInputEvent {
    /// Pointer pressed (or a new contact point).
    TouchDown { x: f32, y: f32 },

    /// Pointer dragged while pressed.
    TouchMove { x: f32, y: f32 },

    /// Pointer lifted.
    TouchUp { x: f32, y: f32 },

    /// Relative trackball motion.
    Roll { dx: f32, dy: f32 },

    /// Device orientation in degrees.
    Orientation { azimuth: f32, pitch: f32, roll: f32 },

    KeyDown(KeyCode),

    KeyUp(KeyCode),

    /// Release every raw signal (focus loss, pause).
    ReleaseAll,
}

//--- Implementation ------------------------------------------------------

impl RawInputEvent {
    /// True for samples where only the latest value per frame matters.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::TouchMove { .. } | Self::Orientation { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for RawInputEvent {
    fn eq(&self, other: &Self) -> bool {
        use RawInputEvent::*;
        match (self, other) {
            (TouchDown { x: ax, y: ay }, TouchDown { x: bx, y: by })
            | (TouchUp { x: ax, y: ay }, TouchUp { x: bx, y: by }) => {
                ax.to_bits() == bx.to_bits() && ay.to_bits() == by.to_bits()
            }
            (Roll { dx: ax, dy: ay }, Roll { dx: bx, dy: by }) => {
                ax.to_bits() == bx.to_bits() && ay.to_bits() == by.to_bits()
            }
            (KeyDown(a), KeyDown(b)) | (KeyUp(a), KeyUp(b)) => a == b,
            // Continuous: payload ignored
            (TouchMove { .. }, TouchMove { .. }) => true,
            (Orientation { .. }, Orientation { .. }) => true,
            (ReleaseAll, ReleaseAll) => true,
            _ => false,
        }
    }
}

impl Eq for RawInputEvent {}

/// Hashes discriminant plus the payload that takes part in equality.
impl Hash for RawInputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::TouchDown { x, y } | Self::TouchUp { x, y } => {
                x.to_bits().hash(state);
                y.to_bits().hash(state);
            }
            Self::Roll { dx, dy } => {
                dx.to_bits().hash(state);
                dy.to_bits().hash(state);
            }
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
