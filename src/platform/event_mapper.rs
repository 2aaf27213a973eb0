//=========================================================================
// Platform Event Mapper
//
// Converts Winit input types to the simulation's `RawInputEvent`s.
//
// Responsibilities:
// - Translate physical key codes to the portable `KeyCode`
// - Translate touch phases to touch events
// - Provide the `Unidentified` fallback for keys the game never binds
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, MouseButton, TouchPhase};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{KeyCode, RawInputEvent};

//=== Key Conversion ======================================================
//
// Only the subset the input bindings can name is mapped; everything else
// becomes `Unidentified`.
//

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys -----------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrow keys -------------------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Special keys -----------------------------------------------------
            Space => KeyCode::Space,
            ShiftLeft => KeyCode::ShiftLeft, ShiftRight => KeyCode::ShiftRight,
            Enter => KeyCode::Enter, Escape => KeyCode::Escape,
            Tab => KeyCode::Tab, Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

/// Maps a physical key, `Unidentified` for native scan codes.
pub fn key_from_physical(key: PhysicalKey) -> KeyCode {
    match key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
    }
}

pub fn key_event(key: KeyCode, state: ElementState) -> RawInputEvent {
    match state {
        ElementState::Pressed => RawInputEvent::KeyDown(key),
        ElementState::Released => RawInputEvent::KeyUp(key),
    }
}

//=== Pointer Conversion ==================================================

/// The left mouse button stands in for a finger.
pub fn is_touch_button(button: MouseButton) -> bool {
    button == MouseButton::Left
}

/// Cancelled contacts release like ordinary lifts.
pub fn touch_event(phase: TouchPhase, x: f32, y: f32) -> RawInputEvent {
    match phase {
        TouchPhase::Started => RawInputEvent::TouchDown { x, y },
        TouchPhase::Moved => RawInputEvent::TouchMove { x, y },
        TouchPhase::Ended | TouchPhase::Cancelled => RawInputEvent::TouchUp { x, y },
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn bound_keys_map_one_to_one() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
    }

    #[test]
    fn unbound_keys_fall_back() {
        assert_eq!(KeyCode::from(WinitKeyCode::F12), KeyCode::Unidentified);
        assert_eq!(
            key_from_physical(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            KeyCode::Unidentified
        );
    }

    #[test]
    fn element_state_picks_direction() {
        assert_eq!(
            key_event(KeyCode::KeyX, ElementState::Pressed),
            RawInputEvent::KeyDown(KeyCode::KeyX)
        );
        assert_eq!(
            key_event(KeyCode::KeyX, ElementState::Released),
            RawInputEvent::KeyUp(KeyCode::KeyX)
        );
    }

    #[test]
    fn touch_phases() {
        assert_eq!(
            touch_event(TouchPhase::Started, 1.0, 2.0),
            RawInputEvent::TouchDown { x: 1.0, y: 2.0 }
        );
        assert!(touch_event(TouchPhase::Moved, 1.0, 2.0).is_continuous());
        assert_eq!(
            touch_event(TouchPhase::Cancelled, 3.0, 4.0),
            RawInputEvent::TouchUp { x: 3.0, y: 4.0 }
        );
    }

    #[test]
    fn only_left_button_touches() {
        assert!(is_touch_button(MouseButton::Left));
        assert!(!is_touch_button(MouseButton::Right));
    }
}
