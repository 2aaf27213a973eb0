//=========================================================================
// Keyboard
//=========================================================================
//
// One debounced signal per key code, stored in a fixed array.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::button::InputButton;
use super::event::KeyCode;

//=== InputKeyboard =======================================================

#[derive(Debug, Clone)]
pub struct InputKeyboard {
    keys: [InputButton; KeyCode::COUNT],
}

impl Default for InputKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl InputKeyboard {
    pub fn new() -> Self {
        Self {
            keys: [InputButton::new(); KeyCode::COUNT],
        }
    }

    pub fn press(&mut self, time: f32, key: KeyCode) {
        self.keys[key.index()].press(time, 1.0);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys[key.index()].release();
    }

    pub fn release_all(&mut self) {
        for key in self.keys.iter_mut() {
            key.release();
        }
    }

    pub fn update(&mut self, time: f32) {
        for key in self.keys.iter_mut() {
            key.update(time);
        }
    }

    pub fn reset_all(&mut self) {
        for key in self.keys.iter_mut() {
            key.reset();
        }
    }

    pub fn key(&self, key: KeyCode) -> &InputButton {
        &self.keys[key.index()]
    }

    pub fn key_mut(&mut self, key: KeyCode) -> &mut InputButton {
        &mut self.keys[key.index()]
    }

    /// Any key in `keys` down this frame.
    pub fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.key(k).down_this_frame())
    }

    /// Most recent press time among `keys`.
    pub fn last_pressed_time(&self, keys: &[KeyCode]) -> f32 {
        keys.iter()
            .map(|&k| self.key(k).last_pressed_time())
            .fold(0.0, f32::max)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
