//=========================================================================
// Two-Axis Signal
//=========================================================================
//
// Pair of debounced signals read as one directional control.
// Composite pressed/triggered are the OR of the axes; the last-pressed
// time is the later of the two.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::button::InputButton;
use crate::core::math::Vec2;

//=== InputXY =============================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputXY {
    x: InputButton,
    y: InputButton,
}

impl InputXY {
    pub const fn new() -> Self {
        Self {
            x: InputButton::new(),
            y: InputButton::new(),
        }
    }

    pub fn with_timeout(timeout: f32) -> Self {
        Self {
            x: InputButton::with_timeout(timeout),
            y: InputButton::with_timeout(timeout),
        }
    }

    //--- Producer Side ----------------------------------------------------

    pub fn press(&mut self, time: f32, x: f32, y: f32) {
        self.x.press(time, x);
        self.y.press(time, y);
    }

    pub fn press_x(&mut self, time: f32, x: f32) {
        self.x.press(time, x);
    }

    pub fn press_y(&mut self, time: f32, y: f32) {
        self.y.press(time, y);
    }

    pub fn release(&mut self) {
        self.x.release();
        self.y.release();
    }

    pub fn release_x(&mut self) {
        self.x.release();
    }

    pub fn release_y(&mut self) {
        self.y.release();
    }

    pub fn set_magnitude(&mut self, x: f32, y: f32) {
        self.x.set_magnitude(x);
        self.y.set_magnitude(y);
    }

    //--- Consumer Side ----------------------------------------------------

    pub fn update(&mut self, time: f32) {
        self.x.update(time);
        self.y.update(time);
    }

    pub fn consume_trigger(&mut self) {
        self.x.consume_trigger();
        self.y.consume_trigger();
    }

    //--- Configuration ----------------------------------------------------

    pub fn set_active(&mut self, active: bool) {
        self.x.set_active(active);
        self.y.set_active(active);
    }

    pub fn set_timeout(&mut self, timeout: Option<f32>) {
        self.x.set_timeout(timeout);
        self.y.set_timeout(timeout);
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    //--- Queries ----------------------------------------------------------

    pub fn pressed(&self) -> bool {
        self.x.pressed() || self.y.pressed()
    }

    pub fn triggered(&self) -> bool {
        self.x.triggered() || self.y.triggered()
    }

    pub fn down_this_frame(&self) -> bool {
        self.x.down_this_frame() || self.y.down_this_frame()
    }

    pub fn x(&self) -> f32 {
        self.x.magnitude()
    }

    pub fn y(&self) -> f32 {
        self.y.magnitude()
    }

    /// Current magnitudes; zero on released axes.
    pub fn vector(&self) -> Vec2 {
        Vec2::new(self.x(), self.y())
    }

    /// Position of the last press, even if already released.
    pub fn last_vector(&self) -> Vec2 {
        Vec2::new(self.x.last_magnitude(), self.y.last_magnitude())
    }

    pub fn last_pressed_time(&self) -> f32 {
        self.x.last_pressed_time().max(self.y.last_pressed_time())
    }

    pub fn pressed_duration(&self, now: f32) -> f32 {
        self.x.pressed_duration(now).max(self.y.pressed_duration(now))
    }

    /// True when down this frame inside the axis-aligned region.
    pub fn down_within_region(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        let at = self.last_vector();
        self.down_this_frame()
            && at.x >= x
            && at.x <= x + width
            && at.y >= y
            && at.y <= y + height
    }

    pub fn axis_x(&self) -> &InputButton {
        &self.x
    }

    pub fn axis_y(&self) -> &InputButton {
        &self.y
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
