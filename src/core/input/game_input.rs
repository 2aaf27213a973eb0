//=========================================================================
// Game Input Interface
//=========================================================================
//
// Shapes raw signals into the three controls gameplay reads.
//
// Architecture:
//   InputSystem (raw) ──refresh()──> directional pad (two-axis)
//                                    jump button
//                                    attack button
//
//   Directional source:
//     Automatic ── trackball or keys, whichever moved last
//       ├─ trackball: per-frame roll → RollAccumulator → pad (timeout decay)
//       └─ keys: constant speed, per-axis release
//     Orientation ── dead zone + sensitivity
//
// The pad keeps the roll timeout on both axes: frames without a roll feed
// zero samples without refreshing the press, so the pad lets go shortly
// after the trackball stops.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::button::InputButton;
use super::config::{InputConfig, MovementSource, TouchRegion};
use super::event::KeyCode;
use super::roll::RollAccumulator;
use super::xy::InputXY;
use super::InputSystem;
use crate::core::math::Vec2;

//=== InputGameInterface ==================================================

#[derive(Debug, Clone)]
pub struct InputGameInterface {
    config: InputConfig,
    dpad: InputXY,
    jump: InputButton,
    attack: InputButton,
    roll: RollAccumulator,
    active: bool,
}

impl InputGameInterface {
    pub fn new(config: InputConfig) -> Self {
        let roll = RollAccumulator::new(config.roll_window, config.roll_gain);
        Self {
            dpad: InputXY::with_timeout(config.roll_timeout),
            jump: InputButton::new(),
            attack: InputButton::new(),
            roll,
            active: true,
            config,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Ages the shaped signals. Runs alongside [`InputSystem::update`].
    pub fn update(&mut self, time: f32) {
        self.dpad.update(time);
        self.jump.update(time);
        self.attack.update(time);
    }

    /// Derives this frame's controls from the raw signals.
    ///
    /// Runs after the frame's raw events have been applied.
    pub fn refresh(&mut self, input: &mut InputSystem, time: f32) {
        self.refresh_buttons(input, time);

        match self.config.movement_source {
            MovementSource::Orientation => self.refresh_orientation(input, time),
            MovementSource::Automatic => {
                let directions = self.direction_keys();
                let key_time = input.keyboard().last_pressed_time(&directions);
                if input.trackball().last_pressed_time() > key_time {
                    self.refresh_trackball(input, time);
                } else {
                    self.refresh_keys(input, time);
                }
            }
        }
    }

    //--- Control ----------------------------------------------------------

    /// Masks every shaped signal (pause) while keeping their timing.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.dpad.set_active(active);
        self.jump.set_active(active);
        self.attack.set_active(active);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reset(&mut self) {
        self.dpad.reset();
        self.jump.reset();
        self.attack.reset();
        self.roll.reseed();
    }

    //--- Queries ----------------------------------------------------------

    pub fn dpad(&self) -> &InputXY {
        &self.dpad
    }

    pub fn jump(&self) -> &InputButton {
        &self.jump
    }

    pub fn attack(&self) -> &InputButton {
        &self.attack
    }

    pub fn attack_mut(&mut self) -> &mut InputButton {
        &mut self.attack
    }

    pub fn dpad_mut(&mut self) -> &mut InputXY {
        &mut self.dpad
    }

    pub fn jump_mut(&mut self) -> &mut InputButton {
        &mut self.jump
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    //--- Internal Helpers -------------------------------------------------

    fn direction_keys(&self) -> [KeyCode; 4] {
        let b = &self.config.bindings;
        [b.left, b.right, b.up, b.down]
    }

    fn refresh_buttons(&mut self, input: &InputSystem, time: f32) {
        let bindings = self.config.bindings;
        let keyboard = input.keyboard();
        let touch = input.touch();

        let jump_down = keyboard.key(bindings.jump).down_this_frame()
            || within(touch, &self.config.fly_region);
        let attack_down = keyboard.any_down(&[bindings.attack, bindings.click])
            || within(touch, &self.config.stomp_region);

        set_button(&mut self.jump, jump_down, time);
        set_button(&mut self.attack, attack_down, time);
    }

    fn refresh_trackball(&mut self, input: &mut InputSystem, time: f32) {
        let trackball = input.trackball_mut();

        if trackball.down_this_frame() {
            if !self.dpad.pressed() {
                self.roll.reseed();
            }
            self.roll.push(trackball.last_vector());
            trackball.release();

            let v = self.roll.value();
            self.dpad.press(time, v.x, v.y);
        } else if self.dpad.pressed() {
            self.roll.push(Vec2::ZERO);
            let v = self.roll.value();
            self.dpad.set_magnitude(v.x, v.y);
        }
    }

    fn refresh_keys(&mut self, input: &InputSystem, time: f32) {
        let b = self.config.bindings;
        let speed = self.config.key_speed;

        match axis_from_keys(input, b.left, b.right) {
            Some(sign) => self.dpad.press_x(time, sign * speed),
            None => self.dpad.release_x(),
        }
        match axis_from_keys(input, b.down, b.up) {
            Some(sign) => self.dpad.press_y(time, sign * speed),
            None => self.dpad.release_y(),
        }
    }

    fn refresh_orientation(&mut self, input: &InputSystem, time: f32) {
        let orientation = input.orientation();
        if !orientation.pressed() {
            self.dpad.release();
            return;
        }

        let zone = self.config.dead_zone;
        let sensitivity = self.config.orientation_sensitivity;
        let x = (zone.apply(orientation.x()) * sensitivity).clamp(-1.0, 1.0);
        let y = (zone.apply(orientation.y()) * sensitivity).clamp(-1.0, 1.0);
        self.dpad.press(time, x, y);
    }
}

//=== Helpers =============================================================

fn within(touch: &InputXY, region: &TouchRegion) -> bool {
    touch.down_within_region(region.x, region.y, region.width, region.height)
}

fn set_button(button: &mut InputButton, down: bool, time: f32) {
    if down {
        button.press(time, 1.0);
    } else {
        button.release();
    }
}

/// -1, +1 or None for a negative/positive key pair; the later press wins
/// when both are down.
fn axis_from_keys(input: &InputSystem, negative: KeyCode, positive: KeyCode) -> Option<f32> {
    let neg = input.keyboard().key(negative);
    let pos = input.keyboard().key(positive);
    match (neg.down_this_frame(), pos.down_this_frame()) {
        (false, false) => None,
        (true, false) => Some(-1.0),
        (false, true) => Some(1.0),
        (true, true) if neg.last_pressed_time() > pos.last_pressed_time() => Some(-1.0),
        (true, true) => Some(1.0),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::RawInputEvent;

    const DT: f32 = 1.0 / 60.0;

    //--- Test Helpers -----------------------------------------------------

    struct Rig {
        raw: InputSystem,
        game: InputGameInterface,
        time: f32,
    }

    impl Rig {
        fn new(config: InputConfig) -> Self {
            Self {
                raw: InputSystem::new(config.viewport_height),
                game: InputGameInterface::new(config),
                time: 0.0,
            }
        }

        /// One frame: age, apply events, refresh.
        fn frame(&mut self, events: &[RawInputEvent]) {
            self.time += DT;
            self.raw.update(self.time);
            self.game.update(self.time);
            for &event in events {
                self.raw.apply(event, self.time);
            }
            self.game.refresh(&mut self.raw, self.time);
        }
    }

    //=====================================================================
    // Buttons
    //=====================================================================

    #[test]
    fn jump_key_drives_jump_button() {
        let mut rig = Rig::new(InputConfig::default());
        rig.frame(&[RawInputEvent::KeyDown(KeyCode::Space)]);
        assert!(rig.game.jump().triggered());

        rig.frame(&[]);
        assert!(rig.game.jump().pressed());
        assert!(!rig.game.jump().triggered());

        rig.frame(&[RawInputEvent::KeyUp(KeyCode::Space)]);
        assert!(!rig.game.jump().pressed());
    }

    #[test]
    fn tapped_key_is_seen_for_one_frame() {
        let mut rig = Rig::new(InputConfig::default());
        rig.frame(&[
            RawInputEvent::KeyDown(KeyCode::KeyX),
            RawInputEvent::KeyUp(KeyCode::KeyX),
        ]);
        assert!(rig.game.attack().triggered());

        rig.frame(&[]);
        assert!(!rig.game.attack().pressed());
    }

    #[test]
    fn touch_regions_map_to_jump_and_attack() {
        let mut rig = Rig::new(InputConfig::default());
        // Screen y 300 → world y 20: bottom-left fly button.
        rig.frame(&[RawInputEvent::TouchDown { x: 20.0, y: 300.0 }]);
        assert!(rig.game.jump().pressed());
        assert!(!rig.game.attack().pressed());

        rig.frame(&[
            RawInputEvent::TouchUp { x: 20.0, y: 300.0 },
            RawInputEvent::TouchDown { x: 460.0, y: 300.0 },
        ]);
        rig.frame(&[]);
        assert!(!rig.game.jump().pressed());
        assert!(rig.game.attack().pressed());
    }

    #[test]
    fn click_key_also_attacks() {
        let mut rig = Rig::new(InputConfig::default());
        rig.frame(&[RawInputEvent::KeyDown(KeyCode::Enter)]);
        assert!(rig.game.attack().triggered());
    }

    //=====================================================================
    // Directional Pad
    //=====================================================================

    #[test]
    fn keys_give_constant_speed_and_release_per_axis() {
        let mut rig = Rig::new(InputConfig::default());
        rig.frame(&[
            RawInputEvent::KeyDown(KeyCode::ArrowRight),
            RawInputEvent::KeyDown(KeyCode::ArrowUp),
        ]);
        assert_eq!(rig.game.dpad().vector(), Vec2::new(0.25, 0.25));

        for _ in 0..30 {
            rig.frame(&[]);
        }
        assert_eq!(rig.game.dpad().vector(), Vec2::new(0.25, 0.25), "Held keys never time out");

        rig.frame(&[RawInputEvent::KeyUp(KeyCode::ArrowUp)]);
        assert_eq!(rig.game.dpad().vector(), Vec2::new(0.25, 0.0));
        assert!(rig.game.dpad().pressed());
    }

    #[test]
    fn later_opposite_key_wins() {
        let mut rig = Rig::new(InputConfig::default());
        rig.frame(&[RawInputEvent::KeyDown(KeyCode::ArrowRight)]);
        rig.frame(&[RawInputEvent::KeyDown(KeyCode::ArrowLeft)]);
        assert_eq!(rig.game.dpad().x(), -0.25);
    }

    #[test]
    fn trackball_roll_decays_after_timeout() {
        let mut rig = Rig::new(InputConfig::default());
        rig.frame(&[RawInputEvent::Roll { dx: 2.0, dy: 0.0 }]);
        assert!(rig.game.dpad().pressed());
        assert!((rig.game.dpad().x() - 0.5).abs() < 1e-6);

        rig.frame(&[]);
        assert!((rig.game.dpad().x() - 0.5).abs() < 1e-6, "Sample still inside the window");

        for _ in 0..3 {
            rig.frame(&[]);
        }
        assert!(rig.game.dpad().pressed(), "Timeout not reached yet");
        assert_eq!(rig.game.dpad().x(), 0.0, "Sample evicted by zero samples");

        for _ in 0..10 {
            rig.frame(&[]);
        }
        assert!(!rig.game.dpad().pressed(), "Pad lets go once rolls stop");
    }

    #[test]
    fn new_roll_gesture_reseeds_accumulator() {
        let config = InputConfig {
            roll_window: 16,
            ..InputConfig::default()
        };
        let mut rig = Rig::new(config);
        rig.frame(&[RawInputEvent::Roll { dx: -4.0, dy: 0.0 }]);
        for _ in 0..10 {
            rig.frame(&[]);
        }
        assert!(!rig.game.dpad().pressed());

        rig.frame(&[RawInputEvent::Roll { dx: 2.0, dy: 0.0 }]);
        assert!((rig.game.dpad().x() - 0.125).abs() < 1e-6, "No stale leftwards contribution");
    }

    #[test]
    fn orientation_mode_applies_dead_zone() {
        let config = InputConfig {
            movement_source: MovementSource::Orientation,
            ..InputConfig::default()
        };
        let mut rig = Rig::new(config);

        // pitch -3.6° → x 0.02 (zeroed); roll -7.2° → y 0.08 (reduced)
        rig.frame(&[RawInputEvent::Orientation {
            azimuth: 0.0,
            pitch: -3.6,
            roll: -7.2,
        }]);
        let v = rig.game.dpad().vector();
        assert_eq!(v.x, 0.0);
        assert!((v.y - 0.06).abs() < 1e-5);
    }

    //=====================================================================
    // Active Mask
    //=====================================================================

    #[test]
    fn inactive_interface_masks_all_signals() {
        let mut rig = Rig::new(InputConfig::default());
        rig.game.set_active(false);
        rig.frame(&[
            RawInputEvent::KeyDown(KeyCode::Space),
            RawInputEvent::KeyDown(KeyCode::ArrowLeft),
        ]);
        assert!(!rig.game.jump().pressed());
        assert!(!rig.game.dpad().pressed());

        rig.game.set_active(true);
        assert!(rig.game.jump().pressed());
        assert!(rig.game.dpad().pressed());
    }
}
