//=========================================================================
// Time System
//=========================================================================
//
// Game clock (scaled, freezable) and real clock, advanced once per frame.
//
// Architecture:
//   update(dt) ── real_time += dt
//        ├─ frozen? ── game delta = 0, count down the freeze
//        └─ scale active? ── game delta = dt * eased scale
//
// Scale effects ease in and out over EASE_DURATION when requested; the
// effect runs on real time so slow motion cannot prolong itself.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::ease;

//=== Constants ===========================================================

/// Ramp length of an eased time-scale effect, in real seconds.
pub const EASE_DURATION: f32 = 0.5;

//=== TimeScale ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct TimeScale {
    target: f32,
    duration: f32,
    start: f32,
    ease: bool,
}

impl TimeScale {
    /// Scale factor `elapsed` real seconds into the effect.
    fn factor_at(&self, elapsed: f32) -> f32 {
        if !self.ease {
            return self.target;
        }
        if elapsed <= EASE_DURATION {
            ease(1.0, self.target, EASE_DURATION, elapsed)
        } else if self.duration - elapsed < EASE_DURATION {
            let ease_out = EASE_DURATION - (self.duration - elapsed);
            ease(self.target, 1.0, EASE_DURATION, ease_out)
        } else {
            self.target
        }
    }
}

//=== TimeSystem ==========================================================

/// Frame clock shared by every component through the frame context.
#[derive(Debug, Clone, Default)]
pub struct TimeSystem {
    game_time: f32,
    real_time: f32,
    game_frame_delta: f32,
    real_frame_delta: f32,
    freeze_remaining: f32,
    scale: Option<TimeScale>,
}

impl TimeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Advance ----------------------------------------------------

    /// Advances both clocks by `dt` real seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.real_time += dt;
        self.real_frame_delta = dt;

        if self.freeze_remaining > 0.0 {
            self.freeze_remaining -= dt;
            self.game_frame_delta = 0.0;
            return;
        }

        let mut factor = 1.0;
        if let Some(scale) = self.scale {
            let elapsed = self.real_time - scale.start;
            if elapsed > scale.duration {
                self.scale = None;
            } else {
                factor = scale.factor_at(elapsed);
            }
        }

        self.game_frame_delta = dt * factor;
        self.game_time += self.game_frame_delta;
    }

    //--- Effects ----------------------------------------------------------

    /// Stops game time for `seconds` of real time.
    pub fn freeze(&mut self, seconds: f32) {
        self.freeze_remaining = seconds;
    }

    /// Scales game time by `factor` for `duration` real seconds.
    ///
    /// A scale applied while another is running replaces its parameters but
    /// keeps the original start time.
    pub fn apply_scale(&mut self, factor: f32, duration: f32, ease: bool) {
        let start = self.scale.map_or(self.real_time, |s| s.start);
        self.scale = Some(TimeScale {
            target: factor,
            duration,
            start,
            ease,
        });
    }

    /// Zeroes both clocks and cancels effects.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    //--- Queries ----------------------------------------------------------

    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    pub fn real_time(&self) -> f32 {
        self.real_time
    }

    /// Scaled delta of the last frame (0 while frozen).
    pub fn frame_delta(&self) -> f32 {
        self.game_frame_delta
    }

    pub fn real_frame_delta(&self) -> f32 {
        self.real_frame_delta
    }

    pub fn is_scaled(&self) -> bool {
        self.scale.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
