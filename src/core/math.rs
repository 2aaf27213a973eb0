//=========================================================================
// Math
//=========================================================================
//
// World vector type and easing helpers shared by the world and input.
//
//=========================================================================

//=== External Dependencies ===============================================

/// 2D vector in world units (y grows upward).
pub use glam::Vec2;

//=== Easing ==============================================================

/// Cubic ease-in/ease-out from `start` to `target` over `duration`.
///
/// Returns `target` once `elapsed >= duration`.
pub fn ease(start: f32, target: f32, duration: f32, elapsed: f32) -> f32 {
    if elapsed >= duration || duration <= 0.0 {
        return target;
    }
    let delta = target - start;
    let mut t = elapsed / (duration / 2.0);
    if t < 1.0 {
        return delta / 2.0 * t * t * t + start;
    }
    t -= 2.0;
    delta / 2.0 * (t * t * t + 2.0) + start
}

//=========================================================================
// Unit Tests
//=========================================================================
