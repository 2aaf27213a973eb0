//=========================================================================
// Lifetime Component
//=========================================================================
//
// Removes its object after a fixed time. A ghost's lifetime also tells
// the owner that control is coming back.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ComponentPhase, GameComponent};
use crate::core::error::SimResult;
use crate::core::world::{FrameContext, ObjectId, ObjectState};

//=== GhostExpired ========================================================

/// Posted when a ghost ends; delivered to everyone next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostExpired {
    pub owner: ObjectId,
    /// Seconds before the owner may spawn another ghost.
    pub reactivation_delay: f32,
}

//=== LifetimeComponent ===================================================

#[derive(Debug, Clone)]
pub struct LifetimeComponent {
    /// Zero means no time limit.
    duration: f32,
    elapsed: f32,
    owner: Option<ObjectId>,
    reactivation_delay: f32,
    end_on_attack: bool,
    expired: bool,
}

impl LifetimeComponent {
    /// Expires after `duration` seconds; zero never expires on its own.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            owner: None,
            reactivation_delay: 0.0,
            end_on_attack: false,
            expired: false,
        }
    }

    /// Lifetime of a ghost controlled by `owner`. A fresh attack press ends
    /// the ghost early.
    pub fn ghost(duration: f32, owner: ObjectId, reactivation_delay: f32) -> Self {
        Self {
            owner: Some(owner),
            reactivation_delay,
            end_on_attack: true,
            ..Self::new(duration)
        }
    }

    pub fn remaining(&self) -> Option<f32> {
        (self.duration > 0.0).then(|| (self.duration - self.elapsed).max(0.0))
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    fn expire(&mut self, state: &mut ObjectState, ctx: &mut FrameContext<'_>) {
        self.expired = true;
        state.marked_for_removal = true;
        if let Some(owner) = self.owner {
            debug!("Ghost {} expired, returning control to {}", state.id, owner);
            ctx.messages.post(GhostExpired {
                owner,
                reactivation_delay: self.reactivation_delay,
            });
        }
    }
}

impl GameComponent for LifetimeComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::Think
    }

    fn update(&mut self, dt: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        if self.expired {
            return Ok(());
        }

        self.elapsed += dt;
        let timed_out = self.duration > 0.0 && self.elapsed >= self.duration;
        let cancelled = self.end_on_attack && ctx.input.attack().triggered();
        if timed_out || cancelled {
            self.expire(state, ctx);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.expired = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::world::context::ContextRig;

    fn step(lifetime: &mut LifetimeComponent, state: &mut ObjectState, rig: &mut ContextRig, dt: f32) {
        rig.advance(dt);
        lifetime.update(dt, state, &mut rig.context()).unwrap();
    }

    #[test]
    fn expires_after_duration() {
        let mut rig = ContextRig::new();
        let mut state = ObjectState::default();
        let mut lifetime = LifetimeComponent::new(0.5);

        step(&mut lifetime, &mut state, &mut rig, 0.25);
        assert!(!state.marked_for_removal);
        assert_eq!(lifetime.remaining(), Some(0.25));

        step(&mut lifetime, &mut state, &mut rig, 0.25);
        assert!(state.marked_for_removal);
        assert!(lifetime.is_expired());
    }

    #[test]
    fn zero_duration_never_expires() {
        let mut rig = ContextRig::new();
        let mut state = ObjectState::default();
        let mut lifetime = LifetimeComponent::new(0.0);

        for _ in 0..100 {
            step(&mut lifetime, &mut state, &mut rig, 1.0);
        }
        assert!(!state.marked_for_removal);
        assert_eq!(lifetime.remaining(), None);
    }

    #[test]
    fn ghost_expiry_notifies_owner_next_frame() {
        let mut rig = ContextRig::new();
        let mut state = ObjectState::default();
        let mut lifetime = LifetimeComponent::ghost(1.0, ObjectId(3), 0.3);

        step(&mut lifetime, &mut state, &mut rig, 1.0);
        assert!(rig.messages.read::<GhostExpired>().is_empty());

        rig.messages.swap();
        assert_eq!(
            rig.messages.read::<GhostExpired>(),
            &[GhostExpired {
                owner: ObjectId(3),
                reactivation_delay: 0.3,
            }]
        );

        // Already expired: no second notice.
        step(&mut lifetime, &mut state, &mut rig, 1.0);
        rig.messages.swap();
        assert!(rig.messages.read::<GhostExpired>().is_empty());
    }

    #[test]
    fn attack_press_ends_a_ghost() {
        let mut rig = ContextRig::new();
        let mut state = ObjectState::default();
        let mut lifetime = LifetimeComponent::ghost(0.0, ObjectId(1), 0.3);

        step(&mut lifetime, &mut state, &mut rig, 0.1);
        assert!(!state.marked_for_removal);

        rig.advance(0.1);
        rig.input.attack_mut().press(rig.time.game_time(), 1.0);
        lifetime.update(0.1, &mut state, &mut rig.context()).unwrap();
        assert!(state.marked_for_removal);
    }
}
