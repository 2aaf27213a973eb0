//=========================================================================
// Physics Components
//=========================================================================
//
// Impulse/velocity integration with a flat floor. No general collision.
//
//   Physics            gravity → impulse
//   PostPhysics        impulse → velocity, impulse cleared
//   Movement           velocity → position (unless locked)
//   CollisionResponse  floor contact → touching_ground
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ComponentPhase, GameComponent};
use crate::core::error::SimResult;
use crate::core::math::Vec2;
use crate::core::world::{FrameContext, ObjectState};

pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -400.0);

//=== GravityComponent ====================================================

#[derive(Debug, Clone, Copy)]
pub struct GravityComponent {
    pub gravity: Vec2,
}

impl Default for GravityComponent {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl GravityComponent {
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

impl GameComponent for GravityComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::Physics
    }

    fn update(&mut self, dt: f32, state: &mut ObjectState, _ctx: &mut FrameContext<'_>) -> SimResult<()> {
        state.impulse += self.gravity * dt;
        Ok(())
    }
}

//=== SimplePhysicsComponent ==============================================

#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePhysicsComponent;

impl SimplePhysicsComponent {
    pub fn new() -> Self {
        Self
    }
}

impl GameComponent for SimplePhysicsComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::PostPhysics
    }

    fn update(&mut self, _dt: f32, state: &mut ObjectState, _ctx: &mut FrameContext<'_>) -> SimResult<()> {
        state.velocity += state.impulse;
        state.impulse = Vec2::ZERO;
        Ok(())
    }
}

//=== MovementComponent ===================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct MovementComponent;

impl MovementComponent {
    pub fn new() -> Self {
        Self
    }
}

impl GameComponent for MovementComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::Movement
    }

    fn update(&mut self, dt: f32, state: &mut ObjectState, _ctx: &mut FrameContext<'_>) -> SimResult<()> {
        if !state.position_locked {
            state.position += state.velocity * dt;
        }
        Ok(())
    }
}

//=== GroundPlaneComponent ================================================

/// Flat floor at `height`. Anything at or below it is pushed back up and
/// loses its downward velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundPlaneComponent {
    pub height: f32,
}

impl GroundPlaneComponent {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl GameComponent for GroundPlaneComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::CollisionResponse
    }

    fn update(&mut self, _dt: f32, state: &mut ObjectState, _ctx: &mut FrameContext<'_>) -> SimResult<()> {
        state.touching_ground = state.position.y <= self.height;
        if state.touching_ground {
            state.position.y = self.height;
            if state.velocity.y < 0.0 {
                state.velocity.y = 0.0;
            }
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
