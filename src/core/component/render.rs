//=========================================================================
// Render Component
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ComponentPhase, GameComponent};
use crate::core::error::SimResult;
use crate::core::math::Vec2;
use crate::core::world::{FrameContext, ObjectState};

//=== RenderComponent =====================================================

/// Schedules the object's draw element each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderComponent {
    /// Added to the object position.
    pub offset: Vec2,
    /// Overrides the object's priority when set.
    pub priority: Option<i32>,
}

impl RenderComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priority(priority: i32) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }
}

impl GameComponent for RenderComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::Draw
    }

    fn update(&mut self, _dt: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        ctx.render.schedule(
            Some(state.id),
            state.position + self.offset,
            self.priority.unwrap_or(state.priority),
            state.glow,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
