//=========================================================================
// Game Object
//=========================================================================
//
// Per-object state plus the component pipeline that drives it.
//
// Components receive `&mut ObjectState` while the pipeline itself is
// borrowed separately, so a component never aliases its own container.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::context::FrameContext;
use crate::core::component::{ComponentPipeline, GameComponent};
use crate::core::error::{CapacityError, SimResult};
use crate::core::math::Vec2;
use crate::core::render::priority;

//=== ObjectId ============================================================

/// Stable handle to a registered object. Ids are never reused within a
/// simulation's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Actions and Hits ====================================================

/// Animation-level action the object is performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionType {
    #[default]
    Invalid,
    Idle,
    Move,
    Attack,
    HitReact,
    Death,
    Hide,
    Frozen,
}

/// Kind of the last hit the object received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitType {
    #[default]
    Invalid,
    Hit,
    Death,
    Collect,
    /// Throws the object; the victim freezes instead of reacting.
    Launch,
}

//=== Cooperating Records =================================================

/// Collectible counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inventory {
    pub coin_count: u32,
    pub ruby_count: u32,
    /// Set whenever gameplay rewrites the counters; the HUD clears it.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitReaction {
    /// Ignore incoming damage while set.
    pub force_invincible: bool,
}

//=== ObjectState =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectState {
    pub id: ObjectId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub target_velocity: Vec2,
    /// Accumulated this frame, folded into velocity by physics.
    pub impulse: Vec2,
    pub width: f32,
    pub height: f32,
    pub life: i32,
    pub action: ActionType,
    pub last_hit_type: HitType,
    pub touching_ground: bool,
    pub position_locked: bool,
    pub inventory: Option<Inventory>,
    pub hit_reaction: Option<HitReaction>,
    pub glow: bool,
    pub priority: i32,
    pub marked_for_removal: bool,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            id: ObjectId::default(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target_velocity: Vec2::ZERO,
            impulse: Vec2::ZERO,
            width: 0.0,
            height: 0.0,
            life: 1,
            action: ActionType::Invalid,
            last_hit_type: HitType::Invalid,
            touching_ground: false,
            position_locked: false,
            inventory: None,
            hit_reaction: None,
            glow: false,
            priority: priority::GENERAL_OBJECT,
            marked_for_removal: false,
        }
    }
}

impl ObjectState {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn centered_position_x(&self) -> f32 {
        self.position.x + self.width / 2.0
    }

    pub fn centered_position_y(&self) -> f32 {
        self.position.y + self.height / 2.0
    }

    /// Below the bottom of the world by at least one body height.
    pub fn fell_off_world(&self) -> bool {
        self.position.y < -self.height
    }
}

//=== GameObject ==========================================================

#[derive(Debug)]
pub struct GameObject {
    pub state: ObjectState,
    components: ComponentPipeline,
}

impl GameObject {
    pub fn new(state: ObjectState) -> Self {
        Self {
            state,
            components: ComponentPipeline::new(),
        }
    }

    /// Adds a component in its phase slot.
    pub fn add_component<C: GameComponent>(&mut self, component: C) -> Result<(), CapacityError> {
        self.components.add(Box::new(component))
    }

    /// Builder-style [`add_component`](Self::add_component).
    pub fn with_component<C: GameComponent>(mut self, component: C) -> Result<Self, CapacityError> {
        self.add_component(component)?;
        Ok(self)
    }

    /// Runs every component, phase by phase.
    pub fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        self.components.update(dt, &mut self.state, ctx)
    }

    /// Resets the state and every component.
    pub fn reset(&mut self) {
        let id = self.state.id;
        self.state = ObjectState {
            id,
            ..ObjectState::default()
        };
        self.components.reset();
    }

    pub fn component_mut<T: GameComponent>(&mut self) -> Option<&mut T> {
        self.components.find_mut::<T>()
    }

    pub fn has_component<T: GameComponent>(&self) -> bool {
        self.components.contains::<T>()
    }

    pub fn components(&self) -> &ComponentPipeline {
        &self.components
    }

    /// The state together with one typed component.
    pub fn split_mut<T: GameComponent>(&mut self) -> (&mut ObjectState, Option<&mut T>) {
        (&mut self.state, self.components.find_mut::<T>())
    }

    pub fn id(&self) -> ObjectId {
        self.state.id
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_alive_and_unplaced() {
        let state = ObjectState::default();
        assert_eq!(state.life, 1);
        assert_eq!(state.action, ActionType::Invalid);
        assert_eq!(state.last_hit_type, HitType::Invalid);
        assert!(state.inventory.is_none());
        assert!(!state.marked_for_removal);
    }

    #[test]
    fn centered_position_and_fall_check() {
        let mut state = ObjectState::new(Vec2::new(10.0, 0.0), 64.0, 32.0);
        assert_eq!(state.centered_position_x(), 42.0);
        assert_eq!(state.centered_position_y(), 16.0);
        assert!(!state.fell_off_world());

        state.position.y = -32.5;
        assert!(state.fell_off_world());
    }

    #[test]
    fn reset_keeps_identity() {
        let mut object = GameObject::new(ObjectState::new(Vec2::new(5.0, 5.0), 1.0, 1.0));
        object.state.id = ObjectId(9);
        object.state.life = 0;

        object.reset();

        assert_eq!(object.id(), ObjectId(9));
        assert_eq!(object.state.life, 1);
        assert_eq!(object.state.position, Vec2::ZERO);
    }

    #[test]
    fn id_display() {
        assert_eq!(ObjectId(12).to_string(), "#12");
    }
}
