//=========================================================================
// Basic Object Factory
//=========================================================================
//
// Minimal spawn recipes for the objects the player creates. Hosts with
// real art and level data install their own `ObjectFactory`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::object::{GameObject, ObjectId, ObjectState};
use crate::core::component::{
    LifetimeComponent, MovementComponent, RenderComponent, SimplePhysicsComponent,
};
use crate::core::error::CapacityError;
use crate::core::math::Vec2;
use crate::core::render::priority;
use crate::core::systems::ObjectFactory;

pub const GHOST_SIZE: Vec2 = Vec2::new(64.0, 64.0);
pub const DUST_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const DUST_LIFETIME: f32 = 0.5;

//=== BasicObjectFactory ==================================================

#[derive(Debug, Clone)]
pub struct BasicObjectFactory {
    /// Handed to ghosts; the owner waits this long before its next ghost.
    pub ghost_reactivation_delay: f32,
}

impl Default for BasicObjectFactory {
    fn default() -> Self {
        Self {
            ghost_reactivation_delay: 0.3,
        }
    }
}

impl BasicObjectFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_ghost(&self, position: Vec2, owner: ObjectId, lifetime: f32) -> Result<GameObject, CapacityError> {
        let mut state = ObjectState::new(position, GHOST_SIZE.x, GHOST_SIZE.y);
        state.priority = priority::PLAYER;

        GameObject::new(state)
            .with_component(LifetimeComponent::ghost(lifetime, owner, self.ghost_reactivation_delay))?
            .with_component(SimplePhysicsComponent::new())?
            .with_component(MovementComponent::new())?
            .with_component(RenderComponent::new())
    }

    fn build_dust(&self, position: Vec2, flip: bool) -> Result<GameObject, CapacityError> {
        let mut state = ObjectState::new(position, DUST_SIZE.x, DUST_SIZE.y);
        state.priority = priority::EFFECT;

        let mut render = RenderComponent::new();
        if flip {
            render.offset.x = DUST_SIZE.x;
        }

        GameObject::new(state)
            .with_component(LifetimeComponent::new(DUST_LIFETIME))?
            .with_component(render)
    }
}

impl ObjectFactory for BasicObjectFactory {
    fn spawn_player_ghost(&mut self, position: Vec2, owner: ObjectId, lifetime: f32) -> Option<GameObject> {
        self.build_ghost(position, owner, lifetime)
            .map_err(|err| warn!("Ghost not built: {}", err))
            .ok()
    }

    fn spawn_dust(&mut self, position: Vec2, flip: bool) -> Option<GameObject> {
        self.build_dust(position, flip)
            .map_err(|err| warn!("Dust not built: {}", err))
            .ok()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
