//=========================================================================
// Component Pipeline
//=========================================================================
//
// Phase-ordered behavior units attached to a game object.
//
// Architecture:
//   GameObject
//     ├─ state: ObjectState
//     └─ components: ComponentPipeline
//          [Think.. | Physics.. | PostPhysics.. | Movement.. | ... | FrameEnd..]
//
// Components are kept sorted by phase at insertion time, insertion order
// within a phase. A frame is then a single front-to-back walk: everything
// a unit writes is visible to later units, never to earlier ones.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod camera_bias;
pub mod lifetime;
pub mod physics;
pub mod player;
pub mod render;

pub use camera_bias::CameraBiasComponent;
pub use lifetime::{GhostExpired, LifetimeComponent};
pub use physics::{GravityComponent, GroundPlaneComponent, MovementComponent, SimplePhysicsComponent};
pub use player::{PlayerComponent, PlayerState, PlayerTuning};
pub use render::RenderComponent;

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::collections::FixedSizeArray;
use crate::core::error::{CapacityError, SimResult};
use crate::core::world::{FrameContext, ObjectState};

/// Components per object.
pub const DEFAULT_PIPELINE_CAPACITY: usize = 16;

//=== ComponentPhase ======================================================

/// Pipeline stage, run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentPhase {
    /// Decisions: input, AI, state machines.
    Think,
    Physics,
    PostPhysics,
    Movement,
    CollisionDetection,
    CollisionResponse,
    PostCollision,
    Animation,
    PreDraw,
    Draw,
    FrameEnd,
}

impl ComponentPhase {
    pub const ALL: [ComponentPhase; 11] = [
        Self::Think,
        Self::Physics,
        Self::PostPhysics,
        Self::Movement,
        Self::CollisionDetection,
        Self::CollisionResponse,
        Self::PostCollision,
        Self::Animation,
        Self::PreDraw,
        Self::Draw,
        Self::FrameEnd,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }
}

//=== GameComponent =======================================================

/// Downcast support for boxed components.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One behavior unit of a game object.
pub trait GameComponent: AsAny {
    fn phase(&self) -> ComponentPhase;

    /// Steps the unit once. `dt` is the scaled game frame delta.
    fn update(&mut self, dt: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>)
        -> SimResult<()>;

    /// Back to the freshly constructed state.
    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

//=== ComponentPipeline ===================================================

pub struct ComponentPipeline {
    components: FixedSizeArray<Box<dyn GameComponent>>,
}

impl Default for ComponentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentPipeline {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PIPELINE_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: FixedSizeArray::named("component pipeline", capacity),
        }
    }

    /// Inserts after every component of the same or an earlier phase.
    pub fn add(&mut self, component: Box<dyn GameComponent>) -> Result<(), CapacityError> {
        let phase = component.phase();
        let index = self
            .components
            .iter()
            .position(|existing| existing.phase() > phase)
            .unwrap_or(self.components.len());
        self.components.insert(index, component)
    }

    /// Runs every component in phase order.
    pub fn update(
        &mut self,
        dt: f32,
        state: &mut ObjectState,
        ctx: &mut FrameContext<'_>,
    ) -> SimResult<()> {
        for component in self.components.iter_mut() {
            component.update(dt, state, ctx)?;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        for component in self.components.iter_mut() {
            component.reset();
        }
    }

    pub fn find<T: GameComponent>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|component| (**component).as_any().downcast_ref::<T>())
    }

    pub fn find_mut<T: GameComponent>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|component| (**component).as_any_mut().downcast_mut::<T>())
    }

    pub fn contains<T: GameComponent>(&self) -> bool {
        self.find::<T>().is_some()
    }

    /// Phases in execution order.
    pub fn phases(&self) -> impl Iterator<Item = ComponentPhase> + '_ {
        self.components.iter().map(|component| component.phase())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for ComponentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.components.iter().map(|c| (c.phase(), c.name())))
            .finish()
    }
}

//=== Component Swaps =====================================================

/// Toggles an alternate look or behavior set on an object.
pub trait ComponentSwap {
    /// Flips between the normal and the alternate set.
    fn activate(&mut self, state: &mut ObjectState);

    fn is_active(&self) -> bool;

    /// Forgets the toggle without touching any object.
    fn reset(&mut self) {}
}

/// Invincibility look: toggles the object's glow.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlowSwap {
    active: bool,
}

impl GlowSwap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComponentSwap for GlowSwap {
    fn activate(&mut self, state: &mut ObjectState) {
        self.active = !self.active;
        state.glow = self.active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn reset(&mut self) {
        self.active = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
