//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use platformer_core::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Host facade
pub use crate::engine::{Simulation, SimulationBuilder};
pub use crate::core::error::{SimResult, SimulationError};

// Objects and components
pub use crate::core::component::{
    ComponentPhase, ComponentSwap, GameComponent, GlowSwap, PlayerComponent, PlayerState,
    PlayerTuning,
};
pub use crate::core::world::{FrameContext, GameObject, ObjectId, ObjectState};

// Input
pub use crate::core::input::{InputConfig, InputSender, KeyCode, RawInputEvent};

// Collaborators
pub use crate::core::systems::{
    CameraSystem, HotSpotSystem, HotSpotType, HudSystem, ObjectFactory, RenderSink, Systems,
    VibrationSystem,
};

// Flow and messaging
pub use crate::core::flow::{EventRecorder, FlowEventHandler, GameFlowEvent};
pub use crate::core::message_bus::MessageBus;
pub use crate::core::math::Vec2;
