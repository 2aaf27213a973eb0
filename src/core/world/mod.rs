//=========================================================================
// World
//=========================================================================
//
// Game objects, their manager and the per-frame context components see.
//
// Architecture:
//   GameObjectManager
//     └─ FixedSizeArray<GameObject>
//          ├─ ObjectState
//          └─ ComponentPipeline
//   SpawnQueue ── objects created mid-frame, registered at the boundary
//   FrameContext ── borrowed systems for one pipeline step
//
//=========================================================================

//=== Module Declarations =================================================

pub mod context;
pub mod factory;
pub mod manager;
pub mod object;

//=== Public API ==========================================================

pub use context::FrameContext;
pub use factory::BasicObjectFactory;
pub use manager::{GameObjectManager, SpawnQueue};
pub use object::{ActionType, GameObject, HitReaction, HitType, Inventory, ObjectId, ObjectState};
