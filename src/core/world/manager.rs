//=========================================================================
// Game Object Manager
//=========================================================================
//
// Owns the active object set and applies structural changes at frame
// boundaries only.
//
// Architecture:
//   frame:     update() ── every object, registration order
//                 └─ components may enqueue spawns / flag removals
//   boundary:  commit(spawns)
//                 ├─ drop objects flagged for removal
//                 └─ register queued spawns
//
// Objects never join or leave the set while it is being iterated.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::context::FrameContext;
use super::object::{GameObject, ObjectId};
use crate::core::collections::FixedSizeArray;
use crate::core::component::GameComponent;
use crate::core::error::SimResult;

//=== SpawnQueue ==========================================================

/// Objects created during a frame, waiting for the boundary.
///
/// Ids are handed out at enqueue time so the spawner can refer to the
/// object (camera target, ownership) before it is registered.
#[derive(Debug)]
pub struct SpawnQueue {
    pending: FixedSizeArray<GameObject>,
    next_id: u32,
}

impl SpawnQueue {
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: FixedSizeArray::named("spawn queue", capacity),
            next_id: 1,
        }
    }

    /// Queues `object` and returns the id it will be registered under.
    pub fn enqueue(&mut self, mut object: GameObject) -> SimResult<ObjectId> {
        let id = ObjectId(self.next_id);
        object.state.id = id;
        self.pending.push(object)?;
        self.next_id += 1;
        trace!("Queued spawn {}", id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops pending spawns. Ids already handed out stay consumed.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn drain(&mut self) -> std::vec::Drain<'_, GameObject> {
        self.pending.drain()
    }
}

//=== GameObjectManager ===================================================

#[derive(Debug)]
pub struct GameObjectManager {
    objects: FixedSizeArray<GameObject>,
}

impl GameObjectManager {
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        Self {
            objects: FixedSizeArray::named("object manager", capacity),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Steps every registered object.
    pub fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        for object in self.objects.iter_mut() {
            object.update(dt, ctx)?;
        }
        Ok(())
    }

    /// Applies removals and registers queued spawns.
    ///
    /// Returns the number of objects registered.
    pub fn commit(&mut self, spawns: &mut SpawnQueue) -> SimResult<usize> {
        let before = self.objects.len();
        self.objects.retain(|object| !object.state.marked_for_removal);
        let removed = before - self.objects.len();
        if removed > 0 {
            debug!("Removed {} object(s)", removed);
        }

        let mut added = 0;
        for object in spawns.drain() {
            trace!("Registered object {}", object.id());
            self.objects.push(object)?;
            added += 1;
        }
        Ok(added)
    }

    /// Drops every object.
    pub fn reset(&mut self) {
        debug!("Clearing {} object(s)", self.objects.len());
        self.objects.clear();
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|object| object.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.id() == id)
    }

    /// First object carrying a component of type `T`.
    pub fn find_with_component_mut<T: GameComponent>(&mut self) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.has_component::<T>())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.objects.capacity()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
