//=========================================================================
// Render Queue
//=========================================================================
//
// Per-frame draw list built from pooled elements.
//
// Architecture:
//   RenderComponent ── schedule() ── pool.acquire() → queue.push()
//   frame end ── flush(sink)
//        ├─ sort by priority (configured strategy)
//        ├─ sink.draw(&queue)
//        └─ pool.release() every element
//
// The pool and the queue share one capacity, so a scheduled element can
// always be queued and always returns to the pool.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::collections::{FixedSizeArray, ObjectPool, Poolable, SortStrategy};
use crate::core::error::SimResult;
use crate::core::math::Vec2;
use crate::core::systems::RenderSink;
use crate::core::world::ObjectId;

//=== Priorities ==========================================================

/// Draw order bands; lower draws first.
pub mod priority {
    pub const BACKGROUND_START: i32 = -100;
    pub const THE_SOURCE_START: i32 = -5;
    pub const FOREGROUND: i32 = 0;
    pub const EFFECT: i32 = 5;
    pub const GENERAL_OBJECT: i32 = 10;
    pub const GENERAL_ENEMY: i32 = 15;
    pub const NPC: i32 = 15;
    pub const PLAYER: i32 = 20;
    pub const FOREGROUND_EFFECT: i32 = 30;
    pub const PROJECTILE: i32 = 40;
    pub const FOREGROUND_OBJECT: i32 = 50;
    pub const OVERLAY: i32 = 70;
    pub const HUD: i32 = 100;
    pub const FADE: i32 = 200;
}

//=== RenderElement =======================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderElement {
    pub object: Option<ObjectId>,
    pub position: Vec2,
    pub priority: i32,
    pub glow: bool,
}

impl Poolable for RenderElement {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

//=== RenderQueue =========================================================

pub struct RenderQueue {
    pool: ObjectPool<RenderElement>,
    queue: FixedSizeArray<RenderElement>,
    sorter: SortStrategy,
}

impl RenderQueue {
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize, sorter: SortStrategy) -> Self {
        Self {
            pool: ObjectPool::with_default(capacity),
            queue: FixedSizeArray::named("render queue", capacity),
            sorter,
        }
    }

    /// Queues one element for this frame's draw list.
    pub fn schedule(
        &mut self,
        object: Option<ObjectId>,
        position: Vec2,
        priority: i32,
        glow: bool,
    ) -> SimResult<()> {
        let mut element = self.pool.acquire()?;
        element.object = object;
        element.position = position;
        element.priority = priority;
        element.glow = glow;
        self.queue.push(element)?;
        Ok(())
    }

    /// Sorts, hands the list to `sink` and recycles every element.
    ///
    /// Returns the number of elements drawn.
    pub fn flush(&mut self, sink: Option<&mut (dyn RenderSink + 'static)>) -> SimResult<usize> {
        self.queue
            .sort_by(&self.sorter, |a, b| a.priority.cmp(&b.priority));

        if let Some(sink) = sink {
            sink.draw(self.queue.as_slice());
        }

        let drawn = self.queue.len();
        for element in self.queue.drain() {
            self.pool.release(element)?;
        }
        Ok(drawn)
    }

    /// Drops the pending list without drawing.
    pub fn clear(&mut self) -> SimResult<()> {
        for element in self.queue.drain() {
            self.pool.release(element)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn elements(&self) -> &[RenderElement] {
        self.queue.as_slice()
    }

    pub fn available(&self) -> usize {
        self.pool.available()
    }
}

impl std::fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderQueue")
            .field("queued", &self.queue.len())
            .field("available", &self.pool.available())
            .field("sorter", &self.sorter)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
