//=========================================================================
// Message Bus
//=========================================================================
//
// Typed, double-buffered message queues between game objects.
//
// Architecture:
//   frame N:   post<M>() ──> pending[TypeId] (Vec<M>)
//   boundary:  swap() ── readable.clear(); readable <-> pending
//   frame N+1: read<M>() <── readable[TypeId] (shared, N consumers)
//
// Posting never disturbs what is being read this frame, so the order in
// which objects update cannot change who sees a message.
//
//=========================================================================

//=== Submodules ==========================================================

mod queue;

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use queue::ErasedQueue;

//=== Message =============================================================

/// Marker for types that can travel on the bus.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

#[derive(Default)]
pub struct MessageBus {
    readable: HashMap<TypeId, Box<dyn ErasedQueue>>,
    pending: HashMap<TypeId, Box<dyn ErasedQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Message Operations -----------------------------------------------

    /// Queues `msg` for delivery after the next [`swap`](Self::swap).
    pub fn post<M: Message>(&mut self, msg: M) {
        let queue = self
            .pending
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        if let Some(queue) = queue.as_any_mut().downcast_mut::<Vec<M>>() {
            queue.push(msg);
        }
    }

    /// Messages of type `M` delivered this frame.
    pub fn read<M: Message>(&self) -> &[M] {
        self.readable
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Frame boundary: drops this frame's messages and delivers the pending ones.
    pub fn swap(&mut self) {
        for queue in self.readable.values_mut() {
            queue.clear_queue();
        }
        std::mem::swap(&mut self.readable, &mut self.pending);
    }

    /// Drops every message, delivered or pending, keeping allocations.
    pub fn clear_all(&mut self) {
        for queue in self.readable.values_mut().chain(self.pending.values_mut()) {
            queue.clear_queue();
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn count<M: Message>(&self) -> usize {
        self.read::<M>().len()
    }

    pub fn pending_count<M: Message>(&self) -> usize {
        self.pending
            .get(&TypeId::of::<M>())
            .map(|q| q.len())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let readable: usize = self.readable.values().map(|q| q.len()).sum();
        let pending: usize = self.pending.values().map(|q| q.len()).sum();
        f.debug_struct("MessageBus")
            .field("readable", &readable)
            .field("pending", &pending)
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
