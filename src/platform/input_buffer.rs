//=========================================================================
// Input Buffer
//
// Collects raw events between two flushes of the platform bridge, split
// into discrete and continuous samples.
//
// Responsibilities:
// - Keep discrete events (keys, touch down/up) in arrival order
// - Drop consecutive duplicates (key auto-repeat)
// - Coalesce continuous samples (touch drags, orientation) to the latest
//
// Notes:
// A lift drops any pending drag so the drained batch never re-presses a
// pointer that was already released.
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use crate::core::input::event::RawInputEvent;

//=== InputBuffer Struct ==================================================

#[derive(Debug)]
pub struct InputBuffer {
    discrete: Vec<RawInputEvent>,
    continuous: HashSet<RawInputEvent>,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Routes by `RawInputEvent::is_continuous`.
    pub fn push(&mut self, event: RawInputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    /// The latest sample replaces any earlier one of the same kind.
    pub fn push_continuous(&mut self, event: RawInputEvent) {
        self.continuous.replace(event);
    }

    pub fn push_discrete(&mut self, event: RawInputEvent) {
        if let RawInputEvent::TouchUp { .. } = event {
            self.continuous.remove(&RawInputEvent::TouchMove { x: 0.0, y: 0.0 });
        }
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Discrete events first, then the coalesced continuous samples.
    pub fn drain(&mut self) -> Vec<RawInputEvent> {
        let mut events = std::mem::take(&mut self.discrete);
        events.extend(self.continuous.drain());
        events
    }

    //--- Utilities --------------------------------------------------------
    pub fn clear(&mut self) {
        self.discrete.clear();
        self.continuous.clear();
    }

    pub fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
