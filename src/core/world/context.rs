//=========================================================================
// Frame Context
//=========================================================================
//
// Everything a component may touch during one frame, borrowed from the
// simulation for the duration of the pipeline step.
//
// Systems are passed in explicitly; there is no process-wide registry.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::manager::SpawnQueue;
use crate::core::flow::{EventRecorder, FlowEventQueue};
use crate::core::input::InputGameInterface;
use crate::core::message_bus::MessageBus;
use crate::core::render::RenderQueue;
use crate::core::systems::Systems;
use crate::core::time::TimeSystem;

//=== FrameContext ========================================================

pub struct FrameContext<'a> {
    pub time: &'a mut TimeSystem,
    pub input: &'a mut InputGameInterface,
    pub systems: &'a mut Systems,
    /// Objects created this frame; registered at the boundary.
    pub spawns: &'a mut SpawnQueue,
    pub messages: &'a mut MessageBus,
    pub render: &'a mut RenderQueue,
    pub flow: &'a FlowEventQueue,
    pub recorder: &'a EventRecorder,
}

impl FrameContext<'_> {
    /// Scaled, pausable clock.
    pub fn game_time(&self) -> f32 {
        self.time.game_time()
    }

    pub fn real_time(&self) -> f32 {
        self.time.real_time()
    }
}

//=========================================================================
// Test Support
//=========================================================================

/// Owns one of everything a [`FrameContext`] borrows.
#[cfg(test)]
pub(crate) struct ContextRig {
    pub time: TimeSystem,
    pub input: InputGameInterface,
    pub systems: Systems,
    pub spawns: SpawnQueue,
    pub messages: MessageBus,
    pub render: RenderQueue,
    pub flow: FlowEventQueue,
    pub recorder: EventRecorder,
}

#[cfg(test)]
impl ContextRig {
    pub fn new() -> Self {
        use crate::core::collections::SortStrategy;
        use crate::core::input::InputConfig;

        Self {
            time: TimeSystem::new(),
            input: InputGameInterface::new(InputConfig::default()),
            systems: Systems::new(),
            spawns: SpawnQueue::new(16),
            messages: MessageBus::new(),
            render: RenderQueue::new(16, SortStrategy::default()),
            flow: FlowEventQueue::new(),
            recorder: EventRecorder::new(),
        }
    }

    /// Advances the clock and ages the shaped input by one frame.
    pub fn advance(&mut self, dt: f32) {
        self.time.update(dt);
        self.input.update(self.time.game_time());
    }

    pub fn context(&mut self) -> FrameContext<'_> {
        FrameContext {
            time: &mut self.time,
            input: &mut self.input,
            systems: &mut self.systems,
            spawns: &mut self.spawns,
            messages: &mut self.messages,
            render: &mut self.render,
            flow: &self.flow,
            recorder: &self.recorder,
        }
    }
}
