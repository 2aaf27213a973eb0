//=========================================================================
// Game Flow Events
//=========================================================================
//
// Level-level requests the simulation hands to its host.
//
// Architecture:
//   FlowEventQueue::post() ──channel──> host drain(handler) (next tick)
//   FlowEventQueue::post_immediate(handler) ── handled now
//
// The queue end lives with the simulation; the host owns the handler.
// Posting is legal from any thread holding a sender clone.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod recorder;

pub use recorder::EventRecorder;

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info};

//=== GameFlowEvent =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameFlowEvent {
    RestartLevel,
    EndGame,
    GoToNextLevel,
    ShowDiary,
    ShowDialogCharacter1,
    ShowDialogCharacter2,
    ShowAnimation,
}

impl GameFlowEvent {
    /// Stable numeric code for hosts that persist or forward events.
    pub const fn code(self) -> i32 {
        match self {
            Self::RestartLevel => 0,
            Self::EndGame => 1,
            Self::GoToNextLevel => 2,
            Self::ShowDiary => 3,
            Self::ShowDialogCharacter1 => 4,
            Self::ShowDialogCharacter2 => 5,
            Self::ShowAnimation => 6,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::RestartLevel),
            1 => Some(Self::EndGame),
            2 => Some(Self::GoToNextLevel),
            3 => Some(Self::ShowDiary),
            4 => Some(Self::ShowDialogCharacter1),
            5 => Some(Self::ShowDialogCharacter2),
            6 => Some(Self::ShowAnimation),
            _ => None,
        }
    }
}

/// Event plus its data index (dialog or animation number).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRequest {
    pub event: GameFlowEvent,
    pub index: i32,
}

//=== FlowEventHandler ====================================================

/// Host side of flow events.
pub trait FlowEventHandler {
    fn on_game_flow_event(&mut self, event: GameFlowEvent, index: i32);
}

impl<F: FnMut(GameFlowEvent, i32)> FlowEventHandler for F {
    fn on_game_flow_event(&mut self, event: GameFlowEvent, index: i32) {
        self(event, index)
    }
}

//=== FlowEventQueue ======================================================

#[derive(Debug, Clone)]
pub struct FlowEventQueue {
    sender: Sender<FlowRequest>,
    receiver: Receiver<FlowRequest>,
}

impl Default for FlowEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowEventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Schedules `event` for the host's next drain.
    pub fn post(&self, event: GameFlowEvent, index: i32) {
        info!("Post game flow event {:?} ({})", event, index);
        // Cannot disconnect: the queue owns its receiver.
        let _ = self.sender.send(FlowRequest { event, index });
    }

    /// Runs `event` on `handler` right away.
    pub fn post_immediate<H: FlowEventHandler + ?Sized>(
        &self,
        event: GameFlowEvent,
        index: i32,
        handler: &mut H,
    ) {
        info!("Execute immediate game flow event {:?} ({})", event, index);
        handler.on_game_flow_event(event, index);
    }

    /// Executes every queued event in posting order.
    pub fn drain<H: FlowEventHandler + ?Sized>(&self, handler: &mut H) -> usize {
        let mut executed = 0;
        while let Ok(request) = self.receiver.try_recv() {
            debug!("Execute game flow event {:?} ({})", request.event, request.index);
            handler.on_game_flow_event(request.event, request.index);
            executed += 1;
        }
        executed
    }

    /// Producer handle for other threads.
    pub fn sender(&self) -> Sender<FlowRequest> {
        self.sender.clone()
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    pub fn clear(&self) {
        while self.receiver.try_recv().is_ok() {}
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 0..7 {
            let event = GameFlowEvent::from_code(code).unwrap();
            assert_eq!(event.code(), code);
        }
        assert_eq!(GameFlowEvent::from_code(-1), None);
        assert_eq!(GameFlowEvent::from_code(7), None);
    }

    #[test]
    fn posted_events_wait_for_drain() {
        let queue = FlowEventQueue::new();
        queue.post(GameFlowEvent::RestartLevel, 0);
        queue.post(GameFlowEvent::ShowDialogCharacter2, 3);
        assert_eq!(queue.pending(), 2);

        let mut seen = Vec::new();
        let executed = queue.drain(&mut |event, index| seen.push((event, index)));

        assert_eq!(executed, 2);
        assert_eq!(
            seen,
            vec![(GameFlowEvent::RestartLevel, 0), (GameFlowEvent::ShowDialogCharacter2, 3)]
        );
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn immediate_events_skip_the_queue() {
        let queue = FlowEventQueue::new();
        let mut seen = Vec::new();
        queue.post_immediate(GameFlowEvent::EndGame, 0, &mut |event, _| seen.push(event));

        assert_eq!(seen, vec![GameFlowEvent::EndGame]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn sender_posts_from_another_thread() {
        let queue = FlowEventQueue::new();
        let sender = queue.sender();
        std::thread::spawn(move || {
            sender
                .send(FlowRequest {
                    event: GameFlowEvent::ShowDiary,
                    index: 1,
                })
                .unwrap();
        })
        .join()
        .unwrap();

        let mut count = 0;
        queue.drain(&mut |_, _| count += 1);
        assert_eq!(count, 1);
    }
}
