//=========================================================================
// Input Collector
//=========================================================================
//
// Hand-off of raw events from device callbacks to the frame thread.
//
// Architecture:
//   InputSender (any thread) ── bounded channel ──> InputCollector
//                                                      │
//                              collect_frame(handler) ─┘ (bounded drain)
//
// Bounded draining keeps one frame from stalling on an event storm;
// leftovers are picked up on the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::event::RawInputEvent;

//=== Constants ===========================================================

/// Upper bound on events applied in a single frame.
pub const MAX_EVENTS_PER_FRAME: usize = 128;

//=== Construction ========================================================

/// Creates a connected sender/collector pair.
///
/// # Panics
///
/// Panics if `capacity == 0`.
pub fn input_channel(capacity: usize) -> (InputSender, InputCollector) {
    assert!(capacity > 0, "Input channel capacity must be positive");
    let (sender, receiver) = bounded(capacity);
    (InputSender { sender }, InputCollector { receiver })
}

//=== InputSender =========================================================

/// Cloneable producer handle for device callbacks.
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<RawInputEvent>,
}

impl InputSender {
    /// Queues an event without blocking.
    ///
    /// Returns `false` when the event was dropped (queue full or simulation
    /// gone).
    pub fn send(&self, event: RawInputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!("Input queue full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn send_all<I: IntoIterator<Item = RawInputEvent>>(&self, events: I) -> usize {
        events.into_iter().filter(|&event| self.send(event)).count()
    }
}

//=== InputCollector ======================================================

/// Frame-thread consumer.
#[derive(Debug)]
pub struct InputCollector {
    receiver: Receiver<RawInputEvent>,
}

impl InputCollector {
    /// Drains pending events in arrival order, at most
    /// [`MAX_EVENTS_PER_FRAME`], returning how many were handled.
    pub fn collect_frame<F: FnMut(RawInputEvent)>(&mut self, mut handler: F) -> usize {
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    handler(event);
                    drained += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Input queue backlog: drained {} events this frame", drained);
        }

        drained
    }

    /// Discards everything queued.
    pub fn clear(&mut self) {
        while self.receiver.try_recv().is_ok() {}
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
