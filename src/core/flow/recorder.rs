//=========================================================================
// Event Recorder
//=========================================================================
//
// Telemetry shared with an auxiliary thread. One lock guards the whole
// record; everything else in the simulation is frame-thread owned.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use parking_lot::Mutex;

//=== Internal Dependencies ===============================================

use crate::core::math::Vec2;

//=== EventRecorder =======================================================

#[derive(Debug, Default)]
struct Record {
    last_death_position: Option<Vec2>,
    deaths: u32,
}

/// Cheap to clone; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    inner: Arc<Mutex<Record>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records where the player died; used to place respawns.
    pub fn set_last_death_position(&self, position: Vec2) {
        let mut record = self.inner.lock();
        record.last_death_position = Some(position);
        record.deaths += 1;
    }

    pub fn last_death_position(&self) -> Option<Vec2> {
        self.inner.lock().last_death_position
    }

    pub fn deaths(&self) -> u32 {
        self.inner.lock().deaths
    }

    pub fn reset(&self) {
        *self.inner.lock() = Record::default();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn records_last_death() {
        let recorder = EventRecorder::new();
        assert_eq!(recorder.last_death_position(), None);

        recorder.set_last_death_position(Vec2::new(10.0, 20.0));
        recorder.set_last_death_position(Vec2::new(30.0, 5.0));

        assert_eq!(recorder.last_death_position(), Some(Vec2::new(30.0, 5.0)));
        assert_eq!(recorder.deaths(), 2);

        recorder.reset();
        assert_eq!(recorder.deaths(), 0);
    }

    #[test]
    fn readable_from_another_thread() {
        let recorder = EventRecorder::new();
        let reader = recorder.clone();
        recorder.set_last_death_position(Vec2::new(1.0, 2.0));

        let seen = thread::spawn(move || reader.last_death_position())
            .join()
            .unwrap();
        assert_eq!(seen, Some(Vec2::new(1.0, 2.0)));
    }
}
