//=========================================================================
// Roll Accumulator
//=========================================================================
//
// Smooths bursty trackball motion into a bounded direction.
//
// Architecture:
//   push(sample) ── sum -= ring[head]; ring[head] = sample; sum += sample
//   value()      ── clamp(sum / window * gain, -1, 1) per axis
//
// The ring is allocated once. The running sum is re-derived from the
// ring each time the head wraps so float drift cannot accumulate.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vec2;

//=== RollAccumulator =====================================================

#[derive(Debug, Clone)]
pub struct RollAccumulator {
    samples: Vec<Vec2>,
    head: usize,
    sum: Vec2,
    gain: f32,
}

impl RollAccumulator {
    /// # Panics
    ///
    /// Panics if `window == 0`.
    pub fn new(window: usize, gain: f32) -> Self {
        assert!(window > 0, "Roll window must be positive");
        Self {
            samples: vec![Vec2::ZERO; window],
            head: 0,
            sum: Vec2::ZERO,
            gain,
        }
    }

    /// Evicts the oldest sample and adds `sample`.
    pub fn push(&mut self, sample: Vec2) {
        self.sum -= self.samples[self.head];
        self.samples[self.head] = sample;
        self.sum += sample;

        self.head += 1;
        if self.head == self.samples.len() {
            self.head = 0;
            self.sum = self.samples.iter().fold(Vec2::ZERO, |acc, &s| acc + s);
        }
    }

    /// Forgets every sample; the next gesture starts from zero.
    pub fn reseed(&mut self) {
        self.samples.fill(Vec2::ZERO);
        self.sum = Vec2::ZERO;
        self.head = 0;
    }

    /// Smoothed direction, clamped to [-1, 1] per axis.
    pub fn value(&self) -> Vec2 {
        let scale = self.gain / self.samples.len() as f32;
        (self.sum * scale).clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
    }

    pub fn sum(&self) -> Vec2 {
        self.sum
    }

    pub fn window(&self) -> usize {
        self.samples.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
