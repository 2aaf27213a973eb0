//=========================================================================
// Object Pool
//=========================================================================
//
// Fixed-capacity recycler for value types.
//
// Architecture:
//   ObjectPool::new(capacity, factory) ── pre-fills available slots
//        │
//        ├─ acquire() ── moves an entry out (Err when exhausted)
//        └─ release(entry) ── reset() + moves it back in
//
// Ownership moves out on acquire and back in on release, so an entry is
// either available or in use, never both.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::fixed_array::FixedSizeArray;
use crate::core::error::PoolError;

//=== Poolable ============================================================

/// A value that can be recycled by an [`ObjectPool`].
pub trait Poolable {
    /// Restores the default state before the entry becomes available again.
    fn reset(&mut self);
}

//=== ObjectPool ==========================================================

/// Hands out and reclaims instances from a pre-filled store.
pub struct ObjectPool<T: Poolable> {
    available: FixedSizeArray<T>,
}

impl<T: Poolable> ObjectPool<T> {
    /// Builds a pool holding `capacity` entries created by `factory`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize, mut factory: impl FnMut() -> T) -> Self {
        let mut available = FixedSizeArray::named("object pool", capacity);
        while !available.is_full() {
            // Cannot fail: filled only up to capacity.
            let _ = available.push(factory());
        }
        Self { available }
    }

    /// Takes an available entry.
    ///
    /// Exhaustion means the pool was sized below the game's concurrent
    /// maximum; callers propagate it.
    pub fn acquire(&mut self) -> Result<T, PoolError> {
        self.available.pop().ok_or(PoolError::Exhausted {
            capacity: self.available.capacity(),
        })
    }

    /// Resets `entry` and returns it to the available set.
    pub fn release(&mut self, mut entry: T) -> Result<(), PoolError> {
        entry.reset();
        self.available.push(entry).map_err(|err| {
            warn!("Release into full object pool (capacity {})", err.capacity);
            PoolError::Overfilled {
                capacity: err.capacity,
            }
        })
    }

    //--- Queries ----------------------------------------------------------

    /// Entries currently available.
    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Entries currently handed out.
    pub fn in_use(&self) -> usize {
        self.available.capacity() - self.available.len()
    }

    pub fn capacity(&self) -> usize {
        self.available.capacity()
    }
}

impl<T: Poolable + Default> ObjectPool<T> {
    /// Builds a pool of default-constructed entries.
    pub fn with_default(capacity: usize) -> Self {
        Self::new(capacity, T::default)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Particle {
        x: f32,
        alive: bool,
    }

    impl Poolable for Particle {
        fn reset(&mut self) {
            *self = Particle::default();
        }
    }

    #[test]
    fn acquire_until_exhausted_fails_deterministically() {
        let mut pool: ObjectPool<Particle> = ObjectPool::with_default(3);
        let mut held = Vec::new();
        for _ in 0..3 {
            held.push(pool.acquire().unwrap());
        }

        assert_eq!(pool.in_use(), 3);
        assert_eq!(pool.acquire().unwrap_err(), PoolError::Exhausted { capacity: 3 });
        assert_eq!(pool.acquire().unwrap_err(), PoolError::Exhausted { capacity: 3 });
    }

    #[test]
    fn released_entries_are_reacquirable_forever() {
        let mut pool: ObjectPool<Particle> = ObjectPool::with_default(4);

        for _round in 0..100 {
            let mut held = Vec::new();
            for _ in 0..4 {
                held.push(pool.acquire().unwrap());
            }
            for entry in held {
                pool.release(entry).unwrap();
            }
        }

        assert_eq!(pool.available(), 4);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn release_restores_default_state() {
        let mut pool: ObjectPool<Particle> = ObjectPool::with_default(1);
        let mut p = pool.acquire().unwrap();
        p.x = 12.0;
        p.alive = true;
        pool.release(p).unwrap();

        assert_eq!(pool.acquire().unwrap(), Particle::default());
    }

    #[test]
    fn releasing_a_foreign_entry_into_full_pool_fails() {
        let mut pool: ObjectPool<Particle> = ObjectPool::with_default(2);
        let err = pool.release(Particle::default()).unwrap_err();
        assert_eq!(err, PoolError::Overfilled { capacity: 2 });
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn factory_is_called_once_per_slot() {
        let mut calls = 0;
        let pool = ObjectPool::new(5, || {
            calls += 1;
            Particle::default()
        });
        assert_eq!(calls, 5);
        assert_eq!(pool.capacity(), 5);
    }
}
