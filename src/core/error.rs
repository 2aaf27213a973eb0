//=========================================================================
// Error Types
//=========================================================================
//
// Failure taxonomy of the simulation core.
//
// Capacity exhaustion is a sizing bug: it is reported, never absorbed.
// Missing collaborators are not errors (they are `Option`s and skipped).
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== CapacityError =======================================================

/// A fixed-capacity container refused an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{container} exhausted (capacity {capacity})")]
pub struct CapacityError {
    /// Human-readable name of the container that overflowed.
    pub container: &'static str,
    /// The capacity fixed at construction.
    pub capacity: usize,
}

//=== PoolError ===========================================================

/// Object pool failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Every entry is currently in use.
    #[error("object pool exhausted ({capacity} entries in use)")]
    Exhausted { capacity: usize },

    /// An entry was released into a pool that already holds all of its entries.
    #[error("object pool already full ({capacity} entries); release of a foreign entry")]
    Overfilled { capacity: usize },
}

//=== SimulationError =====================================================

/// Errors surfaced by a simulation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Result alias for frame-path operations.
pub type SimResult<T> = Result<T, SimulationError>;
