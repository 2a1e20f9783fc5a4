//! Setup-time validation errors.

use thiserror::Error;

/// Errors reported while building a [`ClothSolver`](crate::solver::ClothSolver).
///
/// Runtime preconditions inside a step are debug assertions, not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    #[error("substep count must be positive")]
    InvalidSubstepCount,

    #[error("stiffness must be in (0, 1], got {0}")]
    InvalidStiffness(f32),

    #[error("particle radius must be positive and finite, got {0}")]
    InvalidParticleRadius(f32),

    #[error("hash table size must be positive")]
    InvalidTableSize,

    #[error("mesh must have at least one row and one column, got {rows}x{cols}")]
    InvalidMeshDimensions { rows: usize, cols: usize },

    #[error("rest distance must be positive and finite, got {0}")]
    InvalidRestDistance(f32),

    #[error("pinned particle {index} out of bounds (count: {count})")]
    PinOutOfBounds { index: usize, count: usize },

    #[error("particle {index} has invalid inverse mass {inv_mass}, expected finite and >= 0")]
    InvalidInverseMass { index: usize, inv_mass: f32 },

    #[error("particle store holds {len} entries in a column but count is {count}")]
    ParticleCountMismatch { count: usize, len: usize },

    #[error("edge {edge} references particle {index} out of bounds (count: {count})")]
    EdgeOutOfBounds {
        edge: usize,
        index: usize,
        count: usize,
    },
}
