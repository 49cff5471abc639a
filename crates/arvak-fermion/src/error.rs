//! Error types for fermionic operators.

use arvak_pauli::PauliError;
use thiserror::Error;

/// Errors produced while building, reducing or encoding fermionic operators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FermionError {
    /// Integral tensors disagree with the mode count.
    #[error("Tensor shape mismatch: {tensor} has shape {shape:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Which tensor.
        tensor: &'static str,
        /// Actual shape.
        shape: Vec<usize>,
        /// Required shape.
        expected: Vec<usize>,
    },

    /// A mode index lies outside the operator.
    #[error("Mode {mode} is out of range for {num_modes} modes")]
    ModeOutOfRange {
        /// The offending mode.
        mode: usize,
        /// Number of modes of the operator.
        num_modes: usize,
    },

    /// Spin observables need an even, block-ordered mode count.
    #[error("Spin observables require an even number of modes, got {0}")]
    OddModeCount(usize),

    /// An occupation vector does not cover every mode.
    #[error("Occupation vector has {got} entries, expected {expected}")]
    OccupationLength {
        /// Mode count.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// Particle counts exceed the per-spin orbital count.
    #[error("Cannot place {num_alpha} alpha and {num_beta} beta particles in {num_orbitals} orbitals")]
    TooManyParticles {
        /// Alpha particles.
        num_alpha: usize,
        /// Beta particles.
        num_beta: usize,
        /// Spatial orbitals.
        num_orbitals: usize,
    },

    /// The operator is already in the particle-hole picture.
    #[error("Particle-hole transformation has already been applied")]
    ParticleHoleApplied,

    /// Error from the Pauli layer.
    #[error("Pauli error: {0}")]
    Pauli(#[from] PauliError),
}

/// Result type for fermionic operations.
pub type FermionResult<T> = Result<T, FermionError>;
