//! Error types for the Pauli crate.

use thiserror::Error;

/// Errors produced by Pauli-operator algebra and symmetry tapering.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PauliError {
    /// Two operands act on a different number of qubits.
    #[error("Qubit count mismatch: expected {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Qubit count of the receiving operand.
        expected: usize,
        /// Qubit count of the offending operand.
        got: usize,
    },

    /// A qubit index lies outside the operator width.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit Pauli")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Width of the Pauli string.
        num_qubits: usize,
    },

    /// A Pauli label contained something other than `I`, `X`, `Y` or `Z`.
    #[error("Invalid Pauli label character '{0}'")]
    InvalidLabel(char),

    /// Tapering was requested on an empty symmetry set.
    #[error("Z2 symmetries, single-qubit Paulis and qubit list cannot be empty")]
    EmptySymmetries,

    /// Tapering values are missing.
    #[error("No tapering values have been set")]
    MissingTaperingValues,

    /// Tapering-value count differs from the generator count.
    #[error("Tapering values list has length {got}, expected {expected}")]
    TaperingValuesLength {
        /// Number of symmetry generators.
        expected: usize,
        /// Number of supplied values.
        got: usize,
    },

    /// A tapering value other than -1 or +1.
    #[error("Tapering values must be -1 or 1, got {0}")]
    InvalidTaperingValue(i64),

    /// Generator, single-qubit Pauli and qubit lists disagree in length.
    #[error("Inconsistent symmetry description: {0}")]
    InconsistentSymmetries(String),

    /// A term of the tapered operator does not commute with a generator.
    #[error("Operator term {term} does not commute with symmetry {symmetry}")]
    NotSymmetric {
        /// Label of the offending term.
        term: String,
        /// Label of the symmetry generator.
        symmetry: String,
    },

    /// Two-qubit reduction needs at least two qubits.
    #[error("Two-qubit reduction requires at least 2 qubits, operator has {0}")]
    TooFewQubits(usize),
}

/// Result type for Pauli operations.
pub type PauliResult<T> = Result<T, PauliError>;
