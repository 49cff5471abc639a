//! Error types for the transformation pipeline.

use arvak_fermion::FermionError;
use arvak_pauli::PauliError;
use thiserror::Error;

/// Errors raised by the fermionic transformation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChemError {
    /// The symmetry-reduction keyword is not recognized.
    #[error("Invalid z2symmetry_reduction value '{0}', expected 'auto' or a list of tapering values")]
    InvalidSymmetryReduction(String),

    /// Explicit tapering values do not match the generator count.
    #[error("z2symmetry_reduction tapering values list has invalid length {got} should be {expected}")]
    TaperingValuesLength {
        /// Generators found.
        expected: usize,
        /// Values supplied.
        got: usize,
    },

    /// Explicit tapering values outside {-1, +1}.
    #[error("z2symmetry_reduction tapering values list must contain -1's and/or 1's only was {0:?}")]
    InvalidTaperingValues(Vec<i64>),

    /// The primary operator does not commute with its own symmetries.
    #[error("Z2 symmetry failure: main operator must commute with symmetries found from it")]
    SymmetryInconsistent,

    /// Molecular input failed validation.
    #[error("Invalid molecule data: {0}")]
    InvalidMolecule(String),

    /// A result kind that cannot be interpreted.
    #[error("Unsupported algorithm result '{0}': only minimum eigensolver results can be interpreted")]
    UnsupportedResult(String),

    /// I/O failure while loading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Error from the fermionic layer.
    #[error("Fermionic operator error: {0}")]
    Fermion(#[from] FermionError),

    /// Error from the Pauli layer.
    #[error("Qubit operator error: {0}")]
    Pauli(#[from] PauliError),
}

/// Result type for the transformation pipeline.
pub type ChemResult<T> = Result<T, ChemError>;
