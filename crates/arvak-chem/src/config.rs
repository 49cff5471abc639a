//! Transformation configuration.
//!
//! Loaded from YAML or JSON, or assembled with the builder methods:
//!
//! ```yaml
//! transformation: particle_hole
//! qubit_mapping: jordan_wigner
//! two_qubit_reduction: false
//! freeze_core: true
//! orbital_reduction: [-1]
//! z2symmetry_reduction: auto
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use arvak_fermion::QubitMappingType;
use serde::{Deserialize, Serialize};

use crate::error::{ChemError, ChemResult};

/// Fermionic picture used before mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationType {
    /// Operators as given.
    #[default]
    Full,
    /// Re-referenced on the Hartree-Fock determinant.
    ParticleHole,
}

impl fmt::Display for TransformationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::ParticleHole => write!(f, "particle_hole"),
        }
    }
}

/// How the Z2 sector is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSymmetryReduction", into = "RawSymmetryReduction")]
pub enum Z2SymmetryReduction {
    /// Pick the sector containing the Hartree-Fock reference.
    Auto,
    /// Use these values, one per generator, each `-1` or `+1`.
    TaperingValues(Vec<i64>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSymmetryReduction {
    Keyword(String),
    Values(Vec<i64>),
}

impl TryFrom<RawSymmetryReduction> for Z2SymmetryReduction {
    type Error = ChemError;

    fn try_from(raw: RawSymmetryReduction) -> Result<Self, Self::Error> {
        match raw {
            RawSymmetryReduction::Keyword(k) if k == "auto" => Ok(Self::Auto),
            RawSymmetryReduction::Keyword(k) => Err(ChemError::InvalidSymmetryReduction(k)),
            RawSymmetryReduction::Values(v) => Ok(Self::TaperingValues(v)),
        }
    }
}

impl From<Z2SymmetryReduction> for RawSymmetryReduction {
    fn from(value: Z2SymmetryReduction) -> Self {
        match value {
            Z2SymmetryReduction::Auto => Self::Keyword("auto".into()),
            Z2SymmetryReduction::TaperingValues(v) => Self::Values(v),
        }
    }
}

impl FromStr for Z2SymmetryReduction {
    type Err = ChemError;

    /// `"auto"` or a comma-separated list such as `"1,-1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "auto" {
            return Ok(Self::Auto);
        }
        s.split(',')
            .map(|v| v.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::TaperingValues)
            .map_err(|_| ChemError::InvalidSymmetryReduction(s.to_string()))
    }
}

impl fmt::Display for Z2SymmetryReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::TaperingValues(v) => write!(f, "{v:?}"),
        }
    }
}

/// Options for [`crate::FermionicTransformation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationConfig {
    /// Full or particle-hole picture.
    pub transformation: TransformationType,
    /// Fermion-to-qubit encoding.
    pub qubit_mapping: QubitMappingType,
    /// Drop the two parity qubits (parity mapping only).
    pub two_qubit_reduction: bool,
    /// Freeze the driver's core orbitals.
    pub freeze_core: bool,
    /// Extra spatial orbitals to freeze or remove; negative counts from the top.
    pub orbital_reduction: Vec<i64>,
    /// Z2 tapering, off when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z2symmetry_reduction: Option<Z2SymmetryReduction>,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            transformation: TransformationType::Full,
            qubit_mapping: QubitMappingType::Parity,
            two_qubit_reduction: true,
            freeze_core: false,
            orbital_reduction: Vec::new(),
            z2symmetry_reduction: None,
        }
    }
}

impl TransformationConfig {
    /// Set the fermionic picture.
    #[must_use]
    pub fn with_transformation(mut self, transformation: TransformationType) -> Self {
        self.transformation = transformation;
        self
    }

    /// Set the qubit encoding.
    #[must_use]
    pub fn with_qubit_mapping(mut self, mapping: QubitMappingType) -> Self {
        self.qubit_mapping = mapping;
        self
    }

    /// Enable or disable the parity two-qubit reduction.
    #[must_use]
    pub fn with_two_qubit_reduction(mut self, enabled: bool) -> Self {
        self.two_qubit_reduction = enabled;
        self
    }

    /// Enable or disable core freezing.
    #[must_use]
    pub fn with_freeze_core(mut self, enabled: bool) -> Self {
        self.freeze_core = enabled;
        self
    }

    /// Set the orbital reduction list.
    #[must_use]
    pub fn with_orbital_reduction(mut self, orbitals: Vec<i64>) -> Self {
        self.orbital_reduction = orbitals;
        self
    }

    /// Set the Z2 reduction mode.
    #[must_use]
    pub fn with_z2symmetry_reduction(mut self, reduction: Z2SymmetryReduction) -> Self {
        self.z2symmetry_reduction = Some(reduction);
        self
    }

    /// Parse from YAML.
    pub fn from_yaml(source: &str) -> ChemResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Parse from JSON.
    pub fn from_json(source: &str) -> ChemResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load from a file, JSON if the extension is `.json`, YAML otherwise.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ChemResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Whether the parity two-qubit reduction will actually run.
    pub fn reduces_two_qubits(&self) -> bool {
        self.two_qubit_reduction && self.qubit_mapping == QubitMappingType::Parity
    }
}
