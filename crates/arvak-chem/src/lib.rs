//! `arvak-chem`: molecular Hamiltonians as qubit problems.
//!
//! [`FermionicTransformation`] takes [`MolecularData`] through orbital
//! reduction, the optional particle-hole picture, a qubit encoding and Z2
//! tapering, and returns a [`TransformedProblem`]. Its
//! [`ResultInterpreter`] adds everything moved out of the qubit operator
//! back onto the eigensolver output.
//!
//! # Quick start
//!
//! ```rust
//! use arvak_chem::{FermionicTransformation, MolecularData, TransformationConfig};
//! use arvak_fermion::QubitMappingType;
//! use ndarray::{Array2, Array4};
//!
//! let h = Array2::from_shape_vec((2, 2), vec![-1.25, 0.0, 0.0, -0.47]).unwrap();
//! let eri = Array4::from_elem((2, 2, 2, 2), 0.1);
//! let molecule = MolecularData::from_spatial_integrals(&h, &eri, 1, 1).unwrap();
//!
//! let config = TransformationConfig::default().with_qubit_mapping(QubitMappingType::Parity);
//! let problem = FermionicTransformation::new(config).transform(&molecule).unwrap();
//! assert_eq!(problem.num_qubits(), 2);
//! assert_eq!(problem.aux_ops.len(), 3);
//! ```

pub mod config;
pub mod error;
pub mod mapper;
pub mod molecule;
pub mod particle_hole;
pub mod reduction;
pub mod reference;
pub mod result;
pub mod symmetry;
pub mod transformation;

pub use config::{TransformationConfig, TransformationType, Z2SymmetryReduction};
pub use error::{ChemError, ChemResult};
pub use mapper::{MAPPING_THRESHOLD, QubitMapper};
pub use molecule::{DipoleIntegrals, Driver, JsonDriver, MolecularData};
pub use particle_hole::ParticleHoleStage;
pub use reduction::{IndexReducer, OperatorReducer, OrbitalSpace, ReducedOperator, ReductionIndices};
pub use reference::HartreeFock;
pub use result::{
    AlgorithmResult, EigensolverResult, GroundStateResult, MinimumEigensolverResult,
    ResultInterpreter, ShiftLedger, ShiftPair,
};
pub use symmetry::{AuxOperator, SymmetryOutcome, SymmetryReducer, SymmetryState, pick_sector};
pub use transformation::{AuxiliaryKind, FermionicTransformation, MoleculeInfo, TransformedProblem};
