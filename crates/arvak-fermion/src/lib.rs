//! `arvak-fermion`: second-quantized fermionic operators for Arvak.
//!
//! A [`FermionicOperator`] holds one- and two-body integrals over
//! block-ordered spin-orbitals and supports the reductions used before
//! qubit encoding:
//!
//! - **Freezing** occupied modes, with the removed energy returned as a shift
//! - **Elimination** of unoccupied modes
//! - **Particle-hole** re-referencing on the Hartree-Fock determinant
//!
//! and encoding into a [`arvak_pauli::PauliSumOp`] with the Jordan-Wigner,
//! parity or Bravyi-Kitaev mapping.
//!
//! # Quick start
//!
//! ```rust
//! use arvak_fermion::{QubitMappingType, observables};
//!
//! let n = observables::total_particle_number(4).unwrap();
//! let qubit_op = n.mapping(QubitMappingType::JordanWigner, 1e-8).unwrap();
//!
//! // two electrons in the Jordan-Wigner basis state |0101⟩
//! let bits = QubitMappingType::JordanWigner.encode_occupations(&[true, false, true, false]);
//! let value = qubit_op.diagonal_expectation(&bits).unwrap();
//! assert!((value.re - 2.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod mapping;
pub mod observables;
pub mod operator;

pub use error::{FermionError, FermionResult};
pub use mapping::QubitMappingType;
pub use operator::{FermionicOperator, hartree_fock_occupation};
