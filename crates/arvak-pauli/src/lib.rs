//! `arvak-pauli`: weighted Pauli-sum operators and Z2-symmetry tapering.
//!
//! Provides the qubit-side algebra of the fermionic transformation pipeline:
//!
//! - **Pauli strings** in dense symplectic form with exact composition phases
//! - **Pauli sums** with complex weights, simplification and chopping
//! - **GF(2)** row reduction and kernels
//! - **Z2 symmetries**: discovery, sector tapering, and the parity-mapping
//!   two-qubit reduction
//!
//! # Quick start
//!
//! ```rust
//! use arvak_pauli::{PauliSumOp, Z2Symmetries};
//! use num_complex::Complex64;
//!
//! // H = ZZ + 0.5·XX commutes with ZZ and XX
//! let h = PauliSumOp::from_list(&[
//!     ("ZZ", Complex64::new(1.0, 0.0)),
//!     ("XX", Complex64::new(0.5, 0.0)),
//! ])
//! .unwrap();
//!
//! let z2 = Z2Symmetries::find(&h);
//! assert_eq!(z2.len(), 2);
//!
//! let sectors = z2.taper_all_sectors(&h).unwrap();
//! assert_eq!(sectors.len(), 4);
//! assert!(sectors.iter().all(|(_, op)| op.num_qubits() == 0));
//! ```

pub mod binary;
pub mod error;
pub mod operator;
pub mod pauli;
pub mod z2;

pub use error::{PauliError, PauliResult};
pub use operator::{DEFAULT_ATOL, PauliSumOp, PauliTerm};
pub use pauli::{Pauli, PauliOp};
pub use z2::Z2Symmetries;
