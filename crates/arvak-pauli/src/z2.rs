//! Z2 symmetries and qubit tapering.
//!
//! A Z2 symmetry of an operator `H` is a Pauli string `S` commuting with
//! every term of `H`. Given generators `S_i` and single-qubit Paulis `σ_i`
//! such that `σ_i` anticommutes with `S_i` and commutes with every other
//! generator, the Clifford `U_i = (S_i + σ_i)/√2` maps `S_i` onto `σ_i`.
//! After conjugation each symmetry qubit carries only `I` or `σ_i`, which is
//! replaced by its eigenvalue (the tapering value) and the qubit removed.
//!
//! Conjugating a single term `P` (which commutes with `S_i`) is closed form:
//! `U P U = P` when `P` commutes with `σ_i`, and `S_i · P · σ_i` otherwise.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::binary;
use crate::error::{PauliError, PauliResult};
use crate::operator::{PauliSumOp, PauliTerm};
use crate::pauli::{Pauli, PauliOp};

/// A set of Z2 symmetry generators with their tapering data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Z2Symmetries {
    symmetries: Vec<Pauli>,
    sq_paulis: Vec<Pauli>,
    sq_list: Vec<usize>,
    tapering_values: Option<Vec<i8>>,
}

impl Z2Symmetries {
    /// Build from explicit generators, single-qubit Paulis and qubit list.
    pub fn new(
        symmetries: Vec<Pauli>,
        sq_paulis: Vec<Pauli>,
        sq_list: Vec<usize>,
        tapering_values: Option<Vec<i8>>,
    ) -> PauliResult<Self> {
        if symmetries.len() != sq_paulis.len() || symmetries.len() != sq_list.len() {
            return Err(PauliError::InconsistentSymmetries(format!(
                "{} symmetries, {} single-qubit Paulis, {} qubits",
                symmetries.len(),
                sq_paulis.len(),
                sq_list.len()
            )));
        }
        if let Some(first) = symmetries.first() {
            let n = first.num_qubits();
            if let Some(bad) = symmetries
                .iter()
                .chain(&sq_paulis)
                .find(|p| p.num_qubits() != n)
            {
                return Err(PauliError::QubitCountMismatch {
                    expected: n,
                    got: bad.num_qubits(),
                });
            }
            if let Some(&q) = sq_list.iter().find(|&&q| q >= n) {
                return Err(PauliError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: n,
                });
            }
        }
        let z2 = Self {
            symmetries,
            sq_paulis,
            sq_list,
            tapering_values: None,
        };
        match tapering_values {
            Some(values) => {
                let values: Vec<i64> = values.into_iter().map(i64::from).collect();
                z2.with_tapering_values(&values)
            }
            None => Ok(z2),
        }
    }

    /// The empty symmetry set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Symmetry generators.
    pub fn symmetries(&self) -> &[Pauli] {
        &self.symmetries
    }

    /// Single-qubit Pauli paired with each generator.
    pub fn sq_paulis(&self) -> &[Pauli] {
        &self.sq_paulis
    }

    /// Qubit tapered off for each generator.
    pub fn sq_list(&self) -> &[usize] {
        &self.sq_list
    }

    /// Selected sector, if any.
    pub fn tapering_values(&self) -> Option<&[i8]> {
        self.tapering_values.as_deref()
    }

    /// True if there are no generators.
    pub fn is_empty(&self) -> bool {
        self.symmetries.is_empty()
    }

    /// Number of generators.
    pub fn len(&self) -> usize {
        self.symmetries.len()
    }

    /// Check a candidate sector and narrow it to `i8`.
    pub fn check_tapering_values(&self, values: &[i64]) -> PauliResult<Vec<i8>> {
        if values.len() != self.symmetries.len() {
            return Err(PauliError::TaperingValuesLength {
                expected: self.symmetries.len(),
                got: values.len(),
            });
        }
        values
            .iter()
            .map(|&v| match v {
                1 => Ok(1),
                -1 => Ok(-1),
                other => Err(PauliError::InvalidTaperingValue(other)),
            })
            .collect()
    }

    /// Copy with the sector fixed.
    pub fn with_tapering_values(mut self, values: &[i64]) -> PauliResult<Self> {
        self.tapering_values = Some(self.check_tapering_values(values)?);
        Ok(self)
    }

    /// One single-term operator per generator.
    pub fn symmetry_ops(&self) -> Vec<PauliSumOp> {
        self.symmetries
            .iter()
            .map(|s| PauliSumOp::from_pauli(s.clone(), Complex64::new(1.0, 0.0)))
            .collect()
    }

    /// Discover the Z2 symmetries of `op`.
    ///
    /// Generators come from the GF(2) kernel of the term matrix, reduced to
    /// a mutually commuting set in echelon form. A generator for which no
    /// unused qubit admits a valid single-qubit partner is dropped.
    pub fn find(op: &PauliSumOp) -> Self {
        let n = op.num_qubits();
        if op.is_empty() || n == 0 {
            return Self::empty();
        }

        // Row [x_P | z_P]; a kernel vector v read as (z_S, x_S) = (v[..n], v[n..])
        // has zero symplectic product with every term.
        let rows: Vec<Vec<bool>> = op
            .terms()
            .iter()
            .map(|t| t.pauli.x().iter().chain(t.pauli.z()).copied().collect())
            .collect();
        let kernel = binary::kernel(&rows, 2 * n);
        if kernel.is_empty() {
            debug!("No Z2 symmetries found");
            return Self::empty();
        }

        let mut commuting: Vec<Pauli> = Vec::with_capacity(kernel.len());
        for candidate in kernel.iter().filter_map(|v| split_symplectic(v, n)) {
            let fits = commuting
                .iter()
                .all(|s| s.commutes(&candidate).unwrap_or(false));
            if fits {
                commuting.push(candidate);
            } else {
                debug!(symmetry = %candidate, "Skipping anticommuting kernel vector");
            }
        }

        let stacked: Vec<Vec<bool>> = commuting
            .iter()
            .map(|p| p.z().iter().chain(p.x()).copied().collect())
            .collect();
        let (echelon, _) = binary::row_reduce(&stacked, 2 * n);
        let generators: Vec<Pauli> = echelon
            .iter()
            .filter_map(|v| split_symplectic(v, n))
            .collect();

        let mut used = vec![false; n];
        let mut z2 = Self::empty();
        for (row, generator) in generators.iter().enumerate() {
            let others: Vec<&Pauli> = generators
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != row)
                .map(|(_, p)| p)
                .collect();
            let partner = (0..n)
                .filter(|&q| !used[q])
                .find_map(|q| select_partner(generator, &others, q).map(|op| (q, op)));
            match partner.and_then(|(q, op)| Pauli::single(n, q, op).ok().map(|p| (q, p))) {
                Some((q, sigma)) => {
                    used[q] = true;
                    z2.symmetries.push(generator.clone());
                    z2.sq_paulis.push(sigma);
                    z2.sq_list.push(q);
                }
                None => {
                    warn!(symmetry = %generator, "No single-qubit Pauli for symmetry; dropping it");
                }
            }
        }

        debug!(
            num_symmetries = z2.len(),
            sq_list = ?z2.sq_list,
            "Found Z2 symmetries"
        );
        z2
    }

    /// Taper `op` using the stored sector.
    pub fn taper(&self, op: &PauliSumOp) -> PauliResult<PauliSumOp> {
        let values = self
            .tapering_values
            .as_ref()
            .ok_or(PauliError::MissingTaperingValues)?;
        self.taper_with(op, values)
    }

    /// Taper `op` into the sector given by `values`.
    pub fn taper_with(&self, op: &PauliSumOp, values: &[i8]) -> PauliResult<PauliSumOp> {
        if self.is_empty() {
            return Err(PauliError::EmptySymmetries);
        }
        let values: Vec<i64> = values.iter().map(|&v| i64::from(v)).collect();
        let values = self.check_tapering_values(&values)?;
        let n = self.symmetries[0].num_qubits();
        if op.num_qubits() != n {
            return Err(PauliError::QubitCountMismatch {
                expected: n,
                got: op.num_qubits(),
            });
        }

        let mut terms = Vec::with_capacity(op.n_terms());
        for term in op.terms() {
            if let Some(s) = self
                .symmetries
                .iter()
                .find(|s| !term.pauli.commutes(s).unwrap_or(false))
            {
                return Err(PauliError::NotSymmetric {
                    term: term.pauli.to_label(),
                    symmetry: s.to_label(),
                });
            }

            let mut coeff = term.coeff;
            let mut pauli = term.pauli.clone();
            for (symmetry, sigma) in self.symmetries.iter().zip(&self.sq_paulis) {
                if !pauli.commutes(sigma)? {
                    let (phase_a, sp) = symmetry.compose(&pauli)?;
                    let (phase_b, spo) = sp.compose(sigma)?;
                    coeff *= phase_a * phase_b;
                    pauli = spo;
                }
            }
            for (&qubit, &value) in self.sq_list.iter().zip(&values) {
                if pauli.op(qubit) != PauliOp::I {
                    coeff *= f64::from(value);
                }
            }
            terms.push(PauliTerm::new(coeff, pauli.delete_qubits(&self.sq_list)));
        }

        Ok(PauliSumOp::from_terms(n - self.sq_list.len(), terms)?.simplify())
    }

    /// Taper `op` into every sector.
    ///
    /// Sectors are enumerated with the first generator varying slowest and
    /// `+1` before `-1`.
    pub fn taper_all_sectors(&self, op: &PauliSumOp) -> PauliResult<Vec<(Vec<i8>, PauliSumOp)>> {
        if self.is_empty() {
            return Err(PauliError::EmptySymmetries);
        }
        let k = self.len();
        (0..1usize << k)
            .map(|index| {
                let values: Vec<i8> = (0..k)
                    .map(|j| if (index >> (k - 1 - j)) & 1 == 1 { -1 } else { 1 })
                    .collect();
                let tapered = self.taper_with(op, &values)?;
                Ok((values, tapered))
            })
            .collect()
    }

    /// Remove the two qubits fixed by alpha and total particle parity of a
    /// parity-encoded operator.
    ///
    /// Qubit `n/2 - 1` holds the alpha parity and qubit `n - 1` the total
    /// parity; the sector is `[(-1)^na, (-1)^(na+nb)]`.
    ///
    /// An operator with no terms stays empty, narrowed by the two qubits so
    /// it lines up with reduced operators of the same problem. A 0-qubit
    /// operator has nothing to reduce and comes back unchanged.
    pub fn two_qubit_reduction(
        op: &PauliSumOp,
        num_particles: [usize; 2],
    ) -> PauliResult<PauliSumOp> {
        let n = op.num_qubits();
        if op.is_empty() {
            debug!("Operator is empty, skipping two-qubit reduction");
            return Ok(PauliSumOp::zero(n.saturating_sub(2)));
        }
        if n == 0 {
            return Ok(op.clone());
        }
        if n < 2 {
            return Err(PauliError::TooFewQubits(n));
        }
        let [num_alpha, num_beta] = num_particles;
        let parity = |count: usize| if count % 2 == 0 { 1 } else { -1 };
        let values = vec![parity(num_alpha), parity(num_alpha + num_beta)];

        let mid = n / 2 - 1;
        let last = n - 1;
        let z2 = Self::new(
            vec![
                Pauli::single(n, mid, PauliOp::Z)?,
                Pauli::single(n, last, PauliOp::Z)?,
            ],
            vec![
                Pauli::single(n, mid, PauliOp::X)?,
                Pauli::single(n, last, PauliOp::X)?,
            ],
            vec![mid, last],
            Some(values),
        )?;
        z2.taper(op)
    }
}

/// Read `v` as `(z, x) = (v[..n], v[n..])`.
fn split_symplectic(v: &[bool], n: usize) -> Option<Pauli> {
    Pauli::from_bits(v.get(..n)?.to_vec(), v.get(n..)?.to_vec()).ok()
}

/// Single-qubit partner for `generator` on `qubit`, if one exists.
fn select_partner(generator: &Pauli, others: &[&Pauli], qubit: usize) -> Option<PauliOp> {
    let (gz, gx) = generator.op(qubit).bits();
    let others_bits = || others.iter().map(|p| p.op(qubit).bits());

    // others I/X, generator Z/Y
    if others_bits().all(|(z, _)| !z) && gz {
        return Some(PauliOp::X);
    }
    // others I/Z, generator X/Y
    if others_bits().all(|(_, x)| !x) && gx {
        return Some(PauliOp::Z);
    }
    // others I/Y, generator X/Z
    if others_bits().all(|(z, x)| z == x) && gz != gx {
        return Some(PauliOp::Y);
    }
    None
}

impl fmt::Display for Z2Symmetries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No Z2 symmetries");
        }
        writeln!(f, "Z2 symmetries:")?;
        for ((s, sigma), q) in self.symmetries.iter().zip(&self.sq_paulis).zip(&self.sq_list) {
            writeln!(f, "  {s}  single-qubit {sigma}  qubit {q}")?;
        }
        match &self.tapering_values {
            Some(values) => write!(f, "Tapering values: {values:?}"),
            None => write!(f, "Tapering values: unset"),
        }
    }
}
