//! Weighted Pauli-sum operators.
//!
//! An operator is a sum of weighted Pauli strings over a fixed qubit count:
//!
//!   O = Σ_k  c_k · P_k,   c_k ∈ ℂ
//!
//! Terms are kept in insertion order. [`PauliSumOp::simplify`] merges equal
//! strings (first occurrence wins the slot) and drops exact zeros, so two
//! operators built the same way compare equal bit-for-bit.
//!
//! # Example
//!
//! ```rust
//! use arvak_pauli::PauliSumOp;
//! use num_complex::Complex64;
//!
//! // H = -1.0·ZZ + 0.5·IX
//! let h = PauliSumOp::from_list(&[
//!     ("ZZ", Complex64::new(-1.0, 0.0)),
//!     ("IX", Complex64::new(0.5, 0.0)),
//! ])
//! .unwrap();
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.num_qubits(), 2);
//! ```

use std::fmt;

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{PauliError, PauliResult};
use crate::pauli::Pauli;

/// Absolute tolerance used when testing a commutator for zero.
pub const DEFAULT_ATOL: f64 = 1e-12;

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Complex weight.
    pub coeff: Complex64,
    /// The Pauli string.
    pub pauli: Pauli,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(coeff: Complex64, pauli: Pauli) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand for a real-weighted term.
    pub fn real(coeff: f64, pauli: Pauli) -> Self {
        Self::new(Complex64::new(coeff, 0.0), pauli)
    }
}

/// A sum of weighted Pauli strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliSumOp {
    num_qubits: usize,
    terms: Vec<PauliTerm>,
}

impl PauliSumOp {
    /// The zero operator on `num_qubits` qubits.
    pub fn zero(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            terms: Vec::new(),
        }
    }

    /// `coeff · I` on `num_qubits` qubits.
    pub fn identity(num_qubits: usize, coeff: Complex64) -> Self {
        Self {
            num_qubits,
            terms: vec![PauliTerm::new(coeff, Pauli::identity(num_qubits))],
        }
    }

    /// A single-term operator `coeff · pauli`.
    pub fn from_pauli(pauli: Pauli, coeff: Complex64) -> Self {
        Self {
            num_qubits: pauli.num_qubits(),
            terms: vec![PauliTerm::new(coeff, pauli)],
        }
    }

    /// Build from terms, checking they all share the qubit count.
    pub fn from_terms(num_qubits: usize, terms: Vec<PauliTerm>) -> PauliResult<Self> {
        if let Some(bad) = terms.iter().find(|t| t.pauli.num_qubits() != num_qubits) {
            return Err(PauliError::QubitCountMismatch {
                expected: num_qubits,
                got: bad.pauli.num_qubits(),
            });
        }
        Ok(Self { num_qubits, terms })
    }

    /// Build from `(label, coeff)` pairs. The first label fixes the width.
    pub fn from_list(list: &[(&str, Complex64)]) -> PauliResult<Self> {
        let terms = list
            .iter()
            .map(|(label, coeff)| Ok(PauliTerm::new(*coeff, Pauli::from_label(label)?)))
            .collect::<PauliResult<Vec<_>>>()?;
        let num_qubits = terms.first().map_or(0, |t| t.pauli.num_qubits());
        Self::from_terms(num_qubits, terms)
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// All terms in order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if the operator has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Append a term without merging.
    pub fn push(&mut self, term: PauliTerm) -> PauliResult<()> {
        if term.pauli.num_qubits() != self.num_qubits {
            return Err(PauliError::QubitCountMismatch {
                expected: self.num_qubits,
                got: term.pauli.num_qubits(),
            });
        }
        self.terms.push(term);
        Ok(())
    }

    /// Merge equal Pauli strings and drop terms whose weight is exactly zero.
    #[must_use]
    pub fn simplify(&self) -> Self {
        let mut index: FxHashMap<&Pauli, usize> = FxHashMap::default();
        let mut merged: Vec<PauliTerm> = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match index.get(&term.pauli) {
                Some(&slot) => merged[slot].coeff += term.coeff,
                None => {
                    index.insert(&term.pauli, merged.len());
                    merged.push(term.clone());
                }
            }
        }
        merged.retain(|t| t.coeff != Complex64::new(0.0, 0.0));
        Self {
            num_qubits: self.num_qubits,
            terms: merged,
        }
    }

    /// Zero the real and imaginary parts below `threshold` independently,
    /// then drop terms that became zero.
    #[must_use]
    pub fn chop(&self, threshold: f64) -> Self {
        let cut = |v: f64| if v.abs() < threshold { 0.0 } else { v };
        let terms = self
            .terms
            .iter()
            .filter_map(|t| {
                let coeff = Complex64::new(cut(t.coeff.re), cut(t.coeff.im));
                (coeff != Complex64::new(0.0, 0.0)).then(|| PauliTerm::new(coeff, t.pauli.clone()))
            })
            .collect();
        Self {
            num_qubits: self.num_qubits,
            terms,
        }
    }

    /// Multiply every weight by `factor`.
    #[must_use]
    pub fn scale(&self, factor: Complex64) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|t| PauliTerm::new(t.coeff * factor, t.pauli.clone()))
            .collect();
        Self {
            num_qubits: self.num_qubits,
            terms,
        }
    }

    /// `self + other`, simplified.
    pub fn add(&self, other: &PauliSumOp) -> PauliResult<Self> {
        self.check_width(other)?;
        let mut sum = self.clone();
        sum.terms.extend(other.terms.iter().cloned());
        Ok(sum.simplify())
    }

    /// `self · other`, simplified.
    pub fn compose(&self, other: &PauliSumOp) -> PauliResult<Self> {
        self.check_width(other)?;
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                let (phase, pauli) = a.pauli.compose(&b.pauli)?;
                terms.push(PauliTerm::new(a.coeff * b.coeff * phase, pauli));
            }
        }
        Ok(Self {
            num_qubits: self.num_qubits,
            terms,
        }
        .simplify())
    }

    /// `[self, other]`, built only from anticommuting term pairs.
    pub fn commutator(&self, other: &PauliSumOp) -> PauliResult<Self> {
        self.check_width(other)?;
        let mut terms = Vec::new();
        for a in &self.terms {
            for b in &other.terms {
                if a.pauli.commutes(&b.pauli)? {
                    continue;
                }
                let (phase, pauli) = a.pauli.compose(&b.pauli)?;
                terms.push(PauliTerm::new(2.0 * a.coeff * b.coeff * phase, pauli));
            }
        }
        Ok(Self {
            num_qubits: self.num_qubits,
            terms,
        }
        .simplify())
    }

    /// Whether `[self, other]` vanishes to within [`DEFAULT_ATOL`].
    pub fn commutes_with(&self, other: &PauliSumOp) -> PauliResult<bool> {
        Ok(self.commutator(other)?.chop(DEFAULT_ATOL).is_empty())
    }

    /// `⟨b|O|b⟩` for the computational basis state `b`, where `bits[q]` is
    /// the value of qubit `q`.
    pub fn diagonal_expectation(&self, bits: &[bool]) -> PauliResult<Complex64> {
        if bits.len() != self.num_qubits {
            return Err(PauliError::QubitCountMismatch {
                expected: self.num_qubits,
                got: bits.len(),
            });
        }
        let value = self
            .terms
            .iter()
            .filter(|t| t.pauli.is_diagonal())
            .map(|t| {
                let odd = t
                    .pauli
                    .z()
                    .iter()
                    .zip(bits)
                    .filter(|&(&z, &b)| z && b)
                    .count()
                    % 2
                    == 1;
                if odd { -t.coeff } else { t.coeff }
            })
            .sum();
        Ok(value)
    }

    /// Total weight on the identity string.
    pub fn identity_coefficient(&self) -> Complex64 {
        self.terms
            .iter()
            .filter(|t| t.pauli.is_identity())
            .map(|t| t.coeff)
            .sum()
    }

    fn check_width(&self, other: &PauliSumOp) -> PauliResult<()> {
        if self.num_qubits != other.num_qubits {
            return Err(PauliError::QubitCountMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PauliSumOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "({:+.12}{:+.12}i) * {}",
                term.coeff.re, term.coeff.im, term.pauli
            )?;
        }
        Ok(())
    }
}
