//! Fermion-to-qubit encodings.
//!
//! Every encoding is described by one Majorana pair `(c_j, d_j)` of Pauli
//! strings per mode, with
//!
//!   a_j = (c_j + i d_j) / 2,   a†_j = (c_j − i d_j) / 2
//!
//! | encoding | c_j | d_j |
//! |----------|-----|-----|
//! | Jordan-Wigner | `Z_{<j} X_j` | `Z_{<j} Y_j` |
//! | parity | `Z_{j−1} X_j X_{>j}` | `Y_j X_{>j}` |
//! | Bravyi-Kitaev | `X_{U(j)} X_j Z_{P(j)}` | `X_{U(j)} Y_j Z_{R(j)}` |
//!
//! where `U`, `P` and `F` are the Bravyi-Kitaev update, parity and flip sets
//! and `R = P \ F`. Modes occupied in a particle-hole reference have the
//! roles of `a` and `a†` swapped.

use std::fmt;

use arvak_pauli::{Pauli, PauliOp, PauliSumOp, PauliTerm};
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FermionResult;
use crate::operator::FermionicOperator;

/// Fermion-to-qubit encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QubitMappingType {
    /// Jordan-Wigner: qubit `j` stores the occupation of mode `j`.
    JordanWigner,
    /// Parity: qubit `j` stores the parity of modes `0..=j`.
    #[default]
    Parity,
    /// Bravyi-Kitaev: qubits store partial parity sums over a Fenwick tree.
    BravyiKitaev,
}

impl fmt::Display for QubitMappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QubitMappingType::JordanWigner => "jordan_wigner",
            QubitMappingType::Parity => "parity",
            QubitMappingType::BravyiKitaev => "bravyi_kitaev",
        };
        f.write_str(name)
    }
}

impl QubitMappingType {
    /// Majorana pair `(c_j, d_j)` for every mode.
    pub fn majorana_pairs(self, num_modes: usize) -> FermionResult<Vec<(Pauli, Pauli)>> {
        (0..num_modes)
            .map(|j| {
                let (c, d) = match self {
                    QubitMappingType::JordanWigner => jordan_wigner_pair(num_modes, j),
                    QubitMappingType::Parity => parity_pair(num_modes, j),
                    QubitMappingType::BravyiKitaev => bravyi_kitaev_pair(num_modes, j),
                };
                Ok((
                    Pauli::from_ops(num_modes, c)?,
                    Pauli::from_ops(num_modes, d)?,
                ))
            })
            .collect()
    }

    /// Computational basis state encoding the occupation vector `occupied`.
    ///
    /// Entry `q` of the result is the value of qubit `q`.
    pub fn encode_occupations(self, occupied: &[bool]) -> Vec<bool> {
        let n = occupied.len();
        match self {
            QubitMappingType::JordanWigner => occupied.to_vec(),
            QubitMappingType::Parity => occupied
                .iter()
                .scan(false, |parity, &o| {
                    *parity ^= o;
                    Some(*parity)
                })
                .collect(),
            QubitMappingType::BravyiKitaev => {
                let size = tree_size(n);
                let mut bits = occupied.to_vec();
                for (j, &o) in occupied.iter().enumerate() {
                    if !o {
                        continue;
                    }
                    for q in update_set(j, size).into_iter().filter(|&q| q < n) {
                        bits[q] ^= true;
                    }
                }
                bits
            }
        }
    }
}

fn jordan_wigner_pair(_n: usize, j: usize) -> (Vec<(usize, PauliOp)>, Vec<(usize, PauliOp)>) {
    let string: Vec<(usize, PauliOp)> = (0..j).map(|k| (k, PauliOp::Z)).collect();
    let mut c = string.clone();
    c.push((j, PauliOp::X));
    let mut d = string;
    d.push((j, PauliOp::Y));
    (c, d)
}

fn parity_pair(n: usize, j: usize) -> (Vec<(usize, PauliOp)>, Vec<(usize, PauliOp)>) {
    let tail: Vec<(usize, PauliOp)> = (j + 1..n).map(|k| (k, PauliOp::X)).collect();
    let mut c = tail.clone();
    c.push((j, PauliOp::X));
    if j > 0 {
        c.push((j - 1, PauliOp::Z));
    }
    let mut d = tail;
    d.push((j, PauliOp::Y));
    (c, d)
}

fn bravyi_kitaev_pair(n: usize, j: usize) -> (Vec<(usize, PauliOp)>, Vec<(usize, PauliOp)>) {
    let size = tree_size(n);
    let update: Vec<(usize, PauliOp)> = update_set(j, size)
        .into_iter()
        .filter(|&q| q < n)
        .map(|q| (q, PauliOp::X))
        .collect();
    let parity = parity_set(j, size);
    let flip = flip_set(j, size);

    let mut c = update.clone();
    c.push((j, PauliOp::X));
    c.extend(parity.iter().map(|&q| (q, PauliOp::Z)));

    let mut d = update;
    d.push((j, PauliOp::Y));
    d.extend(
        parity
            .iter()
            .filter(|q| !flip.contains(q))
            .map(|&q| (q, PauliOp::Z)),
    );
    (c, d)
}

/// Power-of-two size of the Fenwick tree covering `n` modes.
fn tree_size(n: usize) -> usize {
    n.next_power_of_two().max(2)
}

/// Modes whose parity, together with mode `j`, gives the parity of `0..j`.
fn parity_set(j: usize, n: usize) -> Vec<usize> {
    if n % 2 != 0 {
        return Vec::new();
    }
    let half = n / 2;
    if j < half {
        parity_set(j, half)
    } else {
        let mut set: Vec<usize> = parity_set(j - half, half)
            .into_iter()
            .map(|q| q + half)
            .collect();
        set.push(half - 1);
        set
    }
}

/// Qubits that must flip when the occupation of mode `j` changes.
fn update_set(j: usize, n: usize) -> Vec<usize> {
    if n % 2 != 0 {
        return Vec::new();
    }
    let half = n / 2;
    if j < half {
        let mut set = vec![n - 1];
        set.extend(update_set(j, half));
        set
    } else {
        update_set(j - half, half).into_iter().map(|q| q + half).collect()
    }
}

/// Qubits whose parity decides whether qubit `j` equals the occupation of mode `j`.
fn flip_set(j: usize, n: usize) -> Vec<usize> {
    if n % 2 != 0 {
        return Vec::new();
    }
    let half = n / 2;
    if j < half {
        flip_set(j, half)
    } else {
        let mut set: Vec<usize> = flip_set(j - half, half).into_iter().map(|q| q + half).collect();
        if j == n - 1 {
            set.push(half - 1);
        }
        set
    }
}

/// Insertion-ordered accumulation of weighted Pauli strings.
#[derive(Default)]
struct TermAccumulator {
    index: FxHashMap<Pauli, usize>,
    terms: Vec<PauliTerm>,
}

impl TermAccumulator {
    fn add(&mut self, coeff: Complex64, pauli: &Pauli) {
        match self.index.get(pauli) {
            Some(&slot) => self.terms[slot].coeff += coeff,
            None => {
                self.index.insert(pauli.clone(), self.terms.len());
                self.terms.push(PauliTerm::new(coeff, pauli.clone()));
            }
        }
    }

    fn add_op(&mut self, op: &PauliSumOp, factor: f64) {
        for term in op.terms() {
            self.add(term.coeff * factor, &term.pauli);
        }
    }
}

impl FermionicOperator {
    /// Encode the operator as a qubit operator and chop weights below
    /// `threshold`.
    pub fn mapping(
        &self,
        map_type: QubitMappingType,
        threshold: f64,
    ) -> FermionResult<PauliSumOp> {
        let n = self.num_modes();
        let pairs = map_type.majorana_pairs(n)?;
        let half = Complex64::new(0.5, 0.0);
        let i = Complex64::i();

        // (creation, annihilation) per mode, (c ∓ i d) / 2
        let mut ladders = Vec::with_capacity(n);
        for (j, (c, d)) in pairs.into_iter().enumerate() {
            let hole = self.reference().is_some_and(|r| r[j]);
            let (sign_create, sign_annihilate) = if hole { (i, -i) } else { (-i, i) };
            let create = PauliSumOp::from_terms(
                n,
                vec![PauliTerm::real(1.0, c.clone()), PauliTerm::new(sign_create, d.clone())],
            )?
            .scale(half);
            let annihilate = PauliSumOp::from_terms(
                n,
                vec![PauliTerm::real(1.0, c), PauliTerm::new(sign_annihilate, d)],
            )?
            .scale(half);
            ladders.push((create, annihilate));
        }

        // E[p][q] = a†p aq
        let mut excitations = Vec::with_capacity(n * n);
        for (create, _) in &ladders {
            for (_, annihilate) in &ladders {
                excitations.push(create.compose(annihilate)?);
            }
        }
        let e = |p: usize, q: usize| &excitations[p * n + q];

        let mut acc = TermAccumulator::default();
        if self.constant() != 0.0 {
            acc.add(Complex64::new(self.constant(), 0.0), &Pauli::identity(n));
        }
        for ((p, q), &h) in self.h1().indexed_iter() {
            if h != 0.0 {
                acc.add_op(e(p, q), h);
            }
        }
        // a†p a†r as aq = E_pq E_rs − δ_qr E_ps
        for ((p, q, r, s), &h) in self.h2().indexed_iter() {
            if h == 0.0 {
                continue;
            }
            acc.add_op(&e(p, q).compose(e(r, s))?, h);
            if q == r {
                acc.add_op(e(p, s), -h);
            }
        }

        let op = PauliSumOp::from_terms(n, acc.terms)?.simplify().chop(threshold);
        debug!(
            mapping = %map_type,
            num_qubits = n,
            num_terms = op.n_terms(),
            "Mapped fermionic operator"
        );
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bk_sets_for_four_modes() {
        assert_eq!(update_set(0, 4), vec![3, 1]);
        assert_eq!(update_set(1, 4), vec![3]);
        assert_eq!(update_set(2, 4), vec![3]);
        assert!(update_set(3, 4).is_empty());
        assert!(parity_set(0, 4).is_empty());
        assert_eq!(parity_set(1, 4), vec![0]);
        assert_eq!(parity_set(2, 4), vec![1]);
        assert_eq!(parity_set(3, 4), vec![2, 1]);
        assert_eq!(flip_set(1, 4), vec![0]);
        assert!(flip_set(2, 4).is_empty());
        assert_eq!(flip_set(3, 4), vec![2, 1]);
    }

    #[test]
    fn test_encode_occupations() {
        let occ = [true, false, true, false];
        assert_eq!(QubitMappingType::JordanWigner.encode_occupations(&occ), occ.to_vec());
        assert_eq!(
            QubitMappingType::Parity.encode_occupations(&occ),
            vec![true, true, false, false]
        );
        // qubit 1 covers modes 0..=1, qubit 3 covers all
        assert_eq!(
            QubitMappingType::BravyiKitaev.encode_occupations(&occ),
            vec![true, true, true, false]
        );
    }

    #[test]
    fn test_jordan_wigner_number_operator() {
        let op = FermionicOperator::one_body(ndarray::Array2::from_diag(&ndarray::arr1(&[
            0.0, 2.0,
        ])))
        .unwrap();
        let qubit_op = op.mapping(QubitMappingType::JordanWigner, 1e-8).unwrap();
        // 2 n_1 = I − Z_1
        let expected = PauliSumOp::from_list(&[
            ("II", Complex64::new(1.0, 0.0)),
            ("ZI", Complex64::new(-1.0, 0.0)),
        ])
        .unwrap();
        assert_eq!(qubit_op, expected);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&QubitMappingType::BravyiKitaev).unwrap();
        assert_eq!(json, "\"bravyi_kitaev\"");
        assert_eq!(QubitMappingType::default(), QubitMappingType::Parity);
    }
}
