//! Second-quantized fermionic operators.
//!
//! A [`FermionicOperator`] over `n` spin-orbitals holds a one-body tensor
//! `h1` and a two-body tensor `h2` in chemist ordering:
//!
//!   H = Σ h1[p,q] a†p aq  +  Σ h2[p,q,r,s] a†p a†r as aq  +  constant
//!
//! Spin-orbitals are block ordered: modes `0..n/2` are alpha, `n/2..n` beta.
//!
//! After [`FermionicOperator::particle_hole_transformation`] the operator
//! carries a reference determinant. The tensors keep their meaning; the
//! qubit encoding swaps creation and annihilation on the reference-occupied
//! modes, so the reference becomes the encoded vacuum.

use ndarray::{Array2, Array4, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FermionError, FermionResult};

/// One- and two-body fermionic Hamiltonian over spin-orbitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FermionicOperator {
    h1: Array2<f64>,
    h2: Array4<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<Vec<bool>>,
    #[serde(default)]
    constant: f64,
}

impl FermionicOperator {
    /// Build from one- and two-body tensors over the same mode count.
    pub fn new(h1: Array2<f64>, h2: Array4<f64>) -> FermionResult<Self> {
        let n = h1.nrows();
        if h1.ncols() != n {
            return Err(FermionError::ShapeMismatch {
                tensor: "h1",
                shape: h1.shape().to_vec(),
                expected: vec![n, n],
            });
        }
        if h2.shape() != [n, n, n, n] {
            return Err(FermionError::ShapeMismatch {
                tensor: "h2",
                shape: h2.shape().to_vec(),
                expected: vec![n; 4],
            });
        }
        Ok(Self {
            h1,
            h2,
            reference: None,
            constant: 0.0,
        })
    }

    /// A purely one-body operator.
    pub fn one_body(h1: Array2<f64>) -> FermionResult<Self> {
        let n = h1.nrows();
        Self::new(h1, Array4::zeros((n, n, n, n)))
    }

    /// Add a scalar term.
    #[must_use]
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Number of spin-orbitals.
    pub fn num_modes(&self) -> usize {
        self.h1.nrows()
    }

    /// One-body tensor.
    pub fn h1(&self) -> &Array2<f64> {
        &self.h1
    }

    /// Two-body tensor.
    pub fn h2(&self) -> &Array4<f64> {
        &self.h2
    }

    /// Reference determinant of the particle-hole picture.
    pub fn reference(&self) -> Option<&[bool]> {
        self.reference.as_deref()
    }

    /// Scalar term.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    fn check_modes(&self, modes: &[usize]) -> FermionResult<()> {
        let n = self.num_modes();
        match modes.iter().find(|&&m| m >= n) {
            Some(&mode) => Err(FermionError::ModeOutOfRange { mode, num_modes: n }),
            None => Ok(()),
        }
    }

    fn complement(&self, modes: &[usize]) -> Vec<usize> {
        (0..self.num_modes()).filter(|m| !modes.contains(m)).collect()
    }

    fn select(&self, keep: &[usize], h1: &Array2<f64>, h2: Array4<f64>) -> Self {
        let reference = self
            .reference
            .as_ref()
            .map(|r| keep.iter().map(|&m| r[m]).collect());
        Self {
            h1: h1.select(Axis(0), keep).select(Axis(1), keep),
            h2,
            reference,
            constant: self.constant,
        }
    }

    /// Fix the listed modes as occupied and project them out.
    ///
    /// Two-body terms touching frozen modes contract into one-body terms or
    /// into the returned energy shift; the shift then gains the frozen
    /// diagonal of the one-body tensor. Surviving modes keep their order.
    pub fn freeze_modes(&self, frozen: &[usize]) -> FermionResult<(Self, f64)> {
        self.check_modes(frozen)?;
        let n = self.num_modes();
        let mut is_frozen = vec![false; n];
        for &m in frozen {
            is_frozen[m] = true;
        }
        let keep = self.complement(frozen);
        let mut new_index = vec![0usize; n];
        for (k, &m) in keep.iter().enumerate() {
            new_index[m] = k;
        }
        let f = |m: usize| is_frozen[m];

        let m = keep.len();
        let mut h1 = self.h1.clone();
        let mut h2 = Array4::zeros((m, m, m, m));
        let mut shift = 0.0;

        for ((p, q, r, s), &h) in self.h2.indexed_iter() {
            if h == 0.0 {
                continue;
            }
            match (f(p), f(r)) {
                (false, false) => {
                    if !f(q) && !f(s) {
                        h2[[new_index[p], new_index[q], new_index[r], new_index[s]]] = h;
                    }
                }
                (true, false) => {
                    if p == s && !f(q) {
                        h1[[r, q]] -= h;
                    } else if p == q && !f(s) {
                        h1[[r, s]] += h;
                    }
                }
                (true, true) => {
                    if p == r {
                        continue;
                    }
                    if f(q) && p == s && r == q {
                        shift -= h;
                    } else if f(s) && p == q && r == s {
                        shift += h;
                    }
                }
                (false, true) => {
                    if r == s && !f(q) {
                        h1[[p, q]] += h;
                    } else if r == q && !f(s) {
                        h1[[p, s]] -= h;
                    }
                }
            }
        }

        shift += frozen.iter().map(|&i| h1[[i, i]]).sum::<f64>();
        debug!(num_frozen = frozen.len(), energy_shift = shift, "Froze fermionic modes");
        Ok((self.select(&keep, &h1, h2), shift))
    }

    /// Drop the listed modes without any shift.
    pub fn eliminate_modes(&self, removed: &[usize]) -> FermionResult<Self> {
        self.check_modes(removed)?;
        let keep = self.complement(removed);
        let h2 = self
            .h2
            .select(Axis(0), &keep)
            .select(Axis(1), &keep)
            .select(Axis(2), &keep)
            .select(Axis(3), &keep);
        debug!(num_removed = removed.len(), "Eliminated fermionic modes");
        Ok(self.select(&keep, &self.h1, h2))
    }

    /// `⟨D|H|D⟩` for the determinant with the given occupations.
    pub fn hartree_fock_energy(&self, occupied: &[bool]) -> FermionResult<f64> {
        let n = self.num_modes();
        if occupied.len() != n {
            return Err(FermionError::OccupationLength {
                expected: n,
                got: occupied.len(),
            });
        }
        let occ: Vec<usize> = (0..n).filter(|&i| occupied[i]).collect();
        let mut energy = self.constant;
        for &i in &occ {
            energy += self.h1[[i, i]];
            for &j in &occ {
                energy += self.h2[[i, i, j, j]] - self.h2[[i, j, j, i]];
            }
        }
        Ok(energy)
    }

    /// Re-reference the operator on the Hartree-Fock determinant.
    ///
    /// Returns the new operator, whose reference expectation is zero, and the
    /// raw shift `-⟨HF|H|HF⟩`.
    pub fn particle_hole_transformation(
        &self,
        num_particles: [usize; 2],
    ) -> FermionResult<(Self, f64)> {
        if self.reference.is_some() {
            return Err(FermionError::ParticleHoleApplied);
        }
        let occupied = hartree_fock_occupation(self.num_modes(), num_particles)?;
        let hf = self.hartree_fock_energy(&occupied)?;
        let op = Self {
            h1: self.h1.clone(),
            h2: self.h2.clone(),
            reference: Some(occupied),
            constant: self.constant - hf,
        };
        debug!(hf_energy = hf, "Particle-hole transformation");
        Ok((op, -hf))
    }
}

/// Occupations of the block-ordered Hartree-Fock determinant: alpha modes
/// `0..na` and beta modes `n/2..n/2+nb`.
pub fn hartree_fock_occupation(
    num_modes: usize,
    num_particles: [usize; 2],
) -> FermionResult<Vec<bool>> {
    if num_modes % 2 != 0 {
        return Err(FermionError::OddModeCount(num_modes));
    }
    let half = num_modes / 2;
    let [num_alpha, num_beta] = num_particles;
    if num_alpha > half || num_beta > half {
        return Err(FermionError::TooManyParticles {
            num_alpha,
            num_beta,
            num_orbitals: half,
        });
    }
    Ok((0..num_modes)
        .map(|i| if i < half { i < num_alpha } else { i - half < num_beta })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_checks() {
        let h1 = Array2::zeros((2, 3));
        assert!(matches!(
            FermionicOperator::one_body(h1),
            Err(FermionError::ShapeMismatch { tensor: "h1", .. })
        ));
        let err = FermionicOperator::new(Array2::zeros((2, 2)), Array4::zeros((2, 2, 2, 3)));
        assert!(matches!(err, Err(FermionError::ShapeMismatch { tensor: "h2", .. })));
    }

    #[test]
    fn test_occupation_layout() {
        let occ = hartree_fock_occupation(6, [2, 1]).unwrap();
        assert_eq!(occ, vec![true, true, false, true, false, false]);
        assert!(hartree_fock_occupation(5, [1, 1]).is_err());
        assert!(hartree_fock_occupation(4, [3, 0]).is_err());
    }

    #[test]
    fn test_freeze_one_body_only() {
        let h1 =
            Array2::from_shape_fn((3, 3), |(i, j)| if i == j { -(i as f64 + 1.0) } else { 0.1 });
        let op = FermionicOperator::one_body(h1).unwrap();
        let (frozen, shift) = op.freeze_modes(&[1]).unwrap();
        assert_eq!(frozen.num_modes(), 2);
        assert!((shift + 2.0).abs() < 1e-12);
        assert_eq!(frozen.h1()[[0, 1]], 0.1);
        assert_eq!(frozen.h1()[[1, 1]], -3.0);
    }

    #[test]
    fn test_freeze_mean_field() {
        // n0 n1 density interaction between modes 0 and 1, with mode 0 frozen,
        // becomes a one-body term on mode 1.
        let mut h2 = Array4::zeros((2, 2, 2, 2));
        h2[[0, 0, 1, 1]] = 0.5;
        h2[[1, 1, 0, 0]] = 0.5;
        let op = FermionicOperator::new(Array2::zeros((2, 2)), h2).unwrap();
        let (frozen, shift) = op.freeze_modes(&[0]).unwrap();
        assert_eq!(shift, 0.0);
        assert!((frozen.h1()[[0, 0]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_freeze_matches_hf_energy() {
        let mut h2 = Array4::zeros((3, 3, 3, 3));
        h2[[0, 0, 1, 1]] = 0.3;
        h2[[1, 1, 0, 0]] = 0.3;
        h2[[0, 1, 1, 0]] = 0.1;
        h2[[1, 0, 0, 1]] = 0.1;
        h2[[0, 0, 2, 2]] = 0.2;
        h2[[2, 2, 0, 0]] = 0.2;
        let h1 = Array2::from_diag(&ndarray::arr1(&[-1.0, -0.5, 0.4]));
        let op = FermionicOperator::new(h1, h2).unwrap();

        let (frozen, shift) = op.freeze_modes(&[0, 1]).unwrap();
        let hf_full = op.hartree_fock_energy(&[true, true, false]).unwrap();
        let hf_reduced = frozen.hartree_fock_energy(&[false]).unwrap();
        assert!((shift + hf_reduced - hf_full).abs() < 1e-12);

        let hf_full = op.hartree_fock_energy(&[true, true, true]).unwrap();
        let hf_reduced = frozen.hartree_fock_energy(&[true]).unwrap();
        assert!((shift + hf_reduced - hf_full).abs() < 1e-12);
    }

    #[test]
    fn test_eliminate_keeps_order() {
        let h1 = Array2::from_shape_fn((3, 3), |(i, j)| (10 * i + j) as f64);
        let op = FermionicOperator::one_body(h1).unwrap();
        let reduced = op.eliminate_modes(&[1]).unwrap();
        assert_eq!(reduced.h1()[[0, 1]], 2.0);
        assert_eq!(reduced.h1()[[1, 0]], 20.0);
        assert!(matches!(
            op.eliminate_modes(&[3]),
            Err(FermionError::ModeOutOfRange { mode: 3, num_modes: 3 })
        ));
    }

    #[test]
    fn test_particle_hole_twice() {
        let op = FermionicOperator::one_body(Array2::eye(4)).unwrap();
        let (ph, shift) = op.particle_hole_transformation([1, 1]).unwrap();
        assert_eq!(shift, -2.0);
        assert_eq!(ph.reference(), Some(&[true, false, true, false][..]));
        assert!(ph.hartree_fock_energy(&[true, false, true, false]).unwrap().abs() < 1e-12);
        assert!(matches!(
            ph.particle_hole_transformation([1, 1]),
            Err(FermionError::ParticleHoleApplied)
        ));
    }
}
