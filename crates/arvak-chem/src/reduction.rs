//! Orbital-space reduction.
//!
//! Requested spatial orbitals are split into occupied ones, which are frozen
//! and contribute an energy shift, and unoccupied ones, which are simply
//! removed. Freezing runs first, so removal indices are re-based on the
//! frozen alpha and beta counts.

use arvak_fermion::FermionicOperator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ChemResult;

/// Size and filling of the molecular orbital space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitalSpace {
    /// Spatial orbitals.
    pub num_orbitals: usize,
    /// Alpha electrons.
    pub num_alpha: usize,
    /// Beta electrons.
    pub num_beta: usize,
}

impl OrbitalSpace {
    /// Create an orbital space.
    pub fn new(num_orbitals: usize, num_alpha: usize, num_beta: usize) -> Self {
        Self {
            num_orbitals,
            num_alpha,
            num_beta,
        }
    }

    /// Spin-orbital count `2n`.
    pub fn num_spin_orbitals(&self) -> usize {
        2 * self.num_orbitals
    }

    /// `[num_alpha, num_beta]`.
    pub fn num_particles(&self) -> [usize; 2] {
        [self.num_alpha, self.num_beta]
    }
}

/// Spin-orbital indices to freeze and to remove.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionIndices {
    freeze_list: Vec<usize>,
    remove_list: Vec<usize>,
    removed_spin_orbitals: Vec<usize>,
    num_spin_orbitals: usize,
    num_particles: [usize; 2],
}

impl ReductionIndices {
    /// Indices to freeze, in the original spin-orbital space.
    pub fn freeze_list(&self) -> &[usize] {
        &self.freeze_list
    }

    /// Indices to remove, re-based after freezing.
    pub fn remove_list(&self) -> &[usize] {
        &self.remove_list
    }

    /// Indices to remove, in the original spin-orbital space.
    pub fn removed_spin_orbitals(&self) -> &[usize] {
        &self.removed_spin_orbitals
    }

    /// `[alpha, beta]` electrons left after freezing.
    pub fn num_particles(&self) -> [usize; 2] {
        self.num_particles
    }

    /// Spin-orbitals before reduction.
    pub fn num_spin_orbitals(&self) -> usize {
        self.num_spin_orbitals
    }

    /// Spin-orbitals left after freezing and removal.
    pub fn remaining_spin_orbitals(&self) -> usize {
        self.num_spin_orbitals - self.freeze_list.len() - self.remove_list.len()
    }

    /// True if nothing is frozen or removed.
    pub fn is_empty(&self) -> bool {
        self.freeze_list.is_empty() && self.remove_list.is_empty()
    }
}

/// Computes [`ReductionIndices`] from requested spatial orbitals.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexReducer;

impl IndexReducer {
    /// Combine the core list and the signed user list into freeze and
    /// remove lists.
    ///
    /// Negative user indices count from the top (`-1` is the highest
    /// orbital). Indices that remain outside `[0, n)` are ignored.
    pub fn compute(
        space: &OrbitalSpace,
        core_orbitals: &[usize],
        orbital_reduction: &[i64],
    ) -> ReductionIndices {
        let n = space.num_orbitals;
        let mut orbitals: Vec<usize> = core_orbitals
            .iter()
            .filter_map(|&c| i64::try_from(c).ok())
            .chain(orbital_reduction.iter().map(|&x| if x < 0 { x + n as i64 } else { x }))
            .filter_map(|x| usize::try_from(x).ok())
            .filter(|&x| x < n)
            .collect();
        orbitals.sort_unstable();
        orbitals.dedup();

        let mut indices = ReductionIndices {
            num_spin_orbitals: space.num_spin_orbitals(),
            num_particles: space.num_particles(),
            ..Default::default()
        };
        if orbitals.is_empty() {
            return indices;
        }

        let (freeze_alpha, remove_alpha): (Vec<usize>, Vec<usize>) =
            orbitals.iter().partition(|&&i| i < space.num_alpha);
        let (freeze_beta, remove_beta): (Vec<usize>, Vec<usize>) =
            orbitals.iter().partition(|&&i| i < space.num_beta);

        indices.freeze_list = freeze_alpha
            .iter()
            .copied()
            .chain(freeze_beta.iter().map(|&i| i + n))
            .collect();
        indices.removed_spin_orbitals = remove_alpha
            .iter()
            .copied()
            .chain(remove_beta.iter().map(|&i| i + n))
            .collect();

        let frozen_alpha = freeze_alpha.len();
        let frozen_beta = freeze_beta.len();
        indices.remove_list = remove_alpha
            .iter()
            .map(|&i| i - frozen_alpha)
            .chain(remove_beta.iter().map(|&i| i + n - frozen_alpha - frozen_beta))
            .collect();
        indices.num_particles = [space.num_alpha - frozen_alpha, space.num_beta - frozen_beta];

        let spin_orbitals: Vec<usize> = orbitals
            .iter()
            .copied()
            .chain(orbitals.iter().map(|&i| i + n))
            .collect();
        info!(orbitals = ?orbitals, "Combined orbital reduction list");
        info!(spin_orbitals = ?spin_orbitals, "Converting to spin orbital reduction list");
        info!(freeze_list = ?indices.freeze_list, "Freezing spin orbitals");
        info!(
            removed = ?indices.removed_spin_orbitals,
            remove_list = ?indices.remove_list,
            "Removing spin orbitals (indexes accounting for freeze)"
        );
        indices
    }
}

/// A fermionic operator after freezing and removal.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedOperator {
    /// Operator on the remaining modes.
    pub operator: FermionicOperator,
    /// Value banked by freezing.
    pub energy_shift: f64,
    /// Whether anything was frozen.
    pub did_shift: bool,
}

/// Applies [`ReductionIndices`] to fermionic operators.
#[derive(Debug, Clone, Copy)]
pub struct OperatorReducer<'a> {
    indices: &'a ReductionIndices,
}

impl<'a> OperatorReducer<'a> {
    /// Create a reducer for the given indices.
    pub fn new(indices: &'a ReductionIndices) -> Self {
        Self { indices }
    }

    /// Freeze, then eliminate.
    pub fn reduce(&self, op: &FermionicOperator) -> ChemResult<ReducedOperator> {
        let mut operator = op.clone();
        let mut energy_shift = 0.0;
        let mut did_shift = false;
        if !self.indices.freeze_list.is_empty() {
            let (frozen, shift) = operator.freeze_modes(&self.indices.freeze_list)?;
            operator = frozen;
            energy_shift = shift;
            did_shift = true;
        }
        if !self.indices.remove_list.is_empty() {
            operator = operator.eliminate_modes(&self.indices.remove_list)?;
        }
        debug!(
            num_modes = operator.num_modes(),
            energy_shift, did_shift, "Reduced fermionic operator"
        );
        Ok(ReducedOperator {
            operator,
            energy_shift,
            did_shift,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_candidates() {
        let space = OrbitalSpace::new(4, 2, 2);
        let indices = IndexReducer::compute(&space, &[], &[]);
        assert!(indices.is_empty());
        assert_eq!(indices.num_particles(), [2, 2]);
        assert_eq!(indices.remaining_spin_orbitals(), 8);
    }

    #[test]
    fn test_core_and_virtual() {
        // 5 orbitals, 2+2 electrons, freeze core 0, remove top orbital
        let space = OrbitalSpace::new(5, 2, 2);
        let indices = IndexReducer::compute(&space, &[0], &[-1]);
        assert_eq!(indices.freeze_list(), &[0, 5]);
        assert_eq!(indices.removed_spin_orbitals(), &[4, 9]);
        // alpha 4 - 1 = 3, beta 4 - 1 - 1 + 5 = 7
        assert_eq!(indices.remove_list(), &[3, 7]);
        assert_eq!(indices.num_particles(), [1, 1]);
        assert_eq!(indices.remaining_spin_orbitals(), 6);
    }

    #[test]
    fn test_open_shell_split() {
        // orbital 1 is occupied for alpha only
        let space = OrbitalSpace::new(3, 2, 1);
        let indices = IndexReducer::compute(&space, &[], &[1]);
        assert_eq!(indices.freeze_list(), &[1]);
        assert_eq!(indices.removed_spin_orbitals(), &[4]);
        assert_eq!(indices.remove_list(), &[3]);
        assert_eq!(indices.num_particles(), [1, 1]);
    }

    #[test]
    fn test_out_of_range_dropped() {
        let space = OrbitalSpace::new(3, 1, 1);
        let indices = IndexReducer::compute(&space, &[7], &[-9, 3]);
        assert!(indices.is_empty());
    }
}
