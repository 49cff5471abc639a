//! Hartree-Fock reference state in the qubit basis.

use arvak_fermion::{QubitMappingType, hartree_fock_occupation};

use crate::error::ChemResult;

/// Block-ordered Hartree-Fock determinant encoded on qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HartreeFock {
    bits: Vec<bool>,
}

impl HartreeFock {
    /// Encode the determinant with `num_particles` electrons on
    /// `num_spin_orbitals` modes.
    ///
    /// With the parity two-qubit reduction the bits of qubits `n/2 - 1` and
    /// `n - 1` are dropped.
    pub fn new(
        num_spin_orbitals: usize,
        num_particles: [usize; 2],
        mapping: QubitMappingType,
        two_qubit_reduction: bool,
    ) -> ChemResult<Self> {
        let occupied = hartree_fock_occupation(num_spin_orbitals, num_particles)?;
        let mut bits = mapping.encode_occupations(&occupied);
        let n = bits.len();
        if two_qubit_reduction && mapping == QubitMappingType::Parity && n >= 2 {
            bits.remove(n - 1);
            bits.remove(n / 2 - 1);
        }
        Ok(Self { bits })
    }

    /// Value of every qubit, indexed by qubit.
    pub fn qubit_bits(&self) -> &[bool] {
        &self.bits
    }

    /// Bit string with the most significant qubit first; its last entry is
    /// qubit 0.
    pub fn bitstr(&self) -> Vec<bool> {
        self.bits.iter().rev().copied().collect()
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.bits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jordan_wigner() {
        let hf = HartreeFock::new(4, [1, 1], QubitMappingType::JordanWigner, false).unwrap();
        assert_eq!(hf.qubit_bits(), &[true, false, true, false]);
        assert_eq!(hf.bitstr(), vec![false, true, false, true]);
    }

    #[test]
    fn test_parity_reduced() {
        // occupations (1, 0, 1, 0) -> parities (1, 1, 0, 0) -> drop qubits 1 and 3
        let hf = HartreeFock::new(4, [1, 1], QubitMappingType::Parity, true).unwrap();
        assert_eq!(hf.qubit_bits(), &[true, false]);
        assert_eq!(hf.num_qubits(), 2);
    }
}
