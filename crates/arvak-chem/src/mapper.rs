//! Fermion-to-qubit mapping with the optional parity two-qubit reduction.

use arvak_fermion::{FermionicOperator, QubitMappingType};
use arvak_pauli::{PauliSumOp, Z2Symmetries};
use tracing::debug;

use crate::error::ChemResult;

/// Weights below this are dropped after mapping and tapering.
pub const MAPPING_THRESHOLD: f64 = 1e-8;

/// Maps reduced fermionic operators to qubit operators.
#[derive(Debug, Clone, Copy)]
pub struct QubitMapper {
    mapping: QubitMappingType,
    two_qubit_reduction: bool,
    num_particles: [usize; 2],
}

impl QubitMapper {
    /// Create a mapper. `num_particles` keys the two-qubit reduction.
    pub fn new(
        mapping: QubitMappingType,
        two_qubit_reduction: bool,
        num_particles: [usize; 2],
    ) -> Self {
        Self {
            mapping,
            two_qubit_reduction,
            num_particles,
        }
    }

    /// The encoding in use.
    pub fn mapping(&self) -> QubitMappingType {
        self.mapping
    }

    /// True only for parity with the reduction enabled.
    pub fn reduces_two_qubits(&self) -> bool {
        self.two_qubit_reduction && self.mapping == QubitMappingType::Parity
    }

    /// Encode `op`, chop, and drop the two parity qubits if configured.
    pub fn map(&self, op: &FermionicOperator) -> ChemResult<PauliSumOp> {
        let mut qubit_op = op.mapping(self.mapping, MAPPING_THRESHOLD)?;
        if self.reduces_two_qubits() {
            qubit_op = Z2Symmetries::two_qubit_reduction(&qubit_op, self.num_particles)?;
        }
        debug!(
            mapping = %self.mapping,
            num_paulis = qubit_op.n_terms(),
            num_qubits = qubit_op.num_qubits(),
            max_weight = qubit_op.terms().iter().map(|t| t.pauli.weight()).max().unwrap_or(0),
            "Mapped to qubit operator"
        );
        Ok(qubit_op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arvak_fermion::observables;

    #[test]
    fn test_qubit_counts() {
        let op = observables::total_particle_number(6).unwrap();
        for (mapping, expected) in [
            (QubitMappingType::JordanWigner, 6),
            (QubitMappingType::BravyiKitaev, 6),
            (QubitMappingType::Parity, 4),
        ] {
            let mapper = QubitMapper::new(mapping, true, [1, 1]);
            assert_eq!(mapper.map(&op).unwrap().num_qubits(), expected, "{mapping}");
        }
        let mapper = QubitMapper::new(QubitMappingType::Parity, false, [1, 1]);
        assert_eq!(mapper.map(&op).unwrap().num_qubits(), 6);
    }
}
