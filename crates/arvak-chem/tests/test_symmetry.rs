//! Tests for Z2 symmetry reduction of mapped operators.

use arvak_chem::{
    AuxOperator, ChemError, HartreeFock, MolecularData, SymmetryReducer, SymmetryState,
    Z2SymmetryReduction,
};
use arvak_fermion::{FermionicOperator, QubitMappingType};
use arvak_pauli::{Pauli, PauliSumOp};
use ndarray::{Array2, Array4};
use num_complex::Complex64;

/// Two spatial orbitals; the off-diagonal one-body term leaves only the
/// alpha and beta number parities as symmetries.
fn jordan_wigner_hamiltonian() -> PauliSumOp {
    let h = Array2::from_shape_vec((2, 2), vec![-1.25, 0.1, 0.1, -0.47]).unwrap();
    let eri = Array4::from_shape_fn((2, 2, 2, 2), |(p, q, r, s)| match (p == q, r == s) {
        (true, true) if p == r => 0.67,
        (true, true) => 0.66,
        _ if (p, q) == (r, s) || (p, q) == (s, r) => 0.18,
        _ => 0.0,
    });
    let molecule = MolecularData::from_spatial_integrals(&h, &eri, 1, 1).unwrap();
    FermionicOperator::new(molecule.one_body_integrals, molecule.two_body_integrals)
        .unwrap()
        .mapping(QubitMappingType::JordanWigner, 1e-8)
        .unwrap()
}

fn hf_bitstr() -> Vec<bool> {
    HartreeFock::new(4, [1, 1], QubitMappingType::JordanWigner, false)
        .unwrap()
        .bitstr()
}

fn coefficient(op: &PauliSumOp, pauli: &Pauli) -> Complex64 {
    op.terms()
        .iter()
        .filter(|t| &t.pauli == pauli)
        .map(|t| t.coeff)
        .sum()
}

// ---------------------------------------------------------------------------
// Tapering
// ---------------------------------------------------------------------------

#[test]
fn two_generators_taper_two_qubits() {
    let op = jordan_wigner_hamiltonian();
    let outcome = SymmetryReducer::new(Some(&Z2SymmetryReduction::Auto), hf_bitstr())
        .reduce(op, vec![])
        .unwrap();

    assert_eq!(outcome.state, SymmetryState::Tapered);
    assert_eq!(outcome.z2_symmetries.len(), 2);
    assert_eq!(outcome.qubit_op.num_qubits(), 2);
    let values = outcome.z2_symmetries.tapering_values().unwrap();
    assert_eq!(values.len(), 2);
    assert!(values.iter().all(|v| *v == 1 || *v == -1));
}

#[test]
fn auto_sector_matches_reference_eigenvalues() {
    let op = jordan_wigner_hamiltonian();
    let outcome = SymmetryReducer::new(Some(&Z2SymmetryReduction::Auto), hf_bitstr())
        .reduce(op, vec![])
        .unwrap();

    // qubit-indexed reference: qubits 0 and 2 occupied
    let qubit_bits = [true, false, true, false];
    let z2 = &outcome.z2_symmetries;
    for (sym, &value) in z2.symmetries().iter().zip(z2.tapering_values().unwrap()) {
        let odd = sym.z().iter().zip(&qubit_bits).filter(|&(&z, &b)| z && b).count() % 2 == 1;
        assert_eq!(value, if odd { -1 } else { 1 }, "{sym}");
    }
}

#[test]
fn tapered_trace_matches_sector_projection() {
    let op = jordan_wigner_hamiltonian();
    let outcome = SymmetryReducer::new(Some(&Z2SymmetryReduction::Auto), hf_bitstr())
        .reduce(op.clone(), vec![])
        .unwrap();
    let z2 = &outcome.z2_symmetries;
    let [s1, s2] = [&z2.symmetries()[0], &z2.symmetries()[1]];
    let [v1, v2] = [
        f64::from(z2.tapering_values().unwrap()[0]),
        f64::from(z2.tapering_values().unwrap()[1]),
    ];
    let (phase, s12) = s1.compose(s2).unwrap();

    let expected = coefficient(&op, &Pauli::identity(4))
        + v1 * coefficient(&op, s1)
        + v2 * coefficient(&op, s2)
        + v1 * v2 * phase * coefficient(&op, &s12);
    let value = outcome.qubit_op.identity_coefficient();
    assert!((value - expected).norm() < 1e-10, "{value} vs {expected}");
}

#[test]
fn tapering_is_deterministic_and_chopped() {
    let run = || {
        SymmetryReducer::new(Some(&Z2SymmetryReduction::Auto), hf_bitstr())
            .reduce(jordan_wigner_hamiltonian(), vec![])
            .unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.qubit_op, b.qubit_op);
    assert_eq!(a.z2_symmetries, b.z2_symmetries);
    assert_eq!(a.qubit_op.chop(1e-8), a.qubit_op);
}

#[test]
fn explicit_values_select_sector() {
    let op = jordan_wigner_hamiltonian();
    let request = Z2SymmetryReduction::TaperingValues(vec![1, -1]);
    let outcome = SymmetryReducer::new(Some(&request), vec![])
        .reduce(op, vec![])
        .unwrap();
    assert_eq!(outcome.z2_symmetries.tapering_values(), Some(&[1i8, -1][..]));
}

// ---------------------------------------------------------------------------
// Pass-through and errors
// ---------------------------------------------------------------------------

#[test]
fn symmetry_free_operator_passes_through() {
    let op = PauliSumOp::from_list(&[
        ("X", Complex64::new(0.3, 0.0)),
        ("Z", Complex64::new(-0.7, 0.0)),
    ])
    .unwrap();
    let aux = PauliSumOp::from_list(&[("Y", Complex64::new(1.0, 0.0))]).unwrap();
    let outcome = SymmetryReducer::new(Some(&Z2SymmetryReduction::Auto), vec![false])
        .reduce(op.clone(), vec![aux.clone()])
        .unwrap();
    assert_eq!(outcome.state, SymmetryState::Trivial);
    assert_eq!(outcome.qubit_op, op);
    assert_eq!(outcome.aux_ops, vec![AuxOperator::Present(aux)]);
    assert!(outcome.z2_symmetries.is_empty());
}

#[test]
fn wrong_length_values_rejected() {
    let request = Z2SymmetryReduction::TaperingValues(vec![1, 1, 1]);
    let err = SymmetryReducer::new(Some(&request), vec![])
        .reduce(jordan_wigner_hamiltonian(), vec![])
        .unwrap_err();
    assert!(matches!(err, ChemError::TaperingValuesLength { expected: 2, got: 3 }));
}

#[test]
fn non_unit_values_rejected() {
    let request = Z2SymmetryReduction::TaperingValues(vec![1, 0]);
    let err = SymmetryReducer::new(Some(&request), vec![])
        .reduce(jordan_wigner_hamiltonian(), vec![])
        .unwrap_err();
    assert!(matches!(err, ChemError::InvalidTaperingValues(ref v) if v == &vec![1, 0]));
}

#[test]
fn symmetry_breaking_aux_is_discarded() {
    let op = jordan_wigner_hamiltonian();
    let breaking = PauliSumOp::from_list(&[("IIIX", Complex64::new(1.0, 0.0))]).unwrap();
    let outcome = SymmetryReducer::new(Some(&Z2SymmetryReduction::Auto), hf_bitstr())
        .reduce(op.clone(), vec![op, breaking])
        .unwrap();
    assert!(matches!(outcome.aux_ops[0], AuxOperator::Present(ref a) if a.num_qubits() == 2));
    assert!(outcome.aux_ops[1].is_discarded());
    assert_eq!(outcome.aux_ops[0].as_op(), Some(&outcome.qubit_op));
}
