//! Tests for qubit encodings of fermionic operators.

use arvak_fermion::{FermionicOperator, QubitMappingType, hartree_fock_occupation, observables};
use arvak_pauli::Z2Symmetries;
use ndarray::{Array2, Array4};
use proptest::prelude::*;

const ENCODINGS: [QubitMappingType; 3] = [
    QubitMappingType::JordanWigner,
    QubitMappingType::Parity,
    QubitMappingType::BravyiKitaev,
];

/// Two spatial orbitals, four spin-orbitals, restricted integrals.
fn two_orbital_hamiltonian() -> FermionicOperator {
    let h_spatial = [[-1.25, 0.1], [0.1, -0.47]];
    let eri = |p: usize, q: usize, r: usize, s: usize| -> f64 {
        match (p == q, r == s) {
            (true, true) if p == r => 0.67,
            (true, true) => 0.66,
            _ if (p, q) == (r, s) || (p, q) == (s, r) => 0.18,
            _ => 0.0,
        }
    };
    let n = 2;
    let modes = 2 * n;
    let h1 = Array2::from_shape_fn((modes, modes), |(p, q)| {
        if p / n == q / n { h_spatial[p % n][q % n] } else { 0.0 }
    });
    let h2 = Array4::from_shape_fn((modes, modes, modes, modes), |(p, q, r, s)| {
        if p / n == q / n && r / n == s / n {
            0.5 * eri(p % n, q % n, r % n, s % n)
        } else {
            0.0
        }
    });
    FermionicOperator::new(h1, h2).unwrap()
}

fn qubit_expectation(op: &FermionicOperator, map_type: QubitMappingType, occ: &[bool]) -> f64 {
    let qubit_op = op.mapping(map_type, 1e-8).unwrap();
    qubit_op
        .diagonal_expectation(&map_type.encode_occupations(occ))
        .unwrap()
        .re
}

// ---------------------------------------------------------------------------
// Determinant expectations
// ---------------------------------------------------------------------------

#[test]
fn encodings_reproduce_hf_energy() {
    let h = two_orbital_hamiltonian();
    let occ = hartree_fock_occupation(4, [1, 1]).unwrap();
    let hf = h.hartree_fock_energy(&occ).unwrap();
    for map_type in ENCODINGS {
        let value = qubit_expectation(&h, map_type, &occ);
        assert!((value - hf).abs() < 1e-10, "{map_type}: {value} vs {hf}");
    }
}

#[test]
fn encodings_agree_on_observables() {
    let occ = [true, true, false, true, false, false];
    let n = observables::total_particle_number(6).unwrap();
    let sz = observables::total_magnetization(6).unwrap();
    let s2 = observables::total_angular_momentum(6).unwrap();
    for map_type in ENCODINGS {
        assert!((qubit_expectation(&n, map_type, &occ) - 3.0).abs() < 1e-10);
        assert!((qubit_expectation(&sz, map_type, &occ) - 0.5).abs() < 1e-10);
        assert!((qubit_expectation(&s2, map_type, &occ) - 0.75).abs() < 1e-10);
    }
}

#[test]
fn mapped_hamiltonian_is_hermitian() {
    let h = two_orbital_hamiltonian();
    for map_type in ENCODINGS {
        let qubit_op = h.mapping(map_type, 1e-8).unwrap();
        assert!(qubit_op.terms().iter().all(|t| t.coeff.im.abs() < 1e-12));
    }
}

#[test]
fn constant_becomes_identity_term() {
    let op = FermionicOperator::one_body(Array2::zeros((2, 2)))
        .unwrap()
        .with_constant(0.7);
    let qubit_op = op.mapping(QubitMappingType::Parity, 1e-8).unwrap();
    assert_eq!(qubit_op.n_terms(), 1);
    assert!((qubit_op.identity_coefficient().re - 0.7).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Particle-hole picture
// ---------------------------------------------------------------------------

#[test]
fn particle_hole_reference_is_encoded_vacuum() {
    let h = two_orbital_hamiltonian();
    let (ph, shift) = h.particle_hole_transformation([1, 1]).unwrap();
    let hf = h.hartree_fock_energy(&hartree_fock_occupation(4, [1, 1]).unwrap()).unwrap();
    assert!((shift + hf).abs() < 1e-12);

    for map_type in ENCODINGS {
        let value = qubit_expectation(&ph, map_type, &[false; 4]);
        assert!(value.abs() < 1e-10, "{map_type}: {value}");
    }
}

#[test]
fn particle_hole_excited_determinant() {
    let h = two_orbital_hamiltonian();
    let (ph, _) = h.particle_hole_transformation([1, 1]).unwrap();
    let reference = ph.reference().unwrap().to_vec();
    let hf = h.hartree_fock_energy(&reference).unwrap();

    // alpha electron promoted from orbital 0 to orbital 1
    let excited = [false, true, true, false];
    let quasi: Vec<bool> = excited.iter().zip(&reference).map(|(a, b)| a ^ b).collect();
    let expected = h.hartree_fock_energy(&excited).unwrap() - hf;
    for map_type in ENCODINGS {
        let value = qubit_expectation(&ph, map_type, &quasi);
        assert!((value - expected).abs() < 1e-10, "{map_type}: {value} vs {expected}");
    }
}

// ---------------------------------------------------------------------------
// Parity two-qubit reduction
// ---------------------------------------------------------------------------

#[test]
fn two_qubit_reduction_preserves_hf_energy() {
    let h = two_orbital_hamiltonian();
    let occ = hartree_fock_occupation(4, [1, 1]).unwrap();
    let hf = h.hartree_fock_energy(&occ).unwrap();

    let qubit_op = h.mapping(QubitMappingType::Parity, 1e-8).unwrap();
    let reduced = Z2Symmetries::two_qubit_reduction(&qubit_op, [1, 1]).unwrap();
    assert_eq!(reduced.num_qubits(), 2);

    let bits = QubitMappingType::Parity.encode_occupations(&occ);
    let kept: Vec<bool> = bits
        .iter()
        .enumerate()
        .filter(|&(q, _)| q != 1 && q != 3)
        .map(|(_, &b)| b)
        .collect();
    let value = reduced.diagonal_expectation(&kept).unwrap().re;
    assert!((value - hf).abs() < 1e-10);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn sparse_tensor_entries() -> impl Strategy<Value = Vec<((usize, usize, usize, usize), f64)>> {
    proptest::collection::vec(((0..4usize, 0..4usize, 0..4usize, 0..4usize), -1.0f64..1.0), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn determinant_expectation_matches_in_every_encoding(
        entries in sparse_tensor_entries(),
        diag in proptest::collection::vec(-1.0f64..1.0, 4),
        occ in proptest::collection::vec(any::<bool>(), 4),
    ) {
        let h1 = Array2::from_diag(&ndarray::Array1::from(diag));
        let mut h2 = Array4::zeros((4, 4, 4, 4));
        for ((p, q, r, s), v) in entries {
            h2[[p, q, r, s]] += v;
        }
        let op = FermionicOperator::new(h1, h2).unwrap();
        let expected = op.hartree_fock_energy(&occ).unwrap();
        for map_type in ENCODINGS {
            let value = qubit_expectation(&op, map_type, &occ);
            prop_assert!((value - expected).abs() < 1e-6);
        }
    }
}
