//! Particle-number and spin observables over block-ordered spin-orbitals.

use ndarray::{Array2, Array4};

use crate::error::{FermionError, FermionResult};
use crate::operator::FermionicOperator;

/// `N = Σ_p n_p`.
pub fn total_particle_number(num_modes: usize) -> FermionResult<FermionicOperator> {
    FermionicOperator::one_body(Array2::eye(num_modes))
}

/// `S_z = ½ Σ_p (n_pα − n_pβ)`.
pub fn total_magnetization(num_modes: usize) -> FermionResult<FermionicOperator> {
    let half = half_modes(num_modes)?;
    let h1 = Array2::from_shape_fn((num_modes, num_modes), |(i, j)| match (i == j, i < half) {
        (true, true) => 0.5,
        (true, false) => -0.5,
        _ => 0.0,
    });
    FermionicOperator::one_body(h1)
}

/// `S² = S₋S₊ + S_z + S_z²`.
pub fn total_angular_momentum(num_modes: usize) -> FermionResult<FermionicOperator> {
    let half = half_modes(num_modes)?;
    let spin = |x: usize| if x < half { 1.0 } else { -1.0 };

    // ¾ n_x from S_z, S_z² and the n_β part of S₋S₊.
    let h1 = Array2::eye(num_modes) * 0.75;

    let mut h2 = Array4::zeros((num_modes, num_modes, num_modes, num_modes));
    for x in 0..num_modes {
        for y in 0..num_modes {
            if x != y {
                h2[[x, x, y, y]] += 0.25 * spin(x) * spin(y);
            }
        }
    }
    // −Σ a†_qβ a†_pα a_qα a_pβ
    for p in 0..half {
        for q in 0..half {
            h2[[q + half, p + half, p, q]] -= 1.0;
        }
    }
    FermionicOperator::new(h1, h2)
}

fn half_modes(num_modes: usize) -> FermionResult<usize> {
    if num_modes % 2 != 0 {
        return Err(FermionError::OddModeCount(num_modes));
    }
    Ok(num_modes / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect(op: &FermionicOperator, occ: &[bool]) -> f64 {
        op.hartree_fock_energy(occ).unwrap()
    }

    #[test]
    fn test_particle_number() {
        let n = total_particle_number(6).unwrap();
        assert_eq!(expect(&n, &[true, false, true, true, false, false]), 3.0);
    }

    #[test]
    fn test_magnetization() {
        let sz = total_magnetization(4).unwrap();
        assert_eq!(expect(&sz, &[true, true, false, false]), 1.0);
        assert_eq!(expect(&sz, &[true, false, true, false]), 0.0);
        assert!(matches!(total_magnetization(3), Err(FermionError::OddModeCount(3))));
    }

    #[test]
    fn test_s_squared_determinants() {
        let s2 = total_angular_momentum(4).unwrap();
        // closed-shell singlet
        assert!(expect(&s2, &[true, false, true, false]).abs() < 1e-12);
        // high-spin triplet
        assert!((expect(&s2, &[true, true, false, false]) - 2.0).abs() < 1e-12);
        // single electron: doublet
        assert!((expect(&s2, &[false, false, false, true]) - 0.75).abs() < 1e-12);
    }
}
