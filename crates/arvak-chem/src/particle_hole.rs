//! Optional particle-hole re-referencing.

use arvak_fermion::FermionicOperator;

use crate::config::TransformationType;
use crate::error::ChemResult;

/// Applies the particle-hole picture when configured.
#[derive(Debug, Clone, Copy)]
pub struct ParticleHoleStage {
    transformation: TransformationType,
    num_particles: [usize; 2],
}

impl ParticleHoleStage {
    /// Create the stage for the post-reduction particle counts.
    pub fn new(transformation: TransformationType, num_particles: [usize; 2]) -> Self {
        Self {
            transformation,
            num_particles,
        }
    }

    /// Whether the stage changes anything.
    pub fn is_active(&self) -> bool {
        self.transformation == TransformationType::ParticleHole
    }

    /// Particle counts the mapper should key the two-qubit reduction on.
    ///
    /// In the particle-hole picture the reference is the encoded vacuum, so
    /// the quasi-particle parities are both even.
    pub fn mapped_particles(&self) -> [usize; 2] {
        if self.is_active() { [0, 0] } else { self.num_particles }
    }

    /// Re-reference `op` and return it with the correction to add back,
    /// `⟨HF|op|HF⟩`. Identity with a zero correction in the full picture.
    pub fn apply(&self, op: FermionicOperator) -> ChemResult<(FermionicOperator, f64)> {
        if !self.is_active() {
            return Ok((op, 0.0));
        }
        let (transformed, raw_shift) = op.particle_hole_transformation(self.num_particles)?;
        Ok((transformed, -raw_shift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_full_is_identity() {
        let op = FermionicOperator::one_body(Array2::eye(4)).unwrap();
        let stage = ParticleHoleStage::new(TransformationType::Full, [1, 1]);
        let (out, shift) = stage.apply(op.clone()).unwrap();
        assert_eq!(out, op);
        assert_eq!(shift, 0.0);
        assert_eq!(stage.mapped_particles(), [1, 1]);
    }

    #[test]
    fn test_shift_is_reference_value() {
        // number operator: two electrons in the reference
        let op = FermionicOperator::one_body(Array2::eye(4)).unwrap();
        let stage = ParticleHoleStage::new(TransformationType::ParticleHole, [1, 1]);
        let (out, shift) = stage.apply(op).unwrap();
        assert!((shift - 2.0).abs() < 1e-12);
        assert!(out.reference().is_some());
        assert_eq!(stage.mapped_particles(), [0, 0]);
    }
}
