//! The fermionic-to-qubit transformation pipeline.

use std::fmt;

use arvak_fermion::{FermionicOperator, observables};
use arvak_pauli::{PauliSumOp, Z2Symmetries};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::TransformationConfig;
use crate::error::ChemResult;
use crate::mapper::QubitMapper;
use crate::molecule::{Driver, MolecularData};
use crate::particle_hole::ParticleHoleStage;
use crate::reduction::{IndexReducer, OperatorReducer, OrbitalSpace, ReductionIndices};
use crate::reference::HartreeFock;
use crate::result::{ResultInterpreter, ShiftLedger, ShiftPair};
use crate::symmetry::{AuxOperator, SymmetryReducer, SymmetryState};

/// Fixed auxiliary operator slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxiliaryKind {
    /// Total particle number, slot 0.
    NumParticles,
    /// Total angular momentum `S²`, slot 1.
    AngularMomentum,
    /// Magnetization `S_z`, slot 2.
    Magnetization,
    /// Dipole x, slot 3.
    DipoleX,
    /// Dipole y, slot 4.
    DipoleY,
    /// Dipole z, slot 5.
    DipoleZ,
}

impl AuxiliaryKind {
    /// All slots in order.
    pub const ALL: [AuxiliaryKind; 6] = [
        Self::NumParticles,
        Self::AngularMomentum,
        Self::Magnetization,
        Self::DipoleX,
        Self::DipoleY,
        Self::DipoleZ,
    ];

    /// Position in the auxiliary list.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::NumParticles => "Number of Particles",
            Self::AngularMomentum => "S^2",
            Self::Magnetization => "Magnetization",
            Self::DipoleX => "Dipole x",
            Self::DipoleY => "Dipole y",
            Self::DipoleZ => "Dipole z",
        }
    }

    fn is_dipole(self) -> bool {
        matches!(self, Self::DipoleX | Self::DipoleY | Self::DipoleZ)
    }
}

impl fmt::Display for AuxiliaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Problem size after reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeInfo {
    /// `[alpha, beta]` electrons left for the qubit problem.
    pub num_particles: [usize; 2],
    /// Spin-orbitals left for the qubit problem.
    pub num_orbitals: usize,
    /// Whether the parity two-qubit reduction was applied.
    pub two_qubit_reduction: bool,
    /// Symmetries used for tapering, empty if none.
    pub z2_symmetries: Z2Symmetries,
}

/// Output of [`FermionicTransformation::transform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedProblem {
    /// Qubit Hamiltonian.
    pub qubit_op: PauliSumOp,
    /// Auxiliary operators by [`AuxiliaryKind`] slot.
    pub aux_ops: Vec<AuxOperator>,
    /// Reduced problem description.
    pub molecule_info: MoleculeInfo,
    /// Where symmetry processing ended.
    pub symmetry_state: SymmetryState,
    /// Maps solver output back to the molecule.
    pub interpreter: ResultInterpreter,
}

impl TransformedProblem {
    /// Number of qubits of the Hamiltonian.
    pub fn num_qubits(&self) -> usize {
        self.qubit_op.num_qubits()
    }

    /// Auxiliary operator of the given kind, if built and not discarded.
    pub fn aux_op(&self, kind: AuxiliaryKind) -> Option<&PauliSumOp> {
        self.aux_ops.get(kind.slot()).and_then(AuxOperator::as_op)
    }
}

/// Turns molecular data into a qubit problem.
#[derive(Debug, Clone, Default)]
pub struct FermionicTransformation {
    config: TransformationConfig,
}

/// Stages shared by the Hamiltonian and every auxiliary.
struct Pipeline<'a> {
    reducer: OperatorReducer<'a>,
    particle_hole: ParticleHoleStage,
    mapper: QubitMapper,
}

impl Pipeline<'_> {
    fn run(&self, op: &FermionicOperator) -> ChemResult<(PauliSumOp, ShiftPair, bool)> {
        let reduced = self.reducer.reduce(op)?;
        let (operator, ph_shift) = self.particle_hole.apply(reduced.operator)?;
        let qubit_op = self.mapper.map(&operator)?;
        Ok((
            qubit_op,
            ShiftPair::new(reduced.energy_shift, ph_shift),
            reduced.did_shift,
        ))
    }
}

impl FermionicTransformation {
    /// Create a transformation with the given configuration.
    pub fn new(config: TransformationConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    /// Run `driver` and transform its output.
    pub fn transform_driver(&self, driver: &dyn Driver) -> ChemResult<TransformedProblem> {
        debug!(driver = driver.name(), "Running driver");
        let molecule = driver.run()?;
        self.transform(&molecule)
    }

    /// Reduce, map and taper the molecular Hamiltonian and its auxiliaries.
    #[instrument(skip(self, molecule), fields(num_orbitals = molecule.num_orbitals))]
    pub fn transform(&self, molecule: &MolecularData) -> ChemResult<TransformedProblem> {
        molecule.validate()?;
        debug!(dipoles = molecule.has_dipole_integrals(), "Processing started");
        let config = &self.config;

        let space = OrbitalSpace::new(molecule.num_orbitals, molecule.num_alpha, molecule.num_beta);
        let core: &[usize] = if config.freeze_core {
            info!(core_orbitals = ?molecule.core_orbitals, "Freeze_core specified");
            &molecule.core_orbitals
        } else {
            &[]
        };
        if !config.orbital_reduction.is_empty() {
            info!(
                orbital_reduction = ?config.orbital_reduction,
                "Configured orbital reduction list"
            );
        }
        let indices = IndexReducer::compute(&space, core, &config.orbital_reduction);

        let particle_hole = ParticleHoleStage::new(config.transformation, indices.num_particles());
        let pipeline = Pipeline {
            reducer: OperatorReducer::new(&indices),
            particle_hole,
            mapper: QubitMapper::new(
                config.qubit_mapping,
                config.two_qubit_reduction,
                particle_hole.mapped_particles(),
            ),
        };

        let hamiltonian = FermionicOperator::new(
            molecule.one_body_integrals.clone(),
            molecule.two_body_integrals.clone(),
        )?;
        debug!(mapping = %config.qubit_mapping, "Converting to qubit");
        let (qubit_op, energy, did_shift) = pipeline.run(&hamiltonian)?;
        if did_shift {
            info!(energy_shift = energy.frozen, "Frozen orbital energy shift");
        }
        if particle_hole.is_active() {
            info!(energy_shift = energy.particle_hole, "Particle hole energy shift");
        }
        debug!(
            num_paulis = qubit_op.n_terms(),
            num_qubits = qubit_op.num_qubits(),
            "Mapped Hamiltonian"
        );

        let auxiliaries = auxiliary_operators(molecule)?;
        let mapped: Vec<(PauliSumOp, ShiftPair)> = auxiliaries
            .par_iter()
            .map(|(kind, op)| {
                debug!(aux = %kind, "Creating aux op");
                let (aux, shift, did_shift) = pipeline.run(op)?;
                if kind.is_dipole() {
                    if did_shift {
                        info!(aux = %kind, shift = shift.frozen, "Frozen orbital dipole shift");
                    }
                    if particle_hole.is_active() {
                        info!(
                            aux = %kind,
                            shift = shift.particle_hole,
                            "Particle hole dipole shift"
                        );
                    }
                }
                debug!(aux = %kind, num_paulis = aux.n_terms(), "Mapped aux op");
                Ok((aux, shift))
            })
            .collect::<ChemResult<Vec<_>>>()?;

        let mut ledger = ShiftLedger {
            energy,
            ..Default::default()
        };
        let mut aux_ops = Vec::with_capacity(mapped.len());
        for ((kind, _), (op, shift)) in auxiliaries.iter().zip(mapped) {
            match kind {
                AuxiliaryKind::NumParticles => ledger.num_particles = shift,
                AuxiliaryKind::AngularMomentum => ledger.angular_momentum = shift,
                AuxiliaryKind::Magnetization => ledger.magnetization = shift,
                AuxiliaryKind::DipoleX => ledger.dipole[0] = shift,
                AuxiliaryKind::DipoleY => ledger.dipole[1] = shift,
                AuxiliaryKind::DipoleZ => ledger.dipole[2] = shift,
            }
            aux_ops.push(op);
        }

        info!(
            num_particles = ?space.num_particles(),
            remaining = ?indices.num_particles(),
            "Molecule num electrons"
        );
        info!(
            num_spin_orbitals = indices.num_spin_orbitals(),
            remaining = indices.remaining_spin_orbitals(),
            "Molecule num spin orbitals"
        );

        let reference = match &config.z2symmetry_reduction {
            Some(_) => reference_bitstr(&indices, &pipeline)?,
            None => Vec::new(),
        };
        let outcome = SymmetryReducer::new(config.z2symmetry_reduction.as_ref(), reference)
            .reduce(qubit_op, aux_ops)?;

        let interpreter = ResultInterpreter::new(
            ledger,
            molecule.hf_energy,
            molecule.nuclear_repulsion_energy,
            molecule.nuclear_dipole_moment,
            molecule.reverse_dipole_sign,
        );
        let molecule_info = MoleculeInfo {
            num_particles: indices.num_particles(),
            num_orbitals: indices.remaining_spin_orbitals(),
            two_qubit_reduction: config.reduces_two_qubits(),
            z2_symmetries: outcome.z2_symmetries,
        };
        debug!(
            num_qubits = outcome.qubit_op.num_qubits(),
            state = %outcome.state,
            "Processing complete ready to run algorithm"
        );

        Ok(TransformedProblem {
            qubit_op: outcome.qubit_op,
            aux_ops: outcome.aux_ops,
            molecule_info,
            symmetry_state: outcome.state,
            interpreter,
        })
    }
}

/// Most-significant-first reference state of the reduced, mapped problem.
fn reference_bitstr(
    indices: &ReductionIndices,
    pipeline: &Pipeline<'_>,
) -> ChemResult<Vec<bool>> {
    let hf = HartreeFock::new(
        indices.remaining_spin_orbitals(),
        pipeline.particle_hole.mapped_particles(),
        pipeline.mapper.mapping(),
        pipeline.mapper.reduces_two_qubits(),
    )?;
    Ok(hf.bitstr())
}

/// Unreduced auxiliary operators over the full spin-orbital space, in slot
/// order. Dipoles are included only when the molecule carries integrals.
fn auxiliary_operators(
    molecule: &MolecularData,
) -> ChemResult<Vec<(AuxiliaryKind, FermionicOperator)>> {
    let modes = molecule.num_spin_orbitals();
    let mut ops = vec![
        (AuxiliaryKind::NumParticles, observables::total_particle_number(modes)?),
        (AuxiliaryKind::AngularMomentum, observables::total_angular_momentum(modes)?),
        (AuxiliaryKind::Magnetization, observables::total_magnetization(modes)?),
    ];
    if let Some(dipoles) = &molecule.dipole_integrals {
        for (kind, integrals) in [
            (AuxiliaryKind::DipoleX, &dipoles.x),
            (AuxiliaryKind::DipoleY, &dipoles.y),
            (AuxiliaryKind::DipoleZ, &dipoles.z),
        ] {
            ops.push((kind, FermionicOperator::one_body(integrals.clone())?));
        }
    }
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_fixed() {
        for (i, kind) in AuxiliaryKind::ALL.iter().enumerate() {
            assert_eq!(kind.slot(), i);
        }
        assert_eq!(AuxiliaryKind::AngularMomentum.to_string(), "S^2");
    }
}
