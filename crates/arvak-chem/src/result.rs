//! Interpretation of eigensolver output.
//!
//! Freezing and the particle-hole picture move parts of every observable out
//! of the qubit operator. [`ResultInterpreter`] keeps those parts in a
//! [`ShiftLedger`] and adds them back to the raw eigenvalues.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{ChemError, ChemResult};

/// Debye per atomic unit of dipole moment.
pub const DEBYE_PER_AU: f64 = 2.541_746_473;

/// Index of the first dipole component in the auxiliary values.
pub const DIPOLE_SLOT: usize = 3;

/// Freeze and particle-hole parts removed from one observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftPair {
    /// Banked by orbital freezing.
    pub frozen: f64,
    /// Banked by the particle-hole transformation.
    pub particle_hole: f64,
}

impl ShiftPair {
    /// Create a shift pair.
    pub fn new(frozen: f64, particle_hole: f64) -> Self {
        Self {
            frozen,
            particle_hole,
        }
    }

    /// Sum of both parts.
    pub fn total(&self) -> f64 {
        self.frozen + self.particle_hole
    }
}

/// Every shift banked during a transformation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftLedger {
    /// Hamiltonian.
    pub energy: ShiftPair,
    /// Dipole x, y, z.
    pub dipole: [ShiftPair; 3],
    /// Total particle number.
    pub num_particles: ShiftPair,
    /// Total angular momentum `S²`.
    pub angular_momentum: ShiftPair,
    /// Magnetization `S_z`.
    pub magnetization: ShiftPair,
}

/// Result of a minimum eigensolver run on the transformed problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumEigensolverResult {
    /// Lowest eigenvalue found.
    pub eigenvalue: Complex64,
    /// Expectation values of the auxiliary operators, `None` where an
    /// operator was discarded.
    #[serde(default)]
    pub aux_operator_eigenvalues: Option<Vec<Option<f64>>>,
}

/// Result of a solver returning several eigenvalues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigensolverResult {
    /// Eigenvalues found.
    pub eigenvalues: Vec<Complex64>,
}

/// Output of an algorithm run on a transformed problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlgorithmResult {
    /// Minimum eigensolver output.
    MinimumEigensolver(MinimumEigensolverResult),
    /// Multi-eigenvalue output.
    Eigensolver(EigensolverResult),
}

impl AlgorithmResult {
    fn kind(&self) -> &'static str {
        match self {
            Self::MinimumEigensolver(_) => "minimum_eigensolver",
            Self::Eigensolver(_) => "eigensolver",
        }
    }
}

/// Turns raw eigenvalues into physical ground-state quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultInterpreter {
    ledger: ShiftLedger,
    hf_energy: f64,
    nuclear_repulsion_energy: f64,
    nuclear_dipole_moment: Option<[f64; 3]>,
    reverse_dipole_sign: bool,
}

impl ResultInterpreter {
    /// Create an interpreter.
    pub fn new(
        ledger: ShiftLedger,
        hf_energy: f64,
        nuclear_repulsion_energy: f64,
        nuclear_dipole_moment: Option<[f64; 3]>,
        reverse_dipole_sign: bool,
    ) -> Self {
        Self {
            ledger,
            hf_energy,
            nuclear_repulsion_energy,
            nuclear_dipole_moment,
            reverse_dipole_sign,
        }
    }

    /// The banked shifts.
    pub fn ledger(&self) -> &ShiftLedger {
        &self.ledger
    }

    /// Interpret an eigenvalue and the auxiliary values measured with it.
    ///
    /// Slots 0, 1 and 2 are particle number, `S²` and `S_z`; dipoles are
    /// read only when more than three values are given. Missing values stay
    /// missing.
    pub fn interpret(
        &self,
        eigenvalue: Complex64,
        aux_values: Option<&[Option<f64>]>,
    ) -> GroundStateResult {
        let mut result = GroundStateResult {
            hartree_fock_energy: self.hf_energy,
            nuclear_repulsion_energy: self.nuclear_repulsion_energy,
            nuclear_dipole_moment: self.nuclear_dipole_moment,
            computed_electronic_energy: eigenvalue.re,
            ph_extracted_energy: self.ledger.energy.particle_hole,
            frozen_extracted_energy: self.ledger.energy.frozen,
            ..Default::default()
        };
        let Some(values) = aux_values else {
            return result;
        };
        let value = |slot: usize| values.get(slot).copied().flatten();

        if values.len() > DIPOLE_SLOT {
            result.reverse_dipole_sign = self.reverse_dipole_sign;
            result.computed_dipole_moment = Some([
                value(DIPOLE_SLOT),
                value(DIPOLE_SLOT + 1),
                value(DIPOLE_SLOT + 2),
            ]);
            result.ph_extracted_dipole_moment = Some(self.ledger.dipole.map(|s| s.particle_hole));
            result.frozen_extracted_dipole_moment = Some(self.ledger.dipole.map(|s| s.frozen));
        }
        result.num_particles = value(0).map(|v| v + self.ledger.num_particles.total());
        result.total_angular_momentum = value(1).map(|v| v + self.ledger.angular_momentum.total());
        result.magnetization = value(2).map(|v| v + self.ledger.magnetization.total());
        result
    }

    /// Interpret an algorithm result. Only minimum eigensolver results are
    /// accepted.
    pub fn process_algorithm_result(
        &self,
        algorithm_result: AlgorithmResult,
    ) -> ChemResult<GroundStateResult> {
        match &algorithm_result {
            AlgorithmResult::MinimumEigensolver(r) => {
                let mut result =
                    self.interpret(r.eigenvalue, r.aux_operator_eigenvalues.as_deref());
                result.algorithm_result = Some(algorithm_result);
                Ok(result)
            }
            other => Err(ChemError::UnsupportedResult(other.kind().to_string())),
        }
    }
}

/// Ground-state quantities recovered from a solver run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundStateResult {
    /// Hartree-Fock energy reported by the driver.
    pub hartree_fock_energy: f64,
    /// Nuclear repulsion energy.
    pub nuclear_repulsion_energy: f64,
    /// Nuclear dipole moment, if known.
    pub nuclear_dipole_moment: Option<[f64; 3]>,
    /// Eigenvalue of the qubit Hamiltonian.
    pub computed_electronic_energy: f64,
    /// Energy moved out by the particle-hole picture.
    pub ph_extracted_energy: f64,
    /// Energy moved out by freezing.
    pub frozen_extracted_energy: f64,
    /// Total particle number.
    pub num_particles: Option<f64>,
    /// Total angular momentum `⟨S²⟩`.
    pub total_angular_momentum: Option<f64>,
    /// Magnetization `⟨S_z⟩`.
    pub magnetization: Option<f64>,
    /// Raw dipole components.
    pub computed_dipole_moment: Option<[Option<f64>; 3]>,
    /// Dipole moved out by the particle-hole picture.
    pub ph_extracted_dipole_moment: Option<[f64; 3]>,
    /// Dipole moved out by freezing.
    pub frozen_extracted_dipole_moment: Option<[f64; 3]>,
    /// Whether the electronic dipole sign is flipped.
    pub reverse_dipole_sign: bool,
    /// The algorithm output this was built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm_result: Option<AlgorithmResult>,
}

impl GroundStateResult {
    /// Electronic energy with the extracted parts added back.
    pub fn electronic_energy(&self) -> f64 {
        self.computed_electronic_energy + self.ph_extracted_energy + self.frozen_extracted_energy
    }

    /// Electronic plus nuclear repulsion energy.
    pub fn total_energy(&self) -> f64 {
        self.electronic_energy() + self.nuclear_repulsion_energy
    }

    /// Electronic dipole with the extracted parts added back.
    pub fn electronic_dipole_moment(&self) -> Option<[Option<f64>; 3]> {
        let computed = self.computed_dipole_moment?;
        let ph = self.ph_extracted_dipole_moment.unwrap_or_default();
        let frozen = self.frozen_extracted_dipole_moment.unwrap_or_default();
        Some(std::array::from_fn(|i| computed[i].map(|c| c + ph[i] + frozen[i])))
    }

    /// Nuclear plus electronic dipole, honoring the sign convention.
    pub fn dipole_moment(&self) -> Option<[Option<f64>; 3]> {
        let electronic = self.electronic_dipole_moment()?;
        let nuclear = self.nuclear_dipole_moment?;
        let sign = if self.reverse_dipole_sign { -1.0 } else { 1.0 };
        Some(std::array::from_fn(|i| electronic[i].map(|e| sign * e + nuclear[i])))
    }

    /// Dipole magnitude in a.u., if every component is known.
    pub fn total_dipole_moment(&self) -> Option<f64> {
        let dipole = self.dipole_moment()?;
        let mut sum = 0.0;
        for component in dipole {
            sum += component?.powi(2);
        }
        Some(sum.sqrt())
    }

    /// Dipole components in Debye.
    pub fn dipole_moment_in_debye(&self) -> Option<[Option<f64>; 3]> {
        self.dipole_moment()
            .map(|d| d.map(|c| c.map(|v| v * DEBYE_PER_AU)))
    }

    /// Dipole magnitude in Debye.
    pub fn total_dipole_moment_in_debye(&self) -> Option<f64> {
        self.total_dipole_moment().map(|v| v * DEBYE_PER_AU)
    }

    /// Spin quantum number `S` from `S(S+1) = ⟨S²⟩`.
    pub fn spin(&self) -> Option<f64> {
        self.total_angular_momentum
            .map(|s2| (-1.0 + (1.0 + 4.0 * s2).sqrt()) / 2.0)
    }

    /// Spin multiplicity `2S + 1`.
    pub fn multiplicity(&self) -> Option<f64> {
        self.spin().map(|s| 2.0 * s + 1.0)
    }
}

/// `value` rounded to 8 decimals with trailing zeros removed; at least one
/// decimal is kept.
pub fn float_to_string(value: f64) -> String {
    let rounded = (value * 1e8).round() / 1e8;
    if rounded == 0.0 {
        return "0.0".to_string();
    }
    let text = format!("{rounded:.8}");
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Dipole components joined with two spaces inside brackets.
pub fn dipole_to_string(dipole: &[Option<f64>]) -> String {
    let parts: Vec<String> = dipole
        .iter()
        .map(|c| c.map_or_else(|| "None".to_string(), float_to_string))
        .collect();
    format!("[{}]", parts.join("  "))
}

fn known(values: [f64; 3]) -> [Option<f64>; 3] {
    values.map(Some)
}

impl fmt::Display for GroundStateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== GROUND STATE ENERGY ===")?;
        writeln!(f)?;
        writeln!(
            f,
            "* Electronic ground state energy (Hartree): {}",
            round12(self.electronic_energy())
        )?;
        writeln!(f, "  - computed part:      {}", round12(self.computed_electronic_energy))?;
        writeln!(f, "  - frozen energy part: {}", round12(self.frozen_extracted_energy))?;
        writeln!(f, "  - particle hole part: {}", round12(self.ph_extracted_energy))?;
        writeln!(
            f,
            "~ Nuclear repulsion energy (Hartree): {}",
            round12(self.nuclear_repulsion_energy)
        )?;
        writeln!(f, "> Total ground state energy (Hartree): {}", round12(self.total_energy()))?;
        if let (Some(n), Some(s2), Some(m), Some(s)) = (
            self.num_particles,
            self.total_angular_momentum,
            self.magnetization,
            self.spin(),
        ) {
            writeln!(f, "  Measured:: # Particles: {n:.3} S: {s:.3} S^2: {s2:.3} M: {m:.5}")?;
        }

        if let (Some(electronic), Some(computed)) =
            (self.electronic_dipole_moment(), self.computed_dipole_moment)
        {
            writeln!(f)?;
            writeln!(f, "=== DIPOLE MOMENT ===")?;
            writeln!(f)?;
            writeln!(f, "* Electronic dipole moment (a.u.): {}", dipole_to_string(&electronic))?;
            writeln!(f, "  - computed part:      {}", dipole_to_string(&computed))?;
            if let Some(frozen) = self.frozen_extracted_dipole_moment {
                writeln!(f, "  - frozen energy part: {}", dipole_to_string(&known(frozen)))?;
            }
            if let Some(ph) = self.ph_extracted_dipole_moment {
                writeln!(f, "  - particle hole part: {}", dipole_to_string(&known(ph)))?;
            }
            if let Some(nuclear) = self.nuclear_dipole_moment {
                writeln!(
                    f,
                    "~ Nuclear dipole moment (a.u.): {}",
                    dipole_to_string(&known(nuclear))
                )?;
            }
            if let Some(dipole) = self.dipole_moment() {
                let total = self
                    .total_dipole_moment()
                    .map_or_else(|| "None".to_string(), float_to_string);
                writeln!(
                    f,
                    "> Dipole moment (a.u.): {}  Total: {total}",
                    dipole_to_string(&dipole)
                )?;
            }
            if let Some(debye) = self.dipole_moment_in_debye() {
                let total = self
                    .total_dipole_moment_in_debye()
                    .map_or_else(|| "None".to_string(), float_to_string);
                writeln!(
                    f,
                    "               (debye): {}  Total: {total}",
                    dipole_to_string(&debye)
                )?;
            }
        }
        Ok(())
    }
}

fn round12(value: f64) -> f64 {
    (value * 1e12).round() / 1e12
}
