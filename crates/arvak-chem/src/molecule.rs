//! Molecular input data and the drivers that produce it.
//!
//! Integrals are stored over block-ordered spin-orbitals (all alpha, then all
//! beta) in the convention of [`arvak_fermion::FermionicOperator`]:
//!
//!   H = Σ h1[p,q] a†p aq + Σ h2[p,q,r,s] a†p a†r as aq
//!
//! For restricted spatial integrals `h_pq` and chemist-notation `(pq|rs)`,
//! [`MolecularData::from_spatial_integrals`] builds
//! `h1[pσ,qσ] = h_pq` and `h2[pσ,qσ,rτ,sτ] = ½ (pq|rs)`.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{Array2, Array4};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChemError, ChemResult};

/// Dipole integrals over spin-orbitals, one matrix per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DipoleIntegrals {
    /// x component.
    pub x: Array2<f64>,
    /// y component.
    pub y: Array2<f64>,
    /// z component.
    pub z: Array2<f64>,
}

impl DipoleIntegrals {
    /// Components in axis order.
    pub fn axes(&self) -> [&Array2<f64>; 3] {
        [&self.x, &self.y, &self.z]
    }
}

/// Everything the transformation needs to know about a molecule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularData {
    /// Spatial orbital count `n`.
    pub num_orbitals: usize,
    /// Alpha electrons.
    pub num_alpha: usize,
    /// Beta electrons.
    pub num_beta: usize,
    /// One-body integrals, `2n × 2n`.
    pub one_body_integrals: Array2<f64>,
    /// Two-body integrals, `(2n)^4`.
    pub two_body_integrals: Array4<f64>,
    /// Spin-orbital dipole integrals, if computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dipole_integrals: Option<DipoleIntegrals>,
    /// Nuclear repulsion energy (Hartree).
    #[serde(default)]
    pub nuclear_repulsion_energy: f64,
    /// Nuclear dipole moment (a.u.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuclear_dipole_moment: Option<[f64; 3]>,
    /// Whether the electronic dipole sign must be flipped.
    #[serde(default)]
    pub reverse_dipole_sign: bool,
    /// Hartree-Fock total energy reported by the driver.
    #[serde(default)]
    pub hf_energy: f64,
    /// Spatial indices of core orbitals, frozen under `freeze_core`.
    #[serde(default)]
    pub core_orbitals: Vec<usize>,
}

/// Expand a spatial one-body matrix to block-ordered spin-orbitals.
pub fn spin_orbital_one_body(spatial: &Array2<f64>) -> Array2<f64> {
    let n = spatial.nrows();
    Array2::from_shape_fn((2 * n, 2 * n), |(p, q)| {
        if p / n == q / n {
            spatial[[p % n, q % n]]
        } else {
            0.0
        }
    })
}

/// Expand chemist-notation `(pq|rs)` to the spin-orbital two-body tensor.
pub fn spin_orbital_two_body(eri: &Array4<f64>) -> Array4<f64> {
    let n = eri.shape()[0];
    let m = 2 * n;
    Array4::from_shape_fn((m, m, m, m), |(p, q, r, s)| {
        if p / n == q / n && r / n == s / n {
            0.5 * eri[[p % n, q % n, r % n, s % n]]
        } else {
            0.0
        }
    })
}

impl MolecularData {
    /// Build from restricted spatial integrals.
    pub fn from_spatial_integrals(
        one_body: &Array2<f64>,
        two_body: &Array4<f64>,
        num_alpha: usize,
        num_beta: usize,
    ) -> ChemResult<Self> {
        let n = one_body.nrows();
        if one_body.shape() != [n, n] {
            return Err(ChemError::InvalidMolecule(format!(
                "spatial one-body integrals have shape {:?}",
                one_body.shape()
            )));
        }
        if two_body.shape() != [n, n, n, n] {
            return Err(ChemError::InvalidMolecule(format!(
                "spatial two-body integrals have shape {:?}, expected {:?}",
                two_body.shape(),
                [n; 4]
            )));
        }
        let data = Self {
            num_orbitals: n,
            num_alpha,
            num_beta,
            one_body_integrals: spin_orbital_one_body(one_body),
            two_body_integrals: spin_orbital_two_body(two_body),
            dipole_integrals: None,
            nuclear_repulsion_energy: 0.0,
            nuclear_dipole_moment: None,
            reverse_dipole_sign: false,
            hf_energy: 0.0,
            core_orbitals: Vec::new(),
        };
        data.validate()?;
        Ok(data)
    }

    /// Set the nuclear repulsion energy.
    #[must_use]
    pub fn with_nuclear_repulsion_energy(mut self, energy: f64) -> Self {
        self.nuclear_repulsion_energy = energy;
        self
    }

    /// Set the Hartree-Fock energy.
    #[must_use]
    pub fn with_hf_energy(mut self, energy: f64) -> Self {
        self.hf_energy = energy;
        self
    }

    /// Set the core orbitals.
    #[must_use]
    pub fn with_core_orbitals(mut self, core: Vec<usize>) -> Self {
        self.core_orbitals = core;
        self
    }

    /// Set spatial dipole integrals, expanded to spin-orbitals.
    #[must_use]
    pub fn with_spatial_dipole_integrals(
        mut self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        z: &Array2<f64>,
    ) -> Self {
        self.dipole_integrals = Some(DipoleIntegrals {
            x: spin_orbital_one_body(x),
            y: spin_orbital_one_body(y),
            z: spin_orbital_one_body(z),
        });
        self
    }

    /// Set the nuclear dipole moment and sign convention.
    #[must_use]
    pub fn with_nuclear_dipole_moment(mut self, moment: [f64; 3], reverse_sign: bool) -> Self {
        self.nuclear_dipole_moment = Some(moment);
        self.reverse_dipole_sign = reverse_sign;
        self
    }

    /// Spin-orbital count `2n`.
    pub fn num_spin_orbitals(&self) -> usize {
        2 * self.num_orbitals
    }

    /// Whether dipole integrals are present.
    pub fn has_dipole_integrals(&self) -> bool {
        self.dipole_integrals.is_some()
    }

    /// Check tensor shapes and particle counts.
    pub fn validate(&self) -> ChemResult<()> {
        let m = self.num_spin_orbitals();
        if self.num_orbitals == 0 {
            return Err(ChemError::InvalidMolecule("no orbitals".into()));
        }
        if self.one_body_integrals.shape() != [m, m] {
            return Err(ChemError::InvalidMolecule(format!(
                "one-body integrals have shape {:?}, expected [{m}, {m}]",
                self.one_body_integrals.shape()
            )));
        }
        if self.two_body_integrals.shape() != [m, m, m, m] {
            return Err(ChemError::InvalidMolecule(format!(
                "two-body integrals have shape {:?}, expected [{m}, {m}, {m}, {m}]",
                self.two_body_integrals.shape()
            )));
        }
        if let Some(dipoles) = &self.dipole_integrals {
            if let Some(bad) = dipoles.axes().iter().find(|d| d.shape() != [m, m]) {
                return Err(ChemError::InvalidMolecule(format!(
                    "dipole integrals have shape {:?}, expected [{m}, {m}]",
                    bad.shape()
                )));
            }
        }
        if self.num_alpha > self.num_orbitals || self.num_beta > self.num_orbitals {
            return Err(ChemError::InvalidMolecule(format!(
                "{} alpha and {} beta electrons do not fit in {} orbitals",
                self.num_alpha, self.num_beta, self.num_orbitals
            )));
        }
        Ok(())
    }
}

/// A source of molecular data.
///
/// Drivers run an electronic-structure calculation, or load its output, and
/// hand the integrals to the transformation.
pub trait Driver: Send + Sync {
    /// Get the name of this driver.
    fn name(&self) -> &str;

    /// Produce the molecular data.
    fn run(&self) -> ChemResult<MolecularData>;
}

/// Loads [`MolecularData`] from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonDriver {
    path: PathBuf,
}

impl JsonDriver {
    /// Create a driver for the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this driver reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Driver for JsonDriver {
    fn name(&self) -> &str {
        "json"
    }

    fn run(&self) -> ChemResult<MolecularData> {
        debug!(path = %self.path.display(), "Loading molecular data");
        let source = fs::read_to_string(&self.path)?;
        let data: MolecularData = serde_json::from_str(&source)?;
        data.validate()?;
        Ok(data)
    }
}

impl Driver for MolecularData {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn run(&self) -> ChemResult<MolecularData> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_orbital_expansion() {
        let h = Array2::from_shape_vec((2, 2), vec![-1.0, 0.2, 0.2, -0.5]).unwrap();
        let eri = Array4::from_elem((2, 2, 2, 2), 0.4);
        let data = MolecularData::from_spatial_integrals(&h, &eri, 1, 1).unwrap();
        assert_eq!(data.one_body_integrals[[2, 3]], 0.2);
        assert_eq!(data.one_body_integrals[[0, 2]], 0.0);
        assert_eq!(data.two_body_integrals[[0, 1, 2, 3]], 0.2);
        assert_eq!(data.two_body_integrals[[0, 2, 1, 3]], 0.0);
    }

    #[test]
    fn test_validate_counts() {
        let h = Array2::zeros((2, 2));
        let eri = Array4::zeros((2, 2, 2, 2));
        assert!(matches!(
            MolecularData::from_spatial_integrals(&h, &eri, 3, 0),
            Err(ChemError::InvalidMolecule(_))
        ));
        // core orbitals past the top are dropped at reduction, not rejected
        let data = MolecularData::from_spatial_integrals(&h, &eri, 1, 1)
            .unwrap()
            .with_core_orbitals(vec![5]);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip_through_driver() {
        let h = Array2::eye(2);
        let eri = Array4::zeros((2, 2, 2, 2));
        let data = MolecularData::from_spatial_integrals(&h, &eri, 1, 0)
            .unwrap()
            .with_nuclear_dipole_moment([0.0, 0.0, 1.2], true);

        let path = std::env::temp_dir()
            .join(format!("arvak-chem-molecule-{}.json", std::process::id()));
        fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();
        let loaded = JsonDriver::new(&path).run().unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, data);
    }
}
