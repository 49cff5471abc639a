//! Z2 symmetry detection, sector selection and tapering.
//!
//! The reducer moves through
//! `NotRequested | Detecting -> Trivial | SectorPending -> Tapered`:
//! nothing happens unless a reduction is requested; detection either finds
//! no generators, in which case operators pass through untouched, or fixes
//! a sector and tapers the primary operator together with every auxiliary
//! that commutes with all generators.

use std::fmt;

use arvak_pauli::{PauliSumOp, Z2Symmetries};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Z2SymmetryReduction;
use crate::error::{ChemError, ChemResult};
use crate::mapper::MAPPING_THRESHOLD;

/// An auxiliary qubit operator, or a marker that it was dropped because it
/// breaks a symmetry of the Hamiltonian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "operator", rename_all = "snake_case")]
pub enum AuxOperator {
    /// Usable operator.
    Present(PauliSumOp),
    /// Does not commute with the symmetries; no value can be measured.
    Discarded,
}

impl AuxOperator {
    /// The operator, if present.
    pub fn as_op(&self) -> Option<&PauliSumOp> {
        match self {
            Self::Present(op) => Some(op),
            Self::Discarded => None,
        }
    }

    /// True if discarded.
    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }
}

/// Where symmetry processing ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetryState {
    /// No reduction requested.
    NotRequested,
    /// Searching for generators.
    Detecting,
    /// No generators found.
    Trivial,
    /// Generators found, sector not yet fixed.
    SectorPending,
    /// Operators tapered.
    Tapered,
}

impl fmt::Display for SymmetryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotRequested => "not_requested",
            Self::Detecting => "detecting",
            Self::Trivial => "trivial",
            Self::SectorPending => "sector_pending",
            Self::Tapered => "tapered",
        };
        f.write_str(name)
    }
}

/// Operators after symmetry processing.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryOutcome {
    /// Primary operator.
    pub qubit_op: PauliSumOp,
    /// Auxiliaries, in input order.
    pub aux_ops: Vec<AuxOperator>,
    /// Generators and the chosen sector; empty unless tapered.
    pub z2_symmetries: Z2Symmetries,
    /// Final state.
    pub state: SymmetryState,
}

/// Sector of the reference state for each generator.
///
/// `bitstr` is most-significant-first: its last entry is qubit 0. The
/// generator Z mask is indexed by qubit, so it is reversed before the
/// test. The value is `-1` iff the reference has odd overlap with the mask.
pub fn pick_sector(z2_symmetries: &Z2Symmetries, bitstr: &[bool]) -> Vec<i64> {
    z2_symmetries
        .symmetries()
        .iter()
        .map(|sym| {
            let odd = sym
                .z()
                .iter()
                .rev()
                .zip(bitstr)
                .fold(false, |acc, (&z, &b)| acc ^ (z && b));
            if odd { -1 } else { 1 }
        })
        .collect()
}

/// Runs Z2 reduction on a primary operator and its auxiliaries.
#[derive(Debug, Clone)]
pub struct SymmetryReducer<'a> {
    request: Option<&'a Z2SymmetryReduction>,
    reference_bitstr: Vec<bool>,
}

impl<'a> SymmetryReducer<'a> {
    /// Create a reducer. `reference_bitstr` is the most-significant-first
    /// reference state used by automatic sector selection.
    pub fn new(
        request: Option<&'a Z2SymmetryReduction>,
        reference_bitstr: Vec<bool>,
    ) -> Self {
        Self {
            request,
            reference_bitstr,
        }
    }

    /// Detect, choose a sector and taper.
    pub fn reduce(
        &self,
        qubit_op: PauliSumOp,
        aux_ops: Vec<PauliSumOp>,
    ) -> ChemResult<SymmetryOutcome> {
        let aux_ops: Vec<AuxOperator> = aux_ops.into_iter().map(AuxOperator::Present).collect();
        let Some(request) = self.request else {
            return Ok(SymmetryOutcome {
                qubit_op,
                aux_ops,
                z2_symmetries: Z2Symmetries::empty(),
                state: SymmetryState::NotRequested,
            });
        };

        debug!(state = %SymmetryState::Detecting, "Processing z2 symmetries");
        let z2 = Z2Symmetries::find(&qubit_op);
        if z2.is_empty() {
            debug!("No Z2 symmetries found");
            return Ok(SymmetryOutcome {
                qubit_op,
                aux_ops,
                z2_symmetries: Z2Symmetries::empty(),
                state: SymmetryState::Trivial,
            });
        }
        let labels: Vec<String> = z2.symmetries().iter().map(|s| s.to_label()).collect();
        debug!(
            state = %SymmetryState::SectorPending,
            "{} Z2 symmetries found: {:?}",
            z2.len(),
            labels
        );
        self.reduce_with(request, z2, qubit_op, aux_ops)
    }

    /// Check commutation, choose a sector and taper with already detected
    /// symmetries.
    pub(crate) fn reduce_with(
        &self,
        request: &Z2SymmetryReduction,
        z2: Z2Symmetries,
        qubit_op: PauliSumOp,
        aux_ops: Vec<AuxOperator>,
    ) -> ChemResult<SymmetryOutcome> {
        let cliffords = z2.symmetry_ops();
        if !commutes_with_all(&qubit_op, &cliffords)? {
            return Err(ChemError::SymmetryInconsistent);
        }
        let aux_ops = aux_ops
            .into_iter()
            .enumerate()
            .map(|(slot, aux)| match aux {
                AuxOperator::Present(op) => {
                    let commutes = commutes_with_all(&op, &cliffords)?;
                    debug!(
                        slot,
                        commutes, "Checking auxiliary operator commutes with symmetries"
                    );
                    Ok(if commutes {
                        AuxOperator::Present(op)
                    } else {
                        AuxOperator::Discarded
                    })
                }
                AuxOperator::Discarded => Ok(AuxOperator::Discarded),
            })
            .collect::<ChemResult<Vec<_>>>()?;

        let values = match request {
            Z2SymmetryReduction::Auto => pick_sector(&z2, &self.reference_bitstr),
            Z2SymmetryReduction::TaperingValues(values) => {
                if values.len() != z2.len() {
                    return Err(ChemError::TaperingValuesLength {
                        expected: z2.len(),
                        got: values.len(),
                    });
                }
                if values.iter().any(|v| !matches!(v, -1 | 1)) {
                    return Err(ChemError::InvalidTaperingValues(values.clone()));
                }
                values.clone()
            }
        };
        let z2 = z2.with_tapering_values(&values)?;
        info!(tapering_values = ?values, "Apply symmetry with tapering values");

        let qubit_op = z2.taper(&qubit_op)?.chop(MAPPING_THRESHOLD);
        let aux_ops = aux_ops
            .into_iter()
            .map(|aux| match aux {
                AuxOperator::Present(op) => Ok(AuxOperator::Present(
                    z2.taper(&op)?.chop(MAPPING_THRESHOLD),
                )),
                AuxOperator::Discarded => Ok(AuxOperator::Discarded),
            })
            .collect::<ChemResult<Vec<_>>>()?;

        Ok(SymmetryOutcome {
            qubit_op,
            aux_ops,
            z2_symmetries: z2,
            state: SymmetryState::Tapered,
        })
    }
}

fn commutes_with_all(op: &PauliSumOp, cliffords: &[PauliSumOp]) -> ChemResult<bool> {
    for clifford in cliffords {
        if !op.commutes_with(clifford)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arvak_pauli::Pauli;

    fn symmetries(labels: &[&str]) -> Z2Symmetries {
        let paulis: Vec<Pauli> = labels.iter().map(|l| Pauli::from_label(l).unwrap()).collect();
        let n = paulis[0].num_qubits();
        // sq data is irrelevant to sector picking
        let sq: Vec<Pauli> = (0..paulis.len()).map(|_| Pauli::identity(n)).collect();
        let list: Vec<usize> = (0..paulis.len()).collect();
        Z2Symmetries::new(paulis, sq, list, None).unwrap()
    }

    #[test]
    fn test_pick_sector_bit_order() {
        // "IIIZ" acts on qubit 0; bitstr is msb first, so qubit 0 is last
        let z2 = symmetries(&["IIIZ", "ZIII"]);
        assert_eq!(pick_sector(&z2, &[false, false, false, true]), vec![-1, 1]);
        assert_eq!(pick_sector(&z2, &[true, false, false, false]), vec![1, -1]);
    }

    #[test]
    fn test_pick_sector_overlap_parity() {
        let z2 = symmetries(&["ZZZZ", "IIZZ"]);
        // qubits 0 and 2 set
        let bitstr = [false, true, false, true];
        assert_eq!(pick_sector(&z2, &bitstr), vec![1, -1]);
    }

    #[test]
    fn test_not_requested_passes_through() {
        let op = PauliSumOp::from_list(&[("ZZ", 1.0.into()), ("XX", 0.5.into())]).unwrap();
        let outcome = SymmetryReducer::new(None, vec![false, false])
            .reduce(op.clone(), vec![op.clone()])
            .unwrap();
        assert_eq!(outcome.state, SymmetryState::NotRequested);
        assert_eq!(outcome.qubit_op, op);
        assert!(outcome.z2_symmetries.is_empty());
    }

    #[test]
    fn test_anticommuting_generator_is_inconsistent() {
        let z2 = Z2Symmetries::new(
            vec![Pauli::from_label("Z").unwrap()],
            vec![Pauli::from_label("X").unwrap()],
            vec![0],
            None,
        )
        .unwrap();
        let op = PauliSumOp::from_list(&[("X", 1.0.into())]).unwrap();
        let aux = AuxOperator::Present(op.clone());
        let result = SymmetryReducer::new(Some(&Z2SymmetryReduction::Auto), vec![false])
            .reduce_with(&Z2SymmetryReduction::Auto, z2, op, vec![aux]);
        assert!(matches!(result, Err(ChemError::SymmetryInconsistent)));
    }

    #[test]
    fn test_aux_serde_tags() {
        let json = serde_json::to_string(&AuxOperator::Discarded).unwrap();
        assert_eq!(json, r#"{"status":"discarded"}"#);
    }
}
