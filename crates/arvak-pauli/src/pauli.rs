//! Dense Pauli strings in symplectic form.
//!
//! A Pauli string on `n` qubits is stored as two bit vectors `(z, x)`:
//!
//! | z | x | op |
//! |---|---|----|
//! | 0 | 0 | I  |
//! | 0 | 1 | X  |
//! | 1 | 1 | Y  |
//! | 1 | 0 | Z  |
//!
//! Labels are written with qubit 0 right-most, so `"XIZ"` is `Z` on qubit 0
//! and `X` on qubit 2.
//!
//! # Example
//!
//! ```rust
//! use arvak_pauli::{Pauli, PauliOp};
//!
//! let p: Pauli = "XZ".parse().unwrap();
//! assert_eq!(p.op(0), PauliOp::Z);
//! assert_eq!(p.op(1), PauliOp::X);
//!
//! let (phase, q) = p.compose(&"ZZ".parse().unwrap()).unwrap();
//! assert_eq!(q.to_label(), "YI");
//! assert_eq!(phase.im, -1.0);
//! ```

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PauliError, PauliResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Symplectic bits `(z, x)` of this operator.
    pub fn bits(self) -> (bool, bool) {
        match self {
            PauliOp::I => (false, false),
            PauliOp::X => (false, true),
            PauliOp::Y => (true, true),
            PauliOp::Z => (true, false),
        }
    }

    /// Operator with the given symplectic bits.
    pub fn from_bits(z: bool, x: bool) -> Self {
        match (z, x) {
            (false, false) => PauliOp::I,
            (false, true) => PauliOp::X,
            (true, true) => PauliOp::Y,
            (true, false) => PauliOp::Z,
        }
    }

    /// Label character.
    pub fn as_char(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    /// Parse a label character.
    pub fn from_char(c: char) -> PauliResult<Self> {
        match c {
            'I' => Ok(PauliOp::I),
            'X' => Ok(PauliOp::X),
            'Y' => Ok(PauliOp::Y),
            'Z' => Ok(PauliOp::Z),
            other => Err(PauliError::InvalidLabel(other)),
        }
    }

    /// Power of `i` picked up by the product `self · other`.
    ///
    /// Cyclic products (XY, YZ, ZX) give `+i`, anti-cyclic ones give `-i`.
    fn product_phase(self, other: PauliOp) -> u8 {
        use PauliOp::{X, Y, Z};
        match (self, other) {
            (X, Y) | (Y, Z) | (Z, X) => 1,
            (Y, X) | (Z, Y) | (X, Z) => 3,
            _ => 0,
        }
    }
}

/// A tensor product of single-qubit Paulis over a fixed number of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pauli {
    z: Vec<bool>,
    x: Vec<bool>,
}

impl Pauli {
    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            z: vec![false; num_qubits],
            x: vec![false; num_qubits],
        }
    }

    /// Build from symplectic bit vectors indexed by qubit.
    pub fn from_bits(z: Vec<bool>, x: Vec<bool>) -> PauliResult<Self> {
        if z.len() != x.len() {
            return Err(PauliError::QubitCountMismatch {
                expected: z.len(),
                got: x.len(),
            });
        }
        Ok(Self { z, x })
    }

    /// Build from `(qubit, op)` pairs; unlisted qubits are identity.
    pub fn from_ops(
        num_qubits: usize,
        ops: impl IntoIterator<Item = (usize, PauliOp)>,
    ) -> PauliResult<Self> {
        let mut pauli = Self::identity(num_qubits);
        for (qubit, op) in ops {
            pauli.set(qubit, op)?;
        }
        Ok(pauli)
    }

    /// A single non-identity operator on one qubit.
    pub fn single(num_qubits: usize, qubit: usize, op: PauliOp) -> PauliResult<Self> {
        Self::from_ops(num_qubits, [(qubit, op)])
    }

    /// Parse a label such as `"IXYZ"` (qubit 0 right-most).
    pub fn from_label(label: &str) -> PauliResult<Self> {
        let ops = label
            .chars()
            .rev()
            .map(PauliOp::from_char)
            .collect::<PauliResult<Vec<_>>>()?;
        let (z, x) = ops.iter().map(|op| op.bits()).unzip();
        Ok(Self { z, x })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.z.len()
    }

    /// Z bits, indexed by qubit.
    pub fn z(&self) -> &[bool] {
        &self.z
    }

    /// X bits, indexed by qubit.
    pub fn x(&self) -> &[bool] {
        &self.x
    }

    /// Operator on one qubit. Out-of-range qubits read as identity.
    pub fn op(&self, qubit: usize) -> PauliOp {
        match (self.z.get(qubit), self.x.get(qubit)) {
            (Some(&z), Some(&x)) => PauliOp::from_bits(z, x),
            _ => PauliOp::I,
        }
    }

    /// Overwrite the operator on one qubit.
    pub fn set(&mut self, qubit: usize, op: PauliOp) -> PauliResult<()> {
        if qubit >= self.num_qubits() {
            return Err(PauliError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits(),
            });
        }
        let (z, x) = op.bits();
        self.z[qubit] = z;
        self.x[qubit] = x;
        Ok(())
    }

    /// True if every qubit carries the identity.
    pub fn is_identity(&self) -> bool {
        !self.z.iter().chain(self.x.iter()).any(|&b| b)
    }

    /// True if the string contains only I and Z.
    pub fn is_diagonal(&self) -> bool {
        !self.x.iter().any(|&b| b)
    }

    /// Number of non-identity qubits.
    pub fn weight(&self) -> usize {
        self.z
            .iter()
            .zip(&self.x)
            .filter(|&(&z, &x)| z || x)
            .count()
    }

    fn check_width(&self, other: &Pauli) -> PauliResult<()> {
        if self.num_qubits() != other.num_qubits() {
            return Err(PauliError::QubitCountMismatch {
                expected: self.num_qubits(),
                got: other.num_qubits(),
            });
        }
        Ok(())
    }

    /// Symplectic inner product mod 2: `false` when the strings commute.
    fn symplectic_product(&self, other: &Pauli) -> bool {
        let mut parity = false;
        for q in 0..self.num_qubits() {
            parity ^= (self.x[q] && other.z[q]) ^ (self.z[q] && other.x[q]);
        }
        parity
    }

    /// Whether the two strings commute.
    pub fn commutes(&self, other: &Pauli) -> PauliResult<bool> {
        self.check_width(other)?;
        Ok(!self.symplectic_product(other))
    }

    /// Product `self · other`, returned as `(phase, pauli)`.
    pub fn compose(&self, other: &Pauli) -> PauliResult<(Complex64, Pauli)> {
        self.check_width(other)?;
        let mut power = 0u8;
        let n = self.num_qubits();
        let mut z = Vec::with_capacity(n);
        let mut x = Vec::with_capacity(n);
        for q in 0..n {
            power = (power + self.op(q).product_phase(other.op(q))) % 4;
            z.push(self.z[q] ^ other.z[q]);
            x.push(self.x[q] ^ other.x[q]);
        }
        Ok((i_power(power), Pauli { z, x }))
    }

    /// Copy with the listed qubits removed; remaining qubits keep their order.
    pub fn delete_qubits(&self, qubits: &[usize]) -> Pauli {
        let keep = |q: &usize| !qubits.contains(q);
        let z = (0..self.num_qubits())
            .filter(keep)
            .map(|q| self.z[q])
            .collect();
        let x = (0..self.num_qubits())
            .filter(keep)
            .map(|q| self.x[q])
            .collect();
        Pauli { z, x }
    }

    /// Label with qubit 0 right-most.
    pub fn to_label(&self) -> String {
        (0..self.num_qubits())
            .rev()
            .map(|q| self.op(q).as_char())
            .collect()
    }
}

fn i_power(power: u8) -> Complex64 {
    match power % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_label())
    }
}

impl FromStr for Pauli {
    type Err = PauliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl Serialize for Pauli {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_label())
    }
}

impl<'de> Deserialize<'de> for Pauli {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Pauli::from_label(&label).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_order() {
        let p = Pauli::from_label("XYZI").unwrap();
        assert_eq!(p.op(0), PauliOp::I);
        assert_eq!(p.op(1), PauliOp::Z);
        assert_eq!(p.op(2), PauliOp::Y);
        assert_eq!(p.op(3), PauliOp::X);
        assert_eq!(p.to_label(), "XYZI");
        assert_eq!(p.weight(), 3);
    }

    #[test]
    fn test_invalid_label() {
        assert!(matches!(
            Pauli::from_label("XQ"),
            Err(PauliError::InvalidLabel('Q'))
        ));
    }

    #[test]
    fn test_single_qubit_products() {
        let x = Pauli::from_label("X").unwrap();
        let y = Pauli::from_label("Y").unwrap();
        let z = Pauli::from_label("Z").unwrap();

        let (phase, p) = x.compose(&y).unwrap();
        assert_eq!(p, z);
        assert_eq!(phase, Complex64::new(0.0, 1.0));

        let (phase, p) = y.compose(&x).unwrap();
        assert_eq!(p, z);
        assert_eq!(phase, Complex64::new(0.0, -1.0));

        let (phase, p) = z.compose(&x).unwrap();
        assert_eq!(p, y);
        assert_eq!(phase, Complex64::new(0.0, 1.0));

        let (phase, p) = y.compose(&y).unwrap();
        assert!(p.is_identity());
        assert_eq!(phase, Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_commutation() {
        let xx = Pauli::from_label("XX").unwrap();
        let zz = Pauli::from_label("ZZ").unwrap();
        let zi = Pauli::from_label("ZI").unwrap();
        assert!(xx.commutes(&zz).unwrap());
        assert!(!xx.commutes(&zi).unwrap());
        assert!(xx.commutes(&Pauli::from_label("X").unwrap()).is_err());
    }

    #[test]
    fn test_delete_qubits() {
        let p = Pauli::from_label("XYZX").unwrap();
        assert_eq!(p.delete_qubits(&[0, 2]).to_label(), "XZ");
    }

    #[test]
    fn test_set_out_of_range() {
        let mut p = Pauli::identity(2);
        assert!(matches!(
            p.set(2, PauliOp::X),
            Err(PauliError::QubitOutOfRange { qubit: 2, .. })
        ));
    }
}
