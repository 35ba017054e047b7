#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{MathError, MathResult};
use crate::matrix::{Column, Matrix, SquareMatrix};
use crate::quantum::state::QuantumState;
use crate::types::Precision;
use crate::Complex;
use num_traits::{One, Zero};
use std::fmt::{Display, Formatter};

/// A unitary matrix acting on `qubits` qubits (a `2^qubits` square matrix of complex entries).
///
/// Unitarity is a precondition rather than something checked on construction, see
/// [`QuantumGate::is_unitary`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumGate<P: Precision = f64> {
    qubits: usize,
    matrix: SquareMatrix<Complex<P>>,
}

/// Largest register accepted by the dense gate and state constructors.
pub const MAX_QUBITS: usize = 16;

/// `2^qubits`, or an error above [`MAX_QUBITS`].
pub(crate) fn dim_for_qubits(qubits: usize) -> MathResult<usize> {
    if qubits > MAX_QUBITS {
        let message = format!(
            "{:?} qubits exceeds the limit of {:?}",
            qubits, MAX_QUBITS
        );
        return Err(MathError::new(message));
    }
    Ok(1 << qubits)
}

/// Number of qubits for a dimension, if it is a power of two.
pub(crate) fn qubits_for_dim(dim: usize) -> Option<usize> {
    if dim.is_power_of_two() {
        Some(dim.trailing_zeros() as usize)
    } else {
        None
    }
}

impl<P: Precision> QuantumGate<P> {
    /// Make a gate from a square matrix whose side is a power of two.
    pub fn new(matrix: SquareMatrix<Complex<P>>) -> MathResult<Self> {
        match qubits_for_dim(matrix.dim()) {
            Some(qubits) => Ok(Self { qubits, matrix }),
            None => {
                let message = format!(
                    "Gate matrix has side {:?} which is not a power of two",
                    matrix.dim()
                );
                Err(MathError::new(message))
            }
        }
    }

    /// Make a gate from rows of complex entries.
    pub fn from_rows(rows: Vec<Vec<Complex<P>>>) -> MathResult<Self> {
        Self::new(SquareMatrix::new(rows)?)
    }

    /// Make a gate from row-major real entries.
    pub fn from_reals(qubits: usize, data: &[P]) -> MathResult<Self> {
        let data = data.iter().map(|x| Complex::new(*x, P::zero())).collect();
        Self::from_flat(qubits, data)
    }

    fn from_flat(qubits: usize, data: Vec<Complex<P>>) -> MathResult<Self> {
        let dim = dim_for_qubits(qubits)?;
        let matrix = Matrix::from_flat(dim, dim, data)?.into_square()?;
        Ok(Self { qubits, matrix })
    }

    /// Build from data already known to be `dim` squared entries, `dim` a power of two.
    fn from_kernel(dim: usize, data: Vec<Complex<P>>) -> Self {
        Self {
            qubits: dim.trailing_zeros() as usize,
            matrix: SquareMatrix::from_raw(dim, data),
        }
    }

    /// Number of qubits acted upon.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Side length of the matrix, `2^qubits`.
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &SquareMatrix<Complex<P>> {
        &self.matrix
    }

    /// Take the underlying matrix.
    pub fn into_matrix(self) -> SquareMatrix<Complex<P>> {
        self.matrix
    }

    /// The identity on `qubits` qubits.
    pub fn identity(qubits: usize) -> MathResult<Self> {
        let dim = dim_for_qubits(qubits)?;
        Ok(Self {
            qubits,
            matrix: SquareMatrix::eye(dim),
        })
    }

    /// The identity on a qubit count already checked against [`MAX_QUBITS`].
    pub(crate) fn padding(qubits: usize) -> Self {
        Self {
            qubits,
            matrix: SquareMatrix::eye(1 << qubits),
        }
    }

    /// Hadamard gate.
    pub fn h() -> Self {
        let nl = Complex::new(P::FRAC_1_SQRT_2(), P::zero());
        Self::from_kernel(2, vec![nl, nl, nl, -nl])
    }

    /// Pauli X (NOT) gate.
    pub fn x() -> Self {
        let (o, l) = (Complex::zero(), Complex::one());
        Self::from_kernel(2, vec![o, l, l, o])
    }

    /// Pauli Y gate.
    pub fn y() -> Self {
        let (o, i) = (Complex::zero(), Complex::i());
        Self::from_kernel(2, vec![o, -i, i, o])
    }

    /// Pauli Z gate.
    pub fn z() -> Self {
        let (o, l) = (Complex::zero(), Complex::one());
        Self::from_kernel(2, vec![l, o, o, -l])
    }

    /// Phase gate, a quarter turn: `diag(1, i)`.
    pub fn s() -> Self {
        let (o, l, i) = (Complex::zero(), Complex::one(), Complex::i());
        Self::from_kernel(2, vec![l, o, o, i])
    }

    /// Square root of NOT: `1/2 [[1+i, 1-i], [1-i, 1+i]]`.
    pub fn sqrt_not() -> Self {
        let half = P::one() / (P::one() + P::one());
        let a = Complex::new(half, half);
        let b = Complex::new(half, -half);
        Self::from_kernel(2, vec![a, b, b, a])
    }

    /// Square root of S, an eighth turn: `phase(pi/4)`.
    pub fn sqrt_s() -> Self {
        Self::phase(P::FRAC_PI_4())
    }

    /// `diag(1, e^(i theta))`
    pub fn phase(theta: P) -> Self {
        let (o, l) = (Complex::zero(), Complex::one());
        Self::from_kernel(2, vec![l, o, o, Complex::from_polar(P::one(), theta)])
    }

    /// Rotation about z: `diag(e^(-i theta/2), e^(i theta/2))`.
    pub fn rz(theta: P) -> Self {
        let h_theta = theta / (P::one() + P::one());
        Self::from_kernel(
            2,
            vec![
                Complex::from_polar(P::one(), -h_theta),
                Complex::zero(),
                Complex::zero(),
                Complex::from_polar(P::one(), h_theta),
            ],
        )
    }

    /// Swap two qubits.
    pub fn swap() -> Self {
        let (o, l) = (Complex::zero(), Complex::one());
        #[rustfmt::skip]
        let data = vec![
            l, o, o, o,
            o, o, l, o,
            o, l, o, o,
            o, o, o, l,
        ];
        Self::from_kernel(4, data)
    }

    /// Controlled X, first qubit is control.
    pub fn cx() -> Self {
        Self::x().controlled()
    }

    /// Controlled Y, first qubit is control.
    pub fn cy() -> Self {
        Self::y().controlled()
    }

    /// Controlled Z, first qubit is control.
    pub fn cz() -> Self {
        Self::z().controlled()
    }

    /// Controlled S, first qubit is control.
    pub fn cs() -> Self {
        Self::s().controlled()
    }

    /// Toffoli gate, first two qubits are controls.
    pub fn ccnot() -> Self {
        Self::cx().controlled()
    }

    /// This gate conditioned on a new leading control qubit: the direct sum of an identity block
    /// (control off) and this gate (control on).
    pub fn controlled(&self) -> Self {
        let identity = SquareMatrix::eye(self.dim());
        Self {
            qubits: self.qubits + 1,
            matrix: identity.direct_sum(&self.matrix),
        }
    }

    /// Kronecker product, `self` acts on the leading qubits.
    pub fn tensor(&self, other: &Self) -> Self {
        let data = kron(
            self.matrix.as_slice(),
            self.dim(),
            other.matrix.as_slice(),
            other.dim(),
        );
        Self::from_kernel(self.dim() * other.dim(), data)
    }

    /// Matrix product `self * other`: `other` is applied first.
    pub fn compose(&self, other: &Self) -> MathResult<Self> {
        if self.qubits != other.qubits {
            let message = format!(
                "Cannot compose a gate on {:?} qubits with one on {:?}",
                self.qubits, other.qubits
            );
            return Err(MathError::new(message));
        }
        Ok(self.compose_unchecked(other))
    }

    pub(crate) fn compose_unchecked(&self, other: &Self) -> Self {
        let data = matmul(self.matrix.as_slice(), other.matrix.as_slice(), self.dim());
        Self::from_kernel(self.dim(), data)
    }

    /// Conjugate transpose, the inverse of a unitary gate.
    pub fn dagger(&self) -> Self {
        Self {
            qubits: self.qubits,
            matrix: self.matrix.transpose().map(Complex::conj),
        }
    }

    /// True if `U^dagger U` is within `tolerance` of the identity in every entry.
    pub fn is_unitary(&self, tolerance: P) -> bool {
        let product = self.dagger().compose_unchecked(self);
        let n = self.dim();
        product
            .matrix
            .as_slice()
            .iter()
            .enumerate()
            .all(|(index, c)| {
                let expected = if index / n == index % n {
                    Complex::one()
                } else {
                    Complex::zero()
                };
                (*c - expected).norm() <= tolerance
            })
    }

    /// Apply this gate to a state on the same number of qubits.
    pub fn apply(&self, state: &QuantumState<P>) -> MathResult<QuantumState<P>> {
        if state.qubits() != self.qubits {
            return Err(MathError::Arity {
                expected: self.qubits,
                actual: state.qubits(),
            });
        }
        let amplitudes = matvec(
            self.matrix.as_slice(),
            state.amplitudes().entries(),
            self.dim(),
        );
        QuantumState::new(Column::new(amplitudes))
    }
}

impl<P: Precision> Display for QuantumGate<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.matrix, f)
    }
}

/// Kronecker product of row-major square matrices of sides `da` and `db`.
fn kron<P: Precision>(a: &[Complex<P>], da: usize, b: &[Complex<P>], db: usize) -> Vec<Complex<P>> {
    let d = da * db;
    let r = 0..d * d;
    into_iter!(r)
        .map(|index| {
            let (row, col) = (index / d, index % d);
            a[(row / db) * da + col / db] * b[(row % db) * db + col % db]
        })
        .collect()
}

/// Product of row-major square matrices of side `d`.
fn matmul<P: Precision>(a: &[Complex<P>], b: &[Complex<P>], d: usize) -> Vec<Complex<P>> {
    let r = 0..d * d;
    into_iter!(r)
        .map(|index| {
            let (row, col) = (index / d, index % d);
            (0..d).map(|k| a[row * d + k] * b[k * d + col]).sum::<Complex<P>>()
        })
        .collect()
}

/// Product of a row-major square matrix of side `d` with a vector.
fn matvec<P: Precision>(a: &[Complex<P>], v: &[Complex<P>], d: usize) -> Vec<Complex<P>> {
    let r = 0..d;
    into_iter!(r)
        .map(|row| (0..d).map(|k| a[row * d + k] * v[k]).sum::<Complex<P>>())
        .collect()
}
