use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::dispatch::Operation;

/// An error from a vector, matrix, dispatch or circuit operation.
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// A generic error.
    Generic(String),
    /// A vector of a fixed arity was required but the vector had `actual` components.
    Arity {
        /// Required number of components.
        expected: usize,
        /// Number of components found.
        actual: usize,
    },
    /// A unit vector was required but the vector had magnitude `magnitude`.
    UnitVector {
        /// Magnitude of the offending vector.
        magnitude: f64,
    },
    /// A square matrix was required.
    MatrixDimension {
        /// Number of rows found.
        rows: usize,
        /// Number of columns found.
        cols: usize,
    },
    /// Matrix rows were ragged.
    Shape {
        /// Index of the first offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// No dispatch rule exists for the operands and operation.
    BadOperation {
        /// Rendering of the left operand.
        lhs: String,
        /// Rendering of the right operand.
        rhs: String,
        /// The operation which was attempted.
        operation: Operation,
    },
}

impl MathError {
    /// Construct a new generic error.
    pub fn new<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Generic(msg.into())
    }
}

/// A result which may contain a math error.
pub type MathResult<T> = Result<T, MathError>;

impl Error for MathError {}

impl Display for MathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(msg) => write!(f, "{}", msg),
            Self::Arity { expected, actual } => write!(
                f,
                "Expected vector of arity {} but got {}.",
                expected, actual
            ),
            Self::UnitVector { magnitude } => write!(
                f,
                "Expected unit vector but got vector of magnitude {}.",
                magnitude
            ),
            Self::MatrixDimension { rows, cols } => write!(
                f,
                "Matrix must be square shaped, found {}x{}.",
                rows, cols
            ),
            Self::Shape {
                row,
                expected,
                actual,
            } => write!(
                f,
                "Matrix rows must have equal length, row {} has {} entries versus {}.",
                row, actual, expected
            ),
            Self::BadOperation {
                lhs,
                rhs,
                operation,
            } => write!(f, "Cannot execute operation: {} {} {}", lhs, operation, rhs),
        }
    }
}
