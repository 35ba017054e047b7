#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    missing_debug_implementations,
    trivial_casts,
    unstable_features,
    unused_import_braces,
    missing_docs
)]
#![warn(
    missing_copy_implementations,
    trivial_numeric_casts,
    unused_qualifications
)]

//! Vectors, matrices and a tiny quantum circuit simulator built on a type-agnostic arithmetic
//! layer.
//!
//! Matrices hold any [`Ring`](types::Ring) entry, so the same cofactor expansion computes a numeric
//! determinant or, with vector entries, a cross product. The [`dispatch`] module lets scalars,
//! vectors, matrices, functions and operators be added and multiplied without knowing their
//! kinds up front.
//!
//! # Example (Bell pair)
//! ```
//! use qmath::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> MathResult<()> {
//! // H on qubit 0, then a CNOT controlled by qubit 0.
//! let circuit = QuantumCircuit::<f64>::circuit(2, |c| {
//!     c.parallel(|leg| leg.apply_gate(0..1, QuantumGate::h()).map(|_| ()))?
//!         .parallel(|leg| leg.apply_gate(0..2, QuantumGate::cx()).map(|_| ()))?;
//!     Ok(())
//! })?;
//! let state = circuit.apply(&QuantumState::basis(2, 0)?)?;
//!
//! // Only |00> and |11> can be measured.
//! let mut rng = StdRng::seed_from_u64(1);
//! let measured = state.measure(&mut rng)?;
//! let p = measured.probabilities();
//! assert!(p[0] == 1.0 || p[3] == 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Example (cross product)
//! ```
//! use qmath::prelude::*;
//!
//! # fn main() -> MathResult<()> {
//! let a = Vector3D::from_xyz(1.0, 0.0, 0.0);
//! let b = Vector3D::from_xyz(0.0, 1.0, 0.0);
//! assert_eq!(a.cross(&b)?.into_vector(), Vector::k());
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod rayon_helper;

/// Runtime kinds, values and the add/multiply dispatcher.
pub mod dispatch;
/// Error types.
pub mod errors;
/// Dense matrices, rows and columns.
pub mod matrix;
pub mod quantum;
/// Numeric traits.
pub mod types;
/// Bit manipulation helpers.
pub mod utils;
/// Real vectors.
pub mod vector;

pub use num_complex::Complex;
pub use rand;

/// Commonly used types.
pub mod prelude {
    pub use crate::dispatch::{Dispatcher, Field, Kind, Operation, Operator, Value};
    pub use crate::errors::{MathError, MathResult};
    pub use crate::matrix::{Column, Matrix, Row, SquareMatrix};
    pub use crate::quantum::{QuantumBasis, QuantumCircuit, QuantumGate, QuantumState};
    pub use crate::types::{Precision, Ring};
    pub use crate::vector::{ToVector, UnitVector, Vector, Vector3D};
    pub use crate::Complex;
}
