//! A small dense state-vector simulator: gates as unitary [`SquareMatrix`](crate::matrix::SquareMatrix)
//! values, states as columns of amplitudes, and circuits as ordered parallel legs.

/// Circuit builder and evaluation.
pub mod circuit;
/// Gate library.
pub mod gates;
/// States, basis enumeration and measurement.
pub mod state;

pub use self::circuit::{CircuitBuilder, LegBuilder, ParallelLeg, QuantumCircuit};
pub use self::gates::{QuantumGate, MAX_QUBITS};
pub use self::state::{QuantumBasis, QuantumState};
