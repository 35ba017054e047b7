#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{MathError, MathResult};
use crate::matrix::Column;
use crate::quantum::gates::{dim_for_qubits, qubits_for_dim};
use crate::types::Precision;
use crate::utils::{extract_bits, matches_bits};
use crate::Complex;
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt::{Display, Formatter};
use tracing::trace;

/// The amplitudes of an `n` qubit register, one per computational basis state.
///
/// Qubits are big-endian to match kron product standards: `|abc>` means `q0=a`, `q1=b`, `q2=c`,
/// so qubit 0 is the most significant bit of a basis index.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState<P: Precision = f64> {
    qubits: usize,
    amplitudes: Column<Complex<P>>,
}

impl<P: Precision> QuantumState<P> {
    /// Make a state from `2^n` amplitudes. Normalization is not checked.
    pub fn new(amplitudes: Column<Complex<P>>) -> MathResult<Self> {
        match qubits_for_dim(amplitudes.len()) {
            Some(qubits) => Ok(Self { qubits, amplitudes }),
            None => {
                let message = format!(
                    "State has {:?} amplitudes which is not a power of two",
                    amplitudes.len()
                );
                Err(MathError::new(message))
            }
        }
    }

    /// Make a state from real amplitudes.
    ///
    /// # Example
    /// ```
    /// use qmath::quantum::QuantumState;
    ///
    /// // |10>
    /// let state = QuantumState::from_reals(&[0.0, 0.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(state.qubits(), 2);
    /// assert_eq!(state.measure_prob(&[0], 1), 1.0);
    /// ```
    pub fn from_reals(data: &[P]) -> MathResult<Self> {
        Self::new(Column::new(
            data.iter().map(|x| Complex::new(*x, P::zero())).collect(),
        ))
    }

    /// The basis state `|index>` on `qubits` qubits.
    pub fn basis(qubits: usize, index: usize) -> MathResult<Self> {
        let dim = dim_for_qubits(qubits)?;
        if index >= dim {
            let message = format!(
                "Basis index {:?} out of range for {:?} qubits",
                index, qubits
            );
            return Err(MathError::new(message));
        }
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[index] = Complex::one();
        Ok(Self {
            qubits,
            amplitudes: Column::new(amplitudes),
        })
    }

    /// Number of qubits.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// The amplitudes as a column.
    pub fn amplitudes(&self) -> &Column<Complex<P>> {
        &self.amplitudes
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> Option<Complex<P>> {
        self.amplitudes.get(index).cloned()
    }

    /// Total probability mass, one for a normalized state.
    pub fn prob_magnitude(&self) -> P {
        iter!(self.amplitudes.entries())
            .map(Complex::<P>::norm_sqr)
            .sum()
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<P> {
        iter!(self.amplitudes.entries())
            .map(Complex::<P>::norm_sqr)
            .collect()
    }

    /// Probability that measuring the qubits at `indices` gives `measured`, where bit `i` of
    /// `measured` is the value of qubit `indices[i]`.
    pub fn measure_prob(&self, indices: &[usize], measured: usize) -> P {
        let n = self.qubits;
        iter!(self.amplitudes.entries())
            .enumerate()
            .filter(|(index, _)| matches_bits(n, *index, indices, measured))
            .map(|(_, c)| c.norm_sqr())
            .sum()
    }

    /// Sample a basis index with probability `|amplitude|^2`. Basis states of zero probability
    /// are never returned.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> MathResult<usize> {
        let total = self.prob_magnitude();
        let mut r = P::from(rng.gen::<f64>())
            .ok_or_else(|| MathError::new("Could not convert random draw"))?
            * total;
        let mut last = None;
        for (index, p) in self.probabilities().into_iter().enumerate() {
            if p <= P::zero() {
                continue;
            }
            if r < p {
                return Ok(index);
            }
            r -= p;
            last = Some(index);
        }
        // Rounding can leave a sliver of r past the last nonzero entry.
        last.ok_or_else(|| MathError::new("Cannot measure a state with no probability mass"))
    }

    /// Measure every qubit, returning the collapsed basis state.
    pub fn measure<R: Rng + ?Sized>(&self, rng: &mut R) -> MathResult<Self> {
        let index = self.sample(rng)?;
        trace!(qubits = self.qubits, index, "measured state");
        Self::basis(self.qubits, index)
    }

    /// [`QuantumState::measure`] using the thread local random source.
    pub fn measure_random(&self) -> MathResult<Self> {
        self.measure(&mut rand::thread_rng())
    }

    /// Measure the qubits at `indices` only. Returns the measured bits (bit `i` is qubit
    /// `indices[i]`), the probability of that outcome, and the collapsed, renormalized state.
    pub fn measure_qubits<R: Rng + ?Sized>(
        &self,
        indices: &[usize],
        rng: &mut R,
    ) -> MathResult<(usize, P, Self)> {
        let n = self.qubits;
        if let Some(index) = indices.iter().find(|index| **index >= n) {
            let message = format!("Qubit {:?} out of range for {:?} qubits", index, n);
            return Err(MathError::new(message));
        }
        let sampled = self.sample(rng)?;
        let flipped: Vec<_> = indices.iter().map(|index| n - 1 - index).collect();
        let measured = extract_bits(sampled, &flipped);
        let p = self.measure_prob(indices, measured);
        let norm = p.sqrt();
        let amplitudes = self
            .amplitudes
            .entries()
            .iter()
            .enumerate()
            .map(|(index, c)| {
                if matches_bits(n, index, indices, measured) {
                    c.unscale(norm)
                } else {
                    Complex::zero()
                }
            })
            .collect();
        trace!(?indices, measured, "measured qubits");
        Ok((
            measured,
            p,
            Self {
                qubits: n,
                amplitudes: Column::new(amplitudes),
            },
        ))
    }
}

impl<P: Precision> Display for QuantumState<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.amplitudes, f)
    }
}

/// The computational basis of an `n` qubit register.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumBasis<P: Precision = f64> {
    qubits: usize,
    states: Vec<QuantumState<P>>,
}

impl<P: Precision> QuantumBasis<P> {
    /// All `2^n` basis states, `states()[i]` is `|i>`.
    ///
    /// # Example
    /// ```
    /// use qmath::quantum::QuantumBasis;
    ///
    /// let basis = QuantumBasis::<f64>::eye_basis(3).unwrap();
    /// assert_eq!(basis.states().len(), 8);
    /// assert_eq!(basis.states()[5].probabilities()[5], 1.0);
    /// ```
    pub fn eye_basis(qubits: usize) -> MathResult<Self> {
        let dim = dim_for_qubits(qubits)?;
        let states = (0..dim)
            .map(|index| {
                let mut amplitudes = vec![Complex::zero(); dim];
                amplitudes[index] = Complex::one();
                QuantumState {
                    qubits,
                    amplitudes: Column::new(amplitudes),
                }
            })
            .collect();
        Ok(Self { qubits, states })
    }

    /// The single basis state `|index>`, without enumerating the others.
    pub fn state(qubits: usize, index: usize) -> MathResult<QuantumState<P>> {
        QuantumState::basis(qubits, index)
    }

    /// Number of qubits.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// The basis states in index order.
    pub fn states(&self) -> &[QuantumState<P>] {
        &self.states
    }

    /// Take the basis states.
    pub fn into_states(self) -> Vec<QuantumState<P>> {
        self.states
    }
}
