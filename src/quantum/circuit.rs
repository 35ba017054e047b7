use crate::errors::{MathError, MathResult};
use crate::quantum::gates::{QuantumGate, MAX_QUBITS};
use crate::quantum::state::QuantumState;
use crate::types::Precision;
use std::cell::OnceCell;
use std::ops::Range;
use tracing::{debug, trace};

/// One time step of a circuit: gates on disjoint qubit ranges, acting simultaneously.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelLeg<P: Precision = f64> {
    qubits: usize,
    // Sorted by range start.
    placements: Vec<(Range<usize>, QuantumGate<P>)>,
}

impl<P: Precision> ParallelLeg<P> {
    /// Qubits in the register this leg acts on.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// The placed gates in qubit order.
    pub fn placements(&self) -> &[(Range<usize>, QuantumGate<P>)] {
        &self.placements
    }

    /// The single gate equivalent to this leg: the placed gates tensored in qubit order with
    /// identities on every unaddressed qubit.
    pub fn evaluate(&self) -> QuantumGate<P> {
        let mut cursor = 0;
        let mut acc = QuantumGate::padding(0);
        for (range, gate) in &self.placements {
            if range.start > cursor {
                acc = acc.tensor(&QuantumGate::padding(range.start - cursor));
            }
            acc = acc.tensor(gate);
            cursor = range.end;
        }
        if self.qubits > cursor {
            acc = acc.tensor(&QuantumGate::padding(self.qubits - cursor));
        }
        trace!(
            qubits = self.qubits,
            gates = self.placements.len(),
            "evaluated parallel leg"
        );
        acc
    }
}

/// Collects the gates of a single [`ParallelLeg`].
#[derive(Debug)]
pub struct LegBuilder<P: Precision = f64> {
    leg: ParallelLeg<P>,
}

impl<P: Precision> LegBuilder<P> {
    fn new(qubits: usize) -> Self {
        Self {
            leg: ParallelLeg {
                qubits,
                placements: vec![],
            },
        }
    }

    /// Place `gate` on the half-open qubit `range`. The range must lie inside the register,
    /// must not overlap any range already in this leg, and must span exactly the gate's qubits.
    pub fn apply_gate(&mut self, range: Range<usize>, gate: QuantumGate<P>) -> MathResult<&mut Self> {
        let n = self.leg.qubits;
        if range.start >= range.end || range.end > n {
            let message = format!(
                "Qubit range {:?} is empty or outside a register of {:?} qubits",
                range, n
            );
            return Err(MathError::new(message));
        }
        if range.len() != gate.qubits() {
            return Err(MathError::Arity {
                expected: gate.qubits(),
                actual: range.len(),
            });
        }
        let overlap = self
            .leg
            .placements
            .iter()
            .find(|(r, _)| r.start < range.end && range.start < r.end);
        if let Some((r, _)) = overlap {
            let message = format!("Qubit range {:?} overlaps {:?} in the same leg", range, r);
            return Err(MathError::new(message));
        }
        let index = self
            .leg
            .placements
            .partition_point(|(r, _)| r.start < range.start);
        self.leg.placements.insert(index, (range, gate));
        Ok(self)
    }
}

/// Accumulates parallel legs until [`CircuitBuilder::build`] freezes them into a
/// [`QuantumCircuit`].
#[derive(Debug)]
pub struct CircuitBuilder<P: Precision = f64> {
    qubits: usize,
    legs: Vec<ParallelLeg<P>>,
}

impl<P: Precision> CircuitBuilder<P> {
    /// A builder for a register of `qubits` qubits.
    pub fn new(qubits: usize) -> Self {
        Self {
            qubits,
            legs: vec![],
        }
    }

    /// Number of qubits in the register.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Append one leg, filled in by `f`.
    ///
    /// # Example
    /// ```
    /// use qmath::quantum::{CircuitBuilder, QuantumGate};
    ///
    /// let mut builder = CircuitBuilder::<f64>::new(2);
    /// builder.parallel(|leg| {
    ///     leg.apply_gate(0..1, QuantumGate::h())?
    ///         .apply_gate(1..2, QuantumGate::x())?;
    ///     Ok(())
    /// }).unwrap();
    /// let circuit = builder.build().unwrap();
    /// assert_eq!(circuit.parallel_legs().len(), 1);
    /// ```
    pub fn parallel<F>(&mut self, f: F) -> MathResult<&mut Self>
    where
        F: FnOnce(&mut LegBuilder<P>) -> MathResult<()>,
    {
        let mut leg = LegBuilder::new(self.qubits);
        f(&mut leg)?;
        self.legs.push(leg.leg);
        Ok(self)
    }

    /// Finalize the circuit.
    pub fn build(self) -> MathResult<QuantumCircuit<P>> {
        if self.qubits == 0 {
            return Err(MathError::new("A circuit needs at least one qubit"));
        }
        if self.qubits > MAX_QUBITS {
            let message = format!(
                "A circuit on {:?} qubits exceeds the limit of {:?}",
                self.qubits, MAX_QUBITS
            );
            return Err(MathError::new(message));
        }
        Ok(QuantumCircuit {
            qubits: self.qubits,
            legs: self.legs,
            evaluated: OnceCell::new(),
        })
    }
}

/// An immutable sequence of parallel legs over `n` qubits. The equivalent gate is computed on
/// first use and cached.
#[derive(Debug, Clone)]
pub struct QuantumCircuit<P: Precision = f64> {
    qubits: usize,
    legs: Vec<ParallelLeg<P>>,
    evaluated: OnceCell<QuantumGate<P>>,
}

impl<P: Precision> QuantumCircuit<P> {
    /// Start building a circuit on `qubits` qubits.
    pub fn builder(qubits: usize) -> CircuitBuilder<P> {
        CircuitBuilder::new(qubits)
    }

    /// Build a circuit in one go.
    ///
    /// # Example
    /// ```
    /// use qmath::quantum::{QuantumCircuit, QuantumGate, QuantumState};
    ///
    /// let circuit = QuantumCircuit::<f64>::circuit(2, |c| {
    ///     c.parallel(|leg| leg.apply_gate(0..1, QuantumGate::x()).map(|_| ()))?
    ///         .parallel(|leg| leg.apply_gate(0..2, QuantumGate::cx()).map(|_| ()))?;
    ///     Ok(())
    /// }).unwrap();
    /// // |00> -> |10> -> |11>
    /// let out = circuit.apply(&QuantumState::basis(2, 0).unwrap()).unwrap();
    /// assert_eq!(out.probabilities()[3], 1.0);
    /// ```
    pub fn circuit<F>(qubits: usize, f: F) -> MathResult<Self>
    where
        F: FnOnce(&mut CircuitBuilder<P>) -> MathResult<()>,
    {
        let mut builder = CircuitBuilder::new(qubits);
        f(&mut builder)?;
        builder.build()
    }

    /// Number of qubits.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// The legs in application order.
    pub fn parallel_legs(&self) -> &[ParallelLeg<P>] {
        &self.legs
    }

    /// The gate equivalent to the whole circuit, `legN * ... * leg1`.
    pub fn evaluate(&self) -> &QuantumGate<P> {
        self.evaluated.get_or_init(|| {
            debug!(
                qubits = self.qubits,
                legs = self.legs.len(),
                "evaluating circuit"
            );
            self.legs
                .iter()
                .fold(QuantumGate::padding(self.qubits), |acc, leg| {
                    leg.evaluate().compose_unchecked(&acc)
                })
        })
    }

    /// Run the circuit on `state`. No renormalization is done.
    pub fn apply(&self, state: &QuantumState<P>) -> MathResult<QuantumState<P>> {
        self.evaluate().apply(state)
    }
}
