#![allow(dead_code)]

use qmath::prelude::*;

/// Compare two floats after rounding to `prec` decimal places.
pub fn assert_almost_eq(a: f64, b: f64, prec: i32) {
    let mult = 10.0f64.powi(prec);
    let (a, b) = (a * mult, b * mult);
    let (a, b) = (a.round(), b.round());
    assert_eq!(a / mult, b / mult);
}

/// Compare complex amplitudes entry by entry.
pub fn assert_amplitudes_almost_eq(a: &[Complex<f64>], b: &[Complex<f64>], prec: i32) {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).for_each(|(x, y)| {
        assert_almost_eq(x.re, y.re, prec);
        assert_almost_eq(x.im, y.im, prec);
    });
}

/// Compare two gates entry by entry.
pub fn assert_gate_almost_eq(a: &QuantumGate<f64>, b: &QuantumGate<f64>, prec: i32) {
    assert_eq!(a.qubits(), b.qubits());
    assert_amplitudes_almost_eq(a.matrix().as_slice(), b.matrix().as_slice(), prec);
}
