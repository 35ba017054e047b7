use qmath::prelude::*;

mod utils;
use utils::{assert_amplitudes_almost_eq, assert_gate_almost_eq};

fn one_gate(n: usize, range: std::ops::Range<usize>, gate: QuantumGate) -> QuantumCircuit {
    QuantumCircuit::<f64>::circuit(n, |c| {
        c.parallel(|leg| leg.apply_gate(range, gate).map(|_| ()))?;
        Ok(())
    })
    .unwrap()
}

fn library() -> Vec<QuantumGate> {
    vec![
        QuantumGate::h(),
        QuantumGate::x(),
        QuantumGate::y(),
        QuantumGate::z(),
        QuantumGate::s(),
        QuantumGate::sqrt_not(),
        QuantumGate::sqrt_s(),
        QuantumGate::cx(),
        QuantumGate::cy(),
        QuantumGate::cz(),
        QuantumGate::cs(),
        QuantumGate::ccnot(),
    ]
}

#[test]
fn test_library_is_unitary() {
    for gate in library() {
        assert!(gate.is_unitary(1e-10), "{}", gate);
        let product = gate.dagger().compose(&gate).unwrap();
        assert_gate_almost_eq(&product, &QuantumGate::identity(gate.qubits()).unwrap(), 10);
    }
}

#[test]
fn test_h_twice_on_qubit_one() {
    let circuit = QuantumCircuit::<f64>::circuit(3, |c| {
        c.parallel(|leg| leg.apply_gate(1..2, QuantumGate::h()).map(|_| ()))?
            .parallel(|leg| leg.apply_gate(1..2, QuantumGate::h()).map(|_| ()))?;
        Ok(())
    })
    .unwrap();
    assert_gate_almost_eq(circuit.evaluate(), &QuantumGate::identity(3).unwrap(), 10);
}

#[test]
fn test_cx_on_10() {
    let circuit = one_gate(2, 0..2, QuantumGate::cx());
    let out = circuit.apply(&QuantumState::basis(2, 0b10).unwrap()).unwrap();
    assert_eq!(out, QuantumState::basis(2, 0b11).unwrap());
    let out = circuit.apply(&QuantumState::basis(2, 0b01).unwrap()).unwrap();
    assert_eq!(out, QuantumState::basis(2, 0b01).unwrap());
}

#[test]
fn test_ccnot_truth_table() {
    let circuit = one_gate(3, 0..3, QuantumGate::ccnot());
    for index in 0..8 {
        let expected = if index >> 1 == 0b11 { index ^ 1 } else { index };
        let out = circuit
            .apply(&QuantumState::basis(3, index).unwrap())
            .unwrap();
        assert_eq!(out, QuantumState::basis(3, expected).unwrap());
    }
}

#[test]
fn test_toffoli_in_larger_register() {
    // CCNOT on qubits 1..4 of 4, with X on qubit 0 in the same leg.
    let circuit = QuantumCircuit::<f64>::circuit(4, |c| {
        c.parallel(|leg| {
            leg.apply_gate(1..4, QuantumGate::ccnot())?
                .apply_gate(0..1, QuantumGate::x())?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    // |0110> -> |1111>
    let out = circuit
        .apply(&QuantumState::basis(4, 0b0110).unwrap())
        .unwrap();
    assert_eq!(out, QuantumState::basis(4, 0b1111).unwrap());
}

#[test]
fn test_bell_state() {
    let circuit = QuantumCircuit::<f64>::circuit(2, |c| {
        c.parallel(|leg| leg.apply_gate(0..1, QuantumGate::h()).map(|_| ()))?
            .parallel(|leg| leg.apply_gate(0..2, QuantumGate::cx()).map(|_| ()))?;
        Ok(())
    })
    .unwrap();
    let out = circuit.apply(&QuantumState::basis(2, 0).unwrap()).unwrap();
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let expected = QuantumState::from_reals(&[h, 0.0, 0.0, h]).unwrap();
    assert_amplitudes_almost_eq(
        out.amplitudes().entries(),
        expected.amplitudes().entries(),
        10,
    );
}

#[test]
fn test_leg_matches_tensor() {
    let circuit = QuantumCircuit::<f64>::circuit(3, |c| {
        c.parallel(|leg| {
            leg.apply_gate(2..3, QuantumGate::s())?
                .apply_gate(0..1, QuantumGate::h())?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    let expected = QuantumGate::h()
        .tensor(&QuantumGate::identity(1).unwrap())
        .tensor(&QuantumGate::s());
    assert_gate_almost_eq(&circuit.parallel_legs()[0].evaluate(), &expected, 10);
    assert_gate_almost_eq(circuit.evaluate(), &expected, 10);
}

#[test]
fn test_overlapping_ranges_fail() {
    let result = QuantumCircuit::<f64>::circuit(3, |c| {
        c.parallel(|leg| {
            leg.apply_gate(0..2, QuantumGate::cz())?
                .apply_gate(1..3, QuantumGate::cx())?;
            Ok(())
        })?;
        Ok(())
    });
    assert!(result.is_err());
}

#[test]
fn test_apply_preserves_norm() {
    let circuit = QuantumCircuit::<f64>::circuit(3, |c| {
        c.parallel(|leg| leg.apply_gate(0..1, QuantumGate::h()).map(|_| ()))?
            .parallel(|leg| {
                leg.apply_gate(0..2, QuantumGate::cy())?
                    .apply_gate(2..3, QuantumGate::sqrt_not())?;
                Ok(())
            })?
            .parallel(|leg| leg.apply_gate(1..3, QuantumGate::cs()).map(|_| ()))?;
        Ok(())
    })
    .unwrap();
    for index in 0..8 {
        let out = circuit
            .apply(&QuantumState::basis(3, index).unwrap())
            .unwrap();
        utils::assert_almost_eq(out.prob_magnitude(), 1.0, 10);
    }
}

#[test]
fn test_oversized_registers_are_errors() {
    assert!(QuantumState::<f64>::basis(64, 0).is_err());
    assert!(QuantumCircuit::<f64>::builder(64).build().is_err());
    assert!(QuantumGate::<f64>::identity(64).is_err());
    assert!(QuantumBasis::<f64>::eye_basis(64).is_err());
}
