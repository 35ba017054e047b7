#[macro_use]
extern crate bencher;
extern crate qmath;

use bencher::Bencher;

use qmath::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A ladder of H and cX legs over `n` qubits.
fn ladder(n: usize) -> MathResult<QuantumCircuit> {
    QuantumCircuit::circuit(n, |c| {
        c.parallel(|leg| {
            for q in 0..n {
                leg.apply_gate(q..q + 1, QuantumGate::h())?;
            }
            Ok(())
        })?;
        for q in 0..n - 1 {
            c.parallel(|leg| leg.apply_gate(q..q + 2, QuantumGate::cx()).map(|_| ()))?;
        }
        Ok(())
    })
}

fn bench_evaluate_small(bencher: &mut Bencher) {
    bencher.iter(|| {
        let circuit = ladder(3).unwrap();
        circuit.evaluate().dim()
    });
}

fn bench_evaluate_large(bencher: &mut Bencher) {
    bencher.iter(|| {
        let circuit = ladder(6).unwrap();
        circuit.evaluate().dim()
    });
}

fn bench_apply(bencher: &mut Bencher) {
    let circuit = ladder(6).unwrap();
    circuit.evaluate();
    let state = QuantumState::basis(6, 0).unwrap();
    bencher.iter(|| circuit.apply(&state).unwrap());
}

fn bench_measure(bencher: &mut Bencher) {
    let circuit = ladder(6).unwrap();
    let state = circuit.apply(&QuantumState::basis(6, 0).unwrap()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    bencher.iter(|| state.measure(&mut rng).unwrap());
}

fn bench_determinant(bencher: &mut Bencher) {
    let m = SquareMatrix::new(
        (0..7)
            .map(|r| (0..7).map(|c| ((r * 7 + c) % 5) as f64 - 2.0).collect())
            .collect(),
    )
    .unwrap();
    bencher.iter(|| m.determinant().unwrap());
}

fn bench_cross(bencher: &mut Bencher) {
    let a = Vector3D::from_xyz(1.0, 2.0, 3.0);
    let b = Vector3D::from_xyz(-4.0, 0.5, 2.0);
    bencher.iter(|| a.cross(&b).unwrap());
}

benchmark_group!(
    benches,
    bench_evaluate_small,
    bench_evaluate_large,
    bench_apply,
    bench_measure,
    bench_determinant,
    bench_cross
);
benchmark_main!(benches);
