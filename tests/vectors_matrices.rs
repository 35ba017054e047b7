use qmath::prelude::*;

mod utils;
use utils::assert_almost_eq;

fn sample_vectors() -> Vec<Vector3D<f64>> {
    vec![
        Vector3D::from_xyz(1.0, 2.0, 3.0),
        Vector3D::from_xyz(-4.0, 0.5, 2.0),
        Vector3D::from_xyz(0.0, 0.0, 1.0),
        Vector3D::from_xyz(3.0, -7.0, 0.25),
        Vector3D::from_xyz(0.0, 0.0, 0.0),
    ]
}

fn sample_matrices() -> Vec<SquareMatrix<f64>> {
    vec![
        SquareMatrix::new(vec![vec![2.0]]).unwrap(),
        SquareMatrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(),
        SquareMatrix::new(vec![
            vec![2.0, -3.0, 1.0],
            vec![2.0, 0.0, -1.0],
            vec![1.0, 4.0, 5.0],
        ])
        .unwrap(),
        SquareMatrix::new(vec![
            vec![1.0, 0.0, 2.0, -1.0],
            vec![3.0, 0.0, 0.0, 5.0],
            vec![2.0, 1.0, 4.0, -3.0],
            vec![1.0, 0.0, 5.0, 0.0],
        ])
        .unwrap(),
    ]
}

#[test]
fn test_magnitude_zero_iff_zero_vector() {
    assert_eq!(Vector::<f64>::zeros(4).magnitude(), 0.0);
    assert!(Vector::<f64>::origin().is_zero());
    for v in sample_vectors() {
        assert_eq!(v.magnitude() == 0.0, v.is_zero());
    }
    assert!(Vector::new(vec![0.0, 1e-100]).magnitude() > 0.0);
}

#[test]
fn test_cross_orthogonal_and_anticommutative() {
    let vectors = sample_vectors();
    for a in &vectors {
        for b in &vectors {
            let ab = a.cross(b).unwrap();
            let ba = b.cross(a).unwrap();
            assert_almost_eq(ab.dot(a).unwrap(), 0.0, 10);
            assert_almost_eq(ab.dot(b).unwrap(), 0.0, 10);
            let negated = -ba.into_vector();
            ab.dimensions()
                .iter()
                .zip(negated.dimensions())
                .for_each(|(x, y)| assert_almost_eq(*x, *y, 10));
        }
    }
}

#[test]
fn test_cross_basis() {
    let i = Vector::<f64>::i().to_3d().unwrap();
    let j = Vector::<f64>::j().to_3d().unwrap();
    assert_eq!(i.cross(&j).unwrap().into_vector(), Vector::k());
    assert_eq!(j.cross(&i).unwrap().into_vector(), -Vector::<f64>::k());
}

#[test]
fn test_to_3d_arity() {
    let err = 1.0_f64.v().to_3d().unwrap_err();
    assert_eq!(
        err,
        MathError::Arity {
            expected: 3,
            actual: 1
        }
    );
    assert_eq!(err.to_string(), "Expected vector of arity 3 but got 1.");
}

#[test]
fn test_unit_vectors() {
    let v = Vector::new(vec![3.0, 4.0]);
    assert!(matches!(
        v.to_unit(),
        Err(MathError::UnitVector { magnitude }) if magnitude == 5.0
    ));
    let u = v.unit().unwrap();
    assert_almost_eq(u.magnitude(), 1.0, 12);
    assert!(u.to_unit().is_ok());
    assert!(Vector::<f64>::zeros(2).unit().is_err());
}

#[test]
fn test_determinant_of_transpose() {
    for m in sample_matrices() {
        assert_almost_eq(
            m.transpose().determinant().unwrap(),
            m.determinant().unwrap(),
            10,
        );
    }
}

#[test]
fn test_determinant_direct_sum_eye() {
    for m in sample_matrices() {
        for k in 1..4 {
            let sum = m.direct_sum(&SquareMatrix::eye(k));
            assert_eq!(sum.dim(), m.dim() + k);
            assert_almost_eq(sum.determinant().unwrap(), m.determinant().unwrap(), 10);
        }
    }
}

#[test]
fn test_known_determinants() {
    let dets: Vec<f64> = sample_matrices()
        .iter()
        .map(|m| m.determinant().unwrap())
        .collect();
    assert_eq!(dets, vec![2.0, -2.0, 49.0, 30.0]);
}

#[test]
fn test_replace_round_trip() {
    for m in sample_matrices() {
        for i in 0..m.dim() {
            assert_eq!(m.replace_row(i, m.row(i).unwrap()).unwrap(), m);
            assert_eq!(m.replace_column(i, m.column(i).unwrap()).unwrap(), m);
        }
    }
}

#[test]
fn test_replace_is_pure() {
    let m = SquareMatrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let replaced = m.replace_row(0, Row::new(vec![9.0, 9.0])).unwrap();
    assert_eq!(m.row(0).unwrap(), Row::new(vec![1.0, 2.0]));
    assert_eq!(replaced.row(0).unwrap(), Row::new(vec![9.0, 9.0]));
    assert!(matches!(
        m.replace_column(1, Column::new(vec![1.0])),
        Err(MathError::Arity {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_shape_errors() {
    assert!(matches!(
        Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![5.0, 6.0, 7.0, 8.0]]),
        Err(MathError::Shape {
            row: 1,
            expected: 3,
            actual: 4
        })
    ));
    assert!(matches!(
        SquareMatrix::new(vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]),
        Err(MathError::MatrixDimension { rows: 2, cols: 4 })
    ));
}
