//! Arity-checked real vectors.

use crate::dispatch::Value;
use crate::errors::{MathError, MathResult};
use crate::matrix::{Column, Matrix, Row, SquareMatrix};
use crate::types::{unit_tolerance, Precision};
use std::fmt::{Display, Formatter};
use std::ops::{Deref, Index, Mul, Neg};

/// An ordered tuple of real numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<P: Precision = f64> {
    dimensions: Vec<P>,
}

impl<P: Precision> Vector<P> {
    /// Make a vector of any arity.
    pub fn new(dimensions: Vec<P>) -> Self {
        Self { dimensions }
    }

    /// Make a vector which must have exactly `arity` components.
    ///
    /// # Example
    /// ```
    /// use qmath::errors::MathError;
    /// use qmath::vector::Vector;
    ///
    /// let err = Vector::with_arity(vec![1.0], 3).unwrap_err();
    /// assert_eq!(err, MathError::Arity { expected: 3, actual: 1 });
    /// ```
    pub fn with_arity(dimensions: Vec<P>, arity: usize) -> MathResult<Self> {
        if dimensions.len() == arity {
            Ok(Self::new(dimensions))
        } else {
            Err(MathError::Arity {
                expected: arity,
                actual: dimensions.len(),
            })
        }
    }

    /// A 1-arity vector holding `x`.
    pub fn scalar(x: P) -> Self {
        Self::new(vec![x])
    }

    /// The all zero vector of a given arity.
    pub fn zeros(arity: usize) -> Self {
        Self::new(vec![P::zero(); arity])
    }

    /// The 3D origin.
    pub fn origin() -> Self {
        Self::zeros(3)
    }

    /// Unit vector along x.
    pub fn i() -> Self {
        Self::new(vec![P::one(), P::zero(), P::zero()])
    }

    /// Unit vector along y.
    pub fn j() -> Self {
        Self::new(vec![P::zero(), P::one(), P::zero()])
    }

    /// Unit vector along z.
    pub fn k() -> Self {
        Self::new(vec![P::zero(), P::zero(), P::one()])
    }

    /// Components in order.
    pub fn dimensions(&self) -> &[P] {
        &self.dimensions
    }

    /// Number of components.
    pub fn arity(&self) -> usize {
        self.dimensions.len()
    }

    /// Component `index`, if present.
    pub fn get(&self, index: usize) -> Option<P> {
        self.dimensions.get(index).cloned()
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> P {
        self.dimensions.iter().map(|x| *x * *x).sum::<P>().sqrt()
    }

    /// True if every component is zero.
    pub fn is_zero(&self) -> bool {
        self.dimensions.iter().all(|x| x.is_zero())
    }

    fn check_arity(&self, other: &Self) -> MathResult<()> {
        if self.arity() == other.arity() {
            Ok(())
        } else {
            Err(MathError::Arity {
                expected: self.arity(),
                actual: other.arity(),
            })
        }
    }

    fn zip_with<F>(&self, other: &Self, f: F) -> MathResult<Self>
    where
        F: Fn(P, P) -> P,
    {
        self.check_arity(other)?;
        Ok(Self::new(
            self.dimensions
                .iter()
                .zip(other.dimensions.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
        ))
    }

    /// Component-wise sum.
    pub fn checked_add(&self, other: &Self) -> MathResult<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Component-wise difference.
    pub fn checked_sub(&self, other: &Self) -> MathResult<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiply each component by `k`.
    pub fn scale(&self, k: P) -> Self {
        Self::new(self.dimensions.iter().map(|x| *x * k).collect())
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> MathResult<P> {
        self.check_arity(other)?;
        Ok(self
            .dimensions
            .iter()
            .zip(other.dimensions.iter())
            .map(|(a, b)| *a * *b)
            .sum())
    }

    /// View this vector as a 3D vector.
    pub fn to_3d(&self) -> MathResult<Vector3D<P>> {
        Vector3D::new(self.clone())
    }

    /// View this vector as a unit vector. The magnitude must already be one, use
    /// [`Vector::unit`] to normalize.
    ///
    /// # Example
    /// ```
    /// use qmath::vector::Vector;
    ///
    /// assert!(Vector::new(vec![0.6, 0.8]).to_unit().is_ok());
    /// assert!(Vector::new(vec![3.0, 4.0]).to_unit().is_err());
    /// ```
    pub fn to_unit(&self) -> MathResult<UnitVector<P>> {
        UnitVector::new(self.clone())
    }

    /// The vector of magnitude one pointing the same way.
    pub fn unit(&self) -> MathResult<Self> {
        if self.is_zero() {
            Err(MathError::new("Cannot normalize the zero vector"))
        } else {
            Ok(self.scale(P::one() / self.magnitude()))
        }
    }

    /// `(v.u / |u|^2) u`
    pub fn projection_onto(&self, other: &Self) -> MathResult<Self> {
        if other.is_zero() {
            return Err(MathError::new("Cannot project onto the zero vector"));
        }
        let k = self.dot(other)? / other.dot(other)?;
        Ok(other.scale(k))
    }

    /// `v - proj_u(v)`
    pub fn rejection_from(&self, other: &Self) -> MathResult<Self> {
        self.checked_sub(&self.projection_onto(other)?)
    }

    /// Angle in radians between the two vectors.
    pub fn angle_from(&self, other: &Self) -> MathResult<P> {
        if self.is_zero() || other.is_zero() {
            return Err(MathError::new("Angle with the zero vector is undefined"));
        }
        let cos = self.dot(other)? / (self.magnitude() * other.magnitude());
        Ok(cos.max(-P::one()).min(P::one()).acos())
    }

    /// Outer product, entry `(i, j)` is `self[i] * other[j]`.
    pub fn outer(&self, other: &Self) -> Matrix<P> {
        Matrix::from_fn(self.arity(), other.arity(), |i, j| {
            self.dimensions[i] * other.dimensions[j]
        })
    }

    /// As a `1 x n` row.
    pub fn row(&self) -> Row<P> {
        Row::new(self.dimensions.clone())
    }

    /// As an `n x 1` column.
    pub fn column(&self) -> Column<P> {
        Column::new(self.dimensions.clone())
    }
}

impl<P: Precision> From<Vec<P>> for Vector<P> {
    fn from(dimensions: Vec<P>) -> Self {
        Self::new(dimensions)
    }
}

impl<P: Precision> From<Row<P>> for Vector<P> {
    fn from(row: Row<P>) -> Self {
        Self::new(row.into_vec())
    }
}

impl<P: Precision> From<Column<P>> for Vector<P> {
    fn from(column: Column<P>) -> Self {
        Self::new(column.into_vec())
    }
}

impl<P: Precision> Index<usize> for Vector<P> {
    type Output = P;

    fn index(&self, index: usize) -> &P {
        &self.dimensions[index]
    }
}

impl<P: Precision> Neg for Vector<P> {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(-P::one())
    }
}

impl<P: Precision> Mul<P> for Vector<P> {
    type Output = Self;

    fn mul(self, k: P) -> Self {
        self.scale(k)
    }
}

impl<P: Precision> Display for Vector<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<")?;
        for (i, x) in self.dimensions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ">")
    }
}

/// Lift a number into a 1-arity vector: `2.0_f64.v()`.
pub trait ToVector: Precision {
    /// The 1-arity vector holding this number.
    fn v(self) -> Vector<Self>;
}

impl<P: Precision> ToVector for P {
    fn v(self) -> Vector<P> {
        Vector::scalar(self)
    }
}

/// A vector with exactly three components.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector3D<P: Precision = f64> {
    vector: Vector<P>,
}

impl<P: Precision> Vector3D<P> {
    /// Check `vector` has arity 3.
    pub fn new(vector: Vector<P>) -> MathResult<Self> {
        if vector.arity() == 3 {
            Ok(Self { vector })
        } else {
            Err(MathError::Arity {
                expected: 3,
                actual: vector.arity(),
            })
        }
    }

    /// Make from components.
    pub fn from_xyz(x: P, y: P, z: P) -> Self {
        Self {
            vector: Vector::new(vec![x, y, z]),
        }
    }

    /// The underlying vector.
    pub fn into_vector(self) -> Vector<P> {
        self.vector
    }

    /// Cross product, computed as the determinant of
    /// ```text
    /// | i  j  k  |
    /// | a0 a1 a2 |
    /// | b0 b1 b2 |
    /// ```
    /// where the first row holds the unit vectors themselves.
    ///
    /// # Example
    /// ```
    /// use qmath::vector::{Vector, Vector3D};
    ///
    /// let a = Vector3D::from_xyz(1.0, 0.0, 0.0);
    /// let b = Vector3D::from_xyz(0.0, 1.0, 0.0);
    /// assert_eq!(a.cross(&b).unwrap().into_vector(), Vector::k());
    /// ```
    pub fn cross(&self, other: &Self) -> MathResult<Self> {
        let scalars = |v: &Vector<P>| -> Vec<Value<P>> {
            v.dimensions.iter().cloned().map(Value::Scalar).collect()
        };
        let m = SquareMatrix::new(vec![
            vec![
                Value::Vector(Vector::i()),
                Value::Vector(Vector::j()),
                Value::Vector(Vector::k()),
            ],
            scalars(&self.vector),
            scalars(&other.vector),
        ])?;
        match m.determinant()? {
            Value::Vector(v) => v.to_3d(),
            other => Err(MathError::new(format!(
                "Cross product determinant produced {} rather than a vector",
                other
            ))),
        }
    }
}

impl<P: Precision> Deref for Vector3D<P> {
    type Target = Vector<P>;

    fn deref(&self) -> &Vector<P> {
        &self.vector
    }
}

impl<P: Precision> Display for Vector3D<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.vector, f)
    }
}

/// A vector of magnitude one.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitVector<P: Precision = f64> {
    vector: Vector<P>,
}

impl<P: Precision> UnitVector<P> {
    /// Check `vector` has magnitude one.
    pub fn new(vector: Vector<P>) -> MathResult<Self> {
        let magnitude = vector.magnitude();
        if (magnitude - P::one()).abs() <= unit_tolerance::<P>() {
            Ok(Self { vector })
        } else {
            Err(MathError::UnitVector {
                magnitude: magnitude.to_f64().unwrap_or(f64::NAN),
            })
        }
    }

    /// The underlying vector.
    pub fn into_vector(self) -> Vector<P> {
        self.vector
    }
}

impl<P: Precision> Deref for UnitVector<P> {
    type Target = Vector<P>;

    fn deref(&self) -> &Vector<P> {
        &self.vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_almost_eq(a: &Vector<f64>, b: &Vector<f64>) {
        assert_eq!(a.arity(), b.arity());
        a.dimensions()
            .iter()
            .zip(b.dimensions().iter())
            .for_each(|(x, y)| assert!((x - y).abs() < 1e-10, "{} != {}", a, b));
    }

    #[test]
    fn test_arity() {
        let err = 1.0_f64.v().to_3d().unwrap_err();
        assert_eq!(
            err,
            MathError::Arity {
                expected: 3,
                actual: 1
            }
        );
        assert!(Vector::new(vec![2.0, 3.0, 4.0]).to_3d().is_ok());
        assert!(Vector::new(vec![1.0, 2.0])
            .checked_add(&Vector::new(vec![1.0]))
            .is_err());
    }

    #[test]
    fn test_zero_magnitude() {
        assert_eq!(Vector::<f64>::origin().magnitude(), 0.0);
        assert!(Vector::<f64>::origin().is_zero());
        assert!(Vector::new(vec![0.0, 1e-3]).magnitude() > 0.0);
        assert!(!Vector::new(vec![0.0, 1e-3]).is_zero());
    }

    #[test]
    fn test_unit() {
        let v = Vector::new(vec![3.0, 4.0]);
        match v.to_unit() {
            Err(MathError::UnitVector { magnitude }) => assert_eq!(magnitude, 5.0),
            other => panic!("Expected unit vector error, got {:?}", other),
        }
        let u = v.unit().unwrap();
        assert_vec_almost_eq(&u, &Vector::new(vec![0.6, 0.8]));
        assert!(u.to_unit().is_ok());
        assert!(Vector::<f64>::origin().unit().is_err());
    }

    #[test]
    fn test_cross() {
        let a = Vector::new(vec![2.0, 3.0, 4.0]).to_3d().unwrap();
        let b = Vector::new(vec![5.0, 6.0, 7.0]).to_3d().unwrap();
        let c = a.cross(&b).unwrap();
        assert_vec_almost_eq(&c, &Vector::new(vec![-3.0, 6.0, -3.0]));
        assert!(c.dot(&a).unwrap().abs() < 1e-10);
        assert!(c.dot(&b).unwrap().abs() < 1e-10);

        let d = b.cross(&a).unwrap();
        assert_vec_almost_eq(&c, &-d.into_vector());
    }

    #[test]
    fn test_projection() {
        let v = Vector::new(vec![2.0, 3.0, 4.0]);
        let u = Vector::new(vec![1.0, 0.0, 0.0]);
        assert_vec_almost_eq(&v.projection_onto(&u).unwrap(), &Vector::new(vec![2.0, 0.0, 0.0]));
        assert_vec_almost_eq(&v.rejection_from(&u).unwrap(), &Vector::new(vec![0.0, 3.0, 4.0]));
        let angle = Vector::<f64>::i().angle_from(&Vector::j()).unwrap();
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
        assert!(v.projection_onto(&Vector::origin()).is_err());
    }

    #[test]
    fn test_outer() {
        let v = Vector::new(vec![1.0, 2.0]);
        let u = Vector::new(vec![3.0, 4.0, 5.0]);
        let m = v.outer(&u);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.to_rows(), vec![vec![3.0, 4.0, 5.0], vec![6.0, 8.0, 10.0]]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector::new(vec![1.0, 2.5]).to_string(), "<1, 2.5>");
    }
}
