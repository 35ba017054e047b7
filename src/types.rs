use crate::errors::MathResult;
use crate::Complex;
use num_traits::float::FloatConst;
use num_traits::{Float, NumAssign};
use std::fmt::{Debug, Display};
use std::iter::{Product, Sum};

/// The float precision of vectors, matrices and quantum amplitudes.
///
/// Every precision is also a [`Ring`], so matrices over any `P` multiply and expand
/// determinants.
pub trait Precision:
    Default
    + NumAssign
    + Float
    + FloatConst
    + Ring
    + Sum
    + Send
    + Sync
    + Display
    + Product
    + Debug
    + 'static
{
}

impl Precision for f64 {}

impl Precision for f32 {}

/// An entry type over which matrices can be multiplied and determinants expanded.
///
/// Operations are fallible so that heterogeneous entries (see [`crate::dispatch::Value`]) can
/// report combinations which have no meaning, like adding a scalar to a vector.
pub trait Ring: Clone {
    /// `self + rhs`
    fn try_add(&self, rhs: &Self) -> MathResult<Self>;
    /// `self - rhs`
    fn try_sub(&self, rhs: &Self) -> MathResult<Self>;
    /// `self * rhs`
    fn try_mul(&self, rhs: &Self) -> MathResult<Self>;
}

macro_rules! impl_float_ring {
    ($($t:ty),*) => {
        $(
            impl Ring for $t {
                fn try_add(&self, rhs: &Self) -> MathResult<Self> {
                    Ok(*self + *rhs)
                }

                fn try_sub(&self, rhs: &Self) -> MathResult<Self> {
                    Ok(*self - *rhs)
                }

                fn try_mul(&self, rhs: &Self) -> MathResult<Self> {
                    Ok(*self * *rhs)
                }
            }
        )*
    };
}

impl_float_ring!(f32, f64);

impl<P: Precision> Ring for Complex<P> {
    fn try_add(&self, rhs: &Self) -> MathResult<Self> {
        Ok(*self + *rhs)
    }

    fn try_sub(&self, rhs: &Self) -> MathResult<Self> {
        Ok(*self - *rhs)
    }

    fn try_mul(&self, rhs: &Self) -> MathResult<Self> {
        Ok(*self * *rhs)
    }
}

/// Tolerance used when a value must be exactly one (unit vectors) but is computed in floating
/// point.
pub(crate) fn unit_tolerance<P: Precision>() -> P {
    P::epsilon().sqrt()
}
