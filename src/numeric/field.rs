use super::Rational;
use crate::Error;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

/// An ordered field that vectors, tableaux and algorithms are generic over.
///
/// Two implementations exist:
///
/// - [`Rational`]: exact; every predicate and comparison is exact
/// - `f64`: approximate; values within [`crate::TOLERANCE`] of each
///   other compare equal and values within it of zero are zero
///
/// Pivoting code only ever asks "is this zero / positive" and "how do these
/// compare" through this trait, so the tolerance policy lives here and
/// nowhere else.
pub trait Field:
    Clone
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + AddAssign
    + SubAssign
    + std::iter::Sum
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_i64(n: i64) -> Self;
    fn from_rational(r: &Rational) -> Self;
    /// Exact value; fails only for non-finite floats.
    fn to_rational(&self) -> Result<Rational, Error>;
    fn to_f64(&self) -> f64;
    fn checked_div(&self, other: &Self) -> Result<Self, Error>;
    fn is_zero(&self) -> bool;
    fn is_positive(&self) -> bool;
    fn is_negative(&self) -> bool;
    fn compare(&self, other: &Self) -> Ordering;
    fn abs(&self) -> Self;
    /// Whether arithmetic in this field is lossless.
    fn exact() -> bool;

    fn from_usize(n: usize) -> Self {
        Self::from_i64(n as i64)
    }
    fn approx_eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
    /// larger of two values under `compare`, preferring the first on ties
    fn larger(self, other: Self) -> Self {
        match other.compare(&self) {
            Ordering::Greater => other,
            _ => self,
        }
    }
    fn smaller(self, other: Self) -> Self {
        match other.compare(&self) {
            Ordering::Less => other,
            _ => self,
        }
    }
}

impl Field for Rational {
    fn zero() -> Self {
        Rational::zero()
    }
    fn one() -> Self {
        Rational::one()
    }
    fn from_i64(n: i64) -> Self {
        Rational::from(n)
    }
    fn from_rational(r: &Rational) -> Self {
        r.clone()
    }
    fn to_rational(&self) -> Result<Rational, Error> {
        Ok(self.clone())
    }
    fn to_f64(&self) -> f64 {
        Rational::to_f64(self)
    }
    fn checked_div(&self, other: &Self) -> Result<Self, Error> {
        Rational::checked_div(self, other)
    }
    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }
    fn is_positive(&self) -> bool {
        Rational::is_positive(self)
    }
    fn is_negative(&self) -> bool {
        Rational::is_negative(self)
    }
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
    fn abs(&self) -> Self {
        Rational::abs(self)
    }
    fn exact() -> bool {
        true
    }
}

impl Field for f64 {
    fn zero() -> Self {
        0.
    }
    fn one() -> Self {
        1.
    }
    fn from_i64(n: i64) -> Self {
        n as f64
    }
    fn from_rational(r: &Rational) -> Self {
        r.to_f64()
    }
    fn to_rational(&self) -> Result<Rational, Error> {
        Rational::from_f64(*self)
    }
    fn to_f64(&self) -> f64 {
        *self
    }
    fn checked_div(&self, other: &Self) -> Result<Self, Error> {
        match Field::is_zero(other) {
            true => Err(Error::DivisionByZero),
            false => Ok(self / other),
        }
    }
    fn is_zero(&self) -> bool {
        f64::abs(*self) <= crate::TOLERANCE
    }
    fn is_positive(&self) -> bool {
        *self > crate::TOLERANCE
    }
    fn is_negative(&self) -> bool {
        *self < -crate::TOLERANCE
    }
    fn compare(&self, other: &Self) -> Ordering {
        match f64::abs(self - other) <= crate::TOLERANCE {
            true => Ordering::Equal,
            false => self.partial_cmp(other).unwrap_or(Ordering::Equal),
        }
    }
    fn abs(&self) -> Self {
        f64::abs(*self)
    }
    fn exact() -> bool {
        false
    }
}
