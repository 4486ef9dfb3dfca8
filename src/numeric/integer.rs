use crate::Error;
use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::One;
use num_traits::Signed;
use num_traits::ToPrimitive;
use num_traits::Zero;

/// Signed arbitrary-precision integer.
///
/// A thin value type over [`BigInt`]: every operation except division is
/// total, and division reports [`Error::DivisionByZero`] instead of
/// panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }
    pub fn one() -> Self {
        Self(BigInt::one())
    }
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
    /// -1, 0 or 1.
    pub fn signum(&self) -> i8 {
        match self.0.sign() {
            num_bigint::Sign::Minus => -1,
            num_bigint::Sign::NoSign => 0,
            num_bigint::Sign::Plus => 1,
        }
    }
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
    /// Non-negative greatest common divisor; gcd(0, 0) = 0.
    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.gcd(&other.0))
    }
    /// Non-negative least common multiple; lcm(0, x) = 0.
    pub fn lcm(&self, other: &Self) -> Self {
        Self(self.0.lcm(&other.0))
    }
    pub fn pow(&self, exponent: u32) -> Self {
        Self(num_traits::pow(self.0.clone(), exponent as usize))
    }
    /// Quotient rounded toward negative infinity.
    pub fn checked_div(&self, other: &Self) -> Result<Self, Error> {
        match other.is_zero() {
            true => Err(Error::DivisionByZero),
            false => Ok(Self(self.0.div_floor(&other.0))),
        }
    }
    /// Remainder with the sign of the divisor, pairing with `checked_div`.
    pub fn checked_rem(&self, other: &Self) -> Result<Self, Error> {
        match other.is_zero() {
            true => Err(Error::DivisionByZero),
            false => Ok(Self(self.0.mod_floor(&other.0))),
        }
    }
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
    pub fn inner(&self) -> &BigInt {
        &self.0
    }
    pub fn into_inner(self) -> BigInt {
        self.0
    }
}

forward!(Integer, Add, add);
forward!(Integer, Sub, sub);
forward!(Integer, Mul, mul);
forward_assign!(Integer, AddAssign, add_assign);
forward_assign!(Integer, SubAssign, sub_assign);
forward_assign!(Integer, MulAssign, mul_assign);

impl std::ops::Neg for Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-self.0)
    }
}
impl std::ops::Neg for &Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-&self.0)
    }
}

impl From<BigInt> for Integer {
    fn from(n: BigInt) -> Self {
        Self(n)
    }
}
impl From<i64> for Integer {
    fn from(n: i64) -> Self {
        Self(BigInt::from(n))
    }
}
impl From<i32> for Integer {
    fn from(n: i32) -> Self {
        Self(BigInt::from(n))
    }
}
impl From<u64> for Integer {
    fn from(n: u64) -> Self {
        Self(BigInt::from(n))
    }
}
impl From<usize> for Integer {
    fn from(n: usize) -> Self {
        Self(BigInt::from(n))
    }
}

impl std::str::FromStr for Integer {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<BigInt>()
            .map(Self)
            .map_err(|_| Error::InvalidNumber(s.to_string()))
    }
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::iter::Sum for Integer {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |a, b| a + b)
    }
}
impl std::iter::Product for Integer {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |a, b| a * b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_is_non_negative() {
        let a = Integer::from(-12);
        let b = Integer::from(18);
        assert_eq!(a.gcd(&b), Integer::from(6));
        assert_eq!(b.gcd(&a), Integer::from(6));
        assert_eq!(Integer::zero().gcd(&Integer::zero()), Integer::zero());
    }
    #[test]
    fn division_floors_and_rejects_zero() {
        let a = Integer::from(-7);
        let b = Integer::from(2);
        assert_eq!(a.checked_div(&b), Ok(Integer::from(-4)));
        assert_eq!(a.checked_rem(&b), Ok(Integer::from(1)));
        assert_eq!(a.checked_div(&Integer::zero()), Err(Error::DivisionByZero));
    }
    #[test]
    fn beyond_machine_words() {
        let big = Integer::from(i64::MAX) * Integer::from(i64::MAX);
        let back = big.checked_div(&Integer::from(i64::MAX)).unwrap();
        assert_eq!(back, Integer::from(i64::MAX));
        assert_eq!(big.to_i64(), None);
    }
    #[test]
    fn parses_and_displays() {
        let n = "-123456789012345678901234567890".parse::<Integer>().unwrap();
        assert_eq!(n.to_string(), "-123456789012345678901234567890");
        assert!("12x".parse::<Integer>().is_err());
    }
}
