use super::Integer;
use crate::Error;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use num_traits::Signed;
use num_traits::ToPrimitive;
use num_traits::Zero;

/// Exact rational number.
///
/// Always stored in lowest terms with a strictly positive denominator, so
/// structural equality is numeric equality and hashing is canonical.
/// There is deliberately no `Div` operator: division goes through
/// [`Rational::checked_div`], which reports [`Error::DivisionByZero`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// Normalizes sign and reduces by the gcd.
    pub fn new(numer: impl Into<Integer>, denom: impl Into<Integer>) -> Result<Self, Error> {
        let numer = numer.into();
        let denom = denom.into();
        match denom.is_zero() {
            true => Err(Error::DivisionByZero),
            false => Ok(Self(BigRational::new(
                numer.into_inner(),
                denom.into_inner(),
            ))),
        }
    }
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }
    pub fn one() -> Self {
        Self(BigRational::one())
    }
    pub fn numer(&self) -> Integer {
        Integer::from(self.0.numer().clone())
    }
    pub fn denom(&self) -> Integer {
        Integer::from(self.0.denom().clone())
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
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
    pub fn recip(&self) -> Result<Self, Error> {
        match self.is_zero() {
            true => Err(Error::DivisionByZero),
            false => Ok(Self(self.0.recip())),
        }
    }
    pub fn checked_div(&self, other: &Self) -> Result<Self, Error> {
        match other.is_zero() {
            true => Err(Error::DivisionByZero),
            false => Ok(Self(&self.0 / &other.0)),
        }
    }
    /// Integer powers; negative exponents of zero are a division by zero.
    pub fn pow(&self, exponent: i32) -> Result<Self, Error> {
        let base = match exponent < 0 {
            true => self.recip()?,
            false => self.clone(),
        };
        Ok(Self(num_traits::pow(base.0, exponent.unsigned_abs() as usize)))
    }
    pub fn floor(&self) -> Integer {
        Integer::from(self.0.floor().to_integer())
    }
    pub fn ceil(&self) -> Integer {
        Integer::from(self.0.ceil().to_integer())
    }
    /// Nearest `f64`; exact when representable.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
    /// Exact value of a finite float (every finite `f64` is a dyadic rational).
    pub fn from_f64(x: f64) -> Result<Self, Error> {
        BigRational::from_float(x)
            .map(Self)
            .ok_or_else(|| Error::InvalidNumber(x.to_string()))
    }
    pub fn inner(&self) -> &BigRational {
        &self.0
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

forward!(Rational, Add, add);
forward!(Rational, Sub, sub);
forward!(Rational, Mul, mul);
forward_assign!(Rational, AddAssign, add_assign);
forward_assign!(Rational, SubAssign, sub_assign);
forward_assign!(Rational, MulAssign, mul_assign);

impl std::ops::Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}
impl std::ops::Neg for &Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self(BigRational::from_integer(n.into_inner()))
    }
}
impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(n)))
    }
}
impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from(n as i64)
    }
}
impl From<usize> for Rational {
    fn from(n: usize) -> Self {
        Self(BigRational::from_integer(BigInt::from(n)))
    }
}

/// accepts "p/q", "p", and decimals "-1.25" (read exactly, never via f64)
impl std::str::FromStr for Rational {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidNumber(s.to_string());
        let text = s.trim();
        if let Some((numer, denom)) = text.split_once('/') {
            let numer = numer.parse::<Integer>().map_err(|_| invalid())?;
            let denom = denom.parse::<Integer>().map_err(|_| invalid())?;
            return Self::new(numer, denom);
        }
        if let Some((whole, fraction)) = text.split_once('.') {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let (negative, digits) = match whole.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, whole.strip_prefix('+').unwrap_or(whole)),
            };
            let whole = match digits {
                "" => Integer::zero(),
                digits if digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse::<Integer>().map_err(|_| invalid())?,
                _ => return Err(invalid()),
            };
            let scale = Integer::from(10).pow(fraction.len() as u32);
            let fraction = fraction.parse::<Integer>().map_err(|_| invalid())?;
            let magnitude = Self::new(whole * &scale + fraction, scale)?;
            return Ok(if negative { -magnitude } else { magnitude });
        }
        text.parse::<Integer>().map(Self::from).map_err(|_| invalid())
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.is_integer() {
            true => write!(f, "{}", self.0.numer()),
            false => write!(f, "{}/{}", self.0.numer(), self.0.denom()),
        }
    }
}

impl std::iter::Sum for Rational {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |a, b| a + b)
    }
}
impl<'a> std::iter::Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
        iter.fold(Self::zero(), |a, b| a + b)
    }
}
impl std::iter::Product for Rational {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |a, b| a * b)
    }
}

impl serde::Serialize for Rational {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rational {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Whole(i64),
            Real(f64),
            Text(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Whole(n) => Ok(Self::from(n)),
            Repr::Real(x) => Self::from_f64(x).map_err(serde::de::Error::custom),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Rational {
        s.parse().unwrap()
    }

    #[test]
    fn lowest_terms_positive_denominator() {
        let r = Rational::new(6, -4).unwrap();
        assert_eq!(r.numer(), Integer::from(-3));
        assert_eq!(r.denom(), Integer::from(2));
        assert_eq!(r, q("-3/2"));
    }
    #[test]
    fn zero_denominator_rejected() {
        assert_eq!(Rational::new(1, 0), Err(Error::DivisionByZero));
        assert_eq!(Rational::zero().recip(), Err(Error::DivisionByZero));
        assert_eq!(q("1/3").checked_div(&Rational::zero()), Err(Error::DivisionByZero));
        assert_eq!(Rational::zero().pow(-1), Err(Error::DivisionByZero));
    }
    #[test]
    fn quotient_times_divisor_round_trips() {
        for a in -7i64..=7 {
            for b in (-5i64..=5).filter(|b| *b != 0) {
                let r = Rational::new(a, b).unwrap();
                assert_eq!(r * Rational::from(b), Rational::from(a));
            }
        }
    }
    #[test]
    fn field_operations_are_exact() {
        let third = q("1/3");
        let sum = third.clone() + &third + &third;
        assert_eq!(sum, Rational::one());
        let tenth = q("0.1");
        let total = (0..10).map(|_| tenth.clone()).sum::<Rational>();
        assert_eq!(total, Rational::one());
        assert_eq!(q("2/3").checked_div(&q("4/9")).unwrap(), q("3/2"));
        assert_eq!(q("2/3").pow(-2).unwrap(), q("9/4"));
    }
    #[test]
    fn total_order() {
        let mut values = vec![q("1/2"), q("-3"), q("2/5"), q("0"), q("-1/7")];
        values.sort();
        assert_eq!(values, vec![q("-3"), q("-1/7"), q("0"), q("2/5"), q("1/2")]);
    }
    #[test]
    fn parses_decimals_exactly() {
        assert_eq!(q("1.25"), Rational::new(5, 4).unwrap());
        assert_eq!(q("-0.5"), Rational::new(-1, 2).unwrap());
        assert_eq!(q("-.5"), Rational::new(-1, 2).unwrap());
        assert_eq!(q(" 7 "), Rational::from(7));
        assert!("1.".parse::<Rational>().is_err());
        assert!("1/0".parse::<Rational>().is_err());
        assert!("abc".parse::<Rational>().is_err());
    }
    #[test]
    fn one_sign_at_most() {
        assert_eq!(q("+1.5"), q("3/2"));
        for text in ["--1.5", "+-1.5", "-+1.5", "++1.5", "--1", "1-2.5"] {
            assert!(matches!(text.parse::<Rational>(), Err(Error::InvalidNumber(_))), "{}", text);
        }
    }
    #[test]
    fn floats_convert_exactly() {
        assert_eq!(Rational::from_f64(0.375).unwrap(), q("3/8"));
        assert!(Rational::from_f64(f64::NAN).is_err());
        assert_eq!(q("3/8").to_f64(), 0.375);
    }
    #[test]
    fn floor_and_ceil() {
        assert_eq!(q("-7/2").floor(), Integer::from(-4));
        assert_eq!(q("-7/2").ceil(), Integer::from(-3));
        assert_eq!(q("4").floor(), Integer::from(4));
    }
    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&q("-2/3")).unwrap();
        assert_eq!(json, "\"-2/3\"");
        assert_eq!(serde_json::from_str::<Rational>(&json).unwrap(), q("-2/3"));
        assert_eq!(serde_json::from_str::<Rational>("4").unwrap(), q("4"));
        assert_eq!(serde_json::from_str::<Rational>("0.5").unwrap(), q("1/2"));
    }
}
