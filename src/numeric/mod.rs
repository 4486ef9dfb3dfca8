//! Exact arithmetic.
//!
//! - `Integer`: signed arbitrary-precision integers
//! - `Rational`: fractions over `Integer`, always in lowest terms
//! - `Field`: the numeric abstraction every higher layer is generic over,
//!   implemented exactly by `Rational` and approximately by `f64`

/// forward a binary operator over every owned/borrowed operand combination
/// of a newtype whose inner value already supports all four.
macro_rules! forward {
    ($t:ident, $trait:ident, $method:ident) => {
        impl std::ops::$trait<$t> for $t {
            type Output = $t;
            fn $method(self, rhs: $t) -> $t {
                $t(std::ops::$trait::$method(self.0, rhs.0))
            }
        }
        impl<'a> std::ops::$trait<&'a $t> for $t {
            type Output = $t;
            fn $method(self, rhs: &'a $t) -> $t {
                $t(std::ops::$trait::$method(self.0, &rhs.0))
            }
        }
        impl<'a> std::ops::$trait<$t> for &'a $t {
            type Output = $t;
            fn $method(self, rhs: $t) -> $t {
                $t(std::ops::$trait::$method(&self.0, rhs.0))
            }
        }
        impl<'a, 'b> std::ops::$trait<&'b $t> for &'a $t {
            type Output = $t;
            fn $method(self, rhs: &'b $t) -> $t {
                $t(std::ops::$trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

/// forward an assigning operator for owned and borrowed right-hand sides.
macro_rules! forward_assign {
    ($t:ident, $trait:ident, $method:ident) => {
        impl std::ops::$trait<$t> for $t {
            fn $method(&mut self, rhs: $t) {
                std::ops::$trait::$method(&mut self.0, rhs.0)
            }
        }
        impl<'a> std::ops::$trait<&'a $t> for $t {
            fn $method(&mut self, rhs: &'a $t) {
                std::ops::$trait::$method(&mut self.0, &rhs.0)
            }
        }
    };
}

mod field;
mod integer;
mod rational;

pub use field::*;
pub use integer::*;
pub use rational::*;
