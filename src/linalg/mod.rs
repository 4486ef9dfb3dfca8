//! Dense linear algebra over a [`Field`](crate::Field).
//!
//! Indices are 0-based. Every shape-sensitive operation returns
//! [`DimensionMismatch`](crate::Error::DimensionMismatch) instead of panicking.

mod lu;
mod matrix;
mod vector;

pub use lu::*;
pub use matrix::*;
pub use vector::*;
