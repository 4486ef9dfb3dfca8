//! Error types for equilibrium computation.

use thiserror::Error;

/// Failure of a numeric, linear-algebra, pivoting or solving operation.
///
/// Pivot-related variants carry the basis (row → basic variable) at the
/// moment of failure so that a caller can diagnose the run.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("zero pivot element entering variable {variable} at row {row} (basis {basis:?})")]
    DegeneratePivot {
        variable: usize,
        row: usize,
        basis: Vec<usize>,
    },

    #[error("basis {basis:?} visited twice")]
    CycleDetected { basis: Vec<usize> },

    #[error("ray termination entering variable {variable} (basis {basis:?})")]
    RayTermination { variable: usize, basis: Vec<usize> },

    #[error("no convergence after {refinements} refinements (regret {regret})")]
    NonConvergence { refinements: usize, regret: f64 },

    #[error("infeasible system: {0}")]
    InfeasibleSystem(String),

    #[error("unbounded objective entering variable {variable} (basis {basis:?})")]
    Unbounded { variable: usize, basis: Vec<usize> },

    #[error("cancelled after {pivots} pivots")]
    Cancelled { pivots: usize },

    #[error("invalid game: {0}")]
    InvalidGame(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

impl Error {
    /// Shape mismatch between two dimension descriptions.
    pub fn mismatch(expected: impl std::fmt::Debug, got: impl std::fmt::Debug) -> Self {
        Self::DimensionMismatch {
            expected: format!("{:?}", expected),
            got: format!("{:?}", got),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
