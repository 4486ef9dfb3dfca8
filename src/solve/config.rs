use crate::Cancel;

/// Numeric type an algorithm runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// arbitrary-precision rationals
    #[default]
    Exact,
    /// `f64` with tolerance
    Approximate,
}

/// How tableaux represent the basis inverse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Resolve {
    /// row-reduced dense tableau
    #[default]
    Dense,
    /// LU factorization with eta updates
    Factored,
}

/// Runtime choices for one solve.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub resolve: Resolve,
    /// Lemke-Howson starting label, 0-based over all pure strategies
    /// (player 1's first). `None` runs every label.
    pub label: Option<usize>,
    /// Initial simplicial subdivision grid size.
    pub grid: usize,
    /// Grid doublings allowed before giving up.
    pub refinements: usize,
    /// Largest accepted regret of an approximate equilibrium,
    /// on payoffs rescaled to the unit interval.
    pub tolerance: f64,
    /// Weight on the start point in the shrunken Nash map.
    pub shrink: f64,
    #[serde(skip)]
    pub cancel: Cancel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            resolve: Resolve::default(),
            label: None,
            grid: crate::SUBDIVISION_GRID,
            refinements: crate::SUBDIVISION_REFINEMENTS,
            tolerance: crate::SUBDIVISION_TOLERANCE,
            shrink: crate::SUBDIVISION_SHRINK,
            cancel: Cancel::default(),
        }
    }
}

impl Config {
    pub fn exact() -> Self {
        Self::default()
    }
    pub fn approximate() -> Self {
        Self {
            mode: Mode::Approximate,
            ..Self::default()
        }
    }
    pub fn with_label(self, label: usize) -> Self {
        Self {
            label: Some(label),
            ..self
        }
    }
    pub fn with_resolve(self, resolve: Resolve) -> Self {
        Self { resolve, ..self }
    }
    pub fn with_cancel(self, cancel: Cancel) -> Self {
        Self { cancel, ..self }
    }
}
