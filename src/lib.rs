//! Exact Nash equilibrium computation.
//!
//! Finite normal-form and extensive-form games are solved over a generic
//! numeric [`Field`], either exactly with arbitrary-precision [`Rational`]s
//! or approximately with `f64`, sharing one pivoting engine.
//!
//! # Module Structure
//!
//! - `numeric`: arbitrary-precision integers, rationals, the `Field` trait
//! - `linalg`: dense vectors, matrices and LU factorization
//! - `pivot`: tableaux, ratio tests, basis bookkeeping, LCP and LP drivers
//! - `game`: normal-form and extensive-form games, strategies, sequence form
//! - `solve`: equilibrium algorithms and their configuration

pub mod error;
pub mod game;
pub mod linalg;
pub mod numeric;
pub mod pivot;
pub mod solve;

pub use error::*;
pub use game::*;
pub use linalg::*;
pub use numeric::*;
pub use pivot::*;
pub use solve::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Index of a player, 0-based in storage.
pub type Position = usize;
/// Index of a variable (column) in a tableau.
pub type Variable = usize;
/// Index of a row (constraint) in a tableau.
pub type Row = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// APPROXIMATE ARITHMETIC
// ============================================================================
/// Absolute tolerance for zero tests and comparisons in `f64` mode.
pub const TOLERANCE: f64 = 1e-9;

// ============================================================================
// PIVOTING
// ============================================================================
/// Eta updates applied to an LU factorization before it is rebuilt.
pub const REFACTOR_FREQUENCY: usize = 16;

// ============================================================================
// SIMPLICIAL SUBDIVISION
// Grid of mesh 1/k over the product of strategy simplices, doubled per restart.
// ============================================================================
/// Initial grid size k.
pub const SUBDIVISION_GRID: usize = 4;
/// Grid doublings before giving up with NonConvergence.
pub const SUBDIVISION_REFINEMENTS: usize = 12;
/// Maximum regret accepted as an approximate equilibrium.
pub const SUBDIVISION_TOLERANCE: f64 = 1e-3;
/// Weight kept on the restart point when shrinking the Nash map inward.
pub const SUBDIVISION_SHRINK: f64 = 1e-2;

// ============================================================================
// RANDOM GAMES
// ============================================================================
/// Largest strategy count per player in `Arbitrary` games.
pub const RANDOM_STRATEGIES: usize = 4;
/// Payoffs of `Arbitrary` games are drawn from `-RANDOM_PAYOFF..=RANDOM_PAYOFF`.
pub const RANDOM_PAYOFF: i64 = 99;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
