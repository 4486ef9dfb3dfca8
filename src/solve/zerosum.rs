use super::Config;
use super::EquilibriumAlgorithm;
use super::EquilibriumSolution;
use super::Resolve;
use super::shifted;
use crate::Cancel;
use crate::Error;
use crate::Field;
use crate::Game;
use crate::LinearProgram;
use crate::MixedProfile;
use crate::MixedStrategy;
use crate::NormalFormGame;
use crate::Pivoting;
use crate::RevisedTableau;
use crate::Tableau;

/// Two-player constant-sum games by linear programming.
///
/// With `A'` the row player's payoffs shifted positive, the program
/// `max 1ᵀv` subject to `A'v ≤ 1, v ≥ 0` has optimum `1 / value`.
/// The column player's optimal strategy is `v` normalized and the row
/// player's is the normalized dual.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroSum;

impl ZeroSum {
    pub fn equilibrium<F, T>(game: &NormalFormGame, cancel: &Cancel) -> Result<EquilibriumSolution<F>, Error>
    where
        F: Field,
        T: Pivoting<F>,
    {
        game.constant_sum()
            .ok_or_else(|| Error::InvalidGame("payoffs do not have a constant sum".into()))?;
        let (a, _) = shifted(&game.matrix(0)?);
        let (m, n) = a.shape();
        let program = LinearProgram::new(a.map(F::from_rational), vec![F::one(); m], vec![F::one(); n])?;
        let solution = program.solve::<T>(cancel)?;
        let profile = MixedProfile::new(vec![
            MixedStrategy::normalized(solution.dual)?,
            MixedStrategy::normalized(solution.primal)?,
        ]);
        let payoffs = game.expected(&profile)?;
        log::info!("{:<32}{:<32}", "zero-sum value", payoffs[0]);
        Ok(EquilibriumSolution::mixed(profile, payoffs))
    }
}

impl EquilibriumAlgorithm for ZeroSum {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        let ref normal = game.normal()?;
        let solution = match config.resolve {
            Resolve::Dense => Self::equilibrium::<F, Tableau<F>>(normal, &config.cancel)?,
            Resolve::Factored => Self::equilibrium::<F, RevisedTableau<F>>(normal, &config.cancel)?,
        };
        Ok(vec![solution])
    }
}
