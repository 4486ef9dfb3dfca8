use super::Config;
use super::EquilibriumAlgorithm;
use super::EquilibriumSolution;
use crate::Cancel;
use crate::Error;
use crate::Field;
use crate::Game;
use crate::MixedProfile;
use crate::NormalFormGame;

/// Pure-strategy equilibria of an n-player game, by checking every
/// unilateral deviation from every pure profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureEnumeration;

impl PureEnumeration {
    pub fn equilibria<F: Field>(game: &NormalFormGame, cancel: &Cancel) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        let shape = game.shape();
        let mut solutions = Vec::new();
        for (checked, pure) in game.profiles().enumerate() {
            cancel.check(checked)?;
            if Self::stable(game, &pure)? {
                let profile = MixedProfile::pure(&shape, &pure);
                let payoffs = game
                    .payoffs(&pure)?
                    .iter()
                    .map(F::from_rational)
                    .collect();
                solutions.push(EquilibriumSolution::mixed(profile, payoffs));
            }
        }
        log::info!("{:<32}{:<32}", "pure equilibria", solutions.len());
        Ok(solutions)
    }
    fn stable(game: &NormalFormGame, pure: &[usize]) -> Result<bool, Error> {
        let mut deviation = pure.to_vec();
        for p in 0..game.players() {
            let current = game.payoff(p, pure)?;
            for s in (0..game.strategies(p)).filter(|s| *s != pure[p]) {
                deviation[p] = s;
                if game.payoff(p, &deviation)? > current {
                    return Ok(false);
                }
            }
            deviation[p] = pure[p];
        }
        Ok(true)
    }
}

impl EquilibriumAlgorithm for PureEnumeration {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        let ref normal = game.normal()?;
        Self::equilibria(normal, &config.cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rational;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn prisoners_dilemma() {
        let game = NormalFormGame::from_fn(&[2, 2], |s| match (s[0], s[1]) {
            (0, 0) => vec![q(-1), q(-1)],
            (0, 1) => vec![q(-3), q(0)],
            (1, 0) => vec![q(0), q(-3)],
            _ => vec![q(-2), q(-2)],
        })
        .unwrap();
        let solutions = PureEnumeration::equilibria::<Rational>(&game, &Cancel::new()).unwrap();
        assert_eq!(solutions.len(), 1);
        let profile = solutions[0].as_mixed().unwrap();
        assert_eq!(profile[0].as_pure(), Some(1));
        assert_eq!(profile[1].as_pure(), Some(1));
        assert_eq!(solutions[0].payoffs(), &[q(-2), q(-2)]);
    }
    #[test]
    fn three_player_agreement() {
        let game = NormalFormGame::from_fn(&[2, 2, 2], |s| {
            vec![q((s[0] == s[1] && s[1] == s[2]) as i64); 3]
        })
        .unwrap();
        let solutions = PureEnumeration::equilibria::<f64>(&game, &Cancel::new()).unwrap();
        assert_eq!(solutions.len(), 2);
        for s in solutions.iter() {
            assert!(game.is_nash(s.as_mixed().unwrap()).unwrap());
        }
    }
    #[test]
    fn matching_pennies_has_none() {
        let game = NormalFormGame::from_fn(&[2, 2], |s| match s[0] == s[1] {
            true => vec![q(1), q(-1)],
            false => vec![q(-1), q(1)],
        })
        .unwrap();
        assert!(PureEnumeration::equilibria::<Rational>(&game, &Cancel::new()).unwrap().is_empty());
    }
    #[test]
    fn solves_through_the_trait() {
        let game = Game::from(
            NormalFormGame::from_fn(&[2, 2], |s| vec![q((s[0] == s[1]) as i64); 2]).unwrap(),
        );
        let solutions = PureEnumeration.solve::<Rational>(&game, &Config::exact()).unwrap();
        assert_eq!(solutions.len(), 2);
    }
}
