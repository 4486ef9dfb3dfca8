use super::Config;
use super::EquilibriumAlgorithm;
use super::EquilibriumSolution;
use super::Polytopes;
use super::Resolve;
use super::distinct;
use super::equilibrium;
use crate::Cancel;
use crate::Error;
use crate::Field;
use crate::Game;
use crate::NormalFormGame;
use crate::Pivoting;
use crate::RevisedTableau;
use crate::Tableau;
use crate::follow;

/// Lemke-Howson complementary pivoting for two-player games.
///
/// Both best-response polytopes share one tableau whose initial basis is
/// the artificial equilibrium at the origin. Dropping a label makes its
/// variable enter; from then on the complement of whatever leaves enters
/// next, until the leaving variable carries the dropped label again.
#[derive(Debug, Clone, Copy, Default)]
pub struct LemkeHowson;

impl LemkeHowson {
    /// Follows the path that drops `label`.
    pub fn from_label<F, T>(game: &NormalFormGame, label: usize, cancel: &Cancel) -> Result<EquilibriumSolution<F>, Error>
    where
        F: Field,
        T: Pivoting<F>,
    {
        let polytopes = Polytopes::<F>::new(game)?;
        let (m, k) = (polytopes.m(), polytopes.labels());
        if label >= k {
            return Err(Error::mismatch(format!("label below {}", k), label));
        }
        let (a, b, basis) = polytopes.joint();
        let mut tableau = T::from_system(a, b, basis)?;
        let path = follow(
            &mut tableau,
            label,
            |v| (v + k) % (2 * k),
            |v| v % k == label,
            None,
            cancel,
        )?;
        log::debug!("{:<32}{:<32}", format!("lemke-howson label {}", label + 1), path.len());
        let values = tableau.values()?;
        equilibrium(game, &values[..m], &values[m..k])
    }
    /// Every starting label, distinct equilibria in order of discovery.
    pub fn all<F, T>(game: &NormalFormGame, cancel: &Cancel) -> Result<Vec<EquilibriumSolution<F>>, Error>
    where
        F: Field,
        T: Pivoting<F>,
    {
        let labels = game.matrix(0).map(|a| a.rows() + a.cols())?;
        #[cfg(feature = "parallel")]
        let found = {
            use rayon::prelude::*;
            (0..labels)
                .into_par_iter()
                .map(|label| Self::from_label::<F, T>(game, label, cancel))
                .collect::<Vec<_>>()
        };
        #[cfg(not(feature = "parallel"))]
        let found = (0..labels)
            .map(|label| Self::from_label::<F, T>(game, label, cancel))
            .collect::<Vec<_>>();
        let solutions = distinct(found.into_iter().collect::<Result<Vec<_>, _>>()?);
        log::info!("{:<32}{:<32}", "lemke-howson equilibria", solutions.len());
        Ok(solutions)
    }
}

impl EquilibriumAlgorithm for LemkeHowson {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        let ref normal = game.normal()?;
        let cancel = &config.cancel;
        match (config.resolve, config.label) {
            (Resolve::Dense, Some(k)) => Ok(vec![Self::from_label::<F, Tableau<F>>(normal, k, cancel)?]),
            (Resolve::Factored, Some(k)) => Ok(vec![Self::from_label::<F, RevisedTableau<F>>(normal, k, cancel)?]),
            (Resolve::Dense, None) => Self::all::<F, Tableau<F>>(normal, cancel),
            (Resolve::Factored, None) => Self::all::<F, RevisedTableau<F>>(normal, cancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::Matrix;
    use crate::Rational;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }
    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }
    fn bimatrix(a: &[&[i64]], b: &[&[i64]]) -> NormalFormGame {
        let m = |rows: &[&[i64]]| {
            Matrix::from_rows(rows.iter().map(|r| r.iter().map(|x| q(*x)).collect()).collect()).unwrap()
        };
        NormalFormGame::bimatrix(&m(a), &m(b)).unwrap()
    }
    fn pennies() -> NormalFormGame {
        bimatrix(&[&[1, -1], &[-1, 1]], &[&[-1, 1], &[1, -1]])
    }

    #[test]
    fn matching_pennies_from_every_label() {
        let game = pennies();
        for label in 0..4 {
            let solution =
                LemkeHowson::from_label::<Rational, Tableau<_>>(&game, label, &Cancel::new()).unwrap();
            let profile = solution.as_mixed().unwrap();
            for p in 0..2 {
                assert_eq!(profile[p].probabilities(), &[r(1, 2), r(1, 2)]);
            }
            assert_eq!(solution.payoffs(), &[q(0), q(0)]);
        }
    }
    #[test]
    fn idempotent_per_label() {
        let game = bimatrix(&[&[3, 3], &[2, 5], &[0, 6]], &[&[3, 2], &[2, 6], &[3, 1]]);
        for label in 0..5 {
            let once = LemkeHowson::from_label::<Rational, Tableau<_>>(&game, label, &Cancel::new()).unwrap();
            let twice = LemkeHowson::from_label::<Rational, Tableau<_>>(&game, label, &Cancel::new()).unwrap();
            assert_eq!(once, twice);
            assert!(game.is_nash(once.as_mixed().unwrap()).unwrap());
        }
    }
    #[test]
    fn all_labels_of_coordination() {
        let game = bimatrix(&[&[3, 0], &[0, 3]], &[&[3, 0], &[0, 3]]);
        let solutions = LemkeHowson::all::<Rational, Tableau<_>>(&game, &Cancel::new()).unwrap();
        assert!(!solutions.is_empty());
        assert!(solutions.len() <= 3);
        for s in solutions.iter() {
            assert!(game.is_nash(s.as_mixed().unwrap()).unwrap());
        }
    }
    #[test]
    fn degenerate_game_never_pivots_on_zero() {
        // column 2 duplicates column 1 for player 1, so best responses tie
        let game = bimatrix(&[&[1, 1], &[0, 0]], &[&[1, 1], &[1, 1]]);
        for label in 0..4 {
            let solution = LemkeHowson::from_label::<Rational, Tableau<_>>(&game, label, &Cancel::new()).unwrap();
            assert!(game.is_nash(solution.as_mixed().unwrap()).unwrap());
        }
    }
    #[test]
    fn factored_and_approximate_modes() {
        let game = pennies();
        let dense = LemkeHowson::from_label::<Rational, Tableau<_>>(&game, 1, &Cancel::new()).unwrap();
        let factored = LemkeHowson::from_label::<Rational, RevisedTableau<_>>(&game, 1, &Cancel::new()).unwrap();
        assert_eq!(dense, factored);
        let float = LemkeHowson::from_label::<f64, Tableau<_>>(&game, 1, &Cancel::new()).unwrap();
        assert!((float.as_mixed().unwrap()[0].probabilities()[0] - 0.5).abs() < 1e-9);
    }
    #[test]
    fn random_games_reach_exact_equilibria() {
        for _ in 0..16 {
            let game = NormalFormGame::random();
            let solution = LemkeHowson::from_label::<Rational, Tableau<_>>(&game, 0, &Cancel::new()).unwrap();
            let profile = solution.as_mixed().unwrap();
            assert!(game.max_regret(profile).unwrap().is_zero(), "{}\n{}", game, solution);
            for p in 0..2 {
                let total = profile[p].probabilities().iter().cloned().sum::<Rational>();
                assert_eq!(total, Rational::one());
            }
        }
    }
    #[test]
    fn label_out_of_range() {
        let game = pennies();
        assert!(LemkeHowson::from_label::<Rational, Tableau<_>>(&game, 4, &Cancel::new()).is_err());
    }
}
