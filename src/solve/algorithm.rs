use super::Config;
use super::Enumeration;
use super::EquilibriumSolution;
use super::LemkeHowson;
use super::Mode;
use super::PureEnumeration;
use super::SequenceLcp;
use super::SimplicialSubdivision;
use super::ZeroSum;
use crate::Error;
use crate::Field;
use crate::Game;
use crate::Rational;

/// An equilibrium algorithm, generic over the numeric field.
///
/// Implementations never mutate the game, and report failure through
/// [`Error`] rather than an empty result.
pub trait EquilibriumAlgorithm {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error>;
}

/// Every algorithm the crate ships, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    LemkeHowson,
    Subdivision,
    Enumeration,
    Pure,
    ZeroSum,
    Sequence,
}

impl Algorithm {
    pub const fn all() -> &'static [Self] {
        &[
            Self::LemkeHowson,
            Self::Subdivision,
            Self::Enumeration,
            Self::Pure,
            Self::ZeroSum,
            Self::Sequence,
        ]
    }
    /// Runs in the field selected by `config.mode`.
    pub fn run(&self, game: &Game, config: &Config) -> Result<Solutions, Error> {
        log::info!("{:<32}{:<32}", "solving", format!("{} with {}", game.title(), self));
        match config.mode {
            Mode::Exact => self.solve::<Rational>(game, config).map(Solutions::Exact),
            Mode::Approximate => self.solve::<f64>(game, config).map(Solutions::Approximate),
        }
    }
}

impl EquilibriumAlgorithm for Algorithm {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        match self {
            Self::LemkeHowson => LemkeHowson.solve(game, config),
            Self::Subdivision => SimplicialSubdivision.solve(game, config),
            Self::Enumeration => Enumeration.solve(game, config),
            Self::Pure => PureEnumeration.solve(game, config),
            Self::ZeroSum => ZeroSum.solve(game, config),
            Self::Sequence => SequenceLcp.solve(game, config),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LemkeHowson => write!(f, "lemke-howson"),
            Self::Subdivision => write!(f, "subdivision"),
            Self::Enumeration => write!(f, "enumeration"),
            Self::Pure => write!(f, "pure"),
            Self::ZeroSum => write!(f, "zero-sum"),
            Self::Sequence => write!(f, "sequence"),
        }
    }
}

/// Solutions in whichever field the run used.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Solutions {
    Exact(Vec<EquilibriumSolution<Rational>>),
    Approximate(Vec<EquilibriumSolution<f64>>),
}

impl Solutions {
    pub fn len(&self) -> usize {
        match self {
            Self::Exact(solutions) => solutions.len(),
            Self::Approximate(solutions) => solutions.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn to_f64(&self) -> Vec<EquilibriumSolution<f64>> {
        match self {
            Self::Exact(solutions) => solutions.iter().map(EquilibriumSolution::to_f64).collect(),
            Self::Approximate(solutions) => solutions.clone(),
        }
    }
}

impl std::fmt::Display for Solutions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = match self {
            Self::Exact(solutions) => solutions.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            Self::Approximate(solutions) => solutions.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        };
        for (i, line) in lines.iter().enumerate() {
            writeln!(f, "{:>4}  {}", i + 1, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cancel;
    use crate::ExtensiveFormGame;
    use crate::NormalFormGame;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }
    fn coordination() -> Game {
        NormalFormGame::from_fn(&[2, 2], |s| match s[0] == s[1] {
            true => vec![q(2 - s[0] as i64), q(1 + s[0] as i64)],
            false => vec![q(0), q(0)],
        })
        .unwrap()
        .into()
    }

    #[test]
    fn exact_and_approximate_runs() {
        let game = coordination();
        let exact = Algorithm::Enumeration.run(&game, &Config::exact()).unwrap();
        let approx = Algorithm::Enumeration.run(&game, &Config::approximate()).unwrap();
        assert!(matches!(exact, Solutions::Exact(_)));
        assert!(matches!(approx, Solutions::Approximate(_)));
        assert_eq!(exact.len(), 3);
        assert_eq!(approx.len(), 3);
        for (a, b) in exact.to_f64().iter().zip(approx.to_f64().iter()) {
            assert!(a.approx_eq(b));
        }
    }
    #[test]
    fn every_normal_form_algorithm_finds_nash() {
        let game = coordination();
        let normal = game.normal().unwrap();
        for algorithm in [
            Algorithm::LemkeHowson,
            Algorithm::Enumeration,
            Algorithm::Pure,
        ] {
            let Solutions::Exact(solutions) = algorithm.run(&game, &Config::exact()).unwrap() else {
                panic!("exact mode returns rationals");
            };
            assert!(!solutions.is_empty());
            for solution in solutions.iter() {
                assert!(normal.is_nash(solution.as_mixed().unwrap()).unwrap());
            }
        }
    }
    #[test]
    fn cancelled_before_first_pivot() {
        let cancel = Cancel::new();
        cancel.cancel();
        let config = Config::exact().with_cancel(cancel);
        let result = Algorithm::LemkeHowson.run(&coordination(), &config);
        assert!(matches!(result, Err(Error::Cancelled { .. })));
    }
    #[test]
    fn extensive_games_convert() {
        let mut tree = ExtensiveFormGame::new(2).unwrap();
        let root = tree.root();
        tree.append_move(root, 0, vec!["a".into(), "b".into()]).unwrap();
        for (i, child) in tree.children(root).into_iter().enumerate() {
            let o = tree.add_outcome(format!("{}", i), vec![q(i as i64), q(0)]).unwrap();
            tree.set_outcome(child, o).unwrap();
        }
        let game = Game::from(tree);
        let Solutions::Exact(solutions) = Algorithm::Pure.run(&game, &Config::exact()).unwrap() else {
            panic!("exact mode returns rationals");
        };
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].as_mixed().unwrap()[0].as_pure(), Some(1));
    }
    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::all() {
            let json = serde_json::to_string(algorithm).unwrap();
            assert_eq!(json, format!("\"{}\"", algorithm));
        }
    }
}
