use super::Config;
use super::EquilibriumAlgorithm;
use super::EquilibriumSolution;
use super::Resolve;
use crate::Cancel;
use crate::Error;
use crate::ExtensiveFormGame;
use crate::Field;
use crate::Game;
use crate::Lcp;
use crate::Matrix;
use crate::Pivoting;
use crate::Rational;
use crate::RevisedTableau;
use crate::SequenceForm;
use crate::Tableau;

/// Two-player extensive games through the sequence form.
///
/// Payoffs are shifted strictly negative on every reachable pair, which
/// lets the plan constraints `Ex = e`, `Fy = f` relax to `≥` with
/// non-negative duals `p`, `q`. The LCP in `z = (x, y, p, q)` is
///
/// ```text
///   w_x = -A'y - Eᵀp      w_p = Ex - e
///   w_y = -B'ᵀx - Fᵀq     w_q = Fy - f
/// ```
///
/// and is solved by Lemke's algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceLcp;

impl SequenceLcp {
    pub fn lcp<F: Field>(game: &ExtensiveFormGame, form: &SequenceForm) -> Result<Lcp<F>, Error> {
        let shift = game
            .outcomes()
            .iter()
            .flat_map(|o| o.payoffs().iter())
            .fold(Rational::zero(), |max, x| max.max(x.clone()))
            + Rational::one();
        let negative = |p: usize| {
            let (payoff, reach) = (form.payoff(p), form.reach());
            Matrix::from_fn(payoff.rows(), payoff.cols(), |i, j| {
                payoff[(i, j)].clone() - shift.clone() * &reach[(i, j)]
            })
        };
        let (a, b) = (negative(0), negative(1));
        let (e, f) = (form.constraints(0), form.constraints(1));
        let (n1, n2, k1, k2) = (e.cols(), f.cols(), e.rows(), f.rows());
        let (y0, p0, q0) = (n1, n1 + n2, n1 + n2 + k1);
        let size = q0 + k2;
        let mut m = Matrix::<Rational>::zeros(size, size);
        for i in 0..n1 {
            for j in 0..n2 {
                m[(i, y0 + j)] = -a[(i, j)].clone();
                m[(y0 + j, i)] = -b[(i, j)].clone();
            }
            for h in 0..k1 {
                m[(i, p0 + h)] = -e[(h, i)].clone();
                m[(p0 + h, i)] = e[(h, i)].clone();
            }
        }
        for j in 0..n2 {
            for h in 0..k2 {
                m[(y0 + j, q0 + h)] = -f[(h, j)].clone();
                m[(q0 + h, y0 + j)] = f[(h, j)].clone();
            }
        }
        let q = std::iter::repeat_n(Rational::zero(), n1 + n2)
            .chain(form.bounds(0).into_iter().map(|x| -x))
            .chain(form.bounds(1).into_iter().map(|x| -x))
            .collect::<Vec<_>>();
        log::debug!("{:<32}{:<32}", "sequence form lcp size", size);
        Lcp::new(m.map(F::from_rational), q.iter().map(F::from_rational).collect())
    }
    pub fn equilibrium<F, T>(game: &ExtensiveFormGame, cancel: &Cancel) -> Result<EquilibriumSolution<F>, Error>
    where
        F: Field,
        T: Pivoting<F>,
    {
        let ref form = SequenceForm::new(game)?;
        let lcp = Self::lcp::<F>(game, form)?;
        let solution = lcp.solve::<T>(cancel)?;
        let n1 = form.sequences(0).len();
        let n2 = form.sequences(1).len();
        let x = &solution.z[..n1];
        let y = &solution.z[n1..n1 + n2];
        let profile = form.behavior(game, [x, y])?;
        let payoffs = game.expected(&profile)?;
        log::info!("{:<32}{:<32}", "sequence form pivots", solution.pivots);
        Ok(EquilibriumSolution::behavior(profile, payoffs))
    }
}

impl EquilibriumAlgorithm for SequenceLcp {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        let Game::Extensive(ref tree) = *game else {
            return Err(Error::InvalidGame("sequence form needs an extensive game".into()));
        };
        let solution = match config.resolve {
            Resolve::Dense => Self::equilibrium::<F, Tableau<F>>(tree, &config.cancel)?,
            Resolve::Factored => Self::equilibrium::<F, RevisedTableau<F>>(tree, &config.cancel)?,
        };
        Ok(vec![solution])
    }
}
