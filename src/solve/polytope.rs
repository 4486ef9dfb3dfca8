use super::EquilibriumSolution;
use crate::Error;
use crate::Field;
use crate::Matrix;
use crate::MixedProfile;
use crate::MixedStrategy;
use crate::NormalFormGame;
use crate::Rational;
use crate::Variable;

/// `M - min(M) + 1`, every entry at least one, and the amount added.
pub fn shifted(matrix: &Matrix<Rational>) -> (Matrix<Rational>, Rational) {
    let low = (0..matrix.rows())
        .flat_map(|i| matrix.row(i).iter())
        .min()
        .cloned()
        .unwrap_or_else(Rational::zero);
    let shift = Rational::one() - low;
    (matrix.map(|x| x.clone() + &shift), shift)
}

/// Best-response polytopes of a two-player game with payoffs shifted
/// positive, so that both are bounded and contain the origin:
///
/// - `P = { x ≥ 0 : B'ᵀx ≤ 1 }` over player 1's strategies
/// - `Q = { y ≥ 0 : A'y ≤ 1 }` over player 2's strategies
///
/// Labels `0..m` name player 1's strategies and `m..m+n` player 2's.
/// A point of `P` has label `i` when `x_i = 0` and label `m+j` when the
/// constraint of column `j` is tight; symmetrically for `Q`.
#[derive(Debug, Clone)]
pub struct Polytopes<F> {
    a: Matrix<F>,
    b: Matrix<F>,
}

impl<F: Field> Polytopes<F> {
    pub fn new(game: &NormalFormGame) -> Result<Self, Error> {
        let (a, _) = shifted(&game.matrix(0)?);
        let (b, _) = shifted(&game.matrix(1)?);
        Ok(Self {
            a: a.map(F::from_rational),
            b: b.map(F::from_rational),
        })
    }
    pub fn m(&self) -> usize {
        self.a.rows()
    }
    pub fn n(&self) -> usize {
        self.a.cols()
    }
    pub fn labels(&self) -> usize {
        self.m() + self.n()
    }
    /// Both polytopes in one system of `m + n` rows:
    /// `A'y + r = 1` then `B'ᵀx + s = 1`, with columns `x, y, r, s`
    /// and the slacks `r, s` basic. `x_i` and `r_i` carry label `i`,
    /// `y_j` and `s_j` carry label `m + j`.
    pub fn joint(&self) -> (Matrix<F>, Vec<F>, Vec<Variable>) {
        let (m, n) = (self.m(), self.n());
        let k = m + n;
        let a = Matrix::from_fn(k, 2 * k, |row, col| match (row < m, col) {
            (true, c) if c >= m && c < k => self.a[(row, c - m)].clone(),
            (false, c) if c < m => self.b[(c, row - m)].clone(),
            (_, c) if c == row + k => F::one(),
            _ => F::zero(),
        });
        (a, vec![F::one(); k], (k..2 * k).collect())
    }
    /// `B'ᵀx + s = 1`, columns `x` then `s`, slacks basic.
    pub fn row_player(&self) -> (Matrix<F>, Vec<F>, Vec<Variable>) {
        let (m, n) = (self.m(), self.n());
        let a = Matrix::from_fn(n, m + n, |j, c| match c {
            c if c < m => self.b[(c, j)].clone(),
            c if c - m == j => F::one(),
            _ => F::zero(),
        });
        (a, vec![F::one(); n], (m..m + n).collect())
    }
    /// `A'y + r = 1`, columns `y` then `r`, slacks basic.
    pub fn col_player(&self) -> (Matrix<F>, Vec<F>, Vec<Variable>) {
        let (m, n) = (self.m(), self.n());
        let a = Matrix::from_fn(m, n + m, |i, c| match c {
            c if c < n => self.a[(i, c)].clone(),
            c if c - n == i => F::one(),
            _ => F::zero(),
        });
        (a, vec![F::one(); m], (n..n + m).collect())
    }
}

/// Normalizes polytope points into an equilibrium of the original game.
pub fn equilibrium<F: Field>(game: &NormalFormGame, x: &[F], y: &[F]) -> Result<EquilibriumSolution<F>, Error> {
    let profile = MixedProfile::new(vec![
        MixedStrategy::normalized(x.to_vec())?,
        MixedStrategy::normalized(y.to_vec())?,
    ]);
    let payoffs = game.expected(&profile)?;
    Ok(EquilibriumSolution::mixed(profile, payoffs))
}
