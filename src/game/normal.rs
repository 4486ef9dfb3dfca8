use super::MixedProfile;
use crate::Arbitrary;
use crate::Error;
use crate::Field;
use crate::Matrix;
use crate::Position;
use crate::Rational;

/// Finite game in strategic form.
///
/// Payoffs live in one flat array: the cell of a pure profile is its
/// mixed-radix index with the last player varying fastest, and each cell
/// holds one payoff per player.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalFormGame {
    title: String,
    players: Vec<String>,
    strategies: Vec<Vec<String>>,
    payoffs: Vec<Rational>,
}

impl NormalFormGame {
    /// All payoffs zero, default labels "1", "2", ...
    pub fn new(shape: &[usize]) -> Result<Self, Error> {
        if shape.is_empty() {
            return Err(Error::InvalidGame("no players".into()));
        }
        if let Some(p) = shape.iter().position(|m| *m == 0) {
            return Err(Error::InvalidGame(format!("player {} has no strategies", p + 1)));
        }
        Ok(Self::blank(shape))
    }
    fn blank(shape: &[usize]) -> Self {
        let cells = shape.iter().product::<usize>();
        Self {
            title: String::new(),
            players: (1..=shape.len()).map(|p| p.to_string()).collect(),
            strategies: shape
                .iter()
                .map(|m| (1..=*m).map(|s| s.to_string()).collect())
                .collect(),
            payoffs: vec![Rational::zero(); cells * shape.len()],
        }
    }
    /// Two-player game from row and column payoff matrices.
    pub fn bimatrix(a: &Matrix<Rational>, b: &Matrix<Rational>) -> Result<Self, Error> {
        if a.shape() != b.shape() {
            return Err(Error::mismatch(a.shape(), b.shape()));
        }
        let mut game = Self::new(&[a.rows(), a.cols()])?;
        for i in 0..a.rows() {
            for j in 0..a.cols() {
                game.set_payoff(&[i, j], vec![a[(i, j)].clone(), b[(i, j)].clone()])?;
            }
        }
        Ok(game)
    }
    /// Fills every cell from a function of the pure profile.
    pub fn from_fn(
        shape: &[usize],
        mut f: impl FnMut(&[usize]) -> Vec<Rational>,
    ) -> Result<Self, Error> {
        let mut game = Self::new(shape)?;
        for profile in game.profiles().collect::<Vec<_>>() {
            game.set_payoff(&profile, f(&profile))?;
        }
        Ok(game)
    }
    /// Uniform integer payoffs in `-RANDOM_PAYOFF..=RANDOM_PAYOFF`.
    pub fn random_shape(shape: &[usize]) -> Result<Self, Error> {
        use rand::Rng;
        let ref mut rng = rand::rng();
        Self::from_fn(shape, |_| {
            (0..shape.len())
                .map(|_| Rational::from(rng.random_range(-crate::RANDOM_PAYOFF..=crate::RANDOM_PAYOFF)))
                .collect()
        })
    }
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn players(&self) -> usize {
        self.players.len()
    }
    pub fn shape(&self) -> Vec<usize> {
        self.strategies.iter().map(Vec::len).collect()
    }
    pub fn strategies(&self, player: Position) -> usize {
        self.strategies[player].len()
    }
    pub fn cells(&self) -> usize {
        self.strategies.iter().map(Vec::len).product()
    }
    pub fn player_label(&self, player: Position) -> &str {
        &self.players[player]
    }
    pub fn set_player_label(&mut self, player: Position, label: impl Into<String>) {
        self.players[player] = label.into();
    }
    pub fn strategy_label(&self, player: Position, strategy: usize) -> &str {
        &self.strategies[player][strategy]
    }
    pub fn set_strategy_label(&mut self, player: Position, strategy: usize, label: impl Into<String>) {
        self.strategies[player][strategy] = label.into();
    }
    fn cell(&self, profile: &[usize]) -> Result<usize, Error> {
        if profile.len() != self.players() {
            return Err(Error::mismatch(self.players(), profile.len()));
        }
        let mut cell = 0;
        for (s, strategies) in profile.iter().zip(self.strategies.iter()) {
            if *s >= strategies.len() {
                return Err(Error::mismatch(strategies.len(), s));
            }
            cell = cell * strategies.len() + s;
        }
        Ok(cell)
    }
    pub fn payoff(&self, player: Position, profile: &[usize]) -> Result<&Rational, Error> {
        let cell = self.cell(profile)?;
        Ok(&self.payoffs[cell * self.players() + player])
    }
    /// All players' payoffs at a pure profile.
    pub fn payoffs(&self, profile: &[usize]) -> Result<&[Rational], Error> {
        let n = self.players();
        let cell = self.cell(profile)?;
        Ok(&self.payoffs[cell * n..(cell + 1) * n])
    }
    pub fn set_payoff(&mut self, profile: &[usize], payoffs: Vec<Rational>) -> Result<(), Error> {
        let n = self.players();
        if payoffs.len() != n {
            return Err(Error::mismatch(n, payoffs.len()));
        }
        let cell = self.cell(profile)?;
        for (p, x) in payoffs.into_iter().enumerate() {
            self.payoffs[cell * n + p] = x;
        }
        Ok(())
    }
    /// Pure profiles in cell order.
    pub fn profiles(&self) -> Profiles {
        Profiles::new(self.shape())
    }
    /// Payoff matrix of one player in a two-player game.
    pub fn matrix(&self, player: Position) -> Result<Matrix<Rational>, Error> {
        if self.players() != 2 {
            return Err(Error::InvalidGame(format!(
                "expected two players, found {}",
                self.players()
            )));
        }
        let (m, n) = (self.strategies(0), self.strategies(1));
        let mut matrix = Matrix::zeros(m, n);
        for i in 0..m {
            for j in 0..n {
                matrix[(i, j)] = self.payoff(player, &[i, j])?.clone();
            }
        }
        Ok(matrix)
    }
    /// Common payoff sum, if every cell has the same one.
    pub fn constant_sum(&self) -> Option<Rational> {
        let n = self.players();
        let mut sums = self.payoffs.chunks(n).map(|c| c.iter().sum::<Rational>());
        let first = sums.next()?;
        sums.all(|s| s == first).then_some(first)
    }
    pub fn min_payoff(&self) -> Rational {
        self.payoffs.iter().min().cloned().unwrap_or_else(Rational::zero)
    }
    pub fn max_payoff(&self) -> Rational {
        self.payoffs.iter().max().cloned().unwrap_or_else(Rational::zero)
    }
    pub fn validate(&self) -> Result<(), Error> {
        if self.players.is_empty() {
            return Err(Error::InvalidGame("no players".into()));
        }
        if self.strategies.len() != self.players.len() {
            return Err(Error::mismatch(self.players.len(), self.strategies.len()));
        }
        if self.strategies.iter().any(Vec::is_empty) {
            return Err(Error::InvalidGame("player without strategies".into()));
        }
        if self.payoffs.len() != self.cells() * self.players() {
            return Err(Error::mismatch(self.cells() * self.players(), self.payoffs.len()));
        }
        Ok(())
    }

    fn check<F: Field>(&self, profile: &MixedProfile<F>) -> Result<(), Error> {
        match profile.shape() == self.shape() {
            true => Ok(()),
            false => Err(Error::mismatch(self.shape(), profile.shape())),
        }
    }
    /// Probability of a pure profile, leaving out one player if given.
    fn weight<F: Field>(profile: &MixedProfile<F>, pure: &[usize], skip: Option<Position>) -> F {
        let mut w = F::one();
        for (p, s) in pure.iter().enumerate().filter(|(p, _)| Some(*p) != skip) {
            w = w * profile[p].probability(*s);
        }
        w
    }
    /// Expected payoff of every player.
    pub fn expected<F: Field>(&self, profile: &MixedProfile<F>) -> Result<Vec<F>, Error> {
        self.check(profile)?;
        let n = self.players();
        let mut total = vec![F::zero(); n];
        for pure in self.profiles() {
            let w = Self::weight(profile, &pure, None);
            if w.is_zero() {
                continue;
            }
            for (p, x) in self.payoffs(&pure)?.iter().enumerate() {
                total[p] += w.clone() * &F::from_rational(x);
            }
        }
        Ok(total)
    }
    /// Expected payoff of each pure strategy of `player` against the others.
    pub fn deviations<F: Field>(&self, profile: &MixedProfile<F>, player: Position) -> Result<Vec<F>, Error> {
        self.check(profile)?;
        let mut values = vec![F::zero(); self.strategies(player)];
        for pure in self.profiles() {
            let w = Self::weight(profile, &pure, Some(player));
            if w.is_zero() {
                continue;
            }
            values[pure[player]] += w * &F::from_rational(self.payoff(player, &pure)?);
        }
        Ok(values)
    }
    /// Gain of the best pure deviation over the current expected payoff.
    pub fn regret<F: Field>(&self, profile: &MixedProfile<F>, player: Position) -> Result<F, Error> {
        let current = self.expected(profile)?[player].clone();
        let best = self
            .deviations(profile, player)?
            .into_iter()
            .reduce(F::larger)
            .unwrap_or_else(F::zero);
        Ok(best - current)
    }
    pub fn max_regret<F: Field>(&self, profile: &MixedProfile<F>) -> Result<F, Error> {
        (0..self.players())
            .map(|p| self.regret(profile, p))
            .try_fold(F::zero(), |max, r| r.map(|r| max.larger(r)))
    }
    pub fn is_nash<F: Field>(&self, profile: &MixedProfile<F>) -> Result<bool, Error> {
        Ok(!self.max_regret(profile)?.is_positive())
    }
}

impl Arbitrary for NormalFormGame {
    /// Two players, each with 2..=RANDOM_STRATEGIES strategies.
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let m = rng.random_range(2..=crate::RANDOM_STRATEGIES);
        let n = rng.random_range(2..=crate::RANDOM_STRATEGIES);
        let mut game = Self::blank(&[m, n]);
        for x in game.payoffs.iter_mut() {
            *x = Rational::from(rng.random_range(-crate::RANDOM_PAYOFF..=crate::RANDOM_PAYOFF));
        }
        game
    }
}

impl std::fmt::Display for NormalFormGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.title.is_empty() {
            writeln!(f, "{}", self.title)?;
        }
        for pure in self.profiles() {
            let labels = pure
                .iter()
                .enumerate()
                .map(|(p, s)| self.strategies[p][*s].as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let payoffs = self
                .payoffs(&pure)
                .map_err(|_| std::fmt::Error)?
                .iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{:<16}{}", labels, payoffs)?;
        }
        Ok(())
    }
}

/// Odometer over pure profiles, last player fastest.
#[derive(Debug, Clone)]
pub struct Profiles {
    shape: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Profiles {
    pub fn new(shape: Vec<usize>) -> Self {
        let next = match shape.iter().any(|m| *m == 0) {
            true => None,
            false => Some(vec![0; shape.len()]),
        };
        Self { shape, next }
    }
}

impl Iterator for Profiles {
    type Item = Vec<usize>;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for p in (0..self.shape.len()).rev() {
            successor[p] += 1;
            if successor[p] < self.shape[p] {
                self.next = Some(successor);
                break;
            }
            successor[p] = 0;
        }
        Some(current)
    }
}
