use crate::Error;
use crate::Field;

/// Probability distribution over a player's pure strategies
/// (or over the actions at one information set).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MixedStrategy<F>(Vec<F>);

impl<F: Field> MixedStrategy<F> {
    /// Probabilities must be non-negative and sum to one.
    pub fn new(probabilities: Vec<F>) -> Result<Self, Error> {
        if probabilities.is_empty() {
            return Err(Error::InvalidGame("empty strategy".into()));
        }
        if probabilities.iter().any(|p| p.is_negative()) {
            return Err(Error::InvalidGame("negative probability".into()));
        }
        let total = probabilities.iter().cloned().sum::<F>();
        if !total.approx_eq(&F::one()) {
            return Err(Error::InvalidGame(format!("probabilities sum to {}", total)));
        }
        Ok(Self(probabilities))
    }
    /// Scales non-negative weights to sum to one.
    pub fn normalized(weights: Vec<F>) -> Result<Self, Error> {
        if weights.iter().any(|p| p.is_negative()) {
            return Err(Error::InvalidGame("negative weight".into()));
        }
        let total = weights.iter().cloned().sum::<F>();
        weights
            .iter()
            .map(|w| w.checked_div(&total))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
    pub fn pure(n: usize, strategy: usize) -> Self {
        Self((0..n).map(|s| if s == strategy { F::one() } else { F::zero() }).collect())
    }
    pub fn uniform(n: usize) -> Self {
        let p = F::one().checked_div(&F::from_usize(n)).unwrap_or_else(|_| F::zero());
        Self(vec![p; n])
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn probabilities(&self) -> &[F] {
        &self.0
    }
    pub fn probability(&self, strategy: usize) -> &F {
        &self.0[strategy]
    }
    pub fn support(&self) -> Vec<usize> {
        (0..self.len()).filter(|s| !self.0[*s].is_zero()).collect()
    }
    /// The strategy played with certainty, if any.
    pub fn as_pure(&self) -> Option<usize> {
        match self.support().as_slice() {
            [s] => Some(*s),
            _ => None,
        }
    }
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a.approx_eq(b))
    }
    pub fn to_f64(&self) -> MixedStrategy<f64> {
        MixedStrategy(self.0.iter().map(|p| p.to_f64()).collect())
    }
}

impl<F> From<MixedStrategy<F>> for Vec<F> {
    fn from(strategy: MixedStrategy<F>) -> Self {
        strategy.0
    }
}

impl<F: std::fmt::Display> std::fmt::Display for MixedStrategy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self.0.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        write!(f, "({})", body.join(", "))
    }
}

/// One mixed strategy per player.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MixedProfile<F>(Vec<MixedStrategy<F>>);

impl<F: Field> MixedProfile<F> {
    pub fn new(strategies: Vec<MixedStrategy<F>>) -> Self {
        Self(strategies)
    }
    /// Every player uniform over `shape[p]` strategies.
    pub fn centroid(shape: &[usize]) -> Self {
        Self(shape.iter().map(|n| MixedStrategy::uniform(*n)).collect())
    }
    pub fn pure(shape: &[usize], profile: &[usize]) -> Self {
        Self(
            shape
                .iter()
                .zip(profile.iter())
                .map(|(n, s)| MixedStrategy::pure(*n, *s))
                .collect(),
        )
    }
    pub fn players(&self) -> usize {
        self.0.len()
    }
    pub fn shape(&self) -> Vec<usize> {
        self.0.iter().map(MixedStrategy::len).collect()
    }
    pub fn strategies(&self) -> &[MixedStrategy<F>] {
        &self.0
    }
    pub fn player(&self, player: usize) -> &MixedStrategy<F> {
        &self.0[player]
    }
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.players() == other.players()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| a.approx_eq(b))
    }
    pub fn to_f64(&self) -> MixedProfile<f64> {
        MixedProfile(self.0.iter().map(MixedStrategy::to_f64).collect())
    }
}

impl<F> std::ops::Index<usize> for MixedProfile<F> {
    type Output = MixedStrategy<F>;
    fn index(&self, player: usize) -> &Self::Output {
        &self.0[player]
    }
}

impl<F: std::fmt::Display> std::fmt::Display for MixedProfile<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self.0.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        write!(f, "{}", body.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rational;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn probabilities_sum_exactly_to_one() {
        assert!(MixedStrategy::new(vec![r(1, 3), r(2, 3)]).is_ok());
        assert!(MixedStrategy::new(vec![r(1, 3), r(1, 3)]).is_err());
        assert!(MixedStrategy::new(vec![r(4, 3), r(-1, 3)]).is_err());
    }
    #[test]
    fn normalization() {
        let s = MixedStrategy::normalized(vec![r(2, 1), r(6, 1)]).unwrap();
        assert_eq!(s.probabilities(), &[r(1, 4), r(3, 4)]);
        assert_eq!(
            MixedStrategy::<Rational>::normalized(vec![r(0, 1)]),
            Err(Error::DivisionByZero)
        );
    }
    #[test]
    fn uniform_and_pure() {
        let u = MixedStrategy::<Rational>::uniform(3);
        assert_eq!(u.probabilities().iter().cloned().sum::<Rational>(), Rational::one());
        assert_eq!(u.as_pure(), None);
        let p = MixedStrategy::<Rational>::pure(3, 1);
        assert_eq!(p.as_pure(), Some(1));
        assert_eq!(p.support(), vec![1]);
    }
    #[test]
    fn display() {
        let profile = MixedProfile::new(vec![
            MixedStrategy::new(vec![r(1, 2), r(1, 2)]).unwrap(),
            MixedStrategy::pure(2, 0),
        ]);
        assert_eq!(profile.to_string(), "(1/2, 1/2) (1, 0)");
    }
}
