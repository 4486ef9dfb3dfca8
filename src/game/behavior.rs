use super::ExtensiveFormGame;
use super::MixedStrategy;
use crate::Error;
use crate::Field;
use crate::Position;

/// Action distribution at every information set of a game,
/// indexed like [`ExtensiveFormGame::infosets`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BehaviorProfile<F>(Vec<MixedStrategy<F>>);

/// One player's part of a behavior profile.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BehaviorStrategy<F> {
    player: Position,
    infosets: Vec<(usize, MixedStrategy<F>)>,
}

impl<F: Field> BehaviorProfile<F> {
    pub fn new(infosets: Vec<MixedStrategy<F>>) -> Self {
        Self(infosets)
    }
    pub fn uniform(game: &ExtensiveFormGame) -> Self {
        Self(
            game.infosets()
                .iter()
                .map(|h| MixedStrategy::uniform(h.actions().len()))
                .collect(),
        )
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn infoset(&self, infoset: usize) -> &MixedStrategy<F> {
        &self.0[infoset]
    }
    pub fn probability(&self, infoset: usize, action: usize) -> &F {
        self.0[infoset].probability(action)
    }
    pub fn strategy(&self, game: &ExtensiveFormGame, player: Position) -> Result<BehaviorStrategy<F>, Error> {
        if self.len() != game.infosets().len() {
            return Err(Error::mismatch(game.infosets().len(), self.len()));
        }
        Ok(BehaviorStrategy {
            player,
            infosets: game
                .infosets_of(player)
                .into_iter()
                .map(|h| (h, self.0[h].clone()))
                .collect(),
        })
    }
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a.approx_eq(b))
    }
    pub fn to_f64(&self) -> BehaviorProfile<f64> {
        BehaviorProfile(self.0.iter().map(MixedStrategy::to_f64).collect())
    }
}

impl<F: Field> BehaviorStrategy<F> {
    pub fn player(&self) -> Position {
        self.player
    }
    /// (information set, distribution) pairs in information set order.
    pub fn infosets(&self) -> &[(usize, MixedStrategy<F>)] {
        &self.infosets
    }
}

impl<F: std::fmt::Display> std::fmt::Display for BehaviorProfile<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self.0.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        write!(f, "{}", body.join(" "))
    }
}
