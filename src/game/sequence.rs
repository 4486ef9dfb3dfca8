use super::BehaviorProfile;
use super::Choice;
use super::ExtensiveFormGame;
use super::MixedStrategy;
use super::Node;
use crate::Error;
use crate::Field;
use crate::Matrix;
use crate::Position;
use crate::Rational;
use std::collections::HashMap;

/// A sequence of own moves, identified by its last move.
/// `None` is the empty sequence.
pub type Sequence = Option<Choice>;

/// Sequence form of a two-player extensive game with perfect recall.
///
/// For player `p` with sequences `S_p`:
///
/// - `constraints(p)` is `E` with `E x = e`: the empty sequence has
///   weight one and each information set splits its parent sequence's
///   weight among its actions
/// - `payoff(p)` is `|S_1| × |S_2|`, chance-weighted payoffs at leaves
///   reached by each sequence pair
/// - `reach()` is the chance weight of leaves reached by each pair
#[derive(Debug, Clone)]
pub struct SequenceForm {
    sequences: [Vec<Sequence>; 2],
    index: [HashMap<Sequence, usize>; 2],
    constraints: [Matrix<Rational>; 2],
    payoffs: [Matrix<Rational>; 2],
    reach: Matrix<Rational>,
}

impl SequenceForm {
    pub fn new(game: &ExtensiveFormGame) -> Result<Self, Error> {
        if game.players() != 2 {
            return Err(Error::InvalidGame(format!(
                "sequence form needs two players, found {}",
                game.players()
            )));
        }
        game.validate()?;
        let sequences = [0, 1].map(|p| {
            std::iter::once(None)
                .chain(game.infosets_of(p).into_iter().flat_map(|h| {
                    (0..game.infoset(h).actions().len()).map(move |a| Some((h, a)))
                }))
                .collect::<Vec<Sequence>>()
        });
        let index = [0, 1].map(|p| {
            sequences[p]
                .iter()
                .enumerate()
                .map(|(i, s)| (*s, i))
                .collect::<HashMap<_, _>>()
        });
        let constraints = [0, 1].map(|p| {
            let infosets = game.infosets_of(p);
            let mut e = Matrix::zeros(1 + infosets.len(), sequences[p].len());
            e[(0, 0)] = Rational::one();
            for (k, h) in infosets.iter().enumerate() {
                e[(1 + k, index[p][&game.parent_sequence(*h)])] = -Rational::one();
                for a in 0..game.infoset(*h).actions().len() {
                    e[(1 + k, index[p][&Some((*h, a))])] = Rational::one();
                }
            }
            e
        });
        let (m, n) = (sequences[0].len(), sequences[1].len());
        let mut payoffs = [Matrix::zeros(m, n), Matrix::zeros(m, n)];
        let mut reach = Matrix::zeros(m, n);
        let mut stack = vec![(game.root(), Rational::one(), [None::<Choice>; 2])];
        while let Some((node, weight, last)) = stack.pop() {
            let children = game.children(node).into_iter().enumerate();
            match game.node(node) {
                Node::Decision { infoset } => {
                    let p = game.infoset(*infoset).player();
                    stack.extend(children.map(|(a, child)| {
                        let mut next = last;
                        next[p] = Some((*infoset, a));
                        (child, weight.clone(), next)
                    }));
                }
                Node::Chance { probabilities } => stack.extend(
                    children.map(|(a, child)| (child, weight.clone() * &probabilities[a], last)),
                ),
                Node::Terminal { .. } => {
                    let (i, j) = (index[0][&last[0]], index[1][&last[1]]);
                    for (p, x) in game.payoffs(node).into_iter().enumerate() {
                        payoffs[p][(i, j)] += weight.clone() * x;
                    }
                    reach[(i, j)] += weight;
                }
            }
        }
        Ok(Self {
            sequences,
            index,
            constraints,
            payoffs,
            reach,
        })
    }
    pub fn sequences(&self, player: Position) -> &[Sequence] {
        &self.sequences[player]
    }
    pub fn index(&self, player: Position, sequence: &Sequence) -> Option<usize> {
        self.index[player].get(sequence).copied()
    }
    pub fn constraints(&self, player: Position) -> &Matrix<Rational> {
        &self.constraints[player]
    }
    /// `e`: one for the empty sequence row, zero for information set rows.
    pub fn bounds(&self, player: Position) -> Vec<Rational> {
        (0..self.constraints[player].rows())
            .map(|i| if i == 0 { Rational::one() } else { Rational::zero() })
            .collect()
    }
    pub fn payoff(&self, player: Position) -> &Matrix<Rational> {
        &self.payoffs[player]
    }
    pub fn reach(&self) -> &Matrix<Rational> {
        &self.reach
    }
    /// Behavior strategies from realization plans: each action's weight
    /// over its information set's total, uniform where the total is zero.
    pub fn behavior<F: Field>(&self, game: &ExtensiveFormGame, plans: [&[F]; 2]) -> Result<BehaviorProfile<F>, Error> {
        for p in 0..2 {
            if plans[p].len() != self.sequences[p].len() {
                return Err(Error::mismatch(self.sequences[p].len(), plans[p].len()));
            }
        }
        game.infosets()
            .iter()
            .enumerate()
            .map(|(h, infoset)| {
                let p = infoset.player();
                let weights = (0..infoset.actions().len())
                    .map(|a| match self.index(p, &Some((h, a))) {
                        Some(i) => plans[p][i].clone().larger(F::zero()),
                        None => F::zero(),
                    })
                    .collect::<Vec<_>>();
                match weights.iter().cloned().sum::<F>().is_positive() {
                    true => MixedStrategy::normalized(weights),
                    false => Ok(MixedStrategy::uniform(weights.len())),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(BehaviorProfile::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }
    /// Player 1 picks L (payoff 1, 0) or R, after which player 2 picks
    /// l (3, 1) or r (0, 2).
    fn entry() -> ExtensiveFormGame {
        let mut game = ExtensiveFormGame::new(2).unwrap();
        let root = game.root();
        game.append_move(root, 0, vec!["L".into(), "R".into()]).unwrap();
        let kids = game.children(root);
        let out = game.add_outcome("out", vec![q(1), q(0)]).unwrap();
        game.set_outcome(kids[0], out).unwrap();
        game.append_move(kids[1], 1, vec!["l".into(), "r".into()]).unwrap();
        let leaves = game.children(kids[1]);
        let l = game.add_outcome("l", vec![q(3), q(1)]).unwrap();
        let r = game.add_outcome("r", vec![q(0), q(2)]).unwrap();
        game.set_outcome(leaves[0], l).unwrap();
        game.set_outcome(leaves[1], r).unwrap();
        game
    }

    #[test]
    fn sequences_and_constraints() {
        let game = entry();
        let form = SequenceForm::new(&game).unwrap();
        assert_eq!(form.sequences(0), &[None, Some((0, 0)), Some((0, 1))]);
        assert_eq!(form.sequences(1), &[None, Some((1, 0)), Some((1, 1))]);
        let e = form.constraints(0);
        assert_eq!(e.row(0), &[q(1), q(0), q(0)]);
        assert_eq!(e.row(1), &[q(-1), q(1), q(1)]);
        // a realization plan satisfies E x = e
        let x = Vector::from(vec![q(1), Rational::new(1, 3).unwrap(), Rational::new(2, 3).unwrap()]);
        assert_eq!(e.mul_vec(&x).unwrap().into_inner(), form.bounds(0));
    }
    #[test]
    fn payoffs_sit_at_sequence_pairs() {
        let form = SequenceForm::new(&entry()).unwrap();
        assert_eq!(form.payoff(0)[(1, 0)], q(1));
        assert_eq!(form.payoff(0)[(2, 1)], q(3));
        assert_eq!(form.payoff(1)[(2, 2)], q(2));
        assert_eq!(form.reach()[(2, 2)], q(1));
        assert_eq!(form.reach()[(0, 0)], q(0));
    }
    #[test]
    fn behavior_from_plans() {
        let game = entry();
        let form = SequenceForm::new(&game).unwrap();
        let x = vec![q(1), q(1), q(0)];
        let y = vec![q(1), q(0), q(0)];
        let profile = form.behavior(&game, [&x, &y]).unwrap();
        assert_eq!(profile.infoset(0).probabilities(), &[q(1), q(0)]);
        // unreached set falls back to uniform
        assert_eq!(
            profile.infoset(1).probabilities(),
            &[Rational::new(1, 2).unwrap(), Rational::new(1, 2).unwrap()]
        );
    }
}
