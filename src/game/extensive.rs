use super::BehaviorProfile;
use super::NormalFormGame;
use super::Profiles;
use crate::Error;
use crate::Field;
use crate::Position;
use crate::Rational;
use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// An own move of a player: information set and action taken there.
pub type Choice = (usize, usize);

/// Tree vertex. Outgoing edges are weighted by action index.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Node {
    Decision { infoset: usize },
    Chance { probabilities: Vec<Rational> },
    Terminal { outcome: Option<usize> },
}

/// Decision nodes a player cannot tell apart. Members share the action list.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Infoset {
    player: Position,
    label: String,
    actions: Vec<String>,
    members: Vec<NodeIndex>,
}

impl Infoset {
    pub fn player(&self) -> Position {
        self.player
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn actions(&self) -> &[String] {
        &self.actions
    }
    pub fn members(&self) -> &[NodeIndex] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Outcome {
    label: String,
    payoffs: Vec<Rational>,
}

impl Outcome {
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn payoffs(&self) -> &[Rational] {
        &self.payoffs
    }
}

/// Finite game tree held in an index arena.
///
/// Games are grown from the root: every new node starts as a terminal
/// without outcome and is turned into a decision or chance node by one of
/// the `append_*` methods, which also create its children.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtensiveFormGame {
    title: String,
    players: Vec<String>,
    tree: DiGraph<Node, usize>,
    root: NodeIndex,
    infosets: Vec<Infoset>,
    outcomes: Vec<Outcome>,
}

impl ExtensiveFormGame {
    pub fn new(players: usize) -> Result<Self, Error> {
        if players == 0 {
            return Err(Error::InvalidGame("no players".into()));
        }
        let mut tree = DiGraph::new();
        let root = tree.add_node(Node::Terminal { outcome: None });
        Ok(Self {
            title: String::new(),
            players: (1..=players).map(|p| p.to_string()).collect(),
            tree,
            root,
            infosets: Vec::new(),
            outcomes: Vec::new(),
        })
    }
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    // construction

    fn leaf(&self, node: NodeIndex) -> Result<(), Error> {
        match self.tree.node_weight(node) {
            Some(Node::Terminal { .. }) => Ok(()),
            Some(_) => Err(Error::InvalidGame(format!("node {} already has a move", node.index()))),
            None => Err(Error::InvalidGame(format!("no node {}", node.index()))),
        }
    }
    fn sprout(&mut self, node: NodeIndex, width: usize) -> Vec<NodeIndex> {
        (0..width)
            .map(|action| {
                let child = self.tree.add_node(Node::Terminal { outcome: None });
                self.tree.add_edge(node, child, action);
                child
            })
            .collect()
    }
    /// Gives `player` a move at a leaf, in a new information set.
    /// Returns the information set index; children are created per action.
    pub fn append_move(
        &mut self,
        node: NodeIndex,
        player: Position,
        actions: Vec<String>,
    ) -> Result<usize, Error> {
        self.leaf(node)?;
        if player >= self.players() {
            return Err(Error::InvalidGame(format!("no player {}", player + 1)));
        }
        if actions.is_empty() {
            return Err(Error::InvalidGame("move without actions".into()));
        }
        let infoset = self.infosets.len();
        let rank = self.infosets.iter().filter(|h| h.player == player).count();
        let width = actions.len();
        self.infosets.push(Infoset {
            player,
            label: format!("{}:{}", player + 1, rank + 1),
            actions,
            members: vec![node],
        });
        self.tree[node] = Node::Decision { infoset };
        self.sprout(node, width);
        Ok(infoset)
    }
    /// Adds a leaf to an existing information set.
    pub fn append_into(&mut self, node: NodeIndex, infoset: usize) -> Result<(), Error> {
        self.leaf(node)?;
        let width = self
            .infosets
            .get(infoset)
            .map(|h| h.actions.len())
            .ok_or_else(|| Error::InvalidGame(format!("no information set {}", infoset)))?;
        self.infosets[infoset].members.push(node);
        self.tree[node] = Node::Decision { infoset };
        self.sprout(node, width);
        Ok(())
    }
    /// Makes a leaf a chance move. Probabilities must sum exactly to one.
    pub fn append_chance(&mut self, node: NodeIndex, probabilities: Vec<Rational>) -> Result<(), Error> {
        self.leaf(node)?;
        if probabilities.is_empty() || probabilities.iter().any(Rational::is_negative) {
            return Err(Error::InvalidGame("chance needs non-negative probabilities".into()));
        }
        if probabilities.iter().sum::<Rational>() != Rational::one() {
            return Err(Error::InvalidGame("chance probabilities do not sum to one".into()));
        }
        let width = probabilities.len();
        self.tree[node] = Node::Chance { probabilities };
        self.sprout(node, width);
        Ok(())
    }
    pub fn add_outcome(&mut self, label: impl Into<String>, payoffs: Vec<Rational>) -> Result<usize, Error> {
        if payoffs.len() != self.players() {
            return Err(Error::mismatch(self.players(), payoffs.len()));
        }
        self.outcomes.push(Outcome {
            label: label.into(),
            payoffs,
        });
        Ok(self.outcomes.len() - 1)
    }
    pub fn set_outcome(&mut self, node: NodeIndex, outcome: usize) -> Result<(), Error> {
        self.leaf(node)?;
        if outcome >= self.outcomes.len() {
            return Err(Error::InvalidGame(format!("no outcome {}", outcome)));
        }
        self.tree[node] = Node::Terminal {
            outcome: Some(outcome),
        };
        Ok(())
    }
    pub fn set_player_label(&mut self, player: Position, label: impl Into<String>) {
        self.players[player] = label.into();
    }

    // queries

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn players(&self) -> usize {
        self.players.len()
    }
    pub fn player_label(&self, player: Position) -> &str {
        &self.players[player]
    }
    pub fn root(&self) -> NodeIndex {
        self.root
    }
    pub fn nodes(&self) -> usize {
        self.tree.node_count()
    }
    pub fn node(&self, node: NodeIndex) -> &Node {
        &self.tree[node]
    }
    /// Children ordered by action.
    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges = self
            .tree
            .edges(node)
            .map(|e| (*e.weight(), e.target()))
            .collect::<Vec<_>>();
        edges.sort_unstable();
        edges.into_iter().map(|(_, child)| child).collect()
    }
    /// Parent and the action leading here.
    pub fn parent(&self, node: NodeIndex) -> Option<(NodeIndex, usize)> {
        self.tree
            .edges_directed(node, Direction::Incoming)
            .next()
            .map(|e| (e.source(), *e.weight()))
    }
    pub fn infosets(&self) -> &[Infoset] {
        &self.infosets
    }
    pub fn infoset(&self, infoset: usize) -> &Infoset {
        &self.infosets[infoset]
    }
    pub fn infosets_of(&self, player: Position) -> Vec<usize> {
        (0..self.infosets.len())
            .filter(|h| self.infosets[*h].player == player)
            .collect()
    }
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }
    /// Payoffs at a terminal node; zero where no outcome is attached.
    pub fn payoffs(&self, node: NodeIndex) -> Vec<Rational> {
        match self.tree[node] {
            Node::Terminal { outcome: Some(o) } => self.outcomes[o].payoffs.clone(),
            _ => vec![Rational::zero(); self.players()],
        }
    }
    /// Own moves of `player` on the path from the root to `node`.
    pub fn history(&self, node: NodeIndex, player: Position) -> Vec<Choice> {
        let mut history = Vec::new();
        let mut current = node;
        while let Some((parent, action)) = self.parent(current) {
            if let Node::Decision { infoset } = self.tree[parent] {
                if self.infosets[infoset].player == player {
                    history.push((infoset, action));
                }
            }
            current = parent;
        }
        history.reverse();
        history
    }
    /// Last own move of the owner before reaching `infoset`.
    /// Well defined under perfect recall.
    pub fn parent_sequence(&self, infoset: usize) -> Option<Choice> {
        let h = &self.infosets[infoset];
        h.members
            .first()
            .and_then(|node| self.history(*node, h.player).last().copied())
    }
    /// Checks structure and perfect recall: all members of an information
    /// set share the owner's own history. Deserialized games are checked
    /// for dangling indices before anything is looked up.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |what: String| Err(Error::InvalidGame(what));
        if self.players.is_empty() {
            return invalid("no players".into());
        }
        for o in self.outcomes.iter() {
            if o.payoffs.len() != self.players() {
                return Err(Error::mismatch(self.players(), o.payoffs.len()));
            }
        }
        self.validate_tree()?;
        for node in self.tree.node_indices() {
            let width = match &self.tree[node] {
                Node::Decision { infoset } => match self.infosets.get(*infoset) {
                    Some(h) if h.members.contains(&node) => h.actions.len(),
                    Some(h) => return invalid(format!("node {} missing from information set {}", node.index(), h.label)),
                    None => return invalid(format!("node {} has no information set {}", node.index(), infoset)),
                },
                Node::Chance { probabilities } => {
                    if probabilities.iter().any(Rational::is_negative)
                        || probabilities.iter().sum::<Rational>() != Rational::one()
                    {
                        return invalid(format!("node {} has bad chance probabilities", node.index()));
                    }
                    probabilities.len()
                }
                Node::Terminal { outcome: Some(o) } if *o >= self.outcomes.len() => {
                    return invalid(format!("node {} has no outcome {}", node.index(), o));
                }
                Node::Terminal { .. } => 0,
            };
            let mut labels = self.tree.edges(node).map(|e| *e.weight()).collect::<Vec<_>>();
            labels.sort_unstable();
            if labels != (0..width).collect::<Vec<_>>() {
                return invalid(format!("node {} has wrong arity", node.index()));
            }
        }
        for (i, h) in self.infosets.iter().enumerate() {
            if h.player >= self.players() {
                return invalid(format!("information set {} has no player {}", h.label, h.player + 1));
            }
            if h.actions.is_empty() || h.members.is_empty() {
                return invalid(format!("information set {} is empty", h.label));
            }
            for member in h.members.iter() {
                match self.tree.node_weight(*member) {
                    Some(Node::Decision { infoset }) if *infoset == i => {}
                    _ => return invalid(format!("information set {} lists node {}", h.label, member.index())),
                }
            }
        }
        for (i, h) in self.infosets.iter().enumerate() {
            let mut members = h.members.iter().map(|n| self.history(*n, h.player));
            if let Some(first) = members.next() {
                if members.any(|other| other != first) {
                    return Err(Error::InvalidGame(format!(
                        "imperfect recall at information set {}",
                        h.label
                    )));
                }
                if first.iter().any(|(j, _)| *j == i) {
                    return Err(Error::InvalidGame(format!(
                        "information set {} revisits itself",
                        h.label
                    )));
                }
            }
        }
        Ok(())
    }

    /// Every node but the root has one parent and is reachable from it.
    fn validate_tree(&self) -> Result<(), Error> {
        if self.tree.node_weight(self.root).is_none() {
            return Err(Error::InvalidGame(format!("no root node {}", self.root.index())));
        }
        for node in self.tree.node_indices() {
            let parents = self.tree.edges_directed(node, Direction::Incoming).count();
            if parents != (node != self.root) as usize {
                return Err(Error::InvalidGame(format!("node {} has {} parents", node.index(), parents)));
            }
        }
        let mut reached = 0;
        let mut dfs = Dfs::new(&self.tree, self.root);
        while dfs.next(&self.tree).is_some() {
            reached += 1;
        }
        match reached == self.tree.node_count() {
            true => Ok(()),
            false => Err(Error::InvalidGame("tree is not connected to the root".into())),
        }
    }

    /// Reduced to strategic form: a pure strategy picks one action at
    /// every own information set. Strategy labels concatenate the action
    /// labels in information set order.
    pub fn to_normal_form(&self) -> Result<NormalFormGame, Error> {
        self.validate()?;
        let owned = (0..self.players()).map(|p| self.infosets_of(p)).collect::<Vec<_>>();
        let radices = owned
            .iter()
            .map(|hs| hs.iter().map(|h| self.infosets[*h].actions.len()).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let shape = radices.iter().map(|r| r.iter().product::<usize>()).collect::<Vec<_>>();
        let mut game = NormalFormGame::new(&shape)?.with_title(self.title.clone());
        for p in 0..self.players() {
            game.set_player_label(p, self.players[p].clone());
            for (s, choice) in Profiles::new(radices[p].clone()).enumerate() {
                let label = owned[p]
                    .iter()
                    .zip(choice.iter())
                    .map(|(h, a)| self.infosets[*h].actions[*a].as_str())
                    .collect::<String>();
                if !label.is_empty() {
                    game.set_strategy_label(p, s, label);
                }
            }
        }
        for pure in game.profiles().collect::<Vec<_>>() {
            let mut action = vec![0; self.infosets.len()];
            for p in 0..self.players() {
                let choice = Profiles::new(radices[p].clone())
                    .nth(pure[p])
                    .unwrap_or_default();
                for (h, a) in owned[p].iter().zip(choice) {
                    action[*h] = a;
                }
            }
            game.set_payoff(&pure, self.pure_payoffs(&action))?;
        }
        Ok(game)
    }
    fn pure_payoffs(&self, action: &[usize]) -> Vec<Rational> {
        let mut total = vec![Rational::zero(); self.players()];
        let mut stack = vec![(self.root, Rational::one())];
        while let Some((node, weight)) = stack.pop() {
            let children = self.children(node);
            match &self.tree[node] {
                Node::Decision { infoset } => stack.push((children[action[*infoset]], weight)),
                Node::Chance { probabilities } => stack.extend(
                    children
                        .into_iter()
                        .zip(probabilities.iter())
                        .map(|(child, p)| (child, weight.clone() * p)),
                ),
                Node::Terminal { .. } => {
                    for (t, x) in total.iter_mut().zip(self.payoffs(node)) {
                        *t += weight.clone() * x;
                    }
                }
            }
        }
        total
    }

    fn check<F: Field>(&self, profile: &BehaviorProfile<F>) -> Result<(), Error> {
        if profile.len() != self.infosets.len() {
            return Err(Error::mismatch(self.infosets.len(), profile.len()));
        }
        for (h, infoset) in self.infosets.iter().enumerate() {
            if profile.infoset(h).len() != infoset.actions.len() {
                return Err(Error::mismatch(infoset.actions.len(), profile.infoset(h).len()));
            }
        }
        Ok(())
    }
    /// Expected payoff of every player under a behavior profile.
    pub fn expected<F: Field>(&self, profile: &BehaviorProfile<F>) -> Result<Vec<F>, Error> {
        self.check(profile)?;
        let mut total = vec![F::zero(); self.players()];
        let mut stack = vec![(self.root, F::one())];
        while let Some((node, weight)) = stack.pop() {
            if weight.is_zero() {
                continue;
            }
            let children = self.children(node).into_iter().enumerate();
            match &self.tree[node] {
                Node::Decision { infoset } => stack.extend(children.map(|(a, child)| {
                    (child, weight.clone() * profile.probability(*infoset, a))
                })),
                Node::Chance { probabilities } => stack.extend(children.map(|(a, child)| {
                    (child, weight.clone() * &F::from_rational(&probabilities[a]))
                })),
                Node::Terminal { .. } => {
                    for (t, x) in total.iter_mut().zip(self.payoffs(node)) {
                        *t += weight.clone() * &F::from_rational(&x);
                    }
                }
            }
        }
        Ok(total)
    }
    /// Value of a best response of `player` against the rest of `profile`.
    ///
    /// Terminal payoffs are weighted by everyone else's reach probability
    /// and bucketed by the player's last own move; a best response then
    /// picks the best action at each own information set bottom-up.
    pub fn best_response<F: Field>(&self, profile: &BehaviorProfile<F>, player: Position) -> Result<F, Error> {
        self.check(profile)?;
        let mut leaves = HashMap::<Option<Choice>, F>::new();
        let mut below = HashMap::<Option<Choice>, Vec<usize>>::new();
        let mut stack = vec![(self.root, F::one(), None::<Choice>)];
        while let Some((node, weight, last)) = stack.pop() {
            let children = self.children(node).into_iter().enumerate();
            match &self.tree[node] {
                Node::Decision { infoset } if self.infosets[*infoset].player == player => {
                    let siblings = below.entry(last).or_default();
                    if !siblings.contains(infoset) {
                        siblings.push(*infoset);
                    }
                    stack.extend(children.map(|(a, child)| (child, weight.clone(), Some((*infoset, a)))));
                }
                Node::Decision { infoset } => stack.extend(children.map(|(a, child)| {
                    (child, weight.clone() * profile.probability(*infoset, a), last)
                })),
                Node::Chance { probabilities } => stack.extend(children.map(|(a, child)| {
                    (child, weight.clone() * &F::from_rational(&probabilities[a]), last)
                })),
                Node::Terminal { .. } => {
                    let x = F::from_rational(&self.payoffs(node)[player]);
                    *leaves.entry(last).or_insert_with(F::zero) += weight * &x;
                }
            }
        }
        Ok(self.value(None, &leaves, &below))
    }
    fn value<F: Field>(
        &self,
        sequence: Option<Choice>,
        leaves: &HashMap<Option<Choice>, F>,
        below: &HashMap<Option<Choice>, Vec<usize>>,
    ) -> F {
        let mut total = leaves.get(&sequence).cloned().unwrap_or_else(F::zero);
        for h in below.get(&sequence).into_iter().flatten() {
            total += (0..self.infosets[*h].actions.len())
                .map(|a| self.value(Some((*h, a)), leaves, below))
                .reduce(F::larger)
                .unwrap_or_else(F::zero);
        }
        total
    }
    pub fn regret<F: Field>(&self, profile: &BehaviorProfile<F>, player: Position) -> Result<F, Error> {
        let current = self.expected(profile)?[player].clone();
        Ok(self.best_response(profile, player)? - current)
    }
    pub fn max_regret<F: Field>(&self, profile: &BehaviorProfile<F>) -> Result<F, Error> {
        (0..self.players())
            .map(|p| self.regret(profile, p))
            .try_fold(F::zero(), |max, r| r.map(|r| max.larger(r)))
    }
    pub fn is_nash<F: Field>(&self, profile: &BehaviorProfile<F>) -> Result<bool, Error> {
        Ok(!self.max_regret(profile)?.is_positive())
    }
}

impl std::fmt::Display for ExtensiveFormGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let line = match &self.tree[node] {
                Node::Decision { infoset } => format!("{} {:?}", self.infosets[*infoset].label, self.infosets[*infoset].actions),
                Node::Chance { probabilities } => format!(
                    "chance ({})",
                    probabilities.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
                ),
                Node::Terminal { .. } => format!(
                    "({})",
                    self.payoffs(node).iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
                ),
            };
            writeln!(f, "{}{}", "  ".repeat(depth), line)?;
            stack.extend(self.children(node).into_iter().rev().map(|c| (c, depth + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MixedStrategy;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }
    fn actions(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }
    /// Player 2 chooses without seeing player 1's coin.
    fn pennies() -> ExtensiveFormGame {
        let mut game = ExtensiveFormGame::new(2).unwrap();
        let root = game.root();
        game.append_move(root, 0, actions(&["H", "T"])).unwrap();
        let left = game.children(root);
        let h = game.append_move(left[0], 1, actions(&["h", "t"])).unwrap();
        game.append_into(left[1], h).unwrap();
        let win = game.add_outcome("win", vec![q(1), q(-1)]).unwrap();
        let lose = game.add_outcome("lose", vec![q(-1), q(1)]).unwrap();
        for (i, node) in left.iter().enumerate() {
            for (j, leaf) in game.children(*node).into_iter().enumerate() {
                game.set_outcome(leaf, if i == j { win } else { lose }).unwrap();
            }
        }
        game
    }

    #[test]
    fn builder_shapes_tree() {
        let game = pennies();
        assert_eq!(game.nodes(), 7);
        assert_eq!(game.infosets().len(), 2);
        assert_eq!(game.infoset(1).members().len(), 2);
        assert_eq!(game.infoset(1).label(), "2:1");
        assert!(game.validate().is_ok());
        let mut bad = game.clone();
        assert!(bad.append_move(bad.root(), 0, actions(&["x"])).is_err());
        assert!(bad.append_chance(bad.children(bad.root())[0], vec![q(1)]).is_err());
    }
    #[test]
    fn imperfect_recall_is_rejected() {
        // player 1 forgets own first move
        let mut game = ExtensiveFormGame::new(1).unwrap();
        let root = game.root();
        game.append_move(root, 0, actions(&["a", "b"])).unwrap();
        let kids = game.children(root);
        let h = game.append_move(kids[0], 0, actions(&["c", "d"])).unwrap();
        game.append_into(kids[1], h).unwrap();
        assert!(matches!(game.validate(), Err(Error::InvalidGame(_))));
    }
    #[test]
    fn chance_must_sum_to_one() {
        let mut game = ExtensiveFormGame::new(1).unwrap();
        let root = game.root();
        let third = Rational::new(1, 3).unwrap();
        assert!(game.append_chance(root, vec![third.clone(), third.clone()]).is_err());
        assert!(game.append_chance(root, vec![third.clone(), third.clone(), third]).is_ok());
        assert_eq!(game.children(root).len(), 3);
    }
    #[test]
    fn normal_form_of_pennies() {
        let normal = pennies().to_normal_form().unwrap();
        assert_eq!(normal.shape(), vec![2, 2]);
        assert_eq!(normal.strategy_label(0, 1), "T");
        assert_eq!(normal.strategy_label(1, 0), "h");
        assert_eq!(normal.payoff(0, &[0, 0]).unwrap(), &q(1));
        assert_eq!(normal.payoff(0, &[0, 1]).unwrap(), &q(-1));
        assert_eq!(normal.constant_sum(), Some(q(0)));
    }
    #[test]
    fn regret_under_behavior() {
        let game = pennies();
        let half = MixedStrategy::new(vec![Rational::new(1, 2).unwrap(); 2]).unwrap();
        let mixed = BehaviorProfile::new(vec![half.clone(), half.clone()]);
        assert_eq!(game.expected(&mixed).unwrap(), vec![q(0), q(0)]);
        assert!(game.is_nash(&mixed).unwrap());
        let skewed = BehaviorProfile::new(vec![MixedStrategy::pure(2, 0), half]);
        assert_eq!(game.regret(&skewed, 1).unwrap(), q(1));
        assert_eq!(game.regret(&skewed, 0).unwrap(), q(0));
    }
    #[test]
    fn chance_weights_payoffs() {
        let mut game = ExtensiveFormGame::new(1).unwrap();
        let root = game.root();
        game.append_chance(root, vec![Rational::new(1, 4).unwrap(), Rational::new(3, 4).unwrap()])
            .unwrap();
        let kids = game.children(root);
        let good = game.add_outcome("good", vec![q(8)]).unwrap();
        game.set_outcome(kids[0], good).unwrap();
        let h = game.append_move(kids[1], 0, actions(&["x", "y"])).unwrap();
        let y = game.children(kids[1])[1];
        game.set_outcome(y, good).unwrap();
        let uniform = BehaviorProfile::<Rational>::uniform(&game);
        assert_eq!(game.expected(&uniform).unwrap(), vec![q(5)]);
        assert_eq!(game.best_response(&uniform, 0).unwrap(), q(8));
        assert_eq!(game.infoset(h).actions(), &actions(&["x", "y"])[..]);
    }
    #[test]
    fn serde_round_trip() {
        let game = pennies();
        let json = serde_json::to_string(&game).unwrap();
        let back = serde_json::from_str::<ExtensiveFormGame>(&json).unwrap();
        assert_eq!(back.to_normal_form().unwrap(), game.to_normal_form().unwrap());
    }
    fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> Result<(), Error> {
        let mut value = serde_json::to_value(pennies()).unwrap();
        edit(&mut value);
        serde_json::from_value::<ExtensiveFormGame>(value).unwrap().validate()
    }
    #[test]
    fn dangling_indices_are_rejected() {
        assert!(tampered(|_| {}).is_ok());
        let edits: [fn(&mut serde_json::Value); 5] = [
            |v| v["tree"]["nodes"][0] = serde_json::json!({ "Decision": { "infoset": 7 } }),
            |v| v["tree"]["nodes"][3] = serde_json::json!({ "Terminal": { "outcome": 9 } }),
            |v| v["infosets"][1]["player"] = serde_json::json!(5),
            |v| v["root"] = serde_json::json!(42),
            |v| v["root"] = serde_json::json!(3),
        ];
        for edit in edits {
            assert!(matches!(tampered(edit), Err(Error::InvalidGame(_))));
        }
    }
    #[test]
    fn members_agree_with_tree() {
        let dropped = tampered(|v| v["infosets"][1]["members"] = serde_json::json!([1]));
        let foreign = tampered(|v| v["infosets"][1]["members"] = serde_json::json!([0, 1, 2]));
        let missing = tampered(|v| v["infosets"][1]["members"] = serde_json::json!([1, 2, 99]));
        assert!(matches!(dropped, Err(Error::InvalidGame(_))));
        assert!(matches!(foreign, Err(Error::InvalidGame(_))));
        assert!(matches!(missing, Err(Error::InvalidGame(_))));
    }
}
