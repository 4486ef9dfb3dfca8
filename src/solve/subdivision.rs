use super::Config;
use super::EquilibriumAlgorithm;
use super::EquilibriumSolution;
use crate::Cancel;
use crate::Error;
use crate::Field;
use crate::Game;
use crate::MixedProfile;
use crate::MixedStrategy;
use crate::NormalFormGame;
use crate::Rational;
use std::collections::HashSet;

/// Approximate equilibria of n-player games by simplicial subdivision.
///
/// Each player's mixed strategy is written in cumulative coordinates, so
/// the product of simplices becomes a cube `[0, 1]^D`. With `φ` moving
/// each strategy along its payoff vector and projecting back onto the
/// simplex, the shrunken map `z ↦ (1 - ε) φ(g(z)) + ε c` has its fixed
/// points near equilibria. A path of Freudenthal simplices is followed through the
/// slab `[0, 1]^D × [0, 1]`, labelled by the start point `c` on the
/// bottom layer and by the map on the top layer, from the unique
/// completely labelled bottom face to a completely labelled top face.
/// Between rounds the grid is doubled, `ε` is halved, and the walk is
/// restarted from the last approximation pulled slightly toward the
/// centroid, until the regret is within tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplicialSubdivision;

impl SimplicialSubdivision {
    pub fn equilibrium<F: Field>(game: &NormalFormGame, config: &Config) -> Result<EquilibriumSolution<F>, Error> {
        let ref scaled = Self::rescaled(game)?;
        let shape = game.shape();
        let profile = match shape.iter().all(|m| *m == 1) {
            true => MixedProfile::pure(&shape, &vec![0; shape.len()]),
            false => Self::refine(scaled, config)?,
        };
        let payoffs = game.expected(&profile)?;
        Ok(EquilibriumSolution::mixed(profile, payoffs))
    }

    fn refine<F: Field>(scaled: &NormalFormGame, config: &Config) -> Result<MixedProfile<F>, Error> {
        let shrink = format!("{}", config.shrink).parse::<Rational>()?;
        if !shrink.is_positive() || shrink >= Rational::one() {
            return Err(Error::InvalidNumber(format!("shrink {}", config.shrink)));
        }
        let ref half = F::from_i64(2);
        let restart = F::from_rational(&shrink);
        let mut shrink = restart.clone();
        let cube = Cube::new(scaled.shape());
        let center = cube.cumulative(&MixedProfile::<F>::centroid(&scaled.shape()));
        let mut start = center.clone();
        let mut grid = config.grid.max(1);
        let mut regret = f64::INFINITY;
        for round in 0..=config.refinements {
            let homotopy = Homotopy {
                game: scaled,
                cube: &cube,
                start: &start,
                shrink: &shrink,
                grid,
            };
            let profile = cube.strategies(&homotopy.walk(&config.cancel)?)?;
            regret = scaled.max_regret(&profile)?.to_f64();
            log::debug!("{:<32}{:<32}", format!("subdivision grid {}", grid), regret);
            if regret <= config.tolerance {
                log::info!("{:<32}{:<32}", "subdivision refinements", round);
                return Ok(profile);
            }
            start = cube
                .cumulative(&profile)
                .into_iter()
                .zip(center.iter())
                .map(|(z, c)| (F::one() - restart.clone()) * &z + restart.clone() * c)
                .collect();
            shrink = shrink.checked_div(half)?;
            grid *= 2;
        }
        Err(Error::NonConvergence {
            refinements: config.refinements,
            regret,
        })
    }

    /// Same game with payoffs mapped affinely onto `[0, 1]`.
    fn rescaled(game: &NormalFormGame) -> Result<NormalFormGame, Error> {
        let (min, max) = (game.min_payoff(), game.max_payoff());
        let range = max - &min;
        let mut scaled = game.clone();
        for profile in game.profiles() {
            let payoffs = match range.is_zero() {
                true => vec![Rational::zero(); game.players()],
                false => game
                    .payoffs(&profile)?
                    .iter()
                    .map(|x| (x.clone() - &min).checked_div(&range))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            scaled.set_payoff(&profile, payoffs)?;
        }
        Ok(scaled)
    }
}

impl EquilibriumAlgorithm for SimplicialSubdivision {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        let ref normal = game.normal()?;
        Ok(vec![Self::equilibrium::<F>(normal, config)?])
    }
}

/// Cumulative coordinates over a product of simplices.
/// Player `p` owns `shape[p] - 1` consecutive coordinates.
struct Cube {
    shape: Vec<usize>,
    offsets: Vec<usize>,
    dimension: usize,
}

impl Cube {
    fn new(shape: Vec<usize>) -> Self {
        let offsets = shape
            .iter()
            .scan(0, |sum, m| {
                let offset = *sum;
                *sum += m - 1;
                Some(offset)
            })
            .collect();
        let dimension = shape.iter().map(|m| m - 1).sum();
        Self {
            shape,
            offsets,
            dimension,
        }
    }
    /// Running sums of all but the last probability of each player.
    fn cumulative<F: Field>(&self, profile: &MixedProfile<F>) -> Vec<F> {
        profile
            .strategies()
            .iter()
            .flat_map(|strategy| {
                strategy
                    .probabilities()
                    .iter()
                    .take(strategy.len() - 1)
                    .scan(F::zero(), |sum, p| {
                        *sum += p.clone();
                        Some(sum.clone())
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
    /// Spacings of each player's sorted block, so any point of the cube
    /// maps to a profile.
    fn strategies<F: Field>(&self, z: &[F]) -> Result<MixedProfile<F>, Error> {
        self.shape
            .iter()
            .zip(self.offsets.iter())
            .map(|(m, offset)| {
                let mut block = z[*offset..*offset + m - 1].to_vec();
                block.sort_by(|a, b| a.compare(b));
                let spacings = std::iter::once(F::zero())
                    .chain(block.iter().cloned())
                    .zip(block.iter().cloned().chain(std::iter::once(F::one())))
                    .map(|(lo, hi)| hi - lo)
                    .collect();
                MixedStrategy::new(spacings)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(MixedProfile::new)
    }
}

/// One simplex of the Freudenthal triangulation of the slab, scaled by
/// the grid size. Vertex `i` is `base` plus unit steps along
/// `perm[..i]`; the last coordinate is the layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Simplex {
    base: Vec<i64>,
    perm: Vec<usize>,
}

impl Simplex {
    fn vertex(&self, i: usize) -> Vec<i64> {
        let mut vertex = self.base.clone();
        for axis in self.perm[..i].iter() {
            vertex[*axis] += 1;
        }
        vertex
    }
    /// Replaces vertex `out` by its reflection and returns the position
    /// of the new vertex.
    fn pivot(&mut self, out: usize) -> usize {
        let n = self.perm.len();
        match out {
            0 => {
                self.base[self.perm[0]] += 1;
                self.perm.rotate_left(1);
                n
            }
            i if i == n => {
                self.base[self.perm[n - 1]] -= 1;
                self.perm.rotate_right(1);
                0
            }
            i => {
                self.perm.swap(i - 1, i);
                i
            }
        }
    }
    fn inside(&self, grid: usize) -> bool {
        match self.base.split_last() {
            Some((layer, cube)) => *layer == 0 && cube.iter().all(|x| (0..grid as i64).contains(x)),
            None => false,
        }
    }
}

struct Homotopy<'a, F> {
    game: &'a NormalFormGame,
    cube: &'a Cube,
    start: &'a [F],
    shrink: &'a F,
    grid: usize,
}

impl<'a, F: Field> Homotopy<'a, F> {
    /// Each player's strategy plus its payoff vector, projected back onto
    /// the simplex. Fixed points are exactly the equilibria.
    fn improve(&self, profile: &MixedProfile<F>) -> Result<MixedProfile<F>, Error> {
        (0..self.game.players())
            .map(|p| {
                let point = self
                    .game
                    .deviations(profile, p)?
                    .into_iter()
                    .zip(profile.player(p).probabilities().iter())
                    .map(|(v, s)| v + s)
                    .collect();
                MixedStrategy::normalized(Self::project(point)?)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(MixedProfile::new)
    }
    /// Euclidean projection onto the probability simplex.
    fn project(point: Vec<F>) -> Result<Vec<F>, Error> {
        let mut sorted = point.clone();
        sorted.sort_by(|a, b| b.compare(a));
        let mut sum = F::zero();
        let mut threshold = F::zero();
        for (k, x) in sorted.into_iter().enumerate() {
            sum += x.clone();
            let t = (sum.clone() - F::one()).checked_div(&F::from_usize(k + 1))?;
            if (x - &t).is_positive() {
                threshold = t;
            }
        }
        Ok(point
            .into_iter()
            .map(|x| (x - &threshold).larger(F::zero()))
            .collect())
    }
    fn map(&self, z: &[F]) -> Result<Vec<F>, Error> {
        let image = self.cube.cumulative(&self.improve(&self.cube.strategies(z)?)?);
        Ok(image
            .into_iter()
            .zip(self.start.iter())
            .map(|(x, c)| (F::one() - self.shrink.clone()) * &x + self.shrink.clone() * c)
            .collect())
    }
    fn point(&self, vertex: &[i64]) -> Result<Vec<F>, Error> {
        let grid = F::from_usize(self.grid);
        vertex[..self.cube.dimension]
            .iter()
            .map(|x| F::from_i64(*x).checked_div(&grid))
            .collect()
    }
    /// `j + 1` for the first coordinate the target falls below, else 0.
    fn label(&self, vertex: &[i64]) -> Result<usize, Error> {
        let z = self.point(vertex)?;
        let target = match vertex[self.cube.dimension] {
            0 => self.start.to_vec(),
            _ => self.map(&z)?,
        };
        Ok(target
            .iter()
            .zip(z.iter())
            .position(|(h, z)| h < z)
            .map_or(0, |j| j + 1))
    }
    fn initial(&self) -> Result<Simplex, Error> {
        let d = self.cube.dimension;
        let base = self
            .start
            .iter()
            .map(|c| {
                let cell = (c.to_rational()? * Rational::from(self.grid)).floor();
                cell.to_i64()
                    .map(|x| x.clamp(0, self.grid as i64 - 1))
                    .ok_or_else(|| Error::InvalidNumber(cell.to_string()))
            })
            .chain(std::iter::once(Ok(0)))
            .collect::<Result<Vec<_>, _>>()?;
        let perm = (0..d).rev().chain(std::iter::once(d)).collect();
        Ok(Simplex { base, perm })
    }
    /// Follows the door-to-door path and returns the barycenter of the
    /// completely labelled top face.
    fn walk(&self, cancel: &Cancel) -> Result<Vec<F>, Error> {
        let d = self.cube.dimension;
        let n = d + 1;
        let mut simplex = self.initial()?;
        let mut labels = (0..=n)
            .map(|i| self.label(&simplex.vertex(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut visited = HashSet::from([simplex.clone()]);
        let mut fresh = n;
        let mut steps = 0;
        loop {
            cancel.check(steps)?;
            let out = (0..=n)
                .find(|i| *i != fresh && labels[*i] == labels[fresh])
                .ok_or_else(|| Error::InfeasibleSystem("simplex lost a label".into()))?;
            if out == 0 && simplex.perm[0] == d {
                log::trace!("{:<32}{:<32}", "subdivision steps", steps);
                return self.barycenter(&simplex);
            }
            if out == n && simplex.perm[n - 1] == d {
                return Err(Error::InfeasibleSystem("path returned to the bottom layer".into()));
            }
            fresh = simplex.pivot(out);
            if !simplex.inside(self.grid) {
                return Err(Error::InfeasibleSystem("path left the grid".into()));
            }
            if !visited.insert(simplex.clone()) {
                return Err(Error::CycleDetected {
                    basis: simplex.perm.clone(),
                });
            }
            let label = self.label(&simplex.vertex(fresh))?;
            match fresh {
                0 => {
                    labels.pop();
                    labels.insert(0, label);
                }
                i if i == n => {
                    labels.remove(0);
                    labels.push(label);
                }
                i => labels[i] = label,
            }
            steps += 1;
        }
    }
    fn barycenter(&self, simplex: &Simplex) -> Result<Vec<F>, Error> {
        let d = self.cube.dimension;
        let n = d + 1;
        let scale = F::from_usize(n * self.grid);
        let mut sum = vec![0i64; d];
        for i in 1..=n {
            for (s, x) in sum.iter_mut().zip(simplex.vertex(i)) {
                *s += x;
            }
        }
        sum.into_iter()
            .map(|x| F::from_i64(x).checked_div(&scale))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }
    fn pennies() -> NormalFormGame {
        NormalFormGame::from_fn(&[2, 2], |s| match s[0] == s[1] {
            true => vec![q(1), q(-1)],
            false => vec![q(-1), q(1)],
        })
        .unwrap()
    }

    #[test]
    fn cumulative_coordinates() {
        let cube = Cube::new(vec![3, 2]);
        assert_eq!(cube.dimension, 3);
        assert_eq!(cube.offsets, vec![0, 2]);
        let z = vec![0.75, 0.25, 0.5];
        let profile = cube.strategies(&z).unwrap();
        assert_eq!(profile[0].probabilities(), &[0.25, 0.5, 0.25]);
        assert_eq!(profile[1].probabilities(), &[0.5, 0.5]);
        assert_eq!(cube.cumulative(&profile), vec![0.25, 0.75, 0.5]);
    }
    #[test]
    fn freudenthal_pivots_are_reversible() {
        let mut simplex = Simplex {
            base: vec![1, 1, 0],
            perm: vec![1, 0, 2],
        };
        let start = simplex.clone();
        assert_eq!(simplex.pivot(0), 3);
        assert_eq!(simplex.pivot(3), 0);
        assert_eq!(simplex, start);
        assert_eq!(simplex.pivot(1), 1);
        assert_eq!(simplex.vertex(1), vec![2, 1, 0]);
        assert_eq!(simplex.pivot(1), 1);
        assert_eq!(simplex, start);
    }
    #[test]
    fn matching_pennies_approximate() {
        let game = pennies();
        let solution = SimplicialSubdivision::equilibrium::<f64>(&game, &Config::approximate()).unwrap();
        let profile = solution.as_mixed().unwrap();
        for p in 0..2 {
            assert!((profile[p].probability(0) - 0.5).abs() < 1e-2);
        }
        assert!(game.max_regret(profile).unwrap() <= 2.0 * crate::SUBDIVISION_TOLERANCE + 1e-9);
    }
    #[test]
    fn matching_pennies_exact() {
        let game = pennies();
        let solution = SimplicialSubdivision::equilibrium::<Rational>(&game, &Config::exact()).unwrap();
        let regret = game.max_regret(solution.as_mixed().unwrap()).unwrap();
        assert!(regret.to_f64() <= 2.0 * crate::SUBDIVISION_TOLERANCE);
    }
    #[test]
    fn dominant_strategies() {
        let game = NormalFormGame::from_fn(&[2, 2], |s| match (s[0], s[1]) {
            (0, 0) => vec![q(-1), q(-1)],
            (0, 1) => vec![q(-3), q(0)],
            (1, 0) => vec![q(0), q(-3)],
            _ => vec![q(-2), q(-2)],
        })
        .unwrap();
        let solution = SimplicialSubdivision::equilibrium::<f64>(&game, &Config::approximate()).unwrap();
        let profile = solution.as_mixed().unwrap();
        assert!(profile[0].probability(1) > &0.99);
        assert!(profile[1].probability(1) > &0.99);
    }
    #[test]
    fn three_players() {
        let game = NormalFormGame::from_fn(&[2, 2, 3], |s| {
            let agree = (s[0] == s[1]) as i64 + (s[1] == s[2]) as i64;
            vec![q(agree), q(2 - agree), q(s[2] as i64 - agree)]
        })
        .unwrap();
        let config = Config::approximate();
        let solution = SimplicialSubdivision::equilibrium::<f64>(&game, &config).unwrap();
        let scaled = SimplicialSubdivision::rescaled(&game).unwrap();
        assert!(scaled.max_regret(solution.as_mixed().unwrap()).unwrap() <= config.tolerance);
    }
    #[test]
    fn random_games_converge() {
        let config = Config::approximate();
        for shape in [vec![3, 3], vec![2, 2, 2]] {
            for _ in 0..8 {
                let game = NormalFormGame::random_shape(&shape).unwrap();
                let solution = SimplicialSubdivision::equilibrium::<f64>(&game, &config).unwrap();
                let scaled = SimplicialSubdivision::rescaled(&game).unwrap();
                let regret = scaled.max_regret(solution.as_mixed().unwrap()).unwrap();
                assert!(regret <= config.tolerance, "{}", game);
            }
        }
    }
    #[test]
    fn projection_onto_simplex() {
        let project = Homotopy::<Rational>::project;
        let half = Rational::new(1, 2).unwrap();
        assert_eq!(project(vec![q(2), q(0), q(-1)]).unwrap(), vec![q(1), q(0), q(0)]);
        assert_eq!(project(vec![q(1), q(1)]).unwrap(), vec![half.clone(), half.clone()]);
        assert_eq!(project(vec![half.clone(), q(0), half.clone()]).unwrap(), vec![half.clone(), q(0), half]);
    }
    #[test]
    fn shrink_keeps_labels_off_the_boundary() {
        let game = pennies();
        let cube = Cube::new(game.shape());
        let start = vec![0.5, 0.5];
        let shrink = 1e-2 / 4096.0;
        let homotopy = Homotopy {
            game: &game,
            cube: &cube,
            start: &start,
            shrink: &shrink,
            grid: 4,
        };
        let image = homotopy.map(&[1.0, 0.0]).unwrap();
        assert!(image.iter().all(|h| *h > 0.0 && *h < 1.0));
        assert_eq!(homotopy.label(&[4, 0, 1]).unwrap(), 1);
    }
    #[test]
    fn single_strategies() {
        let game = NormalFormGame::from_fn(&[1, 1, 1], |_| vec![q(1), q(2), q(3)]).unwrap();
        let solution = SimplicialSubdivision::equilibrium::<Rational>(&game, &Config::exact()).unwrap();
        assert_eq!(solution.payoffs(), &[q(1), q(2), q(3)]);
    }
    #[test]
    fn refinement_bound() {
        let config = Config {
            refinements: 0,
            tolerance: -1.0,
            ..Config::approximate()
        };
        let result = SimplicialSubdivision::equilibrium::<f64>(&pennies(), &config);
        assert!(matches!(result, Err(Error::NonConvergence { refinements: 0, .. })));
    }
    #[test]
    fn solves_through_the_trait() {
        let game = Game::from(pennies());
        let solutions = SimplicialSubdivision.solve::<f64>(&game, &Config::approximate()).unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(pennies().max_regret(solutions[0].as_mixed().unwrap()).unwrap() <= 2.0 * crate::SUBDIVISION_TOLERANCE + 1e-9);
    }
}
