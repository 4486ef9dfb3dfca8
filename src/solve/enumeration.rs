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
use crate::Matrix;
use crate::NormalFormGame;
use crate::Pivoting;
use crate::RevisedTableau;
use crate::Tableau;
use crate::Variable;
use crate::Visited;

/// A vertex of a best-response polytope and the labels it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<F> {
    pub point: Vec<F>,
    pub labels: Vec<bool>,
}

/// All extreme equilibria of a two-player game.
///
/// Every feasible basis of each best-response polytope is reached by
/// depth-first pivoting from the slack basis, branching on every row tied
/// in the ratio test so degenerate vertices are fully explored. Vertex
/// pairs that together carry every label are equilibria.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enumeration;

impl Enumeration {
    /// Distinct non-origin vertices of `{ v ≥ 0 : A v + slack = 1 }`.
    /// `dim` leading columns are the point; `label` maps every column
    /// to its label among `labels`.
    pub fn vertices<F, T>(
        system: (Matrix<F>, Vec<F>, Vec<Variable>),
        dim: usize,
        labels: usize,
        label: impl Fn(Variable) -> usize,
        cancel: &Cancel,
    ) -> Result<Vec<Vertex<F>>, Error>
    where
        F: Field,
        T: Pivoting<F> + Clone,
    {
        let (a, b, basis) = system;
        let start = T::from_system(a, b, basis)?;
        let mut visited = Visited::new();
        let mut vertices = Vec::<Vertex<F>>::new();
        let mut pivots = 0;
        visited.insert(start.basis());
        let mut stack = vec![start];
        while let Some(tableau) = stack.pop() {
            cancel.check(pivots)?;
            let values = tableau.values()?;
            let point = values[..dim].to_vec();
            let origin = point.iter().all(|x| x.is_zero());
            let seen = vertices
                .iter()
                .any(|v| v.point.iter().zip(point.iter()).all(|(a, b)| a.approx_eq(b)));
            if !origin && !seen {
                let mut tags = vec![false; labels];
                for v in (0..values.len()).filter(|v| values[*v].is_zero()) {
                    tags[label(v)] = true;
                }
                vertices.push(Vertex { point, labels: tags });
            }
            for entering in (0..tableau.width()).filter(|v| !tableau.basis().is_basic(*v)) {
                for row in tableau.ratio_ties(entering)? {
                    let mut next = tableau.clone();
                    next.pivot(entering, row)?;
                    pivots += 1;
                    if visited.insert(next.basis()) {
                        stack.push(next);
                    }
                }
            }
        }
        log::debug!("{:<32}{:<32}", "bases visited", visited.len());
        Ok(vertices)
    }

    pub fn equilibria<F, T>(game: &NormalFormGame, cancel: &Cancel) -> Result<Vec<EquilibriumSolution<F>>, Error>
    where
        F: Field,
        T: Pivoting<F> + Clone,
    {
        let polytopes = Polytopes::<F>::new(game)?;
        let (m, n, k) = (polytopes.m(), polytopes.n(), polytopes.labels());
        let p = Self::vertices::<F, T>(polytopes.row_player(), m, k, |v| v, cancel)?;
        let q = Self::vertices::<F, T>(
            polytopes.col_player(),
            n,
            k,
            |v| if v < n { m + v } else { v - n },
            cancel,
        )?;
        log::debug!("{:<32}{:<32}", "vertices", format!("{} x {}", p.len(), q.len()));
        let mut solutions = Vec::new();
        for x in p.iter() {
            for y in q.iter() {
                if (0..k).all(|l| x.labels[l] || y.labels[l]) {
                    solutions.push(equilibrium(game, &x.point, &y.point)?);
                }
            }
        }
        let solutions = distinct(solutions);
        log::info!("{:<32}{:<32}", "extreme equilibria", solutions.len());
        Ok(solutions)
    }
}

impl EquilibriumAlgorithm for Enumeration {
    fn solve<F: Field>(&self, game: &Game, config: &Config) -> Result<Vec<EquilibriumSolution<F>>, Error> {
        let ref normal = game.normal()?;
        match config.resolve {
            Resolve::Dense => Self::equilibria::<F, Tableau<F>>(normal, &config.cancel),
            Resolve::Factored => Self::equilibria::<F, RevisedTableau<F>>(normal, &config.cancel),
        }
    }
}
