use super::Cancel;
use super::Pivoting;
use super::Visited;
use super::lexicographic;
use crate::Error;
use crate::Field;
use crate::Matrix;
use crate::Row;
use crate::Variable;
use std::cmp::Ordering;

/// One pivot of a path: the entering variable and the row it entered.
pub type Step = (Variable, Row);

/// Complementary pivoting from `entering` until a leaving variable
/// satisfies `stop`.
///
/// After each pivot, the complement of the variable that just left
/// enters next. Leaving rows come from the lexicographic ratio test,
/// except that `prefer` (when basic and among the minimum-ratio rows)
/// leaves first so the path ends as early as possible.
///
/// Fails with `RayTermination` when the entering column has no positive
/// entry, `CycleDetected` on a repeated basis, `Cancelled` on request.
pub fn follow<F, T>(
    tableau: &mut T,
    entering: Variable,
    complement: impl Fn(Variable) -> Variable,
    stop: impl Fn(Variable) -> bool,
    prefer: Option<Variable>,
    cancel: &Cancel,
) -> Result<Vec<Step>, Error>
where
    F: Field,
    T: Pivoting<F>,
{
    let mut visited = Visited::new();
    let mut path = Vec::new();
    let mut entering = entering;
    visited.visit(tableau.basis())?;
    loop {
        cancel.check(path.len())?;
        let row = leaving(tableau, entering, prefer)?.ok_or_else(|| Error::RayTermination {
            variable: entering,
            basis: tableau.basis().variables().to_vec(),
        })?;
        let left = tableau.basis().variable(row);
        tableau.pivot(entering, row)?;
        path.push((entering, row));
        log::trace!("{:<32}{:<32}", format!("pivot {} -> {}", entering, left), row);
        if stop(left) {
            return Ok(path);
        }
        visited.visit(tableau.basis())?;
        entering = complement(left);
    }
}

fn leaving<F, T>(tableau: &T, entering: Variable, prefer: Option<Variable>) -> Result<Option<Row>, Error>
where
    F: Field,
    T: Pivoting<F>,
{
    let ties = tableau.ratio_ties(entering)?;
    match prefer.and_then(|v| tableau.basis().row(v)) {
        Some(row) if ties.contains(&row) => Ok(Some(row)),
        _ if ties.len() < 2 => Ok(ties.first().copied()),
        _ => tableau.ratio_test(entering),
    }
}

/// Linear complementarity problem: find `w, z ≥ 0` with
/// `w = q + M z` and `wᵀz = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lcp<F> {
    m: Matrix<F>,
    q: Vec<F>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LcpSolution<F> {
    pub w: Vec<F>,
    pub z: Vec<F>,
    pub pivots: usize,
}

impl<F: Field> Lcp<F> {
    pub fn new(m: Matrix<F>, q: Vec<F>) -> Result<Self, Error> {
        if m.rows() != m.cols() {
            return Err(Error::mismatch((m.rows(), m.rows()), m.shape()));
        }
        if q.len() != m.rows() {
            return Err(Error::mismatch(m.rows(), q.len()));
        }
        Ok(Self { m, q })
    }
    pub fn size(&self) -> usize {
        self.q.len()
    }
    pub fn m(&self) -> &Matrix<F> {
        &self.m
    }
    pub fn q(&self) -> &[F] {
        &self.q
    }
    /// The artificial variable, after `w` and `z`.
    pub fn artificial(&self) -> Variable {
        2 * self.size()
    }
    /// `w_i` and `z_i` are complements.
    pub fn complement(&self, variable: Variable) -> Variable {
        let n = self.size();
        match variable {
            v if v < n => v + n,
            v if v < 2 * n => v - n,
            v => v,
        }
    }
    /// `[I | -M | -1] (w, z, z0) = q`, with `w` basic.
    pub fn system(&self) -> (Matrix<F>, Vec<F>, Vec<Variable>) {
        let n = self.size();
        let a = Matrix::from_fn(n, 2 * n + 1, |i, j| match j {
            j if j < n && i == j => F::one(),
            j if j < n => F::zero(),
            j if j < 2 * n => -self.m[(i, j - n)].clone(),
            _ => -F::one(),
        });
        (a, self.q.clone(), (0..n).collect())
    }
    /// `w - q - M z`, zero at a solution.
    pub fn residual(&self, w: &[F], z: &[F]) -> Vec<F> {
        (0..self.size())
            .map(|i| {
                let mz = (0..self.size())
                    .map(|j| self.m[(i, j)].clone() * &z[j])
                    .sum::<F>();
                w[i].clone() - &self.q[i] - mz
            })
            .collect()
    }

    /// Lemke's algorithm with covering vector of ones.
    ///
    /// The artificial `z0` first enters at the lexicographically most
    /// negative row of `q`, making the basis feasible; complementary
    /// pivoting then continues until `z0` leaves.
    pub fn solve<T: Pivoting<F>>(&self, cancel: &Cancel) -> Result<LcpSolution<F>, Error> {
        let n = self.size();
        if self.q.iter().all(|x| !x.is_negative()) {
            return Ok(LcpSolution {
                w: self.q.clone(),
                z: vec![F::zero(); n],
                pivots: 0,
            });
        }
        let (a, b, basis) = self.system();
        let mut tableau = T::from_system(a, b, basis)?;
        let z0 = self.artificial();
        let row = self.initial(&tableau)?;
        let left = tableau.basis().variable(row);
        tableau.pivot(z0, row)?;
        log::debug!("{:<32}{:<32}", "lemke initial row", row);
        let path = follow(
            &mut tableau,
            self.complement(left),
            |v| self.complement(v),
            |v| v == z0,
            Some(z0),
            cancel,
        )?;
        let values = tableau.values()?;
        log::debug!("{:<32}{:<32}", "lemke pivots", path.len() + 1);
        Ok(LcpSolution {
            w: values[..n].to_vec(),
            z: values[n..2 * n].to_vec(),
            pivots: path.len() + 1,
        })
    }

    fn initial<T: Pivoting<F>>(&self, tableau: &T) -> Result<Row, Error> {
        let rhs = tableau.rhs()?;
        let one = F::one();
        let mut best = 0;
        let mut best_row = std::iter::once(rhs[0].clone())
            .chain(tableau.inverse_row(0)?)
            .collect::<Vec<_>>();
        for i in 1..self.size() {
            let row = std::iter::once(rhs[i].clone())
                .chain(tableau.inverse_row(i)?)
                .collect::<Vec<_>>();
            if lexicographic(&row, &one, &best_row, &one) == Ordering::Less {
                best = i;
                best_row = row;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rational;
    use crate::RevisedTableau;
    use crate::Tableau;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }
    fn lcp(m: &[&[i64]], v: &[i64]) -> Lcp<Rational> {
        let m = Matrix::from_rows(
            m.iter()
                .map(|r| r.iter().map(|x| q(*x)).collect())
                .collect(),
        )
        .unwrap();
        Lcp::new(m, v.iter().map(|x| q(*x)).collect()).unwrap()
    }
    fn check(problem: &Lcp<Rational>, solution: &LcpSolution<Rational>) {
        assert!(solution.w.iter().all(|x| !x.is_negative()));
        assert!(solution.z.iter().all(|x| !x.is_negative()));
        assert!(problem.residual(&solution.w, &solution.z).iter().all(|x| x.is_zero()));
        let gap = solution
            .w
            .iter()
            .zip(solution.z.iter())
            .map(|(w, z)| w.clone() * z)
            .sum::<Rational>();
        assert!(gap.is_zero());
    }

    #[test]
    fn nonnegative_q_is_trivial() {
        let problem = lcp(&[&[1, 0], &[0, 1]], &[1, 2]);
        let solution = problem.solve::<Tableau<_>>(&Cancel::new()).unwrap();
        assert_eq!(solution.pivots, 0);
        assert!(solution.z.iter().all(|z| z.is_zero()));
    }
    #[test]
    fn positive_definite_system() {
        // w = q + M z with M = [[2,1],[1,2]], q = (-5, -6)
        let problem = lcp(&[&[2, 1], &[1, 2]], &[-5, -6]);
        let solution = problem.solve::<Tableau<_>>(&Cancel::new()).unwrap();
        check(&problem, &solution);
        assert_eq!(
            solution.z,
            vec![Rational::new(4, 3).unwrap(), Rational::new(7, 3).unwrap()]
        );
    }
    #[test]
    fn resolves_agree() {
        let problem = lcp(&[&[1, 2, 0], &[0, 1, 3], &[2, 0, 1]], &[-1, -2, -3]);
        let dense = problem.solve::<Tableau<_>>(&Cancel::new()).unwrap();
        let revised = problem.solve::<RevisedTableau<_>>(&Cancel::new()).unwrap();
        check(&problem, &dense);
        assert_eq!(dense, revised);
    }
    #[test]
    fn ray_termination() {
        // w = -1 - z has no nonnegative solution
        let problem = lcp(&[&[-1]], &[-1]);
        let err = problem.solve::<Tableau<_>>(&Cancel::new()).unwrap_err();
        assert!(matches!(err, Error::RayTermination { .. }));
    }
    #[test]
    fn cancellation_stops_pivoting() {
        let cancel = Cancel::new();
        cancel.cancel();
        let problem = lcp(&[&[2, 1], &[1, 2]], &[-5, -6]);
        let err = problem.solve::<Tableau<_>>(&cancel).unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
    }
}
