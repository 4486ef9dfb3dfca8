use super::Cancel;
use super::Pivoting;
use super::Visited;
use crate::Error;
use crate::Field;
use crate::Matrix;
use crate::Variable;

/// `max cᵀx` subject to `A x ≤ b`, `x ≥ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram<F> {
    a: Matrix<F>,
    b: Vec<F>,
    c: Vec<F>,
}

/// Optimal primal point, constraint duals and objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSolution<F> {
    pub primal: Vec<F>,
    pub dual: Vec<F>,
    pub objective: F,
    pub pivots: usize,
}

impl<F: Field> LinearProgram<F> {
    pub fn new(a: Matrix<F>, b: Vec<F>, c: Vec<F>) -> Result<Self, Error> {
        if b.len() != a.rows() {
            return Err(Error::mismatch(a.rows(), b.len()));
        }
        if c.len() != a.cols() {
            return Err(Error::mismatch(a.cols(), c.len()));
        }
        Ok(Self { a, b, c })
    }

    /// Two-phase simplex.
    ///
    /// Columns are `x`, one slack per row, then one artificial per row
    /// with negative `b` (such rows are negated first). Phase one
    /// minimizes the artificials; phase two optimizes `c` with the
    /// artificials barred from entering. Bland's rule picks entering
    /// columns, the lexicographic ratio test picks leaving rows.
    pub fn solve<T: Pivoting<F>>(&self, cancel: &Cancel) -> Result<LinearSolution<F>, Error> {
        let (m, n) = self.a.shape();
        let negated = self.b.iter().map(|x| x.is_negative()).collect::<Vec<_>>();
        let artificials = negated.iter().filter(|x| **x).count();
        let width = n + m + artificials;
        let sign = |i: usize| if negated[i] { -F::one() } else { F::one() };
        let mut a = Matrix::zeros(m, width);
        let mut b = Vec::with_capacity(m);
        let mut basis = Vec::with_capacity(m);
        let mut k = n + m;
        for i in 0..m {
            for j in 0..n {
                a[(i, j)] = sign(i) * &self.a[(i, j)];
            }
            a[(i, n + i)] = sign(i);
            b.push(sign(i) * &self.b[i]);
            if negated[i] {
                a[(i, k)] = F::one();
                basis.push(k);
                k += 1;
            } else {
                basis.push(n + i);
            }
        }
        let mut tableau = T::from_system(a, b, basis)?;
        let mut pivots = 0;
        if artificials > 0 {
            let cost = (0..width)
                .map(|j| if j < n + m { F::zero() } else { -F::one() })
                .collect::<Vec<_>>();
            optimize(&mut tableau, &cost, |_| false, cancel, &mut pivots)?;
            let residue = tableau.values()?[n + m..].iter().cloned().sum::<F>();
            if residue.is_positive() {
                return Err(Error::InfeasibleSystem(format!(
                    "phase one leaves artificial mass {}",
                    residue
                )));
            }
            for row in 0..m {
                if tableau.basis().variable(row) < n + m {
                    continue;
                }
                for j in (0..n + m).filter(|j| !tableau.basis().is_basic(*j)) {
                    if !tableau.column(j)?[row].is_zero() {
                        tableau.pivot(j, row)?;
                        pivots += 1;
                        break;
                    }
                }
            }
            log::debug!("{:<32}{:<32}", "simplex phase one pivots", pivots);
        }
        let cost = (0..width)
            .map(|j| if j < n { self.c[j].clone() } else { F::zero() })
            .collect::<Vec<_>>();
        optimize(&mut tableau, &cost, |j| j >= n + m, cancel, &mut pivots)?;
        let values = tableau.values()?;
        let primal = values[..n].to_vec();
        let objective = primal
            .iter()
            .zip(self.c.iter())
            .map(|(x, c)| x.clone() * c)
            .sum::<F>();
        let mut prices = vec![F::zero(); m];
        for row in 0..m {
            let weight = cost[tableau.basis().variable(row)].clone();
            if weight.is_zero() {
                continue;
            }
            for (i, x) in tableau.inverse_row(row)?.into_iter().enumerate() {
                prices[i] += weight.clone() * &x;
            }
        }
        let dual = prices
            .into_iter()
            .enumerate()
            .map(|(i, p)| sign(i) * &p)
            .collect();
        log::debug!("{:<32}{:<32}", "simplex objective", objective);
        Ok(LinearSolution {
            primal,
            dual,
            objective,
            pivots,
        })
    }
}

/// Primal simplex iterations from a feasible basis.
fn optimize<F, T>(
    tableau: &mut T,
    cost: &[F],
    barred: impl Fn(Variable) -> bool,
    cancel: &Cancel,
    pivots: &mut usize,
) -> Result<(), Error>
where
    F: Field,
    T: Pivoting<F>,
{
    let mut visited = Visited::new();
    visited.visit(tableau.basis())?;
    loop {
        cancel.check(*pivots)?;
        let mut entering = None;
        for j in (0..tableau.width()).filter(|j| !barred(*j)) {
            if tableau.basis().is_basic(j) {
                continue;
            }
            if reduced(tableau, cost, j)?.is_positive() {
                entering = Some(j);
                break;
            }
        }
        let Some(entering) = entering else {
            return Ok(());
        };
        let row = tableau
            .ratio_test(entering)?
            .ok_or_else(|| Error::Unbounded {
                variable: entering,
                basis: tableau.basis().variables().to_vec(),
            })?;
        tableau.pivot(entering, row)?;
        *pivots += 1;
        log::trace!("{:<32}{:<32}", format!("simplex enter {}", entering), row);
        visited.visit(tableau.basis())?;
    }
}

/// `c_j - c_Bᵀ B⁻¹ a_j`
fn reduced<F, T>(tableau: &T, cost: &[F], j: Variable) -> Result<F, Error>
where
    F: Field,
    T: Pivoting<F>,
{
    let column = tableau.column(j)?;
    let basic = column
        .iter()
        .enumerate()
        .map(|(i, x)| cost[tableau.basis().variable(i)].clone() * x)
        .sum::<F>();
    Ok(cost[j].clone() - basic)
}
