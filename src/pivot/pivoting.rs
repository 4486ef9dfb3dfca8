use super::Basis;
use crate::Error;
use crate::Field;
use crate::Matrix;
use crate::Row;
use crate::Variable;
use std::cmp::Ordering;

/// A system `A x = b` in some basis, able to exchange basic variables.
///
/// Implementors decide how `B⁻¹` is represented. The dense [`super::Tableau`]
/// keeps `B⁻¹A` row-reduced in place; the [`super::RevisedTableau`] keeps
/// `A` untouched and answers every query through an LU factorization of
/// the basis matrix. Both expose the same quantities, so drivers (Lemke,
/// Lemke-Howson, simplex, enumeration) are written once.
pub trait Pivoting<F: Field>: Sized {
    /// `basis[i]` is made basic in row `i`, in order.
    fn from_system(a: Matrix<F>, b: Vec<F>, basis: Vec<Variable>) -> Result<Self, Error>;
    fn height(&self) -> usize;
    fn width(&self) -> usize;
    fn basis(&self) -> &Basis;
    /// `B⁻¹ a_j`
    fn column(&self, variable: Variable) -> Result<Vec<F>, Error>;
    /// `B⁻¹ b`
    fn rhs(&self) -> Result<Vec<F>, Error>;
    /// row `i` of `B⁻¹`
    fn inverse_row(&self, row: Row) -> Result<Vec<F>, Error>;
    /// Makes `entering` basic in `row`. Fails with `DegeneratePivot`
    /// when the pivot element is zero, leaving the system unchanged.
    fn pivot(&mut self, entering: Variable, row: Row) -> Result<(), Error>;

    /// Values of all variables at the current basic solution.
    fn values(&self) -> Result<Vec<F>, Error> {
        let mut x = vec![F::zero(); self.width()];
        for (row, value) in self.rhs()?.into_iter().enumerate() {
            x[self.basis().variable(row)] = value;
        }
        Ok(x)
    }

    /// Rows attaining the minimum ratio `rhs / column` over positive
    /// column entries, ascending.
    fn ratio_ties(&self, entering: Variable) -> Result<Vec<Row>, Error> {
        let column = self.column(entering)?;
        let rhs = self.rhs()?;
        let mut ties = Vec::<Row>::new();
        for i in (0..self.height()).filter(|i| column[*i].is_positive()) {
            match ties.first().copied() {
                None => ties.push(i),
                Some(k) => {
                    let here = rhs[i].clone() * &column[k];
                    let best = rhs[k].clone() * &column[i];
                    match here.compare(&best) {
                        Ordering::Less => {
                            ties.clear();
                            ties.push(i);
                        }
                        Ordering::Equal => ties.push(i),
                        Ordering::Greater => {}
                    }
                }
            }
        }
        Ok(ties)
    }

    /// Lexicographic minimum ratio test.
    ///
    /// Ties in `rhs / column` are broken by comparing rows of `B⁻¹`
    /// divided by the same coefficient, which emulates a symbolic
    /// perturbation of `b` and keeps every pivot sequence cycle-free.
    /// Any tie left after that goes to the lowest row.
    /// `None` if no entry of the entering column is positive.
    fn ratio_test(&self, entering: Variable) -> Result<Option<Row>, Error> {
        let ties = self.ratio_ties(entering)?;
        if ties.len() < 2 {
            return Ok(ties.first().copied());
        }
        let column = self.column(entering)?;
        let mut best = ties[0];
        let mut best_row = self.inverse_row(best)?;
        for i in ties.into_iter().skip(1) {
            let row = self.inverse_row(i)?;
            if lexicographic(&row, &column[i], &best_row, &column[best]) == Ordering::Less {
                best = i;
                best_row = row;
            }
        }
        Ok(Some(best))
    }
}

/// Compares `u / a` with `v / b` entry by entry, for positive `a` and `b`.
pub fn lexicographic<F: Field>(u: &[F], a: &F, v: &[F], b: &F) -> Ordering {
    u.iter()
        .zip(v.iter())
        .map(|(x, y)| (x.clone() * b).compare(&(y.clone() * a)))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
