use super::Basis;
use super::Pivoting;
use crate::Error;
use crate::Field;
use crate::Lu;
use crate::Matrix;
use crate::Row;
use crate::Variable;

/// Revised tableau: the original `A` and `b` stay untouched and every
/// quantity is resolved through an [`Lu`] of the current basis matrix,
/// which is updated per pivot by an eta column.
#[derive(Debug, Clone)]
pub struct RevisedTableau<F> {
    system: Matrix<F>,
    b: Vec<F>,
    basis: Basis,
    lu: Lu<F>,
}

impl<F: Field> RevisedTableau<F> {
    pub fn system(&self) -> &Matrix<F> {
        &self.system
    }
    pub fn updates(&self) -> usize {
        self.lu.updates()
    }
}

impl<F: Field> Pivoting<F> for RevisedTableau<F> {
    fn from_system(a: Matrix<F>, b: Vec<F>, basis: Vec<Variable>) -> Result<Self, Error> {
        let (height, width) = a.shape();
        if b.len() != height {
            return Err(Error::mismatch(height, b.len()));
        }
        if basis.len() != height {
            return Err(Error::mismatch(height, basis.len()));
        }
        if let Some(v) = basis.iter().find(|v| **v >= width) {
            return Err(Error::mismatch(width, v));
        }
        let columns = Matrix::from_fn(height, height, |i, k| a[(i, basis[k])].clone());
        let lu = Lu::factor(columns)?;
        Ok(Self {
            system: a,
            b,
            basis: Basis::new(basis, width),
            lu,
        })
    }
    fn height(&self) -> usize {
        self.system.rows()
    }
    fn width(&self) -> usize {
        self.system.cols()
    }
    fn basis(&self) -> &Basis {
        &self.basis
    }
    fn column(&self, variable: Variable) -> Result<Vec<F>, Error> {
        self.lu.solve(self.system.column(variable).as_slice())
    }
    fn rhs(&self) -> Result<Vec<F>, Error> {
        self.lu.solve(&self.b)
    }
    fn inverse_row(&self, row: Row) -> Result<Vec<F>, Error> {
        self.lu.inverse_row(row)
    }
    fn pivot(&mut self, entering: Variable, row: Row) -> Result<(), Error> {
        if self.column(entering)?[row].is_zero() {
            return Err(Error::DegeneratePivot {
                variable: entering,
                row,
                basis: self.basis.variables().to_vec(),
            });
        }
        self.lu
            .replace(row, self.system.column(entering).as_slice())?;
        self.basis.exchange(entering, row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rational;
    use crate::Tableau;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }
    fn system() -> (Matrix<Rational>, Vec<Rational>, Vec<Variable>) {
        let a = Matrix::from_rows(vec![
            vec![q(2), q(1), q(-1), q(1), q(0), q(0)],
            vec![q(1), q(3), q(2), q(0), q(1), q(0)],
            vec![q(0), q(1), q(4), q(0), q(0), q(1)],
        ])
        .unwrap();
        (a, vec![q(5), q(7), q(9)], vec![3, 4, 5])
    }
    fn agree(dense: &Tableau<Rational>, revised: &RevisedTableau<Rational>) {
        assert_eq!(dense.basis(), revised.basis());
        assert_eq!(dense.rhs().unwrap(), revised.rhs().unwrap());
        for j in 0..dense.width() {
            assert_eq!(dense.column(j).unwrap(), revised.column(j).unwrap());
        }
        for i in 0..dense.height() {
            assert_eq!(dense.inverse_row(i).unwrap(), revised.inverse_row(i).unwrap());
        }
    }

    #[test]
    fn dense_and_factored_agree() {
        let (a, b, basis) = system();
        let mut dense = Tableau::from_system(a.clone(), b.clone(), basis.clone()).unwrap();
        let mut revised = RevisedTableau::from_system(a, b, basis).unwrap();
        agree(&dense, &revised);
        for entering in [0, 1, 2, 3, 0, 4] {
            if dense.basis().is_basic(entering) {
                continue;
            }
            let row = dense.ratio_test(entering).unwrap();
            assert_eq!(row, revised.ratio_test(entering).unwrap());
            let Some(row) = row else { continue };
            dense.pivot(entering, row).unwrap();
            revised.pivot(entering, row).unwrap();
            agree(&dense, &revised);
        }
    }
    #[test]
    fn zero_pivot_is_degenerate() {
        let (a, b, basis) = system();
        let mut revised = RevisedTableau::from_system(a, b, basis).unwrap();
        assert!(matches!(
            revised.pivot(0, 2),
            Err(Error::DegeneratePivot { variable: 0, row: 2, .. })
        ));
        assert_eq!(revised.basis().variables(), &[3, 4, 5]);
    }
    #[test]
    fn singular_start_is_rejected() {
        let (a, b, _) = system();
        assert!(RevisedTableau::from_system(a, b, vec![3, 3, 5]).is_err());
    }
}
