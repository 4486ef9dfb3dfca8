use super::Basis;
use super::Pivoting;
use crate::Error;
use crate::Field;
use crate::Matrix;
use crate::Row;
use crate::Variable;

/// Dense tableau `[B⁻¹A | B⁻¹b | B⁻¹]`, row-reduced in place on every pivot.
/// Basic columns always form the identity.
#[derive(Debug, Clone)]
pub struct Tableau<F> {
    body: Matrix<F>,
    rhs: Vec<F>,
    inverse: Matrix<F>,
    basis: Basis,
}

impl<F: Field> Tableau<F> {
    pub fn body(&self) -> &Matrix<F> {
        &self.body
    }
    pub fn entry(&self, row: Row, variable: Variable) -> &F {
        &self.body[(row, variable)]
    }
    fn degenerate(&self, variable: Variable, row: Row) -> Error {
        Error::DegeneratePivot {
            variable,
            row,
            basis: self.basis.variables().to_vec(),
        }
    }
    fn reduce(&mut self, entering: Variable, row: Row) -> Result<(), Error> {
        let element = self.body[(row, entering)].clone();
        if element.is_zero() {
            return Err(self.degenerate(entering, row));
        }
        let (height, width) = self.body.shape();
        for j in 0..width {
            self.body[(row, j)] = self.body[(row, j)].checked_div(&element)?;
        }
        for j in 0..height {
            self.inverse[(row, j)] = self.inverse[(row, j)].checked_div(&element)?;
        }
        self.rhs[row] = self.rhs[row].checked_div(&element)?;
        for i in (0..height).filter(|i| *i != row) {
            let factor = self.body[(i, entering)].clone();
            if factor.is_zero() {
                continue;
            }
            for j in 0..width {
                let delta = factor.clone() * &self.body[(row, j)];
                self.body[(i, j)] -= delta;
            }
            for j in 0..height {
                let delta = factor.clone() * &self.inverse[(row, j)];
                self.inverse[(i, j)] -= delta;
            }
            let delta = factor * &self.rhs[row];
            self.rhs[i] -= delta;
            self.body[(i, entering)] = F::zero();
        }
        self.body[(row, entering)] = F::one();
        Ok(())
    }
}

impl<F: Field> Pivoting<F> for Tableau<F> {
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
        let mut this = Self {
            body: a,
            rhs: b,
            inverse: Matrix::identity(height),
            basis: Basis::new(basis.clone(), width),
        };
        for (row, variable) in basis.into_iter().enumerate() {
            this.reduce(variable, row)?;
        }
        Ok(this)
    }
    fn height(&self) -> usize {
        self.body.rows()
    }
    fn width(&self) -> usize {
        self.body.cols()
    }
    fn basis(&self) -> &Basis {
        &self.basis
    }
    fn column(&self, variable: Variable) -> Result<Vec<F>, Error> {
        Ok(self.body.column(variable).into_inner())
    }
    fn rhs(&self) -> Result<Vec<F>, Error> {
        Ok(self.rhs.clone())
    }
    fn inverse_row(&self, row: Row) -> Result<Vec<F>, Error> {
        Ok(self.inverse.row(row).to_vec())
    }
    fn pivot(&mut self, entering: Variable, row: Row) -> Result<(), Error> {
        self.reduce(entering, row)?;
        self.basis.exchange(entering, row);
        Ok(())
    }
}

impl<F: Field> std::fmt::Display for Tableau<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.body.rows() {
            write!(f, "x{:<4}|", self.basis.variable(i) + 1)?;
            for x in self.body.row(i) {
                write!(f, " {:>6}", x)?;
            }
            writeln!(f, " | {:>6}", self.rhs[i])?;
        }
        Ok(())
    }
}
