use super::Matrix;
use crate::Error;
use crate::Field;

/// One column replacement in product form: `B' = B E` where `E` is the
/// identity with column `position` replaced by `column = B⁻¹ a`.
#[derive(Debug, Clone)]
struct Eta<F> {
    position: usize,
    column: Vec<F>,
}

/// LU factorization `P B = L U` of a square basis matrix, kept current
/// across column replacements by an eta file.
///
/// After [`crate::REFACTOR_FREQUENCY`] replacements the factorization is
/// rebuilt from the current basis matrix, so the eta file stays short.
/// In exact arithmetic refactoring changes nothing observable; in `f64`
/// mode it bounds accumulated rounding.
///
/// # Operations
///
/// - `solve(b)`: `x` with `B x = b`
/// - `solve_transpose(c)`: `y` with `yᵀ B = cᵀ`
/// - `replace(position, a)`: swap column `position` of `B` for `a`
#[derive(Debug, Clone)]
pub struct Lu<F> {
    basis: Matrix<F>,
    lower: Matrix<F>,
    upper: Matrix<F>,
    perm: Vec<usize>,
    etas: Vec<Eta<F>>,
}

impl<F: Field> Lu<F> {
    pub fn factor(basis: Matrix<F>) -> Result<Self, Error> {
        if basis.rows() != basis.cols() {
            return Err(Error::mismatch((basis.rows(), basis.rows()), basis.shape()));
        }
        let n = basis.rows();
        let mut upper = basis.clone();
        let mut lower = Matrix::<F>::identity(n);
        let mut perm = (0..n).collect::<Vec<_>>();
        for k in 0..n {
            let p = (k..n)
                .reduce(|p, i| match upper[(i, k)].abs().compare(&upper[(p, k)].abs()) {
                    std::cmp::Ordering::Greater => i,
                    _ => p,
                })
                .unwrap_or(k);
            if upper[(p, k)].is_zero() {
                return Err(Error::InfeasibleSystem(format!(
                    "singular basis at column {}",
                    k
                )));
            }
            upper.swap_rows(k, p);
            perm.swap(k, p);
            for j in 0..k {
                let a = lower[(k, j)].clone();
                let b = lower[(p, j)].clone();
                lower[(k, j)] = b;
                lower[(p, j)] = a;
            }
            for i in (k + 1)..n {
                let factor = upper[(i, k)].checked_div(&upper[(k, k)])?;
                for j in k..n {
                    let delta = factor.clone() * &upper[(k, j)];
                    upper[(i, j)] -= delta;
                }
                lower[(i, k)] = factor;
            }
        }
        Ok(Self {
            basis,
            lower,
            upper,
            perm,
            etas: Vec::new(),
        })
    }
    pub fn dimension(&self) -> usize {
        self.basis.rows()
    }
    /// The basis matrix currently represented.
    pub fn basis(&self) -> &Matrix<F> {
        &self.basis
    }
    pub fn updates(&self) -> usize {
        self.etas.len()
    }
    /// x with B x = b
    pub fn solve(&self, b: &[F]) -> Result<Vec<F>, Error> {
        let n = self.dimension();
        if b.len() != n {
            return Err(Error::mismatch(n, b.len()));
        }
        // forward substitution on L with permuted rhs
        let mut x = Vec::with_capacity(n);
        for i in 0..n {
            let partial = (0..i)
                .map(|j| self.lower[(i, j)].clone() * &x[j])
                .sum::<F>();
            x.push(b[self.perm[i]].clone() - partial);
        }
        // backward substitution on U
        for i in (0..n).rev() {
            let partial = ((i + 1)..n)
                .map(|j| self.upper[(i, j)].clone() * &x[j])
                .sum::<F>();
            x[i] = (x[i].clone() - partial).checked_div(&self.upper[(i, i)])?;
        }
        for eta in self.etas.iter() {
            let r = eta.position;
            let pivot = x[r].checked_div(&eta.column[r])?;
            for i in (0..n).filter(|i| *i != r) {
                let delta = eta.column[i].clone() * &pivot;
                x[i] -= delta;
            }
            x[r] = pivot;
        }
        Ok(x)
    }
    /// y with yᵀ B = cᵀ
    pub fn solve_transpose(&self, c: &[F]) -> Result<Vec<F>, Error> {
        let n = self.dimension();
        if c.len() != n {
            return Err(Error::mismatch(n, c.len()));
        }
        let mut v = c.to_vec();
        for eta in self.etas.iter().rev() {
            let r = eta.position;
            let others = (0..n)
                .filter(|i| *i != r)
                .map(|i| v[i].clone() * &eta.column[i])
                .sum::<F>();
            v[r] = (v[r].clone() - others).checked_div(&eta.column[r])?;
        }
        // Uᵀ w = v
        let mut w = Vec::with_capacity(n);
        for i in 0..n {
            let partial = (0..i)
                .map(|j| self.upper[(j, i)].clone() * &w[j])
                .sum::<F>();
            w.push((v[i].clone() - partial).checked_div(&self.upper[(i, i)])?);
        }
        // Lᵀ u = w
        for i in (0..n).rev() {
            let partial = ((i + 1)..n)
                .map(|j| self.lower[(j, i)].clone() * &w[j])
                .sum::<F>();
            w[i] = w[i].clone() - partial;
        }
        // P z = u
        let mut z = vec![F::zero(); n];
        for (i, u) in w.into_iter().enumerate() {
            z[self.perm[i]] = u;
        }
        Ok(z)
    }
    /// Row `i` of B⁻¹.
    pub fn inverse_row(&self, i: usize) -> Result<Vec<F>, Error> {
        let n = self.dimension();
        let unit = (0..n)
            .map(|j| if i == j { F::one() } else { F::zero() })
            .collect::<Vec<_>>();
        self.solve_transpose(&unit)
    }
    /// Replaces column `position` of the basis by `column`.
    /// Fails without modification if the result would be singular.
    pub fn replace(&mut self, position: usize, column: &[F]) -> Result<(), Error> {
        let eta = self.solve(column)?;
        if eta[position].is_zero() {
            return Err(Error::InfeasibleSystem(format!(
                "singular update at column {}",
                position
            )));
        }
        for (i, x) in column.iter().enumerate() {
            self.basis[(i, position)] = x.clone();
        }
        self.etas.push(Eta {
            position,
            column: eta,
        });
        if self.etas.len() >= crate::REFACTOR_FREQUENCY {
            log::trace!("{:<32}{:<32}", "refactoring basis", self.etas.len());
            *self = Self::factor(self.basis.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rational;
    use crate::Vector;

    fn m(rows: &[&[i64]]) -> Matrix<Rational> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|x| Rational::from(*x)).collect())
                .collect(),
        )
        .unwrap()
    }
    fn r(xs: &[i64]) -> Vec<Rational> {
        xs.iter().map(|x| Rational::from(*x)).collect()
    }

    #[test]
    fn solves_match_dense_solve() {
        let b = m(&[&[0, 2, 1], &[1, 1, 0], &[3, 0, 4]]);
        let lu = Lu::factor(b.clone()).unwrap();
        let rhs = r(&[5, -2, 7]);
        let x = lu.solve(&rhs).unwrap();
        assert_eq!(x, b.solve(&Vector::from(rhs)).unwrap().into_inner());
    }
    #[test]
    fn transpose_solve() {
        let b = m(&[&[0, 2, 1], &[1, 1, 0], &[3, 0, 4]]);
        let lu = Lu::factor(b.clone()).unwrap();
        let c = r(&[1, 2, 3]);
        let y = lu.solve_transpose(&c).unwrap();
        let back = b.vec_mul(&Vector::from(y)).unwrap();
        assert_eq!(back.into_inner(), c);
    }
    #[test]
    fn replacements_track_refactoring() {
        let mut lu = Lu::factor(Matrix::<Rational>::identity(3)).unwrap();
        let columns = [r(&[2, 1, 0]), r(&[1, 3, 1]), r(&[0, 1, 5]), r(&[1, 0, 1])];
        for step in 0..(2 * crate::REFACTOR_FREQUENCY + 1) {
            let position = step % 3;
            let column = &columns[step % columns.len()];
            if lu.replace(position, column).is_err() {
                continue;
            }
            let fresh = Lu::factor(lu.basis().clone()).unwrap();
            let rhs = r(&[1, -1, 2]);
            assert_eq!(lu.solve(&rhs).unwrap(), fresh.solve(&rhs).unwrap());
            assert_eq!(
                lu.inverse_row(1).unwrap(),
                fresh.inverse_row(1).unwrap()
            );
        }
        assert!(lu.updates() < crate::REFACTOR_FREQUENCY);
    }
    #[test]
    fn singular_replacement_is_rejected() {
        let mut lu = Lu::factor(Matrix::<Rational>::identity(2)).unwrap();
        let before = lu.basis().clone();
        assert!(lu.replace(0, &r(&[0, 1])).is_err());
        assert_eq!(lu.basis(), &before);
        assert!(Lu::factor(m(&[&[1, 2], &[2, 4]])).is_err());
    }
}
