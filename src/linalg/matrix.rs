use super::Vector;
use crate::Error;
use crate::Field;

/// Dense row-major matrix with immutable shape.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix<F> {
    rows: usize,
    cols: usize,
    data: Vec<F>,
}

impl<F: Field> Matrix<F> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![F::zero(); rows * cols],
        }
    }
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { F::one() } else { F::zero() })
    }
    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> F) -> Self {
        Self {
            rows,
            cols,
            data: (0..rows)
                .flat_map(|i| (0..cols).map(move |j| (i, j)))
                .map(|(i, j)| f(i, j))
                .collect(),
        }
    }
    /// Rows must share one length.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Self, Error> {
        let n = rows.len();
        let m = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != m) {
            return Err(Error::mismatch(m, bad.len()));
        }
        Ok(Self {
            rows: n,
            cols: m,
            data: rows.into_iter().flatten().collect(),
        })
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn get(&self, i: usize, j: usize) -> &F {
        &self.data[i * self.cols + j]
    }
    pub fn set(&mut self, i: usize, j: usize, value: F) {
        self.data[i * self.cols + j] = value;
    }
    pub fn row(&self, i: usize) -> &[F] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
    pub fn row_mut(&mut self, i: usize) -> &mut [F] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }
    pub fn column(&self, j: usize) -> Vector<F> {
        Vector::from((0..self.rows).map(|i| self.get(i, j).clone()).collect::<Vec<_>>())
    }
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for j in 0..self.cols {
                self.data.swap(a * self.cols + j, b * self.cols + j);
            }
        }
    }
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.get(j, i).clone())
    }
    pub fn map<G: Field>(&self, f: impl Fn(&F) -> G) -> Matrix<G> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
    pub fn mul(&self, other: &Self) -> Result<Self, Error> {
        if self.cols != other.rows {
            return Err(Error::mismatch(self.shape(), other.shape()));
        }
        Ok(Self::from_fn(self.rows, other.cols, |i, j| {
            (0..self.cols)
                .map(|k| self.get(i, k).clone() * other.get(k, j))
                .sum()
        }))
    }
    /// A v
    pub fn mul_vec(&self, v: &Vector<F>) -> Result<Vector<F>, Error> {
        if self.cols != v.len() {
            return Err(Error::mismatch(self.cols, v.len()));
        }
        Ok(Vector::from(
            (0..self.rows)
                .map(|i| {
                    self.row(i)
                        .iter()
                        .zip(v.iter())
                        .map(|(a, x)| a.clone() * x)
                        .sum()
                })
                .collect::<Vec<F>>(),
        ))
    }
    /// vᵀ A
    pub fn vec_mul(&self, v: &Vector<F>) -> Result<Vector<F>, Error> {
        if self.rows != v.len() {
            return Err(Error::mismatch(self.rows, v.len()));
        }
        Ok(Vector::from(
            (0..self.cols)
                .map(|j| {
                    (0..self.rows)
                        .map(|i| v[i].clone() * self.get(i, j))
                        .sum()
                })
                .collect::<Vec<F>>(),
        ))
    }
    /// Solves A x = b for square nonsingular A by Gaussian elimination,
    /// pivoting on the largest remaining entry of each column.
    pub fn solve(&self, b: &Vector<F>) -> Result<Vector<F>, Error> {
        if self.rows != self.cols {
            return Err(Error::mismatch((self.rows, self.rows), self.shape()));
        }
        if self.rows != b.len() {
            return Err(Error::mismatch(self.rows, b.len()));
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut x = b.clone().into_inner();
        for k in 0..n {
            let p = (k..n)
                .reduce(|p, i| match a.get(i, k).abs().compare(&a.get(p, k).abs()) {
                    std::cmp::Ordering::Greater => i,
                    _ => p,
                })
                .unwrap_or(k);
            if a.get(p, k).is_zero() {
                return Err(Error::InfeasibleSystem(format!("singular at column {}", k)));
            }
            a.swap_rows(k, p);
            x.swap(k, p);
            for i in (k + 1)..n {
                let factor = a.get(i, k).checked_div(a.get(k, k))?;
                if factor.is_zero() {
                    continue;
                }
                for j in k..n {
                    let delta = factor.clone() * a.get(k, j);
                    let entry = a.get(i, j).clone() - delta;
                    a.set(i, j, entry);
                }
                let delta = factor * &x[k];
                x[i] -= delta;
            }
        }
        for k in (0..n).rev() {
            let tail = ((k + 1)..n)
                .map(|j| a.get(k, j).clone() * &x[j])
                .sum::<F>();
            x[k] = (x[k].clone() - tail).checked_div(a.get(k, k))?;
        }
        Ok(Vector::from(x))
    }
}

impl<F: Field> std::ops::Index<(usize, usize)> for Matrix<F> {
    type Output = F;
    fn index(&self, (i, j): (usize, usize)) -> &F {
        self.get(i, j)
    }
}
impl<F: Field> std::ops::IndexMut<(usize, usize)> for Matrix<F> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut F {
        &mut self.data[i * self.cols + j]
    }
}

impl<F: Field> std::fmt::Display for Matrix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows {
            for x in self.row(i) {
                write!(f, "{:>8}", x.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
