use crate::Error;
use crate::Field;

/// Fixed-length column vector.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector<F>(Vec<F>);

impl<F: Field> Vector<F> {
    pub fn zeros(n: usize) -> Self {
        Self(vec![F::zero(); n])
    }
    /// e_i of length n
    pub fn unit(n: usize, i: usize) -> Self {
        Self((0..n).map(|j| if i == j { F::one() } else { F::zero() }).collect())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.0.iter()
    }
    pub fn as_slice(&self) -> &[F] {
        &self.0
    }
    pub fn into_inner(self) -> Vec<F> {
        self.0
    }
    pub fn dot(&self, other: &Self) -> Result<F, Error> {
        self.check(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a.clone() * b)
            .sum())
    }
    pub fn scale(&self, k: &F) -> Self {
        Self(self.iter().map(|a| a.clone() * k).collect())
    }
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        self.check(other)?;
        Ok(Self(
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| a.clone() + b)
                .collect(),
        ))
    }
    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        self.check(other)?;
        Ok(Self(
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| a.clone() - b)
                .collect(),
        ))
    }
    pub fn sum(&self) -> F {
        self.iter().cloned().sum()
    }
    pub fn norm_l1(&self) -> F {
        self.iter().map(|a| a.abs()).sum()
    }
    pub fn norm_max(&self) -> F {
        self.iter()
            .map(|a| a.abs())
            .fold(F::zero(), |m, a| m.larger(a))
    }
    fn check(&self, other: &Self) -> Result<(), Error> {
        match self.len() == other.len() {
            true => Ok(()),
            false => Err(Error::mismatch(self.len(), other.len())),
        }
    }
}

impl<F> From<Vec<F>> for Vector<F> {
    fn from(values: Vec<F>) -> Self {
        Self(values)
    }
}

impl<F> std::ops::Index<usize> for Vector<F> {
    type Output = F;
    fn index(&self, i: usize) -> &F {
        &self.0[i]
    }
}
impl<F> std::ops::IndexMut<usize> for Vector<F> {
    fn index_mut(&mut self, i: usize) -> &mut F {
        &mut self.0[i]
    }
}

impl<F: std::fmt::Display> std::fmt::Display for Vector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.0.iter().enumerate() {
            match i {
                0 => write!(f, "{}", x)?,
                _ => write!(f, ", {}", x)?,
            }
        }
        write!(f, ")")
    }
}
