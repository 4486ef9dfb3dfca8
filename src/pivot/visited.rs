use super::Basis;
use super::BasisKey;
use crate::Error;
use std::collections::HashSet;

/// Set of bases already seen by a search.
///
/// Path-following uses [`Visited::visit`], where a repeat means the path
/// has cycled. Enumeration uses [`Visited::insert`] to skip bases it
/// already explored.
#[derive(Debug, Default, Clone)]
pub struct Visited(HashSet<BasisKey>);

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn visit(&mut self, basis: &Basis) -> Result<(), Error> {
        match self.0.insert(basis.key()) {
            true => Ok(()),
            false => Err(Error::CycleDetected {
                basis: basis.variables().to_vec(),
            }),
        }
    }
    /// true if the basis was not seen before
    pub fn insert(&mut self, basis: &Basis) -> bool {
        self.0.insert(basis.key())
    }
    pub fn contains(&self, basis: &Basis) -> bool {
        self.0.contains(&basis.key())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_visit_is_a_cycle() {
        let mut visited = Visited::new();
        let basis = Basis::new(vec![0, 2], 4);
        assert!(visited.visit(&basis).is_ok());
        assert!(visited.contains(&Basis::new(vec![2, 0], 4)));
        assert_eq!(
            visited.visit(&Basis::new(vec![2, 0], 4)),
            Err(Error::CycleDetected { basis: vec![2, 0] })
        );
        assert_eq!(visited.len(), 1);
    }
}
