use crate::Row;
use crate::Variable;

/// Assignment of one basic variable to every tableau row,
/// with the inverse lookup from variable to row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    rows: Vec<Variable>,
    cols: Vec<Option<Row>>,
}

impl Basis {
    /// `rows[i]` is basic in row `i`; `width` is the number of variables.
    pub fn new(rows: Vec<Variable>, width: usize) -> Self {
        let mut cols = vec![None; width];
        for (i, v) in rows.iter().enumerate() {
            cols[*v] = Some(i);
        }
        Self { rows, cols }
    }
    pub fn height(&self) -> usize {
        self.rows.len()
    }
    pub fn width(&self) -> usize {
        self.cols.len()
    }
    pub fn variable(&self, row: Row) -> Variable {
        self.rows[row]
    }
    pub fn row(&self, variable: Variable) -> Option<Row> {
        self.cols[variable]
    }
    pub fn is_basic(&self, variable: Variable) -> bool {
        self.cols[variable].is_some()
    }
    pub fn variables(&self) -> &[Variable] {
        &self.rows
    }
    /// Puts `entering` into `row`, returning the variable it displaces.
    pub fn exchange(&mut self, entering: Variable, row: Row) -> Variable {
        let leaving = std::mem::replace(&mut self.rows[row], entering);
        self.cols[leaving] = None;
        self.cols[entering] = Some(row);
        leaving
    }
    pub fn key(&self) -> BasisKey {
        BasisKey::from(self)
    }
}

impl std::fmt::Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.rows)
    }
}

/// Canonical identity of a basis: its sorted set of basic variables.
/// Two bases with the same variables in different rows describe the
/// same vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasisKey(Vec<Variable>);

impl BasisKey {
    pub fn variables(&self) -> &[Variable] {
        &self.0
    }
}

impl From<&Basis> for BasisKey {
    fn from(basis: &Basis) -> Self {
        let mut vars = basis.variables().to_vec();
        vars.sort_unstable();
        Self(vars)
    }
}
