use serde::{Deserialize, Serialize};

/// Ordered tabular inventory of one resource kind.
///
/// Columns are fixed at construction; rows keep the discovery order of the
/// underlying source. Row positions are 1-based and only meaningful after
/// filtering has settled (see `policy::evaluate`), at which point position
/// `i` refers to `rows()[i - 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    columns: Vec<String>,
    rows: Vec<Row>,
}

/// One inventory item: flat string values aligned with the inventory columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row(pub Vec<String>);

impl Row {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl Inventory {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Values must be aligned with the columns.
    pub fn push(&mut self, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push(Row(values));
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order. Empty if the column is absent.
    pub fn column_values(&self, name: &str) -> Vec<String> {
        match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|r| r.get(idx))
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Remove a column and its values from every row. No-op if absent.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                if idx < row.0.len() {
                    row.0.remove(idx);
                }
            }
        }
    }
}
