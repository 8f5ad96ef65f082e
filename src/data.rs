//! Columnar data abstraction.
//!
//! Provides the observation table the grid composer partitions: named
//! columns of numeric or text values, with the distinct-value extraction
//! and (row, col) grouping that faceting is built on.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A value in a data frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Total ordering across value kinds: null < number < text.
    ///
    /// Numbers order by `f32::total_cmp`, text lexicographically. Facet key
    /// sorting and "first/last" boundary extraction rely on this being a
    /// deterministic total order.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DataValue::Null, DataValue::Null) => Ordering::Equal,
            (DataValue::Null, _) => Ordering::Less,
            (_, DataValue::Null) => Ordering::Greater,
            (DataValue::Number(a), DataValue::Number(b)) => a.total_cmp(b),
            (DataValue::Number(_), DataValue::Text(_)) => Ordering::Less,
            (DataValue::Text(_), DataValue::Number(_)) => Ordering::Greater,
            (DataValue::Text(a), DataValue::Text(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(n) => write!(f, "{n}"),
            DataValue::Text(s) => write!(f, "{s}"),
            DataValue::Null => write!(f, "null"),
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// A (row-value, column-value) pair identifying one facet.
pub type FacetKey = (DataValue, DataValue);

/// A simple columnar data frame.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    /// Column data keyed by column name.
    columns: HashMap<String, Vec<DataValue>>,
    /// Number of rows.
    n_rows: usize,
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from x and y arrays.
    #[must_use]
    pub fn from_xy(x: &[f32], y: &[f32]) -> Self {
        let n = x.len().min(y.len());
        let mut df = Self::new();
        df.add_column_f32("x", &x[..n]);
        df.add_column_f32("y", &y[..n]);
        df
    }

    /// Add a numeric column.
    pub fn add_column_f32(&mut self, name: &str, data: &[f32]) {
        let values: Vec<DataValue> = data.iter().map(|&v| DataValue::Number(v)).collect();
        self.n_rows = self.n_rows.max(values.len());
        self.columns.insert(name.to_string(), values);
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) {
        let values: Vec<DataValue> =
            data.iter().map(|&s| DataValue::Text(s.to_string())).collect();
        self.n_rows = self.n_rows.max(values.len());
        self.columns.insert(name.to_string(), values);
    }

    /// Get a column as f32 values.
    ///
    /// Non-numeric entries are filtered out.
    #[must_use]
    pub fn get_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.columns
            .get(name)
            .map(|col| col.iter().filter_map(DataValue::as_f32).collect())
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get column names.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Distinct values of a column, sorted ascending.
    ///
    /// Returns `None` if the column does not exist.
    #[must_use]
    pub fn distinct_sorted(&self, name: &str) -> Option<Vec<DataValue>> {
        let col = self.columns.get(name)?;
        let mut values: Vec<DataValue> = col.clone();
        values.sort_by(DataValue::total_cmp);
        values.dedup_by(|a, b| a == b);
        Some(values)
    }

    /// Value of a column at a row index, `Null` past the column's end.
    fn value_at(&self, name: &str, index: usize) -> DataValue {
        self.columns
            .get(name)
            .and_then(|col| col.get(index))
            .cloned()
            .unwrap_or(DataValue::Null)
    }

    /// Partition rows by a (row-key, column-key) pair.
    ///
    /// Returns one sub-frame per distinct key pair present in the data,
    /// enumerated ascending by (row value, column value). Returns `None` if
    /// either key column does not exist.
    #[must_use]
    pub fn partition_by_keys(
        &self,
        row: &str,
        col: &str,
    ) -> Option<Vec<(FacetKey, DataFrame)>> {
        if !self.has_column(row) || !self.has_column(col) {
            return None;
        }

        // Distinct key pairs, insertion order first
        let mut keys: Vec<FacetKey> = Vec::new();
        for i in 0..self.n_rows {
            let key = (self.value_at(row, i), self.value_at(col, i));
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        keys.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));

        let groups = keys
            .into_iter()
            .map(|key| {
                let indices: Vec<usize> = (0..self.n_rows)
                    .filter(|&i| {
                        self.value_at(row, i) == key.0 && self.value_at(col, i) == key.1
                    })
                    .collect();
                let frame = self.select_rows(&indices);
                (key, frame)
            })
            .collect();

        Some(groups)
    }

    /// Build a sub-frame from a set of row indices.
    fn select_rows(&self, indices: &[usize]) -> DataFrame {
        let mut columns = HashMap::with_capacity(self.columns.len());
        for (name, col) in &self.columns {
            let values: Vec<DataValue> = indices
                .iter()
                .map(|&i| col.get(i).cloned().unwrap_or(DataValue::Null))
                .collect();
            columns.insert(name.clone(), values);
        }

        DataFrame {
            columns,
            n_rows: indices.len(),
        }
    }
}
