//! Column-oriented in-memory table with named, equal-length columns.

use crate::error::{Error, Result};
use std::fmt;

/// Element type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit float.
    Float64,
    /// 64-bit signed integer.
    Int64,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float64 => write!(f, "float64"),
            Self::Int64 => write!(f, "int64"),
        }
    }
}

/// A typed column of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Floating-point values.
    Float(Vec<f64>),
    /// Integer values.
    Int(Vec<i64>),
}

impl Column {
    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
        }
    }

    /// Whether the column has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type.
    #[must_use]
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Float(_) => DataType::Float64,
            Self::Int(_) => DataType::Int64,
        }
    }

    /// Values widened to `f64` for plotting.
    #[must_use]
    pub fn as_f64(&self) -> Vec<f64> {
        match self {
            Self::Float(v) => v.clone(),
            Self::Int(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }

    /// The float values, if this is a float column.
    #[must_use]
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Self::Float(v) => Some(v),
            Self::Int(_) => None,
        }
    }

    /// The integer values, if this is an integer column.
    #[must_use]
    pub fn as_int(&self) -> Option<&[i64]> {
        match self {
            Self::Int(v) => Some(v),
            Self::Float(_) => None,
        }
    }

    /// First `min(n, len)` values.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        match self {
            Self::Float(v) => Self::Float(v[..n.min(v.len())].to_vec()),
            Self::Int(v) => Self::Int(v[..n.min(v.len())].to_vec()),
        }
    }

    /// Display labels for each value (used for category legends).
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::Float(v) => v.iter().map(|x| format!("{x}")).collect(),
            Self::Int(v) => v.iter().map(|x| format!("{x}")).collect(),
        }
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Self::Float(values)
    }
}

impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        Self::Int(values)
    }
}

/// An ordered set of named columns sharing one row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    /// An empty table with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] if the name is taken, or
    /// [`Error::DataLengthMismatch`] if the length differs from the existing
    /// row count.
    pub fn with_column(mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<Self> {
        let name = name.into();
        let column = column.into();

        if self.columns.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::DuplicateColumn(name));
        }
        if let Some((_, first)) = self.columns.first() {
            if first.len() != column.len() {
                return Err(Error::DataLengthMismatch {
                    expected: first.len(),
                    actual: column.len(),
                });
            }
        }

        self.columns.push((name, column));
        Ok(self)
    }

    /// Number of rows (0 for a table without columns).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] for unknown names.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// A column's values widened to `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] for unknown names.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name).map(Column::as_f64)
    }

    /// Name of the column at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughColumns`] if the table is narrower.
    pub fn name_at(&self, index: usize) -> Result<&str> {
        self.columns
            .get(index)
            .map(|(name, _)| name.as_str())
            .ok_or(Error::NotEnoughColumns {
                needed: index + 1,
                available: self.columns.len(),
            })
    }

    /// The first `n` rows (all rows if `n` exceeds the row count).
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|(name, c)| (name.clone(), c.head(n)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new()
            .with_column("a", vec![1.0, 2.0, 3.0])
            .unwrap()
            .with_column("b", vec![4_i64, 5, 6])
            .unwrap()
    }

    #[test]
    fn test_rows_and_names() {
        let t = sample();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.width(), 2);
        assert_eq!(t.column_names(), vec!["a", "b"]);
        assert_eq!(t.name_at(1).unwrap(), "b");
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = sample().with_column("c", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataLengthMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = sample().with_column("a", vec![0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_unknown_column() {
        let err = sample().numeric("missing").unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(name) if name == "missing"));
        assert!(matches!(
            sample().name_at(5),
            Err(Error::NotEnoughColumns { needed: 6, available: 2 })
        ));
    }

    #[test]
    fn test_numeric_widens_ints() {
        assert_eq!(sample().numeric("b").unwrap(), vec![4.0, 5.0, 6.0]);
        assert_eq!(sample().column("b").unwrap().dtype(), DataType::Int64);
    }

    #[test]
    fn test_head_clamps() {
        let t = sample();
        assert_eq!(t.head(2).rows(), 2);
        assert_eq!(t.head(10).rows(), 3);
        assert_eq!(t.head(0).rows(), 0);
        assert_eq!(t.head(2).column_names(), t.column_names());
    }

    #[test]
    fn test_empty_table() {
        let t = Table::new();
        assert!(t.is_empty());
        assert_eq!(t.rows(), 0);
    }

    #[test]
    fn test_column_accessors() {
        let c = Column::Int(vec![1, 2]);
        assert_eq!(c.as_int(), Some(&[1_i64, 2][..]));
        assert!(c.as_float().is_none());
        assert_eq!(c.labels(), vec!["1", "2"]);
        assert_eq!(DataType::Float64.to_string(), "float64");
    }
}
