//! Error types for graphing operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building tables or rendering charts.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Column length does not match the table's row count.
    #[error("Data length mismatch: expected {expected} rows, column has {actual}")]
    DataLengthMismatch {
        /// Row count of the table.
        expected: usize,
        /// Length of the offending column.
        actual: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., non-finite extent).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// A chart referenced a column the table does not have.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A column name was added twice.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// The chart needs more columns than the table has.
    #[error("Chart needs {needed} columns, table has {available}")]
    NotEnoughColumns {
        /// Columns required by the chart.
        needed: usize,
        /// Columns present in the table.
        available: usize,
    },

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// The default browser could not be launched.
    #[error("Could not open {path} in a browser: {message}")]
    Browser {
        /// File that was being opened.
        path: String,
        /// Launcher error message.
        message: String,
    },

    /// Configuration parse error with location.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number (1-based, 0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_data_length_mismatch() {
        let err = Error::DataLengthMismatch {
            expected: 10,
            actual: 20,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_column_not_found_names_column() {
        let err = Error::ColumnNotFound("shoe_size".to_string());
        assert_eq!(err.to_string(), "Column not found: shoe_size");
    }

    #[test]
    fn test_invalid_config_message() {
        let err = Error::InvalidConfig("rows must be at least 1".to_string());
        assert_eq!(err.to_string(), "Invalid config: rows must be at least 1");
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
