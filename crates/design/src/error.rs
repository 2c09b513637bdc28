//! Error types for the iris-design crate.

/// Error type for all fallible operations in the iris-design crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DesignError {
    /// Returned when an effect's value vector does not match the number
    /// of design rows.
    #[error("effect '{effect}' has {got} values, expected {expected} rows")]
    LengthMismatch {
        /// The offending effect's name.
        effect: String,
        /// The required number of rows.
        expected: usize,
        /// The number of values supplied.
        got: usize,
    },

    /// Returned when a categorical level or random-walk time falls
    /// outside its declared cardinality.
    #[error(
        "effect '{effect}' row {row}: index {index} is outside 0..{cardinality}"
    )]
    IndexOutOfRange {
        /// The offending effect's name.
        effect: String,
        /// The design row holding the bad index.
        row: usize,
        /// The out-of-range level or time index.
        index: usize,
        /// The declared number of levels or times.
        cardinality: usize,
    },

    /// Returned when a matrix is constructed with inconsistent column
    /// names and value columns.
    #[error("{names} column names for {cols} value columns")]
    ColumnMismatch {
        /// Number of names supplied.
        names: usize,
        /// Number of value columns supplied.
        cols: usize,
    },
}
