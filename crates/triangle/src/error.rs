//! Error types for the iris-triangle crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the iris-triangle crate.
///
/// Every variant carries the offending group and dates so the caller can
/// locate and fix the input record; none of these conditions is
/// recoverable internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriangleError {
    /// Returned when the maximum delay is zero.
    #[error("max_delay must be >= 1, got {max_delay}")]
    InvalidMaxDelay {
        /// The invalid maximum delay.
        max_delay: usize,
    },

    /// Returned when no observations are supplied.
    #[error("no observations provided")]
    EmptyObservations,

    /// Returned when a record's report date precedes its reference date.
    #[error(
        "report date {report_date} precedes reference date {reference_date} \
         for group [{group}]"
    )]
    InvalidDelay {
        /// Group key values joined with ','; empty for ungrouped data.
        group: String,
        /// The record's reference date.
        reference_date: NaiveDate,
        /// The offending report date.
        report_date: NaiveDate,
    },

    /// Returned when a record is missing one of the configured `by` columns.
    #[error(
        "record (reference {reference_date}, report {report_date}) is missing \
         grouping column '{column}'"
    )]
    IncompleteGroupKey {
        /// The `by` column absent from the record.
        column: String,
        /// The record's reference date.
        reference_date: NaiveDate,
        /// The record's report date.
        report_date: NaiveDate,
    },

    /// A date-grid failure while densifying the reference or report axis.
    #[error(transparent)]
    Calendar(#[from] iris_calendar::CalendarError),
}
