//! Error types for the iris-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the iris-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a grid is requested over an empty date set.
    #[error("cannot build a date grid from an empty date set")]
    EmptyDateSet,

    /// Returned when the densified date range is wider than the configured
    /// guard. This almost always means a date was mis-parsed upstream
    /// (e.g. a two-digit year expanding into another century).
    #[error(
        "date range {start} to {end} spans {span_days} days, \
         exceeding the configured maximum of {max_span_days}"
    )]
    NonContiguousDateRange {
        /// First date in the densified range.
        start: NaiveDate,
        /// Last date in the densified range.
        end: NaiveDate,
        /// Number of days the range spans.
        span_days: u32,
        /// The configured guard the span exceeded.
        max_span_days: u32,
    },
}
