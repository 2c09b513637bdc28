//! Dense, contiguous date grid with an O(1) time index.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Default guard against accidental multi-decade ranges (ten years).
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 3650;

/// A contiguous day-by-day grid spanning a set of dates.
///
/// The grid runs from the minimum to the maximum of the input date set
/// with no gaps, so `index_of` is a dense, zero-based time index anchored
/// at the minimum date. Downstream random-walk-over-time covariates
/// require this axis to be gap-free even when some days carry no
/// observations.
///
/// Immutable after construction; every accessor is O(1) date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGrid {
    start: NaiveDate,
    end: NaiveDate,
    len: usize,
}

impl DateGrid {
    /// Builds a grid spanning the given dates.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::EmptyDateSet`] if `dates` yields nothing,
    /// and [`CalendarError::NonContiguousDateRange`] if the densified span
    /// exceeds `max_span_days`.
    pub fn new(
        dates: impl IntoIterator<Item = NaiveDate>,
        max_span_days: u32,
    ) -> Result<Self, CalendarError> {
        let mut iter = dates.into_iter();
        let first = iter.next().ok_or(CalendarError::EmptyDateSet)?;
        let (start, end) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

        let span_days = (end - start).num_days() as u32 + 1;
        if span_days > max_span_days {
            return Err(CalendarError::NonContiguousDateRange {
                start,
                end,
                span_days,
                max_span_days,
            });
        }

        Ok(Self {
            start,
            end,
            len: span_days as usize,
        })
    }

    /// Builds a grid with the default span guard.
    pub fn spanning(
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, CalendarError> {
        Self::new(dates, DEFAULT_MAX_SPAN_DAYS)
    }

    /// First date in the grid.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date in the grid (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the grid.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the grid is empty. Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Zero-based time index of `date` within the grid, or `None` if the
    /// date falls outside the span.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start || date > self.end {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }

    /// Date at a given time index, or `None` past the end of the grid.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.len {
            return None;
        }
        Some(self.start + chrono::Duration::days(index as i64))
    }

    /// Iterates every date in the grid in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..self.len).map(move |i| start + chrono::Duration::days(i as i64))
    }
}
