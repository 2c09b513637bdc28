//! Derivation of the per-key covariate tables.

use chrono::NaiveDate;

use iris_calendar::{day_of_week, iso_week, CalendarError, DateGrid};
use iris_triangle::ReportingTriangle;

/// Derived covariates for one date on a dense grid.
///
/// `time_index` is the date's position on the grid: contiguous, zero
/// based, anchored at the grid's start, with no gaps even for dates that
/// carry no observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMeta {
    /// The date itself.
    pub date: NaiveDate,
    /// Day of week, 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    /// ISO 8601 week number.
    pub iso_week: u32,
    /// Dense time index on the grid.
    pub time_index: usize,
}

/// Derived covariates for one delay column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayMeta {
    /// The delay in days, `0..max_delay`.
    pub delay: usize,
    /// Week-of-delay bucket (`delay / 7`), for weekly delay effects.
    pub week_bucket: usize,
}

/// One group row: its index and key values in `by` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMeta {
    /// Group index as used by triangle rows.
    pub index: usize,
    /// Key values, ordered as the configured `by` columns.
    pub keys: Vec<String>,
}

/// Derives the per-date covariate table for a dense grid.
pub fn date_metadata(grid: &DateGrid) -> Vec<DateMeta> {
    grid.dates()
        .enumerate()
        .map(|(time_index, date)| DateMeta {
            date,
            day_of_week: day_of_week(date),
            iso_week: iso_week(date),
            time_index,
        })
        .collect()
}

/// Derives the delay covariate table for delays `0..max_delay`.
pub fn delay_metadata(max_delay: usize) -> Vec<DelayMeta> {
    (0..max_delay)
        .map(|delay| DelayMeta {
            delay,
            week_bucket: delay / 7,
        })
        .collect()
}

/// The full metadata bundle for one preprocessing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Per-reference-date covariates over the dense reference grid.
    pub reference: Vec<DateMeta>,
    /// Per-report-date covariates; the report axis shares the reference
    /// grid's anchor so both time indices are directly comparable.
    pub report: Vec<DateMeta>,
    /// Per-delay covariates.
    pub delay: Vec<DelayMeta>,
    /// Group table, aligned with the triangle's group indices.
    pub groups: Vec<GroupMeta>,
}

impl Metadata {
    /// Derives all covariate tables from a built triangle.
    ///
    /// The report grid runs from the reference grid's start to the
    /// snapshot date, so report `time_index` values are offsets on the
    /// same dense axis as reference ones.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NonContiguousDateRange`] if the report
    /// axis would exceed `max_span_days`.
    pub fn from_triangle(
        triangle: &ReportingTriangle,
        max_span_days: u32,
    ) -> Result<Self, CalendarError> {
        let reference_grid = triangle.reference_grid();
        let report_grid = DateGrid::new(
            [reference_grid.start(), triangle.snapshot()],
            max_span_days,
        )?;

        let groups = triangle
            .groups()
            .iter()
            .enumerate()
            .map(|(index, keys)| GroupMeta {
                index,
                keys: keys.clone(),
            })
            .collect();

        Ok(Self {
            reference: date_metadata(reference_grid),
            report: date_metadata(&report_grid),
            delay: delay_metadata(triangle.max_delay()),
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn time_index_is_contiguous_across_unobserved_days() {
        // Only the endpoints are observed; the table still covers the gap.
        let grid = DateGrid::spanning([date("2024-01-01"), date("2024-01-05")]).unwrap();
        let table = date_metadata(&grid);

        assert_eq!(table.len(), 5);
        for (i, row) in table.iter().enumerate() {
            assert_eq!(row.time_index, i);
        }
        assert_eq!(table[2].date, date("2024-01-03"));
    }

    #[test]
    fn day_of_week_and_iso_week() {
        let grid = DateGrid::spanning([date("2024-01-01"), date("2024-01-08")]).unwrap();
        let table = date_metadata(&grid);

        assert_eq!(table[0].day_of_week, 0); // Monday
        assert_eq!(table[6].day_of_week, 6); // Sunday
        assert_eq!(table[0].iso_week, 1);
        assert_eq!(table[7].iso_week, 2);
    }

    #[test]
    fn delay_week_buckets() {
        let table = delay_metadata(15);
        assert_eq!(table.len(), 15);
        assert_eq!(table[0].week_bucket, 0);
        assert_eq!(table[6].week_bucket, 0);
        assert_eq!(table[7].week_bucket, 1);
        assert_eq!(table[14].week_bucket, 2);
    }

    #[test]
    fn delay_table_is_zero_indexed() {
        let table = delay_metadata(3);
        let delays: Vec<usize> = table.iter().map(|d| d.delay).collect();
        assert_eq!(delays, vec![0, 1, 2]);
    }
}
