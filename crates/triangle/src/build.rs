//! Reporting-triangle construction.
//!
//! Converts long-format cumulative records into one fixed-length row of
//! incremental counts per (group, reference date). The row ordering and
//! the `flat_index` contract are consumed by the report-date lookup; do
//! not reorder rows after construction.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use iris_calendar::{delay_between, DateGrid};

use crate::config::TriangleConfig;
use crate::error::TriangleError;
use crate::observation::Observation;

/// One triangle row: incremental counts per delay for a single
/// (group, reference date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleRow {
    group: usize,
    reference_date: NaiveDate,
    counts: Vec<Option<i64>>,
    reported_delays: usize,
}

impl TriangleRow {
    /// Index of this row's group in [`ReportingTriangle::groups`].
    pub fn group(&self) -> usize {
        self.group
    }

    /// The reference date of this row.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Incremental counts per delay `0..max_delay`. `None` marks a delay
    /// beyond this row's observable horizon as of the snapshot date.
    pub fn counts(&self) -> &[Option<i64>] {
        &self.counts
    }

    /// Number of leading delay columns inside the observable horizon.
    pub fn reported_delays(&self) -> usize {
        self.reported_delays
    }

    /// Whether every delay column is inside the observable horizon.
    pub fn is_fully_observed(&self) -> bool {
        self.reported_delays == self.counts.len()
    }

    /// Sum of the observed incremental counts, i.e. the latest cumulative
    /// report truncated to the delay window.
    pub fn observed_sum(&self) -> i64 {
        self.counts.iter().flatten().sum()
    }
}

/// The delay-indexed reporting triangle.
///
/// Rows are ordered by (group index, reference date) ascending; within a
/// row, delay columns run `0..max_delay`. Both orderings are an external
/// contract: [`flat_index`](Self::flat_index) cells are gathered by the
/// report-date lookup and by downstream convolution consumers.
///
/// The structure is a derived, read-only artifact. Any change to the
/// inputs (new snapshot, revised counts, different `max_delay` or
/// grouping) requires a full rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingTriangle {
    by: Vec<String>,
    groups: Vec<Vec<String>>,
    rows: Vec<TriangleRow>,
    max_delay: usize,
    snapshot: NaiveDate,
    truncated_reports: u64,
    reference_grid: DateGrid,
}

impl ReportingTriangle {
    /// Grouping column names, in configured order.
    pub fn by(&self) -> &[String] {
        &self.by
    }

    /// Distinct group key tuples, sorted ascending.
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// Triangle rows, sorted by (group index, reference date).
    pub fn rows(&self) -> &[TriangleRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of delay columns.
    pub fn max_delay(&self) -> usize {
        self.max_delay
    }

    /// The snapshot date: the maximum report date in the input.
    pub fn snapshot(&self) -> NaiveDate {
        self.snapshot
    }

    /// Number of input reports dropped because their delay reached
    /// `max_delay`. Non-zero means "final" downstream estimates are
    /// really "reported within max_delay days" estimates.
    pub fn truncated_reports(&self) -> u64 {
        self.truncated_reports
    }

    /// Dense grid over the distinct reference dates.
    pub fn reference_grid(&self) -> &DateGrid {
        &self.reference_grid
    }

    /// Flat index of a (row, delay) cell in the row-major flattened
    /// triangle. This is the integer key the report-date lookup hands
    /// to the delay-distribution estimator.
    pub fn flat_index(&self, row: usize, delay: usize) -> usize {
        row * self.max_delay + delay
    }

    /// Locates the row for a (group index, reference date) pair.
    pub fn position(&self, group: usize, reference_date: NaiveDate) -> Option<usize> {
        self.rows
            .binary_search_by_key(&(group, reference_date), |r| {
                (r.group, r.reference_date)
            })
            .ok()
    }
}

/// Builds the reporting triangle from long-format cumulative records.
///
/// For each (group, reference date), successive cumulative reports are
/// ordered by report date and differenced into increments at
/// `delay = report - reference`. The last cumulative is carried forward
/// to the snapshot, so delays inside the observable horizon with no new
/// report hold an increment of 0; delays beyond the horizon are `None`.
/// Reports at delays `>= max_delay` are dropped and tallied in
/// [`ReportingTriangle::truncated_reports`]. Reference dates with no
/// observations are omitted.
///
/// Pure and deterministic: identical inputs produce identical output.
///
/// # Errors
///
/// * [`TriangleError::InvalidDelay`] if any report precedes its reference.
/// * [`TriangleError::IncompleteGroupKey`] if a `by` column is absent
///   from a record.
/// * [`TriangleError::EmptyObservations`] on empty input.
/// * [`TriangleError::Calendar`] if the reference-date span exceeds the
///   configured guard.
#[tracing::instrument(skip_all, fields(n_obs = observations.len(), max_delay = config.max_delay()))]
pub fn build_triangle(
    observations: &[Observation],
    config: &TriangleConfig,
) -> Result<ReportingTriangle, TriangleError> {
    config.validate()?;
    if observations.is_empty() {
        return Err(TriangleError::EmptyObservations);
    }
    let max_delay = config.max_delay();

    // (group tuple, reference date) -> report date -> cumulative count.
    // BTreeMaps keep grouping and ordering deterministic.
    let mut cells: BTreeMap<(Vec<String>, NaiveDate), BTreeMap<NaiveDate, Option<u64>>> =
        BTreeMap::new();
    let mut snapshot = observations[0].report_date;

    for obs in observations {
        let mut key = Vec::with_capacity(config.by().len());
        for column in config.by() {
            let value =
                obs.keys
                    .get(column)
                    .ok_or_else(|| TriangleError::IncompleteGroupKey {
                        column: column.clone(),
                        reference_date: obs.reference_date,
                        report_date: obs.report_date,
                    })?;
            key.push(value.clone());
        }
        if delay_between(obs.reference_date, obs.report_date).is_none() {
            return Err(TriangleError::InvalidDelay {
                group: key.join(","),
                reference_date: obs.reference_date,
                report_date: obs.report_date,
            });
        }
        snapshot = snapshot.max(obs.report_date);
        cells
            .entry((key, obs.reference_date))
            .or_default()
            .insert(obs.report_date, obs.count);
    }

    let reference_grid = DateGrid::new(
        cells.keys().map(|(_, reference)| *reference),
        config.max_span_days(),
    )?;

    // Distinct group tuples; cells iterates them in sorted clusters.
    let mut groups: Vec<Vec<String>> = Vec::new();
    for (key, _) in cells.keys() {
        if groups.last() != Some(key) {
            groups.push(key.clone());
        }
    }
    let group_index: BTreeMap<&[String], usize> = groups
        .iter()
        .enumerate()
        .map(|(i, key)| (key.as_slice(), i))
        .collect();

    let mut truncated_reports: u64 = 0;
    let mut rows = Vec::with_capacity(cells.len());
    for ((key, reference_date), reports) in &cells {
        // snapshot >= every report >= this reference, so this is non-negative.
        let age = (snapshot - *reference_date).num_days() as usize;
        let horizon = age.min(max_delay - 1);

        let mut counts = vec![None; max_delay];
        let mut prev_cumulative: i64 = 0;
        for (report_date, count) in reports {
            let delay = (*report_date - *reference_date).num_days() as usize;
            if delay >= max_delay {
                truncated_reports += 1;
                continue;
            }
            let Some(cumulative) = count else {
                // Missing value: the previous cumulative carries forward.
                continue;
            };
            let increment = *cumulative as i64 - prev_cumulative;
            if increment < 0 {
                warn!(
                    group = %key.join(","),
                    reference = %reference_date,
                    report = %report_date,
                    increment,
                    "negative increment: retraction not normalised upstream"
                );
            }
            counts[delay] = Some(increment);
            prev_cumulative = *cumulative as i64;
        }
        // Inside the horizon, no new report means nothing changed that day.
        for slot in counts.iter_mut().take(horizon + 1) {
            if slot.is_none() {
                *slot = Some(0);
            }
        }

        rows.push(TriangleRow {
            group: group_index[key.as_slice()],
            reference_date: *reference_date,
            counts,
            reported_delays: horizon + 1,
        });
    }

    if truncated_reports > 0 {
        warn!(
            truncated_reports,
            max_delay,
            "reports at delay >= max_delay dropped: downstream totals mean \
             'reported within max_delay days', not 'finally reported'"
        );
    }
    debug!(
        n_rows = rows.len(),
        n_groups = groups.len(),
        snapshot = %snapshot,
        "reporting triangle built"
    );

    Ok(ReportingTriangle {
        by: config.by().to_vec(),
        groups,
        rows,
        max_delay,
        snapshot,
        truncated_reports,
        reference_grid,
    })
}
