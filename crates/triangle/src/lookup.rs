//! Report-date lookup over complete triangle rows.
//!
//! For a report date `rep`, the cell at delay `d` of reference date
//! `rep - d` was reported exactly on `rep`. Gathering those cells per
//! report date gives the delay-distribution estimator its historical
//! panel without re-scanning the triangle on every model step.

use chrono::NaiveDate;
use tracing::debug;

use crate::build::ReportingTriangle;
use crate::complete::Completeness;

/// One lookup row: for a (group, report date), the flat triangle index
/// of the cell reported at that date for each delay `0..max_delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLookupRow {
    group: usize,
    report_date: NaiveDate,
    cells: Vec<usize>,
}

impl ReportLookupRow {
    /// Group index of this panel.
    pub fn group(&self) -> usize {
        self.group
    }

    /// The report date all cells share.
    pub fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    /// `cells[d]` is the flat index (see
    /// [`ReportingTriangle::flat_index`]) of the reference date
    /// `report_date - d` at delay column `d`.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }
}

/// Builds the report-date lookup.
///
/// A (group, report date) produces a row only when all `max_delay`
/// backward reference dates resolve to rows that exist, are complete,
/// and have an unbroken observed delay history; windows failing any of
/// those are excluded entirely rather than mixed in partially. An empty
/// result means insufficient history, not an error: callers skip
/// delay-distribution fitting for that block.
///
/// Runs in O(reference span x max_delay x groups) using a dense
/// per-group row index over the triangle's reference grid.
#[tracing::instrument(skip_all, fields(n_rows = triangle.n_rows(), max_delay = triangle.max_delay()))]
pub fn reference_by_report(
    triangle: &ReportingTriangle,
    completeness: &Completeness,
) -> Vec<ReportLookupRow> {
    let grid = triangle.reference_grid();
    let max_delay = triangle.max_delay();
    let n_groups = triangle.groups().len();
    let span = grid.len();

    // Dense (group, grid offset) -> row index.
    let mut dense: Vec<Option<usize>> = vec![None; n_groups * span];
    for (row_index, row) in triangle.rows().iter().enumerate() {
        if let Some(offset) = grid.index_of(row.reference_date()) {
            dense[row.group() * span + offset] = Some(row_index);
        }
    }

    let usable = |row_index: usize| {
        completeness.is_complete(row_index) && triangle.rows()[row_index].is_fully_observed()
    };

    let mut out = Vec::new();
    for group in 0..n_groups {
        let base = group * span;
        for (offset, report_date) in grid.dates().enumerate().skip(max_delay - 1) {
            let mut cells = Vec::with_capacity(max_delay);
            for delay in 0..max_delay {
                match dense[base + offset - delay] {
                    Some(row_index) if usable(row_index) => {
                        cells.push(triangle.flat_index(row_index, delay));
                    }
                    _ => break,
                }
            }
            if cells.len() == max_delay {
                out.push(ReportLookupRow {
                    group,
                    report_date,
                    cells,
                });
            }
        }
    }

    debug!(n_lookup_rows = out.len(), "report-date lookup built");
    out
}
