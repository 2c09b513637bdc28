//! Long-format observation records.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// One long-format record: a cumulative count for a reference date as
/// reported on a report date, tagged with zero or more categorical keys.
///
/// Counts are cumulative revisions: successive reports for the same
/// reference date carry the running total, and the triangle builder
/// differences them into per-delay increments. A `None` count means the
/// report row exists but its value is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Categorical key columns (e.g. region, age group), by name.
    pub keys: BTreeMap<String, String>,
    /// The date the events occurred.
    pub reference_date: NaiveDate,
    /// The date this cumulative count was published.
    pub report_date: NaiveDate,
    /// Cumulative count as of `report_date`, or missing.
    pub count: Option<u64>,
}

impl Observation {
    /// Creates an ungrouped observation.
    pub fn new(reference_date: NaiveDate, report_date: NaiveDate, count: u64) -> Self {
        Self {
            keys: BTreeMap::new(),
            reference_date,
            report_date,
            count: Some(count),
        }
    }

    /// Creates an observation with a missing count.
    pub fn missing(reference_date: NaiveDate, report_date: NaiveDate) -> Self {
        Self {
            keys: BTreeMap::new(),
            reference_date,
            report_date,
            count: None,
        }
    }

    /// Attaches a categorical key column.
    pub fn with_key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.keys.insert(name.into(), value.into());
        self
    }
}
