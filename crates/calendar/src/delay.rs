//! Delay arithmetic and per-date derived values.

use chrono::{Datelike, NaiveDate};

/// Day of week as 0 = Monday .. 6 = Sunday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// ISO 8601 week number (1..=53).
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Reporting delay in days, or `None` when the report precedes the
/// reference (an invalid record the caller must reject).
pub fn delay_between(reference: NaiveDate, report: NaiveDate) -> Option<usize> {
    let days = (report - reference).num_days();
    if days < 0 {
        return None;
    }
    Some(days as usize)
}
