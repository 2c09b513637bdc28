//! Completeness classification of triangle rows.

use chrono::Duration;

use crate::build::ReportingTriangle;

/// Per-row completeness flags with index partitions.
///
/// A row is complete when its whole delay window is inside the snapshot:
/// `reference_date + (max_delay - 1) <= snapshot`, boundary inclusive.
/// Rows still censored at the snapshot are "missing reference" rows:
/// they are excluded from delay-distribution fitting but remain the
/// nowcasting targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completeness {
    flags: Vec<bool>,
    complete: Vec<usize>,
    missing_reference: Vec<usize>,
}

impl Completeness {
    /// Per-row flags, aligned with [`ReportingTriangle::rows`].
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Row indices with fully observed delay windows.
    pub fn complete(&self) -> &[usize] {
        &self.complete
    }

    /// Row indices still censored as of the snapshot.
    pub fn missing_reference(&self) -> &[usize] {
        &self.missing_reference
    }

    /// Whether row `index` is complete.
    pub fn is_complete(&self, index: usize) -> bool {
        self.flags[index]
    }
}

/// Classifies every triangle row as complete or still-censored.
pub fn classify_completeness(triangle: &ReportingTriangle) -> Completeness {
    let window = Duration::days(triangle.max_delay() as i64 - 1);
    let snapshot = triangle.snapshot();

    let mut flags = Vec::with_capacity(triangle.n_rows());
    let mut complete = Vec::new();
    let mut missing_reference = Vec::new();
    for (index, row) in triangle.rows().iter().enumerate() {
        let is_complete = row.reference_date() + window <= snapshot;
        flags.push(is_complete);
        if is_complete {
            complete.push(index);
        } else {
            missing_reference.push(index);
        }
    }

    Completeness {
        flags,
        complete,
        missing_reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_triangle;
    use crate::config::TriangleConfig;
    use crate::observation::Observation;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn obs(reference: &str, report: &str, count: u64) -> Observation {
        Observation::new(date(reference), date(report), count)
    }

    #[test]
    fn boundary_row_is_complete() {
        // Snapshot Jan 3; with max_delay 3 the Jan 1 row's last delay
        // column is reported exactly on the snapshot.
        let observations = [
            obs("2024-01-01", "2024-01-01", 5),
            obs("2024-01-02", "2024-01-03", 1),
        ];
        let triangle = build_triangle(&observations, &TriangleConfig::new(3)).unwrap();
        let completeness = classify_completeness(&triangle);

        assert!(completeness.is_complete(0)); // Jan 1 + 2 == snapshot
        assert!(!completeness.is_complete(1)); // Jan 2 + 2 > snapshot
        assert_eq!(completeness.complete(), &[0]);
        assert_eq!(completeness.missing_reference(), &[1]);
    }

    #[test]
    fn completeness_matches_full_observation() {
        let observations = [
            obs("2024-01-01", "2024-01-01", 5),
            obs("2024-01-04", "2024-01-05", 2),
        ];
        let triangle = build_triangle(&observations, &TriangleConfig::new(3)).unwrap();
        let completeness = classify_completeness(&triangle);

        for (i, row) in triangle.rows().iter().enumerate() {
            assert_eq!(completeness.is_complete(i), row.is_fully_observed());
        }
    }

    #[test]
    fn all_censored_is_a_valid_result() {
        let observations = [obs("2024-01-05", "2024-01-05", 1)];
        let triangle = build_triangle(&observations, &TriangleConfig::new(10)).unwrap();
        let completeness = classify_completeness(&triangle);
        assert!(completeness.complete().is_empty());
        assert_eq!(completeness.missing_reference(), &[0]);
    }
}
