//! Integration tests for triangle construction.

use chrono::NaiveDate;
use iris_triangle::{build_triangle, Observation, TriangleConfig};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn obs(reference: &str, report: &str, count: u64) -> Observation {
    Observation::new(date(reference), date(report), count)
}

/// A small grouped dataset with staggered reporting, used across tests.
fn grouped_observations() -> Vec<Observation> {
    let mut out = Vec::new();
    for (region, base) in [("north", 10u64), ("south", 3u64)] {
        for day in 1..=6u32 {
            let reference = format!("2024-02-0{day}");
            // Cumulative reports at delays 0, 1 and 3.
            for (delay, share) in [(0u32, 0u64), (1, 2), (3, 3)] {
                let report = format!("2024-02-0{}", day + delay);
                if day + delay > 9 {
                    continue;
                }
                out.push(
                    obs(&reference, &report, base + share).with_key("region", region),
                );
            }
        }
    }
    out
}

#[test]
fn row_sums_equal_latest_cumulative_within_window() {
    let config = TriangleConfig::new(4).with_by(["region"]);
    let triangle = build_triangle(&grouped_observations(), &config).unwrap();

    for row in triangle.rows() {
        if !row.is_fully_observed() {
            continue;
        }
        // Latest cumulative inside the window is base + 3 for every
        // reference date in the synthetic dataset.
        let base = if triangle.groups()[row.group()][0] == "north" {
            10
        } else {
            3
        };
        assert_eq!(row.observed_sum(), base + 3, "row {row:?}");
    }
}

#[test]
fn identical_inputs_yield_identical_triangles() {
    let config = TriangleConfig::new(4).with_by(["region"]);
    let observations = grouped_observations();
    let a = build_triangle(&observations, &config).unwrap();
    let b = build_triangle(&observations, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn input_order_does_not_matter() {
    let config = TriangleConfig::new(4).with_by(["region"]);
    let observations = grouped_observations();
    let mut reversed = observations.clone();
    reversed.reverse();
    assert_eq!(
        build_triangle(&observations, &config).unwrap(),
        build_triangle(&reversed, &config).unwrap()
    );
}

#[test]
fn two_reports_single_reference() {
    // The canonical two-report scenario: cumulative 5 then 8 with
    // max_delay 3 gives increments [5, 3, missing].
    let observations = [
        obs("2024-01-01", "2024-01-01", 5),
        obs("2024-01-01", "2024-01-02", 8),
    ];
    let triangle = build_triangle(&observations, &TriangleConfig::new(3)).unwrap();

    assert_eq!(triangle.n_rows(), 1);
    assert_eq!(triangle.rows()[0].counts(), &[Some(5), Some(3), None]);
    assert!(!triangle.rows()[0].is_fully_observed());
    assert_eq!(triangle.snapshot(), date("2024-01-02"));
}

#[test]
fn unobserved_reference_dates_are_omitted() {
    let observations = [
        obs("2024-01-01", "2024-01-01", 1),
        obs("2024-01-05", "2024-01-05", 2),
    ];
    let triangle = build_triangle(&observations, &TriangleConfig::new(2)).unwrap();

    // Jan 2..4 have no observations: no rows, but the reference grid
    // still spans them for the dense time axis.
    assert_eq!(triangle.n_rows(), 2);
    assert_eq!(triangle.reference_grid().len(), 5);
}

#[test]
fn truncation_is_surfaced_not_silent() {
    let observations = [
        obs("2024-01-01", "2024-01-01", 5),
        obs("2024-01-01", "2024-01-06", 11),
        obs("2024-01-02", "2024-01-08", 4),
    ];
    let triangle = build_triangle(&observations, &TriangleConfig::new(3)).unwrap();
    assert_eq!(triangle.truncated_reports(), 2);
}
