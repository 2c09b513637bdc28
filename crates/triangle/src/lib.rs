//! # iris-triangle
//!
//! Reporting-triangle construction for delay-censored count data.
//!
//! Long-format records, one cumulative count per (group, reference date,
//! report date), become a wide triangle of incremental counts indexed
//! by reference date and delay, plus the derived structures the
//! downstream estimator consumes: completeness partitions and the
//! report-date lookup of flat cell indices.
//!
//! # Pipeline
//!
//! ```text
//!  +----------------+     +---------------------+     +---------------------+
//!  | build_triangle |---->| classify_           |---->| reference_by_report |
//!  | (difference)   |     | completeness        |     | (flat-index panels) |
//!  +----------------+     +---------------------+     +---------------------+
//! ```
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use iris_triangle::{build_triangle, Observation, TriangleConfig};
//!
//! let d = |s: &str| s.parse::<NaiveDate>().unwrap();
//! let observations = [
//!     Observation::new(d("2024-01-01"), d("2024-01-01"), 5),
//!     Observation::new(d("2024-01-01"), d("2024-01-02"), 8),
//! ];
//! let triangle = build_triangle(&observations, &TriangleConfig::new(3)).unwrap();
//!
//! // Cumulative 5 then 8 becomes increments 5, 3; delay 2 is unobserved.
//! assert_eq!(triangle.rows()[0].counts(), &[Some(5), Some(3), None]);
//! ```
//!
//! All outputs are derived, read-only artifacts: a new snapshot or
//! configuration means a full rebuild, never an in-place patch.

pub mod build;
pub mod complete;
pub mod config;
pub mod error;
pub mod lookup;
pub mod observation;

pub use build::{build_triangle, ReportingTriangle, TriangleRow};
pub use complete::{classify_completeness, Completeness};
pub use config::TriangleConfig;
pub use error::TriangleError;
pub use lookup::{reference_by_report, ReportLookupRow};
pub use observation::Observation;
