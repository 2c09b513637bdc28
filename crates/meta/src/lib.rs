//! # iris-meta
//!
//! Covariate metadata tables for the design-matrix layer.
//!
//! From the key sets already present in a reporting triangle (reference
//! dates, report dates, delays, groups) this crate derives the ordered
//! tables of deterministic covariates (day of week, ISO week, dense time
//! index, group membership) that the design-matrix layer turns into
//! effect columns. Each table row's key is unique and its values are pure
//! functions of the key.
//!
//! ## Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use iris_triangle::{build_triangle, Observation, TriangleConfig};
//! use iris_meta::Metadata;
//!
//! let d = |s: &str| s.parse::<NaiveDate>().unwrap();
//! let observations = [
//!     Observation::new(d("2024-01-01"), d("2024-01-02"), 5),
//!     Observation::new(d("2024-01-04"), d("2024-01-04"), 2),
//! ];
//! let triangle = build_triangle(&observations, &TriangleConfig::new(3)).unwrap();
//! let meta = Metadata::from_triangle(&triangle, 3650).unwrap();
//!
//! // Dense axis: Jan 2 and Jan 3 are covered despite having no rows.
//! assert_eq!(meta.reference.len(), 4);
//! assert_eq!(meta.delay.len(), 3);
//! ```

pub mod tables;

pub use tables::{date_metadata, delay_metadata, DateMeta, DelayMeta, GroupMeta, Metadata};
