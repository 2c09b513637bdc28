//! # iris-calendar
//!
//! Dense date grids and delay arithmetic for the iris preprocessing
//! pipeline.
//!
//! Every other iris crate indexes dates through the [`DateGrid`]: a
//! contiguous zero-based time axis anchored at the earliest date in the
//! dataset. Densification matters because downstream random-walk
//! covariates need a gap-free axis even when some days carry no
//! observations.
//!
//! ## Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use iris_calendar::{DateGrid, day_of_week, delay_between};
//!
//! let d = |s: &str| s.parse::<NaiveDate>().unwrap();
//! let grid = DateGrid::spanning([d("2024-01-01"), d("2024-01-05")]).unwrap();
//!
//! assert_eq!(grid.len(), 5);
//! assert_eq!(grid.index_of(d("2024-01-03")), Some(2));
//! assert_eq!(day_of_week(d("2024-01-01")), 0); // Monday
//! assert_eq!(delay_between(d("2024-01-01"), d("2024-01-03")), Some(2));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `grid` | Dense contiguous date grid with O(1) time index |
//! | `delay` | Delay offsets, day-of-week, ISO week helpers |
//! | `error` | Error types |

pub mod delay;
pub mod error;
pub mod grid;

pub use delay::{day_of_week, delay_between, iso_week};
pub use error::CalendarError;
pub use grid::{DateGrid, DEFAULT_MAX_SPAN_DAYS};
