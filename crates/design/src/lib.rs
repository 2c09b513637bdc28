//! # iris-design
//!
//! Covariate-effect compilation and sparse design-matrix extraction.
//!
//! Hierarchical covariates reach the downstream model as an explicit,
//! enumerated set of [`Effect`] values (fixed effects, categorical
//! random effects, random walks over a dense time axis), each compiled
//! independently into named dense columns. The compiled
//! matrix is then deduplicated with [`compress`]: effects like
//! day-of-week repeat a handful of distinct rows across thousands of
//! instances, and evaluating the expensive downstream transform once
//! per distinct row is the pipeline's dominant performance lever.
//!
//! ## Quick start
//!
//! ```
//! use iris_design::{compile, compress, Effect};
//!
//! let dow = Effect::Categorical {
//!     name: "day_of_week".to_string(),
//!     levels: (0..21).map(|i| i % 7).collect(),
//!     n_levels: 7,
//! };
//! let design = compile(&[Effect::Intercept, dow], 21).unwrap();
//! let sparse = compress(&design);
//!
//! assert_eq!(sparse.unique().n_rows(), 7);
//! assert_eq!(sparse.expand(), *design.values()); // round-trip law
//! ```

pub mod effect;
pub mod error;
pub mod sparse;

pub use effect::{compile, DesignMatrix, Effect};
pub use error::DesignError;
pub use sparse::{compress, SparseDesign};
