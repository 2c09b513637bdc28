//! # iris-convolve
//!
//! Convolution of latent final counts through a delay distribution.
//!
//! This crate is the bridge between the downstream model's latent
//! process and its observation likelihood: a validated [`DelayPmf`]
//! maps a vector of expected final counts per reference date to the
//! expected counts reported at each delay. Time-varying or grouped
//! delay distributions use [`ConvolutionBlocks`], one pmf per
//! (group, time-block) region.
//!
//! ## Quick start
//!
//! ```
//! use iris_convolve::{convolve, DelayPmf};
//! use ndarray::array;
//!
//! let pmf = DelayPmf::new(vec![0.5, 0.3, 0.2]).unwrap();
//! let expected_final = array![100.0];
//!
//! let reported = convolve(expected_final.view(), &pmf);
//! assert_eq!(reported, array![[50.0, 30.0, 20.0]]);
//! ```
//!
//! Numeric contract: pmf values are finite and non-negative and total
//! mass is at most `1 + 1e-8`; violations fail construction and are
//! never renormalised away. Mass below 1 is the right-censoring
//! shortfall, so `sum_d reported[r, d] <= expected_final[r]` always,
//! with equality exactly when the pmf sums to 1.

pub mod blocks;
pub mod error;
pub mod pmf;

pub use blocks::{convolve, ConvolutionBlocks};
pub use error::ConvolveError;
pub use pmf::{DelayPmf, MASS_TOLERANCE};
