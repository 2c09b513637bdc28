//! Convolution of latent final counts with delay distributions.

use std::ops::Range;

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::ConvolveError;
use crate::pmf::DelayPmf;

/// Convolves a latent expected-final-count vector with one pmf.
///
/// Returns the `rows x max_delay` matrix of expected reported counts,
/// `out[r, d] = expected_final[r] * pmf[d]`. The mapping is applied
/// matrix-free, O(max_delay) per reference date, because it is
/// recomputed whenever delay-distribution parameters change and must be
/// cheap relative to one model evaluation.
pub fn convolve(expected_final: ArrayView1<'_, f64>, pmf: &DelayPmf) -> Array2<f64> {
    let mut out = Array2::zeros((expected_final.len(), pmf.len()));
    for (r, &latent) in expected_final.iter().enumerate() {
        for (d, &p) in pmf.probs().iter().enumerate() {
            out[[r, d]] = latent * p;
        }
    }
    out
}

/// A piecewise delay-distribution assignment: one pmf per
/// (group, time-block) region of the dense (group, time) plane.
///
/// Blocks must tile the plane exactly: overlaps are rejected as they are
/// added, uncovered cells are rejected when the mapping is applied.
#[derive(Debug, Clone)]
pub struct ConvolutionBlocks {
    n_groups: usize,
    n_times: usize,
    max_delay: usize,
    /// Cell -> index into `pmfs`, row-major (group * n_times + time).
    assignment: Vec<Option<usize>>,
    pmfs: Vec<DelayPmf>,
}

impl ConvolutionBlocks {
    /// Creates an empty piecewise mapping over a
    /// `n_groups x n_times` plane with `max_delay` delay columns.
    pub fn new(n_groups: usize, n_times: usize, max_delay: usize) -> Self {
        Self {
            n_groups,
            n_times,
            max_delay,
            assignment: vec![None; n_groups * n_times],
            pmfs: Vec::new(),
        }
    }

    /// Creates a single global block covering the whole plane; the
    /// delay-column count is taken from the pmf.
    ///
    /// # Errors
    ///
    /// Returns [`ConvolveError::BlockOutOfRange`] if the plane has no
    /// time steps.
    pub fn global(
        n_groups: usize,
        n_times: usize,
        pmf: DelayPmf,
    ) -> Result<Self, ConvolveError> {
        let max_delay = pmf.len();
        let mut blocks = Self::new(n_groups, n_times, max_delay);
        for group in 0..n_groups {
            blocks.add_block(group, 0..n_times, pmf.clone())?;
        }
        Ok(blocks)
    }

    /// Assigns `pmf` to one group over a half-open time range.
    ///
    /// # Errors
    ///
    /// * [`ConvolveError::LengthMismatch`] if `pmf.len() != max_delay`.
    /// * [`ConvolveError::BlockOutOfRange`] if the group or range falls
    ///   outside the plane.
    /// * [`ConvolveError::OverlappingBlocks`] if any cell in the range
    ///   already has a pmf.
    pub fn add_block(
        &mut self,
        group: usize,
        times: Range<usize>,
        pmf: DelayPmf,
    ) -> Result<(), ConvolveError> {
        if pmf.len() != self.max_delay {
            return Err(ConvolveError::LengthMismatch {
                expected: self.max_delay,
                got: pmf.len(),
            });
        }
        if group >= self.n_groups || times.end > self.n_times || times.start >= times.end {
            return Err(ConvolveError::BlockOutOfRange {
                group,
                start: times.start,
                end: times.end,
                n_groups: self.n_groups,
                n_times: self.n_times,
            });
        }
        for time_index in times.clone() {
            if self.assignment[group * self.n_times + time_index].is_some() {
                return Err(ConvolveError::OverlappingBlocks { group, time_index });
            }
        }
        let pmf_index = self.pmfs.len();
        self.pmfs.push(pmf);
        for time_index in times {
            self.assignment[group * self.n_times + time_index] = Some(pmf_index);
        }
        Ok(())
    }

    /// Number of delay columns.
    pub fn max_delay(&self) -> usize {
        self.max_delay
    }

    /// The pmf assigned to a (group, time) cell, if any.
    pub fn pmf_at(&self, group: usize, time_index: usize) -> Option<&DelayPmf> {
        let slot = self.assignment.get(group * self.n_times + time_index)?;
        slot.map(|i| &self.pmfs[i])
    }

    /// Applies the piecewise mapping to a latent matrix of expected
    /// final counts, one row per group and one column per time step.
    ///
    /// Returns a `(n_groups * n_times) x max_delay` matrix of expected
    /// reported counts; row `group * n_times + t` holds the delays of
    /// (group, t), matching the triangle's row-major flat ordering.
    ///
    /// # Errors
    ///
    /// * [`ConvolveError::LatentShapeMismatch`] if the latent shape is
    ///   not `(n_groups, n_times)`.
    /// * [`ConvolveError::UncoveredCell`] if some cell has no block.
    pub fn apply(
        &self,
        expected_final: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, ConvolveError> {
        let (rows, cols) = expected_final.dim();
        if rows != self.n_groups || cols != self.n_times {
            return Err(ConvolveError::LatentShapeMismatch {
                n_groups: self.n_groups,
                n_times: self.n_times,
                rows,
                cols,
            });
        }

        let mut out = Array2::zeros((self.n_groups * self.n_times, self.max_delay));
        for group in 0..self.n_groups {
            for time_index in 0..self.n_times {
                let pmf_index = self.assignment[group * self.n_times + time_index]
                    .ok_or(ConvolveError::UncoveredCell { group, time_index })?;
                let latent = expected_final[[group, time_index]];
                let row = group * self.n_times + time_index;
                for (d, &p) in self.pmfs[pmf_index].probs().iter().enumerate() {
                    out[[row, d]] = latent * p;
                }
            }
        }
        Ok(out)
    }
}
