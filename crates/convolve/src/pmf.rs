//! Validated delay probability mass functions.

use crate::error::ConvolveError;

/// Floating tolerance on the total-mass check.
pub const MASS_TOLERANCE: f64 = 1e-8;

/// A delay probability mass function over delays `0..len`.
///
/// Values are non-negative and finite, and the total mass is at most
/// `1 + MASS_TOLERANCE`. Mass below 1 is legal: the shortfall is the
/// probability of reporting beyond the delay window (right-censoring),
/// not an error. Validation happens once at construction; the inner
/// vector is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayPmf {
    probs: Vec<f64>,
}

impl DelayPmf {
    /// Validates and wraps a pmf.
    ///
    /// # Errors
    ///
    /// Returns [`ConvolveError::InvalidDelayDistribution`] if the vector
    /// is empty, any value is non-finite or negative, or the total mass
    /// exceeds `1 + MASS_TOLERANCE`. The pmf is never renormalised.
    pub fn new(probs: Vec<f64>) -> Result<Self, ConvolveError> {
        if probs.is_empty() {
            return Err(ConvolveError::InvalidDelayDistribution {
                reason: "pmf is empty".to_string(),
            });
        }
        for (position, &value) in probs.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConvolveError::InvalidDelayDistribution {
                    reason: format!(
                        "probs[{position}] = {value} must be finite and >= 0"
                    ),
                });
            }
        }
        let total: f64 = probs.iter().sum();
        if total > 1.0 + MASS_TOLERANCE {
            return Err(ConvolveError::InvalidDelayDistribution {
                reason: format!("total mass {total} exceeds 1"),
            });
        }
        Ok(Self { probs })
    }

    /// Number of delay columns this pmf covers.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Always false: empty pmfs are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// The probability values.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Total mass inside the delay window.
    pub fn total_mass(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Right-censored mass beyond the window, clamped at zero.
    pub fn censored_mass(&self) -> f64 {
        (1.0 - self.total_mass()).max(0.0)
    }
}
