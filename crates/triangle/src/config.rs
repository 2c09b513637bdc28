//! Configuration for triangle construction.

use iris_calendar::DEFAULT_MAX_SPAN_DAYS;

use crate::error::TriangleError;

/// Configuration for [`build_triangle`](crate::build_triangle).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use iris_triangle::TriangleConfig;
///
/// let config = TriangleConfig::new(14).with_by(["region"]);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_delay(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleConfig {
    /// Number of delay columns; delays >= this are truncated.
    max_delay: usize,
    /// Ordered grouping column names. Empty means one global group.
    by: Vec<String>,
    /// Guard on the densified date span (days).
    max_span_days: u32,
}

impl TriangleConfig {
    /// Creates a configuration with the given maximum delay.
    ///
    /// Defaults: no grouping columns, span guard of
    /// [`DEFAULT_MAX_SPAN_DAYS`].
    pub fn new(max_delay: usize) -> Self {
        Self {
            max_delay,
            by: Vec::new(),
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
        }
    }

    /// Sets the ordered grouping columns.
    pub fn with_by<I, S>(mut self, by: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by = by.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the date-span guard in days.
    pub fn with_max_span_days(mut self, max_span_days: u32) -> Self {
        self.max_span_days = max_span_days;
        self
    }

    /// Returns the maximum delay.
    pub fn max_delay(&self) -> usize {
        self.max_delay
    }

    /// Returns the grouping column names.
    pub fn by(&self) -> &[String] {
        &self.by
    }

    /// Returns the date-span guard.
    pub fn max_span_days(&self) -> u32 {
        self.max_span_days
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TriangleError::InvalidMaxDelay`] if `max_delay` is zero.
    pub fn validate(&self) -> Result<(), TriangleError> {
        if self.max_delay < 1 {
            return Err(TriangleError::InvalidMaxDelay {
                max_delay: self.max_delay,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = TriangleConfig::new(7);
        assert_eq!(cfg.max_delay(), 7);
        assert!(cfg.by().is_empty());
        assert_eq!(cfg.max_span_days(), DEFAULT_MAX_SPAN_DAYS);
    }

    #[test]
    fn builder_chaining() {
        let cfg = TriangleConfig::new(28)
            .with_by(["region", "age"])
            .with_max_span_days(730);
        assert_eq!(cfg.by(), ["region".to_string(), "age".to_string()]);
        assert_eq!(cfg.max_span_days(), 730);
    }

    #[test]
    fn zero_max_delay_rejected() {
        let err = TriangleConfig::new(0).validate().unwrap_err();
        assert_eq!(err, TriangleError::InvalidMaxDelay { max_delay: 0 });
    }
}
