//! Error types for the iris-convolve crate.

/// Error type for all fallible operations in the iris-convolve crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvolveError {
    /// Returned when a delay distribution violates the numeric contract:
    /// empty, non-finite, negative, or total mass above 1. Never clipped
    /// or renormalised here; doing so silently would corrupt the
    /// observation likelihood upstream.
    #[error("invalid delay distribution: {reason}")]
    InvalidDelayDistribution {
        /// What the distribution violated.
        reason: String,
    },

    /// Returned when a block's pmf length differs from `max_delay`.
    #[error("pmf length {got} does not match max_delay {expected}")]
    LengthMismatch {
        /// Expected number of delay columns.
        expected: usize,
        /// The pmf length provided.
        got: usize,
    },

    /// Returned when a block addresses a group or time outside the axes.
    #[error(
        "block for group {group}, times {start}..{end} is outside \
         {n_groups} groups x {n_times} times"
    )]
    BlockOutOfRange {
        /// The block's group index.
        group: usize,
        /// Start of the block's time range.
        start: usize,
        /// End (exclusive) of the block's time range.
        end: usize,
        /// Number of groups on the axis.
        n_groups: usize,
        /// Number of time steps on the axis.
        n_times: usize,
    },

    /// Returned when two blocks claim the same (group, time) cell.
    #[error("blocks overlap at group {group}, time {time_index}")]
    OverlappingBlocks {
        /// The doubly-claimed group.
        group: usize,
        /// The doubly-claimed time index.
        time_index: usize,
    },

    /// Returned at apply time when a (group, time) cell has no block.
    #[error("no delay distribution covers group {group}, time {time_index}")]
    UncoveredCell {
        /// The uncovered group.
        group: usize,
        /// The uncovered time index.
        time_index: usize,
    },

    /// Returned when the latent matrix shape disagrees with the axes.
    #[error(
        "expected latent shape ({n_groups}, {n_times}), got ({rows}, {cols})"
    )]
    LatentShapeMismatch {
        /// Expected group count.
        n_groups: usize,
        /// Expected time count.
        n_times: usize,
        /// Provided row count.
        rows: usize,
        /// Provided column count.
        cols: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = ConvolveError::OverlappingBlocks {
            group: 2,
            time_index: 14,
        };
        let msg = err.to_string();
        assert!(msg.contains("group 2"));
        assert!(msg.contains("time 14"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ConvolveError>();
    }
}
