//! Bridges TOML configuration into per-crate config types.

use iris_triangle::TriangleConfig;

use crate::config::{DataConfig, TriangleToml};

/// Builds the triangle configuration from the TOML sections, with an
/// optional CLI override for the maximum delay.
pub fn build_triangle_config(
    triangle: &TriangleToml,
    data: &DataConfig,
    max_delay_override: Option<usize>,
) -> TriangleConfig {
    TriangleConfig::new(max_delay_override.unwrap_or(triangle.max_delay))
        .with_by(data.by.iter().cloned())
        .with_max_span_days(triangle.max_span_days)
}
