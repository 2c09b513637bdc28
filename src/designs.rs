//! Builds the standard covariate design modules from metadata.
//!
//! Three modules mirror the downstream model's formula slots:
//! expectation (latent process over group x reference time),
//! reference-delay and report-delay (delay-distribution covariates over
//! the respective date axes). Each is compiled to dense columns and
//! immediately deduplicated.

use anyhow::{Context, Result};
use tracing::debug;

use iris_design::{compile, compress, Effect, SparseDesign};
use iris_meta::Metadata;

use crate::config::DesignToml;

/// One compiled and deduplicated design module.
pub struct DesignModule {
    /// Module name: `expectation`, `reference_delay` or `report_delay`.
    pub name: &'static str,
    /// Number of dense rows before deduplication.
    pub n_rows: usize,
    /// The deduplicated design.
    pub sparse: SparseDesign,
}

/// Compiles the three standard modules.
pub fn build_modules(meta: &Metadata, design: &DesignToml) -> Result<Vec<DesignModule>> {
    let n_groups = meta.groups.len().max(1);
    let n_times = meta.reference.len();

    // Expectation module: one row per (group, reference time), group-major,
    // matching the convolution layer's latent ordering.
    let n_rows = n_groups * n_times;
    let mut effects = vec![Effect::Intercept];
    if design.weekly_random_walk && n_times > 1 {
        let n_weeks = (n_times - 1) / 7 + 1;
        effects.push(Effect::RandomWalk {
            name: "reference_week".to_string(),
            times: (0..n_rows).map(|row| (row % n_times) / 7).collect(),
            n_times: n_weeks,
        });
    }
    if n_groups > 1 {
        effects.push(Effect::Categorical {
            name: "group".to_string(),
            levels: (0..n_rows).map(|row| row / n_times).collect(),
            n_levels: n_groups,
        });
    }
    let expectation = compile(&effects, n_rows).context("expectation module")?;

    // Delay modules: covariates over the date axes themselves.
    let mut reference_effects = vec![Effect::Intercept];
    let mut report_effects = vec![Effect::Intercept];
    if design.day_of_week {
        reference_effects.push(day_of_week_effect(
            meta.reference.iter().map(|m| m.day_of_week),
        ));
        report_effects.push(day_of_week_effect(meta.report.iter().map(|m| m.day_of_week)));
    }
    let reference_delay =
        compile(&reference_effects, meta.reference.len()).context("reference-delay module")?;
    let report_delay =
        compile(&report_effects, meta.report.len()).context("report-delay module")?;

    let modules = vec![
        ("expectation", expectation),
        ("reference_delay", reference_delay),
        ("report_delay", report_delay),
    ];
    Ok(modules
        .into_iter()
        .map(|(name, dense)| {
            let n_rows = dense.n_rows();
            let sparse = compress(&dense);
            debug!(
                module = name,
                n_rows,
                n_unique = sparse.unique().n_rows(),
                "design module compiled"
            );
            DesignModule {
                name,
                n_rows,
                sparse,
            }
        })
        .collect())
}

fn day_of_week_effect(days: impl Iterator<Item = u8>) -> Effect {
    Effect::Categorical {
        name: "day_of_week".to_string(),
        levels: days.map(|d| d as usize).collect(),
        n_levels: 7,
    }
}
