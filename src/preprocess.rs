//! The `preprocess` subcommand: CSV observations in, JSON artifact out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use iris_meta::Metadata;
use iris_triangle::{
    build_triangle, classify_completeness, reference_by_report, Observation, ReportingTriangle,
    TriangleConfig,
};

use crate::cli::PreprocessArgs;
use crate::config::IrisConfig;
use crate::convert;
use crate::designs::{build_modules, DesignModule};
use crate::ingest;

/// Run the full preprocessing pipeline.
pub fn run(args: PreprocessArgs) -> Result<()> {
    // Step 1: Load config
    let text = fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config {}", args.config.display()))?;
    let config: IrisConfig = toml::from_str(&text)
        .with_context(|| format!("invalid config {}", args.config.display()))?;

    // Step 2: Resolve paths
    let input: PathBuf = args
        .input
        .or_else(|| config.data.input.clone())
        .context("no input path: set [data].input in config or use --input")?;
    let output: PathBuf = args
        .output
        .or_else(|| config.data.output.clone())
        .context("no output path: set [data].output in config or use --output")?;

    // Step 3: Ingest observations
    let observations = ingest::read_observations(&input, &config.data)?;

    // Step 4: Build the artifact
    let triangle_config =
        convert::build_triangle_config(&config.triangle, &config.data, args.max_delay);
    let artifact = build_artifact(&observations, &triangle_config, &config)?;

    // Step 5: Write it out
    let json = serde_json::to_string_pretty(&artifact).context("serialising artifact")?;
    fs::write(&output, json)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), "artifact written");
    Ok(())
}

/// Runs the pure pipeline: triangle, completeness, lookup, metadata,
/// design modules.
pub fn build_artifact(
    observations: &[Observation],
    triangle_config: &TriangleConfig,
    config: &IrisConfig,
) -> Result<Artifact> {
    let triangle = build_triangle(observations, triangle_config)
        .context("building reporting triangle")?;
    info!(
        n_rows = triangle.n_rows(),
        n_groups = triangle.groups().len(),
        snapshot = %triangle.snapshot(),
        "triangle built"
    );
    if triangle.truncated_reports() > 0 {
        warn!(
            truncated = triangle.truncated_reports(),
            "estimates downstream mean 'reported within {} days'",
            triangle.max_delay()
        );
    }

    let completeness = classify_completeness(&triangle);
    info!(
        complete = completeness.complete().len(),
        censored = completeness.missing_reference().len(),
        "completeness classified"
    );

    let lookup = reference_by_report(&triangle, &completeness);
    if lookup.is_empty() {
        warn!("no report date has a fully complete window: delay-distribution fitting will be skipped downstream");
    }

    let meta = Metadata::from_triangle(&triangle, triangle_config.max_span_days())
        .context("deriving metadata tables")?;
    let modules = build_modules(&meta, &config.design)?;

    Ok(Artifact::assemble(
        &triangle,
        completeness.complete().to_vec(),
        completeness.missing_reference().to_vec(),
        &lookup,
        &meta,
        &modules,
    ))
}

/// The JSON artifact handed to the model-fitting side.
#[derive(Debug, Serialize)]
pub struct Artifact {
    pub snapshot: String,
    pub max_delay: usize,
    pub by: Vec<String>,
    /// Reports dropped at delays >= max_delay: when non-zero, "final"
    /// counts mean "reported within max_delay days".
    pub truncated_reports: u64,
    pub groups: Vec<Vec<String>>,
    pub triangle: Vec<TriangleRowOut>,
    pub complete_rows: Vec<usize>,
    pub missing_reference_rows: Vec<usize>,
    pub reference_by_report: Vec<LookupRowOut>,
    pub metadata: MetadataOut,
    pub designs: Vec<DesignOut>,
}

#[derive(Debug, Serialize)]
pub struct TriangleRowOut {
    pub group: usize,
    pub reference_date: String,
    pub counts: Vec<Option<i64>>,
}

#[derive(Debug, Serialize)]
pub struct LookupRowOut {
    pub group: usize,
    pub report_date: String,
    pub cells: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct MetadataOut {
    pub reference: Vec<DateMetaOut>,
    pub report: Vec<DateMetaOut>,
    pub delay: Vec<DelayMetaOut>,
}

#[derive(Debug, Serialize)]
pub struct DateMetaOut {
    pub date: String,
    pub day_of_week: u8,
    pub iso_week: u32,
    pub time_index: usize,
}

#[derive(Debug, Serialize)]
pub struct DelayMetaOut {
    pub delay: usize,
    pub week_bucket: usize,
}

#[derive(Debug, Serialize)]
pub struct DesignOut {
    pub module: String,
    pub columns: Vec<String>,
    pub n_rows: usize,
    pub unique_rows: Vec<Vec<f64>>,
    pub index: Vec<usize>,
}

impl Artifact {
    fn assemble(
        triangle: &ReportingTriangle,
        complete_rows: Vec<usize>,
        missing_reference_rows: Vec<usize>,
        lookup: &[iris_triangle::ReportLookupRow],
        meta: &Metadata,
        modules: &[DesignModule],
    ) -> Self {
        let date_meta = |rows: &[iris_meta::DateMeta]| {
            rows.iter()
                .map(|m| DateMetaOut {
                    date: m.date.to_string(),
                    day_of_week: m.day_of_week,
                    iso_week: m.iso_week,
                    time_index: m.time_index,
                })
                .collect()
        };

        Self {
            snapshot: triangle.snapshot().to_string(),
            max_delay: triangle.max_delay(),
            by: triangle.by().to_vec(),
            truncated_reports: triangle.truncated_reports(),
            groups: triangle.groups().to_vec(),
            triangle: triangle
                .rows()
                .iter()
                .map(|row| TriangleRowOut {
                    group: row.group(),
                    reference_date: row.reference_date().to_string(),
                    counts: row.counts().to_vec(),
                })
                .collect(),
            complete_rows,
            missing_reference_rows,
            reference_by_report: lookup
                .iter()
                .map(|row| LookupRowOut {
                    group: row.group(),
                    report_date: row.report_date().to_string(),
                    cells: row.cells().to_vec(),
                })
                .collect(),
            metadata: MetadataOut {
                reference: date_meta(&meta.reference),
                report: date_meta(&meta.report),
                delay: meta
                    .delay
                    .iter()
                    .map(|d| DelayMetaOut {
                        delay: d.delay,
                        week_bucket: d.week_bucket,
                    })
                    .collect(),
            },
            designs: modules
                .iter()
                .map(|module| DesignOut {
                    module: module.name.to_string(),
                    columns: module.sparse.unique().columns().to_vec(),
                    n_rows: module.n_rows,
                    unique_rows: module
                        .sparse
                        .unique()
                        .values()
                        .rows()
                        .into_iter()
                        .map(|r| r.to_vec())
                        .collect(),
                    index: module.sparse.index().to_vec(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn obs(reference: &str, report: &str, count: u64) -> Observation {
        Observation::new(date(reference), date(report), count)
    }

    #[test]
    fn artifact_covers_every_section() {
        let observations: Vec<Observation> = (1..=9u32)
            .flat_map(|day| {
                let reference = format!("2024-01-{day:02}");
                let next = format!("2024-01-{:02}", day + 1);
                [obs(&reference, &reference, 3), obs(&reference, &next, 5)]
            })
            .collect();

        let triangle_config = TriangleConfig::new(3);
        let config: IrisConfig = toml::from_str("").unwrap();
        let artifact = build_artifact(&observations, &triangle_config, &config).unwrap();

        assert_eq!(artifact.max_delay, 3);
        assert_eq!(artifact.triangle.len(), 9);
        assert_eq!(
            artifact.complete_rows.len() + artifact.missing_reference_rows.len(),
            9
        );
        assert!(!artifact.reference_by_report.is_empty());
        assert_eq!(artifact.metadata.delay.len(), 3);
        assert_eq!(artifact.designs.len(), 3);

        // The artifact must serialise cleanly.
        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains("\"snapshot\":\"2024-01-10\""));
    }

    #[test]
    fn snapshot_and_truncation_are_surfaced() {
        let observations = vec![
            obs("2024-01-01", "2024-01-01", 5),
            obs("2024-01-01", "2024-01-09", 11),
        ];
        let triangle_config = TriangleConfig::new(3);
        let config: IrisConfig = toml::from_str("").unwrap();
        let artifact = build_artifact(&observations, &triangle_config, &config).unwrap();

        assert_eq!(artifact.truncated_reports, 1);
        assert_eq!(artifact.snapshot, "2024-01-09");
    }
}
