//! CSV ingestion of long-format observations.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing::info;

use iris_triangle::Observation;

use crate::config::DataConfig;

/// Reads observations from a CSV file.
///
/// The header must contain the configured reference, report and count
/// columns plus every `by` column. An empty count field means the value
/// is missing, not zero.
pub fn read_observations(path: &Path, data: &DataConfig) -> Result<Vec<Observation>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let observations = parse_observations(file, data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(
        path = %path.display(),
        n_obs = observations.len(),
        "observations loaded"
    );
    Ok(observations)
}

/// Parses observations from any CSV reader. Split out from
/// [`read_observations`] so tests can feed in-memory data.
pub fn parse_observations(reader: impl Read, data: &DataConfig) -> Result<Vec<Observation>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().context("missing CSV header")?.clone();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("column '{name}' not found in CSV header"))
    };
    let reference_idx = column(&data.reference_col)?;
    let report_idx = column(&data.report_col)?;
    let count_idx = column(&data.count_col)?;
    let by_indices: Vec<(String, usize)> = data
        .by
        .iter()
        .map(|name| Ok((name.clone(), column(name)?)))
        .collect::<Result<_>>()?;

    let mut observations = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV record at row {}", row + 2))?;
        let line = row + 2; // header is line 1

        let field = |idx: usize| -> Result<&str> {
            record
                .get(idx)
                .with_context(|| format!("row {line}: missing field {idx}"))
        };

        let reference_date: NaiveDate = field(reference_idx)?
            .parse()
            .with_context(|| format!("row {line}: bad reference date"))?;
        let report_date: NaiveDate = field(report_idx)?
            .parse()
            .with_context(|| format!("row {line}: bad report date"))?;

        let count_text = field(count_idx)?.trim();
        let mut obs = if count_text.is_empty() {
            Observation::missing(reference_date, report_date)
        } else {
            let count: u64 = count_text
                .parse()
                .with_context(|| format!("row {line}: bad count '{count_text}'"))?;
            Observation::new(reference_date, report_date, count)
        };

        for (name, idx) in &by_indices {
            let value = field(*idx)?.trim();
            if value.is_empty() {
                bail!("row {line}: empty value for grouping column '{name}'");
            }
            obs = obs.with_key(name.clone(), value);
        }
        observations.push(obs);
    }

    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_config(by: &[&str]) -> DataConfig {
        DataConfig {
            reference_col: "reference_date".to_string(),
            report_col: "report_date".to_string(),
            count_col: "confirm".to_string(),
            by: by.iter().map(|s| s.to_string()).collect(),
            ..DataConfig::default()
        }
    }

    #[test]
    fn parses_grouped_csv() {
        let csv = "\
region,reference_date,report_date,confirm
north,2024-01-01,2024-01-01,5
north,2024-01-01,2024-01-02,8
south,2024-01-01,2024-01-01,
";
        let observations =
            parse_observations(csv.as_bytes(), &data_config(&["region"])).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].count, Some(5));
        assert_eq!(observations[2].count, None);
        assert_eq!(
            observations[1].keys.get("region").map(String::as_str),
            Some("north")
        );
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "reference_date,report_date\n2024-01-01,2024-01-01\n";
        let err =
            parse_observations(csv.as_bytes(), &data_config(&[])).unwrap_err();
        assert!(err.to_string().contains("'confirm'"));
    }

    #[test]
    fn bad_date_carries_row_number() {
        let csv = "\
reference_date,report_date,confirm
2024-01-01,2024-01-01,5
2024-13-01,2024-01-02,8
";
        let err = parse_observations(csv.as_bytes(), &data_config(&[])).unwrap_err();
        assert!(format!("{err:#}").contains("row 3"));
    }

    #[test]
    fn empty_group_value_is_rejected() {
        let csv = "\
region,reference_date,report_date,confirm
,2024-01-01,2024-01-01,5
";
        let err =
            parse_observations(csv.as_bytes(), &data_config(&["region"])).unwrap_err();
        assert!(err.to_string().contains("'region'"));
    }
}
