use std::path::PathBuf;

use serde::Deserialize;

/// Top-level iris configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IrisConfig {
    /// Input/output and column mapping.
    #[serde(default)]
    pub data: DataConfig,

    /// Triangle construction settings.
    #[serde(default)]
    pub triangle: TriangleToml,

    /// Design-matrix settings.
    #[serde(default)]
    pub design: DesignToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_reference_col")]
    pub reference_col: String,
    #[serde(default = "default_report_col")]
    pub report_col: String,
    #[serde(default = "default_count_col")]
    pub count_col: String,
    /// Ordered grouping columns; empty means one global group.
    #[serde(default)]
    pub by: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriangleToml {
    #[serde(default = "default_max_delay")]
    pub max_delay: usize,
    #[serde(default = "default_max_span_days")]
    pub max_span_days: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignToml {
    /// Day-of-week effect in the reference- and report-delay modules.
    #[serde(default = "default_true")]
    pub day_of_week: bool,
    /// Weekly random walk in the expectation module.
    #[serde(default = "default_true")]
    pub weekly_random_walk: bool,
}

fn default_reference_col() -> String {
    "reference_date".to_string()
}
fn default_report_col() -> String {
    "report_date".to_string()
}
fn default_count_col() -> String {
    "confirm".to_string()
}
fn default_max_delay() -> usize {
    14
}
fn default_max_span_days() -> u32 {
    3650
}
fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            reference_col: default_reference_col(),
            report_col: default_report_col(),
            count_col: default_count_col(),
            by: Vec::new(),
        }
    }
}

impl Default for TriangleToml {
    fn default() -> Self {
        Self {
            max_delay: default_max_delay(),
            max_span_days: default_max_span_days(),
        }
    }
}

impl Default for DesignToml {
    fn default() -> Self {
        Self {
            day_of_week: true,
            weekly_random_walk: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: IrisConfig = toml::from_str("").unwrap();
        assert_eq!(config.triangle.max_delay, 14);
        assert_eq!(config.triangle.max_span_days, 3650);
        assert_eq!(config.data.count_col, "confirm");
        assert!(config.design.day_of_week);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<IrisConfig, _> = toml::from_str("[triangle]\nmax_dalay = 7\n");
        assert!(result.is_err());
    }

    #[test]
    fn full_config_parses() {
        let text = r#"
            [data]
            input = "obs.csv"
            output = "artifact.json"
            count_col = "cases"
            by = ["region", "age_group"]

            [triangle]
            max_delay = 28
            max_span_days = 730

            [design]
            weekly_random_walk = false
        "#;
        let config: IrisConfig = toml::from_str(text).unwrap();
        assert_eq!(config.triangle.max_delay, 28);
        assert_eq!(config.data.by, vec!["region", "age_group"]);
        assert!(!config.design.weekly_random_walk);
    }
}
