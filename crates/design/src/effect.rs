//! Enumerated covariate effects compiled into dense design columns.
//!
//! Each effect is compiled independently into a named column block;
//! there is deliberately no formula interpreter here. The three shapes
//! cover the hierarchical effects the downstream model understands:
//! fixed effects, categorical random effects, and random walks over a
//! dense time axis.

use ndarray::Array2;

use crate::error::DesignError;

/// One covariate effect over `n_rows` design instances.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A constant 1.0 column.
    Intercept,
    /// A numeric column taken as-is.
    Fixed {
        /// Column name.
        name: String,
        /// One value per design row.
        values: Vec<f64>,
    },
    /// A categorical random effect: one indicator column per level.
    Categorical {
        /// Effect name; columns are `name[level]`.
        name: String,
        /// Level index per design row, each `< n_levels`.
        levels: Vec<usize>,
        /// Number of levels.
        n_levels: usize,
    },
    /// A random walk over a dense time axis, parameterised by
    /// increments: column `t` (for `t` in `1..n_times`) is 1.0 for
    /// every row at or past time `t`, so coefficients are the walk's
    /// step sizes.
    RandomWalk {
        /// Effect name; columns are `name[t]`.
        name: String,
        /// Time index per design row, each `< n_times`.
        times: Vec<usize>,
        /// Number of time steps on the dense axis.
        n_times: usize,
    },
}

impl Effect {
    fn name(&self) -> &str {
        match self {
            Effect::Intercept => "intercept",
            Effect::Fixed { name, .. }
            | Effect::Categorical { name, .. }
            | Effect::RandomWalk { name, .. } => name,
        }
    }

    fn n_columns(&self) -> usize {
        match self {
            Effect::Intercept => 1,
            Effect::Fixed { .. } => 1,
            Effect::Categorical { n_levels, .. } => *n_levels,
            Effect::RandomWalk { n_times, .. } => n_times.saturating_sub(1),
        }
    }
}

/// A dense design matrix with named columns, one row per instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl DesignMatrix {
    /// Wraps named columns and values.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ColumnMismatch`] if the name count and
    /// value columns disagree.
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self, DesignError> {
        if columns.len() != values.ncols() {
            return Err(DesignError::ColumnMismatch {
                names: columns.len(),
                cols: values.ncols(),
            });
        }
        Ok(Self { columns, values })
    }

    /// Constructs a matrix whose shape is already known to agree.
    pub(crate) fn from_parts(columns: Vec<String>, values: Array2<f64>) -> Self {
        Self { columns, values }
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The dense values, rows = instances.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of design rows.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }
}

/// Compiles a sequence of effects into one dense design matrix.
///
/// Column blocks appear in effect order; every effect must describe
/// exactly `n_rows` instances.
///
/// # Errors
///
/// * [`DesignError::LengthMismatch`] if an effect's vector length is
///   not `n_rows`.
/// * [`DesignError::IndexOutOfRange`] if a level or time index exceeds
///   its declared cardinality.
pub fn compile(effects: &[Effect], n_rows: usize) -> Result<DesignMatrix, DesignError> {
    let n_cols: usize = effects.iter().map(Effect::n_columns).sum();
    let mut values = Array2::zeros((n_rows, n_cols));
    let mut columns = Vec::with_capacity(n_cols);

    let mut offset = 0;
    for effect in effects {
        match effect {
            Effect::Intercept => {
                columns.push("intercept".to_string());
                values.column_mut(offset).fill(1.0);
            }
            Effect::Fixed { name, values: v } => {
                check_len(effect.name(), v.len(), n_rows)?;
                columns.push(name.clone());
                for (row, &value) in v.iter().enumerate() {
                    values[[row, offset]] = value;
                }
            }
            Effect::Categorical {
                name,
                levels,
                n_levels,
            } => {
                check_len(effect.name(), levels.len(), n_rows)?;
                for level in 0..*n_levels {
                    columns.push(format!("{name}[{level}]"));
                }
                for (row, &level) in levels.iter().enumerate() {
                    if level >= *n_levels {
                        return Err(DesignError::IndexOutOfRange {
                            effect: name.clone(),
                            row,
                            index: level,
                            cardinality: *n_levels,
                        });
                    }
                    values[[row, offset + level]] = 1.0;
                }
            }
            Effect::RandomWalk {
                name,
                times,
                n_times,
            } => {
                check_len(effect.name(), times.len(), n_rows)?;
                for t in 1..*n_times {
                    columns.push(format!("{name}[{t}]"));
                }
                for (row, &time) in times.iter().enumerate() {
                    if time >= *n_times {
                        return Err(DesignError::IndexOutOfRange {
                            effect: name.clone(),
                            row,
                            index: time,
                            cardinality: *n_times,
                        });
                    }
                    // Increments: row at time `time` has stepped through
                    // every increment column t <= time.
                    for t in 1..=time {
                        values[[row, offset + t - 1]] = 1.0;
                    }
                }
            }
        }
        offset += effect.n_columns();
    }

    DesignMatrix::new(columns, values)
}

fn check_len(effect: &str, got: usize, expected: usize) -> Result<(), DesignError> {
    if got != expected {
        return Err(DesignError::LengthMismatch {
            effect: effect.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn intercept_only() {
        let design = compile(&[Effect::Intercept], 3).unwrap();
        assert_eq!(design.columns(), ["intercept".to_string()]);
        assert_eq!(design.values(), &array![[1.0], [1.0], [1.0]]);
    }

    #[test]
    fn categorical_one_hot() {
        let effect = Effect::Categorical {
            name: "region".to_string(),
            levels: vec![0, 1, 0],
            n_levels: 2,
        };
        let design = compile(&[effect], 3).unwrap();
        assert_eq!(
            design.columns(),
            ["region[0]".to_string(), "region[1]".to_string()]
        );
        assert_eq!(design.values(), &array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn random_walk_cumulative_indicators() {
        let effect = Effect::RandomWalk {
            name: "week".to_string(),
            times: vec![0, 1, 2],
            n_times: 3,
        };
        let design = compile(&[effect], 3).unwrap();
        assert_eq!(
            design.columns(),
            ["week[1]".to_string(), "week[2]".to_string()]
        );
        // Time 0: no increments; time 1: first; time 2: both.
        assert_eq!(design.values(), &array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn effects_concatenate_in_order() {
        let effects = [
            Effect::Intercept,
            Effect::Fixed {
                name: "trend".to_string(),
                values: vec![0.5, 1.5],
            },
        ];
        let design = compile(&effects, 2).unwrap();
        assert_eq!(design.n_cols(), 2);
        assert_eq!(design.values(), &array![[1.0, 0.5], [1.0, 1.5]]);
    }

    #[test]
    fn length_mismatch_rejected() {
        let effect = Effect::Fixed {
            name: "trend".to_string(),
            values: vec![1.0],
        };
        let err = compile(&[effect], 2).unwrap_err();
        assert!(matches!(err, DesignError::LengthMismatch { .. }));
    }

    #[test]
    fn level_out_of_range_rejected() {
        let effect = Effect::Categorical {
            name: "region".to_string(),
            levels: vec![2],
            n_levels: 2,
        };
        let err = compile(&[effect], 1).unwrap_err();
        assert_eq!(
            err,
            DesignError::IndexOutOfRange {
                effect: "region".to_string(),
                row: 0,
                index: 2,
                cardinality: 2,
            }
        );
    }

    #[test]
    fn zero_rows_compile_to_empty_matrix() {
        let design = compile(&[Effect::Intercept], 0).unwrap();
        assert_eq!(design.n_rows(), 0);
        assert_eq!(design.n_cols(), 1);
    }
}
