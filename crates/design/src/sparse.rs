//! Exact deduplication of dense design matrices.

use std::collections::HashMap;

use ndarray::{Array2, Axis};

use crate::effect::DesignMatrix;

/// A deduplicated design matrix: the distinct rows in first-occurrence
/// order plus the index mapping every original row to its distinct row.
///
/// Invariant: gathering `unique` rows by `index` reconstructs the dense
/// matrix exactly, row for row ([`expand`](Self::expand)). Effects like
/// day-of-week repeat a handful of distinct rows across thousands of
/// instances, so downstream transforms evaluate once per distinct row
/// and gather, the dominant performance lever of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseDesign {
    unique: DesignMatrix,
    index: Vec<usize>,
}

impl SparseDesign {
    /// The distinct rows, in first-occurrence order.
    pub fn unique(&self) -> &DesignMatrix {
        &self.unique
    }

    /// For each original row, the position of its distinct row.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Reconstructs the original dense matrix by gathering.
    pub fn expand(&self) -> Array2<f64> {
        self.unique.values().select(Axis(0), &self.index)
    }
}

/// Deduplicates a dense design matrix.
///
/// Row equality is exact: every column compared by its `f64` bit
/// pattern, no tolerance. The bit-pattern map keys make hash collisions
/// impossible to act on (colliding keys still compare unequal). An
/// all-distinct input degrades to `index` = identity; this operation
/// cannot fail.
pub fn compress(design: &DesignMatrix) -> SparseDesign {
    let values = design.values();
    let mut seen: HashMap<Vec<u64>, usize> = HashMap::new();
    let mut keep: Vec<usize> = Vec::new();
    let mut index = Vec::with_capacity(values.nrows());

    for (row, data) in values.rows().into_iter().enumerate() {
        let key: Vec<u64> = data.iter().map(|v| v.to_bits()).collect();
        match seen.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                index.push(*entry.get());
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(keep.len());
                index.push(keep.len());
                keep.push(row);
            }
        }
    }

    let unique_values = values.select(Axis(0), &keep);
    let unique = DesignMatrix::from_parts(design.columns().to_vec(), unique_values);

    SparseDesign { unique, index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{compile, Effect};
    use ndarray::array;

    fn matrix(values: Array2<f64>) -> DesignMatrix {
        let columns = (0..values.ncols()).map(|i| format!("c{i}")).collect();
        DesignMatrix::new(columns, values).unwrap()
    }

    #[test]
    fn duplicate_rows_collapse() {
        let design = matrix(array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        let sparse = compress(&design);

        assert_eq!(sparse.unique().values(), &array![[1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(sparse.index(), &[0, 1, 0]);
    }

    #[test]
    fn all_distinct_degrades_to_identity() {
        let design = matrix(array![[1.0], [2.0], [3.0]]);
        let sparse = compress(&design);
        assert_eq!(sparse.index(), &[0, 1, 2]);
        assert_eq!(sparse.unique().values(), design.values());
    }

    #[test]
    fn first_occurrence_order() {
        let design = matrix(array![[3.0], [1.0], [3.0], [2.0], [1.0]]);
        let sparse = compress(&design);
        assert_eq!(sparse.unique().values(), &array![[3.0], [1.0], [2.0]]);
        assert_eq!(sparse.index(), &[0, 1, 0, 2, 1]);
    }

    #[test]
    fn equality_is_bitwise() {
        // -0.0 and 0.0 are numerically equal but distinct bit patterns;
        // the dedup is syntactic, so they stay separate rows.
        let design = matrix(array![[0.0], [-0.0]]);
        let sparse = compress(&design);
        assert_eq!(sparse.unique().n_rows(), 2);
    }

    #[test]
    fn round_trip_on_compiled_design() {
        let effects = [
            Effect::Intercept,
            Effect::Categorical {
                name: "dow".to_string(),
                levels: (0..200).map(|i| i % 7).collect(),
                n_levels: 7,
            },
        ];
        let design = compile(&effects, 200).unwrap();
        let sparse = compress(&design);

        assert_eq!(sparse.unique().n_rows(), 7);
        assert_eq!(sparse.expand(), *design.values());
    }
}
