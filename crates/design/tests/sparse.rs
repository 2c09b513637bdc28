//! Integration tests for the sparse round-trip law.

use iris_design::{compile, compress, DesignMatrix, Effect};
use ndarray::Array2;

/// Builds the three design modules a model formula layer would emit:
/// expectation, reference-delay, report-delay.
fn model_designs(n_rows: usize) -> Vec<DesignMatrix> {
    let dow: Vec<usize> = (0..n_rows).map(|i| i % 7).collect();
    let region: Vec<usize> = (0..n_rows).map(|i| i % 3).collect();
    let times: Vec<usize> = (0..n_rows).map(|i| i / 7).collect();
    let n_times = n_rows / 7 + 1;

    vec![
        compile(
            &[
                Effect::Intercept,
                Effect::RandomWalk {
                    name: "week".to_string(),
                    times: times.clone(),
                    n_times,
                },
                Effect::Categorical {
                    name: "region".to_string(),
                    levels: region.clone(),
                    n_levels: 3,
                },
            ],
            n_rows,
        )
        .unwrap(),
        compile(
            &[
                Effect::Intercept,
                Effect::Categorical {
                    name: "day_of_week".to_string(),
                    levels: dow,
                    n_levels: 7,
                },
            ],
            n_rows,
        )
        .unwrap(),
        compile(
            &[Effect::Categorical {
                name: "region".to_string(),
                levels: region,
                n_levels: 3,
            }],
            n_rows,
        )
        .unwrap(),
    ]
}

#[test]
fn round_trip_law_holds_for_every_module() {
    for design in model_designs(364) {
        let sparse = compress(&design);
        assert_eq!(
            sparse.expand(),
            *design.values(),
            "gathering unique rows by index must reconstruct the dense matrix"
        );
        assert_eq!(sparse.index().len(), design.n_rows());
        for &i in sparse.index() {
            assert!(i < sparse.unique().n_rows());
        }
    }
}

#[test]
fn deduplication_shrinks_repetitive_designs() {
    // Day-of-week over 364 rows has exactly 7 distinct rows.
    let designs = model_designs(364);
    let sparse = compress(&designs[1]);
    assert_eq!(sparse.unique().n_rows(), 7);
}

#[test]
fn column_names_survive_compression() {
    let designs = model_designs(28);
    for design in &designs {
        let sparse = compress(design);
        assert_eq!(sparse.unique().columns(), design.columns());
    }
}

#[test]
fn empty_design_round_trips() {
    let design = compile(&[Effect::Intercept], 0).unwrap();
    let sparse = compress(&design);
    assert!(sparse.index().is_empty());
    assert_eq!(sparse.unique().n_rows(), 0);
    assert_eq!(sparse.expand(), Array2::<f64>::zeros((0, 1)));
}
