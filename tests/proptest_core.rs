//! Property-based tests for parsing, normalization, activation and arg-max.

use ndarray::Array2;
use proptest::prelude::*;
use scrawl::{arg_max, normalize, parse_matrix, sigmoid, ScrawlError, WeightMatrix};

/// Strategy for finite weight values across a wide range of magnitudes
fn weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e3..1.0e3f64,
        -1.0e-6..1.0e-6f64,
        Just(0.0),
    ]
}

/// Strategy for a rectangular grid of weights
fn grid() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..12usize, 1..12usize).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(weight(), cols), rows)
    })
}

proptest! {
    /// Property: serializing then parsing returns the original grid exactly
    #[test]
    fn matrix_csv_round_trip(rows in grid()) {
        let m = WeightMatrix::from_rows(rows.clone()).unwrap();
        let parsed = parse_matrix(&m.to_csv()).unwrap();

        prop_assert_eq!(parsed.shape(), (rows.len(), rows[0].len()));
        for (i, row) in rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                prop_assert_eq!(parsed.view()[[i, j]], *v);
            }
        }
    }

    /// Property: a non-numeric token anywhere is reported at its position
    #[test]
    fn bad_token_is_located(rows in grid(), r in 0..12usize, c in 0..12usize) {
        let r = r % rows.len();
        let c = c % rows[0].len();

        let text = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, v)| if (i, j) == (r, c) { "w8".to_string() } else { v.to_string() })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n");

        match parse_matrix(&text) {
            Err(ScrawlError::MalformedInput { row, column, .. }) => {
                prop_assert_eq!(row, r);
                prop_assert_eq!(column, c);
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    /// Property: normalized output has zero mean and unit population deviation
    #[test]
    fn normalize_moments(x in prop::collection::vec(0.0..255.0f64, 2..400)) {
        let spread = x.iter().cloned().fold(f64::MIN, f64::max) - x.iter().cloned().fold(f64::MAX, f64::min);
        prop_assume!(spread > 1.);

        let out = normalize(&x).unwrap();
        let n = out.len() as f64;
        let mean = out.iter().sum::<f64>() / n;
        let std = (out.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

        prop_assert!(mean.abs() < 1e-9);
        prop_assert!((std - 1.).abs() < 1e-9);
    }

    /// Property: uniform input normalizes to zeros
    #[test]
    fn normalize_uniform_is_zero(v in -1.0e3..1.0e3f64, n in 1..400usize) {
        prop_assert_eq!(normalize(&vec![v; n]).unwrap(), vec![0.; n]);
    }

    /// Property: sigmoid is increasing and stays inside (0, 1) for moderate inputs
    #[test]
    fn sigmoid_monotone(a in -30.0..30.0f64, b in -30.0..30.0f64) {
        prop_assume!(a < b);
        prop_assert!(sigmoid(a) <= sigmoid(b));
        prop_assert!(sigmoid(a) > 0. && sigmoid(a) < 1.);
        prop_assert!(sigmoid(b) > 0. && sigmoid(b) < 1.);
    }

    /// Property: arg-max returns the first index holding the maximum
    #[test]
    fn arg_max_is_first_maximum(v in prop::collection::vec(0..5u8, 1..30)) {
        let v = v.into_iter().map(f64::from).collect::<Vec<f64>>();
        let (ix, max) = arg_max(&v).unwrap();

        prop_assert!(v.iter().all(|x| *x <= max));
        prop_assert_eq!(v[ix], max);
        prop_assert!(v[..ix].iter().all(|x| *x < max));
    }

    /// Property: from_rows and from_array agree
    #[test]
    fn constructors_agree(rows in grid()) {
        let (h, w) = (rows.len(), rows[0].len());
        let flat = rows.iter().flatten().cloned().collect::<Vec<f64>>();
        let a = WeightMatrix::from_array(Array2::from_shape_vec((h, w), flat).unwrap()).unwrap();
        let b = WeightMatrix::from_rows(rows).unwrap();
        prop_assert_eq!(a, b);
    }
}
