//! Property tests for the synthetic dataset.
//!
//! Run: cargo test --test dataset_properties_test

#![allow(clippy::unwrap_used)]

use graphing::dataset::{
    self, shoe_to_height, HAT_SIZE, HAT_SIZE_RANGE, NOISE_BOUND, PERSON_HEIGHT, SHOE_SIZE,
};
use graphing::table::DataType;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every column has the requested length and its fixed dtype.
    #[test]
    fn prop_columns_have_requested_shape(rows in 0usize..2000, seed in any::<u64>()) {
        let table = dataset::generate_seeded(rows, seed).unwrap();

        prop_assert_eq!(table.rows(), rows);
        prop_assert_eq!(table.column_names(), vec![SHOE_SIZE, PERSON_HEIGHT, HAT_SIZE]);
        prop_assert_eq!(table.column(SHOE_SIZE).unwrap().dtype(), DataType::Float64);
        prop_assert_eq!(table.column(PERSON_HEIGHT).unwrap().dtype(), DataType::Float64);
        prop_assert_eq!(table.column(HAT_SIZE).unwrap().dtype(), DataType::Int64);
        for name in table.column_names() {
            prop_assert_eq!(table.column(name).unwrap().len(), rows);
        }
    }

    /// Height stays within the noise bound of the generating function.
    #[test]
    fn prop_height_tracks_generating_function(rows in 1usize..1000, seed in any::<u64>()) {
        let table = dataset::generate_seeded(rows, seed).unwrap();
        let sizes = table.numeric(SHOE_SIZE).unwrap();
        let heights = table.numeric(PERSON_HEIGHT).unwrap();

        for (size, height) in sizes.iter().zip(&heights) {
            prop_assert!(
                (height - shoe_to_height(*size)).abs() <= NOISE_BOUND,
                "height {} too far from {}^2", height, size
            );
        }
    }

    /// Hat sizes are integers in [0, 4].
    #[test]
    fn prop_hat_size_in_range(rows in 1usize..1000, seed in any::<u64>()) {
        let table = dataset::generate_seeded(rows, seed).unwrap();
        let hats = table.column(HAT_SIZE).unwrap().as_int().unwrap().to_vec();

        for hat in hats {
            prop_assert!(HAT_SIZE_RANGE.contains(&hat), "hat size {} out of range", hat);
        }
    }

    /// `head(n)` keeps at most `n` rows from the front.
    #[test]
    fn prop_head_is_prefix(rows in 0usize..300, n in 0usize..400, seed in any::<u64>()) {
        let table = dataset::generate_seeded(rows, seed).unwrap();
        let head = table.head(n);

        prop_assert_eq!(head.rows(), n.min(rows));
        let full = table.numeric(SHOE_SIZE).unwrap();
        let prefix = head.numeric(SHOE_SIZE).unwrap();
        prop_assert_eq!(&full[..prefix.len()], &prefix[..]);
    }
}

#[test]
fn test_entropy_dataset_obeys_bounds() {
    let table = dataset::generate_random(1000).unwrap();
    let sizes = table.numeric(SHOE_SIZE).unwrap();
    let heights = table.numeric(PERSON_HEIGHT).unwrap();

    assert!(sizes
        .iter()
        .zip(&heights)
        .all(|(s, h)| (h - s * s).abs() <= NOISE_BOUND));
}

#[test]
fn test_shoe_size_roughly_standard_normal() {
    let table = dataset::generate_seeded(10_000, 2024).unwrap();
    let sizes = table.numeric(SHOE_SIZE).unwrap();
    let mean = sizes.iter().sum::<f64>() / sizes.len() as f64;
    let var = sizes.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (sizes.len() - 1) as f64;

    assert!(mean.abs() < 0.05, "mean {mean}");
    assert!((var - 1.0).abs() < 0.1, "variance {var}");
}
