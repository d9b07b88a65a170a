//! Synthetic shoe-size / height / hat-size dataset.
//!
//! `person_height` follows `shoe_size²` plus a small uniform jitter, and
//! `hat_size` is an unrelated categorical column, which makes the table a
//! convenient fixture for every chart type.

use crate::error::Result;
use crate::table::Table;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::ops::Range;
use tracing::debug;

/// Name of the standard-normal column.
pub const SHOE_SIZE: &str = "shoe_size";
/// Name of the derived quadratic column.
pub const PERSON_HEIGHT: &str = "person_height";
/// Name of the categorical column.
pub const HAT_SIZE: &str = "hat_size";

/// Maximum absolute distance between `person_height` and `shoe_to_height(shoe_size)`.
pub const NOISE_BOUND: f64 = 0.1;

/// Values drawn for `hat_size` (upper bound exclusive).
pub const HAT_SIZE_RANGE: Range<i64> = 0..5;

/// The function that generates heights from shoe sizes.
#[must_use]
pub fn shoe_to_height(x: f64) -> f64 {
    x * x
}

/// Generate `rows` rows using the supplied random source.
///
/// # Errors
///
/// Never fails for the generated columns; the `Result` carries table
/// construction errors through unchanged.
pub fn generate<R: Rng + ?Sized>(rows: usize, rng: &mut R) -> Result<Table> {
    let shoe_size: Vec<f64> = (0..rows).map(|_| rng.sample(StandardNormal)).collect();

    let person_height: Vec<f64> = shoe_size
        .iter()
        .map(|&s| {
            let u: f64 = rng.gen();
            shoe_to_height(s) + (u - 0.5) * (2.0 * NOISE_BOUND)
        })
        .collect();

    let hat_size: Vec<i64> = (0..rows).map(|_| rng.gen_range(HAT_SIZE_RANGE)).collect();

    debug!(rows, "generated synthetic dataset");

    Table::new()
        .with_column(SHOE_SIZE, shoe_size)?
        .with_column(PERSON_HEIGHT, person_height)?
        .with_column(HAT_SIZE, hat_size)
}

/// Deterministic dataset for a given seed.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_seeded(rows: usize, seed: u64) -> Result<Table> {
    generate(rows, &mut StdRng::seed_from_u64(seed))
}

/// Dataset drawn from OS entropy.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_random(rows: usize) -> Result<Table> {
    generate(rows, &mut StdRng::from_entropy())
}
