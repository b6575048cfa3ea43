//! Shared builders for integration tests.

#![allow(dead_code)]

use ibd_hmm::{LikelihoodEvaluator, ModelConstants, SiteSequence, SiteValidation};
use tracing_subscriber::EnvFilter;

pub const RHO: f64 = 7.4e-7;

/// Route `tracing` output through the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn sequence<R: AsRef<[f64]>>(
    genotypes: &[[i32; 2]],
    frequencies: &[R],
    distances: &[f64],
) -> SiteSequence {
    SiteSequence::from_matrices(genotypes, frequencies, distances, &SiteValidation::default())
        .expect("test data is valid")
}

pub fn evaluator<R: AsRef<[f64]>>(
    genotypes: &[[i32; 2]],
    frequencies: &[R],
    distances: &[f64],
    epsilon: f64,
) -> LikelihoodEvaluator {
    let constants = ModelConstants::new(epsilon, RHO).expect("valid constants");
    LikelihoodEvaluator::new(sequence(genotypes, frequencies, distances), constants)
        .expect("evaluator builds")
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
