//! Errors raised while validating observation data and model constants.
//!
//! Infeasible parameters and zero-probability data are not errors: they are
//! reported through [`LogLikelihood`](crate::forward::LogLikelihood).

use thiserror::Error;

/// Errors that can occur while preparing a likelihood evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IbdError {
    /// Two inputs that must describe the same sites disagree in length.
    #[error("{what} has {found} rows but {expected} sites were expected")]
    LengthMismatch {
        /// Name of the offending input.
        what: &'static str,
        /// Number of sites implied by the genotype matrix.
        expected: usize,
        /// Number of rows actually supplied.
        found: usize,
    },

    /// Frequency rows do not share a common width.
    #[error("frequency row {site} has {found} slots, expected {expected}")]
    RaggedFrequencies {
        /// Site index (0-based).
        site: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A frequency is negative or not finite.
    #[error("invalid allele frequency {value} at site {site}, slot {slot}")]
    InvalidFrequency {
        /// Site index (0-based).
        site: usize,
        /// Allele slot within the row.
        slot: usize,
        /// Offending value.
        value: f64,
    },

    /// An active allele slot follows an absent one.
    #[error("site {site} has an active allele in slot {slot} after an absent slot")]
    FrequencyGap {
        /// Site index (0-based).
        site: usize,
        /// First active slot found after the gap.
        slot: usize,
    },

    /// Frequencies at a site do not sum to one.
    #[error("allele frequencies at site {site} sum to {sum}, expected 1")]
    FrequencySum {
        /// Site index (0-based).
        site: usize,
        /// Observed row sum.
        sum: f64,
    },

    /// Observed allele index is outside the active alphabet of its site.
    #[error(
        "genotype {value} of individual {individual} at site {site} is outside [0, {active_alleles})"
    )]
    GenotypeOutOfRange {
        /// Site index (0-based).
        site: usize,
        /// Individual (column) index, 0 or 1.
        individual: usize,
        /// Observed allele index.
        value: i32,
        /// Number of active alleles at the site.
        active_alleles: usize,
    },

    /// Genetic distance to the next site is negative or NaN.
    #[error("invalid genetic distance {value} after site {site}")]
    InvalidDistance {
        /// Site index (0-based) the distance starts from.
        site: usize,
        /// Offending value.
        value: f64,
    },

    /// A fixed model constant is outside its domain.
    #[error("model constant {name} = {value} is out of range")]
    InvalidConstant {
        /// Constant name (`epsilon` or `rho`).
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Error rate is too large for the alphabet: the match probability would be negative.
    #[error("error rate {epsilon} leaves a negative match probability for {active_alleles} alleles")]
    ErrorRateTooLarge {
        /// Per-allele genotyping error rate.
        epsilon: f64,
        /// Active alphabet size that triggered the violation.
        active_alleles: usize,
    },
}
