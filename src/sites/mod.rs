//! Validated per-site observation data.
//!
//! Raw genotype and frequency matrices are checked once and turned into
//! [`Site`] records that carry their active alphabet size explicitly.

mod sequence;
mod site;

pub use sequence::{GenotypePolicy, SiteSequence, SiteValidation};
pub use site::{active_allele_count, GenotypePair, Site, ACTIVE_FREQUENCY_THRESHOLD};
