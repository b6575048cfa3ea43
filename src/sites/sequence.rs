use std::ops::Index;

use tracing::trace;

use super::site::{active_allele_count, GenotypePair, Site, ACTIVE_FREQUENCY_THRESHOLD};
use crate::IbdError;

/// How to treat an observed allele index outside a site's active alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenotypePolicy {
    /// Reject the sequence with [`IbdError::GenotypeOutOfRange`].
    #[default]
    Strict,
    /// Accept the index; it never matches any latent allele, so every term
    /// uses the error branch. Negative missing-data sentinels fall here too.
    MismatchOutOfRange,
}

/// Checks applied when building a [`SiteSequence`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteValidation {
    /// Treatment of out-of-range genotype indices.
    pub genotype_policy: GenotypePolicy,
    /// Maximum allowed `|sum(row) - 1|` for a frequency row.
    pub frequency_tolerance: f64,
}

impl Default for SiteValidation {
    fn default() -> Self {
        Self {
            genotype_policy: GenotypePolicy::Strict,
            frequency_tolerance: 1e-6,
        }
    }
}

impl SiteValidation {
    /// Set the genotype range policy.
    pub fn with_genotype_policy(mut self, policy: GenotypePolicy) -> Self {
        self.genotype_policy = policy;
        self
    }

    /// Set the tolerance on frequency row sums. A NaN tolerance is ignored
    /// and the previous value kept.
    pub fn with_frequency_tolerance(mut self, tolerance: f64) -> Self {
        if !tolerance.is_nan() {
            self.frequency_tolerance = tolerance.abs();
        }
        self
    }
}

/// Ordered sites of one pair of individuals, validated once at construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SiteSequence {
    sites: Vec<Site>,
}

impl SiteSequence {
    /// Build a sequence from the raw matrices.
    ///
    /// * `genotypes`: one `[individual_0, individual_1]` row per site.
    /// * `frequencies`: one allele-frequency row per site, all of equal width.
    /// * `distances`: genetic distance from each site to the next; the last
    ///   entry is never read.
    pub fn from_matrices<R: AsRef<[f64]>>(
        genotypes: &[[i32; 2]],
        frequencies: &[R],
        distances: &[f64],
        validation: &SiteValidation,
    ) -> Result<Self, IbdError> {
        let ndata = genotypes.len();
        check_length("frequency matrix", ndata, frequencies.len())?;
        check_length("genetic distance vector", ndata, distances.len())?;

        let width = frequencies.first().map_or(0, |row| row.as_ref().len());
        let mut sites = Vec::with_capacity(ndata);
        for (site, ((&pair, row), &distance)) in genotypes
            .iter()
            .zip(frequencies)
            .zip(distances)
            .enumerate()
        {
            let row = row.as_ref();
            if row.len() != width {
                return Err(IbdError::RaggedFrequencies {
                    site,
                    expected: width,
                    found: row.len(),
                });
            }
            check_frequency_row(site, row, validation.frequency_tolerance)?;

            let is_last = site + 1 == ndata;
            if !is_last && (distance.is_nan() || distance < 0.0) {
                return Err(IbdError::InvalidDistance {
                    site,
                    value: distance,
                });
            }

            let record = Site::new(GenotypePair::from(pair), row, distance);
            check_genotypes(site, &record, validation.genotype_policy)?;
            sites.push(record);
        }

        trace!(sites = sites.len(), width, "validated site sequence");
        Ok(Self { sites })
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the sequence has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sites in genomic order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Iterate over sites in genomic order.
    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    /// Largest active alphabet over all sites (zero when empty).
    pub fn max_active_alleles(&self) -> usize {
        self.sites
            .iter()
            .map(Site::active_alleles)
            .max()
            .unwrap_or(0)
    }

    /// The same data with the two individuals exchanged at every site.
    pub fn with_swapped_individuals(&self) -> Self {
        Self {
            sites: self
                .sites
                .iter()
                .map(Site::with_swapped_individuals)
                .collect(),
        }
    }
}

impl Index<usize> for SiteSequence {
    type Output = Site;

    fn index(&self, index: usize) -> &Site {
        &self.sites[index]
    }
}

impl<'a> IntoIterator for &'a SiteSequence {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

fn check_length(what: &'static str, expected: usize, found: usize) -> Result<(), IbdError> {
    if expected == found {
        Ok(())
    } else {
        Err(IbdError::LengthMismatch {
            what,
            expected,
            found,
        })
    }
}

fn check_frequency_row(site: usize, row: &[f64], tolerance: f64) -> Result<(), IbdError> {
    if let Some((slot, &value)) = row
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite() || **value < 0.0)
    {
        return Err(IbdError::InvalidFrequency { site, slot, value });
    }

    let active = active_allele_count(row);
    if let Some(offset) = row[active..]
        .iter()
        .position(|&freq| freq > ACTIVE_FREQUENCY_THRESHOLD)
    {
        return Err(IbdError::FrequencyGap {
            site,
            slot: active + offset,
        });
    }

    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(IbdError::FrequencySum { site, sum });
    }
    Ok(())
}

fn check_genotypes(site: usize, record: &Site, policy: GenotypePolicy) -> Result<(), IbdError> {
    if policy == GenotypePolicy::MismatchOutOfRange {
        return Ok(());
    }
    let pair = record.genotypes();
    for (individual, value) in [(0, pair.first), (1, pair.second)] {
        if !record.is_active_allele(value) {
            return Err(IbdError::GenotypeOutOfRange {
                site,
                individual,
                value,
                active_alleles: record.active_alleles(),
            });
        }
    }
    Ok(())
}
