use crate::sites::Site;
use crate::IbdError;

/// Probabilistic map from a latent true allele to an observed allele.
///
/// Implementors only describe a single observation; the marginalization over
/// both latent genotypes lives in [`pairwise_marginal_likelihood`].
pub trait EmissionModel {
    /// `P(observed | truth)` at a site with `active_alleles` allele classes.
    ///
    /// `observed` may lie outside `[0, active_alleles)` when sequences are
    /// built with a permissive genotype policy.
    fn observation_probability(&self, observed: i32, truth: usize, active_alleles: usize) -> f64;

    /// Reject alphabet sizes for which the model is not a probability
    /// distribution.
    fn check_alphabet(&self, _active_alleles: usize) -> Result<(), IbdError> {
        Ok(())
    }
}

/// Symmetric genotyping-error model.
///
/// With total error probability `(n - 1) * epsilon`, an erroneous observation
/// is uniform over the `n - 1` incorrect alleles. An observed index outside
/// the active alphabet never matches, so every term takes the `epsilon` branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricErrorModel {
    epsilon: f64,
}

impl SymmetricErrorModel {
    /// Create the model for a per-allele error rate.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Error-free observations.
    pub fn exact() -> Self {
        Self::new(0.0)
    }

    /// Probability of observing the true allele.
    pub fn match_probability(&self, active_alleles: usize) -> f64 {
        1.0 - active_alleles.saturating_sub(1) as f64 * self.epsilon
    }
}

impl EmissionModel for SymmetricErrorModel {
    fn observation_probability(&self, observed: i32, truth: usize, active_alleles: usize) -> f64 {
        if usize::try_from(observed).map_or(false, |allele| allele == truth) {
            self.match_probability(active_alleles)
        } else {
            self.epsilon
        }
    }

    fn check_alphabet(&self, active_alleles: usize) -> Result<(), IbdError> {
        if self.match_probability(active_alleles) < 0.0 {
            return Err(IbdError::ErrorRateTooLarge {
                epsilon: self.epsilon,
                active_alleles,
            });
        }
        Ok(())
    }
}

/// Likelihood of one site's observed pair under each latent state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmissionLikelihoods {
    /// `P(y0, y1 | IBD = 0)`: independent latent genotypes.
    pub non_ibd: f64,
    /// `P(y0, y1 | IBD = 1)`: one latent genotype drives both observations.
    pub ibd: f64,
}

/// Marginalize both latent genotypes at `site` under `model`.
///
/// The non-IBD term is the exact double sum over allele pairs, so the cost is
/// quadratic in the active alphabet.
pub fn pairwise_marginal_likelihood<E: EmissionModel + ?Sized>(
    model: &E,
    site: &Site,
) -> EmissionLikelihoods {
    let active = site.active_alleles();
    let frequencies = site.frequencies();
    let genotypes = site.genotypes();

    let mut non_ibd = 0.0;
    for (truth, &freq) in frequencies.iter().enumerate() {
        let first = model.observation_probability(genotypes.first, truth, active);
        for (other_truth, &other_freq) in frequencies.iter().enumerate() {
            let second = model.observation_probability(genotypes.second, other_truth, active);
            non_ibd += freq * other_freq * first * second;
        }
    }

    let ibd = frequencies
        .iter()
        .enumerate()
        .map(|(truth, &freq)| {
            freq * model.observation_probability(genotypes.first, truth, active)
                * model.observation_probability(genotypes.second, truth, active)
        })
        .sum();

    EmissionLikelihoods { non_ibd, ibd }
}
