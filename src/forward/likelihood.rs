use std::collections::BTreeSet;

use tracing::debug;

use super::ForwardFilter;
use crate::model::{check_rho, EmissionModel, IbdParameters, ModelConstants, SymmetricErrorModel};
use crate::sites::{SiteSequence, SiteValidation};
use crate::IbdError;

/// Log-likelihood of a pair's observations, tagged with why it may be `-inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLikelihood {
    /// Finite log-likelihood (always `<= 0`).
    Finite(f64),
    /// `(k, r)` lies outside the parameter domain.
    Infeasible,
    /// The data at `site` has probability zero under the parameters.
    ZeroProbability {
        /// First site whose marginal likelihood is zero.
        site: usize,
    },
}

impl LogLikelihood {
    /// Numeric value; `-inf` for both non-finite outcomes.
    pub fn value(&self) -> f64 {
        match self {
            LogLikelihood::Finite(value) => *value,
            LogLikelihood::Infeasible | LogLikelihood::ZeroProbability { .. } => f64::NEG_INFINITY,
        }
    }

    /// Whether the outcome carries a finite value.
    pub fn is_finite(&self) -> bool {
        matches!(self, LogLikelihood::Finite(_))
    }
}

impl From<LogLikelihood> for f64 {
    fn from(outcome: LogLikelihood) -> Self {
        outcome.value()
    }
}

/// Evaluates the log-likelihood of one pair's data for many `(k, r)` proposals.
///
/// Data and constants are validated once in the constructor. Evaluation takes
/// `&self`, keeps no cache and shares no mutable state, so one evaluator can
/// serve concurrent proposals from several threads.
#[derive(Debug, Clone)]
pub struct LikelihoodEvaluator<E = SymmetricErrorModel> {
    sites: SiteSequence,
    emission: E,
    rho: f64,
}

impl LikelihoodEvaluator<SymmetricErrorModel> {
    /// Evaluator using the symmetric genotyping-error model.
    pub fn new(sites: SiteSequence, constants: ModelConstants) -> Result<Self, IbdError> {
        constants.validate()?;
        Self::with_emission(sites, SymmetricErrorModel::new(constants.epsilon), constants.rho)
    }
}

impl<E: EmissionModel> LikelihoodEvaluator<E> {
    /// Evaluator using a custom emission model.
    pub fn with_emission(sites: SiteSequence, emission: E, rho: f64) -> Result<Self, IbdError> {
        check_rho(rho)?;
        let alphabets: BTreeSet<usize> = sites.iter().map(|site| site.active_alleles()).collect();
        for &active in &alphabets {
            emission.check_alphabet(active)?;
        }

        debug!(
            sites = sites.len(),
            max_active_alleles = sites.max_active_alleles(),
            rho,
            "likelihood evaluator ready"
        );
        Ok(Self {
            sites,
            emission,
            rho,
        })
    }

    /// Per-site forward recursion, or `None` for infeasible parameters.
    pub fn trace(&self, params: IbdParameters) -> Option<ForwardFilter<'_, E>> {
        params.is_feasible().then(|| {
            ForwardFilter::new(self.sites.sites(), &self.emission, params, self.rho)
        })
    }

    /// Log-likelihood of the whole sequence under `params`.
    ///
    /// Infeasible parameters return immediately without touching the data.
    pub fn log_likelihood(&self, params: IbdParameters) -> LogLikelihood {
        let Some(filter) = self.trace(params) else {
            return LogLikelihood::Infeasible;
        };

        let mut total = 0.0;
        for step in filter {
            if step.marginal <= 0.0 {
                debug!(site = step.site, k = params.k, r = params.r, "zero-probability site");
                return LogLikelihood::ZeroProbability { site: step.site };
            }
            total += step.log_marginal();
        }
        LogLikelihood::Finite(total)
    }
}

/// Log-likelihood of a pair's raw matrices, validated with the default
/// [`SiteValidation`].
///
/// Returns `-inf` for infeasible `(k, r)` and for zero-probability data, and an
/// error for malformed input or constants. Callers evaluating many proposals
/// on the same data should build a [`LikelihoodEvaluator`] once instead.
pub fn loglikelihood<R: AsRef<[f64]>>(
    k: f64,
    r: f64,
    genotypes: &[[i32; 2]],
    frequencies: &[R],
    distances: &[f64],
    epsilon: f64,
    rho: f64,
) -> Result<f64, IbdError> {
    let sites = SiteSequence::from_matrices(
        genotypes,
        frequencies,
        distances,
        &SiteValidation::default(),
    )?;
    let evaluator = LikelihoodEvaluator::new(sites, ModelConstants::new(epsilon, rho)?)?;
    Ok(evaluator.log_likelihood(IbdParameters::new(k, r)).value())
}
