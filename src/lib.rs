//! # Pairwise IBD log-likelihood via the forward algorithm
//!
//! Computes the log-likelihood of two individuals' observed genotypes under a
//! two-state hidden Markov model of identity by descent (IBD).
//!
//! ## Model
//!
//! 1. **Latent chain**: `IBD_t ∈ {0, 1}` starts from `(1 - r, r)` and moves
//!    between sites with a transition matrix that decays with genetic distance,
//!    `exp(-k · rho · gendist_t)`.
//! 2. **Latent genotypes**: independent draws from the site's allele
//!    frequencies when not IBD, one shared draw when IBD.
//! 3. **Observations**: each latent allele is observed through a symmetric
//!    genotyping-error model with per-allele rate `epsilon`.
//!
//! Both latent genotypes are summed out exactly at every site, and the chain is
//! filtered forward one site at a time.
//!
//! ## Usage Example
//!
//! ```
//! use ibd_hmm::{IbdParameters, LikelihoodEvaluator, ModelConstants, SiteSequence, SiteValidation};
//!
//! let sites = SiteSequence::from_matrices(
//!     &[[0, 0], [0, 0]],
//!     &[[0.6, 0.4], [0.6, 0.4]],
//!     &[0.01, 0.0],
//!     &SiteValidation::default(),
//! )?;
//! let evaluator = LikelihoodEvaluator::new(sites, ModelConstants::default())?;
//!
//! let outcome = evaluator.log_likelihood(IbdParameters::new(1.0, 0.01));
//! assert!(outcome.value() < 0.0);
//! # Ok::<(), ibd_hmm::IbdError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

mod error;
pub mod forward; // Forward recursion and log-likelihood accumulation
pub mod model; // Parameters, emission model, latent chain
pub mod sites; // Validated observation data

pub use error::IbdError;
pub use forward::{loglikelihood, ForwardFilter, LikelihoodEvaluator, LogLikelihood, SiteStep};
pub use model::{
    pairwise_marginal_likelihood, EmissionLikelihoods, EmissionModel, IbdParameters,
    ModelConstants, StateDistribution, SymmetricErrorModel, Transition,
};
pub use sites::{GenotypePair, GenotypePolicy, Site, SiteSequence, SiteValidation};
