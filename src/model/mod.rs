//! Two-state IBD model: parameters, emission likelihoods and the latent chain.
//!
//! Nothing here knows how sites are stored; the recursion in
//! [`forward`](crate::forward) wires these stages together site by site.

mod chain;
mod emission;
mod params;

pub use chain::{BayesUpdate, StateDistribution, Transition};
pub use emission::{
    pairwise_marginal_likelihood, EmissionLikelihoods, EmissionModel, SymmetricErrorModel,
};
pub use params::{IbdParameters, ModelConstants, DEFAULT_EPSILON, DEFAULT_RHO};

pub(crate) use params::check_rho;
