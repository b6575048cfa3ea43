//! Forward algorithm over the latent IBD chain.
//!
//! [`ForwardFilter`] walks the sites lazily and yields one [`SiteStep`] per
//! site; [`LikelihoodEvaluator`] accumulates the log marginals into a
//! [`LogLikelihood`].

mod filter;
mod likelihood;

pub use filter::{ForwardFilter, SiteStep};
pub use likelihood::{loglikelihood, LikelihoodEvaluator, LogLikelihood};
