use super::{EmissionLikelihoods, IbdParameters};

/// Probability vector over the latent states {not IBD, IBD}.
///
/// Used both as the predictive distribution (data strictly before a site) and
/// as the filtering distribution (data up to and including it).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDistribution {
    /// Probability of state 0 (no shared segment).
    pub not_ibd: f64,
    /// Probability of state 1 (shared segment).
    pub ibd: f64,
}

impl StateDistribution {
    /// Distribution with the given IBD probability; the other entry is its complement.
    pub fn from_ibd_probability(ibd: f64) -> Self {
        Self {
            not_ibd: 1.0 - ibd,
            ibd,
        }
    }

    /// Stationary distribution `(1 - r, r)`, used before the first site.
    pub fn stationary(params: &IbdParameters) -> Self {
        Self::from_ibd_probability(params.r)
    }

    /// Sum of both entries.
    pub fn total(&self) -> f64 {
        self.not_ibd + self.ibd
    }
}

/// Site-to-site transition of the latent chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    decay: f64,
    r: f64,
}

impl Transition {
    /// Transition across `distance` (genetic distance to the next site).
    ///
    /// An infinite distance is a chromosome boundary: the chain forgets its
    /// history and reverts to the stationary distribution, also when `k = 0`.
    /// An infinite `k` resets the chain in the same way, also at distance 0.
    pub fn across(params: &IbdParameters, rho: f64, distance: f64) -> Self {
        let decay = if distance.is_infinite() || params.k.is_infinite() {
            0.0
        } else {
            (-params.k * rho * distance).exp()
        };
        Self { decay, r: params.r }
    }

    /// Probability that no recombination separates the two sites.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// `a01`: not IBD to IBD.
    pub fn not_ibd_to_ibd(&self) -> f64 {
        self.r * (1.0 - self.decay)
    }

    /// `a11`: IBD stays IBD.
    pub fn ibd_to_ibd(&self) -> f64 {
        self.r + (1.0 - self.r) * self.decay
    }

    /// `a10`: IBD to not IBD.
    pub fn ibd_to_not_ibd(&self) -> f64 {
        (1.0 - self.r) * (1.0 - self.decay)
    }

    /// `a00`: not IBD stays not IBD.
    pub fn not_ibd_to_not_ibd(&self) -> f64 {
        1.0 - self.not_ibd_to_ibd()
    }

    /// Advance a filtering distribution to the next site's predictive one.
    ///
    /// Only the IBD entry is propagated; the other is its complement so the
    /// pair sums to one exactly.
    pub fn predict(&self, filter: StateDistribution) -> StateDistribution {
        StateDistribution::from_ibd_probability(
            filter.not_ibd * self.not_ibd_to_ibd() + filter.ibd * self.ibd_to_ibd(),
        )
    }
}

/// Bayes' rule applied to one site: predictive times emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesUpdate {
    joint_not_ibd: f64,
    joint_ibd: f64,
}

impl BayesUpdate {
    /// Combine the predictive distribution with a site's emission likelihoods.
    pub fn new(predictive: StateDistribution, emission: EmissionLikelihoods) -> Self {
        Self {
            joint_not_ibd: predictive.not_ibd * emission.non_ibd,
            joint_ibd: predictive.ibd * emission.ibd,
        }
    }

    /// `P(y_t | y_<t)`, the normalizing constant of Bayes' rule.
    pub fn marginal(&self) -> f64 {
        self.joint_not_ibd + self.joint_ibd
    }

    /// Normalized filtering distribution, or `None` when the marginal is zero.
    pub fn filter(&self) -> Option<StateDistribution> {
        let marginal = self.marginal();
        if marginal > 0.0 {
            Some(StateDistribution {
                not_ibd: self.joint_not_ibd / marginal,
                ibd: self.joint_ibd / marginal,
            })
        } else {
            None
        }
    }
}
