use std::iter::FusedIterator;

use tracing::trace;

use crate::model::{
    pairwise_marginal_likelihood, BayesUpdate, EmissionLikelihoods, EmissionModel, IbdParameters,
    StateDistribution, Transition,
};
use crate::sites::Site;

/// Everything the recursion computed at one site.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteStep {
    /// Site index (0-based).
    pub site: usize,
    /// State distribution given data strictly before this site.
    pub predictive: StateDistribution,
    /// Likelihood of the observed pair under each state.
    pub emission: EmissionLikelihoods,
    /// `P(y_t | y_<t)`.
    pub marginal: f64,
    /// State distribution given data up to this site.
    ///
    /// `None` at the last site, where no prediction follows, and at a site
    /// with zero marginal, where the recursion stops.
    pub filter: Option<StateDistribution>,
}

impl SiteStep {
    /// Natural log of the marginal; `-inf` for a zero-probability site.
    pub fn log_marginal(&self) -> f64 {
        self.marginal.ln()
    }

    /// Filtered probability that the pair is IBD at this site.
    pub fn ibd_posterior(&self) -> Option<f64> {
        self.filter.map(|filter| filter.ibd)
    }
}

/// Lazy forward recursion over a slice of sites.
///
/// Each step consumes the predictive distribution produced by the previous
/// one; nothing is mutated in place. The iterator ends after the last site or
/// right after a site whose marginal likelihood is zero.
#[derive(Debug, Clone)]
pub struct ForwardFilter<'a, E> {
    sites: &'a [Site],
    emission: &'a E,
    params: IbdParameters,
    rho: f64,
    position: usize,
    predictive: Option<StateDistribution>,
}

impl<'a, E: EmissionModel> ForwardFilter<'a, E> {
    /// Start the recursion from the stationary distribution `(1 - r, r)`.
    ///
    /// `params` is assumed feasible; see [`IbdParameters::is_feasible`].
    pub fn new(sites: &'a [Site], emission: &'a E, params: IbdParameters, rho: f64) -> Self {
        Self {
            sites,
            emission,
            params,
            rho,
            position: 0,
            predictive: Some(StateDistribution::stationary(&params)),
        }
    }
}

impl<'a, E: EmissionModel> Iterator for ForwardFilter<'a, E> {
    type Item = SiteStep;

    fn next(&mut self) -> Option<SiteStep> {
        let site = self.sites.get(self.position)?;
        let predictive = self.predictive.take()?;
        let index = self.position;
        self.position += 1;

        let emission = pairwise_marginal_likelihood(self.emission, site);
        let update = BayesUpdate::new(predictive, emission);
        let marginal = update.marginal();

        let has_next = self.position < self.sites.len();
        let filter = if has_next { update.filter() } else { None };
        if let Some(filter) = filter {
            let transition = Transition::across(&self.params, self.rho, site.distance_to_next());
            self.predictive = Some(transition.predict(filter));
        }

        trace!(
            site = index,
            marginal,
            ibd_posterior = filter.map(|f| f.ibd),
            "forward step"
        );

        Some(SiteStep {
            site: index,
            predictive,
            emission,
            marginal,
            filter,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.predictive.is_none() {
            return (0, Some(0));
        }
        let remaining = self.sites.len() - self.position;
        (remaining.min(1), Some(remaining))
    }
}

impl<'a, E: EmissionModel> FusedIterator for ForwardFilter<'a, E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymmetricErrorModel;
    use crate::sites::GenotypePair;

    fn sites(rows: &[([i32; 2], [f64; 2], f64)]) -> Vec<Site> {
        rows.iter()
            .map(|(pair, freqs, dist)| Site::new(GenotypePair::from(*pair), freqs, *dist))
            .collect()
    }

    #[test]
    fn single_site_has_no_filter() {
        let data = sites(&[([0, 0], [0.5, 0.5], 0.0)]);
        let model = SymmetricErrorModel::exact();
        let steps: Vec<_> =
            ForwardFilter::new(&data, &model, IbdParameters::new(1.0, 0.3), 7.4e-7).collect();

        assert_eq!(steps.len(), 1);
        let step = steps[0];
        assert_eq!(step.predictive, StateDistribution::from_ibd_probability(0.3));
        assert!((step.marginal - 0.325).abs() < 1e-15);
        assert_eq!(step.filter, None);
        assert_eq!(step.ibd_posterior(), None);
    }

    #[test]
    fn predictive_follows_previous_filter() {
        let data = sites(&[
            ([0, 0], [0.6, 0.4], 1.0e5),
            ([1, 1], [0.6, 0.4], 0.0),
        ]);
        let model = SymmetricErrorModel::new(0.001);
        let params = IbdParameters::new(2.0, 0.1);
        let steps: Vec<_> = ForwardFilter::new(&data, &model, params, 7.4e-7).collect();

        assert_eq!(steps.len(), 2);
        let filter = steps[0].filter.expect("not the last site");
        let expected = Transition::across(&params, 7.4e-7, 1.0e5).predict(filter);
        assert_eq!(steps[1].predictive, expected);
        // Evidence of sharing at site 0 pulls the posterior above the prior.
        assert_eq!(steps[0].ibd_posterior(), Some(filter.ibd));
        assert!(filter.ibd > 0.1);
        assert_eq!(steps[1].ibd_posterior(), None);
    }

    #[test]
    fn zero_marginal_stops_the_recursion() {
        let data = sites(&[
            ([0, 1], [0.5, 0.5], 1.0),
            ([0, 0], [0.5, 0.5], 1.0),
            ([0, 0], [0.5, 0.5], 0.0),
        ]);
        let model = SymmetricErrorModel::exact();
        // r = 1: always IBD, and a mismatch under IBD is impossible without errors.
        let mut filter = ForwardFilter::new(&data, &model, IbdParameters::new(1.0, 1.0), 7.4e-7);

        let step = filter.next().expect("first site is evaluated");
        assert_eq!(step.marginal, 0.0);
        assert_eq!(step.log_marginal(), f64::NEG_INFINITY);
        assert_eq!(step.filter, None);
        assert_eq!(filter.next(), None);
        assert_eq!(filter.next(), None);
    }

    #[test]
    fn size_hint_tracks_remaining_sites() {
        let data = sites(&[
            ([0, 0], [0.5, 0.5], 1.0),
            ([0, 0], [0.5, 0.5], 0.0),
        ]);
        let model = SymmetricErrorModel::exact();
        let mut filter = ForwardFilter::new(&data, &model, IbdParameters::new(1.0, 0.5), 1.0);
        assert_eq!(filter.size_hint(), (1, Some(2)));
        filter.next();
        assert_eq!(filter.size_hint(), (1, Some(1)));
        filter.next();
        assert_eq!(filter.size_hint(), (0, Some(0)));
    }
}
