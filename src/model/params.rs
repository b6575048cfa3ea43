use crate::IbdError;

/// Default per-allele genotyping error rate.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Default physical recombination scale (Morgans per base pair).
pub const DEFAULT_RHO: f64 = 7.4e-7;

/// Parameters explored by an outer optimizer or sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IbdParameters {
    /// Scales the recombination decay between sites (`k >= 0`).
    pub k: f64,
    /// Stationary probability of the IBD state (`0 <= r <= 1`).
    pub r: f64,
}

impl IbdParameters {
    /// Bundle a `(k, r)` proposal. No validation happens here.
    pub fn new(k: f64, r: f64) -> Self {
        Self { k, r }
    }

    /// Whether the proposal lies in the model's domain.
    ///
    /// `k` must be non-negative (`+inf` included) and `r` must lie in
    /// `[0, 1]`. NaN in either coordinate is infeasible.
    pub fn is_feasible(&self) -> bool {
        (0.0..=1.0).contains(&self.r) && self.k >= 0.0
    }
}

/// Fixed constants of the model. These are not optimized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelConstants {
    /// Per-allele genotyping error rate, in `[0, 1)`.
    pub epsilon: f64,
    /// Physical recombination scale, finite and `> 0`.
    pub rho: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            rho: DEFAULT_RHO,
        }
    }
}

impl ModelConstants {
    /// Construct validated constants.
    pub fn new(epsilon: f64, rho: f64) -> Result<Self, IbdError> {
        let constants = Self { epsilon, rho };
        constants.validate()?;
        Ok(constants)
    }

    /// Replace the genotyping error rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Replace the recombination scale.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Check both constants against their domains.
    pub fn validate(&self) -> Result<(), IbdError> {
        check_epsilon(self.epsilon)?;
        check_rho(self.rho)
    }
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), IbdError> {
    if (0.0..1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(IbdError::InvalidConstant {
            name: "epsilon",
            value: epsilon,
        })
    }
}

pub(crate) fn check_rho(rho: f64) -> Result<(), IbdError> {
    if rho > 0.0 && rho.is_finite() {
        Ok(())
    } else {
        Err(IbdError::InvalidConstant {
            name: "rho",
            value: rho,
        })
    }
}
