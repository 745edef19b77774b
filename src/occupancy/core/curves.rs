//! Ground-truth quadratic-logit response curves.
//!
//! A [`QuadLogitCurve`] maps a covariate `x` to a probability through a
//! quadratic polynomial on the logit scale: `σ(c₀ + c₁·x + c₂·x²)`. The
//! generator draws one such curve for occupancy (ψ) and one for detection
//! (p), shared across all sites. Fitted models never touch these curves;
//! they exist only to simulate data and to score the fit afterwards.
use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::occupancy::errors::{OccupancyError, OccupancyResult};
use crate::optimization::numerical_stability::safe_logistic;

/// A quadratic response curve on the logit scale.
///
/// Probability at covariate `x` is `σ(intercept + linear·x + quadratic·x²)`,
/// which keeps values strictly inside (0, 1) for finite inputs.
///
/// Invariant: all three coefficients finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadLogitCurve {
    pub intercept: f64,
    pub linear: f64,
    pub quadratic: f64,
}

impl QuadLogitCurve {
    /// Construct a curve from explicit coefficients.
    ///
    /// # Errors
    /// - [`OccupancyError::InvalidCurveCoefficient`] if any coefficient is
    ///   NaN/±inf.
    pub fn new(intercept: f64, linear: f64, quadratic: f64) -> OccupancyResult<Self> {
        for value in [intercept, linear, quadratic] {
            if !value.is_finite() {
                return Err(OccupancyError::InvalidCurveCoefficient { value });
            }
        }
        Ok(QuadLogitCurve { intercept, linear, quadratic })
    }

    /// Draw a curve with standard-normal coefficients.
    ///
    /// Used by the data generator; `StandardNormal` draws are always
    /// finite, so no validation is needed.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        QuadLogitCurve {
            intercept: StandardNormal.sample(rng),
            linear: StandardNormal.sample(rng),
            quadratic: StandardNormal.sample(rng),
        }
    }

    /// Linear predictor `c₀ + c₁·x + c₂·x²` at a single covariate.
    pub fn logit_at(&self, x: f64) -> f64 {
        self.intercept + self.linear * x + self.quadratic * x * x
    }

    /// Probability `σ(logit)` at a single covariate.
    pub fn probability_at(&self, x: f64) -> f64 {
        safe_logistic(self.logit_at(x))
    }

    /// Batched probabilities over a covariate vector.
    pub fn probabilities(&self, x: ArrayView1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.probability_at(xi))
    }
}

/// The pair of fixed ground-truth curves behind a simulated survey.
///
/// `psi` drives latent occupancy, `p` drives per-visit detection. Both are
/// shared across all sites (two fixed curves in x, not per-site draws).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthCurves {
    /// Occupancy-probability curve ψ(x).
    pub psi: QuadLogitCurve,
    /// Detection-probability curve p(x).
    pub p: QuadLogitCurve,
}

impl TruthCurves {
    /// Draw both curves with standard-normal coefficients.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        TruthCurves { psi: QuadLogitCurve::sample(rng), p: QuadLogitCurve::sample(rng) }
    }
}
