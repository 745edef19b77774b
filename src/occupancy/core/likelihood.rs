//! Marginal log-likelihood of detection counts under imperfect detection.
//!
//! Purpose
//! -------
//! Evaluate the single-season occupancy likelihood in which the occupancy
//! state `z` is a Bernoulli latent variable observed only through the
//! detection count `y`. A positive count proves presence; a zero count is
//! ambiguous between "absent" and "present but never detected across k
//! visits", so the evaluator marginalizes over `z` in log space.
//!
//! Key behaviors
//! -------------
//! - Per-site log-likelihood with the two tagged computation paths:
//!   - `y > 0` (presence certain): `ln ψ + ln BinPMF(y; k, p)`;
//!   - `y = 0` (marginalized): `lse(ln ψ + k·ln(1−p), ln(1−ψ))` via the
//!     stable log-sum-exp — raw probabilities are never exponentiated and
//!     re-logged.
//! - Analytic ∂ℓ/∂ψ and ∂ℓ/∂p per site, using posterior responsibility
//!   weights on the marginalized branch, so the backward pass is exact.
//! - Batch reduction to the training loss: negative mean of per-site
//!   log-likelihoods, with matching per-site loss gradients.
//!
//! Invariants & assumptions
//! ------------------------
//! - ψ and p are clamped into `[PROB_EPS, 1 − PROB_EPS]` before any
//!   logarithm; the gradient is evaluated at the clamped arguments so value
//!   and derivative stay consistent.
//! - The binomial coefficient uses the log-gamma based
//!   `statrs::function::factorial::ln_binomial`, never raw factorials, so
//!   realistic `k` cannot overflow.
//! - `k` is one global constant per dataset. A per-site trial count would
//!   only require threading a vector through these signatures; it is a
//!   deliberate extension point, not supported here.
//! - Counts satisfy `y ≤ k` (enforced by [`OccupancyData`]; revalidated
//!   here because the per-site entry points are public).
//!
//! Conventions
//! -----------
//! - All routines are pure: no I/O, no logging, no global state.
//! - Batch entry points operate on `ndarray` views and return owned
//!   gradient arrays sized to the batch.
//!
//! Testing notes
//! -------------
//! - Unit tests verify both branch formulas against naïve direct
//!   computation, the total-probability law Σ_y P(y) = 1, and the analytic
//!   derivatives against central finite differences.
//!
//! [`OccupancyData`]: crate::occupancy::core::data::OccupancyData
use ndarray::{Array1, ArrayView1};
use statrs::function::factorial::ln_binomial;

use crate::occupancy::errors::{OccupancyError, OccupancyResult};
use crate::optimization::numerical_stability::{clamp_probability, log_sum_exp_pair};

/// Log of the binomial probability mass function `ln P(y | k, p)`.
///
/// Computed as `ln C(k, y) + y·ln p + (k − y)·ln(1 − p)` with the
/// log-gamma based binomial coefficient and `p` clamped away from the
/// boundaries of (0, 1).
///
/// # Arguments
/// - `y`: observed successes, `y ≤ k`.
/// - `k`: trial count.
/// - `p`: success probability (finite; clamped internally).
///
/// # Errors
/// - [`OccupancyError::InvalidProbability`] if `p` is NaN/±inf.
/// - [`OccupancyError::CountExceedsVisits`] if `y > k`.
pub fn ln_binomial_pmf(y: u64, k: u64, p: f64) -> OccupancyResult<f64> {
    if !p.is_finite() {
        return Err(OccupancyError::InvalidProbability { value: p });
    }
    if y > k {
        return Err(OccupancyError::CountExceedsVisits { index: 0, count: y, n_visits: k });
    }
    let p = clamp_probability(p);
    Ok(ln_binomial(k, y) + y as f64 * p.ln() + (k - y) as f64 * (1.0 - p).ln())
}

/// Per-site marginal log-likelihood with analytic first derivatives.
///
/// `value` is ℓ(ψ, p); `d_psi` and `d_p` are ∂ℓ/∂ψ and ∂ℓ/∂p at the
/// clamped arguments, ready for the chain rule through a sigmoid output
/// layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteLogLik {
    pub value: f64,
    pub d_psi: f64,
    pub d_p: f64,
}

/// Marginal log-likelihood of one site's detection count.
///
/// # Branches
/// - `y > 0`: presence is certain (`z = 1` is the only explanation), so
///   `ℓ = ln ψ + ln BinPMF(y; k, p)` with
///   `∂ℓ/∂ψ = 1/ψ`, `∂ℓ/∂p = y/p − (k − y)/(1 − p)`.
/// - `y = 0`: ambiguous; with `a = ln ψ + k·ln(1−p)` (present, never
///   detected) and `b = ln(1−ψ)` (truly absent),
///   `ℓ = lse(a, b)`. Writing the posterior responsibilities
///   `w_a = exp(a − ℓ)` and `w_b = exp(b − ℓ)`:
///   `∂ℓ/∂ψ = w_a/ψ − w_b/(1−ψ)`, `∂ℓ/∂p = −k·w_a/(1−p)`.
///
/// # Arguments
/// - `psi`: occupancy probability (finite; clamped internally).
/// - `p`: per-visit detection probability (finite; clamped internally).
/// - `k`: visits per site.
/// - `y`: observed detection count, `y ≤ k`.
///
/// # Errors
/// - [`OccupancyError::InvalidProbability`] if `psi` or `p` is NaN/±inf.
/// - [`OccupancyError::CountExceedsVisits`] if `y > k`.
pub fn site_log_likelihood(psi: f64, p: f64, k: u64, y: u64) -> OccupancyResult<SiteLogLik> {
    if !psi.is_finite() {
        return Err(OccupancyError::InvalidProbability { value: psi });
    }
    if !p.is_finite() {
        return Err(OccupancyError::InvalidProbability { value: p });
    }
    if y > k {
        return Err(OccupancyError::CountExceedsVisits { index: 0, count: y, n_visits: k });
    }
    let psi = clamp_probability(psi);
    let p = clamp_probability(p);

    if y > 0 {
        let value = psi.ln() + ln_binomial_pmf(y, k, p)?;
        let d_psi = 1.0 / psi;
        let d_p = y as f64 / p - (k - y) as f64 / (1.0 - p);
        return Ok(SiteLogLik { value, d_psi, d_p });
    }

    // Marginalized branch: P(y = 0) = ψ·(1−p)^k + (1−ψ), in log space.
    let log_present_undetected = psi.ln() + k as f64 * (1.0 - p).ln();
    let log_absent = (1.0 - psi).ln();
    let value = log_sum_exp_pair(log_present_undetected, log_absent);

    let w_present = (log_present_undetected - value).exp();
    let w_absent = (log_absent - value).exp();
    let d_psi = w_present / psi - w_absent / (1.0 - psi);
    let d_p = -(k as f64) * w_present / (1.0 - p);
    Ok(SiteLogLik { value, d_psi, d_p })
}

/// Batch loss and loss gradients from the marginal likelihood.
///
/// `loss` is the negative mean per-site log-likelihood; `d_psi`/`d_p` hold
/// `∂loss/∂ψᵢ` and `∂loss/∂pᵢ` for each site in the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchLogLik {
    pub loss: f64,
    pub d_psi: Array1<f64>,
    pub d_p: Array1<f64>,
}

/// Negative mean marginal log-likelihood of a batch, with gradients.
///
/// # Arguments
/// - `psi`: model occupancy probabilities, one per site in the batch.
/// - `p`: model detection probabilities, aligned with `psi`.
/// - `y`: observed detection counts, aligned with `psi`.
/// - `k`: visits per site (shared).
///
/// # Returns
/// - [`BatchLogLik`] with `loss = −(1/B)·Σ ℓᵢ` and per-site loss
///   gradients `−(1/B)·∂ℓᵢ/∂·`.
///
/// # Errors
/// - [`OccupancyError::EmptyDataset`] on an empty batch.
/// - [`OccupancyError::LengthMismatch`] if the three vectors disagree in
///   length.
/// - Propagates per-site errors from [`site_log_likelihood`].
pub fn marginal_nll(
    psi: ArrayView1<f64>, p: ArrayView1<f64>, y: ArrayView1<u64>, k: u64,
) -> OccupancyResult<BatchLogLik> {
    let n = psi.len();
    if n == 0 {
        return Err(OccupancyError::EmptyDataset);
    }
    if p.len() != n {
        return Err(OccupancyError::LengthMismatch { expected: n, actual: p.len() });
    }
    if y.len() != n {
        return Err(OccupancyError::LengthMismatch { expected: n, actual: y.len() });
    }

    let scale = -1.0 / n as f64;
    let mut loss = 0.0;
    let mut d_psi = Array1::zeros(n);
    let mut d_p = Array1::zeros(n);
    for i in 0..n {
        let site = site_log_likelihood(psi[i], p[i], k, y[i])?;
        loss += scale * site.value;
        d_psi[i] = scale * site.d_psi;
        d_p[i] = scale * site.d_p;
    }
    Ok(BatchLogLik { loss, d_psi, d_p })
}
