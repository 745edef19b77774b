//! adam — adaptive moment-based parameter updates with weight decay.
//!
//! Purpose
//! -------
//! Implement the Adam update rule used by the minibatch training loop:
//! exponentially decayed first/second gradient moments with bias
//! correction, plus an L2 weight-decay term folded into the raw gradient
//! before the moment update.
//!
//! Key behaviors
//! -------------
//! - Validate hyper-parameters once at construction ([`AdamOptions::new`])
//!   so the inner loop can assume well-formed settings.
//! - Maintain per-parameter moment buffers in [`AdamState`] sized to the
//!   flat parameter vector; [`AdamState::step`] applies one in-place update.
//! - Reject dimension mismatches and non-finite gradient elements with
//!   typed errors instead of propagating NaNs into the parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - One `AdamState` is bound to one parameter vector length for its whole
//!   lifetime; the step counter `t` counts successful updates only.
//! - Updates are strictly sequential; the state is not shared across
//!   threads.
//!
//! Conventions
//! -----------
//! - Parameters and gradients are flat `ndarray::Array1<f64>` vectors in
//!   the network's layout; this module is agnostic to that layout.
//! - Weight decay follows the classic Adam-with-L2 convention:
//!   `g ← g + λ·θ` before the moment update (the reference-optimizer
//!   behavior for small λ such as 1e-8).
//!
//! Downstream usage
//! ----------------
//! - `occupancy::models::site_occupancy` constructs one `AdamState` per
//!   `fit` call and applies `step` once per minibatch.
//!
//! Testing notes
//! -------------
//! - Unit tests cover hyper-parameter validation, dimension/finiteness
//!   errors, and convergence on a simple quadratic objective.

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

use crate::optimization::errors::{OptError, OptResult};

/// Hyper-parameters for the Adam update.
///
/// Fields:
/// - `learning_rate`: step size (finite, > 0).
/// - `beta1`, `beta2`: first/second moment decay rates in [0, 1).
/// - `epsilon`: denominator fuzz (finite, > 0).
/// - `weight_decay`: L2 coefficient folded into the gradient (finite, ≥ 0).
///
/// Default: `learning_rate = 1e-3`, `beta1 = 0.9`, `beta2 = 0.999`,
/// `epsilon = 1e-8`, `weight_decay = 1e-8`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamOptions {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    pub weight_decay: f64,
}

impl AdamOptions {
    /// Construct validated Adam hyper-parameters.
    ///
    /// # Errors
    /// - [`OptError::InvalidLearningRate`] if `learning_rate` is non-finite
    ///   or ≤ 0.
    /// - [`OptError::InvalidBeta`] if either decay rate lies outside [0, 1)
    ///   or is non-finite.
    /// - [`OptError::InvalidEpsilon`] if `epsilon` is non-finite or ≤ 0.
    /// - [`OptError::InvalidWeightDecay`] if `weight_decay` is non-finite
    ///   or < 0.
    pub fn new(
        learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64, weight_decay: f64,
    ) -> OptResult<Self> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(OptError::InvalidLearningRate { value: learning_rate });
        }
        for beta in [beta1, beta2] {
            if !beta.is_finite() || !(0.0..1.0).contains(&beta) {
                return Err(OptError::InvalidBeta {
                    value: beta,
                    reason: "Moment-decay coefficients must lie in [0, 1).",
                });
            }
        }
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(OptError::InvalidEpsilon { value: epsilon });
        }
        if !weight_decay.is_finite() || weight_decay < 0.0 {
            return Err(OptError::InvalidWeightDecay { value: weight_decay });
        }
        Ok(AdamOptions { learning_rate, beta1, beta2, epsilon, weight_decay })
    }
}

impl Default for AdamOptions {
    fn default() -> Self {
        AdamOptions {
            learning_rate: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            weight_decay: 1e-8,
        }
    }
}

/// Mutable optimizer state: moment buffers and the update counter.
///
/// Owns first-moment (`m`) and second-moment (`v`) accumulators matching
/// the flat parameter vector, plus the bias-correction step count `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdamState {
    options: AdamOptions,
    m: Array1<f64>,
    v: Array1<f64>,
    t: u64,
}

impl AdamState {
    /// Create a fresh state for a parameter vector of length `dim`.
    ///
    /// Moment buffers start at zero and `t = 0`, so the first step applies
    /// full bias correction.
    pub fn new(options: AdamOptions, dim: usize) -> AdamState {
        AdamState { options, m: Array1::zeros(dim), v: Array1::zeros(dim), t: 0 }
    }

    /// Number of successful updates applied so far.
    pub fn steps_taken(&self) -> u64 {
        self.t
    }

    /// Apply one Adam update to `theta` in place.
    ///
    /// # Steps
    /// 1. Check `grad.len() == theta.len() == dim` and gradient finiteness.
    /// 2. Fold weight decay into the gradient: `g ← g + λ·θ`.
    /// 3. Update biased moments `m`, `v`; bias-correct with `t`.
    /// 4. `θ ← θ − lr · m̂ / (√v̂ + ε)`.
    ///
    /// # Arguments
    /// - `theta`: flat parameter vector, updated in place.
    /// - `grad`: loss gradient `∂L/∂θ` at the current `theta`.
    ///
    /// # Errors
    /// - [`OptError::GradientDimMismatch`] on any length disagreement.
    /// - [`OptError::InvalidGradient`] if a gradient element is NaN/±inf;
    ///   the parameters are left untouched in that case.
    pub fn step(
        &mut self, mut theta: ArrayViewMut1<f64>, grad: ArrayView1<f64>,
    ) -> OptResult<()> {
        let dim = self.m.len();
        if theta.len() != dim {
            return Err(OptError::GradientDimMismatch { expected: dim, found: theta.len() });
        }
        if grad.len() != dim {
            return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
        }
        for (index, &value) in grad.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidGradient { index, value });
            }
        }

        let AdamOptions { learning_rate, beta1, beta2, epsilon, weight_decay } = self.options;
        self.t += 1;
        let bias1 = 1.0 - beta1.powi(self.t as i32);
        let bias2 = 1.0 - beta2.powi(self.t as i32);

        for i in 0..dim {
            let g = grad[i] + weight_decay * theta[i];
            self.m[i] = beta1 * self.m[i] + (1.0 - beta1) * g;
            self.v[i] = beta2 * self.v[i] + (1.0 - beta2) * g * g;
            let m_hat = self.m[i] / bias1;
            let v_hat = self.v[i] / bias2;
            theta[i] -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
        }
        Ok(())
    }
}
