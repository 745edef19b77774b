//! Feed-forward response-curve approximator: 1 → H (ELU) → 2 (sigmoid).
//!
//! Purpose
//! -------
//! Map one covariate to the probability pair (ψ, p) ∈ (0, 1)² with a small
//! differentiable network: a single hidden layer of width H with the
//! exponential-linear activation, a linear projection to two outputs, and a
//! sigmoid on each head. The network is a stateless function of its input
//! given the current flat parameter vector θ.
//!
//! Key behaviors
//! -------------
//! - Batched forward evaluation over a covariate vector, caching hidden
//!   pre-activations and activations for the backward pass
//!   ([`OccupancyNet::forward`], [`NetForward`]).
//! - Exact reverse-mode gradients: [`OccupancyNet::backward`] consumes
//!   ∂L/∂ψ and ∂L/∂p per site and returns the flat ∂L/∂θ, chaining through
//!   the sigmoid heads, the linear projection, and the ELU.
//! - Glorot-uniform initialization from a caller-supplied RNG
//!   ([`OccupancyNet::init`]) and reconstruction from an explicit θ for
//!   warm starts and gradient checking ([`OccupancyNet::from_theta`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - θ layout is fixed: `(w1[0..H), b1[0..H), w2_psi[0..H), w2_p[0..H),
//!   b2_psi, b2_p)`, total length `4H + 2`. All layers index into this one
//!   vector, which is what the optimizer updates in place.
//! - `backward` must be called with the same covariates and cache produced
//!   by the matching `forward`; gradients are exact for that pairing.
//! - Sigmoid outputs lie in (0, 1) up to floating-point saturation; the
//!   likelihood layer clamps before taking logarithms.
//!
//! Conventions
//! -----------
//! - Pure numerics: no I/O, no logging, no interior mutability. The only
//!   mutation point is `theta_mut`, used by the training loop.
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, s};
use rand::Rng;

use crate::occupancy::errors::{OccupancyError, OccupancyResult};
use crate::optimization::numerical_stability::safe_logistic;

/// Exponential-linear unit with α = 1.
fn elu(a: f64) -> f64 {
    if a > 0.0 { a } else { a.exp_m1() }
}

/// Derivative of the ELU; equals `exp(a)` on the negative branch.
fn elu_deriv(a: f64) -> f64 {
    if a > 0.0 { 1.0 } else { a.exp() }
}

/// Cached forward-pass quantities for one covariate batch.
///
/// `psi` and `p` are the network outputs; the hidden-layer caches exist
/// solely so [`OccupancyNet::backward`] can replay the chain rule without
/// recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct NetForward {
    /// Occupancy probabilities, one per input covariate.
    pub psi: Array1<f64>,
    /// Detection probabilities, one per input covariate.
    pub p: Array1<f64>,
    hidden_pre: Array2<f64>,
    hidden_act: Array2<f64>,
}

/// One-covariate feed-forward network parameterizing (ψ, p).
///
/// Owns the flat parameter vector θ; hidden width is fixed at
/// construction. Evaluation is batched and differentiable end-to-end via
/// the manual backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyNet {
    hidden: usize,
    theta: Array1<f64>,
}

impl OccupancyNet {
    /// Flat parameter count for a given hidden width: `4H + 2`.
    pub fn n_params(hidden: usize) -> usize {
        4 * hidden + 2
    }

    /// Initialize with Glorot-uniform weights and zero biases.
    ///
    /// Weight limits are `√(6 / (fan_in + fan_out))` per layer: the hidden
    /// layer sees fan-in 1, the output heads fan-in H.
    ///
    /// # Errors
    /// - [`OccupancyError::InvalidHiddenWidth`] if `hidden == 0`.
    pub fn init<R: Rng + ?Sized>(hidden: usize, rng: &mut R) -> OccupancyResult<Self> {
        if hidden == 0 {
            return Err(OccupancyError::InvalidHiddenWidth { value: hidden });
        }
        let mut theta = Array1::zeros(Self::n_params(hidden));
        let lim_hidden = (6.0 / (1.0 + hidden as f64)).sqrt();
        let lim_out = (6.0 / (hidden as f64 + 2.0)).sqrt();
        for i in 0..hidden {
            theta[i] = rng.gen_range(-lim_hidden..=lim_hidden);
        }
        for i in 2 * hidden..4 * hidden {
            theta[i] = rng.gen_range(-lim_out..=lim_out);
        }
        Ok(OccupancyNet { hidden, theta })
    }

    /// Reconstruct a network from an explicit flat parameter vector.
    ///
    /// Used for warm starts and finite-difference gradient checks.
    ///
    /// # Errors
    /// - [`OccupancyError::InvalidHiddenWidth`] if `hidden == 0`.
    /// - [`OccupancyError::ParameterLengthMismatch`] if
    ///   `theta.len() != 4·hidden + 2`.
    /// - [`OccupancyError::NonFiniteParameter`] for the first NaN/±inf
    ///   entry.
    pub fn from_theta(hidden: usize, theta: Array1<f64>) -> OccupancyResult<Self> {
        if hidden == 0 {
            return Err(OccupancyError::InvalidHiddenWidth { value: hidden });
        }
        let expected = Self::n_params(hidden);
        if theta.len() != expected {
            return Err(OccupancyError::ParameterLengthMismatch {
                expected,
                actual: theta.len(),
            });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OccupancyError::NonFiniteParameter { index, value });
            }
        }
        Ok(OccupancyNet { hidden, theta })
    }

    /// Hidden-layer width H.
    pub fn hidden_width(&self) -> usize {
        self.hidden
    }

    /// Read-only view of the flat parameter vector.
    pub fn theta(&self) -> ArrayView1<f64> {
        self.theta.view()
    }

    /// Mutable view of the flat parameter vector; the optimizer's update
    /// target.
    pub fn theta_mut(&mut self) -> ArrayViewMut1<f64> {
        self.theta.view_mut()
    }

    /// Batched forward pass: covariates → (ψ, p) plus hidden caches.
    ///
    /// For each input `x`: `aⱼ = w1ⱼ·x + b1ⱼ`, `hⱼ = elu(aⱼ)`,
    /// `ψ = σ(w2_psi·h + b2_psi)`, `p = σ(w2_p·h + b2_p)`.
    pub fn forward(&self, x: ArrayView1<f64>) -> NetForward {
        let n = x.len();
        let h = self.hidden;
        let w1 = self.theta.slice(s![0..h]);
        let b1 = self.theta.slice(s![h..2 * h]);
        let w2_psi = self.theta.slice(s![2 * h..3 * h]);
        let w2_p = self.theta.slice(s![3 * h..4 * h]);
        let b2_psi = self.theta[4 * h];
        let b2_p = self.theta[4 * h + 1];

        let mut hidden_pre = Array2::zeros((n, h));
        let mut hidden_act = Array2::zeros((n, h));
        let mut psi = Array1::zeros(n);
        let mut p = Array1::zeros(n);
        for i in 0..n {
            let mut logit_psi = b2_psi;
            let mut logit_p = b2_p;
            for j in 0..h {
                let pre = w1[j] * x[i] + b1[j];
                let act = elu(pre);
                hidden_pre[[i, j]] = pre;
                hidden_act[[i, j]] = act;
                logit_psi += w2_psi[j] * act;
                logit_p += w2_p[j] * act;
            }
            psi[i] = safe_logistic(logit_psi);
            p[i] = safe_logistic(logit_p);
        }
        NetForward { psi, p, hidden_pre, hidden_act }
    }

    /// Exact reverse-mode pass: loss gradients w.r.t. (ψ, p) → ∂L/∂θ.
    ///
    /// # Arguments
    /// - `x`: the covariates used in the matching `forward` call.
    /// - `cache`: the [`NetForward`] produced by that call.
    /// - `d_psi`, `d_p`: per-site `∂L/∂ψᵢ` and `∂L/∂pᵢ`.
    ///
    /// # Returns
    /// - Flat gradient vector in the θ layout, summed over the batch.
    ///
    /// # Errors
    /// - [`OccupancyError::LengthMismatch`] if `x`, the cache, and the
    ///   gradient vectors disagree in length.
    pub fn backward(
        &self, x: ArrayView1<f64>, cache: &NetForward, d_psi: ArrayView1<f64>,
        d_p: ArrayView1<f64>,
    ) -> OccupancyResult<Array1<f64>> {
        let n = x.len();
        let h = self.hidden;
        if cache.psi.len() != n {
            return Err(OccupancyError::LengthMismatch { expected: n, actual: cache.psi.len() });
        }
        if d_psi.len() != n {
            return Err(OccupancyError::LengthMismatch { expected: n, actual: d_psi.len() });
        }
        if d_p.len() != n {
            return Err(OccupancyError::LengthMismatch { expected: n, actual: d_p.len() });
        }

        let w2_psi = self.theta.slice(s![2 * h..3 * h]);
        let w2_p = self.theta.slice(s![3 * h..4 * h]);

        let mut grad = Array1::zeros(Self::n_params(h));
        for i in 0..n {
            // Chain through the sigmoid heads: ∂L/∂logit = ∂L/∂prob · σ'(logit).
            let du = d_psi[i] * cache.psi[i] * (1.0 - cache.psi[i]);
            let dv = d_p[i] * cache.p[i] * (1.0 - cache.p[i]);
            grad[4 * h] += du;
            grad[4 * h + 1] += dv;
            for j in 0..h {
                let act = cache.hidden_act[[i, j]];
                grad[2 * h + j] += du * act;
                grad[3 * h + j] += dv * act;
                let d_act = du * w2_psi[j] + dv * w2_p[j];
                let d_pre = d_act * elu_deriv(cache.hidden_pre[[i, j]]);
                grad[j] += d_pre * x[i];
                grad[h + j] += d_pre;
            }
        }
        Ok(grad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::core::likelihood::marginal_nll;
    use approx::assert_abs_diff_eq;
    use finitediff::FiniteDiff;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter layout and construction-time validation.
    // - Range/shape invariants of the forward pass.
    // - The full backward pass against central finite differences through
    //   the marginal likelihood (the exact composition used in training).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the parameter count and `from_theta` validation.
    //
    // Given
    // -----
    // - Hidden width 8 (34 parameters) and several invalid θ vectors.
    //
    // Expect
    // ------
    // - `n_params(8) == 34`; wrong lengths, zero width, and NaN entries
    //   map to their documented errors.
    fn construction_validates_layout() {
        assert_eq!(OccupancyNet::n_params(8), 34);
        assert!(OccupancyNet::from_theta(8, Array1::zeros(34)).is_ok());
        assert!(matches!(
            OccupancyNet::from_theta(8, Array1::zeros(33)),
            Err(OccupancyError::ParameterLengthMismatch { expected: 34, actual: 33 })
        ));
        assert!(matches!(
            OccupancyNet::from_theta(0, Array1::zeros(2)),
            Err(OccupancyError::InvalidHiddenWidth { value: 0 })
        ));
        let mut theta = Array1::zeros(34);
        theta[5] = f64::INFINITY;
        assert!(matches!(
            OccupancyNet::from_theta(8, theta),
            Err(OccupancyError::NonFiniteParameter { index: 5, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify forward-pass shapes and the (0, 1) range of both heads.
    //
    // Given
    // -----
    // - A seeded width-16 network evaluated on five covariates in [-1, 1].
    //
    // Expect
    // ------
    // - Output vectors of length 5 with every ψ, p strictly inside (0, 1).
    fn forward_outputs_are_probabilities() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(3);
        let net = OccupancyNet::init(16, &mut rng).expect("valid width");
        let x = array![-1.0, -0.5, 0.0, 0.5, 1.0];

        // Act
        let out = net.forward(x.view());

        // Assert
        assert_eq!(out.psi.len(), 5);
        assert_eq!(out.p.len(), 5);
        for i in 0..5 {
            assert!(out.psi[i] > 0.0 && out.psi[i] < 1.0);
            assert!(out.p[i] > 0.0 && out.p[i] < 1.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the composed backward pass (likelihood gradients chained
    // through the network) against central finite differences of the
    // scalar loss as a function of the flat θ.
    //
    // Given
    // -----
    // - A seeded width-6 network, six sites with mixed zero/positive
    //   counts, k = 12.
    //
    // Expect
    // ------
    // - Analytic ∂L/∂θ agrees with `finitediff` central differences within
    //   1e-5 in every coordinate.
    fn backward_matches_finite_differences_through_loss() {
        // Arrange
        let hidden = 6;
        let mut rng = StdRng::seed_from_u64(21);
        let net = OccupancyNet::init(hidden, &mut rng).expect("valid width");
        let x = array![-0.9, -0.4, -0.1, 0.2, 0.6, 1.0];
        let y = array![0u64, 3, 0, 7, 0, 12];
        let k = 12u64;

        let loss_at = |theta: &Vec<f64>| -> f64 {
            let net = OccupancyNet::from_theta(hidden, Array1::from(theta.clone()))
                .expect("layout-compatible theta");
            let out = net.forward(x.view());
            marginal_nll(out.psi.view(), out.p.view(), y.view(), k)
                .expect("valid batch")
                .loss
        };

        // Act
        let out = net.forward(x.view());
        let batch = marginal_nll(out.psi.view(), out.p.view(), y.view(), k).expect("valid batch");
        let analytic = net
            .backward(x.view(), &out, batch.d_psi.view(), batch.d_p.view())
            .expect("aligned shapes");
        let theta_vec: Vec<f64> = net.theta().to_vec();
        let numeric = theta_vec.central_diff(&loss_at);

        // Assert
        assert_eq!(analytic.len(), numeric.len());
        for i in 0..analytic.len() {
            assert_abs_diff_eq!(analytic[i], numeric[i], epsilon = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure `backward` rejects gradient vectors that do not match the
    // batch produced by `forward`.
    //
    // Given
    // -----
    // - A two-site forward cache and a three-element ∂L/∂ψ.
    //
    // Expect
    // ------
    // - `LengthMismatch { expected: 2, actual: 3 }`.
    fn backward_rejects_misaligned_gradients() {
        let mut rng = StdRng::seed_from_u64(5);
        let net = OccupancyNet::init(4, &mut rng).expect("valid width");
        let x = array![0.0, 0.5];
        let out = net.forward(x.view());
        let err = net
            .backward(x.view(), &out, array![0.0, 0.0, 0.0].view(), array![0.0, 0.0].view())
            .unwrap_err();
        assert!(matches!(err, OccupancyError::LengthMismatch { expected: 2, actual: 3 }));
    }
}
