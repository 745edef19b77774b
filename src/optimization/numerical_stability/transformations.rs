//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here follow guarded strategies similar to those
//! in major ML libraries (e.g. PyTorch, TensorFlow), keeping `f64`
//! arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`PROB_EPS`]: a small ε buffer (default 1e-12) used to clamp
//!   probabilities into the open interval (0, 1) before logarithms.
//! - [`safe_logistic(x)`]: stable logistic σ(x) = 1 / (1 + exp(−x)),
//!   mapping ℝ → (0, 1) without overflow in either tail.
//! - [`clamp_probability(p)`]: clamp into `[PROB_EPS, 1 − PROB_EPS]`.
//! - [`log_sum_exp_pair(a, b)`]: stable `ln(exp(a) + exp(b))` via the
//!   maximum-subtraction trick.
//!
//! # Rationale
//! These transforms are building blocks in likelihood evaluation and
//! gradient-based fitting whenever probabilities must be kept strictly
//! inside (0, 1) and log-space sums must not underflow.

/// Clamping margin for probabilities entering a logarithm.
///
/// Sigmoid outputs can saturate to exactly 0.0 or 1.0 in `f64` for large
/// pre-activations. Clamping to `[PROB_EPS, 1 − PROB_EPS]` keeps `ln(p)`
/// and `ln(1 − p)` finite throughout likelihood evaluation.
pub const PROB_EPS: f64 = 1e-12;

/// Numerically stable logistic: `σ(x) = 1 / (1 + exp(−x))`.
///
/// Evaluates the logistic function without overflow for large `|x|`.
/// The two branches avoid computing `exp` of a large positive argument:
///
/// - For `x ≥ 0`, uses `1 / (1 + exp(−x))`.
/// - For `x < 0`, uses `exp(x) / (1 + exp(x))`.
///
/// # Parameters
/// - `x`: real input (finite).
///
/// # Returns
/// - `σ(x)` as `f64`, always within `(0, 1)` up to floating-point
///   saturation in the extreme tails.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Clamp a probability into the closed interval `[PROB_EPS, 1 − PROB_EPS]`.
///
/// Used immediately before any logarithm of `p` or `1 − p` so that
/// floating-point saturation of a sigmoid output to exactly 0.0 or 1.0
/// cannot produce `−inf` or NaN downstream.
///
/// # Parameters
/// - `p`: probability, expected in `[0, 1]`.
///
/// # Returns
/// - `p` restricted to `[PROB_EPS, 1 − PROB_EPS]`.
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(PROB_EPS, 1.0 - PROB_EPS)
}

/// Stable two-term log-sum-exp: `ln(exp(a) + exp(b))`.
///
/// Uses the maximum-subtraction trick so that the larger term is
/// exponentiated at 0 and the smaller at a non-positive argument,
/// avoiding both overflow and catastrophic underflow:
///
/// `lse(a, b) = m + ln(exp(a − m) + exp(b − m))`, `m = max(a, b)`.
///
/// Both arguments may be `−inf` (an impossible branch contributes no
/// mass); if both are `−inf` the result is `−inf`.
///
/// # Parameters
/// - `a`, `b`: log-space terms.
///
/// # Returns
/// - `ln(exp(a) + exp(b))` as `f64`.
pub fn log_sum_exp_pair(a: f64, b: f64) -> f64 {
    let m = a.max(b);
    if m == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    m + ((a - m).exp() + (b - m).exp()).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the stable transforms with naïve formulas on safe grids.
    // - Tail behavior of the logistic (bounded in (0, 1), no NaN/inf).
    // - Log-sum-exp handling of extreme and degenerate (−inf) inputs.
    //
    // They intentionally DO NOT cover:
    // - How these primitives are used inside likelihood evaluation (covered
    //   by occupancy::core::likelihood tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `safe_logistic` agrees with the naïve formula on a grid of
    // moderate inputs where the naïve formula is itself well-conditioned.
    //
    // Given
    // -----
    // - x in {-8, -3, -0.5, 0, 0.5, 3, 8}.
    //
    // Expect
    // ------
    // - |safe_logistic(x) − 1/(1 + exp(−x))| < 1e-15.
    fn safe_logistic_matches_naive_on_safe_grid() {
        for &x in &[-8.0, -3.0, -0.5, 0.0, 0.5, 3.0, 8.0] {
            let naive = 1.0 / (1.0 + (-x as f64).exp());
            assert_abs_diff_eq!(safe_logistic(x), naive, epsilon = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the logistic stays finite and inside [0, 1] in extreme tails.
    //
    // Given
    // -----
    // - x = ±1e3, where exp(x) overflows f64 in the naïve formula.
    //
    // Expect
    // ------
    // - Finite outputs, with σ(−1e3) ≈ 0 and σ(1e3) ≈ 1.
    fn safe_logistic_is_bounded_in_tails() {
        let lo = safe_logistic(-1e3);
        let hi = safe_logistic(1e3);
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo >= 0.0 && lo < 1e-100);
        assert!(hi <= 1.0 && hi > 1.0 - 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Verify `clamp_probability` restricts saturated values into the open
    // interval and leaves interior values untouched.
    //
    // Given
    // -----
    // - p in {0.0, 0.5, 1.0}.
    //
    // Expect
    // ------
    // - 0.0 → PROB_EPS, 1.0 → 1 − PROB_EPS, 0.5 unchanged.
    fn clamp_probability_bounds_saturated_values() {
        assert_eq!(clamp_probability(0.0), PROB_EPS);
        assert_eq!(clamp_probability(1.0), 1.0 - PROB_EPS);
        assert_eq!(clamp_probability(0.5), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Verify `log_sum_exp_pair` matches the naïve computation when both
    // terms are moderate.
    //
    // Given
    // -----
    // - (a, b) pairs with |a|, |b| ≤ 10.
    //
    // Expect
    // ------
    // - |lse(a, b) − ln(exp(a) + exp(b))| < 1e-12.
    fn log_sum_exp_matches_naive_on_safe_inputs() {
        for &(a, b) in &[(0.0, 0.0), (-1.0, 2.0), (-10.0, -9.5), (3.0, -3.0)] {
            let naive = ((a as f64).exp() + (b as f64).exp()).ln();
            assert_abs_diff_eq!(log_sum_exp_pair(a, b), naive, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the max-subtraction trick avoids underflow where the naïve
    // formula would return −inf, and that degenerate −inf inputs behave.
    //
    // Given
    // -----
    // - A pair of very negative terms (-800, -801), below exp underflow.
    // - Pairs with one or both terms −inf.
    //
    // Expect
    // ------
    // - lse(-800, -801) is finite and close to -800 + ln(1 + e^{-1}).
    // - lse(a, −inf) = a; lse(−inf, −inf) = −inf.
    fn log_sum_exp_survives_underflow_and_neg_inf() {
        let v = log_sum_exp_pair(-800.0, -801.0);
        assert_abs_diff_eq!(v, -800.0 + (1.0 + (-1.0f64).exp()).ln(), epsilon = 1e-12);

        assert_eq!(log_sum_exp_pair(-2.5, f64::NEG_INFINITY), -2.5);
        assert_eq!(
            log_sum_exp_pair(f64::NEG_INFINITY, f64::NEG_INFINITY),
            f64::NEG_INFINITY
        );
    }
}
