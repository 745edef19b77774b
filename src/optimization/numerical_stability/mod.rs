//! numerical_stability — numerically robust probability transforms.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms used across likelihood
//! evaluation and gradient-based fitting of occupancy models. This module
//! centralizes the clamping tolerance and log-space helpers so the rest of
//! the occupancy and optimization layers can assume well-conditioned `f64`
//! arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide a stable logistic (`safe_logistic`) for mapping unconstrained
//!   reals into (0, 1) without overflow in either tail.
//! - Clamp probabilities into an ε-bounded open interval
//!   (`clamp_probability`, `PROB_EPS`) before any logarithm is taken.
//! - Implement the two-term log-sum-exp (`log_sum_exp_pair`) with the
//!   maximum-subtraction trick for marginalizing latent states in log space.
//!
//! Invariants & assumptions
//! ------------------------
//! - All public transforms assume finite `f64` inputs; domain and shape
//!   validation is enforced in the occupancy and optimizer layers, not here.
//! - `PROB_EPS` is treated as the single crate-wide probability clamp so
//!   that likelihood values and gradients are computed at consistent
//!   arguments.
//!
//! Conventions
//! -----------
//! - Pure scalar helpers suitable for tight inner loops: no I/O, no
//!   logging, no allocation, no global state.
//! - Panics and `unsafe` are avoided; invalid inputs should be caught by
//!   upstream validation and surfaced as domain-specific error types.
//!
//! Downstream usage
//! ----------------
//! - `occupancy::core::likelihood` clamps model probabilities and
//!   marginalizes the latent occupancy state with `log_sum_exp_pair`.
//! - `occupancy::core::curves` and `occupancy::models::network` map logits
//!   into probabilities with `safe_logistic`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas
//!   on safe grids, tail behavior, clamping at the boundaries, and
//!   underflow-free log-sum-exp accumulation.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    PROB_EPS, clamp_probability, log_sum_exp_pair, safe_logistic,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_occupancy::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{
        PROB_EPS, clamp_probability, log_sum_exp_pair, safe_logistic,
    };
}
