//! core — shared occupancy data, ground-truth curves, simulation, and the
//! marginal likelihood.
//!
//! Purpose
//! -------
//! Collect the core building blocks for single-season occupancy models:
//! survey designs, validated datasets, quadratic-logit ground-truth curves,
//! the synthetic data generator, and the marginal log-likelihood under
//! imperfect detection. Model and training layers build on top of these
//! primitives.
//!
//! Key behaviors
//! -------------
//! - Define survey configuration and data types ([`SurveyDesign`],
//!   [`OccupancyData`]) validated once at construction.
//! - Encapsulate the generative ground truth ([`QuadLogitCurve`],
//!   [`TruthCurves`]) and the simulator ([`simulate_survey`],
//!   [`simulate_from_truth`]).
//! - Implement the marginal likelihood with analytic first derivatives
//!   ([`site_log_likelihood`], [`marginal_nll`], [`ln_binomial_pmf`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Datasets passed between modules are validated: finite covariates,
//!   `y ≤ k`, `k > 0`, non-empty.
//! - Probabilities entering a logarithm are clamped via the
//!   numerical-stability layer; the likelihood never sees exact 0 or 1.
//! - Simulation and fitting share no code path: true ψ/p values exist only
//!   on the generator's output for later comparison.
//!
//! Conventions
//! -----------
//! - This module avoids I/O and logging; it operates purely on `ndarray`
//!   containers and scalar values. Error conditions are reported via
//!   `OccupancyResult`.
//!
//! Downstream usage
//! ----------------
//! - Experiment code constructs a [`SurveyDesign`], simulates a
//!   [`SimulatedSurvey`], and hands `survey.data` to
//!   `occupancy::models::SiteOccupancyModel::fit`.
//! - The training loop calls [`marginal_nll`] per minibatch; reporting code
//!   compares fitted curves against `survey.truth`.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover construction-time validation, branch
//!   formulas and the total-probability law of the likelihood,
//!   finite-difference gradient agreement, and seed-deterministic
//!   simulation.

pub mod curves;
pub mod data;
pub mod design;
pub mod likelihood;
pub mod simulate;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::curves::{QuadLogitCurve, TruthCurves};
pub use self::data::OccupancyData;
pub use self::design::SurveyDesign;
pub use self::likelihood::{
    BatchLogLik, SiteLogLik, ln_binomial_pmf, marginal_nll, site_log_likelihood,
};
pub use self::simulate::{SimulatedSurvey, simulate_from_truth, simulate_survey};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_occupancy::occupancy::core::prelude::*;
//
// to import the main occupancy core surface in a single line.

pub mod prelude {
    pub use super::curves::{QuadLogitCurve, TruthCurves};
    pub use super::data::OccupancyData;
    pub use super::design::SurveyDesign;
    pub use super::likelihood::{BatchLogLik, marginal_nll, site_log_likelihood};
    pub use super::simulate::{SimulatedSurvey, simulate_from_truth, simulate_survey};
}
