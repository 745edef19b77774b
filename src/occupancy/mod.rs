//! occupancy — single-season occupancy modeling under imperfect detection.
//!
//! Purpose
//! -------
//! Everything specific to the occupancy problem lives here: validated
//! survey data, quadratic-logit ground-truth curves and the synthetic data
//! generator, the marginal log-likelihood that integrates out the latent
//! occupancy state, and the network-parameterized model with its training
//! surface.
//!
//! Layout
//! ------
//! - [`errors`]: the occupancy error type and result alias.
//! - [`core`]: data containers, truth curves, simulation, likelihood.
//! - [`models`]: the feed-forward (ψ, p) network and
//!   [`models::SiteOccupancyModel`].
//!
//! The schedule- and optimizer-level machinery (Adam, batching, numerical
//! stability helpers) lives in `crate::optimization` and is shared rather
//! than occupancy-specific.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    OccupancyData, QuadLogitCurve, SimulatedSurvey, SurveyDesign, TruthCurves, marginal_nll,
    simulate_from_truth, simulate_survey,
};
pub use self::errors::{OccupancyError, OccupancyResult};
pub use self::models::{OccupancyNet, SiteOccupancyModel, TrainOptions};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{OccupancyError, OccupancyResult};
    pub use super::models::prelude::*;
}
