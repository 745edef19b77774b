//! rust_occupancy — neural-network-parameterized occupancy models under
//! imperfect detection.
//!
//! Purpose
//! -------
//! Simulate and fit single-season occupancy models in which both the
//! occupancy probability ψ(x) and the per-visit detection probability p(x)
//! are smooth functions of one site covariate. The latent occupancy state
//! is never observed; a site's detection count is explained either by
//! presence with imperfect detection or by true absence, and the fitted
//! likelihood marginalizes over the two.
//!
//! What lives where
//! ----------------
//! - [`occupancy`]: survey data containers, quadratic-logit ground-truth
//!   curves, the synthetic data generator, the marginal log-likelihood
//!   with analytic gradients, and the trainable
//!   [`occupancy::SiteOccupancyModel`].
//! - [`optimization`]: the Adam update, seeded minibatch scheduling,
//!   numerically stable probability transforms, and the training-side
//!   error surface.
//!
//! Quick start
//! -----------
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rust_occupancy::occupancy::{
//!     SiteOccupancyModel, SurveyDesign, TrainOptions, simulate_survey,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simulate 100 sites surveyed 20 times each from random truth curves.
//! let design = SurveyDesign::new(100, 20)?;
//! let survey = simulate_survey(&design, &mut StdRng::seed_from_u64(7))?;
//!
//! // Fit with a short schedule and inspect the fitted surfaces.
//! let options = TrainOptions { epochs: 10, ..TrainOptions::default() };
//! let mut model = SiteOccupancyModel::new(options)?;
//! model.fit(&survey.data)?;
//! let (psi_hat, p_hat) = model.predict(survey.data.x.view());
//! assert_eq!(psi_hat.len(), 100);
//! assert_eq!(p_hat.len(), 100);
//! # Ok(())
//! # }
//! ```
//!
//! Conventions
//! -----------
//! - Fallible construction everywhere: containers and schedules validate
//!   their invariants once, so inner loops run unchecked.
//! - All randomness flows from caller-supplied seeds; simulation and
//!   fitting are bit-for-bit reproducible.
//! - Progress is reported through the `log` facade; the crate performs no
//!   other I/O.

pub mod occupancy;
pub mod optimization;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_occupancy::prelude::*;
//
// to import the main crate surface in a single line.

pub mod prelude {
    pub use crate::occupancy::prelude::*;
    pub use crate::optimization::prelude::*;
}
