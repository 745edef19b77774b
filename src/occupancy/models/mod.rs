//! models — the network parameterization and the trainable occupancy model.
//!
//! Purpose
//! -------
//! Connect covariates to the (ψ, p) probability pair through a small
//! feed-forward network ([`OccupancyNet`]) and wrap it in a fit/predict
//! surface ([`SiteOccupancyModel`]) driven by the minibatch Adam schedule
//! from `crate::optimization`.
//!
//! Key behaviors
//! -------------
//! - Exact analytic gradients end to end: the likelihood layer supplies
//!   ∂loss/∂ψ and ∂loss/∂p, the network chains them to the flat ∂loss/∂θ.
//! - Seed-deterministic initialization, shuffling, and therefore fitting.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: `SiteOccupancyModel::new(options)`, `fit(&survey.data)`,
//!   then `predict` on a covariate grid for reporting.

pub mod network;
pub mod site_occupancy;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::network::{NetForward, OccupancyNet};
pub use self::site_occupancy::{SiteOccupancyModel, TrainOptions};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::network::OccupancyNet;
    pub use super::site_occupancy::{SiteOccupancyModel, TrainOptions};
}
