//! optimization — minibatch gradient-descent stack, numerical helpers, and
//! unified error surface.
//!
//! Purpose
//! -------
//! Provide the training layer for occupancy-model fitting: an Adam-style
//! adaptive parameter update, seeded minibatch scheduling, numerically
//! stable probability transforms, and a single error/result surface.
//! Callers supply a loss gradient per minibatch and obtain strictly
//! sequential in-place parameter updates without touching update-rule
//! internals.
//!
//! Key behaviors
//! -------------
//! - Apply moment-based adaptive updates with weight decay via
//!   [`adam::AdamState`], configured once through [`adam::AdamOptions`].
//! - Partition site indices into reproducible, optionally shuffled
//!   minibatches via [`batching::epoch_batches`].
//! - Supply shared numerical primitives ([`numerical_stability`]) for
//!   clamping probabilities and accumulating log-space sums.
//! - Normalize configuration issues and runtime numerical failures into a
//!   single enum ([`errors::OptError`]) with a common alias
//!   (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters and gradients are flat, finite `f64` vectors of matching
//!   length; violations are reported as `OptError`, not panics.
//! - Minibatches are processed in program order and parameter updates are
//!   strictly sequential; nothing in this layer introduces shared mutable
//!   state.
//! - Reproducibility contract: for a fixed seed and epoch index, the same
//!   examples land in the same minibatches.
//!
//! Conventions
//! -----------
//! - This module and its submodules avoid I/O; the model layer owns
//!   progress logging.
//! - Public entrypoints that can fail return `OptResult<T>`.
//!
//! Downstream usage
//! ----------------
//! - `occupancy::models::site_occupancy` drives the epoch loop: it asks
//!   [`batching`] for an index partition, computes per-minibatch gradients
//!   through the network/likelihood layers, and applies them with
//!   [`adam::AdamState::step`].
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: update-rule
//!   descent on a quadratic, exact-cover batching under seeds, transform
//!   agreement with naïve formulas, and error conversions.
//! - End-to-end training behavior is exercised by the integration pipeline
//!   test at the crate root.

pub mod adam;
pub mod batching;
pub mod errors;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_occupancy::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::adam::{AdamOptions, AdamState};
    pub use super::batching::epoch_batches;
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
}
