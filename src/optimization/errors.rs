//! Errors for the minibatch training stack (configuration validation,
//! gradient checks, and runtime numerical failures).
//!
//! This module defines [`OptError`], the single error surface callers see
//! when fitting a model. Likelihood- and data-level failures raised inside
//! the training loop are carried through the [`OptError::Model`] variant via
//! `From<OccupancyError>`, so `fit` returns one error type.

use crate::occupancy::errors::OccupancyError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

/// Unified error type for minibatch gradient-descent training.
///
/// Covers hyper-parameter validation (Adam settings, batch sizing),
/// dimension checks between parameters and gradients, and terminal
/// numerical failures observed during training.
#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Adam hyper-parameters ----
    /// Learning rate must be finite and > 0.
    InvalidLearningRate { value: f64 },

    /// Moment-decay coefficients must lie in [0, 1).
    InvalidBeta { value: f64, reason: &'static str },

    /// Denominator epsilon must be finite and > 0.
    InvalidEpsilon { value: f64 },

    /// Weight decay must be finite and ≥ 0.
    InvalidWeightDecay { value: f64 },

    // ---- Batching / schedule ----
    /// Minibatch size must be > 0.
    InvalidBatchSize { batch_size: usize },

    /// Minibatch size must not exceed the number of sites.
    BatchExceedsSites { batch_size: usize, n_sites: usize },

    // ---- Gradient / parameter checks ----
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64 },

    // ---- Runtime numerical failures ----
    /// The minibatch loss came back NaN/±inf; training is aborted.
    NonFiniteLoss { epoch: usize, batch: usize, value: f64 },

    // ---- Model / likelihood layer ----
    /// Wrapper for errors raised by the occupancy data, curve, or
    /// likelihood layers during training.
    Model(OccupancyError),
}

impl std::error::Error for OptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Adam hyper-parameters ----
            OptError::InvalidLearningRate { value } => {
                write!(f, "Learning rate must be finite and > 0; got: {value}")
            }
            OptError::InvalidBeta { value, reason } => {
                write!(f, "Invalid moment-decay coefficient {value}: {reason}")
            }
            OptError::InvalidEpsilon { value } => {
                write!(f, "Adam epsilon must be finite and > 0; got: {value}")
            }
            OptError::InvalidWeightDecay { value } => {
                write!(f, "Weight decay must be finite and >= 0; got: {value}")
            }

            // ---- Batching / schedule ----
            OptError::InvalidBatchSize { batch_size } => {
                write!(f, "Minibatch size must be > 0; got: {batch_size}")
            }
            OptError::BatchExceedsSites { batch_size, n_sites } => {
                write!(
                    f,
                    "Minibatch size ({batch_size}) must not exceed the number of sites ({n_sites})"
                )
            }

            // ---- Gradient / parameter checks ----
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value } => {
                write!(f, "Gradient element at index {index} is non-finite: {value}")
            }

            // ---- Runtime numerical failures ----
            OptError::NonFiniteLoss { epoch, batch, value } => {
                write!(
                    f,
                    "Non-finite minibatch loss at epoch {epoch}, batch {batch}: {value}"
                )
            }

            // ---- Model / likelihood layer ----
            OptError::Model(err) => {
                write!(f, "Model error during training: {err}")
            }
        }
    }
}

impl From<OccupancyError> for OptError {
    fn from(err: OccupancyError) -> Self {
        OptError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the `From<OccupancyError>` conversion and Display
    // formatting of representative optimizer errors. Behavior of the
    // validations that *produce* these errors lives with the modules that
    // perform them (adam, batching, site_occupancy).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that occupancy-layer errors wrap into `OptError::Model` and
    // keep their message visible through Display.
    //
    // Given
    // -----
    // - An `OccupancyError::EmptyDataset`.
    //
    // Expect
    // ------
    // - `OptError::from` yields `Model(EmptyDataset)` and the rendered
    //   message contains the inner description.
    fn occupancy_error_wraps_into_model_variant() {
        let err: OptError = OccupancyError::EmptyDataset.into();
        assert_eq!(err, OptError::Model(OccupancyError::EmptyDataset));
        assert!(err.to_string().contains("at least one site"));
    }

    #[test]
    // Purpose
    // -------
    // Ensure runtime failures render epoch/batch coordinates, which is what
    // an operator needs to locate a diverging run.
    //
    // Given
    // -----
    // - `NonFiniteLoss { epoch: 7, batch: 2, value: NaN }`.
    //
    // Expect
    // ------
    // - The message names epoch 7 and batch 2.
    fn non_finite_loss_reports_coordinates() {
        let msg = OptError::NonFiniteLoss { epoch: 7, batch: 2, value: f64::NAN }.to_string();
        assert!(msg.contains("epoch 7"));
        assert!(msg.contains("batch 2"));
    }
}
