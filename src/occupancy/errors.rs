//! Errors for occupancy models (data validation, design checks, simulation,
//! and likelihood-domain violations).
//!
//! This module defines the model error type, [`OccupancyError`], used across
//! the occupancy core and model layers. It implements `Display`/`Error` and
//! converts into the optimizer-facing error surface at the fitting boundary.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/ndarray).
//! - Covariates must be **finite**; detection counts must satisfy `y ≤ k`.
//! - Probabilities entering the likelihood must be finite; clamping into
//!   (0, 1) is handled by the numerical-stability layer, so a violation here
//!   indicates a NaN/inf produced upstream.
//! - Simulation backend errors (invalid Bernoulli/Binomial parameters) are
//!   normalized to [`OccupancyError::InvalidProbability`].

/// Crate-wide result alias for occupancy operations that may produce
/// [`OccupancyError`].
pub type OccupancyResult<T> = Result<T, OccupancyError>;

/// Unified error type for occupancy modeling.
///
/// Covers input/data validation, survey-design checks, ground-truth curve
/// construction, simulation failures, and likelihood-domain violations.
/// Implements `Display`/`Error` and converts into `OptError` at the
/// optimization boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum OccupancyError {
    // ---- Input/data validation ----
    /// Dataset contains no sites.
    EmptyDataset,

    /// Covariate and count vectors (or probability vectors) differ in length.
    LengthMismatch { expected: usize, actual: usize },

    /// A covariate value is NaN/±inf.
    NonFiniteCovariate { index: usize, value: f64 },

    /// A detection count exceeds the number of survey visits.
    CountExceedsVisits { index: usize, count: u64, n_visits: u64 },

    // ---- Survey design ----
    /// Site count must be > 0.
    InvalidSiteCount { value: usize },

    /// Visits per site (binomial trial count) must be > 0.
    InvalidVisitCount { value: u64 },

    // ---- Ground-truth curves / simulation ----
    /// A quadratic-logit curve coefficient is NaN/±inf.
    InvalidCurveCoefficient { value: f64 },

    /// A probability handed to a sampler or the likelihood is outside
    /// [0, 1] or non-finite.
    InvalidProbability { value: f64 },

    // ---- Probability model ----
    /// Hidden-layer width must be > 0.
    InvalidHiddenWidth { value: usize },

    /// A flat parameter vector does not match the network layout.
    ParameterLengthMismatch { expected: usize, actual: usize },

    /// A network parameter is NaN/±inf.
    NonFiniteParameter { index: usize, value: f64 },
}

impl std::error::Error for OccupancyError {}

impl std::fmt::Display for OccupancyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            OccupancyError::EmptyDataset => {
                write!(f, "Dataset must contain at least one site.")
            }
            OccupancyError::LengthMismatch { expected, actual } => {
                write!(f, "Vector length mismatch: expected {expected}, got {actual}")
            }
            OccupancyError::NonFiniteCovariate { index, value } => {
                write!(f, "Covariate at index {index} is non-finite: {value}")
            }
            OccupancyError::CountExceedsVisits { index, count, n_visits } => {
                write!(
                    f,
                    "Detection count at index {index} ({count}) exceeds visits per site ({n_visits})"
                )
            }
            // ---- Survey design ----
            OccupancyError::InvalidSiteCount { value } => {
                write!(f, "Site count must be > 0; got: {value}")
            }
            OccupancyError::InvalidVisitCount { value } => {
                write!(f, "Visits per site must be > 0; got: {value}")
            }
            // ---- Ground-truth curves / simulation ----
            OccupancyError::InvalidCurveCoefficient { value } => {
                write!(f, "Quadratic-logit curve coefficient must be finite; got: {value}")
            }
            OccupancyError::InvalidProbability { value } => {
                write!(f, "Probability must be finite and within [0, 1]; got: {value}")
            }
            // ---- Probability model ----
            OccupancyError::InvalidHiddenWidth { value } => {
                write!(f, "Hidden-layer width must be > 0; got: {value}")
            }
            OccupancyError::ParameterLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Parameter vector length mismatch: expected {expected}, got {actual}"
                )
            }
            OccupancyError::NonFiniteParameter { index, value } => {
                write!(f, "Network parameter at index {index} is non-finite: {value}")
            }
        }
    }
}
