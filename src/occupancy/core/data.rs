//! Validated survey data for single-season occupancy models.
//!
//! Purpose
//! -------
//! Provide the immutable dataset container consumed by the likelihood and
//! training layers: one covariate value and one aggregated detection count
//! per site, plus the shared visit count `k`. Validation happens once at
//! construction so downstream code can assume well-formed inputs.
//!
//! Key behaviors
//! -------------
//! - Construct [`OccupancyData`] from covariate and count vectors,
//!   rejecting empty datasets, length mismatches, non-finite covariates,
//!   and counts exceeding `k` with typed errors.
//! - Expose cheap accessors (`n_sites`) and read-only array views; the
//!   container is never mutated after creation — minibatching works on
//!   index lists, not on the data itself.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.len() == y.len() > 0`.
//! - Every covariate is finite; every count satisfies `y[i] ≤ n_visits`.
//! - `n_visits > 0` (checked here as well as in [`SurveyDesign`], since
//!   data may be constructed directly from field records).
//! - A count `y[i] = 0` is *ambiguous*: it is consistent with both an
//!   absent species and a present-but-undetected one. Resolving that
//!   ambiguity is the likelihood layer's job, not the data layer's.
//!
//! Conventions
//! -----------
//! - Sites are 0-indexed; simulated covariates arrive sorted ascending, but
//!   sortedness is not an invariant of this container (field data may come
//!   in any order).
//!
//! [`SurveyDesign`]: crate::occupancy::core::design::SurveyDesign
use ndarray::Array1;

use crate::occupancy::errors::{OccupancyError, OccupancyResult};

/// Immutable single-season occupancy dataset.
///
/// One row per site: covariate `x[i]` and detection count `y[i]` out of
/// `n_visits` independent survey occasions. Created once (simulated or
/// observed) and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyData {
    /// Site covariate values (finite).
    pub x: Array1<f64>,
    /// Detections per site, aggregated over visits (`y[i] ≤ n_visits`).
    pub y: Array1<u64>,
    /// Survey occasions per site; the binomial trial count.
    pub n_visits: u64,
}

impl OccupancyData {
    /// Construct a validated dataset.
    ///
    /// # Arguments
    /// - `x`: covariate values, one per site.
    /// - `y`: detection counts, one per site.
    /// - `n_visits`: shared visit count `k`.
    ///
    /// # Errors
    /// - [`OccupancyError::EmptyDataset`] if `x` is empty.
    /// - [`OccupancyError::LengthMismatch`] if `x.len() != y.len()`.
    /// - [`OccupancyError::InvalidVisitCount`] if `n_visits == 0`.
    /// - [`OccupancyError::NonFiniteCovariate`] for the first NaN/±inf
    ///   covariate encountered.
    /// - [`OccupancyError::CountExceedsVisits`] for the first count above
    ///   `n_visits`.
    pub fn new(x: Array1<f64>, y: Array1<u64>, n_visits: u64) -> OccupancyResult<Self> {
        if x.is_empty() {
            return Err(OccupancyError::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(OccupancyError::LengthMismatch { expected: x.len(), actual: y.len() });
        }
        if n_visits == 0 {
            return Err(OccupancyError::InvalidVisitCount { value: n_visits });
        }
        for (index, &value) in x.iter().enumerate() {
            if !value.is_finite() {
                return Err(OccupancyError::NonFiniteCovariate { index, value });
            }
        }
        for (index, &count) in y.iter().enumerate() {
            if count > n_visits {
                return Err(OccupancyError::CountExceedsVisits { index, count, n_visits });
            }
        }
        Ok(OccupancyData { x, y, n_visits })
    }

    /// Number of sites in the dataset.
    pub fn n_sites(&self) -> usize {
        self.x.len()
    }
}
