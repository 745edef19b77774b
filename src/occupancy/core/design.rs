//! Survey design (n sites, k visits) for single-season occupancy models.
//!
//! A design fixes the number of spatial survey locations `n` and the number
//! of repeated visits `k` per site. Counts aggregate the k visits, so `k`
//! is the binomial trial count in the detection model. `k` is a single
//! global constant shared by all sites; per-site visit counts are a
//! deliberate extension point, not supported here.
use crate::occupancy::errors::{OccupancyError, OccupancyResult};

/// Dimensions of a single-season occupancy survey.
///
/// - `n_sites`: number of survey locations (> 0).
/// - `n_visits`: independent survey occasions per site (> 0); the binomial
///   trial count for detection counts.
///
/// Invariant: both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyDesign {
    pub n_sites: usize,
    pub n_visits: u64,
}

impl SurveyDesign {
    /// Construct a [`SurveyDesign`] and validate its dimensions.
    ///
    /// # Invariants
    /// - `n_sites > 0`: at least one site is required for simulation and
    ///   fitting.
    /// - `n_visits > 0`: a binomial count over zero trials carries no
    ///   detection information.
    ///
    /// # Errors
    /// - [`OccupancyError::InvalidSiteCount`] if `n_sites == 0`.
    /// - [`OccupancyError::InvalidVisitCount`] if `n_visits == 0`.
    ///
    /// # Rationale
    /// Guarding here fails fast on degenerate designs so the generator and
    /// training loop can assume `n ≥ 1` and `k ≥ 1` throughout.
    pub fn new(n_sites: usize, n_visits: u64) -> OccupancyResult<Self> {
        if n_sites == 0 {
            return Err(OccupancyError::InvalidSiteCount { value: n_sites });
        }
        if n_visits == 0 {
            return Err(OccupancyError::InvalidVisitCount { value: n_visits });
        }
        Ok(SurveyDesign { n_sites, n_visits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that `SurveyDesign::new` accepts positive dimensions and
    // stores them unchanged.
    //
    // Given
    // -----
    // - n_sites = 100, n_visits = 20.
    //
    // Expect
    // ------
    // - `Ok(SurveyDesign)` with matching fields.
    fn design_accepts_positive_dimensions() {
        let design = SurveyDesign::new(100, 20).expect("positive dimensions should validate");
        assert_eq!(design.n_sites, 100);
        assert_eq!(design.n_visits, 20);
    }

    #[test]
    // Purpose
    // -------
    // Ensure degenerate designs are rejected with the documented variants.
    //
    // Given
    // -----
    // - n_sites = 0, and n_visits = 0.
    //
    // Expect
    // ------
    // - `InvalidSiteCount` and `InvalidVisitCount` respectively.
    fn design_rejects_zero_dimensions() {
        assert!(matches!(
            SurveyDesign::new(0, 20),
            Err(OccupancyError::InvalidSiteCount { value: 0 })
        ));
        assert!(matches!(
            SurveyDesign::new(100, 0),
            Err(OccupancyError::InvalidVisitCount { value: 0 })
        ));
    }
}
