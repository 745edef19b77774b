//! Synthetic single-season occupancy surveys from known response curves.
//!
//! Purpose
//! -------
//! Generate datasets with known ground truth for fitting experiments:
//! covariates uniform on [-1, 1], latent occupancy from a quadratic-logit
//! ψ curve, and detection counts from a quadratic-logit p curve over `k`
//! independent visits.
//!
//! Key behaviors
//! -------------
//! - [`simulate_survey`] draws fresh ground-truth curves, then delegates to
//!   [`simulate_from_truth`]; the split lets evaluation code resample
//!   held-out replicates from the *same* generative process.
//! - Latent occupancy `z ~ Bernoulli(ψ(x))` per site; counts
//!   `y ~ Binomial(k, p(x))` when `z = 1` and identically 0 when `z = 0` —
//!   the structural encoding of "cannot detect an absent species".
//! - Covariates are sorted ascending before any site-level sampling, so a
//!   fixed seed fully determines the `(x, z, y)` sequences.
//!
//! Invariants & assumptions
//! ------------------------
//! - ψ(x), p(x) come from sigmoids of finite logits and therefore lie
//!   strictly inside (0, 1); sampler-construction failures are mapped to
//!   [`OccupancyError::InvalidProbability`] rather than unwrapped.
//! - Pure functional sampling: the only side effect is entropy consumption
//!   from the caller's RNG.
//! - The generator and the fitting procedure share no code path: true
//!   ψ/p values are used only here, and `z` is retained on the output for
//!   diagnostics only. Nothing in the training loop reads them.
//!
//! Conventions
//! -----------
//! - The RNG is caller-supplied (`R: Rng + ?Sized`); seeding is the
//!   caller's responsibility, which keeps experiments reproducible.
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Bernoulli, Binomial, Distribution};

use crate::occupancy::core::curves::TruthCurves;
use crate::occupancy::core::data::OccupancyData;
use crate::occupancy::core::design::SurveyDesign;
use crate::occupancy::errors::{OccupancyError, OccupancyResult};

/// A simulated survey together with its generative ground truth.
///
/// `data` is what a fitting procedure is allowed to see. The remaining
/// fields exist so reporting code can compare estimates against the truth;
/// the training loop must never consume them.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedSurvey {
    /// Observable dataset: covariates, counts, and the visit count k.
    pub data: OccupancyData,
    /// The fixed ψ/p curves the survey was drawn from.
    pub truth: TruthCurves,
    /// True occupancy probability ψ(x[i]) per site.
    pub psi_true: Array1<f64>,
    /// True detection probability p(x[i]) per site.
    pub p_true: Array1<f64>,
    /// Latent occupancy states; diagnostics only, never used in fitting.
    pub z: Array1<bool>,
}

/// Simulate a survey after drawing fresh standard-normal ground-truth
/// curves.
///
/// # Arguments
/// - `design`: validated survey dimensions (n sites, k visits).
/// - `rng`: random source; a fixed seed reproduces the survey exactly.
///
/// # Returns
/// - A [`SimulatedSurvey`] with sorted covariates and validated data.
///
/// # Errors
/// - Propagates [`OccupancyError`] from data construction or sampler
///   setup; with a validated design these paths are not expected to fire.
pub fn simulate_survey<R: Rng + ?Sized>(
    design: &SurveyDesign, rng: &mut R,
) -> OccupancyResult<SimulatedSurvey> {
    let truth = TruthCurves::sample(rng);
    simulate_from_truth(design, &truth, rng)
}

/// Simulate a survey from fixed ground-truth curves.
///
/// # Steps
/// 1. Draw `n` covariates uniformly from [-1, 1] and sort ascending.
/// 2. Evaluate ψ(x) and p(x) through the stable logistic.
/// 3. Per site: `z ~ Bernoulli(ψ)`; `y ~ Binomial(k, p)` if `z`, else 0.
/// 4. Package counts and covariates into a validated [`OccupancyData`].
///
/// # Arguments
/// - `design`: validated survey dimensions.
/// - `truth`: the fixed ψ/p curves to sample from.
/// - `rng`: random source.
///
/// # Errors
/// - [`OccupancyError::InvalidProbability`] if a sampler rejects a
///   probability (unreachable for sigmoid outputs, mapped rather than
///   unwrapped).
/// - Propagates [`OccupancyError`] from [`OccupancyData::new`].
pub fn simulate_from_truth<R: Rng + ?Sized>(
    design: &SurveyDesign, truth: &TruthCurves, rng: &mut R,
) -> OccupancyResult<SimulatedSurvey> {
    let n = design.n_sites;
    let k = design.n_visits;

    let mut covariates: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..=1.0)).collect();
    covariates.sort_by(f64::total_cmp);
    let x = Array1::from(covariates);

    let psi_true = truth.psi.probabilities(x.view());
    let p_true = truth.p.probabilities(x.view());

    let mut z = Array1::from_elem(n, false);
    let mut y = Array1::<u64>::zeros(n);
    for i in 0..n {
        let occupied = Bernoulli::new(psi_true[i])
            .map_err(|_| OccupancyError::InvalidProbability { value: psi_true[i] })?
            .sample(rng);
        z[i] = occupied;
        y[i] = if occupied {
            Binomial::new(k, p_true[i])
                .map_err(|_| OccupancyError::InvalidProbability { value: p_true[i] })?
                .sample(rng)
        } else {
            // Absent species cannot be detected: y is deterministically 0.
            0
        };
    }

    let data = OccupancyData::new(x, y, k)?;
    Ok(SimulatedSurvey { data, truth: *truth, psi_true, p_true, z })
}
