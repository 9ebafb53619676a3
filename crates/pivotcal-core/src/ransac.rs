//! Generic, model-agnostic RANSAC engine.
//!
//! To use this module, implement the [`Estimator`] trait for your model and
//! call [`ransac_fit`] with a slice of input data and an explicit
//! [`RansacConfig`].
//!
//! Each trial draws a minimal random subset, fits a candidate, and scores it
//! against the FULL data set. The winner is the candidate with the largest
//! consensus set, ties broken by the candidate's own fit quality, and is
//! refit once over its entire consensus set before being returned. The
//! comparison is order-independent, so splitting trials across workers would
//! select the same winner.
//!
//! All failure modes are explicit [`RansacError`] values; this engine does
//! not panic on bad input.

use log::debug;
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration parameters for the RANSAC engine.
///
/// There is deliberately no `Default` impl: each field changes the estimate,
/// so callers must state all three explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RansacConfig {
    /// Number of random subsets to try.
    pub num_iterations: usize,
    /// Maximum per-datum residual to count as an inlier, in the same units
    /// as [`Estimator::residual`].
    pub inlier_threshold: f64,
    /// Minimum inlier fraction (inliers / total data) required to accept a
    /// model, in `(0, 1]`.
    pub min_consensus_fraction: f64,
}

impl RansacConfig {
    fn validate(&self) -> Result<(), RansacError> {
        if self.num_iterations == 0 {
            return Err(RansacError::InvalidConfig("num_iterations must be at least 1"));
        }
        if !self.inlier_threshold.is_finite() || self.inlier_threshold <= 0.0 {
            return Err(RansacError::InvalidConfig(
                "inlier_threshold must be positive and finite",
            ));
        }
        if !(self.min_consensus_fraction > 0.0 && self.min_consensus_fraction <= 1.0) {
            return Err(RansacError::InvalidConfig(
                "min_consensus_fraction must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Errors raised by [`ransac_fit`].
#[derive(Debug, Error)]
pub enum RansacError {
    /// Configuration value out of range.
    #[error("invalid RANSAC config: {0}")]
    InvalidConfig(&'static str),
    /// Fewer data points than the estimator's minimal sample size.
    #[error("need at least {need} samples, got {got}")]
    InsufficientData {
        /// Number of data points supplied.
        got: usize,
        /// Minimal sample size of the estimator.
        need: usize,
    },
    /// No candidate model reached the required consensus fraction.
    #[error("no candidate reached consensus fraction {required} (best {best_fraction:.3})")]
    ConsensusNotReached {
        /// Best inlier fraction seen over all trials.
        best_fraction: f64,
        /// The configured `min_consensus_fraction`.
        required: f64,
    },
}

/// Output of a successful RANSAC run.
#[derive(Debug, Clone)]
pub struct RansacResult<M> {
    /// Winning model, refit over its full consensus set.
    pub model: M,
    /// Indices of the winning candidate's consensus set.
    pub inliers: Vec<usize>,
    /// `inliers.len() / data.len()`.
    pub inlier_fraction: f64,
    /// Number of trials performed.
    pub iterations: usize,
}

/// Generic estimator for RANSAC-like methods.
pub trait Estimator {
    /// One input sample.
    type Datum;
    /// The fitted model.
    type Model;

    /// Minimal number of samples needed to fit a model.
    const MIN_SAMPLES: usize;

    /// Fit a model from a subset of data indices.
    ///
    /// Return `None` if the subset is degenerate or fitting fails.
    fn fit(data: &[Self::Datum], sample_indices: &[usize]) -> Option<Self::Model>;

    /// Residual for one datum. Must be a non-negative scalar in the same
    /// units as `RansacConfig::inlier_threshold`.
    fn residual(model: &Self::Model, datum: &Self::Datum) -> f64;

    /// Deterministic tie-break key for candidates with equal consensus
    /// counts; lower wins.
    fn model_quality(model: &Self::Model) -> f64;

    /// Optional degeneracy check on the sample subset before fitting.
    fn is_degenerate(_data: &[Self::Datum], _sample_indices: &[usize]) -> bool {
        false
    }

    /// Optional refit over the winning consensus set.
    ///
    /// Default: keep the subset model.
    fn refit(_data: &[Self::Datum], _inliers: &[usize]) -> Option<Self::Model> {
        None
    }
}

fn is_better_candidate(
    new_inlier_count: usize,
    new_quality: f64,
    best_inlier_count: usize,
    best_quality: f64,
) -> bool {
    new_inlier_count > best_inlier_count
        || (new_inlier_count == best_inlier_count && new_quality < best_quality)
}

/// Run the RANSAC loop for a given [`Estimator`] implementation.
///
/// With `seed == Some(s)` the run is bit-reproducible; with `None` the RNG
/// is seeded from OS entropy.
pub fn ransac_fit<E: Estimator>(
    data: &[E::Datum],
    config: &RansacConfig,
    seed: Option<u64>,
) -> Result<RansacResult<E::Model>, RansacError> {
    config.validate()?;

    if data.len() < E::MIN_SAMPLES {
        return Err(RansacError::InsufficientData {
            got: data.len(),
            need: E::MIN_SAMPLES,
        });
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let all_indices: Vec<usize> = (0..data.len()).collect();
    let mut sample_idxs = vec![0usize; E::MIN_SAMPLES];

    // (model, consensus set, tie-break quality) of the best candidate so far.
    let mut best: Option<(E::Model, Vec<usize>, f64)> = None;

    for iter in 0..config.num_iterations {
        all_indices
            .as_slice()
            .choose_multiple(&mut rng, E::MIN_SAMPLES)
            .enumerate()
            .for_each(|(k, &idx)| sample_idxs[k] = idx);

        if E::is_degenerate(data, &sample_idxs) {
            debug!("trial {iter}: degenerate sample, skipped");
            continue;
        }

        let Some(model) = E::fit(data, &sample_idxs) else {
            debug!("trial {iter}: fit failed, skipped");
            continue;
        };

        let mut inliers = Vec::with_capacity(data.len());
        for (i, datum) in data.iter().enumerate() {
            if E::residual(&model, datum) <= config.inlier_threshold {
                inliers.push(i);
            }
        }

        let quality = E::model_quality(&model);
        debug!(
            "trial {iter}: {} / {} inliers, quality {quality:.6}",
            inliers.len(),
            data.len()
        );

        let better = match &best {
            None => true,
            Some((_, best_inliers, best_quality)) => {
                is_better_candidate(inliers.len(), quality, best_inliers.len(), *best_quality)
            }
        };
        if better {
            best = Some((model, inliers, quality));
        }
    }

    let Some((model, inliers, _)) = best else {
        // Every trial failed to fit; nothing to report a fraction for.
        return Err(RansacError::ConsensusNotReached {
            best_fraction: 0.0,
            required: config.min_consensus_fraction,
        });
    };

    let inlier_fraction = inliers.len() as f64 / data.len() as f64;
    if inlier_fraction < config.min_consensus_fraction {
        return Err(RansacError::ConsensusNotReached {
            best_fraction: inlier_fraction,
            required: config.min_consensus_fraction,
        });
    }

    let model = E::refit(data, &inliers).unwrap_or(model);

    Ok(RansacResult {
        model,
        inliers,
        inlier_fraction,
        iterations: config.num_iterations,
    })
}
