use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::AveragingConfig;
use crate::error::{OrientationError, Result};
use crate::interfaces::{EulerConvention, GimbalLockPolicy, RotationMatrix};
use crate::rotations::euler_angles::{euler_to_matrix, matrix_to_euler, EulerAngles};
use crate::utils::map_indices;

/// Refined rotation and the score after each round.
///
/// `scores[0]` is the score of the starting estimate, followed by one entry per
/// iteration. The history never decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisorientationMinimization {
    pub rotation: RotationMatrix,
    pub scores: Vec<f64>,
}

impl DisorientationMinimization {
    /// Score of the returned rotation
    pub fn final_score(&self) -> f64 {
        self.scores.last().copied().unwrap_or(0.0)
    }
}

/// Mean of |tr(V_n · Xᵀ)| over the batch; 3 means every member equals `x`
pub fn alignment_score(rotations: &[RotationMatrix], x: &RotationMatrix) -> f64 {
    if rotations.is_empty() {
        return 0.0;
    }
    let xt = x.transpose();
    rotations
        .iter()
        .map(|v| (v * xt).trace().abs())
        .sum::<f64>()
        / rotations.len() as f64
}

/// `n` evenly spaced values over [-half_width, half_width].
/// A single point sits at the center.
fn grid_axis(half_width: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }
    let step = 2.0 * half_width / (n - 1) as f64;
    (0..n).map(|k| -half_width + k as f64 * step).collect()
}

/// Perturbation rotations of one round, xyz convention, phi outermost
fn perturbations(half_width: f64, n: usize) -> Vec<RotationMatrix> {
    let axis = grid_axis(half_width, n);
    let mut out = Vec::with_capacity(n * n * n);
    for &phi in &axis {
        for &theta in &axis {
            for &psi in &axis {
                out.push(euler_to_matrix(
                    &EulerAngles::new(theta, phi, psi),
                    EulerConvention::Xyz,
                ));
            }
        }
    }
    out
}

/// Shrinking-grid search for the rotation closest on average to `rotations`.
///
/// Each round tries every perturbation `A · V0` of the current estimate `V0`
/// on a `grid_size`³ grid of xyz angles in [-max_deviation, max_deviation],
/// keeps the best candidate (the unperturbed estimate included) and divides
/// the half-width by `grid_size`.
pub fn minimize_disorientation(
    rotations: &[RotationMatrix],
    initial: &RotationMatrix,
    config: &AveragingConfig,
) -> Result<DisorientationMinimization> {
    config.validate()?;
    if rotations.is_empty() {
        return Err(OrientationError::EmptySelection(
            "no rotations to minimize the disorientation against".to_string(),
        ));
    }

    let mut estimate = *initial;
    let mut best = alignment_score(rotations, &estimate);
    let mut scores = Vec::with_capacity(config.iterations + 1);
    scores.push(best);
    let mut half_width = config.max_deviation;

    for iteration in 0..config.iterations {
        let grid = perturbations(half_width, config.grid_size);
        let candidates: Vec<f64> = map_indices(grid.len(), |k| {
            alignment_score(rotations, &(grid[k] * estimate))
        });

        let (k, score) = candidates
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |acc, (k, &s)| if s > acc.1 { (k, s) } else { acc });
        // Strict improvement only, so ties keep the current estimate
        if score > best {
            estimate = grid[k] * estimate;
            best = score;
        }
        scores.push(best);

        debug!(
            "Refinement iteration {}: score {:.9}, half-width {:.3e} rad",
            iteration + 1,
            best,
            half_width
        );
        half_width /= config.grid_size as f64;
    }

    Ok(DisorientationMinimization {
        rotation: estimate,
        scores,
    })
}

/// Average of a batch that is already aligned to a common symmetry image.
///
/// The seed comes from the Euler angles (zxz) of the element-wise mean matrix,
/// which is then refined with [`minimize_disorientation`].
pub fn refine_average(
    rotations: &[RotationMatrix],
    config: &AveragingConfig,
) -> Result<DisorientationMinimization> {
    if rotations.is_empty() {
        return Err(OrientationError::EmptySelection(
            "cannot average an empty set of rotations".to_string(),
        ));
    }
    let mean = rotations.iter().sum::<RotationMatrix>() / rotations.len() as f64;
    if mean.determinant() < 1e-3 {
        warn!(
            "Mean of {} rotations is nearly singular (det {:.2e}); is the batch symmetry-aligned?",
            rotations.len(),
            mean.determinant()
        );
    }
    let seed_angles = matrix_to_euler(&mean, EulerConvention::Zxz, GimbalLockPolicy::Collapse)?;
    let seed = euler_to_matrix(&seed_angles, EulerConvention::Zxz);
    minimize_disorientation(rotations, &seed, config)
}
