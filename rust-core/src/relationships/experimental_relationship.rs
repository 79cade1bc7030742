use std::time::Instant;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::averaging::{average_orientation, refine_average};
use crate::config::ExperimentalOrConfig;
use crate::error::{OrientationError, Result};
use crate::interfaces::{AngleUnit, PhasePair, RotationMatrix};
use crate::misorientation::misorientation_angle;
use crate::symmetries::cubic_symmetry_operators;
use crate::utils::{check_len, map_indices, selected_indices};

/// Orientation relationship measured from parent and child pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalOr {
    /// Transformation matrix chosen for every child pixel
    pub variants: Vec<RotationMatrix>,
    /// Refined average of `variants`
    pub average: RotationMatrix,
    /// Average parent orientation R (crystal -> sample)
    pub parent_orientation: RotationMatrix,
    /// Parent-side operator index of every child pixel's variant
    pub symmetry_index: Vec<usize>,
    /// Child-side operator index of every child pixel's variant
    pub child_symmetry_index: Vec<usize>,
    /// Positions of the child pixels in the input batch
    pub child_indices: Vec<usize>,
}

impl ExperimentalOr {
    /// Angle between every pixel's variant and the average
    pub fn deviations(&self, unit: AngleUnit) -> Vec<f64> {
        self.variants
            .iter()
            .map(|v| misorientation_angle(v, &self.average, false, unit))
            .collect()
    }
}

/// Variant of one child pixel: the image `g_i · U · g_cᵀ` of `U = M_n · M_pᵀ`
/// closest to `reference`. Returns (variant, c, i).
fn closest_variant(u: &RotationMatrix, reference: &RotationMatrix) -> (RotationMatrix, usize, usize) {
    let ops = cubic_symmetry_operators();
    let reference_t = reference.transpose();
    let mut best = (*u, 0, 0);
    let mut best_trace = f64::NEG_INFINITY;
    for (i, gi) in ops.iter().enumerate() {
        let left = gi * u;
        for (c, gc) in ops.iter().enumerate() {
            let candidate = left * gc.transpose();
            let trace = (candidate * reference_t).trace();
            if trace > best_trace {
                best_trace = trace;
                best = (candidate, c, i);
            }
        }
    }
    best
}

/// Orientation relationship between the parent and child phases of a batch.
///
/// The parent orientation is averaged first. Each child pixel then yields the
/// transformation `M_n · M_pᵀ` in its symmetry image closest to that of the
/// first child pixel, and these are averaged into the relationship.
pub fn experimental_orientation_relationship(
    rotations: &[RotationMatrix],
    phases: &[u8],
    phase_pair: PhasePair,
    selection: Option<&[bool]>,
    config: &ExperimentalOrConfig,
) -> Result<ExperimentalOr> {
    let n = rotations.len();
    check_len("phase labels", n, phases.len())?;
    let selected = selected_indices(n, selection)?;

    let parent_mask: Vec<bool> = {
        let mut mask = vec![false; n];
        for &i in selected.iter().filter(|&&i| phases[i] == phase_pair.parent) {
            mask[i] = true;
        }
        mask
    };
    if !parent_mask.iter().any(|&keep| keep) {
        return Err(OrientationError::EmptySelection(format!(
            "no selected pixel with parent phase {}",
            phase_pair.parent
        )));
    }
    let child_indices: Vec<usize> = selected
        .into_iter()
        .filter(|&i| phases[i] == phase_pair.child)
        .collect();
    if child_indices.is_empty() {
        return Err(OrientationError::EmptySelection(format!(
            "no selected pixel with child phase {}",
            phase_pair.child
        )));
    }

    let t0 = Instant::now();
    let parent_orientation = average_orientation(rotations, Some(&parent_mask), &config.averaging)?;
    // U = M_n · M_pᵀ = R_nᵀ · R_p
    let transformations: Vec<RotationMatrix> = child_indices
        .iter()
        .map(|&i| rotations[i].transpose() * parent_orientation)
        .collect();
    let reference = transformations[0];

    let chosen = map_indices(transformations.len(), |k| {
        closest_variant(&transformations[k], &reference)
    });
    let mut variants = Vec::with_capacity(chosen.len());
    let mut symmetry_index = Vec::with_capacity(chosen.len());
    let mut child_symmetry_index = Vec::with_capacity(chosen.len());
    for (v, c, i) in chosen {
        variants.push(v);
        symmetry_index.push(c);
        child_symmetry_index.push(i);
    }

    let average = refine_average(&variants, &config.averaging)?.rotation;
    debug!(
        "Experimental relationship from {} child pixels: {:.2} s",
        variants.len(),
        t0.elapsed().as_secs_f64()
    );

    Ok(ExperimentalOr {
        variants,
        average,
        parent_orientation,
        symmetry_index,
        child_symmetry_index,
        child_indices,
    })
}
