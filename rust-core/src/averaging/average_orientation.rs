use std::time::Instant;

use log::debug;

use crate::config::AveragingConfig;
use crate::error::{OrientationError, Result};
use crate::interfaces::RotationMatrix;
use crate::symmetries::sparse_symmetry_operators;
use crate::utils::{map_indices, selected_indices};

use super::disorientation_minimizer::refine_average;

/// Index of the operator g maximizing tr(g · M · M_refᵀ), and g · M
fn best_image(m: &RotationMatrix, reference: &RotationMatrix) -> (usize, RotationMatrix) {
    // tr(g · S) is the element-wise product of g with Sᵀ = M_ref · Mᵀ
    let s = reference * m.transpose();
    let (index, _) = sparse_symmetry_operators()
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |acc, (c, g)| {
            let t = g.trace_product(&s);
            if t > acc.1 {
                (c, t)
            } else {
                acc
            }
        });
    (index, sparse_symmetry_operators()[index].to_matrix() * m)
}

/// Bring every sample -> crystal matrix to the cubic image closest to
/// `reference`. Returns the chosen operator index and the aligned matrix.
pub fn align_to_reference(
    orientations: &[RotationMatrix],
    reference: &RotationMatrix,
) -> Vec<(usize, RotationMatrix)> {
    map_indices(orientations.len(), |i| best_image(&orientations[i], reference))
}

/// Average orientation R (crystal -> sample) of the selected measurements.
///
/// The middle selected measurement is the alignment reference. Every
/// measurement is replaced by its symmetry image closest to the reference,
/// then the aligned batch is averaged with [`refine_average`].
pub fn average_orientation(
    rotations: &[RotationMatrix],
    selection: Option<&[bool]>,
    config: &AveragingConfig,
) -> Result<RotationMatrix> {
    config.validate()?;
    let indices = selected_indices(rotations.len(), selection)?;
    if indices.is_empty() {
        return Err(OrientationError::EmptySelection(
            "no measurement selected for averaging".to_string(),
        ));
    }

    let t0 = Instant::now();
    let orientations: Vec<RotationMatrix> = indices.iter().map(|&i| rotations[i].transpose()).collect();
    let reference = orientations[orientations.len() / 2];
    let aligned: Vec<RotationMatrix> = align_to_reference(&orientations, &reference)
        .into_iter()
        .map(|(_, m)| m.transpose())
        .collect();

    let refined = refine_average(&aligned, config)?;
    debug!(
        "Averaged {} orientations (score {:.9}) in {:.2} s",
        aligned.len(),
        refined.final_score(),
        t0.elapsed().as_secs_f64()
    );
    Ok(refined.rotation)
}
