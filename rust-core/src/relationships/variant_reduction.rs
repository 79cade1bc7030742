use log::debug;

use crate::config::{ReductionConfig, VariantSelection};
use crate::interfaces::RotationMatrix;
use crate::misorientation::misorientation_trace;

/// Whether two transformations are equal up to a cubic operator on the left
fn equivalent(a: &RotationMatrix, b: &RotationMatrix, threshold: f64) -> bool {
    misorientation_trace(b, a, true) >= threshold
}

/// Drop symmetry-redundant transformation matrices.
///
/// Two matrices are equivalent when `max_g |tr(g · V_i · V_jᵀ)|` reaches the
/// trace equivalent of `config.tolerance_deg`. Which member of each class is
/// kept depends on `config.selection`; output order follows input order.
pub fn reduce_cubic_transformations(
    transformations: &[RotationMatrix],
    config: &ReductionConfig,
) -> Vec<RotationMatrix> {
    let threshold = config.trace_threshold();
    let n = transformations.len();

    let kept: Vec<RotationMatrix> = match config.selection {
        // i survives when nothing after it is equivalent
        VariantSelection::SourceRule => (0..n)
            .filter(|&i| {
                !((i + 1)..n).any(|j| equivalent(&transformations[i], &transformations[j], threshold))
            })
            .map(|i| transformations[i])
            .collect(),
        VariantSelection::FirstOfClass => {
            let mut kept: Vec<RotationMatrix> = Vec::new();
            for v in transformations {
                if !kept.iter().any(|k| equivalent(k, v, threshold)) {
                    kept.push(*v);
                }
            }
            kept
        }
    };

    debug!(
        "Reduced {} transformations to {} distinct variants",
        n,
        kept.len()
    );
    kept
}
