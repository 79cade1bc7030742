use nalgebra::Vector3;

use crate::error::{OrientationError, Result};
use crate::interfaces::RotationMatrix;

/// Crystal direction parallel to the sample direction `d`, as a unit vector:
/// uvw = R^T d / |R^T d|.
pub fn ipf_direction(r: &RotationMatrix, sample_direction: &Vector3<f64>) -> Result<Vector3<f64>> {
    let uvw = r.transpose() * sample_direction;
    let norm = uvw.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(OrientationError::InvalidParameter(
            "sample direction must be a finite non-zero vector".to_string(),
        ));
    }
    Ok(uvw / norm)
}

/// [`ipf_direction`] for every rotation of a batch
pub fn ipf_directions(
    rotations: &[RotationMatrix],
    sample_direction: &Vector3<f64>,
) -> Result<Vec<Vector3<f64>>> {
    rotations
        .iter()
        .map(|r| ipf_direction(r, sample_direction))
        .collect()
}

/// Sample normal direction (ND), the default inverse pole figure axis
pub fn normal_direction() -> Vector3<f64> {
    Vector3::z()
}
