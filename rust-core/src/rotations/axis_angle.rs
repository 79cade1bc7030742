use nalgebra::{Matrix3, Vector3};

use crate::error::{OrientationError, Result};
use crate::interfaces::RotationMatrix;
use crate::utils::check_len;

/// Rotation by `theta` radians about `axis` (Rodrigues' formula).
/// The axis is normalized first; a zero axis is rejected.
pub fn axis_angle_to_matrix(axis: &Vector3<f64>, theta: f64) -> Result<RotationMatrix> {
    let norm = axis.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(OrientationError::InvalidParameter(format!(
            "rotation axis must be a finite non-zero vector, got {:?}",
            axis.as_slice()
        )));
    }
    Ok(rodrigues(&(axis / norm), theta))
}

/// Batch form of [`axis_angle_to_matrix`]
pub fn axis_angle_to_matrices(axes: &[Vector3<f64>], thetas: &[f64]) -> Result<Vec<RotationMatrix>> {
    check_len("rotation angles", axes.len(), thetas.len())?;
    axes.iter()
        .zip(thetas)
        .map(|(axis, &theta)| axis_angle_to_matrix(axis, theta))
        .collect()
}

/// Rodrigues' formula for an axis that is already a unit vector
pub(crate) fn rodrigues(u: &Vector3<f64>, theta: f64) -> RotationMatrix {
    let (s, c) = theta.sin_cos();
    let t = 1.0 - c;
    let (x, y, z) = (u.x, u.y, u.z);

    Matrix3::new(
        t * x * x + c,
        t * x * y - z * s,
        t * x * z + y * s,
        t * y * x + z * s,
        t * y * y + c,
        t * y * z - x * s,
        t * z * x - y * s,
        t * z * y + x * s,
        t * z * z + c,
    )
}
