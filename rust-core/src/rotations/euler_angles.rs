use std::f64::consts::{FRAC_PI_2, PI};

use log::debug;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::averaging::refine_average;
use crate::config::{AveragingConfig, GIMBAL_LOCK_TOLERANCE, SENTINEL_TOLERANCE, UNINDEXED_ANGLE};
use crate::error::{OrientationError, Result};
use crate::interfaces::{EulerConvention, GimbalLockPolicy, RotationMatrix};
use crate::utils::{check_len, map_indices, wrap_two_pi};

/// Euler triple (phi1, Phi, phi2) in radians.
///
/// The value 4.0 in any component marks an unindexed measurement and is
/// carried through untouched; see [`EulerAngles::is_unindexed`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub phi1: f64,
    /// Capital Phi
    pub phi: f64,
    pub phi2: f64,
}

impl EulerAngles {
    pub fn new(phi1: f64, phi: f64, phi2: f64) -> Self {
        Self { phi1, phi, phi2 }
    }

    pub fn from_degrees(phi1: f64, phi: f64, phi2: f64) -> Self {
        Self::new(phi1.to_radians(), phi.to_radians(), phi2.to_radians())
    }

    /// The sentinel triple written for unindexed measurements
    pub fn unindexed() -> Self {
        Self::new(UNINDEXED_ANGLE, UNINDEXED_ANGLE, UNINDEXED_ANGLE)
    }

    pub fn is_unindexed(&self) -> bool {
        [self.phi1, self.phi, self.phi2]
            .iter()
            .any(|a| (a - UNINDEXED_ANGLE).abs() < SENTINEL_TOLERANCE)
    }

    pub fn to_degrees(&self) -> [f64; 3] {
        [
            self.phi1.to_degrees(),
            self.phi.to_degrees(),
            self.phi2.to_degrees(),
        ]
    }
}

/// Rotation matrix R (crystal -> sample) of an Euler triple
pub fn euler_to_matrix(angles: &EulerAngles, convention: EulerConvention) -> RotationMatrix {
    let (s1, c1) = angles.phi1.sin_cos();
    let (s, c) = angles.phi.sin_cos();
    let (s2, c2) = angles.phi2.sin_cos();

    match convention {
        EulerConvention::Zxz => Matrix3::new(
            c1 * c2 - s1 * c * s2,
            -c1 * s2 - s1 * c * c2,
            s1 * s,
            s1 * c2 + c1 * c * s2,
            -s1 * s2 + c1 * c * c2,
            -c1 * s,
            s * s2,
            s * c2,
            c,
        ),
        EulerConvention::Xyz => Matrix3::new(
            c * c1,
            -c * s1,
            s,
            c2 * s1 + s2 * s * c1,
            c2 * c1 - s2 * s * s1,
            -s2 * c,
            s2 * s1 - c2 * s * c1,
            s2 * c1 + c2 * s * s1,
            c2 * c,
        ),
    }
}

/// Batch form of [`euler_to_matrix`] over three parallel angle arrays
pub fn euler_to_matrices(
    phi1: &[f64],
    phi: &[f64],
    phi2: &[f64],
    convention: EulerConvention,
) -> Result<Vec<RotationMatrix>> {
    check_len("Euler angle Phi", phi1.len(), phi.len())?;
    check_len("Euler angle phi2", phi1.len(), phi2.len())?;

    Ok(map_indices(phi1.len(), |i| {
        euler_to_matrix(&EulerAngles::new(phi1[i], phi[i], phi2[i]), convention)
    }))
}

/// Euler triple of a rotation matrix.
///
/// zxz returns Phi in [0, π] and phi1, phi2 in [0, 2π); xyz returns Phi in
/// [-π/2, π/2]. At gimbal lock the two outer angles are not separable and
/// `policy` decides between an error and the collapsed triple (phi2 = 0),
/// which reproduces the same matrix.
pub fn matrix_to_euler(
    r: &RotationMatrix,
    convention: EulerConvention,
    policy: GimbalLockPolicy,
) -> Result<EulerAngles> {
    match convention {
        EulerConvention::Zxz => {
            let phi = r[(2, 2)].clamp(-1.0, 1.0).acos();
            if phi.sin().abs() < GIMBAL_LOCK_TOLERANCE {
                let phi = if r[(2, 2)] > 0.0 { 0.0 } else { PI };
                return collapse(phi, r[(1, 0)].atan2(r[(0, 0)]), policy);
            }
            // sin(Phi) > 0 cancels out of both ratios
            let phi1 = r[(0, 2)].atan2(-r[(1, 2)]);
            let phi2 = r[(2, 0)].atan2(r[(2, 1)]);
            Ok(EulerAngles::new(wrap_two_pi(phi1), phi, wrap_two_pi(phi2)))
        }
        EulerConvention::Xyz => {
            let cos_phi = r[(0, 0)].hypot(r[(0, 1)]);
            if cos_phi < GIMBAL_LOCK_TOLERANCE {
                let phi = if r[(0, 2)] > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
                return collapse(phi, r[(1, 0)].atan2(r[(1, 1)]), policy);
            }
            let phi = r[(0, 2)].atan2(cos_phi);
            let phi1 = (-r[(0, 1)]).atan2(r[(0, 0)]);
            let phi2 = (-r[(1, 2)]).atan2(r[(2, 2)]);
            Ok(EulerAngles::new(wrap_two_pi(phi1), phi, wrap_two_pi(phi2)))
        }
    }
}

fn collapse(phi: f64, phi1: f64, policy: GimbalLockPolicy) -> Result<EulerAngles> {
    match policy {
        GimbalLockPolicy::Error => Err(OrientationError::SingularOrientation { phi }),
        GimbalLockPolicy::Collapse => Ok(EulerAngles::new(wrap_two_pi(phi1), phi, 0.0)),
    }
}

/// Batch form of [`matrix_to_euler`]. Fails on the first singular matrix under
/// `GimbalLockPolicy::Error`.
pub fn matrices_to_euler(
    rotations: &[RotationMatrix],
    convention: EulerConvention,
    policy: GimbalLockPolicy,
) -> Result<Vec<EulerAngles>> {
    map_indices(rotations.len(), |i| {
        matrix_to_euler(&rotations[i], convention, policy)
    })
    .into_iter()
    .collect()
}

/// Euler triple of the average of an already symmetry-aligned batch.
///
/// Two phases: seed angles from the element-wise mean matrix, then refine the
/// seed with the disorientation minimization and convert the refined matrix.
/// Averaging the angles themselves would be meaningless for rotations.
pub fn average_euler_angles(
    rotations: &[RotationMatrix],
    convention: EulerConvention,
    config: &AveragingConfig,
) -> Result<EulerAngles> {
    let refined = refine_average(rotations, config)?;
    debug!(
        "Average of {} rotations refined in {} iterations",
        rotations.len(),
        refined.scores.len().saturating_sub(1)
    );
    matrix_to_euler(&refined.rotation, convention, GimbalLockPolicy::Collapse)
}
