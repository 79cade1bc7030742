// Rotations module: conversions between Euler angles, axis-angle pairs and rotation matrices
// Every matrix produced here maps crystal coordinates to sample coordinates (R)

// ======================== MODULE DECLARATIONS ========================
pub mod axis_angle;
pub mod euler_angles;
pub mod inverse_pole_figure;

// Test modules
mod _tests_axis_angle;

// ======================== EULER ANGLES ========================
pub use euler_angles::{
    EulerAngles,          // struct - (phi1, Phi, phi2) in radians, sentinel 4.0 for unindexed
    euler_to_matrix,      // fn(angles: &EulerAngles, convention: EulerConvention) -> RotationMatrix
    euler_to_matrices,    // fn(phi1: &[f64], phi: &[f64], phi2: &[f64], convention) -> Result<Vec<RotationMatrix>>
    matrix_to_euler,      // fn(r: &RotationMatrix, convention, policy: GimbalLockPolicy) -> Result<EulerAngles>
    matrices_to_euler,    // fn(rotations: &[RotationMatrix], convention, policy) -> Result<Vec<EulerAngles>>
    average_euler_angles, // fn(rotations: &[RotationMatrix], convention, config: &AveragingConfig) -> Result<EulerAngles>
};

// EulerAngles impl methods:
//   new(phi1, phi, phi2) -> Self                - radians
//   from_degrees(phi1, phi, phi2) -> Self       - degrees in, radians stored
//   unindexed() -> Self                         - sentinel triple (4, 4, 4)
//   is_unindexed(&self) -> bool                 - any component equals the sentinel
//   to_degrees(&self) -> [f64; 3]

// ======================== AXIS-ANGLE ========================
pub use axis_angle::{
    axis_angle_to_matrix,   // fn(axis: &Vector3<f64>, theta: f64) -> Result<RotationMatrix>
    axis_angle_to_matrices, // fn(axes: &[Vector3<f64>], thetas: &[f64]) -> Result<Vec<RotationMatrix>>
};

// ======================== INVERSE POLE FIGURE ========================
pub use inverse_pole_figure::{
    ipf_direction,    // fn(r: &RotationMatrix, sample_direction: &Vector3<f64>) -> Result<Vector3<f64>>
    ipf_directions,   // fn(rotations: &[RotationMatrix], sample_direction) -> Result<Vec<Vector3<f64>>>
    normal_direction, // fn() -> Vector3<f64> - ND = [0, 0, 1]
};
