//! Cubic orientation core for EBSD data
//!
//! Euler angle and rotation matrix conversions, the 24 proper rotations of
//! the cube, symmetry-aware misorientation, orientation averaging and
//! parent/child orientation relationships with their variants.

pub mod averaging;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod misorientation;
pub mod orientation_map;
pub mod relationships;
pub mod rotations;
pub mod symmetries;

mod utils;

pub use error::{OrientationError, Result};
pub use interfaces::{
    Aggregation, AngleUnit, EulerConvention, GimbalLockPolicy, PhasePair, RotationMatrix,
};
pub use orientation_map::OrientationMap;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything needed for typical use
pub mod prelude {
    pub use crate::averaging::{average_orientation, minimize_disorientation, refine_average};
    pub use crate::config::{
        AveragingConfig, ExperimentalOrConfig, MisorientationConfig, OrConfig, ReductionConfig,
        VariantSelection,
    };
    pub use crate::error::{OrientationError, Result};
    pub use crate::interfaces::{
        Aggregation, AngleUnit, EulerConvention, GimbalLockPolicy, PhasePair, RotationMatrix,
    };
    pub use crate::misorientation::{
        misorientation_angle, misorientation_field, misorientation_pairs,
        misorientation_to_reference, MisorientationField, MisorientationOutput, NeighborReduction,
        NeighborTable,
    };
    pub use crate::orientation_map::OrientationMap;
    pub use crate::relationships::{
        experimental_orientation_relationship, orientation_relationship,
        reduce_cubic_transformations, ExperimentalOr, OrSpecification,
    };
    pub use crate::rotations::{
        average_euler_angles, axis_angle_to_matrix, euler_to_matrices, euler_to_matrix,
        matrices_to_euler, matrix_to_euler, EulerAngles,
    };
    pub use crate::symmetries::{cubic_symmetry_operators, sparse_symmetry_operators};
}
