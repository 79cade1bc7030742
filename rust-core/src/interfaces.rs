// Definitions that are used throughout all modules

use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::error::OrientationError;

/// 3x3 orthonormal matrix, det +1
pub type RotationMatrix = Matrix3<f64>;

// Euler angle conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EulerConvention {
    /// Bunge z-x-z
    #[default]
    Zxz,
    Xyz,
}

impl FromStr for EulerConvention {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zxz" | "bunge" => Ok(EulerConvention::Zxz),
            "xyz" => Ok(EulerConvention::Xyz),
            _ => Err(OrientationError::InvalidConvention(s.to_string())),
        }
    }
}

impl fmt::Display for EulerConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EulerConvention::Zxz => write!(f, "zxz"),
            EulerConvention::Xyz => write!(f, "xyz"),
        }
    }
}

// What Euler extraction does when phi1 and phi2 cannot be separated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GimbalLockPolicy {
    /// Fail with `SingularOrientation`
    Error,
    /// Snap Phi to its singular value, set phi2 = 0 and put the whole in-plane rotation in phi1
    #[default]
    Collapse,
}

// Output unit of misorientation values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
    /// Absolute trace of the misorientation matrix, in [0, 3]
    Trace,
}

// Reduction over a batch of misorientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    Avg,
    Min,
    Max,
    /// Keep every value
    #[default]
    None,
}

/// Phase labels of a parent/child pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePair {
    pub parent: u8,
    pub child: u8,
}

impl Default for PhasePair {
    fn default() -> Self {
        Self { parent: 2, child: 1 }
    }
}
