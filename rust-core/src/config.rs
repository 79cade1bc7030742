// Constants and option structures shared by the orientation modules

use serde::{Deserialize, Serialize};

use crate::error::{OrientationError, Result};
use crate::interfaces::{AngleUnit, Aggregation};

// Sentinels
pub const UNINDEXED_ANGLE: f64 = 4.0; // Euler angle value written for unindexed measurements
pub const NO_NEIGHBOR_SENTINEL: f64 = -1.0; // Exported misorientation for missing neighbors

// Tolerances
pub const GIMBAL_LOCK_TOLERANCE: f64 = 1e-8; // |sin(Phi)| (zxz) or |cos(Phi)| (xyz) below this is singular
pub const ORTHONORMALITY_TOLERANCE: f64 = 1e-9; // For R * R^T = I checks
pub const SENTINEL_TOLERANCE: f64 = 1e-9; // Match against UNINDEXED_ANGLE
pub const DEFAULT_REDUCTION_TOLERANCE_DEG: f64 = 1e-3; // Variant equivalence, degrees
pub const DEFAULT_PLANE_TOLERANCE: f64 = 1e-8; // |p . d| accepted as orthogonal

// Disorientation minimization defaults
pub const DEFAULT_GRID_SIZE: usize = 5;
pub const DEFAULT_MAX_DEVIATION: f64 = 0.25; // radians
pub const DEFAULT_ITERATIONS: usize = 3;

/// Options of the misorientation operations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MisorientationConfig {
    /// Minimize over the 24 cubic images of the second orientation
    pub symmetry_aware: bool,
    /// Output unit
    pub unit: AngleUnit,
    /// Reduction applied over a batch
    pub aggregation: Aggregation,
}

impl Default for MisorientationConfig {
    fn default() -> Self {
        Self {
            symmetry_aware: true,
            unit: AngleUnit::Degrees,
            aggregation: Aggregation::None,
        }
    }
}

impl MisorientationConfig {
    pub fn with_unit(mut self, unit: AngleUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_symmetry(mut self, symmetry_aware: bool) -> Self {
        self.symmetry_aware = symmetry_aware;
        self
    }
}

/// Which member of a class of equivalent transformations survives reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VariantSelection {
    /// Keep `i` only when no `j >= i` other than itself is equivalent.
    /// The last member of each class survives.
    #[default]
    SourceRule,
    /// Keep the first member of each class
    FirstOfClass,
}

/// Options of the transformation reducer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Maximum misorientation (degrees) for two transformations to be equivalent
    pub tolerance_deg: f64,
    pub selection: VariantSelection,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_REDUCTION_TOLERANCE_DEG,
            selection: VariantSelection::SourceRule,
        }
    }
}

impl ReductionConfig {
    /// Trace threshold equivalent to `tolerance_deg`: 2 cos(tol) + 1
    pub fn trace_threshold(&self) -> f64 {
        2.0 * self.tolerance_deg.to_radians().cos() + 1.0
    }
}

/// Options of the shrinking-grid disorientation minimization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AveragingConfig {
    /// Grid points per perturbation axis
    pub grid_size: usize,
    /// Half-width of the first grid, radians
    pub max_deviation: f64,
    /// Number of refinement rounds; the grid shrinks by `grid_size` each round
    pub iterations: usize,
}

impl Default for AveragingConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            max_deviation: DEFAULT_MAX_DEVIATION,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl AveragingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(OrientationError::InvalidParameter(
                "grid_size must be at least 1".to_string(),
            ));
        }
        if !self.max_deviation.is_finite() || self.max_deviation < 0.0 {
            return Err(OrientationError::InvalidParameter(format!(
                "max_deviation must be finite and non-negative, got {}",
                self.max_deviation
            )));
        }
        Ok(())
    }
}

/// Options of the analytic orientation relationship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrConfig {
    /// Largest |plane . direction| accepted as orthogonal
    pub truncate: f64,
    /// Expand to the full variant orbit and reduce it
    pub reduce_variants: bool,
    pub reduction: ReductionConfig,
}

impl Default for OrConfig {
    fn default() -> Self {
        Self {
            truncate: DEFAULT_PLANE_TOLERANCE,
            reduce_variants: true,
            reduction: ReductionConfig::default(),
        }
    }
}

/// Options of the experimental orientation relationship
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExperimentalOrConfig {
    pub averaging: AveragingConfig,
}
