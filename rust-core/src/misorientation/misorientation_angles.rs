use serde::{Deserialize, Serialize};

use crate::config::MisorientationConfig;
use crate::error::{OrientationError, Result};
use crate::interfaces::{AngleUnit, Aggregation, RotationMatrix};
use crate::symmetries::sparse_symmetry_operators;
use crate::utils::{check_len, map_indices};

/// Misorientation value(s) of a batch, depending on the aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MisorientationOutput {
    /// Result of `Avg`, `Min` or `Max`
    Aggregated(f64),
    /// One value per pair (`Aggregation::None`)
    PerElement(Vec<f64>),
}

impl MisorientationOutput {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MisorientationOutput::Aggregated(x) => Some(*x),
            MisorientationOutput::PerElement(_) => None,
        }
    }

    pub fn values(&self) -> &[f64] {
        match self {
            MisorientationOutput::Aggregated(x) => std::slice::from_ref(x),
            MisorientationOutput::PerElement(v) => v,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        match self {
            MisorientationOutput::Aggregated(x) => vec![x],
            MisorientationOutput::PerElement(v) => v,
        }
    }
}

/// Convert the trace of a misorientation matrix to the requested unit.
///
/// The sign of the trace is ignored; the affine map (|tr| - 1) / 2 is clamped
/// to [-1, 1] before `acos`. `AngleUnit::Trace` returns |tr| capped at 3.
pub fn trace_to_angle(trace: f64, unit: AngleUnit) -> f64 {
    let tr = trace.abs().min(3.0);
    match unit {
        AngleUnit::Trace => tr,
        AngleUnit::Radians => ((tr - 1.0) / 2.0).clamp(-1.0, 1.0).acos(),
        AngleUnit::Degrees => ((tr - 1.0) / 2.0).clamp(-1.0, 1.0).acos().to_degrees(),
    }
}

/// |tr(A^T B)|, or its maximum over the 24 images g·B when `symmetry_aware`
pub fn misorientation_trace(a: &RotationMatrix, b: &RotationMatrix, symmetry_aware: bool) -> f64 {
    if !symmetry_aware {
        return (a.transpose() * b).trace().abs();
    }
    // tr(A^T g B) = tr(g B A^T) = sum of g ∘ (A B^T)
    let s = a * b.transpose();
    sparse_symmetry_operators()
        .iter()
        .map(|g| g.trace_product(&s).abs())
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Misorientation between two orientation matrices on which crystal symmetry
/// acts from the left (sample -> crystal matrices M = R^T, or transformation
/// matrices).
pub fn misorientation_angle(
    a: &RotationMatrix,
    b: &RotationMatrix,
    symmetry_aware: bool,
    unit: AngleUnit,
) -> f64 {
    trace_to_angle(misorientation_trace(a, b, symmetry_aware), unit)
}

/// Reduce per-element values. Aggregating nothing is an error; `None` passes
/// the values through, empty or not.
pub fn aggregate(values: Vec<f64>, aggregation: Aggregation) -> Result<MisorientationOutput> {
    let value = match aggregation {
        Aggregation::None => return Ok(MisorientationOutput::PerElement(values)),
        _ if values.is_empty() => {
            return Err(OrientationError::EmptySelection(
                "cannot aggregate an empty set of misorientations".to_string(),
            ))
        }
        Aggregation::Avg => values.iter().sum::<f64>() / values.len() as f64,
        Aggregation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    Ok(MisorientationOutput::Aggregated(value))
}

/// Misorientation of every member of `set` with a single `reference`
pub fn misorientation_to_reference(
    set: &[RotationMatrix],
    reference: &RotationMatrix,
    config: &MisorientationConfig,
) -> Result<MisorientationOutput> {
    let values = map_indices(set.len(), |i| {
        misorientation_angle(&set[i], reference, config.symmetry_aware, config.unit)
    });
    aggregate(values, config.aggregation)
}

/// Misorientation of the element-wise pairs (a[i], b[i])
pub fn misorientation_pairs(
    a: &[RotationMatrix],
    b: &[RotationMatrix],
    config: &MisorientationConfig,
) -> Result<MisorientationOutput> {
    check_len("misorientation pairs", a.len(), b.len())?;
    let values = map_indices(a.len(), |i| {
        misorientation_angle(&a[i], &b[i], config.symmetry_aware, config.unit)
    });
    aggregate(values, config.aggregation)
}
