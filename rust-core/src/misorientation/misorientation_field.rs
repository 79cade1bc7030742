use std::time::Instant;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{MisorientationConfig, NO_NEIGHBOR_SENTINEL};
use crate::error::{OrientationError, Result};
use crate::interfaces::RotationMatrix;
use crate::misorientation::misorientation_angles::trace_to_angle;
use crate::symmetries::sparse_symmetry_operators;
use crate::utils::{check_len, map_indices};

/// Neighbor indices of every measurement, a fixed number of slots per row.
///
/// Indices are opaque positions in the orientation array. Anything negative
/// or past the end means "no neighbor".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborTable {
    indices: Vec<i64>,
    slots: usize,
}

impl NeighborTable {
    /// Row-major table with `slots` entries per measurement
    pub fn new(indices: Vec<i64>, slots: usize) -> Result<Self> {
        if slots == 0 {
            return Err(OrientationError::InvalidParameter(
                "neighbor table needs at least one slot".to_string(),
            ));
        }
        if indices.len() % slots != 0 {
            return Err(OrientationError::ShapeMismatch {
                context: "neighbor table",
                expected: indices.len() / slots * slots + slots,
                found: indices.len(),
            });
        }
        Ok(Self { indices, slots })
    }

    /// Build from one row per measurement; all rows must have the same length
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self> {
        let slots = rows.first().map_or(0, Vec::len);
        for row in rows {
            check_len("neighbor table row", slots, row.len())?;
        }
        if rows.is_empty() {
            return Ok(Self {
                indices: Vec::new(),
                slots: 1,
            });
        }
        Self::new(rows.concat(), slots)
    }

    /// Number of measurements
    pub fn len(&self) -> usize {
        self.indices.len() / self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn row(&self, i: usize) -> &[i64] {
        &self.indices[i * self.slots..(i + 1) * self.slots]
    }

    /// Neighbor `k` of measurement `i` if it refers to one of `n` measurements
    fn resolve(&self, i: usize, k: usize, n: usize) -> Option<usize> {
        let idx = self.indices[i * self.slots + k];
        (idx >= 0 && (idx as u64) < n as u64).then_some(idx as usize)
    }
}

/// Reduction of one measurement's neighbor slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NeighborReduction {
    /// Kernel average misorientation
    #[default]
    Mean,
    Min,
    Max,
}

/// Misorientation of every measurement to each of its neighbor slots.
/// `None` marks a slot without data; zero is a genuine misorientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MisorientationField {
    values: Vec<Option<f64>>,
    slots: usize,
}

impl MisorientationField {
    pub fn len(&self) -> usize {
        self.values.len() / self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn get(&self, i: usize, k: usize) -> Option<f64> {
        self.values[i * self.slots + k]
    }

    pub fn row(&self, i: usize) -> &[Option<f64>] {
        &self.values[i * self.slots..(i + 1) * self.slots]
    }

    /// Flat row-major export with `NO_NEIGHBOR_SENTINEL` (-1) for missing slots
    pub fn to_filled(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| v.unwrap_or(NO_NEIGHBOR_SENTINEL))
            .collect()
    }

    /// Per-measurement reduction over the available slots.
    /// Measurements without any neighbor give `None`.
    pub fn reduce(&self, reduction: NeighborReduction) -> Vec<Option<f64>> {
        (0..self.len())
            .map(|i| {
                let mut available = self.row(i).iter().flatten().copied().peekable();
                available.peek()?;
                Some(match reduction {
                    NeighborReduction::Mean => {
                        let (sum, count) = available.fold((0.0, 0usize), |(s, c), x| (s + x, c + 1));
                        sum / count as f64
                    }
                    NeighborReduction::Min => available.fold(f64::INFINITY, f64::min),
                    NeighborReduction::Max => available.fold(f64::NEG_INFINITY, f64::max),
                })
            })
            .collect()
    }

    /// Kernel average misorientation: mean over available neighbors
    pub fn kernel_average(&self) -> Vec<Option<f64>> {
        self.reduce(NeighborReduction::Mean)
    }
}

/// Misorientation between each measurement and its neighbors.
///
/// `orientations` are sample -> crystal matrices (M = R^T). A slot is skipped
/// (`None`) when its index is out of range or when either end is not selected.
/// `config.aggregation` is not used here; see [`MisorientationField::reduce`].
pub fn misorientation_field(
    orientations: &[RotationMatrix],
    neighbors: &NeighborTable,
    selection: Option<&[bool]>,
    config: &MisorientationConfig,
) -> Result<MisorientationField> {
    let n = orientations.len();
    check_len("neighbor table", n, neighbors.len())?;
    if let Some(mask) = selection {
        check_len("selection mask", n, mask.len())?;
    }
    let selected = |i: usize| selection.map_or(true, |mask| mask[i]);

    let t0 = Instant::now();
    let slots = neighbors.slots();
    let ops = sparse_symmetry_operators();

    let rows = map_indices(n, |i| {
        (0..slots)
            .map(|k| {
                let j = neighbors.resolve(i, k, n)?;
                if !selected(i) || !selected(j) {
                    return None;
                }
                let s = orientations[j] * orientations[i].transpose();
                let trace = if config.symmetry_aware {
                    ops.iter()
                        .map(|g| g.trace_product(&s).abs())
                        .fold(f64::NEG_INFINITY, f64::max)
                } else {
                    s.trace().abs()
                };
                Some(trace_to_angle(trace, config.unit))
            })
            .collect::<Vec<_>>()
    });

    debug!(
        "Misorientation field over {} measurements x {} neighbors: {:.2} s",
        n,
        slots,
        t0.elapsed().as_secs_f64()
    );

    Ok(MisorientationField {
        values: rows.concat(),
        slots,
    })
}
