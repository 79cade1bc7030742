use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::OnceLock;

use log::warn;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::interfaces::RotationMatrix;
use crate::rotations::axis_angle::rodrigues;

/// Number of proper rotations of the cubic point group (432)
pub const CUBIC_GROUP_ORDER: usize = 24;

/// Rotation axes and angles of the 24 operators, in table order
fn operator_axes_and_angles() -> [([f64; 3], f64); CUBIC_GROUP_ORDER] {
    let two_thirds = 2.0 * PI / 3.0;
    [
        ([1.0, 0.0, 0.0], 0.0),
        // 2-fold on <100>
        ([1.0, 0.0, 0.0], PI),
        ([0.0, 1.0, 0.0], PI),
        ([0.0, 0.0, 1.0], PI),
        // 4-fold on <100>
        ([1.0, 0.0, 0.0], FRAC_PI_2),
        ([0.0, 1.0, 0.0], FRAC_PI_2),
        ([0.0, 0.0, 1.0], FRAC_PI_2),
        ([-1.0, 0.0, 0.0], FRAC_PI_2),
        ([0.0, -1.0, 0.0], FRAC_PI_2),
        ([0.0, 0.0, -1.0], FRAC_PI_2),
        // 2-fold on <110>
        ([1.0, 1.0, 0.0], PI),
        ([1.0, 0.0, 1.0], PI),
        ([0.0, 1.0, 1.0], PI),
        ([1.0, -1.0, 0.0], PI),
        ([-1.0, 0.0, 1.0], PI),
        ([0.0, 1.0, -1.0], PI),
        // 3-fold on <111>
        ([1.0, 1.0, 1.0], two_thirds),
        ([1.0, -1.0, 1.0], two_thirds),
        ([-1.0, 1.0, 1.0], two_thirds),
        ([-1.0, -1.0, 1.0], two_thirds),
        ([1.0, 1.0, -1.0], two_thirds),
        ([1.0, -1.0, -1.0], two_thirds),
        ([-1.0, 1.0, -1.0], two_thirds),
        ([-1.0, -1.0, -1.0], two_thirds),
    ]
}

fn build_operators() -> [RotationMatrix; CUBIC_GROUP_ORDER] {
    let table = operator_axes_and_angles();
    std::array::from_fn(|i| {
        let (axis, angle) = table[i];
        let unit = Vector3::from(axis).normalize();
        // Entries are exactly -1, 0 or 1; remove the trigonometric round-off
        rodrigues(&unit, angle).map(f64::round)
    })
}

/// The 24 proper rotations of the cube, computed once per process.
///
/// Order: identity, 2-fold <100> (3), 4-fold <100> (6), 2-fold <110> (6),
/// 3-fold <111> (8). Entries are exact integers.
pub fn cubic_symmetry_operators() -> &'static [RotationMatrix; CUBIC_GROUP_ORDER] {
    static OPERATORS: OnceLock<[RotationMatrix; CUBIC_GROUP_ORDER]> = OnceLock::new();
    OPERATORS.get_or_init(build_operators)
}

/// A cubic operator stored as its three non-zero entries.
///
/// Every proper cubic rotation is a signed permutation matrix, so one entry
/// per row is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SparseOperator {
    /// Column of the non-zero entry in each row
    pub columns: [usize; 3],
    /// Value (+1 or -1) of the non-zero entry in each row
    pub signs: [f64; 3],
}

impl SparseOperator {
    /// Extract the non-zero pattern of a signed permutation matrix.
    /// Returns `None` if some row does not have exactly one non-zero entry.
    pub fn from_matrix(m: &Matrix3<f64>) -> Option<Self> {
        let mut columns = [0usize; 3];
        let mut signs = [0.0; 3];
        for row in 0..3 {
            let mut nonzero = (0..3).filter(|&col| m[(row, col)] != 0.0);
            let col = nonzero.next()?;
            if nonzero.next().is_some() {
                return None;
            }
            columns[row] = col;
            signs[row] = m[(row, col)];
        }
        Some(Self { columns, signs })
    }

    /// Element-wise product sum with `s`, i.e. tr(g^T s)
    pub fn trace_product(&self, s: &Matrix3<f64>) -> f64 {
        (0..3)
            .map(|row| self.signs[row] * s[(row, self.columns[row])])
            .sum()
    }

    pub fn to_matrix(&self) -> Matrix3<f64> {
        let mut m = Matrix3::zeros();
        for row in 0..3 {
            m[(row, self.columns[row])] = self.signs[row];
        }
        m
    }
}

/// Sparse form of [`cubic_symmetry_operators`], same order
pub fn sparse_symmetry_operators() -> &'static [SparseOperator; CUBIC_GROUP_ORDER] {
    static SPARSE: OnceLock<[SparseOperator; CUBIC_GROUP_ORDER]> = OnceLock::new();
    SPARSE.get_or_init(|| {
        let dense = cubic_symmetry_operators();
        std::array::from_fn(|i| match SparseOperator::from_matrix(&dense[i]) {
            Some(op) => op,
            None => {
                debug_assert!(false, "cubic operator {} is not a signed permutation", i);
                warn!("cubic operator {} is not a signed permutation, using identity", i);
                SparseOperator {
                    columns: [0, 1, 2],
                    signs: [1.0, 1.0, 1.0],
                }
            }
        })
    })
}

/// Distinct members of the cubic family of direction `d` (all g·d)
pub fn cubic_family_directions(d: &Vector3<f64>) -> Vec<Vector3<f64>> {
    let mut family: Vec<Vector3<f64>> = Vec::with_capacity(CUBIC_GROUP_ORDER);
    for g in cubic_symmetry_operators() {
        let v = g * d;
        if !family.iter().any(|u| (u - v).norm() < 1e-12) {
            family.push(v);
        }
    }
    family
}

/// Index of the operator equal to `m` (entries compared within `tol`)
pub fn find_symmetry_operator(m: &Matrix3<f64>, tol: f64) -> Option<usize> {
    cubic_symmetry_operators()
        .iter()
        .position(|g| (g - m).amax() < tol)
}
