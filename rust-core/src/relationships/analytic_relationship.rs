use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::OrConfig;
use crate::error::{OrientationError, Result};
use crate::interfaces::RotationMatrix;
use crate::symmetries::cubic_symmetry_operators;

use super::variant_reduction::reduce_cubic_transformations;

/// Parallel plane and direction of a parent/child orientation relationship,
/// in the crystal frame of each phase (Miller indices).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrSpecification {
    pub parent_plane: Vector3<f64>,
    pub parent_direction: Vector3<f64>,
    pub child_plane: Vector3<f64>,
    pub child_direction: Vector3<f64>,
}

impl OrSpecification {
    pub fn new(
        parent_plane: Vector3<f64>,
        parent_direction: Vector3<f64>,
        child_plane: Vector3<f64>,
        child_direction: Vector3<f64>,
    ) -> Self {
        Self {
            parent_plane,
            parent_direction,
            child_plane,
            child_direction,
        }
    }

    /// Kurdjumov-Sachs: (111)γ ∥ (011)α, [-101]γ ∥ [-1-11]α
    pub fn kurdjumov_sachs() -> Self {
        Self::new(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, 1.0),
        )
    }

    /// Nishiyama-Wassermann: (111)γ ∥ (011)α, [-1-12]γ ∥ [0-11]α
    pub fn nishiyama_wassermann() -> Self {
        Self::new(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, 2.0),
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(0.0, -1.0, 1.0),
        )
    }

    fn validate(&self) -> Result<()> {
        let vectors = [
            ("parent plane", &self.parent_plane),
            ("parent direction", &self.parent_direction),
            ("child plane", &self.child_plane),
            ("child direction", &self.child_direction),
        ];
        for (name, v) in vectors {
            if v.norm() == 0.0 || !v.iter().all(|x| x.is_finite()) {
                return Err(OrientationError::InvalidParameter(format!(
                    "{} must be a finite non-zero vector",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// First cubic image of `direction` lying in `plane`
fn direction_in_plane(
    phase: &'static str,
    plane: &Vector3<f64>,
    direction: &Vector3<f64>,
    truncate: f64,
) -> Result<Vector3<f64>> {
    let images: Vec<Vector3<f64>> = cubic_symmetry_operators()
        .iter()
        .map(|g| g * direction)
        .filter(|d| plane.dot(d).abs() <= truncate)
        .collect();

    match images.first() {
        None => Err(OrientationError::InconsistentVariantCount { phase, found: 0 }),
        Some(&first) => {
            debug!("{} phase: {} direction images in the plane", phase, images.len());
            Ok(first)
        }
    }
}

/// Orthonormal basis with rows (d, p × d, p), normalized
fn crystal_basis(plane: &Vector3<f64>, direction: &Vector3<f64>) -> RotationMatrix {
    let d = direction.normalize();
    let p = plane.normalize();
    let t = p.cross(&d).normalize();
    Matrix3::from_rows(&[d.transpose(), t.transpose(), p.transpose()])
}

/// Transformation matrices (parent crystal -> child crystal) of an analytic
/// orientation relationship.
///
/// With `config.reduce_variants` the full orbit `V · gᵀ` over the cubic group
/// is reduced to its distinguishable variants; otherwise only `V` is returned.
pub fn orientation_relationship(
    specification: &OrSpecification,
    config: &OrConfig,
) -> Result<Vec<RotationMatrix>> {
    specification.validate()?;

    let d_parent = direction_in_plane(
        "parent",
        &specification.parent_plane,
        &specification.parent_direction,
        config.truncate,
    )?;
    let d_child = direction_in_plane(
        "child",
        &specification.child_plane,
        &specification.child_direction,
        config.truncate,
    )?;

    let r_parent = crystal_basis(&specification.parent_plane, &d_parent);
    let r_child = crystal_basis(&specification.child_plane, &d_child);
    let v = r_child.transpose() * r_parent;

    if !config.reduce_variants {
        return Ok(vec![v]);
    }

    let orbit: Vec<RotationMatrix> = cubic_symmetry_operators()
        .iter()
        .map(|g| v * g.transpose())
        .collect();
    Ok(reduce_cubic_transformations(&orbit, &config.reduction))
}
