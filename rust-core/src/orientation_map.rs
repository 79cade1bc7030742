// Batch of measured orientations with phase labels and an indexed mask.
// Unindexed rows (Euler sentinel) keep a matrix but never enter a computation.

use serde::{Deserialize, Serialize};

use crate::averaging::average_orientation;
use crate::config::{
    AveragingConfig, ExperimentalOrConfig, MisorientationConfig, ORTHONORMALITY_TOLERANCE,
};
use crate::error::{OrientationError, Result};
use crate::interfaces::{EulerConvention, GimbalLockPolicy, PhasePair, RotationMatrix};
use crate::misorientation::{misorientation_field, MisorientationField, NeighborTable};
use crate::relationships::{experimental_orientation_relationship, ExperimentalOr};
use crate::rotations::{euler_to_matrices, matrix_to_euler, EulerAngles};
use crate::utils::check_len;

/// R · Rᵀ = I and det R = +1 within `ORTHONORMALITY_TOLERANCE`
fn is_rotation(r: &RotationMatrix) -> bool {
    (r * r.transpose() - RotationMatrix::identity()).amax() < ORTHONORMALITY_TOLERANCE
        && (r.determinant() - 1.0).abs() < ORTHONORMALITY_TOLERANCE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationMap {
    rotations: Vec<RotationMatrix>,
    phases: Vec<u8>,
    indexed: Vec<bool>,
}

impl OrientationMap {
    /// Build from raw Euler arrays (radians) and phase labels
    pub fn from_euler(
        phi1: &[f64],
        phi: &[f64],
        phi2: &[f64],
        phases: &[u8],
        convention: EulerConvention,
    ) -> Result<Self> {
        let rotations = euler_to_matrices(phi1, phi, phi2, convention)?;
        check_len("phase labels", rotations.len(), phases.len())?;
        let indexed = (0..rotations.len())
            .map(|i| !EulerAngles::new(phi1[i], phi[i], phi2[i]).is_unindexed())
            .collect();
        Ok(Self {
            rotations,
            phases: phases.to_vec(),
            indexed,
        })
    }

    /// Build from rotation matrices R; every row counts as indexed
    pub fn from_rotations(rotations: Vec<RotationMatrix>, phases: Vec<u8>) -> Result<Self> {
        check_len("phase labels", rotations.len(), phases.len())?;
        if let Some(i) = rotations.iter().position(|r| !is_rotation(r)) {
            return Err(OrientationError::InvalidParameter(format!(
                "row {} is not a proper rotation matrix",
                i
            )));
        }
        let indexed = vec![true; rotations.len()];
        Ok(Self {
            rotations,
            phases,
            indexed,
        })
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    pub fn rotations(&self) -> &[RotationMatrix] {
        &self.rotations
    }

    pub fn phases(&self) -> &[u8] {
        &self.phases
    }

    pub fn indexed(&self) -> &[bool] {
        &self.indexed
    }

    /// Indexed rows carrying `phase`
    pub fn phase_selection(&self, phase: u8) -> Vec<bool> {
        self.phases
            .iter()
            .zip(&self.indexed)
            .map(|(&p, &ok)| ok && p == phase)
            .collect()
    }

    /// M = Rᵀ of every row
    pub fn sample_to_crystal(&self) -> Vec<RotationMatrix> {
        self.rotations.iter().map(|r| r.transpose()).collect()
    }

    /// Euler triples of every row; unindexed rows get the sentinel triple back
    pub fn to_euler(
        &self,
        convention: EulerConvention,
        policy: GimbalLockPolicy,
    ) -> Result<Vec<EulerAngles>> {
        self.rotations
            .iter()
            .zip(&self.indexed)
            .map(|(r, &ok)| {
                if ok {
                    matrix_to_euler(r, convention, policy)
                } else {
                    Ok(EulerAngles::unindexed())
                }
            })
            .collect()
    }

    /// Indexed mask combined with an optional caller selection
    fn mask(&self, selection: Option<&[bool]>) -> Result<Vec<bool>> {
        match selection {
            Some(sel) => {
                check_len("selection mask", self.len(), sel.len())?;
                Ok(self.indexed.iter().zip(sel).map(|(&a, &b)| a && b).collect())
            }
            None => Ok(self.indexed.clone()),
        }
    }

    pub fn misorientation_field(
        &self,
        neighbors: &NeighborTable,
        selection: Option<&[bool]>,
        config: &MisorientationConfig,
    ) -> Result<MisorientationField> {
        let mask = self.mask(selection)?;
        misorientation_field(&self.sample_to_crystal(), neighbors, Some(&mask), config)
    }

    /// Average orientation R of the selected rows, optionally restricted to one phase
    pub fn average_orientation(
        &self,
        phase: Option<u8>,
        selection: Option<&[bool]>,
        config: &AveragingConfig,
    ) -> Result<RotationMatrix> {
        let mut mask = self.mask(selection)?;
        if let Some(phase) = phase {
            for (keep, &p) in mask.iter_mut().zip(&self.phases) {
                *keep &= p == phase;
            }
        }
        average_orientation(&self.rotations, Some(&mask), config)
    }

    pub fn orientation_relationship(
        &self,
        phase_pair: PhasePair,
        selection: Option<&[bool]>,
        config: &ExperimentalOrConfig,
    ) -> Result<ExperimentalOr> {
        let mask = self.mask(selection)?;
        experimental_orientation_relationship(
            &self.rotations,
            &self.phases,
            phase_pair,
            Some(&mask),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UNINDEXED_ANGLE;
    use approx::assert_abs_diff_eq;
    use nalgebra::Matrix3;

    fn small_map() -> OrientationMap {
        let s = UNINDEXED_ANGLE;
        OrientationMap::from_euler(
            &[0.1, 0.12, s, 1.0, 1.02],
            &[0.5, 0.5, s, 0.3, 0.31],
            &[0.2, 0.21, s, 0.7, 0.7],
            &[2, 2, 2, 1, 1],
            EulerConvention::Zxz,
        )
        .unwrap()
    }

    #[test]
    fn test_sentinel_rows_are_unindexed() {
        let map = small_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map.indexed(), &[true, true, false, true, true]);
        assert_eq!(map.phase_selection(2), vec![true, true, false, false, false]);
        assert_eq!(map.sample_to_crystal()[0], map.rotations()[0].transpose());
    }

    #[test]
    fn test_to_euler_writes_sentinel_back() {
        let map = small_map();
        let angles = map.to_euler(EulerConvention::Zxz, GimbalLockPolicy::Error).unwrap();
        assert_eq!(angles[2], EulerAngles::unindexed());
        assert_abs_diff_eq!(angles[0].phi1, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(angles[0].phi, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(angles[0].phi2, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_unindexed_rows_skip_field_and_average() {
        let map = small_map();
        let neighbors = NeighborTable::new(vec![1, 2, 0, 3, 1, 4, 2, 4, 3, -1], 2).unwrap();
        let field = map
            .misorientation_field(&neighbors, None, &MisorientationConfig::default())
            .unwrap();
        // Slots pointing at the sentinel row are skipped; other slots keep their value
        assert!(field.get(0, 1).is_none());
        assert!(field.get(3, 0).is_none());
        assert!(field.get(1, 1).is_some());
        assert!(field.row(2).iter().all(Option::is_none));
        assert!(field.get(0, 0).is_some());

        // The sentinel row has phase 2 but does not pull the average
        let avg = map
            .average_orientation(Some(2), None, &AveragingConfig::default())
            .unwrap();
        let reference = map
            .average_orientation(None, Some(&[true, true, false, false, false]), &AveragingConfig::default())
            .unwrap();
        assert!((avg - reference).amax() < 1e-9);
    }

    #[test]
    fn test_from_rotations_rejects_improper_matrices() {
        let map = OrientationMap::from_rotations(vec![Matrix3::identity()], vec![1]).unwrap();
        assert_eq!(map.indexed(), &[true]);

        let mirror = Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let err = OrientationMap::from_rotations(vec![Matrix3::identity(), mirror], vec![1, 1])
            .unwrap_err();
        assert!(matches!(err, OrientationError::InvalidParameter(_)));

        let err = OrientationMap::from_rotations(vec![Matrix3::identity() * 2.0], vec![1]).unwrap_err();
        assert!(matches!(err, OrientationError::InvalidParameter(_)));
    }

    #[test]
    fn test_shape_checks() {
        let err = OrientationMap::from_euler(&[0.0], &[0.0], &[0.0], &[1, 2], EulerConvention::Zxz)
            .unwrap_err();
        assert!(matches!(err, OrientationError::ShapeMismatch { .. }));

        let map = small_map();
        let err = map
            .average_orientation(None, Some(&[true]), &AveragingConfig::default())
            .unwrap_err();
        assert!(matches!(err, OrientationError::ShapeMismatch { .. }));

        let err = map
            .average_orientation(Some(7), None, &AveragingConfig::default())
            .unwrap_err();
        assert!(matches!(err, OrientationError::EmptySelection(_)));
    }
}
