#[cfg(test)]
mod _tests_misorientation_field {
    use super::super::misorientation_field::*;
    use crate::config::{MisorientationConfig, NO_NEIGHBOR_SENTINEL};
    use crate::error::OrientationError;
    use crate::interfaces::AngleUnit;
    use crate::rotations::axis_angle_to_matrix;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Vector3};

    /// Four measurements on a line, rotated 0, 2, 4 and 10 degrees about z
    fn line_of_grains() -> Vec<Matrix3<f64>> {
        [0.0, 2.0, 4.0, 10.0]
            .iter()
            .map(|deg: &f64| {
                axis_angle_to_matrix(&Vector3::z(), deg.to_radians())
                    .unwrap()
                    .transpose()
            })
            .collect()
    }

    /// Left and right neighbors, -1 at the ends
    fn line_neighbors() -> NeighborTable {
        NeighborTable::from_rows(&[vec![-1, 1], vec![0, 2], vec![1, 3], vec![2, -1]]).unwrap()
    }

    #[test]
    fn test_neighbor_table_validation() {
        let err = NeighborTable::new(vec![0, 1, 2], 2).unwrap_err();
        assert!(matches!(err, OrientationError::ShapeMismatch { .. }));

        let err = NeighborTable::new(vec![0, 1], 0).unwrap_err();
        assert!(matches!(err, OrientationError::InvalidParameter(_)));

        let err = NeighborTable::from_rows(&[vec![0, 1], vec![0]]).unwrap_err();
        assert!(matches!(err, OrientationError::ShapeMismatch { .. }));

        let table = line_neighbors();
        assert_eq!(table.len(), 4);
        assert_eq!(table.slots(), 2);
        assert_eq!(table.row(1), &[0, 2]);
    }

    #[test]
    fn test_field_values() {
        let field = misorientation_field(
            &line_of_grains(),
            &line_neighbors(),
            None,
            &MisorientationConfig::default(),
        )
        .unwrap();

        assert_eq!(field.len(), 4);
        assert!(field.get(0, 0).is_none());
        assert_abs_diff_eq!(field.get(0, 1).unwrap(), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(field.get(2, 1).unwrap(), 6.0, epsilon = 1e-6);
        assert!(field.get(3, 1).is_none());
    }

    #[test]
    fn test_out_of_range_is_missing_not_zero() {
        let orientations = vec![Matrix3::identity(); 2];
        let neighbors = NeighborTable::new(vec![1, 2, 0, -3], 2).unwrap();
        let field =
            misorientation_field(&orientations, &neighbors, None, &MisorientationConfig::default())
                .unwrap();

        // Equal orientations give a genuine zero
        assert_abs_diff_eq!(field.get(0, 0).unwrap(), 0.0, epsilon = 1e-6);
        assert_eq!(field.get(0, 1), None);
        assert_eq!(field.get(1, 1), None);
        assert_eq!(
            field.to_filled(),
            vec![field.get(0, 0).unwrap(), NO_NEIGHBOR_SENTINEL, field.get(1, 0).unwrap(), NO_NEIGHBOR_SENTINEL]
        );
    }

    #[test]
    fn test_selection_masks_both_ends() {
        let selection = [true, false, true, true];
        let field = misorientation_field(
            &line_of_grains(),
            &line_neighbors(),
            Some(&selection),
            &MisorientationConfig::default(),
        )
        .unwrap();

        assert!(field.row(1).iter().all(Option::is_none));
        assert!(field.get(0, 1).is_none());
        assert!(field.get(2, 0).is_none());
        assert!(field.get(2, 1).is_some());

        let err = misorientation_field(
            &line_of_grains(),
            &line_neighbors(),
            Some(&selection[..2]),
            &MisorientationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OrientationError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_table_length_must_match() {
        let table = NeighborTable::from_rows(&[vec![1], vec![0]]).unwrap();
        let err = misorientation_field(
            &line_of_grains(),
            &table,
            None,
            &MisorientationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OrientationError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_kernel_average() {
        let field = misorientation_field(
            &line_of_grains(),
            &line_neighbors(),
            None,
            &MisorientationConfig::default(),
        )
        .unwrap();
        let kam = field.kernel_average();
        assert_abs_diff_eq!(kam[0].unwrap(), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(kam[1].unwrap(), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(kam[2].unwrap(), 4.0, epsilon = 1e-6);
        assert_abs_diff_eq!(kam[3].unwrap(), 6.0, epsilon = 1e-6);

        let max = field.reduce(NeighborReduction::Max);
        assert_abs_diff_eq!(max[2].unwrap(), 6.0, epsilon = 1e-6);
        let min = field.reduce(NeighborReduction::Min);
        assert_abs_diff_eq!(min[2].unwrap(), 2.0, epsilon = 1e-6);
        assert_eq!(field.reduce(NeighborReduction::default()), kam);

        let isolated = NeighborTable::new(vec![-1, -1], 1).unwrap();
        let field = misorientation_field(
            &[Matrix3::identity(), Matrix3::identity()],
            &isolated,
            None,
            &MisorientationConfig::default(),
        )
        .unwrap();
        assert_eq!(field.kernel_average(), vec![None, None]);
    }

    #[test]
    fn test_symmetry_off_and_units() {
        // 88 degrees about z: 2 degrees from the 4-fold image
        let orientations = vec![
            Matrix3::identity(),
            axis_angle_to_matrix(&Vector3::z(), 88_f64.to_radians()).unwrap(),
        ];
        let neighbors = NeighborTable::new(vec![1, 0], 1).unwrap();

        let reduced =
            misorientation_field(&orientations, &neighbors, None, &MisorientationConfig::default())
                .unwrap();
        assert_abs_diff_eq!(reduced.get(0, 0).unwrap(), 2.0, epsilon = 1e-6);

        let config = MisorientationConfig::default()
            .with_symmetry(false)
            .with_unit(AngleUnit::Radians);
        let plain = misorientation_field(&orientations, &neighbors, None, &config).unwrap();
        assert_abs_diff_eq!(plain.get(1, 0).unwrap(), 88_f64.to_radians(), epsilon = 1e-9);
    }
}
