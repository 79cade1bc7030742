#[cfg(test)]
mod _tests_axis_angle {
    use super::super::axis_angle::*;
    use super::super::inverse_pole_figure::*;
    use crate::error::OrientationError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Matrix3, Vector3};
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_quarter_turn_about_z() {
        let r = axis_angle_to_matrix(&Vector3::z(), FRAC_PI_2).unwrap();
        assert_relative_eq!(r * Vector3::x(), Vector3::y(), epsilon = TOL);
        assert_relative_eq!(r * Vector3::y(), -Vector3::x(), epsilon = TOL);
        assert_relative_eq!(r * Vector3::z(), Vector3::z(), epsilon = TOL);
    }

    #[test]
    fn test_axis_is_normalized() {
        let a = axis_angle_to_matrix(&Vector3::new(1.0, 1.0, 1.0), 2.0 * PI / 3.0).unwrap();
        let b = axis_angle_to_matrix(&Vector3::new(5.0, 5.0, 5.0), 2.0 * PI / 3.0).unwrap();
        assert_relative_eq!(a, b, epsilon = TOL);

        // 120° about [111] cycles x -> y -> z
        assert_relative_eq!(a * Vector3::x(), Vector3::y(), epsilon = TOL);
        assert_relative_eq!(a * Vector3::y(), Vector3::z(), epsilon = TOL);
    }

    #[test]
    fn test_result_is_proper_rotation() {
        let r = axis_angle_to_matrix(&Vector3::new(0.3, -1.2, 0.5), 1.234).unwrap();
        assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = TOL);
        assert_abs_diff_eq!(r.determinant(), 1.0, epsilon = TOL);
        assert_abs_diff_eq!(r.trace(), 1.0 + 2.0 * 1.234_f64.cos(), epsilon = TOL);
    }

    #[test]
    fn test_zero_axis_rejected() {
        let err = axis_angle_to_matrix(&Vector3::zeros(), 1.0).unwrap_err();
        assert!(matches!(err, OrientationError::InvalidParameter(_)));
    }

    #[test]
    fn test_batch_form() {
        let axes = [Vector3::x(), Vector3::y()];
        let rotations = axis_angle_to_matrices(&axes, &[PI, FRAC_PI_2]).unwrap();
        assert_eq!(rotations.len(), 2);
        assert_relative_eq!(
            rotations[0],
            axis_angle_to_matrix(&Vector3::x(), PI).unwrap(),
            epsilon = TOL
        );

        let err = axis_angle_to_matrices(&axes, &[PI]).unwrap_err();
        assert!(matches!(err, OrientationError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_ipf_direction() {
        let nd = normal_direction();
        let uvw = ipf_direction(&Matrix3::identity(), &nd).unwrap();
        assert_relative_eq!(uvw, Vector3::z(), epsilon = TOL);

        let r = axis_angle_to_matrix(&Vector3::x(), FRAC_PI_2).unwrap();
        let uvw = ipf_direction(&r, &Vector3::new(0.0, 0.0, 2.0)).unwrap();
        assert_relative_eq!(uvw, Vector3::y(), epsilon = TOL);

        let batch = ipf_directions(&[Matrix3::identity(), r], &nd).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(ipf_direction(&r, &Vector3::zeros()).is_err());
    }
}
