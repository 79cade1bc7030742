#[cfg(test)]
mod _tests_variant_reduction {
    use super::super::variant_reduction::*;
    use crate::config::{ReductionConfig, VariantSelection};
    use crate::interfaces::AngleUnit;
    use crate::misorientation::misorientation_angle;
    use crate::rotations::axis_angle_to_matrix;
    use crate::symmetries::{cubic_symmetry_operators, find_symmetry_operator};
    use nalgebra::{Matrix3, Vector3};

    fn first_of_class() -> ReductionConfig {
        ReductionConfig {
            selection: VariantSelection::FirstOfClass,
            ..ReductionConfig::default()
        }
    }

    #[test]
    fn test_trace_threshold() {
        let config = ReductionConfig::default();
        assert!(config.trace_threshold() < 3.0);
        assert!(config.trace_threshold() > 3.0 - 1e-9);
    }

    #[test]
    fn test_symmetry_images_collapse_to_one() {
        let v = axis_angle_to_matrix(&Vector3::new(1.0, 2.0, 2.0), 0.4).unwrap();
        let images: Vec<Matrix3<f64>> = cubic_symmetry_operators().iter().map(|g| g * v).collect();

        // The last member of the class survives
        let reduced = reduce_cubic_transformations(&images, &ReductionConfig::default());
        assert_eq!(reduced, vec![images[23]]);

        let reduced = reduce_cubic_transformations(&images, &first_of_class());
        assert_eq!(reduced, vec![v]);
    }

    #[test]
    fn test_orbit_size_divides_group_order() {
        let v = axis_angle_to_matrix(&Vector3::new(1.0, 1.0, 0.0), 0.3).unwrap();
        let orbit: Vec<Matrix3<f64>> = cubic_symmetry_operators()
            .iter()
            .map(|g| v * g.transpose())
            .collect();

        for config in [ReductionConfig::default(), first_of_class()] {
            let reduced = reduce_cubic_transformations(&orbit, &config);
            assert!(!reduced.is_empty());
            assert_eq!(24 % reduced.len(), 0);
            for (i, a) in reduced.iter().enumerate() {
                for b in &reduced[i + 1..] {
                    let angle = misorientation_angle(a, b, true, AngleUnit::Degrees);
                    assert!(angle > config.tolerance_deg);
                }
            }
        }
    }

    #[test]
    fn test_identity_orbit() {
        // Every g^T is equivalent to the identity
        let orbit: Vec<Matrix3<f64>> = cubic_symmetry_operators()
            .iter()
            .map(|g| g.transpose())
            .collect();
        let reduced = reduce_cubic_transformations(&orbit, &ReductionConfig::default());
        assert_eq!(reduced.len(), 1);
        assert!(find_symmetry_operator(&reduced[0], 1e-9).is_some());

        let reduced = reduce_cubic_transformations(&orbit, &first_of_class());
        assert_eq!(reduced, vec![Matrix3::identity()]);
    }

    #[test]
    fn test_order_and_empty_input() {
        let a = axis_angle_to_matrix(&Vector3::x(), 0.1).unwrap();
        let b = axis_angle_to_matrix(&Vector3::y(), 0.2).unwrap();
        let c = axis_angle_to_matrix(&Vector3::z(), 0.3).unwrap();
        let reduced = reduce_cubic_transformations(&[a, b, c], &ReductionConfig::default());
        assert_eq!(reduced, vec![a, b, c]);

        assert!(reduce_cubic_transformations(&[], &ReductionConfig::default()).is_empty());
    }
}
