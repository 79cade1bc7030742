use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use nalgebra::Vector3;
use ebsd_orientation::prelude::*;

/// Deterministic spread of Euler triples over orientation space
fn euler_arrays(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let phi1 = (0..n).map(|i| (i as f64 * 0.731).rem_euclid(6.28)).collect();
    let phi = (0..n).map(|i| (i as f64 * 0.377).rem_euclid(3.14)).collect();
    let phi2 = (0..n).map(|i| (i as f64 * 1.113).rem_euclid(6.28)).collect();
    (phi1, phi, phi2)
}

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");

    for &n in &[1_000usize, 100_000] {
        let (phi1, phi, phi2) = euler_arrays(n);
        group.bench_with_input(BenchmarkId::new("euler_to_matrices", n), &n, |b, _| {
            b.iter(|| euler_to_matrices(black_box(&phi1), &phi, &phi2, EulerConvention::Zxz));
        });

        let rotations = euler_to_matrices(&phi1, &phi, &phi2, EulerConvention::Zxz).unwrap();
        group.bench_with_input(BenchmarkId::new("matrices_to_euler", n), &n, |b, _| {
            b.iter(|| {
                matrices_to_euler(
                    black_box(&rotations),
                    EulerConvention::Zxz,
                    GimbalLockPolicy::Collapse,
                )
            });
        });
    }

    group.finish();
}

fn bench_misorientation(c: &mut Criterion) {
    let mut group = c.benchmark_group("misorientation");

    let n = 10_000;
    let (phi1, phi, phi2) = euler_arrays(n);
    let orientations: Vec<RotationMatrix> = euler_to_matrices(&phi1, &phi, &phi2, EulerConvention::Zxz)
        .unwrap()
        .iter()
        .map(|r| r.transpose())
        .collect();

    // 6 neighbors on a wrapped line
    let indices: Vec<i64> = (0..n as i64)
        .flat_map(|i| [-3, -2, -1, 1, 2, 3].map(|d| (i + d).rem_euclid(n as i64)))
        .collect();
    let neighbors = NeighborTable::new(indices, 6).unwrap();

    group.bench_function("field_10k_x6", |b| {
        b.iter(|| {
            misorientation_field(
                black_box(&orientations),
                &neighbors,
                None,
                &MisorientationConfig::default(),
            )
        });
    });

    group.bench_function("to_reference_10k", |b| {
        b.iter(|| {
            misorientation_to_reference(
                black_box(&orientations),
                &orientations[0],
                &MisorientationConfig::default().with_aggregation(Aggregation::Avg),
            )
        });
    });

    group.finish();
}

fn bench_relationships(c: &mut Criterion) {
    let mut group = c.benchmark_group("relationships");

    group.bench_function("kurdjumov_sachs_variants", |b| {
        b.iter(|| {
            orientation_relationship(
                black_box(&OrSpecification::kurdjumov_sachs()),
                &OrConfig::default(),
            )
        });
    });

    // One grain with sub-degree scatter
    let center = euler_to_matrix(&EulerAngles::new(0.3, 0.6, 1.2), EulerConvention::Zxz);
    let grain: Vec<RotationMatrix> = (0..500)
        .map(|i| {
            let axis = Vector3::new(1.0, (i % 3) as f64, 0.5);
            let angle = (i as f64 * 0.618).sin() * 0.01;
            center * axis_angle_to_matrix(&axis, angle).unwrap()
        })
        .collect();
    group.bench_function("average_orientation_500", |b| {
        b.iter(|| average_orientation(black_box(&grain), None, &AveragingConfig::default()));
    });

    group.finish();
}

criterion_group!(
    orientation_benches,
    bench_conversions,
    bench_misorientation,
    bench_relationships
);
criterion_main!(orientation_benches);
