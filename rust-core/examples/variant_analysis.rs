/// Example walking through a parent/child orientation analysis
///
/// Builds the Kurdjumov-Sachs and Nishiyama-Wassermann variant sets, creates a
/// small synthetic map of parent and child pixels, and recovers the
/// relationship from the measured orientations.
use ebsd_orientation::prelude::*;
use nalgebra::Vector3;

fn main() -> Result<()> {
    println!("=== Orientation relationship analysis ===\n");

    // Example 1: analytic variant sets
    println!("1. Analytic relationships:");
    let ks = orientation_relationship(&OrSpecification::kurdjumov_sachs(), &OrConfig::default())?;
    let nw = orientation_relationship(&OrSpecification::nishiyama_wassermann(), &OrConfig::default())?;
    println!("   Kurdjumov-Sachs variants: {}", ks.len());
    println!("   Nishiyama-Wassermann variants: {}", nw.len());
    let ks_nw = nw
        .iter()
        .map(|v| misorientation_angle(&ks[0], v, true, AngleUnit::Degrees))
        .fold(f64::INFINITY, f64::min);
    println!("   KS/NW disorientation: {:.3} deg\n", ks_nw);

    // Example 2: a synthetic map, parent phase 2 and child phase 1
    println!("2. Synthetic map:");
    let parent = euler_to_matrix(&EulerAngles::from_degrees(30.0, 40.0, 50.0), EulerConvention::Zxz);
    let ops = cubic_symmetry_operators();
    let mut rotations = Vec::new();
    let mut phases = Vec::new();
    for k in 0..4 {
        let scatter = axis_angle_to_matrix(&Vector3::new(1.0, k as f64, 1.0), 0.002 * k as f64)?;
        rotations.push(parent * scatter);
        phases.push(2u8);
    }
    for k in 0..6 {
        let m = ops[(5 * k) % 24] * ks[(7 * k) % ks.len()] * parent.transpose();
        rotations.push(m.transpose());
        phases.push(1u8);
    }
    let map = OrientationMap::from_rotations(rotations, phases)?;
    println!("   {} pixels, {} parent", map.len(), map.phase_selection(2).iter().filter(|&&p| p).count());

    // Example 3: recover the relationship from the map
    println!("\n3. Experimental relationship:");
    let result = map.orientation_relationship(PhasePair::default(), None, &ExperimentalOrConfig::default())?;
    let closest = ks
        .iter()
        .map(|v| misorientation_angle(&result.average, v, true, AngleUnit::Degrees))
        .fold(f64::INFINITY, f64::min);
    println!("   Child pixels used: {}", result.child_indices.len());
    println!("   Distance of the average to KS: {:.4} deg", closest);
    let deviations = result.deviations(AngleUnit::Degrees);
    let worst = deviations.iter().copied().fold(0.0, f64::max);
    println!("   Largest pixel deviation from the average: {:.4} deg", worst);

    let parent_angles = matrix_to_euler(
        &result.parent_orientation,
        EulerConvention::Zxz,
        GimbalLockPolicy::Collapse,
    )?;
    let [phi1, phi, phi2] = parent_angles.to_degrees();
    println!("   Parent orientation: ({:.2}, {:.2}, {:.2}) deg", phi1, phi, phi2);

    Ok(())
}
