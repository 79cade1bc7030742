// Misorientation module: angles between orientations, batch reductions and neighbor fields
// Inputs are matrices on which crystal symmetry acts from the left (M = R^T, or OR transformations)

// ======================== MODULE DECLARATIONS ========================
pub mod misorientation_angles;
pub mod misorientation_field;

mod _tests_misorientation_field;

// ======================== PAIRWISE ANGLES ========================
pub use misorientation_angles::{
    MisorientationOutput,        // enum - Aggregated(f64) | PerElement(Vec<f64>)
    trace_to_angle,              // fn(trace: f64, unit: AngleUnit) -> f64
    misorientation_trace,        // fn(a, b, symmetry_aware: bool) -> f64 - |tr(A^T B)|, max over g·B
    misorientation_angle,        // fn(a, b, symmetry_aware: bool, unit: AngleUnit) -> f64
    aggregate,                   // fn(values: Vec<f64>, aggregation: Aggregation) -> Result<MisorientationOutput>
    misorientation_to_reference, // fn(set: &[RotationMatrix], reference, config) -> Result<MisorientationOutput>
    misorientation_pairs,        // fn(a: &[RotationMatrix], b: &[RotationMatrix], config) -> Result<MisorientationOutput>
};

// ======================== NEIGHBOR FIELD ========================
pub use misorientation_field::{
    NeighborTable,        // struct - row-major neighbor indices, -1 or out of range = none
    NeighborReduction,    // enum - Mean (KAM) | Min | Max over the available slots
    MisorientationField,  // struct - Option<f64> per (measurement, slot)
    misorientation_field, // fn(orientations, neighbors: &NeighborTable, selection: Option<&[bool]>, config) -> Result<MisorientationField>
};

// NeighborTable impl methods:
//   new(indices: Vec<i64>, slots) -> Result<Self>  - ShapeMismatch unless len % slots == 0
//   from_rows(rows: &[Vec<i64>]) -> Result<Self>
//   len(), slots(), row(i) -> &[i64]

// MisorientationField impl methods:
//   get(i, k) -> Option<f64>
//   row(i) -> &[Option<f64>]
//   to_filled() -> Vec<f64>                         - missing slots as -1.0
//   reduce(reduction: NeighborReduction) -> Vec<Option<f64>> - per measurement over available slots
//   kernel_average() -> Vec<Option<f64>>            - KAM
