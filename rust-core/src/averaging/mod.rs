// Averaging module: symmetry alignment and grid-search refinement of mean orientations

// ======================== MODULE DECLARATIONS ========================
pub mod average_orientation;
pub mod disorientation_minimizer;


// ======================== REFINEMENT ========================
pub use disorientation_minimizer::{
    DisorientationMinimization, // struct - refined rotation + score history (non-decreasing)
    alignment_score,            // fn(rotations: &[RotationMatrix], x: &RotationMatrix) -> f64 - mean |tr(V_n X^T)|
    minimize_disorientation,    // fn(rotations, initial: &RotationMatrix, config: &AveragingConfig) -> Result<DisorientationMinimization>
    refine_average,             // fn(rotations, config) -> Result<DisorientationMinimization> - mean-matrix seed + refinement
};

// ======================== AVERAGE ORIENTATION ========================
pub use average_orientation::{
    align_to_reference,  // fn(orientations: &[RotationMatrix], reference) -> Vec<(usize, RotationMatrix)>
    average_orientation, // fn(rotations: &[RotationMatrix], selection: Option<&[bool]>, config) -> Result<RotationMatrix>
};
