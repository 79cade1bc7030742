// Relationships module: parent/child orientation relationships and their variants
// Transformation matrices V map parent crystal coordinates to child crystal coordinates

// ======================== MODULE DECLARATIONS ========================
pub mod analytic_relationship;
pub mod experimental_relationship;
pub mod variant_reduction;

mod _tests_variant_reduction;

// ======================== VARIANT REDUCTION ========================
pub use variant_reduction::{
    reduce_cubic_transformations, // fn(transformations: &[RotationMatrix], config: &ReductionConfig) -> Vec<RotationMatrix>
};

// ======================== ANALYTIC RELATIONSHIP ========================
pub use analytic_relationship::{
    OrSpecification,          // struct - parallel planes and directions of both phases
    orientation_relationship, // fn(specification: &OrSpecification, config: &OrConfig) -> Result<Vec<RotationMatrix>>
};

// OrSpecification impl methods:
//   new(parent_plane, parent_direction, child_plane, child_direction) -> Self
//   kurdjumov_sachs() -> Self           - 24 variants
//   nishiyama_wassermann() -> Self      - 12 variants

// ======================== EXPERIMENTAL RELATIONSHIP ========================
pub use experimental_relationship::{
    ExperimentalOr,                       // struct - per-pixel variants, average, parent orientation, operator indices
    experimental_orientation_relationship, // fn(rotations, phases: &[u8], phase_pair: PhasePair, selection, config) -> Result<ExperimentalOr>
};
