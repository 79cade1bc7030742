// Symmetries module: the proper rotation group of the cube
// The operator table is built once per process and shared read-only afterwards

// ======================== MODULE DECLARATIONS ========================
pub mod cubic_symmetry;


// ======================== CUBIC POINT GROUP ========================
pub use cubic_symmetry::{
    CUBIC_GROUP_ORDER,          // const - 24
    SparseOperator,             // struct - operator as (column, sign) per row
    cubic_symmetry_operators,   // fn() -> &'static [RotationMatrix; 24] - cached dense operators
    sparse_symmetry_operators,  // fn() -> &'static [SparseOperator; 24] - cached sparse operators, same order
    cubic_family_directions,    // fn(d: &Vector3<f64>) -> Vec<Vector3<f64>> - distinct g·d
    find_symmetry_operator,     // fn(m: &Matrix3<f64>, tol: f64) -> Option<usize> - table index of m
};

// SparseOperator impl methods:
//   from_matrix(m: &Matrix3<f64>) -> Option<Self>   - extracts the signed permutation pattern
//   trace_product(&self, s: &Matrix3<f64>) -> f64   - tr(g^T s) from three entries
//   to_matrix(&self) -> Matrix3<f64>                - dense form
