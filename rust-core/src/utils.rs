// Batch helpers shared by the per-measurement computations

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{OrientationError, Result};

/// Map `f` over `0..n`, in parallel when the `parallel` feature is enabled.
/// Output order always follows the index order.
pub(crate) fn map_indices<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..n).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(f).collect()
    }
}

/// Fail with `ShapeMismatch` unless `found == expected`
pub(crate) fn check_len(context: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(OrientationError::ShapeMismatch {
            context,
            expected,
            found,
        });
    }
    Ok(())
}

/// Indices of the selected entries. `None` selects everything.
pub(crate) fn selected_indices(n: usize, selection: Option<&[bool]>) -> Result<Vec<usize>> {
    match selection {
        Some(mask) => {
            check_len("selection mask", n, mask.len())?;
            Ok(mask
                .iter()
                .enumerate()
                .filter_map(|(i, &keep)| keep.then_some(i))
                .collect())
        }
        None => Ok((0..n).collect()),
    }
}

/// Wrap an angle into [0, 2π)
pub(crate) fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * std::f64::consts::PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= 2.0 * std::f64::consts::PI {
        0.0
    } else {
        wrapped
    }
}
