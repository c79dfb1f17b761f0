//! Flattening a cube into an observation matrix.

use ndarray::{Array2, Array3};

use crate::error::{PifmError, Result};

/// Reshape `(x, y, s)` into `(x * y, s)`, dividing every spectrum by
/// `laser_power`.
///
/// Rows are ordered with `y` varying fastest: `(0, 0), (0, 1), ..., (1, 0)`.
pub fn to_2d(cube: &Array3<f64>, laser_power: f64) -> Result<Array2<f64>> {
    if !laser_power.is_finite() || laser_power == 0.0 {
        return Err(PifmError::invalid("laser_power", laser_power.to_string()));
    }
    let (nx, ny, ns) = cube.dim();
    Ok(Array2::from_shape_fn((nx * ny, ns), |(row, k)| {
        cube[[row / ny, row % ny, k]] / laser_power
    }))
}
