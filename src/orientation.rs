//! Spatial orientation transforms.
//!
//! All transforms act on the first two axes of an `Array3` (the spatial
//! plane) and leave the third (spectral or channel) axis untouched. Results
//! are returned in standard layout.

use ndarray::{Array3, Axis};

/// Rotate the spatial plane 90° clockwise.
///
/// `out[[i, j, k]] == a[[n0 - 1 - j, i, k]]`, shape `(n1, n0, k)`.
pub fn rotate_clockwise(a: &Array3<f64>) -> Array3<f64> {
    let mut view = a.view();
    view.swap_axes(0, 1);
    view.invert_axis(Axis(1));
    view.as_standard_layout().into_owned()
}

/// Rotate the spatial plane 90° counter-clockwise.
///
/// `out[[i, j, k]] == a[[j, n1 - 1 - i, k]]`, shape `(n1, n0, k)`.
pub fn rotate_counter_clockwise(a: &Array3<f64>) -> Array3<f64> {
    let mut view = a.view();
    view.invert_axis(Axis(1));
    view.swap_axes(0, 1);
    view.as_standard_layout().into_owned()
}

/// Mirror the column axis (axis 1).
pub fn mirror_columns(a: &Array3<f64>) -> Array3<f64> {
    let mut view = a.view();
    view.invert_axis(Axis(1));
    view.as_standard_layout().into_owned()
}

/// Map a decoded `[column, row, k]` array to displayed image axes.
///
/// Rotates clockwise then mirrors columns. The result is addressed
/// `[row, column, k]` with row 0 at the top and column 0 at the left.
pub fn normalize(a: &Array3<f64>) -> Array3<f64> {
    mirror_columns(&rotate_clockwise(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x3 spatial plane with a single layer, value = 10 * i + j
    fn sample() -> Array3<f64> {
        Array3::from_shape_fn((2, 3, 1), |(i, j, _)| (10 * i + j) as f64)
    }

    #[test]
    fn test_rotate_clockwise() {
        let r = rotate_clockwise(&sample());
        assert_eq!(r.dim(), (3, 2, 1));
        // [[0,1,2],[10,11,12]] rotated clockwise -> [[10,0],[11,1],[12,2]]
        assert_eq!(r[[0, 0, 0]], 10.0);
        assert_eq!(r[[0, 1, 0]], 0.0);
        assert_eq!(r[[2, 0, 0]], 12.0);
        assert_eq!(r[[2, 1, 0]], 2.0);
    }

    #[test]
    fn test_rotate_counter_clockwise() {
        let r = rotate_counter_clockwise(&sample());
        assert_eq!(r.dim(), (3, 2, 1));
        // [[0,1,2],[10,11,12]] rotated counter-clockwise -> [[2,12],[1,11],[0,10]]
        assert_eq!(r[[0, 0, 0]], 2.0);
        assert_eq!(r[[0, 1, 0]], 12.0);
        assert_eq!(r[[2, 0, 0]], 0.0);
        assert_eq!(r[[2, 1, 0]], 10.0);
    }

    #[test]
    fn test_rotations_are_inverse() {
        let a = sample();
        assert_eq!(rotate_counter_clockwise(&rotate_clockwise(&a)), a);
    }

    #[test]
    fn test_normalize_is_spatial_transpose() {
        let a = Array3::from_shape_fn((3, 4, 2), |(i, j, k)| (100 * i + 10 * j + k) as f64);
        let n = normalize(&a);
        assert_eq!(n.dim(), (4, 3, 2));
        for ((i, j, k), &v) in n.indexed_iter() {
            assert_eq!(v, a[[j, i, k]]);
        }
        assert!(n.is_standard_layout());
    }
}
