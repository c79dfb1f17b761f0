//! Wavenumber range reduction.

use ndarray::{Array2, Axis, s};

use crate::error::{PifmError, Result};
use crate::hyper::HyperImage;
use crate::wavelength::wavenumber_index;

/// Half-open `(begin, end)` index range along one spatial axis.
pub type Window = (usize, usize);

fn resolve_window(window: Option<Window>, extent: usize, axis: &str) -> Result<Window> {
    let (begin, end) = window.unwrap_or((0, extent));
    // Bounds past the extent clamp, as array slicing does
    let end = end.min(extent);
    if begin >= end {
        return Err(PifmError::empty_range(format!(
            "{axis} window {begin}..{end} selects no pixels (extent {extent})"
        )));
    }
    Ok((begin, end))
}

/// Sum the hyperspectral cube over a wavenumber range.
///
/// Wavenumbers are matched against the axis truncated toward zero, first
/// match wins. Every plane between the two matched indices is summed,
/// inclusive at both ends, whichever order `start` and `stop` come in. The
/// instrument writes the axis from high to low wavenumber, so a numerically
/// smaller `start` normally sits at the larger index.
///
/// `rows` and `cols` restrict the spatial window; `None` means the full
/// extent.
pub fn hyperslice(
    hyper: &HyperImage,
    start: i64,
    stop: i64,
    rows: Option<Window>,
    cols: Option<Window>,
) -> Result<Array2<f64>> {
    let axis = hyper.wavelengths();
    let first = wavenumber_index(axis, stop).ok_or(PifmError::WavenumberNotFound(stop))?;
    let last = wavenumber_index(axis, start).ok_or(PifmError::WavenumberNotFound(start))?;
    let (lo, hi) = (first.min(last), first.max(last));

    let cube = hyper.hyper_image();
    let (n_rows, n_cols, _) = cube.dim();
    let (r0, r1) = resolve_window(rows, n_rows, "row")?;
    let (c0, c1) = resolve_window(cols, n_cols, "column")?;

    log::debug!(
        "hyperslice {}..{} -> planes {}..={}, rows {}..{}, cols {}..{}",
        start,
        stop,
        lo,
        hi,
        r0,
        r1,
        c0,
        c1
    );

    Ok(cube.slice(s![r0..r1, c0..c1, lo..=hi]).sum_axis(Axis(2)))
}
