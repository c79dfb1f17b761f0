//! Raw channel binary decoding.
//!
//! Each channel is a headerless file of little-endian `i32` samples written
//! scan line by scan line: `y_pixel` rows, each holding `x_pixel` pixels,
//! each pixel holding one sample (scalar channels) or one sample per
//! wavenumber (the hyperspectral channel). Samples are multiplied by the
//! channel's `Scale` to get physical values.
//!
//! Decoded grids are addressed `[column, row]` (and `[column, row, plane]`),
//! i.e. transposed relative to the read order. The orientation step in
//! [`crate::orientation`] relies on this layout.

use std::path::Path;

use ndarray::{Array2, Array3};

use crate::anfatec::ScanParameters;
use crate::error::{PifmError, Result};

/// Size of one sample on disk.
pub const SAMPLE_BYTES: usize = std::mem::size_of::<i32>();

/// Pixel geometry of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Pixels per scan line (columns)
    pub x_pixel: usize,
    /// Number of scan lines (rows)
    pub y_pixel: usize,
}

impl Geometry {
    /// Create a geometry from explicit pixel counts.
    pub fn new(x_pixel: usize, y_pixel: usize) -> Self {
        Self { x_pixel, y_pixel }
    }

    /// Read `xPixel` / `yPixel` from the scan parameters.
    pub fn from_scan_params(params: &ScanParameters) -> Result<Self> {
        let geometry = Self::new(
            params.require_usize("xPixel", "scan parameters")?,
            params.require_usize("yPixel", "scan parameters")?,
        );
        if geometry.x_pixel == 0 {
            return Err(PifmError::invalid("xPixel", "0"));
        }
        if geometry.y_pixel == 0 {
            return Err(PifmError::invalid("yPixel", "0"));
        }
        geometry.byte_len(1)?;
        Ok(geometry)
    }

    /// Pixels per plane, `None` if the product overflows.
    pub fn pixel_count(&self) -> Option<usize> {
        self.x_pixel.checked_mul(self.y_pixel)
    }

    /// On-disk size of a channel with `planes` samples per pixel.
    pub fn byte_len(&self, planes: usize) -> Result<usize> {
        self.pixel_count()
            .and_then(|n| n.checked_mul(planes))
            .and_then(|n| n.checked_mul(SAMPLE_BYTES))
            .ok_or_else(|| {
                PifmError::invalid(
                    "xPixel",
                    format!(
                        "{} x {} pixels with {} planes overflows",
                        self.x_pixel, self.y_pixel, planes
                    ),
                )
            })
    }
}

fn decode_samples(bytes: &[u8], expected: usize, path: &Path) -> Result<Vec<i32>> {
    if bytes.len() != expected {
        return Err(PifmError::TruncatedData {
            path: path.to_path_buf(),
            bytes: bytes.len(),
            expected,
        });
    }
    Ok(bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Decode a single-plane channel into an `(x_pixel, y_pixel)` grid.
///
/// `grid[[col, row]] == scale * sample(row, col)`.
pub fn decode_channel(
    bytes: &[u8],
    geometry: Geometry,
    scale: f64,
    path: &Path,
) -> Result<Array2<f64>> {
    let samples = decode_samples(bytes, geometry.byte_len(1)?, path)?;
    let by_row = Array2::from_shape_vec((geometry.y_pixel, geometry.x_pixel), samples)
        .map_err(|e| PifmError::shape_mismatch(e.to_string()))?;
    Ok(by_row.reversed_axes().mapv(|v| f64::from(v) * scale))
}

/// Decode the hyperspectral channel into an `(x_pixel, y_pixel, planes)` cube.
///
/// `cube[[col, row, s]] == scale * sample(row, col, s)`.
pub fn decode_hyper(
    bytes: &[u8],
    geometry: Geometry,
    planes: usize,
    scale: f64,
    path: &Path,
) -> Result<Array3<f64>> {
    let samples = decode_samples(bytes, geometry.byte_len(planes)?, path)?;
    let by_row = Array3::from_shape_vec((geometry.y_pixel, geometry.x_pixel, planes), samples)
        .map_err(|e| PifmError::shape_mismatch(e.to_string()))?;
    Ok(by_row.permuted_axes([1, 0, 2]).mapv(|v| f64::from(v) * scale))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| PifmError::io(path, e))
}

/// Read a single-plane channel file.
pub fn read_channel(path: &Path, geometry: Geometry, scale: f64) -> Result<Array2<f64>> {
    let bytes = read_bytes(path)?;
    log::debug!(
        "Decoding channel {} ({} bytes, {}x{})",
        path.display(),
        bytes.len(),
        geometry.x_pixel,
        geometry.y_pixel
    );
    decode_channel(&bytes, geometry, scale, path)
}

/// Read the hyperspectral channel file with `planes` samples per pixel.
pub fn read_hyper_channel(
    path: &Path,
    geometry: Geometry,
    planes: usize,
    scale: f64,
) -> Result<Array3<f64>> {
    let bytes = read_bytes(path)?;
    log::debug!(
        "Decoding hyperspectral channel {} ({} bytes, {}x{}x{})",
        path.display(),
        bytes.len(),
        geometry.x_pixel,
        geometry.y_pixel,
        planes
    );
    decode_hyper(&bytes, geometry, planes, scale, path)
}
