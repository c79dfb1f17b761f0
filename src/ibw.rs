//! Igor binary wave (`.ibw`) boundary.
//!
//! Decoding the binary wave container itself is left to an implementation
//! of [`BinaryWaveDecoder`]; this module only applies the PiFM conventions
//! on top: optional flattening of the topography plane and rotation into
//! display orientation.

use std::path::Path;

use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::error::{PifmError, Result};
use crate::orientation;

/// Payload of a decoded binary wave.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryWave {
    /// Wave data `(rows, cols, layers)`; layer 0 is topography.
    pub data: Array3<f64>,
}

/// Decoder for the binary wave container format.
pub trait BinaryWaveDecoder {
    /// Load the wave stored at `path`.
    fn load(&self, path: &Path) -> Result<BinaryWave>;
}

/// Trend removal applied to a single 2-D layer.
pub trait Detrend {
    /// Return `data` with its trend removed. Output shape equals input shape.
    fn detrend(&self, data: ArrayView2<'_, f64>) -> Array2<f64>;
}

/// Removes the least-squares straight line from every lane along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDetrend {
    /// Axis the line is fitted along.
    pub axis: Axis,
}

impl Default for LinearDetrend {
    fn default() -> Self {
        Self { axis: Axis(0) }
    }
}

impl Detrend for LinearDetrend {
    fn detrend(&self, data: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut out = data.to_owned();
        let n = out.len_of(self.axis);
        if n == 0 {
            return out;
        }
        let centre = (n - 1) as f64 / 2.0;
        let sxx: f64 = (0..n).map(|t| (t as f64 - centre).powi(2)).sum();

        for mut lane in out.lanes_mut(self.axis) {
            let mean = lane.sum() / n as f64;
            let slope = if sxx > 0.0 {
                lane.iter()
                    .enumerate()
                    .map(|(t, &v)| (t as f64 - centre) * (v - mean))
                    .sum::<f64>()
                    / sxx
            } else {
                0.0
            };
            for (t, v) in lane.iter_mut().enumerate() {
                *v -= mean + slope * (t as f64 - centre);
            }
        }
        out
    }
}

/// Load a binary wave and rotate it 90° counter-clockwise.
///
/// With `flatten`, layer 0 (topography) is replaced by its detrended
/// version before rotation. Other layers are untouched.
pub fn load_ibw(
    path: &Path,
    decoder: &dyn BinaryWaveDecoder,
    flatten: Option<&dyn Detrend>,
) -> Result<Array3<f64>> {
    let mut data = decoder.load(path)?.data;

    if let Some(detrend) = flatten {
        if data.len_of(Axis(2)) == 0 {
            return Err(PifmError::shape_mismatch(format!(
                "{} has no topography layer to flatten",
                path.display()
            )));
        }
        let flat = detrend.detrend(data.index_axis(Axis(2), 0));
        let mut topo = data.index_axis_mut(Axis(2), 0);
        if flat.dim() != topo.dim() {
            return Err(PifmError::shape_mismatch(format!(
                "detrended layer {:?} does not match {:?}",
                flat.dim(),
                topo.dim()
            )));
        }
        topo.assign(&flat);
        log::debug!("Flattened topography layer of {}", path.display());
    }

    Ok(orientation::rotate_counter_clockwise(&data))
}
