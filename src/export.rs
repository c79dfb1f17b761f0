//! Export of loaded scans to NumPy arrays and a JSON summary.

use std::path::{Path, PathBuf};

use ndarray::{ArrayBase, Data, Dimension};
use serde::Serialize;

use crate::anfatec::{Descriptor, ScanParameters};
use crate::error::{PifmError, Result};
use crate::flatten::to_2d;
use crate::hyper::HyperImage;

/// File name of the exported hyperspectral cube.
pub const HYPER_FILE: &str = "hyper.npy";
/// File name of the exported channel stack.
pub const CHANNELS_FILE: &str = "channels.npy";
/// File name of the exported wavelength axis.
pub const WAVELENGTHS_FILE: &str = "wavelengths.npy";
/// File name of the exported observation matrix.
pub const FEATURES_FILE: &str = "features.npy";
/// File name of the JSON summary.
pub const METADATA_FILE: &str = "metadata.json";

/// Serializable overview of a loaded scan.
#[derive(Debug, Serialize)]
pub struct ScanSummary<'a> {
    /// Parameter file the scan was loaded from
    pub source: Option<&'a Path>,
    /// Global scan parameters
    pub scan_params: &'a ScanParameters,
    /// Scalar channel captions
    pub channel_names: &'a [String],
    /// Spectrum descriptors
    pub spectra: &'a [Descriptor],
    /// Shape of the hyperspectral cube
    pub hyper_shape: [usize; 3],
    /// Shape of the channel stack
    pub channel_shape: [usize; 3],
    /// First and last wavenumber of the axis
    pub wavenumber_range: Option<(f64, f64)>,
}

impl<'a> ScanSummary<'a> {
    /// Summarize a scan.
    pub fn new(hyper: &'a HyperImage) -> Self {
        let axis = hyper.wavelengths();
        let (r, c, s) = hyper.hyper_image().dim();
        let (cr, cc, cn) = hyper.channel_data().dim();
        Self {
            source: hyper.source(),
            scan_params: hyper.params(),
            channel_names: hyper.channel_names(),
            spectra: hyper.spectra(),
            hyper_shape: [r, c, s],
            channel_shape: [cr, cc, cn],
            wavenumber_range: axis.first().copied().zip(axis.last().copied()),
        }
    }

    /// Human-readable multi-line description.
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        if let Some(source) = self.source {
            output.push_str(&format!("File: {}\n", source.display()));
        }
        output.push_str(&format!(
            "Pixels: {} rows x {} columns\n",
            self.hyper_shape[0], self.hyper_shape[1]
        ));
        output.push_str(&format!("Wavenumbers: {}", self.hyper_shape[2]));
        if let Some((first, last)) = self.wavenumber_range {
            output.push_str(&format!(" ({first} .. {last})"));
        }
        output.push('\n');

        output.push_str(&format!("Channels: {}\n", self.channel_names.len()));
        for name in self.channel_names {
            output.push_str(&format!("  {name}\n"));
        }
        output.push_str(&format!("Spectra: {}\n", self.spectra.len()));

        output.push_str("Scan parameters:\n");
        for (key, value) in self.scan_params.iter() {
            output.push_str(&format!("  {key}: {value}\n"));
        }
        output
    }
}

/// Write any `f64` array as a `.npy` file.
pub fn write_array<S, D>(path: &Path, array: &ArrayBase<S, D>) -> Result<()>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    ndarray_npy::write_npy(path, array)?;
    log::debug!("Wrote {:?} array to {}", array.shape(), path.display());
    Ok(())
}

/// Write a scan into `dir` as NumPy arrays plus `metadata.json`.
///
/// With `laser_power`, the cube is also written flattened to an
/// observation matrix. Returns the written paths.
pub fn write_dataset(
    hyper: &HyperImage,
    dir: &Path,
    laser_power: Option<f64>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| PifmError::io(dir, e))?;
    let mut written = Vec::new();

    let path = dir.join(HYPER_FILE);
    write_array(&path, hyper.hyper_image())?;
    written.push(path);

    let path = dir.join(CHANNELS_FILE);
    write_array(&path, hyper.channel_data())?;
    written.push(path);

    let path = dir.join(WAVELENGTHS_FILE);
    write_array(&path, hyper.wavelengths())?;
    written.push(path);

    if let Some(power) = laser_power {
        let path = dir.join(FEATURES_FILE);
        write_array(&path, &to_2d(hyper.hyper_image(), power)?)?;
        written.push(path);
    }

    let path = dir.join(METADATA_FILE);
    let json = serde_json::to_string_pretty(&ScanSummary::new(hyper))?;
    std::fs::write(&path, json).map_err(|e| PifmError::io(&path, e))?;
    written.push(path);

    log::info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}
