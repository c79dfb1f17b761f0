//! Hyperspectral scan assembly.
//!
//! [`HyperImage`] ties the parameter file, the wavelength axis and the raw
//! channel binaries together into one cube plus a stack of scalar channel
//! images, both in displayed image orientation.

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::anfatec::{Descriptor, ParserOptions, ScanParameters, read_anfatec_params};
use crate::error::{PifmError, Result};
use crate::orientation;
use crate::raw::{Geometry, read_channel, read_hyper_channel};
use crate::wavelength::{load_wavelengths, wavenumber_index};

/// Descriptor key holding the binary file name.
pub const KEY_FILE_NAME: &str = "FileName";
/// Descriptor key holding the wavelength axis file (first channel only).
pub const KEY_WAVELENGTHS: &str = "FileNameWavelengths";
/// Descriptor key holding the integer-to-physical scale factor.
pub const KEY_SCALE: &str = "Scale";
/// Descriptor key holding the channel name.
pub const KEY_CAPTION: &str = "Caption";

/// Options for [`HyperImage::open_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Parameter file parsing options; the encoding also applies to the
    /// wavelength file.
    pub parser: ParserOptions,
}

impl LoadOptions {
    /// Create load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parser options.
    pub fn parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }

    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PifmError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// A loaded PiFM scan.
///
/// Spatial axes of both `hyper_image` and `channel_data` are
/// `[row, column]` with row 0 at the top of the displayed image.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperImage {
    source: Option<PathBuf>,
    params: ScanParameters,
    spectra: Vec<Descriptor>,
    wavelengths: Array1<f64>,
    hyper_image: Array3<f64>,
    channel_names: Vec<String>,
    channel_data: Array3<f64>,
}

fn describe(index: usize, descriptor: &Descriptor) -> String {
    match descriptor.get(KEY_CAPTION) {
        Some(caption) => format!("channel descriptor {index} ({caption})"),
        None => format!("channel descriptor {index}"),
    }
}

impl HyperImage {
    /// Load a scan from its ANFATEC parameter file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &LoadOptions::default())
    }

    /// Load a scan from its ANFATEC parameter file.
    ///
    /// File names in the descriptors are resolved against the directory
    /// holding the parameter file.
    pub fn open_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let full_path = std::fs::canonicalize(path).map_err(|e| PifmError::io(path, e))?;
        let directory = full_path.parent().unwrap_or_else(|| Path::new("."));
        log::info!("Loading PiFM scan {}", full_path.display());

        let parsed = read_anfatec_params(&full_path, options.parser)?;
        let geometry = Geometry::from_scan_params(&parsed.scan_params)?;

        let (hyper_desc, channel_descs) = parsed
            .channels
            .split_first()
            .ok_or_else(|| PifmError::missing(KEY_FILE_NAME, "hyperspectral channel descriptor"))?;

        let context = describe(0, hyper_desc);
        let wavelength_file = hyper_desc.require(KEY_WAVELENGTHS, &context)?;
        let scale = hyper_desc.require_f64(KEY_SCALE, &context)?;
        let hyper_file = hyper_desc.require(KEY_FILE_NAME, &context)?;

        let wavelengths =
            load_wavelengths(&directory.join(wavelength_file), options.parser.encoding)?;
        let raw_hyper = read_hyper_channel(
            &directory.join(hyper_file),
            geometry,
            wavelengths.len(),
            scale,
        )?;

        let mut stack =
            Array3::<f64>::zeros((geometry.x_pixel, geometry.y_pixel, channel_descs.len()));
        let mut channel_names = Vec::with_capacity(channel_descs.len());
        for (ch, desc) in channel_descs.iter().enumerate() {
            let context = describe(ch + 1, desc);
            let caption = desc.require(KEY_CAPTION, &context)?;
            let scale = desc.require_f64(KEY_SCALE, &context)?;
            let file = desc.require(KEY_FILE_NAME, &context)?;

            let grid = read_channel(&directory.join(file), geometry, scale)?;
            stack.index_axis_mut(Axis(2), ch).assign(&grid);
            channel_names.push(caption.to_string());
        }

        let hyper = Self {
            source: Some(full_path.clone()),
            params: parsed.scan_params,
            spectra: parsed.spectra,
            wavelengths,
            hyper_image: orientation::normalize(&raw_hyper),
            channel_names,
            channel_data: orientation::normalize(&stack),
        };

        log::info!(
            "Loaded {}: {}x{} pixels, {} wavenumbers, {} channels",
            full_path.display(),
            geometry.x_pixel,
            geometry.y_pixel,
            hyper.wavelengths.len(),
            hyper.channel_names.len()
        );
        Ok(hyper)
    }

    /// Assemble a scan from arrays that are already in display orientation.
    ///
    /// `hyper_image` must be `(rows, cols, wavelengths.len())` and
    /// `channel_data` must be `(rows, cols, channel_names.len())`.
    pub fn from_arrays(
        params: ScanParameters,
        wavelengths: Array1<f64>,
        hyper_image: Array3<f64>,
        channel_names: Vec<String>,
        channel_data: Array3<f64>,
    ) -> Result<Self> {
        let (rows, cols, planes) = hyper_image.dim();
        if planes != wavelengths.len() {
            return Err(PifmError::shape_mismatch(format!(
                "cube has {} planes but the wavelength axis has {} entries",
                planes,
                wavelengths.len()
            )));
        }
        if channel_data.dim() != (rows, cols, channel_names.len()) {
            return Err(PifmError::shape_mismatch(format!(
                "channel stack {:?} does not match {}x{} pixels with {} names",
                channel_data.dim(),
                rows,
                cols,
                channel_names.len()
            )));
        }
        Ok(Self {
            source: None,
            params,
            spectra: Vec::new(),
            wavelengths,
            hyper_image,
            channel_names,
            channel_data,
        })
    }

    /// Canonical path of the parameter file, if loaded from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Global scan parameters.
    pub fn params(&self) -> &ScanParameters {
        &self.params
    }

    /// Spectrum descriptors declared in the parameter file.
    pub fn spectra(&self) -> &[Descriptor] {
        &self.spectra
    }

    /// Wavenumber of each spectral plane.
    pub fn wavelengths(&self) -> &Array1<f64> {
        &self.wavelengths
    }

    /// Hyperspectral cube `(rows, cols, wavenumbers)`.
    pub fn hyper_image(&self) -> &Array3<f64> {
        &self.hyper_image
    }

    /// Channel captions aligned with the third axis of `channel_data`.
    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    /// Scalar channel images `(rows, cols, channels)`.
    pub fn channel_data(&self) -> &Array3<f64> {
        &self.channel_data
    }

    /// Image of the channel with the given caption.
    pub fn channel(&self, caption: &str) -> Option<ArrayView2<'_, f64>> {
        let idx = self.channel_names.iter().position(|n| n == caption)?;
        Some(self.channel_data.index_axis(Axis(2), idx))
    }

    /// Spectral plane at the first axis entry that truncates to `wavenumber`.
    pub fn plane(&self, wavenumber: i64) -> Result<ArrayView2<'_, f64>> {
        let idx = wavenumber_index(&self.wavelengths, wavenumber)
            .ok_or(PifmError::WavenumberNotFound(wavenumber))?;
        Ok(self.hyper_image.index_axis(Axis(2), idx))
    }
}
