//! Synthetic PiFM scans for tests.
//!
//! Writes a complete dataset (parameter file, wavelength file, raw channel
//! binaries) whose sample values encode their own position, so tests can
//! check every pixel after loading.

use std::path::{Path, PathBuf};

/// Raw hyperspectral sample at scan line `row`, pixel `col`, plane `s`.
pub fn hyper_sample(row: usize, col: usize, s: usize) -> i32 {
    (1000 * s + 10 * row + col) as i32
}

/// Raw sample of scalar channel `ch` at scan line `row`, pixel `col`.
///
/// Negative for some pixels so sign handling is exercised.
pub fn channel_sample(ch: usize, row: usize, col: usize) -> i32 {
    (100 * ch + 10 * row + col) as i32 - 15
}

/// Description of a synthetic scan.
#[derive(Debug, Clone)]
pub struct SyntheticScan {
    /// Pixels per scan line
    pub x_pixel: usize,
    /// Scan lines
    pub y_pixel: usize,
    /// Wavelength axis, high wavenumber first like the instrument writes it
    pub wavenumbers: Vec<f64>,
    /// Scale of the hyperspectral channel
    pub hyper_scale: f64,
    /// Caption and scale of each scalar channel
    pub channels: Vec<(&'static str, f64)>,
}

impl SyntheticScan {
    /// Scan with four wavenumbers and two scalar channels.
    pub fn new(x_pixel: usize, y_pixel: usize) -> Self {
        Self {
            x_pixel,
            y_pixel,
            wavenumbers: vec![1800.4, 1750.7, 1700.2, 1650.9],
            hyper_scale: 1e-3,
            channels: vec![("Topography", 0.25), ("PiFM", 0.5)],
        }
    }

    /// Parameter file text.
    pub fn params_text(&self) -> String {
        let mut text = String::from(";ANFATEC Parameterfile\n\n");
        text.push_str("Version : 1.12\n");
        text.push_str(&format!("xPixel : {}\n", self.x_pixel));
        text.push_str(&format!("yPixel : {}\n", self.y_pixel));
        text.push_str("XScanRange : 1.0\n");
        text.push_str("Date : 2024-01-05 12:30:15\n\n");

        text.push_str("FileDescBegin\n");
        text.push_str("Caption : hyPIRFwd\n");
        text.push_str("FileName : hyper.int\n");
        text.push_str("FileNameWavelengths : wavelengths.txt\n");
        text.push_str(&format!("Scale : {:e}\n", self.hyper_scale));
        text.push_str("FileDescEnd\n\n");

        for (ch, (caption, scale)) in self.channels.iter().enumerate() {
            text.push_str(&format!("FileDesc{}Begin\n", ch + 2));
            text.push_str(&format!("Caption : {caption}\n"));
            text.push_str(&format!("FileName : channel{ch}.int\n"));
            text.push_str(&format!("Scale : {scale}\n"));
            text.push_str("PhysUnit : V\n");
            text.push_str(&format!("FileDesc{}End\n\n", ch + 2));
        }

        text.push_str("AFMSpectrumDescBegin\n");
        text.push_str("FileName : spectrum.txt\n");
        text.push_str("AFMSpectrumDescEnd\n");
        text
    }

    /// Write the dataset into `dir` and return the parameter file path.
    pub fn write(&self, dir: &Path) -> PathBuf {
        let params = dir.join("params.txt");
        std::fs::write(&params, self.params_text()).expect("write params");

        let axis: String = self
            .wavenumbers
            .iter()
            .map(|w| format!("{w}\t0.5\n"))
            .collect();
        std::fs::write(dir.join("wavelengths.txt"), axis).expect("write wavelengths");

        let mut hyper = Vec::new();
        for row in 0..self.y_pixel {
            for col in 0..self.x_pixel {
                for s in 0..self.wavenumbers.len() {
                    hyper.extend_from_slice(&hyper_sample(row, col, s).to_le_bytes());
                }
            }
        }
        std::fs::write(dir.join("hyper.int"), hyper).expect("write hyper channel");

        for ch in 0..self.channels.len() {
            let mut data = Vec::new();
            for row in 0..self.y_pixel {
                for col in 0..self.x_pixel {
                    data.extend_from_slice(&channel_sample(ch, row, col).to_le_bytes());
                }
            }
            std::fs::write(dir.join(format!("channel{ch}.int")), data).expect("write channel");
        }

        params
    }
}
