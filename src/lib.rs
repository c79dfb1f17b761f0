//! PiFM - loader for photo-induced force microscopy hyperspectral scans.
//!
//! A scan is saved as an ANFATEC parameter file, a wavelength axis file and
//! one raw binary file per recorded channel. [`HyperImage::open`] reads all
//! of them into a hyperspectral cube plus a stack of channel images;
//! [`hyperslice`] and [`to_2d`] query the result.
//!
//! ```rust,ignore
//! use pifm::{HyperImage, hyperslice};
//!
//! let scan = HyperImage::open("scan/params.txt")?;
//! let amide = hyperslice(&scan, 1600, 1700, None, None)?;
//! ```

pub mod anfatec;
mod error;
pub mod export;
mod flatten;
mod hyper;
pub mod ibw;
pub mod orientation;
pub mod raw;
mod slice;
pub mod wavelength;

#[cfg(test)]
mod test_data;

pub use error::{PifmError, Result};
pub use flatten::to_2d;
pub use hyper::{HyperImage, KEY_CAPTION, KEY_FILE_NAME, KEY_SCALE, KEY_WAVELENGTHS, LoadOptions};
pub use slice::{Window, hyperslice};
