//! ANFATEC parameter file reading.
//!
//! The PiFM instrument saves each scan as one human-readable parameter file
//! plus one raw binary file per recorded channel. This module turns the
//! parameter file into a [`ParamFile`]: the global [`ScanParameters`], the
//! channel [`Descriptor`]s (first one is the hyperspectral channel) and the
//! spectrum descriptors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pifm::anfatec::{read_anfatec_params, ParserOptions};
//!
//! let parsed = read_anfatec_params("scan/params.txt", ParserOptions::default())?;
//! let x_pixel = parsed.scan_params.require_usize("xPixel", "scan parameters")?;
//! ```

mod encoding;
mod params;
mod parser;

pub use encoding::{TextEncoding, split_lines};
pub use params::{Descriptor, ParameterMap, ScanParameters};
pub use parser::{ClosingLine, ParamFile, ParserOptions, parse_params, read_anfatec_params};
