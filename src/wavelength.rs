//! Wavelength (wavenumber) axis files.
//!
//! Plain text, one row per spectral plane, one or more whitespace separated
//! float columns. The first column is the wavenumber. Blank lines and lines
//! starting with `#` are skipped.

use std::path::Path;

use ndarray::Array1;

use crate::anfatec::{TextEncoding, split_lines};
use crate::error::{PifmError, Result};

/// Parse wavelength axis text. `path` is used for errors.
pub fn parse_wavelengths(text: &str, path: &Path) -> Result<Array1<f64>> {
    let mut values = Vec::new();
    let mut columns = None;

    for (idx, raw) in split_lines(text).enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let invalid = || PifmError::InvalidWavelengthAxis {
            path: path.to_path_buf(),
            line: idx + 1,
            content: line.to_string(),
        };
        let row = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        // Rows must agree on column count, like any rectangular table
        match columns {
            None => columns = Some(row.len()),
            Some(n) if n != row.len() => return Err(invalid()),
            Some(_) => {}
        }
        values.push(row[0]);
    }

    if values.is_empty() {
        return Err(PifmError::EmptyWavelengthAxis {
            path: path.to_path_buf(),
        });
    }
    Ok(Array1::from(values))
}

/// Load a wavelength axis file.
pub fn load_wavelengths(path: &Path, encoding: TextEncoding) -> Result<Array1<f64>> {
    let text = encoding.read_to_string(path)?;
    let axis = parse_wavelengths(&text, path)?;
    log::debug!("Loaded {} wavenumbers from {}", axis.len(), path.display());
    Ok(axis)
}

/// Truncate a wavenumber toward zero for index lookup.
///
/// Non-finite values never match any lookup.
pub fn truncate_wavenumber(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

/// Index of the first axis entry whose truncated value equals `wavenumber`.
///
/// The axis is neither assumed sorted nor free of duplicates.
pub fn wavenumber_index(axis: &Array1<f64>, wavenumber: i64) -> Option<usize> {
    axis.iter().position(|&w| truncate_wavenumber(w) == Some(wavenumber))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_column() {
        let axis = parse_wavelengths("1800.5\n1798.2\n\n1796.0\n", Path::new("w.txt")).unwrap();
        assert_eq!(axis.to_vec(), vec![1800.5, 1798.2, 1796.0]);
    }

    #[test]
    fn test_parse_multi_column_uses_first() {
        let text = "# wavenumber  power\n1800.0 0.91\n1790.0\t0.88\n";
        let axis = parse_wavelengths(text, Path::new("w.txt")).unwrap();
        assert_eq!(axis.to_vec(), vec![1800.0, 1790.0]);
    }

    #[test]
    fn test_parse_cr_terminated_rows() {
        let axis = parse_wavelengths("1800.0 1\r1790.0 2\r", Path::new("w.txt")).unwrap();
        assert_eq!(axis.to_vec(), vec![1800.0, 1790.0]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_wavelengths("1800\nabc\n", Path::new("w.txt")),
            Err(PifmError::InvalidWavelengthAxis { line: 2, .. })
        ));
        assert!(matches!(
            parse_wavelengths("1800 1\n1790\n", Path::new("w.txt")),
            Err(PifmError::InvalidWavelengthAxis { line: 2, .. })
        ));
        assert!(matches!(
            parse_wavelengths("\n# header only\n", Path::new("w.txt")),
            Err(PifmError::EmptyWavelengthAxis { .. })
        ));
    }

    #[test]
    fn test_wavenumber_index_first_match_truncated() {
        let axis = Array1::from(vec![1500.9, 1500.1, 1499.7, -3.5]);
        assert_eq!(wavenumber_index(&axis, 1500), Some(0));
        assert_eq!(wavenumber_index(&axis, 1499), Some(2));
        assert_eq!(wavenumber_index(&axis, -3), Some(3));
        assert_eq!(wavenumber_index(&axis, 1501), None);
    }

    #[test]
    fn test_truncate_non_finite() {
        assert_eq!(truncate_wavenumber(f64::NAN), None);
        assert_eq!(truncate_wavenumber(f64::INFINITY), None);
        assert_eq!(truncate_wavenumber(-0.9), Some(0));
    }
}
