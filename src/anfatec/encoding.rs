//! Text decoding for ANFATEC parameter and wavelength files.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PifmError, Result};

/// Text encoding used to decode instrument text files.
///
/// The instrument writes ISO-8859-1, so `Latin1` is the default. Every byte
/// sequence is valid Latin-1; `Utf8` rejects invalid sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1, one byte per character
    #[default]
    Latin1,
    /// Strict UTF-8
    Utf8,
}

impl TextEncoding {
    /// Canonical name used in messages and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Utf8 => "utf8",
        }
    }

    /// Decode a whole file's bytes. `path` is only used for error reporting.
    pub fn decode(self, bytes: &[u8], path: &Path) -> Result<String> {
        match self {
            // Latin-1 code points map one-to-one onto the first 256 chars
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| {
                    let valid = &bytes[..e.valid_up_to()];
                    PifmError::EncodingError {
                        path: path.to_path_buf(),
                        line: count_line_breaks(valid) + 1,
                        encoding: self.name(),
                    }
                }),
        }
    }

    /// Read and decode a file.
    pub fn read_to_string(self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| PifmError::io(path, e))?;
        self.decode(&bytes, path)
    }
}

/// Number of `\n`, `\r\n` or lone `\r` terminators in `bytes`.
fn count_line_breaks(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
///
/// Line terminators are not included in the yielded lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let text = text.strip_suffix('\r').unwrap_or(text);
    let lines = (!text.is_empty()).then(|| {
        text.split('\n')
            .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
    });
    lines.into_iter().flatten()
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "latin1" | "iso88591" => Ok(TextEncoding::Latin1),
            "utf8" => Ok(TextEncoding::Utf8),
            other => Err(format!("unknown encoding '{other}' (expected latin1 or utf8)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_decodes_high_bytes() {
        // "µm" in ISO-8859-1
        let bytes = [0xB5, b'm'];
        let text = TextEncoding::Latin1
            .decode(&bytes, Path::new("p.txt"))
            .unwrap();
        assert_eq!(text, "µm");
    }

    #[test]
    fn test_utf8_reports_line_of_bad_byte() {
        let bytes = b"a : 1\nb : 2\nc : \xB5m\n";
        let err = TextEncoding::Utf8
            .decode(bytes, Path::new("p.txt"))
            .unwrap_err();
        match err {
            PifmError::EncodingError { line, encoding, .. } => {
                assert_eq!(line, 3);
                assert_eq!(encoding, "utf8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_lines_universal_newlines() {
        let lines: Vec<_> = split_lines("a\nb\r\nc\rd\n").collect();
        assert_eq!(lines, ["a", "b", "c", "d"]);

        let lines: Vec<_> = split_lines("a\r\rb\r").collect();
        assert_eq!(lines, ["a", "", "b"]);

        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("single").collect::<Vec<_>>(), ["single"]);
    }

    #[test]
    fn test_utf8_line_number_with_cr_terminators() {
        let bytes = b"a : 1\rb : 2\r\nc : \xB5m\r";
        let err = TextEncoding::Utf8
            .decode(bytes, Path::new("p.txt"))
            .unwrap_err();
        assert!(matches!(err, PifmError::EncodingError { line: 3, .. }));
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("ISO-8859-1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert_eq!("utf-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert!("cp1252".parse::<TextEncoding>().is_err());
    }
}
