//! Line-oriented state machine for ANFATEC parameter files.
//!
//! The file is a flat list of `Key : Value` lines. Channel descriptors are
//! bracketed by lines such as `FileDescBegin` / `FileDescEnd` (the prefix is
//! always `File`, the middle varies), spectrum descriptors by lines ending
//! in `SpectrumDescBegin` / `SpectrumDescEnd`. Everything outside a block is
//! a global scan parameter. Lines starting with `;` are comments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::encoding::{TextEncoding, split_lines};
use super::params::{Descriptor, ScanParameters};
use crate::error::{PifmError, Result};

/// What to do with the `key : value` content of a block's closing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosingLine {
    /// Store the closing line in the block being closed. A closing line
    /// without `:` is stored with the whole line as both key and value.
    #[default]
    Capture,
    /// Drop the closing line.
    Discard,
}

/// Options controlling how a parameter file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Text encoding of the file.
    pub encoding: TextEncoding,
    /// Handling of block closing lines.
    pub closing_line: ClosingLine,
}

impl ParserOptions {
    /// Create parser options with defaults (Latin-1, capture closing lines).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text encoding.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the closing line policy.
    pub fn closing_line(mut self, closing_line: ClosingLine) -> Self {
        self.closing_line = closing_line;
        self
    }
}

/// Everything a parameter file declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamFile {
    /// Global scan parameters.
    pub scan_params: ScanParameters,
    /// Channel descriptors in declaration order. The first is the
    /// hyperspectral channel.
    pub channels: Vec<Descriptor>,
    /// Spectrum descriptors in declaration order.
    pub spectra: Vec<Descriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Channel,
    Spectrum,
}

impl BlockKind {
    fn name(self) -> &'static str {
        match self {
            BlockKind::Channel => "channel",
            BlockKind::Spectrum => "spectrum",
        }
    }
}

/// Classification of a single trimmed line.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Skip,
    Open(BlockKind),
    Close(BlockKind),
    Entry(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() || line.starts_with(';') {
        return LineKind::Skip;
    }
    let file_prefixed = line.starts_with("File");
    if file_prefixed && line.ends_with("Begin") {
        LineKind::Open(BlockKind::Channel)
    } else if line.ends_with("SpectrumDescBegin") {
        LineKind::Open(BlockKind::Spectrum)
    } else if file_prefixed && line.ends_with("End") {
        LineKind::Close(BlockKind::Channel)
    } else if line.ends_with("SpectrumDescEnd") {
        LineKind::Close(BlockKind::Spectrum)
    } else {
        LineKind::Entry(line)
    }
}

/// Split `key : value` into trimmed parts. With several colons the value is
/// the text after the last one.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (key, _) = line.split_once(':')?;
    let value = line.rsplit(':').next().unwrap_or_default();
    Some((key.trim(), value.trim()))
}

enum ParserState {
    Scanning,
    InBlock {
        kind: BlockKind,
        opened_at: usize,
        fields: Descriptor,
    },
}

/// Incremental parser; feed lines in order, then `finish`.
struct Parser<'p> {
    path: &'p Path,
    options: ParserOptions,
    state: ParserState,
    result: ParamFile,
}

impl<'p> Parser<'p> {
    fn new(path: &'p Path, options: ParserOptions) -> Self {
        Self {
            path,
            options,
            state: ParserState::Scanning,
            result: ParamFile::default(),
        }
    }

    fn malformed(&self, line_no: usize, line: &str) -> PifmError {
        PifmError::MalformedLine {
            path: self.path.to_path_buf(),
            line: line_no,
            content: line.to_string(),
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> Result<()> {
        let line = raw.trim();
        match classify(line) {
            LineKind::Skip => {}
            LineKind::Open(kind) => {
                if let ParserState::InBlock {
                    kind: open_kind,
                    opened_at,
                    ..
                } = &self.state
                {
                    log::warn!(
                        "{}:{}: {} block opened inside the {} block from line {}; discarding it",
                        self.path.display(),
                        line_no,
                        kind.name(),
                        open_kind.name(),
                        opened_at
                    );
                }
                self.state = ParserState::InBlock {
                    kind,
                    opened_at: line_no,
                    fields: Descriptor::new(),
                };
            }
            LineKind::Close(kind) => {
                let ParserState::InBlock {
                    kind: open_kind,
                    mut fields,
                    ..
                } = std::mem::replace(&mut self.state, ParserState::Scanning)
                else {
                    return Err(self.malformed(line_no, line));
                };
                if open_kind != kind {
                    return Err(self.malformed(line_no, line));
                }
                if self.options.closing_line == ClosingLine::Capture {
                    let (key, value) = split_entry(line).unwrap_or((line, line));
                    fields.insert(key, value);
                }
                match kind {
                    BlockKind::Channel => self.result.channels.push(fields),
                    BlockKind::Spectrum => self.result.spectra.push(fields),
                }
            }
            LineKind::Entry(entry) => {
                let (key, value) =
                    split_entry(entry).ok_or_else(|| self.malformed(line_no, entry))?;
                match &mut self.state {
                    ParserState::Scanning => self.result.scan_params.insert(key, value),
                    ParserState::InBlock { fields, .. } => fields.insert(key, value),
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<ParamFile> {
        match self.state {
            ParserState::Scanning => Ok(self.result),
            ParserState::InBlock {
                kind, opened_at, ..
            } => Err(PifmError::UnterminatedBlock {
                path: self.path.to_path_buf(),
                kind: kind.name(),
                line: opened_at,
            }),
        }
    }
}

/// Parse already-decoded parameter file text. `path` is used for errors.
pub fn parse_params(text: &str, path: &Path, options: ParserOptions) -> Result<ParamFile> {
    let mut parser = Parser::new(path, options);
    for (idx, line) in split_lines(text).enumerate() {
        parser.feed(idx + 1, line)?;
    }
    let parsed = parser.finish()?;
    log::debug!(
        "Parsed {}: {} scan parameters, {} channels, {} spectra",
        path.display(),
        parsed.scan_params.len(),
        parsed.channels.len(),
        parsed.spectra.len()
    );
    Ok(parsed)
}

/// Read and parse an ANFATEC parameter file.
pub fn read_anfatec_params(path: impl AsRef<Path>, options: ParserOptions) -> Result<ParamFile> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let text = options.encoding.read_to_string(&path)?;
    parse_params(&text, &path, options)
}
