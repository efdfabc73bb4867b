/// Reader for PASA alignment validation output
///
/// Validation files are tab-delimited, one alignment assessment per line, with
/// `#`-prefixed comment lines interleaved. Only three columns matter here: the
/// transcript accession, the scaffold, and the alignment trace describing
/// aligned segments and the dinucleotides flanking each gap.
use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use noodles::bgzf;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Minimum number of tab-separated fields in a data line
pub const MIN_FIELDS: usize = 14;

const TRANSCRIPT_FIELD: usize = 1;
const SCAFFOLD_FIELD: usize = 4;
const ALIGNMENT_FIELD: usize = 13;

/// Characters of the alignment field preceding the trace itself
pub const ALIGNMENT_OFFSET: usize = 21;

/// A data line that cannot be turned into splice sites
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("line {line}: expected at least {} tab-separated fields, found {found}", MIN_FIELDS)]
    TooFewFields { line: usize, found: usize },

    #[error("line {line}: boundary coordinate {value} is out of range")]
    CoordinateOverflow { line: usize, value: String },
}

/// Open a validation file, `-` for stdin. `.bgz` is read as BGZF and `.gz`
/// as (possibly multi-member) gzip; anything else is plain text.
pub fn open_validation_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();

    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open validation file {}", path.display()))?;

    let extension = path.extension().and_then(|ext| ext.to_str());

    match extension {
        Some("bgz") => Ok(Box::new(BufReader::new(bgzf::io::reader::Reader::new(file)))),
        Some("gz") => Ok(Box::new(BufReader::new(MultiGzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// The columns of one validation line that splice-site recovery needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRecord {
    /// 1-based line number in the input
    pub line_number: usize,
    pub transcript: String,
    pub scaffold: String,
    /// Alignment trace with the leading header characters removed
    pub alignment: String,
}

impl ValidationRecord {
    /// Parse a non-comment line. Surrounding whitespace is trimmed before
    /// splitting on tabs.
    pub fn parse(line: &str, line_number: usize) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.trim().split('\t').collect();

        if fields.len() < MIN_FIELDS {
            return Err(RecordError::TooFewFields {
                line: line_number,
                found: fields.len(),
            });
        }

        Ok(ValidationRecord {
            line_number,
            transcript: fields[TRANSCRIPT_FIELD].to_string(),
            scaffold: fields[SCAFFOLD_FIELD].to_string(),
            alignment: alignment_trace(fields[ALIGNMENT_FIELD]).to_string(),
        })
    }
}

/// Drop the first `ALIGNMENT_OFFSET` characters, yielding an empty trace for
/// shorter fields.
fn alignment_trace(field: &str) -> &str {
    match field.char_indices().nth(ALIGNMENT_OFFSET) {
        Some((idx, _)) => &field[idx..],
        None => "",
    }
}

/// Lazy reader over the data lines of a validation file
pub struct ValidationReader<R: BufRead> {
    reader: R,
    line: String,
    line_number: usize,
    comments: usize,
}

impl<R: BufRead> ValidationReader<R> {
    pub fn new(reader: R) -> Self {
        ValidationReader {
            reader,
            line: String::new(),
            line_number: 0,
            comments: 0,
        }
    }

    /// Read the next data line, skipping comments.
    ///
    /// A malformed line surfaces as a [`RecordError`] inside the returned
    /// error; the line is consumed, so reading can resume afterwards.
    pub fn read_record(&mut self) -> Result<Option<ValidationRecord>> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .with_context(|| format!("Failed to read line {}", self.line_number + 1))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if self.line.starts_with('#') {
                self.comments += 1;
                continue;
            }

            return Ok(Some(ValidationRecord::parse(&self.line, self.line_number)?));
        }
    }

    /// Number of comment lines skipped so far
    pub fn comments_skipped(&self) -> usize {
        self.comments
    }
}

impl<R: BufRead> Iterator for ValidationReader<R> {
    type Item = Result<ValidationRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
