/// Splice junction extraction from PASA alignment traces
///
/// A trace marks each intron as
///
/// ```text
/// 100(50)>GT....AG<200(60)
/// ```
///
/// where `100` is the last aligned genomic base before the intron, `200` the
/// first aligned base after it, and the bracketed numbers are transcript
/// positions. The two dinucleotides are the reference bases just inside the
/// intron, always read on the genomic forward strand.
use lazy_static::lazy_static;
use regex::{CaptureMatches, Regex};
use std::fmt;

use crate::nucleotide::reverse_complement;
use crate::strand::Strand;
use crate::validation::{RecordError, ValidationRecord};

lazy_static! {
    static ref JUNCTION_REGEX: Regex = Regex::new(
        r"([0-9]+)\([0-9]+\)>([a-zA-Z]{2})\.{4}([a-zA-Z]{2})<([0-9]+)\([0-9]+\)"
    )
    .unwrap();
}

/// Genomic position; wide enough for any boundary a trace realistically carries
pub type Coordinate = i128;

/// One intron with its strand-oriented boundary dinucleotides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceSite {
    pub donor: String,
    pub acceptor: String,
    pub scaffold: String,
    /// First intronic base, 1-based inclusive
    pub start: Coordinate,
    /// Last intronic base, 1-based inclusive
    pub end: Coordinate,
}

impl SpliceSite {
    /// Orient the two reference-strand motifs. On the reverse strand the
    /// donor is the right-hand motif, reverse complemented.
    pub fn new(
        left_motif: &str,
        right_motif: &str,
        strand: Strand,
        scaffold: &str,
        left_boundary: Coordinate,
        right_boundary: Coordinate,
    ) -> Self {
        let (donor, acceptor) = match strand {
            Strand::Forward => (
                left_motif.to_ascii_uppercase(),
                right_motif.to_ascii_uppercase(),
            ),
            Strand::Reverse => (
                reverse_complement(right_motif),
                reverse_complement(left_motif),
            ),
        };

        SpliceSite {
            donor,
            acceptor,
            scaffold: scaffold.to_string(),
            start: left_boundary + 1,
            end: right_boundary - 1,
        }
    }

    /// `donor-acceptor` pair, e.g. `GT-AG`
    pub fn motif(&self) -> String {
        format!("{}-{}", self.donor, self.acceptor)
    }
}

impl fmt::Display for SpliceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.motif(),
            self.scaffold,
            self.start,
            self.end
        )
    }
}

/// Lazy iterator over the splice sites of one alignment trace, in the order
/// the junctions appear.
pub struct SpliceSites<'a> {
    captures: CaptureMatches<'static, 'a>,
    scaffold: &'a str,
    strand: Strand,
    line_number: usize,
}

impl<'a> SpliceSites<'a> {
    pub fn new(alignment: &'a str, scaffold: &'a str, strand: Strand, line_number: usize) -> Self {
        SpliceSites {
            captures: JUNCTION_REGEX.captures_iter(alignment),
            scaffold,
            strand,
            line_number,
        }
    }

    /// Parse a boundary, leaving room to step one base inward
    fn coordinate(&self, digits: &str) -> Result<Coordinate, RecordError> {
        digits
            .parse::<Coordinate>()
            .ok()
            .filter(|value| *value < Coordinate::MAX)
            .ok_or_else(|| RecordError::CoordinateOverflow {
                line: self.line_number,
                value: digits.to_string(),
            })
    }
}

impl Iterator for SpliceSites<'_> {
    type Item = Result<SpliceSite, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.captures.next()?;

        // The four groups always participate when the pattern matches
        let left = match self.coordinate(&caps[1]) {
            Ok(value) => value,
            Err(e) => return Some(Err(e)),
        };
        let right = match self.coordinate(&caps[4]) {
            Ok(value) => value,
            Err(e) => return Some(Err(e)),
        };

        Some(Ok(SpliceSite::new(
            &caps[2],
            &caps[3],
            self.strand,
            self.scaffold,
            left,
            right,
        )))
    }
}

/// Splice sites of a parsed validation record, oriented by `strand`
pub fn record_splice_sites(record: &ValidationRecord, strand: Strand) -> SpliceSites<'_> {
    SpliceSites::new(&record.alignment, &record.scaffold, strand, record.line_number)
}

/// Number of junction markers in a trace, regardless of coordinate validity
pub fn count_junctions(alignment: &str) -> usize {
    JUNCTION_REGEX.find_iter(alignment).count()
}
