/// Validation records in, splice sites out
use anyhow::Result;
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::output::SpliceSiteWriter;
use crate::splice::{record_splice_sites, SpliceSite};
use crate::strand::infer_strand;
use crate::validation::{open_validation_input, RecordError, ValidationReader};

/// Run options for splice site retrieval
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Warn about malformed lines and keep going instead of aborting the run
    pub skip_malformed: bool,
}

impl ExtractConfig {
    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records: usize,
    pub comments: usize,
    pub malformed: usize,
    pub sites: usize,
}

/// Extract splice sites from the validation file at `input` and write them
/// to `out`.
pub fn retrieve_splice_sites<P: AsRef<Path>, W: Write>(
    input: P,
    config: &ExtractConfig,
    out: W,
) -> Result<RunStats> {
    let input = input.as_ref();
    let reader = open_validation_input(input)?;
    info!("Reading PASA validations from {}", input.display());
    process_reader(reader, config, out)
}

/// Same pipeline over an already opened reader
pub fn process_reader<R: BufRead, W: Write>(
    reader: R,
    config: &ExtractConfig,
    out: W,
) -> Result<RunStats> {
    let mut records = ValidationReader::new(reader);
    let mut writer = SpliceSiteWriter::new(out);
    let mut stats = RunStats::default();

    loop {
        let record = match records.read_record() {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(e) => {
                skip_or_fail(e, config, &mut stats)?;
                continue;
            }
        };
        stats.records += 1;

        let strand = infer_strand(&record.alignment);
        let sites: Result<Vec<SpliceSite>, RecordError> =
            record_splice_sites(&record, strand).collect();
        let sites = match sites {
            Ok(sites) => sites,
            Err(e) => {
                skip_or_fail(e.into(), config, &mut stats)?;
                continue;
            }
        };

        debug!(
            "{} on {} ({}): {} splice site(s)",
            record.transcript,
            record.scaffold,
            strand,
            sites.len()
        );

        for site in &sites {
            writer.write_site(site)?;
        }
    }

    stats.comments = records.comments_skipped();
    stats.sites = writer.written();
    writer.finish()?;

    Ok(stats)
}

/// Record-level problems are skipped when asked to; I/O errors never are.
fn skip_or_fail(err: anyhow::Error, config: &ExtractConfig, stats: &mut RunStats) -> Result<()> {
    if config.skip_malformed && err.downcast_ref::<RecordError>().is_some() {
        warn!("Skipping malformed record: {err}");
        stats.malformed += 1;
        Ok(())
    } else {
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record_line(scaffold: &str, trace: &str) -> String {
        let header = "h".repeat(crate::validation::ALIGNMENT_OFFSET);
        let field13 = format!("{header}{trace}");
        let mut fields = vec!["."; crate::validation::MIN_FIELDS];
        fields[1] = "asmbl_1";
        fields[4] = scaffold;
        fields[13] = &field13;
        fields.join("\t")
    }

    fn run(input: &str, config: &ExtractConfig) -> Result<(String, RunStats)> {
        let mut out = Vec::new();
        let stats = process_reader(Cursor::new(input.to_string()), config, &mut out)?;
        Ok((String::from_utf8(out)?, stats))
    }

    #[test]
    fn test_end_to_end_forward() {
        let input = format!("# comment\n{}\n", record_line("scaffold_1", "100(50)>GT....AG<200(60)"));
        let (out, stats) = run(&input, &ExtractConfig::default()).unwrap();

        assert_eq!(out, "GT-AG\tscaffold_1\t101\t199\n");
        assert_eq!(
            stats,
            RunStats {
                records: 1,
                comments: 1,
                malformed: 0,
                sites: 1
            }
        );
    }

    #[test]
    fn test_malformed_line_aborts_by_default() {
        let input = format!("{}\nonly\ttwo\n", record_line("chr1", "1(1)>GT....AG<9(2)"));
        let err = run(&input, &ExtractConfig::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::TooFewFields { line: 2, found: 2 })
        );
    }

    #[test]
    fn test_sites_before_abort_are_written() {
        let input = format!(
            "{}\nonly\ttwo\n{}\n",
            record_line("chr1", "1(1)>GT....AG<9(2)"),
            record_line("chr2", "1(1)>GT....AG<9(2)")
        );
        let mut out = Vec::new();
        let result = process_reader(Cursor::new(input), &ExtractConfig::default(), &mut out);

        assert!(result.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "GT-AG\tchr1\t2\t8\n");
    }

    #[test]
    fn test_malformed_line_skipped_when_requested() {
        let input = format!(
            "only\ttwo\n{}\n",
            record_line("chr1", "1(1)>GT....AG<9(2)")
        );
        let config = ExtractConfig::default().with_skip_malformed(true);
        let (out, stats) = run(&input, &config).unwrap();

        assert_eq!(out, "GT-AG\tchr1\t2\t8\n");
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.records, 1);
    }

    #[test]
    fn test_overflowing_record_skipped_whole() {
        let input = format!(
            "{}\n",
            record_line("chr1", "1(1)>GT....AG<9(2)-9999999999999999999999999999999999999999(3)>GT....AG<5(4)")
        );
        let config = ExtractConfig::default().with_skip_malformed(true);
        let (out, stats) = run(&input, &config).unwrap();

        assert!(out.is_empty());
        assert_eq!(stats.malformed, 1);
    }
}
