use anyhow::Result;
use clap::Parser;
use log::info;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use splice_sites::{retrieve_splice_sites, ExtractConfig};

/// retrieve-splice-sites - Recover splice sites from PASA alignment validations
///
/// Assumes every mapped transcript reflects a real gene model and prints one
/// line per intron: donor-acceptor, scaffold, start, end. Useful for
/// transcripts that map well but failed validation on unknown splice sites.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// PASA validation output (e.g. alignment.validations.output); .gz/.bgz
    /// are decompressed, - reads stdin
    #[clap(value_name = "VALIDATIONS")]
    validations: PathBuf,

    /// Warn and continue on malformed lines instead of aborting
    #[clap(long = "skip-malformed")]
    skip_malformed: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        log::LevelFilter::Error
    } else {
        match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging(&args);

    let config = ExtractConfig::default().with_skip_malformed(args.skip_malformed);

    let stdout = io::stdout();
    let stats = retrieve_splice_sites(&args.validations, &config, stdout.lock())?;

    info!(
        "{} records, {} comment lines, {} malformed skipped: {} splice sites in {:.2?}",
        stats.records,
        stats.comments,
        stats.malformed,
        stats.sites,
        start.elapsed()
    );

    Ok(())
}
