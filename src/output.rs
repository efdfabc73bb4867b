/// Tab-separated splice site output
use anyhow::{Context, Result};
use std::io::{BufWriter, Write};

use crate::splice::SpliceSite;

/// Buffered writer emitting one `donor-acceptor, scaffold, start, end` line
/// per site, without a header.
pub struct SpliceSiteWriter<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: Write> SpliceSiteWriter<W> {
    pub fn new(writer: W) -> Self {
        SpliceSiteWriter {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn write_site(&mut self, site: &SpliceSite) -> Result<()> {
        writeln!(self.writer, "{site}").context("Failed to write splice site")?;
        self.written += 1;
        Ok(())
    }

    /// Sites written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying sink
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("Failed to flush splice site output")
    }
}
