/*!
 * Output document rendering for llmcontext
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::types::RootScan;

/// Writes the aggregated document for one or more scanned roots
pub struct ContextWriter {
    output_file: PathBuf,
}

impl ContextWriter {
    /// Create a new writer targeting the given output file
    pub fn new(output_file: PathBuf) -> Self {
        Self { output_file }
    }

    /// Write the full document; any write failure is fatal for the run
    pub fn write(&self, scans: &[RootScan]) -> Result<()> {
        let file = File::create(&self.output_file).map_err(|e| {
            crate::error!(
                Writer,
                "could not write to {}: {}",
                self.output_file.display(),
                e
            )
        })?;
        let mut writer = BufWriter::new(file);
        self.write_document(&mut writer, scans)?;
        writer.flush()?;
        Ok(())
    }

    /// Render all blocks into the given writer
    ///
    /// Each file becomes `--<path>--`, its payload, then a blank line.
    /// With more than one root, each root's blocks are wrapped in
    /// `=== Directory: <abs> ===` / `=== End of <abs> ===` lines.
    pub fn write_document<W: Write>(&self, writer: &mut W, scans: &[RootScan]) -> io::Result<()> {
        let wrap = scans.len() > 1;
        for scan in scans {
            if wrap {
                writeln!(writer, "=== Directory: {} ===", scan.root.display())?;
                writeln!(writer)?;
            }
            for record in &scan.records {
                write!(writer, "--{}--\n{}\n\n", record.path, record.payload.render())?;
            }
            if wrap {
                writeln!(writer, "=== End of {} ===", scan.root.display())?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
