//! The result table: one row per input ligand, streamed as the run proceeds.
//!
//! Opened once per run in truncate mode, so re-running over a populated
//! directory rewrites the table from scratch. Each row is appended and
//! flushed immediately after the corresponding docking attempt; partial
//! results survive a mid-run abort.

use dockflow_core::DockError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fixed two-column header of the result table.
pub const RESULTS_HEADER: &str = "SMILES,Docking Score";

/// Append-only writer for the per-run result table.
pub struct ResultsWriter {
    writer: BufWriter<File>,
    rows: usize,
}

impl ResultsWriter {
    /// Create (truncating) the table and write the header.
    pub fn create(path: &Path) -> Result<Self, DockError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{RESULTS_HEADER}")?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Record one ligand's outcome. The score field is either a numeric
    /// string or one of the `N/A` / `Error` sentinels.
    pub fn record(&mut self, smiles: &str, score: &str) -> Result<(), DockError> {
        writeln!(self.writer, "{smiles},{score}")?;
        // Flush per row: the table is the durable record of a running job
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows recorded so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }
}
