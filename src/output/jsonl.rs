//! JSON Lines result sink
//!
//! Appends one JSON object per line to a file. The file is opened in
//! append mode for every batch and closed again before `append` returns.

use crate::output::traits::{OutputError, OutputResult, ResultSink, SiteEntry};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only JSON Lines file sink
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    /// Creates a sink writing to `path`
    ///
    /// The file is created on the first `append` if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path this sink appends to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonLinesSink {
    fn append(&self, entries: &[SiteEntry]) -> OutputResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| OutputError::Open {
                path: self.path.display().to_string(),
                source,
            })?;

        // Dropping the writer on an early return flushes what was written so far.
        let mut writer = BufWriter::new(file);
        write_entries(&mut writer, entries)?;
        writer.flush()?;

        tracing::trace!(
            "Appended {} entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes one JSON object per line, stopping at the first failure
///
/// Lines written before the failure stay in `writer`.
fn write_entries<W: Write>(writer: &mut W, entries: &[SiteEntry]) -> OutputResult<()> {
    for entry in entries {
        serde_json::to_writer(&mut *writer, entry)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
