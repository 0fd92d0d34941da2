//! Plain-text log backend: one `"<seq>: <message>"` line per event.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ferry_core::Event;

use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes the numbered event log.
///
/// Every line is flushed as soon as it is written, so a reader tailing the
/// file (or a crash mid-run) sees a prefix of the log, never a torn line.
pub struct TextWriter<W: Write + Send> {
    out:      W,
    finished: bool,
}

impl TextWriter<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::from_writer(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write + Send> TextWriter<W> {
    pub fn from_writer(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Unwrap the inner writer (e.g. to inspect an in-memory buffer).
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> OutputWriter for TextWriter<W> {
    fn write_event(&mut self, seq: u64, event: &Event) -> OutputResult<()> {
        writeln!(self.out, "{seq}: {event}")?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
